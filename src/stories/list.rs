//! Pure transformations over a story list.

use std::fmt;
use std::str::FromStr;

use crate::error::{AppError, Result};
use crate::models::{Story, StoryId};

/// Keep stories whose title contains `term`, ignoring case.
pub fn filter_by_term(list: &[Story], term: &str) -> Vec<Story> {
    let needle = term.to_lowercase();
    list.iter()
        .filter(|story| story.title.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

/// Copy of `list` without the first story carrying `id`.
pub fn remove_by_id(list: &[Story], id: &StoryId) -> Vec<Story> {
    let mut remaining = list.to_vec();
    if let Some(pos) = remaining.iter().position(|story| &story.object_id == id) {
        remaining.remove(pos);
    }
    remaining
}

/// Column a list can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortKey {
    /// Source order
    #[default]
    None,
    Title,
    Author,
    Comments,
    Points,
}

impl SortKey {
    pub const ALL: [SortKey; 5] = [
        SortKey::None,
        SortKey::Title,
        SortKey::Author,
        SortKey::Comments,
        SortKey::Points,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::None => "none",
            SortKey::Title => "title",
            SortKey::Author => "author",
            SortKey::Comments => "comments",
            SortKey::Points => "points",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        SortKey::ALL
            .into_iter()
            .find(|key| key.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                AppError::validation(format!(
                    "unknown sort key '{s}' (expected one of: none, title, author, comments, points)"
                ))
            })
    }
}

/// Order `list` by `key`.
///
/// The forward direction is ascending for text and comment counts and
/// descending for points. The sort is stable. `reverse` flips the whole
/// forward ordering, and `SortKey::None` keeps source order.
pub fn sort_by(list: &[Story], key: SortKey, reverse: bool) -> Vec<&Story> {
    let mut sorted: Vec<&Story> = list.iter().collect();
    match key {
        SortKey::None => {}
        SortKey::Title => sorted.sort_by(|a, b| a.title.cmp(&b.title)),
        SortKey::Author => sorted.sort_by(|a, b| a.author.cmp(&b.author)),
        SortKey::Comments => sorted.sort_by_key(|story| story.num_comments),
        SortKey::Points => sorted.sort_by(|a, b| b.points.cmp(&a.points)),
    }
    if reverse {
        sorted.reverse();
    }
    sorted
}

/// Currently selected column and direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortState {
    pub key: SortKey,
    pub is_reverse: bool,
}

impl SortState {
    pub fn new(key: SortKey, is_reverse: bool) -> Self {
        Self { key, is_reverse }
    }

    /// Select a column. Re-selecting the current column flips direction;
    /// a different column always starts forward. Selecting `None` always
    /// goes back to source order.
    pub fn select(self, key: SortKey) -> Self {
        if key == SortKey::None {
            return Self::default();
        }
        Self {
            key,
            is_reverse: self.key == key && !self.is_reverse,
        }
    }

    pub fn apply<'a>(&self, list: &'a [Story]) -> Vec<&'a Story> {
        sort_by(list, self.key, self.is_reverse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn story(id: u64, title: &str, author: &str, num_comments: u64, points: i64) -> Story {
        Story {
            title: title.into(),
            url: format!("https://example.com/{id}"),
            author: author.into(),
            num_comments,
            points,
            object_id: StoryId::from(id),
        }
    }

    fn sample() -> Vec<Story> {
        vec![
            story(0, "React", "Jordan Walke", 3, 4),
            story(1, "Redux", "Dan Abramov, Andrew Clark", 2, 5),
            story(2, "angular", "Misko Hevery", 9, 4),
            story(3, "Vue", "Evan You", 1, 8),
        ]
    }

    fn ids(list: &[&Story]) -> Vec<String> {
        list.iter().map(|s| s.object_id.to_string()).collect()
    }

    #[test]
    fn test_filter_is_case_insensitive() {
        let filtered = filter_by_term(&sample(), "re");
        let titles: Vec<_> = filtered.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, ["React", "Redux"]);

        let filtered = filter_by_term(&sample(), "ANGULAR");
        assert_eq!(filtered.len(), 1);
    }

    #[test]
    fn test_filter_empty_term_keeps_all() {
        assert_eq!(filter_by_term(&sample(), "").len(), 4);
    }

    #[test]
    fn test_remove_preserves_order() {
        let list = sample();
        let remaining = remove_by_id(&list, &StoryId::from(1));
        assert_eq!(remaining.len(), list.len() - 1);
        assert!(remaining.iter().all(|s| s.object_id != StoryId::from(1)));
        let order: Vec<_> = remaining.iter().map(|s| s.object_id.to_string()).collect();
        assert_eq!(order, ["0", "2", "3"]);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let list = sample();
        assert_eq!(remove_by_id(&list, &StoryId::from(42)), list);
    }

    #[test]
    fn test_sort_none_keeps_source_order() {
        let list = sample();
        assert_eq!(ids(&sort_by(&list, SortKey::None, false)), ["0", "1", "2", "3"]);
    }

    #[test]
    fn test_sort_title_is_case_sensitive() {
        let list = sample();
        // Uppercase letters order before lowercase ones.
        assert_eq!(ids(&sort_by(&list, SortKey::Title, false)), ["0", "1", "3", "2"]);
    }

    #[test]
    fn test_sort_author() {
        let list = sample();
        assert_eq!(ids(&sort_by(&list, SortKey::Author, false)), ["1", "3", "0", "2"]);
    }

    #[test]
    fn test_sort_comments_ascending() {
        let list = sample();
        assert_eq!(ids(&sort_by(&list, SortKey::Comments, false)), ["3", "1", "0", "2"]);
    }

    #[test]
    fn test_sort_points_descending_and_stable() {
        let list = sample();
        // 0 and 2 tie on points and keep their source order.
        assert_eq!(ids(&sort_by(&list, SortKey::Points, false)), ["3", "1", "0", "2"]);
        assert_eq!(ids(&sort_by(&list, SortKey::Points, true)), ["2", "0", "1", "3"]);
    }

    #[test]
    fn test_toggle_twice_returns_forward_order() {
        let list = sample();
        let forward = SortState::default().select(SortKey::Points);
        assert!(!forward.is_reverse);

        let reversed = forward.select(SortKey::Points);
        assert!(reversed.is_reverse);

        let again = reversed.select(SortKey::Points);
        assert_eq!(again, forward);
        assert_eq!(ids(&again.apply(&list)), ids(&forward.apply(&list)));
    }

    #[test]
    fn test_new_key_starts_forward() {
        let state = SortState::default()
            .select(SortKey::Title)
            .select(SortKey::Title);
        assert!(state.is_reverse);

        let state = state.select(SortKey::Author);
        assert_eq!(
            state,
            SortState {
                key: SortKey::Author,
                is_reverse: false,
            }
        );
    }

    #[test]
    fn test_points_ties_keep_source_order_forward_and_flip_on_reverse() {
        let list = vec![
            story(0, "a", "x", 0, 7),
            story(1, "b", "x", 0, 7),
            story(2, "c", "x", 0, 9),
            story(3, "d", "x", 0, 7),
        ];
        assert_eq!(ids(&sort_by(&list, SortKey::Points, false)), ["2", "0", "1", "3"]);
        assert_eq!(ids(&sort_by(&list, SortKey::Points, true)), ["3", "1", "0", "2"]);
    }

    #[test]
    fn test_selecting_none_from_default_keeps_source_order() {
        let list = sample();
        let state = SortState::default().select(SortKey::None);
        assert_eq!(state, SortState::default());
        assert_eq!(ids(&state.apply(&list)), ["0", "1", "2", "3"]);

        let state = state.select(SortKey::None);
        assert!(!state.is_reverse);
    }

    #[test]
    fn test_selecting_none_resets_a_sorted_list() {
        let state = SortState::default()
            .select(SortKey::Points)
            .select(SortKey::Points)
            .select(SortKey::None);
        assert_eq!(state, SortState::default());
    }

    #[test]
    fn test_explicit_state_reverses_source_order() {
        let list = sample();
        let state = SortState::new(SortKey::None, true);
        assert_eq!(ids(&state.apply(&list)), ["3", "2", "1", "0"]);
        assert_eq!(ids(&SortState::new(SortKey::None, false).apply(&list)), ["0", "1", "2", "3"]);
    }

    #[test]
    fn test_parse_sort_key() {
        assert_eq!("Points".parse::<SortKey>().unwrap(), SortKey::Points);
        assert_eq!(" title ".parse::<SortKey>().unwrap(), SortKey::Title);
        assert!("date".parse::<SortKey>().is_err());
    }
}
