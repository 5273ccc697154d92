//! Aggregates derived from the story list.

use std::sync::Arc;

use crate::models::Story;

/// Total comment count over a list.
pub fn sum_comments(stories: &[Story]) -> u64 {
    stories.iter().map(|story| story.num_comments).sum()
}

/// Memoized [`sum_comments`] keyed on the identity of the story list.
///
/// The list is only ever replaced, never edited, so a pointer comparison
/// is enough to decide whether the cached total is still valid.
#[derive(Debug, Default)]
pub struct CommentTotal {
    source: Option<Option<Arc<[Story]>>>,
    total: u64,
    computations: usize,
}

impl CommentTotal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total for `data`, recomputed only when `data` is a different list
    /// than on the previous call.
    pub fn get(&mut self, data: Option<&Arc<[Story]>>) -> u64 {
        let unchanged = match (&self.source, data) {
            (Some(Some(seen)), Some(current)) => Arc::ptr_eq(seen, current),
            (Some(None), None) => true,
            _ => false,
        };

        if !unchanged {
            self.total = data.map_or(0, |stories| sum_comments(stories));
            self.source = Some(data.cloned());
            self.computations += 1;
        }
        self.total
    }

    /// How many times the total was actually recomputed.
    pub fn computations(&self) -> usize {
        self.computations
    }
}
