//! Fetch lifecycle reducer.
//!
//! `StoriesState` only changes through [`reduce`]. The story list is held
//! behind an `Arc<[Story]>`: it is replaced wholesale on a successful
//! fetch, rebuilt without the dismissed entry on removal, and never
//! mutated in place. Derived values can therefore detect changes by
//! pointer identity.

use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;

use crate::error::{AppError, Result};
use crate::models::{Story, StoryId};
use crate::stories::list;

/// Loading/error/data state for the current query.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StoriesState {
    /// Last good result set; `None` until the first successful fetch
    pub data: Option<Arc<[Story]>>,
    pub is_loading: bool,
    pub is_error: bool,
}

/// Coarse view of where the lifecycle currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    Success,
    Failure,
}

impl StoriesState {
    pub fn phase(&self) -> Phase {
        if self.is_loading {
            Phase::Loading
        } else if self.is_error {
            Phase::Failure
        } else if self.data.is_some() {
            Phase::Success
        } else {
            Phase::Idle
        }
    }

    /// Stories currently held, empty before the first success.
    pub fn stories(&self) -> &[Story] {
        self.data.as_deref().unwrap_or(&[])
    }
}

/// Closed set of transitions accepted by [`reduce`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoriesAction {
    /// A request was issued
    Init,
    /// The request resolved with this payload
    Success(Vec<Story>),
    /// The request failed
    Failure,
    /// The user dismissed a story
    Remove(StoryId),
}

pub const FETCH_INIT: &str = "STORIES_FETCH_INIT";
pub const FETCH_SUCCESS: &str = "STORIES_FETCH_SUCCESS";
pub const FETCH_FAILURE: &str = "STORIES_FETCH_FAILURE";
pub const REMOVE_STORY: &str = "REMOVE_STORY";

/// Payload of a `REMOVE_STORY` record: either the story itself or its id.
#[derive(Deserialize)]
#[serde(untagged)]
enum RemoveTarget {
    Story {
        #[serde(rename = "objectID")]
        object_id: StoryId,
    },
    Id(StoryId),
}

impl StoriesAction {
    /// Parse a tagged record of the form `{"type": ..., "payload": ...}`.
    ///
    /// Any discriminator outside the four known ones is rejected with
    /// [`AppError::UnknownAction`].
    pub fn from_record(record: &Value) -> Result<Self> {
        let kind = record
            .get("type")
            .and_then(Value::as_str)
            .ok_or_else(|| AppError::unknown_action(format!("record without a type: {record}")))?;
        let payload = record.get("payload").cloned().unwrap_or(Value::Null);

        match kind {
            FETCH_INIT => Ok(Self::Init),
            FETCH_SUCCESS => Ok(Self::Success(serde_json::from_value(payload)?)),
            FETCH_FAILURE => Ok(Self::Failure),
            REMOVE_STORY => {
                let id = match serde_json::from_value::<RemoveTarget>(payload)? {
                    RemoveTarget::Story { object_id } => object_id,
                    RemoveTarget::Id(id) => id,
                };
                Ok(Self::Remove(id))
            }
            other => Err(AppError::unknown_action(other)),
        }
    }

    /// Discriminator used in tagged records.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Init => FETCH_INIT,
            Self::Success(_) => FETCH_SUCCESS,
            Self::Failure => FETCH_FAILURE,
            Self::Remove(_) => REMOVE_STORY,
        }
    }
}

/// Apply one transition.
pub fn reduce(state: StoriesState, action: StoriesAction) -> StoriesState {
    match action {
        StoriesAction::Init => StoriesState {
            is_loading: true,
            is_error: false,
            ..state
        },
        StoriesAction::Success(stories) => StoriesState {
            data: Some(stories.into()),
            is_loading: false,
            is_error: false,
        },
        StoriesAction::Failure => StoriesState {
            is_loading: false,
            is_error: true,
            ..state
        },
        StoriesAction::Remove(id) => {
            // Absent ids leave the list (and its identity) untouched.
            let Some(data) = state
                .data
                .as_ref()
                .filter(|data| data.iter().any(|s| s.object_id == id))
            else {
                return state;
            };
            let remaining = list::remove_by_id(data, &id);
            StoriesState {
                data: Some(remaining.into()),
                ..state
            }
        }
    }
}

/// Parse a tagged record and apply it.
pub fn reduce_record(state: StoriesState, record: &Value) -> Result<StoriesState> {
    let action = StoriesAction::from_record(record)?;
    Ok(reduce(state, action))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn story_one() -> Story {
        Story {
            title: "React".into(),
            url: "https://reactjs.org/".into(),
            author: "Jordan Walke".into(),
            num_comments: 3,
            points: 4,
            object_id: StoryId::from(0),
        }
    }

    fn story_two() -> Story {
        Story {
            title: "Redux".into(),
            url: "https://redux.js.org/".into(),
            author: "Dan Abramov, Andrew Clark".into(),
            num_comments: 2,
            points: 5,
            object_id: StoryId::from(1),
        }
    }

    fn settled(stories: Vec<Story>) -> StoriesState {
        StoriesState {
            data: Some(stories.into()),
            is_loading: false,
            is_error: false,
        }
    }

    #[test]
    fn test_remove_story() {
        let state = settled(vec![story_one(), story_two()]);
        let next = reduce(state, StoriesAction::Remove(StoryId::from(0)));
        assert_eq!(next, settled(vec![story_two()]));
    }

    #[test]
    fn test_remove_absent_id_keeps_list_identity() {
        let state = settled(vec![story_one()]);
        let before = state.data.clone().unwrap();
        let next = reduce(state, StoriesAction::Remove(StoryId::from(99)));
        assert!(Arc::ptr_eq(&before, next.data.as_ref().unwrap()));
    }

    #[test]
    fn test_remove_without_data_is_noop() {
        let next = reduce(StoriesState::default(), StoriesAction::Remove(StoryId::from(0)));
        assert_eq!(next, StoriesState::default());
    }

    #[test]
    fn test_init_from_empty() {
        let next = reduce(StoriesState::default(), StoriesAction::Init);
        assert_eq!(
            next,
            StoriesState {
                data: None,
                is_loading: true,
                is_error: false,
            }
        );
        assert_eq!(next.phase(), Phase::Loading);
    }

    #[test]
    fn test_init_keeps_stale_data_and_clears_error() {
        let mut state = settled(vec![story_one()]);
        state.is_error = true;
        let next = reduce(state, StoriesAction::Init);
        assert!(next.is_loading);
        assert!(!next.is_error);
        assert_eq!(next.stories(), &[story_one()]);
    }

    #[test]
    fn test_success_clears_flags_regardless_of_prior_error() {
        let state = StoriesState {
            data: None,
            is_loading: true,
            is_error: true,
        };
        let next = reduce(state, StoriesAction::Success(vec![story_one(), story_two()]));
        assert_eq!(next, settled(vec![story_one(), story_two()]));
    }

    #[test]
    fn test_success_replaces_wholesale() {
        let state = settled(vec![story_one()]);
        let next = reduce(state, StoriesAction::Success(vec![story_two()]));
        assert_eq!(next.stories(), &[story_two()]);
    }

    #[test]
    fn test_failure_preserves_data() {
        let mut state = reduce(settled(vec![story_one()]), StoriesAction::Init);
        let before = state.data.clone().unwrap();
        state = reduce(state, StoriesAction::Failure);
        assert!(!state.is_loading);
        assert!(state.is_error);
        assert!(Arc::ptr_eq(&before, state.data.as_ref().unwrap()));
        assert_eq!(state.phase(), Phase::Failure);
    }

    #[test]
    fn test_failure_from_empty() {
        let next = reduce(StoriesState::default(), StoriesAction::Failure);
        assert_eq!(
            next,
            StoriesState {
                data: None,
                is_loading: false,
                is_error: true,
            }
        );
    }

    #[test]
    fn test_record_remove_by_story_payload() {
        let state = settled(vec![story_one(), story_two()]);
        let record = json!({ "type": "REMOVE_STORY", "payload": story_one() });
        let next = reduce_record(state, &record).unwrap();
        assert_eq!(next, settled(vec![story_two()]));
    }

    #[test]
    fn test_record_remove_by_bare_id() {
        let state = settled(vec![story_one(), story_two()]);
        let record = json!({ "type": "REMOVE_STORY", "payload": 1 });
        let next = reduce_record(state, &record).unwrap();
        assert_eq!(next, settled(vec![story_one()]));
    }

    #[test]
    fn test_record_success_payload() {
        let record = json!({
            "type": "STORIES_FETCH_SUCCESS",
            "payload": [story_one(), story_two()],
        });
        let next = reduce_record(StoriesState::default(), &record).unwrap();
        assert_eq!(next, settled(vec![story_one(), story_two()]));
    }

    #[test]
    fn test_record_init_ignores_payload() {
        let record = json!({ "type": "STORIES_FETCH_INIT", "payload": [story_one()] });
        let next = reduce_record(StoriesState::default(), &record).unwrap();
        assert!(next.is_loading);
        assert!(next.data.is_none());
    }

    #[test]
    fn test_unknown_record_fails_fast() {
        let record = json!({ "type": "STORIES_FETCH_RETRY" });
        let err = reduce_record(StoriesState::default(), &record).unwrap_err();
        assert!(matches!(err, AppError::UnknownAction(ref kind) if kind == "STORIES_FETCH_RETRY"));
    }

    #[test]
    fn test_untyped_record_fails_fast() {
        let err = StoriesAction::from_record(&json!({ "payload": 1 })).unwrap_err();
        assert!(matches!(err, AppError::UnknownAction(_)));
    }

    #[test]
    fn test_kind_matches_record_discriminator() {
        let cases = [
            (StoriesAction::Init, json!(null)),
            (StoriesAction::Success(vec![]), json!([])),
            (StoriesAction::Failure, json!(null)),
            (StoriesAction::Remove(StoryId::from(0)), json!(0)),
        ];
        for (action, payload) in cases {
            let record = json!({ "type": action.kind(), "payload": payload });
            assert_eq!(StoriesAction::from_record(&record).unwrap(), action);
        }
    }
}
