//! Client-side story state.
//!
//! - `state`: fetch lifecycle reducer
//! - `store`: reducer owner with request fencing
//! - `list`: filter, removal and sort over a story list
//! - `metrics`: memoized aggregates

pub mod list;
pub mod metrics;
pub mod state;
pub mod store;

pub use list::{SortKey, SortState, filter_by_term, remove_by_id, sort_by};
pub use metrics::{CommentTotal, sum_comments};
pub use state::{Phase, StoriesAction, StoriesState, reduce, reduce_record};
pub use store::{RequestTicket, Settlement, StoriesStore};
