//! Owner of `StoriesState` with request fencing.
//!
//! Every issued request gets a ticket. Only the most recently issued
//! ticket may settle the state; responses for older tickets are dropped.

use crate::error::Result;
use crate::models::{Story, StoryId};
use crate::stories::state::{StoriesAction, StoriesState, reduce};

/// Sequence number of an issued request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestTicket(u64);

impl RequestTicket {
    pub fn sequence(&self) -> u64 {
        self.0
    }
}

/// Outcome of handing a response to [`StoriesStore::settle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settlement {
    Applied,
    /// A newer request was issued after this one
    Stale,
    /// This ticket already settled
    AlreadySettled,
}

#[derive(Debug, Default)]
pub struct StoriesStore {
    state: StoriesState,
    issued: u64,
    pending: Option<u64>,
}

impl StoriesStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &StoriesState {
        &self.state
    }

    /// Apply an action directly.
    pub fn dispatch(&mut self, action: StoriesAction) {
        let state = std::mem::take(&mut self.state);
        self.state = reduce(state, action);
    }

    /// Enter the loading state and hand out a ticket for the new request.
    ///
    /// Must be called before the request is sent.
    pub fn begin_fetch(&mut self) -> RequestTicket {
        self.issued += 1;
        self.pending = Some(self.issued);
        self.dispatch(StoriesAction::Init);
        RequestTicket(self.issued)
    }

    /// Deliver the result of a request.
    pub fn settle(&mut self, ticket: RequestTicket, result: Result<Vec<Story>>) -> Settlement {
        if ticket.0 != self.issued {
            log::debug!(
                "Discarding stale response #{} (latest is #{})",
                ticket.0,
                self.issued
            );
            return Settlement::Stale;
        }
        if self.pending != Some(ticket.0) {
            return Settlement::AlreadySettled;
        }
        self.pending = None;

        match result {
            Ok(stories) => {
                log::info!("Request #{} returned {} stories", ticket.0, stories.len());
                self.dispatch(StoriesAction::Success(stories));
            }
            Err(error) => {
                log::warn!("Request #{} failed: {}", ticket.0, error);
                self.dispatch(StoriesAction::Failure);
            }
        }
        Settlement::Applied
    }

    pub fn remove(&mut self, id: StoryId) {
        self.dispatch(StoriesAction::Remove(id));
    }

    /// Ticket of the request still awaiting a response, if any.
    pub fn pending(&self) -> Option<RequestTicket> {
        self.pending.map(RequestTicket)
    }
}
