// src/session.rs

//! Single-threaded event loop tying the search controller to the story
//! state.
//!
//! All state changes happen in [`Session::handle`], one event at a time.
//! Network requests run as spawned tasks whose only effect is to post an
//! [`Event::FetchSettled`] back into the session's queue.

use std::sync::Arc;

use serde_json::Value;
use tokio::sync::mpsc;
use url::Url;

use crate::error::Result;
use crate::models::{Story, StoryId};
use crate::services::{SearchController, StorySource};
use crate::stories::{
    CommentTotal, Phase, RequestTicket, Settlement, SortKey, SortState, StoriesAction,
    StoriesState, StoriesStore,
};

/// Discrete input to the session.
#[derive(Debug)]
pub enum Event {
    /// The draft text changed
    Input(String),
    /// The user asked to search for the draft
    Submit,
    /// A column header was selected
    Sort(SortKey),
    /// A story was dismissed
    Remove(StoryId),
    /// A request finished
    FetchSettled {
        ticket: RequestTicket,
        result: Result<Vec<Story>>,
    },
}

/// Snapshot of everything needed to render the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoriesView {
    pub draft: String,
    pub committed_term: String,
    pub can_submit: bool,
    pub phase: Phase,
    pub is_loading: bool,
    pub is_error: bool,
    pub sort: SortState,
    /// Stories in display order
    pub stories: Vec<Story>,
    pub comment_total: u64,
}

pub struct Session {
    source: Arc<dyn StorySource>,
    controller: SearchController,
    store: StoriesStore,
    sort: SortState,
    comments: CommentTotal,
    tx: mpsc::UnboundedSender<Event>,
    rx: mpsc::UnboundedReceiver<Event>,
}

impl Session {
    pub fn new(source: Arc<dyn StorySource>, controller: SearchController) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            source,
            controller,
            store: StoriesStore::new(),
            sort: SortState::default(),
            comments: CommentTotal::new(),
            tx,
            rx,
        }
    }

    /// Issue the initial search for the committed term.
    pub fn start(&mut self) -> RequestTicket {
        let url = self.controller.committed().clone();
        self.fetch(url)
    }

    /// Apply one event.
    pub async fn handle(&mut self, event: Event) {
        match event {
            Event::Input(text) => self.controller.input(text).await,
            Event::Submit => {
                if let Some(url) = self.controller.submit() {
                    self.fetch(url);
                }
            }
            Event::Sort(key) => self.sort = self.sort.select(key),
            Event::Remove(id) => self.store.remove(id),
            Event::FetchSettled { ticket, result } => {
                if self.store.settle(ticket, result) == Settlement::Stale {
                    log::info!("Ignored response for superseded search #{}", ticket.sequence());
                }
            }
        }
    }

    /// Apply a tagged action record directly to the story state.
    ///
    /// Unknown discriminators are returned as errors and nothing changes.
    pub fn dispatch_record(&mut self, record: &Value) -> Result<()> {
        let action = StoriesAction::from_record(record)?;
        self.store.dispatch(action);
        Ok(())
    }

    /// Wait for the next queued event and apply it.
    pub async fn step(&mut self) {
        if let Some(event) = self.rx.recv().await {
            self.handle(event).await;
        }
    }

    /// Apply queued events until the latest request has settled.
    pub async fn settle(&mut self) {
        while self.store.pending().is_some() {
            self.step().await;
        }
    }

    pub fn state(&self) -> &StoriesState {
        self.store.state()
    }

    pub fn controller(&self) -> &SearchController {
        &self.controller
    }

    pub fn sort(&self) -> SortState {
        self.sort
    }

    /// Replace the column and direction outright.
    pub fn set_sort(&mut self, sort: SortState) {
        self.sort = sort;
    }

    /// Current comment total; recomputed only when the list changed.
    pub fn comment_total(&mut self) -> u64 {
        self.comments.get(self.store.state().data.as_ref())
    }

    /// How often the comment total has been recomputed.
    pub fn comment_computations(&self) -> usize {
        self.comments.computations()
    }

    pub fn view(&mut self) -> StoriesView {
        let comment_total = self.comment_total();
        let state = self.store.state();
        StoriesView {
            draft: self.controller.draft().to_string(),
            committed_term: self.controller.committed_term(),
            can_submit: self.controller.can_submit(),
            phase: state.phase(),
            is_loading: state.is_loading,
            is_error: state.is_error,
            sort: self.sort,
            stories: self.sort.apply(state.stories()).into_iter().cloned().collect(),
            comment_total,
        }
    }

    /// Enter loading, then send the request in the background.
    fn fetch(&mut self, url: Url) -> RequestTicket {
        let ticket = self.store.begin_fetch();
        log::info!("Search #{}: {}", ticket.sequence(), url);

        let source = Arc::clone(&self.source);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = source.search(&url).await;
            // The session may already be gone; nothing left to update then.
            let _ = tx.send(Event::FetchSettled { ticket, result });
        });
        ticket
    }
}
