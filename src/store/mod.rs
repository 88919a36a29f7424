//! The document-store seam. The shelf core only ever talks to a
//! [`DocumentStore`]; the backend is either the on-disk [`file::FileStore`]
//! or the in-memory [`memory::MemoryStore`] used by tests.

pub mod file;
pub mod memory;

use std::any::Any;
use std::path::PathBuf;
use std::sync::mpsc;

use crate::model::{NewTool, Tool, ToolPatch};
use crate::ops::order::RankWrite;

/// Error type for store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("not signed in")]
    SignedOut,
    #[error("document not found: {0}")]
    NotFound(String),
    #[error("store io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed document {path}: {message}")]
    Malformed { path: PathBuf, message: String },
    #[error("could not watch the shelf: {0}")]
    Watch(String),
    #[error("could not lock the shelf: {0}")]
    Lock(String),
}

/// Events delivered through a live subscription
#[derive(Debug, Clone)]
pub enum StoreEvent {
    /// The full current set of the subscribed owner's tools, unsorted.
    /// Every event replaces the previous set wholesale; there are no
    /// incremental diffs to buffer or replay.
    Snapshot(Vec<Tool>),
    /// The subscription itself failed. The last delivered set stays
    /// valid as a display state; recovery is a later event or a
    /// re-subscribe, never an automatic retry from here.
    Error(String),
}

/// Handle for a live query over one owner's tools. Dropping the handle
/// cancels the subscription.
pub struct Subscription {
    rx: mpsc::Receiver<StoreEvent>,
    /// Keeps the backend's watch machinery alive for as long as the
    /// subscription is held.
    _guard: Option<Box<dyn Any + Send>>,
}

impl Subscription {
    pub(crate) fn new(rx: mpsc::Receiver<StoreEvent>) -> Self {
        Subscription { rx, _guard: None }
    }

    pub(crate) fn with_guard(rx: mpsc::Receiver<StoreEvent>, guard: Box<dyn Any + Send>) -> Self {
        Subscription {
            rx,
            _guard: Some(guard),
        }
    }

    /// Non-blocking poll for pending events.
    /// Returns all queued events (may be empty).
    pub fn poll(&self) -> Vec<StoreEvent> {
        let mut events = Vec::new();
        while let Ok(event) = self.rx.try_recv() {
            events.push(event);
        }
        events
    }
}

/// Storage backend holding tool documents, scoped by owner.
pub trait DocumentStore {
    /// Open a live query over one owner's tools. The current set is
    /// delivered immediately, then again after every change.
    fn subscribe(&self, owner: &str) -> Result<Subscription, StoreError>;

    /// Create a document with the given rank; the store assigns the id
    /// and the creation timestamp. Returns the new id.
    fn create(&self, owner: &str, fields: NewTool, order: u32) -> Result<String, StoreError>;

    /// Patch a document's mutable fields.
    fn update(&self, id: &str, patch: ToolPatch) -> Result<(), StoreError>;

    /// Remove a document.
    fn delete(&self, id: &str) -> Result<(), StoreError>;

    /// Apply a reorder's rank writes as one atomic batch: either every
    /// write lands or none do.
    fn update_ranks(&self, writes: &[RankWrite]) -> Result<(), StoreError>;
}

/// A shared store handle is a store: lets a session own one handle while
/// tests or other components keep another.
impl<T: DocumentStore + ?Sized> DocumentStore for std::sync::Arc<T> {
    fn subscribe(&self, owner: &str) -> Result<Subscription, StoreError> {
        (**self).subscribe(owner)
    }
    fn create(&self, owner: &str, fields: NewTool, order: u32) -> Result<String, StoreError> {
        (**self).create(owner, fields, order)
    }
    fn update(&self, id: &str, patch: ToolPatch) -> Result<(), StoreError> {
        (**self).update(id, patch)
    }
    fn delete(&self, id: &str) -> Result<(), StoreError> {
        (**self).delete(id)
    }
    fn update_ranks(&self, writes: &[RankWrite]) -> Result<(), StoreError> {
        (**self).update_ranks(writes)
    }
}
