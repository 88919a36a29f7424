//! Reconciliation between locally held state and the store's realtime
//! snapshots.
//!
//! Two layers: a *confirmed* layer holding the last snapshot (sorted into
//! display order), and an optional *optimistic overlay* holding a reorder
//! the user just made but the store has not echoed back yet. The merge
//! rule is [`effective`]: the overlay wins until the next snapshot
//! arrives, then it is discarded unconditionally; even a stale snapshot
//! supersedes it. The store, not local memory, is the source of truth.

use crate::model::{NewTool, Tool, ToolPatch};
use crate::ops::order::{assign_ranks, compute_move, diff_ranks};
use crate::ops::sort::sort_tools;
use crate::ops::tool_ops::next_rank;
use crate::store::{DocumentStore, StoreError, StoreEvent, Subscription};

/// The layer merge rule, kept as its own function so it can be pinned by
/// tests: overlay if present, else confirmed.
pub fn effective<'a>(confirmed: &'a [Tool], overlay: Option<&'a [Tool]>) -> &'a [Tool] {
    overlay.unwrap_or(confirmed)
}

/// One user's live, ordered view of their shelf.
pub struct ShelfSession {
    store: Box<dyn DocumentStore>,
    owner: Option<String>,
    subscription: Option<Subscription>,
    /// Last snapshot, sorted into display order
    confirmed: Vec<Tool>,
    /// Pending optimistic reorder, discarded on the next snapshot
    overlay: Option<Vec<Tool>>,
    /// Whether any snapshot has arrived since the last (re)subscribe
    loaded: bool,
    last_error: Option<String>,
}

impl ShelfSession {
    pub fn new(store: Box<dyn DocumentStore>) -> Self {
        ShelfSession {
            store,
            owner: None,
            subscription: None,
            confirmed: Vec::new(),
            overlay: None,
            loaded: false,
            last_error: None,
        }
    }

    /// Tear down the current subscription and re-derive it from the new
    /// identity. Signing out (`None`) clears the observed set to empty.
    pub fn set_identity(&mut self, user: Option<String>) {
        self.subscription = None; // drop cancels the watch
        self.confirmed.clear();
        self.overlay = None;
        self.loaded = false;
        self.owner = user;

        if let Some(owner) = self.owner.clone() {
            match self.store.subscribe(&owner) {
                Ok(sub) => self.subscription = Some(sub),
                Err(e) => self.last_error = Some(e.to_string()),
            }
        }
    }

    /// Drain pending store events. Returns true if the visible state
    /// changed. Each snapshot wholesale-replaces the confirmed layer and
    /// drops any optimistic overlay; errors keep the last-known state.
    pub fn poll(&mut self) -> bool {
        let Some(subscription) = &self.subscription else {
            return false;
        };
        let mut changed = false;
        for event in subscription.poll() {
            match event {
                StoreEvent::Snapshot(mut tools) => {
                    sort_tools(&mut tools);
                    self.confirmed = tools;
                    self.overlay = None;
                    self.loaded = true;
                    changed = true;
                }
                StoreEvent::Error(message) => {
                    self.last_error = Some(message);
                    changed = true;
                }
            }
        }
        changed
    }

    /// The ordered list presentation should show right now.
    pub fn tools(&self) -> &[Tool] {
        effective(&self.confirmed, self.overlay.as_deref())
    }

    pub fn owner(&self) -> Option<&str> {
        self.owner.as_deref()
    }

    /// True while signed in but before the first snapshot lands.
    pub fn is_loading(&self) -> bool {
        self.owner.is_some() && !self.loaded
    }

    pub fn take_error(&mut self) -> Option<String> {
        self.last_error.take()
    }

    /// Create a tool ranked after everything currently visible.
    pub fn create(&mut self, fields: NewTool) -> Result<String, StoreError> {
        let owner = self.owner.clone().ok_or(StoreError::SignedOut)?;
        let order = next_rank(self.tools());
        self.store.create(&owner, fields, order)
    }

    pub fn update(&self, id: &str, patch: ToolPatch) -> Result<(), StoreError> {
        self.store.update(id, patch)
    }

    pub fn delete(&self, id: &str) -> Result<(), StoreError> {
        self.store.delete(id)
    }

    /// Move `from_id` onto `to_id`'s position, show the result
    /// immediately, and persist only the ranks that changed as one batch.
    /// A failed batch leaves the overlay up; the next snapshot settles
    /// what actually happened.
    pub fn reorder(&mut self, from_id: &str, to_id: &str) -> Result<(), StoreError> {
        let current = self.tools().to_vec();
        if current.len() < 2 {
            return Ok(());
        }
        let moved = compute_move(current.clone(), from_id, to_id);
        let same_order = moved.iter().zip(&current).all(|(a, b)| a.id == b.id);
        if same_order {
            return Ok(());
        }
        let ranked = assign_ranks(moved);
        let writes = diff_ranks(&current, &ranked);
        self.overlay = Some(ranked);
        self.store.update_ranks(&writes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ToolLink;
    use crate::store::memory::MemoryStore;
    use chrono::{TimeZone, Utc};
    use std::sync::Arc;

    /// MemoryStore behind an Arc so the test keeps a handle for injecting
    /// snapshots while the session owns its own.
    fn session_with_store() -> (ShelfSession, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        let session = ShelfSession::new(Box::new(store.clone()));
        (session, store)
    }

    fn fields(name: &str) -> NewTool {
        NewTool {
            name: name.into(),
            links: vec![ToolLink::bare("https://example.com")],
            pr_link: None,
            tags: Vec::new(),
        }
    }

    fn names(session: &ShelfSession) -> Vec<&str> {
        session.tools().iter().map(|t| t.name.as_str()).collect()
    }

    #[test]
    fn snapshots_arrive_sorted() {
        let (mut session, store) = session_with_store();
        session.set_identity(Some("ada".into()));
        store.create("ada", fields("A"), 1).unwrap();
        store.create("ada", fields("B"), 2).unwrap();
        store
            .update_ranks(&[crate::ops::order::RankWrite { id: "t-002".into(), order: 0 }])
            .unwrap();
        assert!(session.poll());
        assert_eq!(names(&session), ["B", "A"]);
    }

    #[test]
    fn sign_out_clears_the_set() {
        let (mut session, store) = session_with_store();
        session.set_identity(Some("ada".into()));
        store.create("ada", fields("A"), 1).unwrap();
        session.poll();
        assert_eq!(session.tools().len(), 1);

        session.set_identity(None);
        assert!(session.tools().is_empty());
        assert!(!session.is_loading(), "signed out is not loading");
    }

    #[test]
    fn identity_change_resubscribes_to_the_new_owner() {
        let (mut session, store) = session_with_store();
        store.create("ada", fields("Ada's"), 1).unwrap();
        store.create("bob", fields("Bob's"), 1).unwrap();

        session.set_identity(Some("ada".into()));
        session.poll();
        assert_eq!(names(&session), ["Ada's"]);

        session.set_identity(Some("bob".into()));
        session.poll();
        assert_eq!(names(&session), ["Bob's"]);
    }

    #[test]
    fn reorder_shows_immediately_and_persists_a_minimal_batch() {
        let (mut session, store) = session_with_store();
        session.set_identity(Some("ada".into()));
        let a = store.create("ada", fields("A"), 1).unwrap();
        store.create("ada", fields("B"), 2).unwrap();
        let c = store.create("ada", fields("C"), 3).unwrap();
        session.poll();

        session.reorder(&c, &a).unwrap();
        // Optimistic: visible before any poll
        assert_eq!(names(&session), ["C", "A", "B"]);

        // The store's echo confirms the same order
        assert!(session.poll());
        assert_eq!(names(&session), ["C", "A", "B"]);
        let docs = store.documents("ada");
        let order_of = |id: &str| docs.iter().find(|t| t.id == id).unwrap().order;
        assert_eq!(order_of(&c), Some(0));
        assert_eq!(order_of(&a), Some(1));
    }

    #[test]
    fn reorder_with_fewer_than_two_tools_is_a_no_op() {
        let (mut session, store) = session_with_store();
        session.set_identity(Some("ada".into()));
        session.reorder("x", "y").unwrap();

        let id = store.create("ada", fields("A"), 1).unwrap();
        session.poll();
        session.reorder(&id, &id).unwrap();
        assert_eq!(store.documents("ada")[0].order, Some(1), "no writes issued");
    }

    #[test]
    fn stale_snapshot_supersedes_the_overlay() {
        let (mut session, store) = session_with_store();
        session.set_identity(Some("ada".into()));
        let a = store.create("ada", fields("A"), 1).unwrap();
        let b = store.create("ada", fields("B"), 2).unwrap();
        session.poll();
        let before = session.tools().to_vec();

        session.reorder(&b, &a).unwrap();
        assert_eq!(names(&session), ["B", "A"]);

        // A snapshot from before the write acknowledges: last snapshot
        // received wins, overlay discarded unconditionally.
        store.push_snapshot("ada", before);
        session.poll();
        assert_eq!(names(&session), ["A", "B"]);
    }

    #[test]
    fn failed_batch_keeps_overlay_until_next_snapshot() {
        let (mut session, store) = session_with_store();
        session.set_identity(Some("ada".into()));
        let a = store.create("ada", fields("A"), 1).unwrap();
        let b = store.create("ada", fields("B"), 2).unwrap();
        session.poll();

        store.fail_next_batch();
        assert!(session.reorder(&b, &a).is_err());
        // Optimistic state stays up; nothing was persisted
        assert_eq!(names(&session), ["B", "A"]);
        assert_eq!(store.documents("ada").iter().find(|t| t.id == b).unwrap().order, Some(2));

        // The next snapshot self-corrects the display
        store.push_snapshot("ada", store.documents("ada"));
        session.poll();
        assert_eq!(names(&session), ["A", "B"]);
    }

    #[test]
    fn subscription_error_keeps_last_known_state() {
        let (mut session, store) = session_with_store();
        session.set_identity(Some("ada".into()));
        store.create("ada", fields("A"), 1).unwrap();
        session.poll();

        store.push_error("stream torn down");
        session.poll();
        assert_eq!(names(&session), ["A"], "state survives the error");
        assert_eq!(session.take_error().as_deref(), Some("stream torn down"));
        assert_eq!(session.take_error(), None);
    }

    #[test]
    fn delete_racing_a_stale_reorder_settles_consistently() {
        let (mut session, store) = session_with_store();
        session.set_identity(Some("ada".into()));
        let a = store.create("ada", fields("A"), 1).unwrap();
        let b = store.create("ada", fields("B"), 2).unwrap();
        let c = store.create("ada", fields("C"), 3).unwrap();
        session.poll();

        // Reorder referencing c, then delete c before the echo arrives
        session.reorder(&c, &a).unwrap();
        store.delete(&c).unwrap();
        session.poll();

        // Overlay gone; remaining ranks are unique and the set is intact
        let tools = session.tools();
        assert_eq!(tools.len(), 2);
        let mut orders: Vec<u32> = tools.iter().filter_map(|t| t.order).collect();
        orders.sort();
        orders.dedup();
        assert_eq!(orders.len(), 2, "no duplicate ranks after reconciliation");
        assert!(tools.iter().any(|t| t.id == a));
        assert!(tools.iter().any(|t| t.id == b));
    }

    #[test]
    fn create_ranks_after_the_current_maximum() {
        let (mut session, store) = session_with_store();
        session.set_identity(Some("ada".into()));
        store.create("ada", fields("A"), 4).unwrap();
        session.poll();

        session.create(fields("B")).unwrap();
        session.poll();
        let docs = store.documents("ada");
        assert_eq!(docs.iter().find(|t| t.name == "B").unwrap().order, Some(5));
    }

    #[test]
    fn effective_prefers_the_overlay() {
        let confirmed: Vec<Tool> = Vec::new();
        let overlay = vec![Tool {
            id: "t-001".into(),
            name: "X".into(),
            links: vec![ToolLink::bare("https://x.com")],
            url: None,
            pr_link: None,
            tags: Vec::new(),
            owner: "ada".into(),
            order: Some(0),
            created_at: Utc.timestamp_opt(0, 0).unwrap(),
        }];
        assert_eq!(effective(&confirmed, Some(&overlay)).len(), 1);
        assert!(effective(&confirmed, None).is_empty());
    }
}
