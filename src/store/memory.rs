//! In-memory document store. Backs the unit and flow tests; behaves like
//! the file store minus the disk: snapshots are broadcast to subscribers
//! after every mutation.

use std::sync::Mutex;
use std::sync::mpsc;

use chrono::Utc;
use indexmap::IndexMap;

use crate::model::{NewTool, Tool, ToolPatch};
use crate::ops::order::RankWrite;
use crate::store::{DocumentStore, StoreError, StoreEvent, Subscription};

#[derive(Default)]
struct Inner {
    docs: IndexMap<String, Tool>,
    subscribers: Vec<(String, mpsc::Sender<StoreEvent>)>,
    next_id: u32,
    fail_next_batch: bool,
}

impl Inner {
    fn snapshot_for(&self, owner: &str) -> Vec<Tool> {
        self.docs
            .values()
            .filter(|t| t.owner == owner)
            .cloned()
            .collect()
    }

    /// Send each subscriber its owner's current set; drop dead channels.
    fn broadcast(&mut self) {
        let mut live = Vec::new();
        for (owner, tx) in self.subscribers.drain(..) {
            let snapshot = self
                .docs
                .values()
                .filter(|t| t.owner == owner)
                .cloned()
                .collect();
            if tx.send(StoreEvent::Snapshot(snapshot)).is_ok() {
                live.push((owner, tx));
            }
        }
        self.subscribers = live;
    }
}

#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }

    /// Inject a snapshot for an owner as the backend would deliver it.
    /// Tests use this to replay stale states that a slow write path
    /// would produce.
    pub fn push_snapshot(&self, owner: &str, tools: Vec<Tool>) {
        let mut inner = self.inner.lock().unwrap();
        let mut live = Vec::new();
        for (sub_owner, tx) in inner.subscribers.drain(..) {
            let ok = if sub_owner == owner {
                tx.send(StoreEvent::Snapshot(tools.clone())).is_ok()
            } else {
                true
            };
            if ok {
                live.push((sub_owner, tx));
            }
        }
        inner.subscribers = live;
    }

    /// Deliver a subscription error to every subscriber.
    pub fn push_error(&self, message: &str) {
        let mut inner = self.inner.lock().unwrap();
        let mut live = Vec::new();
        for (owner, tx) in inner.subscribers.drain(..) {
            if tx.send(StoreEvent::Error(message.to_string())).is_ok() {
                live.push((owner, tx));
            }
        }
        inner.subscribers = live;
    }

    /// Make the next `update_ranks` call fail without applying anything.
    pub fn fail_next_batch(&self) {
        self.inner.lock().unwrap().fail_next_batch = true;
    }

    /// Direct read of one owner's documents, bypassing subscriptions.
    pub fn documents(&self, owner: &str) -> Vec<Tool> {
        self.inner.lock().unwrap().snapshot_for(owner)
    }
}

impl DocumentStore for MemoryStore {
    fn subscribe(&self, owner: &str) -> Result<Subscription, StoreError> {
        let (tx, rx) = mpsc::channel();
        let mut inner = self.inner.lock().unwrap();
        // Initial full snapshot, then one per change
        let _ = tx.send(StoreEvent::Snapshot(inner.snapshot_for(owner)));
        inner.subscribers.push((owner.to_string(), tx));
        Ok(Subscription::new(rx))
    }

    fn create(&self, owner: &str, fields: NewTool, order: u32) -> Result<String, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        inner.next_id += 1;
        let id = format!("t-{:03}", inner.next_id);
        let tool = Tool {
            id: id.clone(),
            name: fields.name,
            links: fields.links,
            url: None,
            pr_link: fields.pr_link,
            tags: fields.tags,
            owner: owner.to_string(),
            order: Some(order),
            created_at: Utc::now(),
        };
        inner.docs.insert(id.clone(), tool);
        inner.broadcast();
        Ok(id)
    }

    fn update(&self, id: &str, patch: ToolPatch) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().unwrap();
        let tool = inner
            .docs
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        patch.apply(tool);
        inner.broadcast();
        Ok(())
    }

    fn delete(&self, id: &str) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().unwrap();
        inner
            .docs
            .shift_remove(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        inner.broadcast();
        Ok(())
    }

    fn update_ranks(&self, writes: &[RankWrite]) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().unwrap();
        if inner.fail_next_batch {
            inner.fail_next_batch = false;
            return Err(StoreError::Watch("batch write rejected".into()));
        }
        // All-or-nothing: verify every id first
        for write in writes {
            if !inner.docs.contains_key(&write.id) {
                return Err(StoreError::NotFound(write.id.clone()));
            }
        }
        for write in writes {
            if let Some(tool) = inner.docs.get_mut(&write.id) {
                tool.order = Some(write.order);
            }
        }
        inner.broadcast();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ToolLink;

    fn fields(name: &str) -> NewTool {
        NewTool {
            name: name.into(),
            links: vec![ToolLink::bare("https://example.com")],
            pr_link: None,
            tags: Vec::new(),
        }
    }

    fn last_snapshot(sub: &Subscription) -> Vec<Tool> {
        let mut latest = None;
        for event in sub.poll() {
            if let StoreEvent::Snapshot(tools) = event {
                latest = Some(tools);
            }
        }
        latest.expect("no snapshot queued")
    }

    #[test]
    fn subscribe_delivers_initial_snapshot() {
        let store = MemoryStore::new();
        store.create("ada", fields("Figma"), 1).unwrap();
        let sub = store.subscribe("ada").unwrap();
        let tools = last_snapshot(&sub);
        assert_eq!(tools.len(), 1);
        assert_eq!(tools[0].name, "Figma");
    }

    #[test]
    fn snapshots_are_scoped_to_the_owner() {
        let store = MemoryStore::new();
        store.create("ada", fields("Figma"), 1).unwrap();
        store.create("bob", fields("GDB"), 1).unwrap();

        let sub = store.subscribe("ada").unwrap();
        let tools = last_snapshot(&sub);
        assert_eq!(tools.len(), 1);
        assert!(tools.iter().all(|t| t.owner == "ada"));
    }

    #[test]
    fn mutations_broadcast_new_snapshots() {
        let store = MemoryStore::new();
        let sub = store.subscribe("ada").unwrap();
        assert!(last_snapshot(&sub).is_empty());

        let id = store.create("ada", fields("Figma"), 1).unwrap();
        assert_eq!(last_snapshot(&sub).len(), 1);

        store
            .update(
                &id,
                ToolPatch {
                    name: Some("Figma Design".into()),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(last_snapshot(&sub)[0].name, "Figma Design");

        store.delete(&id).unwrap();
        assert!(last_snapshot(&sub).is_empty());
    }

    #[test]
    fn update_ranks_applies_all_writes() {
        let store = MemoryStore::new();
        let a = store.create("ada", fields("A"), 1).unwrap();
        let b = store.create("ada", fields("B"), 2).unwrap();
        store
            .update_ranks(&[
                RankWrite { id: a.clone(), order: 1 },
                RankWrite { id: b.clone(), order: 0 },
            ])
            .unwrap();
        let docs = store.documents("ada");
        assert_eq!(docs.iter().find(|t| t.id == a).unwrap().order, Some(1));
        assert_eq!(docs.iter().find(|t| t.id == b).unwrap().order, Some(0));
    }

    #[test]
    fn update_ranks_with_unknown_id_changes_nothing() {
        let store = MemoryStore::new();
        let a = store.create("ada", fields("A"), 1).unwrap();
        let err = store.update_ranks(&[
            RankWrite { id: "zzz".into(), order: 0 },
            RankWrite { id: a.clone(), order: 7 },
        ]);
        assert!(err.is_err());
        assert_eq!(
            store.documents("ada")[0].order,
            Some(1),
            "failed batch must not partially apply"
        );
    }

    #[test]
    fn unknown_ids_error() {
        let store = MemoryStore::new();
        assert!(matches!(
            store.update("zzz", ToolPatch::default()),
            Err(StoreError::NotFound(_))
        ));
        assert!(matches!(store.delete("zzz"), Err(StoreError::NotFound(_))));
    }
}
