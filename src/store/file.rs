//! File-backed document store: one pretty-printed JSON document per tool
//! under `<shelf>/tools/`. Writes go through the advisory shelf lock and
//! an atomic temp-file rename, so concurrent readers (including the
//! filesystem watcher behind subscriptions) never observe a torn
//! document.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::mpsc;

use chrono::Utc;
use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};

use crate::io::lock::ShelfLock;
use crate::model::{NewTool, Tool, ToolPatch};
use crate::ops::order::RankWrite;
use crate::store::{DocumentStore, StoreError, StoreEvent, Subscription};

pub struct FileStore {
    shelf_dir: PathBuf,
}

impl FileStore {
    /// Open the store rooted at an existing shelf directory, creating the
    /// `tools/` subdirectory on first use.
    pub fn open(shelf_dir: &Path) -> Result<Self, StoreError> {
        let store = FileStore {
            shelf_dir: shelf_dir.to_path_buf(),
        };
        fs::create_dir_all(store.tools_dir())?;
        Ok(store)
    }

    pub fn shelf_dir(&self) -> &Path {
        &self.shelf_dir
    }

    fn tools_dir(&self) -> PathBuf {
        self.shelf_dir.join("tools")
    }

    fn doc_path(&self, id: &str) -> PathBuf {
        self.tools_dir().join(format!("{id}.json"))
    }

    /// One-shot read of one owner's documents, unsorted. CLI commands use
    /// this directly; subscriptions use it to build each snapshot.
    pub fn load(&self, owner: &str) -> Result<Vec<Tool>, StoreError> {
        load_tools(&self.tools_dir(), owner)
    }

    fn read_doc(&self, id: &str) -> Result<Tool, StoreError> {
        let path = self.doc_path(id);
        if !path.exists() {
            return Err(StoreError::NotFound(id.to_string()));
        }
        read_doc_file(&path)
    }

    fn write_doc(&self, tool: &Tool) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(tool).map_err(|e| StoreError::Malformed {
            path: self.doc_path(&tool.id),
            message: e.to_string(),
        })?;
        let mut tmp = tempfile::NamedTempFile::new_in(self.tools_dir())?;
        tmp.write_all(json.as_bytes())?;
        tmp.persist(self.doc_path(&tool.id))
            .map_err(|e| StoreError::Io(e.error))?;
        Ok(())
    }

    /// Next document id: `t-NNN`, one past the highest existing number.
    fn next_doc_id(&self) -> Result<String, StoreError> {
        let mut max = 0u32;
        for entry in fs::read_dir(self.tools_dir())? {
            let entry = entry?;
            let name = entry.file_name();
            let Some(name) = name.to_str() else { continue };
            if let Some(num) = name
                .strip_prefix("t-")
                .and_then(|rest| rest.strip_suffix(".json"))
                .and_then(|digits| digits.parse::<u32>().ok())
            {
                max = max.max(num);
            }
        }
        Ok(format!("t-{:03}", max + 1))
    }

    fn lock(&self) -> Result<ShelfLock, StoreError> {
        ShelfLock::acquire_default(&self.shelf_dir).map_err(|e| StoreError::Lock(e.to_string()))
    }
}

fn read_doc_file(path: &Path) -> Result<Tool, StoreError> {
    let content = fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|e| StoreError::Malformed {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Read every `*.json` document under `tools_dir` belonging to `owner`,
/// in filename order.
fn load_tools(tools_dir: &Path, owner: &str) -> Result<Vec<Tool>, StoreError> {
    let mut paths: Vec<PathBuf> = fs::read_dir(tools_dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.extension().and_then(|e| e.to_str()) == Some("json"))
        .collect();
    paths.sort();

    let mut tools = Vec::new();
    for path in paths {
        let tool = read_doc_file(&path)?;
        if tool.owner == owner {
            tools.push(tool);
        }
    }
    Ok(tools)
}

impl DocumentStore for FileStore {
    fn subscribe(&self, owner: &str) -> Result<Subscription, StoreError> {
        let (tx, rx) = mpsc::channel();
        let tools_dir = self.tools_dir();
        let owner_owned = owner.to_string();

        // Current state first, so a fresh subscriber renders immediately.
        tx.send(StoreEvent::Snapshot(self.load(owner)?))
            .map_err(|_| StoreError::Watch("subscriber hung up".into()))?;

        let watch_dir = tools_dir.clone();
        let mut watcher = RecommendedWatcher::new(
            move |result: Result<Event, notify::Error>| {
                let event = match result {
                    Ok(e) => e,
                    Err(e) => {
                        let _ = tx.send(StoreEvent::Error(e.to_string()));
                        return;
                    }
                };

                // Only creates, modifications, and removals of .json docs
                match event.kind {
                    EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_) => {}
                    _ => return,
                }
                let relevant = event.paths.iter().any(|p| {
                    p.extension().and_then(|e| e.to_str()) == Some("json")
                });
                if !relevant {
                    return;
                }

                // Full replacement set on every change; no diffing.
                match load_tools(&tools_dir, &owner_owned) {
                    Ok(tools) => {
                        let _ = tx.send(StoreEvent::Snapshot(tools));
                    }
                    Err(e) => {
                        let _ = tx.send(StoreEvent::Error(e.to_string()));
                    }
                }
            },
            Config::default(),
        )
        .map_err(|e| StoreError::Watch(e.to_string()))?;

        watcher
            .watch(&watch_dir, RecursiveMode::NonRecursive)
            .map_err(|e| StoreError::Watch(e.to_string()))?;

        Ok(Subscription::with_guard(rx, Box::new(watcher)))
    }

    fn create(&self, owner: &str, fields: NewTool, order: u32) -> Result<String, StoreError> {
        let _lock = self.lock()?;
        let id = self.next_doc_id()?;
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
        self.write_doc(&tool)?;
        Ok(id)
    }

    fn update(&self, id: &str, patch: ToolPatch) -> Result<(), StoreError> {
        let _lock = self.lock()?;
        let mut tool = self.read_doc(id)?;
        patch.apply(&mut tool);
        self.write_doc(&tool)
    }

    fn delete(&self, id: &str) -> Result<(), StoreError> {
        let _lock = self.lock()?;
        let path = self.doc_path(id);
        if !path.exists() {
            return Err(StoreError::NotFound(id.to_string()));
        }
        fs::remove_file(&path)?;
        Ok(())
    }

    fn update_ranks(&self, writes: &[RankWrite]) -> Result<(), StoreError> {
        let _lock = self.lock()?;

        // Stage every write first; only rename once all of them parsed
        // and serialized. A failure before the rename loop leaves the
        // shelf exactly as it was.
        let mut staged = Vec::with_capacity(writes.len());
        for write in writes {
            let mut tool = self.read_doc(&write.id)?;
            tool.order = Some(write.order);
            let json = serde_json::to_string_pretty(&tool).map_err(|e| StoreError::Malformed {
                path: self.doc_path(&tool.id),
                message: e.to_string(),
            })?;
            let mut tmp = tempfile::NamedTempFile::new_in(self.tools_dir())?;
            tmp.write_all(json.as_bytes())?;
            staged.push((tmp, self.doc_path(&tool.id)));
        }
        for (tmp, path) in staged {
            tmp.persist(path).map_err(|e| StoreError::Io(e.error))?;
        }
        Ok(())
    }
}
