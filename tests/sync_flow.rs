//! End-to-end reconcile flows over the in-memory store: the session,
//! identity, ordering, and filter layers working together the way the
//! TUI drives them.

use std::sync::Arc;

use pretty_assertions::assert_eq;

use toolshelf::model::{NewTool, ToolLink, ToolPatch};
use toolshelf::ops::filter::{all_tags, visible_tools};
use toolshelf::session::{AuthEvent, ConfigIdentity, IdentityProvider};
use toolshelf::store::memory::MemoryStore;
use toolshelf::store::DocumentStore;
use toolshelf::sync::ShelfSession;

fn fields(name: &str, tags: &[&str]) -> NewTool {
    NewTool {
        name: name.into(),
        links: vec![ToolLink::bare(format!(
            "https://{}.example.com",
            name.to_lowercase()
        ))],
        pr_link: None,
        tags: tags.iter().map(|t| t.to_string()).collect(),
    }
}

fn names(session: &ShelfSession) -> Vec<String> {
    session.tools().iter().map(|t| t.name.clone()).collect()
}

/// Drive the session the way the TUI tick does: identity events first,
/// then store events.
fn tick(session: &mut ShelfSession, identity: &mut ConfigIdentity) {
    for event in identity.poll() {
        match event {
            AuthEvent::SignedIn(user) => session.set_identity(Some(user)),
            AuthEvent::SignedOut => session.set_identity(None),
        }
    }
    session.poll();
}

#[test]
fn full_user_story() {
    let store = Arc::new(MemoryStore::new());
    let mut session = ShelfSession::new(Box::new(store.clone()));
    let mut identity = ConfigIdentity::new("ada");

    // Sign in: empty shelf, not loading once the first snapshot lands
    tick(&mut session, &mut identity);
    assert!(session.tools().is_empty());
    assert!(!session.is_loading());

    // Create three tools through the session, observing each echo so the
    // next creation ranks after it
    session.create(fields("Figma", &["design"])).unwrap();
    session.poll();
    session.create(fields("VSCode", &["dev", "editor"])).unwrap();
    session.poll();
    session.create(fields("Linear", &["planning", "dev"])).unwrap();
    session.poll();
    assert_eq!(names(&session), ["Figma", "VSCode", "Linear"]);

    // The filter projection narrows without touching order
    let visible = visible_tools(session.tools(), "", &["dev".to_string()]);
    let visible_names: Vec<&str> = visible.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(visible_names, ["VSCode", "Linear"]);
    assert_eq!(
        all_tags(session.tools()),
        ["design", "dev", "editor", "planning"]
    );

    // Reorder: Linear to the top, minimal writes, visible immediately
    let linear = session.tools()[2].id.clone();
    let figma = session.tools()[0].id.clone();
    session.reorder(&linear, &figma).unwrap();
    assert_eq!(names(&session), ["Linear", "Figma", "VSCode"]);
    session.poll();
    assert_eq!(names(&session), ["Linear", "Figma", "VSCode"]);

    // Edit and delete flow through patches and settle via snapshots
    let vscode = session.tools()[2].id.clone();
    session
        .update(
            &vscode,
            ToolPatch {
                name: Some("VS Code".into()),
                ..Default::default()
            },
        )
        .unwrap();
    session.delete(&figma).unwrap();
    session.poll();
    assert_eq!(names(&session), ["Linear", "VS Code"]);

    // Ranks stay unique after the dust settles
    let mut orders: Vec<u32> = session.tools().iter().filter_map(|t| t.order).collect();
    orders.sort();
    orders.dedup();
    assert_eq!(orders.len(), 2);
}

#[test]
fn switching_identity_swaps_the_whole_view() {
    let store = Arc::new(MemoryStore::new());
    store.create("ada", fields("Ada's", &[]), 1).unwrap();
    store.create("bob", fields("Bob's", &[]), 1).unwrap();

    let mut session = ShelfSession::new(Box::new(store.clone()));
    session.set_identity(Some("ada".into()));
    session.poll();
    assert_eq!(names(&session), ["Ada's"]);

    session.set_identity(Some("bob".into()));
    assert!(session.is_loading(), "fresh subscription, nothing seen yet");
    session.poll();
    assert_eq!(names(&session), ["Bob's"]);

    session.set_identity(None);
    assert_eq!(names(&session), Vec::<String>::new());
    session.poll();
    assert!(session.tools().is_empty(), "signed out stays empty");
}

#[test]
fn overlay_survives_a_failed_write_until_the_store_speaks() {
    let store = Arc::new(MemoryStore::new());
    let mut session = ShelfSession::new(Box::new(store.clone()));
    session.set_identity(Some("ada".into()));
    let a = store.create("ada", fields("A", &[]), 1).unwrap();
    let b = store.create("ada", fields("B", &[]), 2).unwrap();
    session.poll();

    store.fail_next_batch();
    assert!(session.reorder(&b, &a).is_err());
    assert_eq!(names(&session), ["B", "A"], "optimistic overlay stays up");

    // The store's next word corrects the display without a rollback path
    store.push_snapshot("ada", store.documents("ada"));
    session.poll();
    assert_eq!(names(&session), ["A", "B"]);
}

#[test]
fn concurrent_writer_wins_the_display() {
    let store = Arc::new(MemoryStore::new());
    let mut session = ShelfSession::new(Box::new(store.clone()));
    session.set_identity(Some("ada".into()));
    let a = store.create("ada", fields("A", &[]), 1).unwrap();
    let b = store.create("ada", fields("B", &[]), 2).unwrap();
    let c = store.create("ada", fields("C", &[]), 3).unwrap();
    session.poll();

    // Our reorder and someone else's land back to back; the session
    // displays whatever the store said last.
    session.reorder(&c, &a).unwrap();
    store
        .update_ranks(&[
            toolshelf::ops::order::RankWrite { id: a.clone(), order: 10 },
            toolshelf::ops::order::RankWrite { id: b.clone(), order: 11 },
            toolshelf::ops::order::RankWrite { id: c.clone(), order: 12 },
        ])
        .unwrap();
    session.poll();
    assert_eq!(names(&session), ["A", "B", "C"]);
}
