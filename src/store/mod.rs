mod slot;

pub use slot::{FileSlotStore, MemorySlotStore, SlotStore};

use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};

use crate::entities::{Route, RouteHistoryEntry};
use crate::error::Error;

pub const HISTORY_KEY: &str = "routeHistory";
pub const SAVED_KEY: &str = "savedRoutes";
pub const HISTORY_LIMIT: usize = 20;

/// Session registry plus the persisted history and saved collections.
///
/// History and saved routes are rehydrated from their slots on `open` and
/// written back whole after every change. Mutations always apply in memory;
/// an `Err` only reports that the write-through failed.
pub struct RouteStore {
    slots: Arc<dyn SlotStore>,
    routes: Vec<Route>,
    history: Vec<RouteHistoryEntry>,
    saved: Vec<Route>,
}

impl RouteStore {
    #[tracing::instrument(name = "RouteStore::open", skip_all)]
    pub fn open(slots: Arc<dyn SlotStore>) -> Self {
        let history = load(slots.as_ref(), HISTORY_KEY);
        let saved = load(slots.as_ref(), SAVED_KEY);

        tracing::info!(
            "loaded {} history entries and {} saved routes",
            history.len(),
            saved.len()
        );

        Self {
            slots,
            routes: Vec::new(),
            history,
            saved,
        }
    }

    pub fn session_routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn history(&self) -> &[RouteHistoryEntry] {
        &self.history
    }

    pub fn saved(&self) -> &[Route] {
        &self.saved
    }

    pub fn add_route(&mut self, route: Route) {
        self.routes.push(route);
    }

    pub fn add_to_history(&mut self, route: Route) -> Result<(), Error> {
        self.history.insert(0, RouteHistoryEntry::new(route));
        self.history.truncate(HISTORY_LIMIT);

        persist(self.slots.as_ref(), HISTORY_KEY, &self.history)
    }

    pub fn clear_history(&mut self) -> Result<(), Error> {
        self.history.clear();

        persist(self.slots.as_ref(), HISTORY_KEY, &self.history)
    }

    /// No-op when a route with the same id is already saved.
    pub fn save_route(&mut self, route: Route) -> Result<(), Error> {
        if self.is_saved(&route.id) {
            return Ok(());
        }

        self.saved.push(route);

        persist(self.slots.as_ref(), SAVED_KEY, &self.saved)
    }

    /// No-op when nothing is saved under `id`.
    pub fn remove_from_saved(&mut self, id: &str) -> Result<(), Error> {
        let before = self.saved.len();
        self.saved.retain(|route| route.id != id);

        if self.saved.len() == before {
            return Ok(());
        }

        persist(self.slots.as_ref(), SAVED_KEY, &self.saved)
    }

    pub fn is_saved(&self, id: &str) -> bool {
        self.saved.iter().any(|route| route.id == id)
    }

    /// Session routes are searched before saved ones.
    pub fn get_route_by_id(&self, id: &str) -> Option<&Route> {
        self.routes
            .iter()
            .chain(self.saved.iter())
            .find(|route| route.id == id)
    }
}

fn load<T: DeserializeOwned>(slots: &dyn SlotStore, key: &str) -> Vec<T> {
    let contents = match slots.read(key) {
        Ok(Some(contents)) => contents,
        Ok(None) => return Vec::new(),
        Err(err) => {
            tracing::warn!("could not read slot {}: {}", key, err);
            return Vec::new();
        }
    };

    match serde_json::from_str(&contents) {
        Ok(items) => items,
        Err(err) => {
            tracing::warn!("discarding unparsable slot {}: {}", key, err);
            Vec::new()
        }
    }
}

fn persist<T: Serialize>(slots: &dyn SlotStore, key: &str, items: &[T]) -> Result<(), Error> {
    let contents = serde_json::to_string(items)?;

    slots.write(key, &contents)?;
    tracing::debug!("wrote {} items to slot {}", items.len(), key);

    Ok(())
}

#[cfg(test)]
fn memory_store() -> (Arc<dyn SlotStore>, RouteStore) {
    let slots: Arc<dyn SlotStore> = Arc::new(MemorySlotStore::new());
    let store = RouteStore::open(slots.clone());

    (slots, store)
}

#[cfg(test)]
fn route(id: &str) -> Route {
    crate::entities::route::sample_route(id, crate::entities::TransportMode::Train, 9.5)
}

#[test]
fn save_route_is_idempotent() {
    let (_, mut store) = memory_store();

    store.save_route(route("a")).unwrap();
    store.save_route(route("a")).unwrap();
    store.save_route(route("b")).unwrap();

    let ids: Vec<_> = store.saved().iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b"]);
}

#[test]
fn history_keeps_twenty_most_recent_first() {
    let (_, mut store) = memory_store();

    for i in 0..25 {
        store.add_to_history(route(&i.to_string())).unwrap();
    }

    let ids: Vec<_> = store
        .history()
        .iter()
        .map(|entry| entry.route.id.clone())
        .collect();
    let expected: Vec<_> = (5..25).rev().map(|i: i32| i.to_string()).collect();

    assert_eq!(ids, expected);
}

#[test]
fn history_allows_repeated_routes() {
    let (_, mut store) = memory_store();

    store.add_to_history(route("a")).unwrap();
    store.add_to_history(route("a")).unwrap();

    assert_eq!(store.history().len(), 2);
}

#[test]
fn remove_missing_saved_route_is_noop() {
    let (slots, mut store) = memory_store();
    store.save_route(route("a")).unwrap();
    let written = slots.read(SAVED_KEY).unwrap();

    store.remove_from_saved("missing").unwrap();

    assert_eq!(store.saved().len(), 1);
    assert_eq!(slots.read(SAVED_KEY).unwrap(), written);

    store.remove_from_saved("a").unwrap();
    assert!(store.saved().is_empty());
    assert_eq!(slots.read(SAVED_KEY).unwrap().as_deref(), Some("[]"));
}

#[test]
fn lookup_checks_session_then_saved() {
    let (_, mut store) = memory_store();

    let mut session = route("shared");
    session.start_name = "Session".into();
    let mut saved = route("shared");
    saved.start_name = "Saved".into();

    store.save_route(saved).unwrap();
    store.save_route(route("only-saved")).unwrap();
    store.add_route(session);
    store.add_route(route("only-session"));

    assert_eq!(store.get_route_by_id("shared").unwrap().start_name, "Session");
    assert!(store.get_route_by_id("only-saved").is_some());
    assert!(store.get_route_by_id("only-session").is_some());
    assert!(store.get_route_by_id("missing").is_none());
}

#[test]
fn add_route_does_not_dedup() {
    let (_, mut store) = memory_store();

    store.add_route(route("a"));
    store.add_route(route("a"));

    assert_eq!(store.session_routes().len(), 2);
}

#[test]
fn collections_survive_reopen() {
    let (slots, mut store) = memory_store();

    store.add_route(route("session-only"));
    store.add_to_history(route("h1")).unwrap();
    store.add_to_history(route("h2")).unwrap();
    store.save_route(route("s1")).unwrap();

    let reopened = RouteStore::open(slots);

    assert_eq!(reopened.history(), store.history());
    assert_eq!(reopened.saved(), store.saved());
    assert!(reopened.session_routes().is_empty());
}

#[test]
fn corrupt_slots_load_empty() {
    let slots: Arc<dyn SlotStore> = Arc::new(MemorySlotStore::new());
    slots.write(HISTORY_KEY, "{not json").unwrap();
    slots.write(SAVED_KEY, "[{\"id\": 1}]").unwrap();

    let store = RouteStore::open(slots);

    assert!(store.history().is_empty());
    assert!(store.saved().is_empty());
}

#[test]
fn corrupt_slot_is_overwritten_on_next_change() {
    let slots: Arc<dyn SlotStore> = Arc::new(MemorySlotStore::new());
    slots.write(SAVED_KEY, "garbage").unwrap();

    let mut store = RouteStore::open(slots.clone());
    store.save_route(route("a")).unwrap();

    let reopened = RouteStore::open(slots);
    assert_eq!(reopened.saved().len(), 1);
}

#[test]
fn clear_history_persists() {
    let (slots, mut store) = memory_store();
    store.add_to_history(route("a")).unwrap();

    store.clear_history().unwrap();

    assert!(RouteStore::open(slots).history().is_empty());
}

#[test]
fn file_backed_round_trip() {
    let dir = slot::temp_dir("store");

    let mut store = RouteStore::open(Arc::new(FileSlotStore::new(&dir).unwrap()));
    store.add_to_history(route("a")).unwrap();
    store.save_route(route("b")).unwrap();

    let reopened = RouteStore::open(Arc::new(FileSlotStore::new(&dir).unwrap()));
    assert_eq!(reopened.history(), store.history());
    assert_eq!(reopened.saved(), store.saved());

    std::fs::remove_dir_all(dir).unwrap();
}

#[test]
fn missing_directory_slots_load_empty() {
    let dir = slot::temp_dir("fresh");

    let store = RouteStore::open(Arc::new(FileSlotStore::new(&dir).unwrap()));

    assert!(store.history().is_empty());
    assert!(store.saved().is_empty());

    std::fs::remove_dir_all(dir).unwrap();
}

#[cfg(test)]
struct FailingSlotStore;

#[cfg(test)]
impl SlotStore for FailingSlotStore {
    fn read(&self, _: &str) -> Result<Option<String>, Error> {
        Ok(None)
    }

    fn write(&self, _: &str, _: &str) -> Result<(), Error> {
        Err(crate::error::storage_error("read-only"))
    }
}

#[test]
fn failed_write_still_applies_in_memory() {
    let mut store = RouteStore::open(Arc::new(FailingSlotStore));

    let err = store.add_to_history(route("a")).unwrap_err();
    assert_eq!(err.code, 2);
    assert_eq!(store.history().len(), 1);

    assert!(store.save_route(route("b")).is_err());
    assert_eq!(store.saved().len(), 1);
    assert!(store.is_saved("b"));

    assert!(store.remove_from_saved("b").is_err());
    assert!(store.saved().is_empty());

    assert!(store.clear_history().is_err());
    assert!(store.history().is_empty());
}

#[test]
fn unreadable_slot_loads_empty() {
    let dir = slot::temp_dir("unreadable");
    std::fs::create_dir_all(dir.join(format!("{}.json", HISTORY_KEY))).unwrap();

    let slots = FileSlotStore::new(&dir).unwrap();
    assert!(slots.read(HISTORY_KEY).is_err());

    let store = RouteStore::open(Arc::new(slots));
    assert!(store.history().is_empty());
    assert!(store.saved().is_empty());

    std::fs::remove_dir_all(dir).unwrap();
}
