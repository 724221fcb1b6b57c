use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Mutex;

use crate::error::{storage_error, Error};

/// Durable key-value storage holding one serialized collection per key.
pub trait SlotStore: Send + Sync {
    /// `Ok(None)` when nothing has been written under `key` yet.
    fn read(&self, key: &str) -> Result<Option<String>, Error>;

    /// Replaces whatever is stored under `key`.
    fn write(&self, key: &str, value: &str) -> Result<(), Error>;
}

/// Stores each slot as `<dir>/<key>.json`.
#[derive(Debug)]
pub struct FileSlotStore {
    dir: PathBuf,
}

impl FileSlotStore {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, Error> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;

        Ok(Self { dir })
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl SlotStore for FileSlotStore {
    fn read(&self, key: &str) -> Result<Option<String>, Error> {
        match fs::read_to_string(self.path(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<(), Error> {
        // readers only ever see a complete slot
        let path = self.path(key);
        let tmp = path.with_extension("json.tmp");

        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;

        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct MemorySlotStore {
    slots: Mutex<HashMap<String, String>>,
}

impl MemorySlotStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SlotStore for MemorySlotStore {
    fn read(&self, key: &str) -> Result<Option<String>, Error> {
        let slots = self.slots.lock().map_err(storage_error)?;

        Ok(slots.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), Error> {
        let mut slots = self.slots.lock().map_err(storage_error)?;
        slots.insert(key.into(), value.into());

        Ok(())
    }
}

#[cfg(test)]
pub(crate) fn temp_dir(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("ecoroute-{}-{}", name, uuid::Uuid::new_v4()))
}

#[test]
fn file_slot_missing_then_written() {
    let dir = temp_dir("slot");
    let store = FileSlotStore::new(&dir).unwrap();

    assert_eq!(store.read("savedRoutes").unwrap(), None);

    store.write("savedRoutes", "[]").unwrap();
    store.write("savedRoutes", "[1]").unwrap();

    assert_eq!(store.read("savedRoutes").unwrap().as_deref(), Some("[1]"));
    assert!(dir.join("savedRoutes.json").exists());
    assert!(!dir.join("savedRoutes.json.tmp").exists());

    fs::remove_dir_all(dir).unwrap();
}

#[test]
fn memory_slots_are_independent() {
    let store = MemorySlotStore::new();
    store.write("routeHistory", "[]").unwrap();

    assert_eq!(store.read("routeHistory").unwrap().as_deref(), Some("[]"));
    assert_eq!(store.read("savedRoutes").unwrap(), None);
}
