//! Calculation history and its session persistence
//!
//! History lives for one session. It is written to a [`SessionStore`] under a
//! single key as a JSON array of `{expression, result}` objects every time it
//! changes, and read back once when the engine starts.
//!
//! Storage never fails loudly: an unreadable or malformed entry loads as an
//! empty history and a failed write leaves the in-memory history intact.

use crate::error::StoreError;
use crate::format::format_number;
use serde::{Deserialize, Deserializer, Serialize, de};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Store key holding the serialized history
pub const HISTORY_KEY: &str = "calc_history";

/// One completed calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// The input buffer as typed, display glyphs included
    pub expression: String,
    /// The computed value. Stored as a number; a numeric string is read too.
    #[serde(deserialize_with = "number_or_text")]
    pub result: f64,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(f64),
    Text(String),
}

fn number_or_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    let value = match NumberOrText::deserialize(deserializer)? {
        NumberOrText::Number(v) => v,
        NumberOrText::Text(text) => text
            .trim()
            .parse()
            .map_err(|_| {
                <D::Error as de::Error>::custom(format!("result '{}' is not a number", text))
            })?,
    };
    if value.is_finite() {
        Ok(value)
    } else {
        Err(<D::Error as de::Error>::custom("result is not a finite number"))
    }
}

impl HistoryEntry {
    pub fn new(expression: impl Into<String>, result: f64) -> Self {
        Self {
            expression: expression.into(),
            result,
        }
    }

    /// The result as shown on the display
    pub fn result_text(&self) -> String {
        format_number(self.result)
    }
}

/// Session-scoped key-value persistence
pub trait SessionStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

impl<S: SessionStore + ?Sized> SessionStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        (**self).remove(key)
    }
}

/// In-memory store, gone with the process
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.values.remove(key);
        Ok(())
    }
}

/// Store backed by a JSON object file of string values
///
/// A missing or empty file reads as an empty store. Every write rewrites the
/// whole file.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, StoreError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(e.into()),
        };
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        Ok(serde_json::from_str(&content)?)
    }

    fn write_all(&self, values: &BTreeMap<String, String>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(values)?)?;
        Ok(())
    }
}

impl SessionStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut values = match self.read_all() {
            Ok(values) => values,
            // An unreadable file would otherwise block every later write
            Err(StoreError::Json(e)) => {
                warn!(path = %self.path.display(), error = %e, "overwriting malformed session file");
                BTreeMap::new()
            }
            Err(e) => return Err(e),
        };
        values.insert(key.to_string(), value.to_string());
        self.write_all(&values)
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        let mut values = self.read_all()?;
        if values.remove(key).is_some() {
            self.write_all(&values)?;
        }
        Ok(())
    }
}

/// The session history and the store it is mirrored to
pub struct HistoryStore<S> {
    store: S,
    key: String,
    entries: Vec<HistoryEntry>,
}

impl<S: SessionStore> HistoryStore<S> {
    /// Load the history kept under [`HISTORY_KEY`]
    pub fn load(store: S) -> Self {
        Self::load_with_key(store, HISTORY_KEY)
    }

    /// Load the history kept under a custom key
    pub fn load_with_key(store: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let entries = match read_entries(&store, &key) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(key = %key, error = %e, "session history unreadable, starting empty");
                Vec::new()
            }
        };
        debug!(key = %key, entries = entries.len(), "session history loaded");
        Self {
            store,
            key,
            entries,
        }
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Append an entry and persist the whole sequence
    pub fn append(&mut self, entry: HistoryEntry) {
        self.entries.push(entry);
        self.persist();
    }

    /// Drop every entry and remove the persisted copy
    pub fn clear(&mut self) {
        self.entries.clear();
        if let Err(e) = self.store.remove(&self.key) {
            warn!(key = %self.key, error = %e, "could not purge session history");
        }
    }

    fn persist(&mut self) {
        let json = match serde_json::to_string(&self.entries) {
            Ok(json) => json,
            Err(e) => {
                warn!(error = %e, "could not serialize session history");
                return;
            }
        };
        if let Err(e) = self.store.set(&self.key, &json) {
            warn!(key = %self.key, error = %e, "could not persist session history");
        }
    }
}

/// Read the stored array, skipping entries that do not parse
fn read_entries<S: SessionStore>(store: &S, key: &str) -> Result<Vec<HistoryEntry>, StoreError> {
    let Some(json) = store.get(key)? else {
        return Ok(Vec::new());
    };
    let values: Vec<serde_json::Value> = serde_json::from_str(&json)?;

    let mut entries = Vec::with_capacity(values.len());
    for (index, value) in values.into_iter().enumerate() {
        match serde_json::from_value(value) {
            Ok(entry) => entries.push(entry),
            Err(e) => warn!(key = %key, index, error = %e, "skipping malformed history entry"),
        }
    }
    Ok(entries)
}
