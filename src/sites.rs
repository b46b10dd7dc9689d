//! The persisted "websites" list behind a key-value store.
//!
//! The ticket-creation screen keeps a user-maintained list of websites.
//! [`WebsiteDirectory`] owns that list in memory and persists it as a
//! JSON array under the [`WEBSITES_KEY`] key of a pluggable
//! [`KeyValueStore`].
//!
//! Persistence is fail-soft in both directions. A missing key, an
//! unreadable store, or a malformed payload makes [`WebsiteDirectory::load`]
//! log a warning and start from the built-in defaults; a failed save is
//! logged and reported, but the in-memory mutation stands, so the screen
//! keeps working without storage.
//!
//! # Example
//!
//! ```
//! use card_entry::sites::{MemoryStore, WebsiteDirectory};
//!
//! let mut sites = WebsiteDirectory::load(MemoryStore::new());
//! assert_eq!(sites.list().len(), 3); // built-in defaults
//!
//! let entry = sites.add("docs.mywebsite.com", "https://docs.mywebsite.com").unwrap();
//! assert_eq!(sites.list().len(), 4);
//! sites.remove(&entry.id).unwrap();
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::warn;

/// Storage key the website list persists under.
pub const WEBSITES_KEY: &str = "sitesupportpro_websites";

/// One saved website.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebsiteEntry {
    /// Directory-assigned identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Full URL.
    pub url: String,
}

/// Errors from a key-value store.
#[derive(Debug)]
pub enum StoreError {
    /// Reading or writing the backing storage failed.
    Io(std::io::Error),
    /// Encoding the payload failed.
    Serialize(serde_json::Error),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "storage I/O error: {e}"),
            Self::Serialize(e) => write!(f, "storage payload error: {e}"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Serialize(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialize(err)
    }
}

/// Errors from website-directory operations.
#[derive(Debug)]
pub enum WebsiteError {
    /// Name or URL was empty after trimming; nothing was added.
    MissingField,
    /// No entry carries the given id; nothing was removed.
    UnknownId(String),
    /// The mutation applied in memory but persisting it failed.
    SaveFailed(StoreError),
}

impl fmt::Display for WebsiteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingField => write!(f, "Both name and URL are required"),
            Self::UnknownId(id) => write!(f, "no website with id {id}"),
            Self::SaveFailed(e) => write!(f, "Failed to save websites: {e}"),
        }
    }
}

impl std::error::Error for WebsiteError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::SaveFailed(e) => Some(e),
            _ => None,
        }
    }
}

/// Minimal string-to-string persistence interface.
///
/// Keys are simple identifiers like [`WEBSITES_KEY`]; values are whatever
/// payload the caller serializes.
pub trait KeyValueStore {
    /// Reads the value under `key`, `None` when the key has never been
    /// written.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Writes `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// In-memory store; contents vanish with the instance.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// File-backed store keeping each key as `<key>.json` under a directory.
///
/// The directory is created on first write. A missing file reads as
/// `None`, so a fresh directory behaves like an empty store.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Creates a store rooted at `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(payload) => Ok(Some(payload)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(StoreError::Io(err)),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.path_for(key), value)?;
        Ok(())
    }
}

/// The built-in fallback list shown before the user has saved anything.
pub fn default_websites() -> Vec<WebsiteEntry> {
    vec![
        WebsiteEntry {
            id: String::from("1"),
            name: String::from("mywebsite.com"),
            url: String::from("https://mywebsite.com"),
        },
        WebsiteEntry {
            id: String::from("2"),
            name: String::from("shop.mywebsite.com"),
            url: String::from("https://shop.mywebsite.com"),
        },
        WebsiteEntry {
            id: String::from("3"),
            name: String::from("blog.mywebsite.com"),
            url: String::from("https://blog.mywebsite.com"),
        },
    ]
}

/// The website list with persistence through a [`KeyValueStore`].
#[derive(Debug)]
pub struct WebsiteDirectory<S> {
    store: S,
    entries: Vec<WebsiteEntry>,
}

impl<S: KeyValueStore> WebsiteDirectory<S> {
    /// Loads the list from the store.
    ///
    /// Never fails: a missing key starts the list from
    /// [`default_websites`], and a store error or malformed payload does
    /// the same after logging a warning.
    pub fn load(store: S) -> Self {
        let entries = match store.get(WEBSITES_KEY) {
            Ok(Some(payload)) => match serde_json::from_str(&payload) {
                Ok(entries) => entries,
                Err(err) => {
                    warn!(%err, "stored website list is malformed, using defaults");
                    default_websites()
                }
            },
            Ok(None) => default_websites(),
            Err(err) => {
                warn!(%err, "could not read stored website list, using defaults");
                default_websites()
            }
        };
        Self { store, entries }
    }

    /// The current list in insertion order.
    pub fn list(&self) -> &[WebsiteEntry] {
        &self.entries
    }

    /// Read access to the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Adds a website and persists the list.
    ///
    /// Both name and URL are required after trimming. On
    /// [`WebsiteError::SaveFailed`] the entry has still joined the
    /// in-memory list; only persistence failed.
    pub fn add(&mut self, name: &str, url: &str) -> Result<WebsiteEntry, WebsiteError> {
        let name = name.trim();
        let url = url.trim();
        if name.is_empty() || url.is_empty() {
            return Err(WebsiteError::MissingField);
        }

        let entry = WebsiteEntry {
            id: fresh_id(),
            name: name.to_string(),
            url: url.to_string(),
        };
        self.entries.push(entry.clone());
        self.save()?;
        Ok(entry)
    }

    /// Removes a website by id and persists the list.
    ///
    /// On [`WebsiteError::SaveFailed`] the entry is still gone from the
    /// in-memory list; only persistence failed.
    pub fn remove(&mut self, id: &str) -> Result<(), WebsiteError> {
        let before = self.entries.len();
        self.entries.retain(|w| w.id != id);
        if self.entries.len() == before {
            return Err(WebsiteError::UnknownId(id.to_string()));
        }
        self.save()
    }

    fn save(&mut self) -> Result<(), WebsiteError> {
        let payload = match serde_json::to_string(&self.entries) {
            Ok(payload) => payload,
            Err(err) => {
                let err = StoreError::from(err);
                warn!(%err, "could not encode website list, keeping the change in memory");
                return Err(WebsiteError::SaveFailed(err));
            }
        };
        if let Err(err) = self.store.set(WEBSITES_KEY, &payload) {
            warn!(%err, "could not persist website list, keeping the change in memory");
            return Err(WebsiteError::SaveFailed(err));
        }
        Ok(())
    }
}

/// Generates a fresh id: a base-36 hash of a process counter and the
/// clock. Uniqueness only needs to hold within one list.
fn fresh_id() -> String {
    use std::collections::hash_map::RandomState;
    use std::hash::{BuildHasher, Hasher};
    use std::sync::atomic::{AtomicU64, Ordering};

    static COUNTER: AtomicU64 = AtomicU64::new(0);
    let count = COUNTER.fetch_add(1, Ordering::Relaxed);
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos() as u64;

    let mut hasher = RandomState::new().build_hasher();
    hasher.write_u64(count);
    hasher.write_u64(nanos);
    base36(hasher.finish())
}

fn base36(mut n: u64) -> String {
    const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if n == 0 {
        return String::from("0");
    }
    let mut out = Vec::new();
    while n > 0 {
        out.push(ALPHABET[(n % 36) as usize]);
        n /= 36;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}
