//! JSON-backed local key-value store.
//!
//! The persisted layout is one JSON object mapping string keys to
//! string-encoded JSON values — the on-disk analogue of the mobile app's
//! per-device storage. There is no schema versioning; evolving an entity
//! shape requires a migration of this file.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::core::LedgerError;

/// Well-known store keys.
pub mod keys {
    pub const BUSINESS_PROFILE: &str = "businessProfile";
    pub const ONBOARDING_COMPLETE: &str = "onboardingComplete";
    pub const INVOICES: &str = "invoices";
    pub const EXPENSES: &str = "expenses";
    pub const SETTINGS: &str = "settings";
    pub const INVOICE_NUMBER_POOL: &str = "invoiceNumberPool";
}

/// A local key-value store persisted as a single JSON file.
///
/// Values are stored as raw JSON strings; [`get`](LocalStore::get) and
/// [`set`](LocalStore::set) layer typed serde access on top. Mutations are
/// in-memory until [`save`](LocalStore::save) writes the whole map
/// atomically (temp file + rename).
#[derive(Debug)]
pub struct LocalStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl LocalStore {
    /// Open a store file, or start empty if it does not exist yet.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, LedgerError> {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents)?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                log::info!("no store at {}, starting empty", path.display());
                BTreeMap::new()
            }
            Err(err) => return Err(err.into()),
        };
        Ok(Self { path, entries })
    }

    /// An in-memory store that is never written to disk. `save` is a no-op.
    /// Useful for tests and previews.
    pub fn ephemeral() -> Self {
        Self {
            path: PathBuf::new(),
            entries: BTreeMap::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Raw string value for a key, if present.
    pub fn get_raw(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn set_raw(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.entries.remove(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Deserialize the value under `key`. `Ok(None)` when the key is absent.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, LedgerError> {
        match self.entries.get(key) {
            Some(raw) => Ok(Some(serde_json::from_str(raw)?)),
            None => Ok(None),
        }
    }

    /// Serialize `value` under `key`.
    pub fn set<T: Serialize>(&mut self, key: &str, value: &T) -> Result<(), LedgerError> {
        let raw = serde_json::to_string(value)?;
        self.entries.insert(key.to_string(), raw);
        Ok(())
    }

    /// Write the whole map to disk atomically.
    pub fn save(&self) -> Result<(), LedgerError> {
        if self.path.as_os_str().is_empty() {
            return Ok(());
        }
        let contents = serde_json::to_string_pretty(&self.entries)?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, contents)?;
        fs::rename(&tmp, &self.path)?;
        log::debug!(
            "saved {} keys to {}",
            self.entries.len(),
            self.path.display()
        );
        Ok(())
    }
}
