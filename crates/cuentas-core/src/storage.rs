use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use cuentas_domain::MovementRecord;
use tracing::debug;

use crate::CoreError;

/// Abstraction over durable key/value storage holding serialized ledgers.
///
/// Backends store opaque text; the JSON array layout is owned by [`encode_records`] and
/// [`decode_records`].
pub trait LedgerStorage: Send + Sync {
    /// Returns the stored text for `key`, or `None` when nothing was ever written.
    fn read_ledger(&self, key: &str) -> Result<Option<String>, CoreError>;

    fn write_ledger(&self, key: &str, data: &str) -> Result<(), CoreError>;

    /// Sets aside unreadable data under `key` so a fresh ledger can take its place.
    /// Returns a description of where the data went, if anywhere.
    fn quarantine_ledger(&self, _key: &str) -> Result<Option<String>, CoreError> {
        Ok(None)
    }
}

/// Serializes the ledger as a JSON array of records.
pub fn encode_records(records: &[MovementRecord]) -> Result<String, CoreError> {
    Ok(serde_json::to_string(records)?)
}

/// Outcome of decoding a stored ledger array.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DecodedLedger {
    pub records: Vec<MovementRecord>,
    /// Array elements that did not match the record shape and were left out.
    pub skipped: usize,
}

/// Decodes a JSON array element by element, leaving out elements that do not parse.
///
/// A document that is not a JSON array at all is an error.
pub fn decode_ledger(data: &str) -> Result<DecodedLedger, CoreError> {
    let values: Vec<serde_json::Value> = serde_json::from_str(data)?;
    let mut decoded = DecodedLedger::default();
    for (index, value) in values.into_iter().enumerate() {
        match serde_json::from_value::<MovementRecord>(value) {
            Ok(record) => decoded.records.push(record),
            Err(err) => {
                debug!(index, error = %err, "skipping stored element");
                decoded.skipped += 1;
            }
        }
    }
    Ok(decoded)
}

pub fn decode_records(data: &str) -> Result<Vec<MovementRecord>, CoreError> {
    decode_ledger(data).map(|decoded| decoded.records)
}

/// In-process storage. Clones share the same slots, which lets tests simulate a restart by
/// loading a second store from a clone.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slots: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds raw text under `key`, bypassing the codec.
    pub fn insert_raw(&self, key: &str, data: impl Into<String>) -> Result<(), CoreError> {
        self.lock()?.insert(key.to_string(), data.into());
        Ok(())
    }

    pub fn raw(&self, key: &str) -> Result<Option<String>, CoreError> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>, CoreError> {
        self.slots
            .lock()
            .map_err(|_| CoreError::Storage("memory storage lock poisoned".into()))
    }
}

impl LedgerStorage for MemoryStorage {
    fn read_ledger(&self, key: &str) -> Result<Option<String>, CoreError> {
        self.raw(key)
    }

    fn write_ledger(&self, key: &str, data: &str) -> Result<(), CoreError> {
        self.insert_raw(key, data)
    }

    fn quarantine_ledger(&self, key: &str) -> Result<Option<String>, CoreError> {
        let mut slots = self.lock()?;
        match slots.remove(key) {
            Some(data) => {
                let mut target = format!("{key}.corrupt");
                let mut attempt = 1;
                while slots.contains_key(&target) {
                    attempt += 1;
                    target = format!("{key}.corrupt.{attempt}");
                }
                slots.insert(target.clone(), data);
                Ok(Some(target))
            }
            None => Ok(None),
        }
    }
}
