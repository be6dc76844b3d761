//! Owner of the movement ledger and the only writer to durable storage.

use cuentas_domain::{MonthKey, MovementRecord};
use tracing::{debug, info, warn};

use crate::{
    storage::{decode_ledger, encode_records, LedgerStorage},
    summary_service::{MonthlySummary, SummaryService},
    CoreError,
};

/// Storage key the ledger lives under unless configured otherwise.
pub const DEFAULT_LEDGER_KEY: &str = "registros";

/// Insertion-ordered ledger mirrored to a [`LedgerStorage`] backend.
///
/// Every mutation persists before returning, so storage matches memory once a call succeeds.
/// When the write fails the in-memory change stays and the error is returned; there is no
/// rollback.
pub struct LedgerStore {
    records: Vec<MovementRecord>,
    key: String,
    storage: Box<dyn LedgerStorage>,
}

impl LedgerStore {
    /// Loads the ledger stored under [`DEFAULT_LEDGER_KEY`].
    pub fn load(storage: Box<dyn LedgerStorage>) -> Result<Self, CoreError> {
        Self::load_with_key(storage, DEFAULT_LEDGER_KEY)
    }

    /// Loads the ledger stored under `key`.
    ///
    /// Missing data yields an empty ledger. Data that is not a JSON array is quarantined by
    /// the backend and also yields an empty ledger. Array elements that do not parse are left
    /// out; the original text is quarantined first and the surviving records are written back,
    /// so nothing is lost when the backend can set data aside. Read failures propagate.
    pub fn load_with_key(
        storage: Box<dyn LedgerStorage>,
        key: impl Into<String>,
    ) -> Result<Self, CoreError> {
        let key = key.into();
        let mut rewrite = false;
        let records = match storage.read_ledger(&key)? {
            None => Vec::new(),
            Some(data) => match decode_ledger(&data) {
                Ok(decoded) if decoded.skipped == 0 => decoded.records,
                Ok(decoded) => {
                    let moved_to = storage.quarantine_ledger(&key)?;
                    warn!(
                        key = %key,
                        skipped = decoded.skipped,
                        kept = decoded.records.len(),
                        moved_to = moved_to.as_deref().unwrap_or("<not kept>"),
                        "stored ledger has unreadable records; skipping them"
                    );
                    rewrite = moved_to.is_some();
                    decoded.records
                }
                Err(CoreError::Serde(reason)) => {
                    let moved_to = storage.quarantine_ledger(&key)?;
                    warn!(
                        key = %key,
                        %reason,
                        moved_to = moved_to.as_deref().unwrap_or("<discarded>"),
                        "stored ledger is malformed; starting empty"
                    );
                    Vec::new()
                }
                Err(err) => return Err(err),
            },
        };
        info!(key = %key, records = records.len(), "ledger loaded");
        let store = Self {
            records,
            key,
            storage,
        };
        if rewrite {
            store.persist()?;
        }
        Ok(store)
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn records(&self) -> &[MovementRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Appends records in the given order and persists. Returns how many were added; an empty
    /// batch neither changes nor writes anything.
    ///
    /// Amounts must be finite: JSON has no NaN or infinity, so such a record could not be read
    /// back. A batch containing one is rejected whole with [`CoreError::Validation`].
    pub fn append<I>(&mut self, records: I) -> Result<usize, CoreError>
    where
        I: IntoIterator<Item = MovementRecord>,
    {
        let batch: Vec<MovementRecord> = records.into_iter().collect();
        if let Some(bad) = batch.iter().find(|record| !record.amount().is_finite()) {
            return Err(CoreError::Validation(format!(
                "amount for '{}' is not a finite number",
                bad.concept()
            )));
        }
        let added = batch.len();
        if added == 0 {
            return Ok(0);
        }
        self.records.extend(batch);
        debug!(added, total = self.records.len(), "records appended");
        self.persist()?;
        Ok(added)
    }

    /// Removes the record displayed at `view_index` in `month`'s newest-first view.
    ///
    /// Returns the removed record, or `None` when the index is outside the view, in which
    /// case nothing is written.
    pub fn delete_at(
        &mut self,
        month: MonthKey,
        view_index: usize,
    ) -> Result<Option<MovementRecord>, CoreError> {
        let position = SummaryService::summarize(&self.records, month).position_of(view_index);
        match position {
            Some(position) => self.remove_position(position),
            None => {
                debug!(%month, view_index, "delete ignored: index outside monthly view");
                Ok(None)
            }
        }
    }

    /// Removes the record at its ledger position. Out of range is a no-op.
    pub fn remove_position(&mut self, position: usize) -> Result<Option<MovementRecord>, CoreError> {
        if position >= self.records.len() {
            return Ok(None);
        }
        let removed = self.records.remove(position);
        debug!(position, total = self.records.len(), "record removed");
        self.persist()?;
        Ok(Some(removed))
    }

    /// Writes the full ledger to storage.
    pub fn persist(&self) -> Result<(), CoreError> {
        let data = encode_records(&self.records)?;
        self.storage.write_ledger(&self.key, &data)?;
        debug!(key = %self.key, records = self.records.len(), "ledger persisted");
        Ok(())
    }

    pub fn summary(&self, month: MonthKey) -> MonthlySummary<'_> {
        SummaryService::summarize(&self.records, month)
    }
}

impl std::fmt::Debug for LedgerStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LedgerStore")
            .field("key", &self.key)
            .field("records", &self.records.len())
            .finish()
    }
}
