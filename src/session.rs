//! One owned ledger per session, wired to config, storage and a clock.

use std::path::PathBuf;

use cuentas_config::{Config, ConfigManager};
use cuentas_core::{
    storage::LedgerStorage, Clock, EntryDraft, EntryService, LedgerStore, MonthlySummary,
    SummaryService,
};
use cuentas_domain::{MonthKey, MovementRecord};
use cuentas_storage_json::JsonLedgerStorage;
use tracing::info;

use crate::{
    clock::SystemClock,
    errors::Result,
    report::{render_summary, LocaleFormatter, ReportStyle},
};

/// Facade that coordinates the ledger store, the current month and rendering.
pub struct Session {
    store: LedgerStore,
    clock: Box<dyn Clock>,
    config: Config,
}

impl Session {
    /// Opens the JSON-backed ledger in the config's data directory.
    pub fn open(config: Config) -> Result<Self> {
        let data_dir = config.resolve_data_dir();
        let storage = JsonLedgerStorage::new(data_dir.clone())?;
        info!(data_dir = %data_dir.display(), "opening session");
        Self::with_storage(Box::new(storage), Box::new(SystemClock), config)
    }

    /// Loads `config/config.json` under `base` and keeps the ledger in `base` unless the config
    /// names another data directory.
    pub fn open_in(base: PathBuf) -> Result<Self> {
        let manager = ConfigManager::with_base_dir(base.clone())?;
        let mut config = manager.load()?;
        if config.data_dir.is_none() {
            config.data_dir = Some(base);
        }
        Self::open(config)
    }

    pub fn with_storage(
        storage: Box<dyn LedgerStorage>,
        clock: Box<dyn Clock>,
        config: Config,
    ) -> Result<Self> {
        let store = LedgerStore::load_with_key(storage, config.storage_key.clone())?;
        Ok(Self {
            store,
            clock,
            config,
        })
    }

    pub fn store(&self) -> &LedgerStore {
        &self.store
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn current_month(&self) -> MonthKey {
        SummaryService::current_month(self.clock.as_ref())
    }

    /// Validates the draft and appends one record per selected date.
    pub fn submit(&mut self, draft: &EntryDraft) -> Result<usize> {
        let records = EntryService::build_records(draft)?;
        Ok(self.store.append(records)?)
    }

    /// Deletes the entry shown at `view_index` in the current month's list.
    pub fn delete_visible(&mut self, view_index: usize) -> Result<Option<MovementRecord>> {
        let month = self.current_month();
        Ok(self.store.delete_at(month, view_index)?)
    }

    pub fn summary(&self) -> MonthlySummary<'_> {
        self.store.summary(self.current_month())
    }

    pub fn render(&self) -> String {
        self.render_with(&ReportStyle::detect(&self.config))
    }

    pub fn render_with(&self, style: &ReportStyle) -> String {
        let formatter = LocaleFormatter::from_config(&self.config);
        render_summary(&self.summary(), &formatter, style)
    }
}
