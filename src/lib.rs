#![doc(test(attr(deny(warnings))))]

//! Cuentas keeps a personal ledger of dated income and expense entries, persisted to local
//! storage, and summarizes the current calendar month.

pub mod clock;
pub mod errors;
pub mod report;
pub mod session;
pub mod utils;

pub use cuentas_config::{CalendarLocale, Config, ConfigManager};
pub use cuentas_core::{
    EntryDraft, EntryService, LedgerStore, MonthlySummary, MonthlyTotals, SummaryService,
};
pub use cuentas_domain::{MonthKey, MovementKind, MovementRecord};
pub use errors::{AppError, Result};
pub use session::Session;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Cuentas tracing initialized.");
    });
}
