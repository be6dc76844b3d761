//! cuentas-core
//!
//! Ledger store, monthly aggregation and entry validation.
//! Depends on cuentas-domain. No terminal I/O; persistence goes through [`storage::LedgerStorage`].

pub mod entry_service;
pub mod error;
pub mod format;
pub mod ledger_store;
pub mod storage;
pub mod summary_service;
pub mod time;


pub use entry_service::*;
pub use error::CoreError;
pub use ledger_store::*;
pub use summary_service::*;
pub use time::{Clock, FixedClock};
