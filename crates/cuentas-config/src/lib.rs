//! cuentas-config
//!
//! Persistent user preferences and display tables.
//! Owns the Config data structure, disk persistence helpers and calendar locales.

pub mod error;
pub mod locale;
pub mod manager;
pub mod model;

pub use error::ConfigError;
pub use locale::{CalendarLocale, ReportLabels};
pub use manager::ConfigManager;
pub use model::Config;
