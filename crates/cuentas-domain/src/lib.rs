//! cuentas-domain
//!
//! Pure domain models (MovementRecord, MovementKind, RecordDate, MonthKey).
//! No I/O, no storage. Only data types and calendar helpers.

pub mod calendar;
pub mod movement;

pub use calendar::*;
pub use movement::*;
