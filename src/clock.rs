use chrono::{Local, NaiveDate};

use cuentas_core::Clock;

/// Real-time clock backed by the system local time zone.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}
