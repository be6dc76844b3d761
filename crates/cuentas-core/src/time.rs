use chrono::NaiveDate;

/// Clock abstracts access to the current date so services remain deterministic in tests.
pub trait Clock: Send + Sync {
    /// Returns the current calendar date in local time.
    fn today(&self) -> NaiveDate;
}

/// Clock pinned to a single calendar date.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    today: NaiveDate,
}

impl FixedClock {
    pub fn new(today: NaiveDate) -> Self {
        Self { today }
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.today
    }
}
