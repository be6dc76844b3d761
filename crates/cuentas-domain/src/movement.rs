//! Domain model for a single income or expense entry.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calendar::MonthKey;

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
/// Enumerates the direction of a movement.
pub enum MovementKind {
    #[serde(rename = "ingreso")]
    Income,
    #[default]
    #[serde(rename = "salida")]
    Expense,
}

impl MovementKind {
    /// Persisted tag for the kind.
    pub fn as_tag(self) -> &'static str {
        match self {
            MovementKind::Income => "ingreso",
            MovementKind::Expense => "salida",
        }
    }
}

impl fmt::Display for MovementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MovementKind::Income => "Income",
            MovementKind::Expense => "Expense",
        };
        f.write_str(label)
    }
}

/// Calendar date kept in its stored `YYYY-MM-DD` text form.
///
/// The text is never handed to a generic date parser; [`RecordDate::to_naive`] splits it into
/// year, month and day components so the calendar month cannot drift with a UTC offset.
/// Text that does not decompose (older entries carrying a time-of-day suffix, garbage) is kept
/// as-is and simply never matches a month.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordDate(String);

impl RecordDate {
    pub fn from_date(date: NaiveDate) -> Self {
        Self(date.format(DATE_FORMAT).to_string())
    }

    /// Wraps stored text without validating it.
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Splits the stored text into `(year, month, day)`.
    pub fn components(&self) -> Option<(i32, u32, u32)> {
        let mut parts = self.0.split('-');
        let year = parts.next()?;
        let month = parts.next()?;
        let day = parts.next()?;
        if parts.next().is_some() {
            return None;
        }
        if year.len() != 4 || month.len() != 2 || day.len() != 2 {
            return None;
        }
        if ![year, month, day]
            .iter()
            .all(|part| part.chars().all(|c| c.is_ascii_digit()))
        {
            return None;
        }
        Some((year.parse().ok()?, month.parse().ok()?, day.parse().ok()?))
    }

    /// Returns the calendar date, or `None` when the text does not decompose into a valid date.
    pub fn to_naive(&self) -> Option<NaiveDate> {
        let (year, month, day) = self.components()?;
        NaiveDate::from_ymd_opt(year, month, day)
    }

    pub fn month_key(&self) -> Option<MonthKey> {
        self.to_naive().map(MonthKey::of)
    }
}

impl From<NaiveDate> for RecordDate {
    fn from(date: NaiveDate) -> Self {
        Self::from_date(date)
    }
}

impl fmt::Display for RecordDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One income or expense entry. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovementRecord {
    #[serde(rename = "fecha")]
    date: RecordDate,
    #[serde(rename = "tipoMovimiento")]
    kind: MovementKind,
    #[serde(rename = "concepto")]
    concept: String,
    #[serde(rename = "monto")]
    amount: f64,
}

impl MovementRecord {
    pub fn new(
        date: NaiveDate,
        kind: MovementKind,
        concept: impl Into<String>,
        amount: f64,
    ) -> Self {
        Self {
            date: RecordDate::from_date(date),
            kind,
            concept: concept.into(),
            amount,
        }
    }

    /// Builds a record around stored date text, e.g. while migrating older data.
    pub fn with_raw_date(
        date: RecordDate,
        kind: MovementKind,
        concept: impl Into<String>,
        amount: f64,
    ) -> Self {
        Self {
            date,
            kind,
            concept: concept.into(),
            amount,
        }
    }

    pub fn date(&self) -> &RecordDate {
        &self.date
    }

    pub fn kind(&self) -> MovementKind {
        self.kind
    }

    pub fn concept(&self) -> &str {
        &self.concept
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn is_income(&self) -> bool {
        self.kind == MovementKind::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == MovementKind::Expense
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn serializes_with_persisted_field_names() {
        let record = MovementRecord::new(ymd(2024, 3, 5), MovementKind::Expense, "rent", 500.0);
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["fecha"], "2024-03-05");
        assert_eq!(value["tipoMovimiento"], "salida");
        assert_eq!(value["concepto"], "rent");
        assert!(value["monto"].is_number(), "amount must stay numeric");
        assert_eq!(value["monto"].as_f64(), Some(500.0));
    }

    #[test]
    fn deserializes_income_tag_and_integer_amount() {
        let raw = r#"{"fecha":"2024-03-20","tipoMovimiento":"ingreso","concepto":"salary","monto":1200}"#;
        let record: MovementRecord = serde_json::from_str(raw).unwrap();
        assert!(record.is_income());
        assert_eq!(record.amount(), 1200.0);
        assert_eq!(record.date().to_naive(), Some(ymd(2024, 3, 20)));
    }

    #[test]
    fn rejects_string_amounts() {
        let raw = r#"{"fecha":"2024-03-20","tipoMovimiento":"ingreso","concepto":"salary","monto":"1200"}"#;
        assert!(serde_json::from_str::<MovementRecord>(raw).is_err());
    }

    #[test]
    fn decomposes_plain_dates_only() {
        assert_eq!(
            RecordDate::from_raw("2024-12-31").components(),
            Some((2024, 12, 31))
        );
        assert_eq!(RecordDate::from_raw("2024-03-05T10:30").to_naive(), None);
        assert_eq!(RecordDate::from_raw("2024-3-5").to_naive(), None);
        assert_eq!(RecordDate::from_raw("2024-02-30").to_naive(), None);
        assert_eq!(RecordDate::from_raw("").to_naive(), None);
    }

    #[test]
    fn first_day_of_month_keeps_its_month() {
        let date = RecordDate::from_raw("2024-03-01");
        assert_eq!(date.month_key(), Some(MonthKey::new(2024, 3)));
    }
}
