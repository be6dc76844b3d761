//! Validation of submitted entries before they reach the ledger.

use chrono::NaiveDate;
use cuentas_domain::{MovementKind, MovementRecord};

use crate::CoreError;

const INCOMPLETE_ENTRY: &str = "complete all fields and select at least one date";

/// Raw form input: one or more dates sharing kind, concept and amount text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntryDraft {
    pub dates: Vec<NaiveDate>,
    pub kind: MovementKind,
    pub concept: String,
    pub amount: String,
}

impl EntryDraft {
    pub fn new(kind: MovementKind, concept: impl Into<String>, amount: impl Into<String>) -> Self {
        Self {
            dates: Vec::new(),
            kind,
            concept: concept.into(),
            amount: amount.into(),
        }
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.dates.push(date);
        self
    }

    pub fn with_dates<I: IntoIterator<Item = NaiveDate>>(mut self, dates: I) -> Self {
        self.dates.extend(dates);
        self
    }
}

pub struct EntryService;

impl EntryService {
    /// Turns a draft into one record per distinct date. Either the whole batch is valid or an
    /// error is returned and nothing is produced.
    pub fn build_records(draft: &EntryDraft) -> Result<Vec<MovementRecord>, CoreError> {
        let concept = draft.concept.trim();
        let amount_text = draft.amount.trim();
        if concept.is_empty() || amount_text.is_empty() || draft.dates.is_empty() {
            return Err(CoreError::Validation(INCOMPLETE_ENTRY.into()));
        }
        let amount = parse_amount(amount_text)?;

        let mut dates: Vec<NaiveDate> = Vec::with_capacity(draft.dates.len());
        for date in &draft.dates {
            if !dates.contains(date) {
                dates.push(*date);
            }
        }

        Ok(dates
            .into_iter()
            .map(|date| MovementRecord::new(date, draft.kind, concept, amount))
            .collect())
    }
}

fn parse_amount(text: &str) -> Result<f64, CoreError> {
    let amount: f64 = text
        .parse()
        .map_err(|_| CoreError::Validation(format!("amount `{text}` is not a number")))?;
    if !amount.is_finite() {
        return Err(CoreError::Validation(format!(
            "amount `{text}` is not a finite number"
        )));
    }
    if amount < 0.0 {
        return Err(CoreError::Validation(format!(
            "amount `{text}` must not be negative"
        )));
    }
    Ok(amount)
}
