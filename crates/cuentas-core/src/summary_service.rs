//! Monthly aggregation over the ledger: month filter, newest-first view and totals.

use chrono::NaiveDate;
use cuentas_domain::{MonthKey, MovementKind, MovementRecord};

use crate::time::Clock;

/// A record that belongs to the month being viewed, tagged with its position in the ledger.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthlyEntry<'a> {
    /// Index of the record in the ledger's insertion order.
    pub position: usize,
    pub date: NaiveDate,
    pub record: &'a MovementRecord,
}

/// Income, expense and signed net for a set of records.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MonthlyTotals {
    pub income: f64,
    pub expense: f64,
    /// `income - expense`, may be negative.
    pub net_saved: f64,
}

impl MonthlyTotals {
    /// Net saved as shown to the user, floored at zero.
    pub fn saved_for_display(&self) -> f64 {
        self.net_saved.max(0.0)
    }

    pub fn is_overspent(&self) -> bool {
        self.net_saved < 0.0
    }
}

/// Everything a renderer needs for one month.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlySummary<'a> {
    pub month: MonthKey,
    /// Records of the month, newest first.
    pub entries: Vec<MonthlyEntry<'a>>,
    pub totals: MonthlyTotals,
    pub month_end: Option<NaiveDate>,
}

impl<'a> MonthlySummary<'a> {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maps a view index back to the ledger position it displays.
    pub fn position_of(&self, view_index: usize) -> Option<usize> {
        self.entries.get(view_index).map(|entry| entry.position)
    }
}

/// Pure aggregation helpers. Never mutates the ledger.
pub struct SummaryService;

impl SummaryService {
    /// Month containing `today`.
    pub fn month_key(today: NaiveDate) -> MonthKey {
        MonthKey::of(today)
    }

    /// Current month according to `clock`.
    pub fn current_month(clock: &dyn Clock) -> MonthKey {
        Self::month_key(clock.today())
    }

    /// Lazily yields records whose decomposed date falls in `month`.
    ///
    /// Matching requires both year and month; records whose date text does not decompose are
    /// skipped.
    pub fn filter_to_month(
        records: &[MovementRecord],
        month: MonthKey,
    ) -> impl Iterator<Item = MonthlyEntry<'_>> + '_ {
        records
            .iter()
            .enumerate()
            .filter_map(move |(position, record)| {
                let date = record.date().to_naive()?;
                month.contains(date).then_some(MonthlyEntry {
                    position,
                    date,
                    record,
                })
            })
    }

    /// Orders entries by date, newest first. The sort is stable: entries sharing a date keep
    /// ledger insertion order.
    pub fn sort_descending(mut entries: Vec<MonthlyEntry<'_>>) -> Vec<MonthlyEntry<'_>> {
        entries.sort_by(|a, b| b.date.cmp(&a.date));
        entries
    }

    pub fn totals<'a, I>(records: I) -> MonthlyTotals
    where
        I: IntoIterator<Item = &'a MovementRecord>,
    {
        let (income, expense) =
            records
                .into_iter()
                .fold((0.0, 0.0), |(income, expense), record| match record.kind() {
                    MovementKind::Income => (income + record.amount(), expense),
                    MovementKind::Expense => (income, expense + record.amount()),
                });
        MonthlyTotals {
            income,
            expense,
            net_saved: income - expense,
        }
    }

    /// Last calendar day of `month`, used for the end-of-month projection.
    pub fn month_end_date(month: MonthKey) -> Option<NaiveDate> {
        month.last_day()
    }

    pub fn summarize(records: &[MovementRecord], month: MonthKey) -> MonthlySummary<'_> {
        let entries = Self::sort_descending(Self::filter_to_month(records, month).collect());
        let totals = Self::totals(entries.iter().map(|entry| entry.record));
        MonthlySummary {
            month,
            entries,
            totals,
            month_end: Self::month_end_date(month),
        }
    }
}
