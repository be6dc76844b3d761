//! Plain-text rendering of a monthly summary.

use std::io::IsTerminal;

use chrono::NaiveDate;
use colored::Colorize;
use cuentas_config::{CalendarLocale, Config};
use cuentas_core::{
    format::{CurrencyFormatter, DateFormatter},
    MonthlySummary,
};
use cuentas_domain::MovementKind;

/// Formats amounts and dates according to a calendar locale.
#[derive(Debug, Clone)]
pub struct LocaleFormatter {
    locale: CalendarLocale,
    currency_symbol: String,
}

impl LocaleFormatter {
    pub fn new(locale: CalendarLocale, currency_symbol: impl Into<String>) -> Self {
        Self {
            locale,
            currency_symbol: currency_symbol.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.calendar_locale(), config.currency_symbol.clone())
    }

    pub fn locale(&self) -> &CalendarLocale {
        &self.locale
    }

    pub fn kind_label(&self, kind: MovementKind) -> &'static str {
        match kind {
            MovementKind::Income => self.locale.labels.income_kind,
            MovementKind::Expense => self.locale.labels.expense_kind,
        }
    }
}

impl CurrencyFormatter for LocaleFormatter {
    fn format_amount(&self, amount: f64) -> String {
        format!("{} {:.2}", self.currency_symbol, amount)
    }
}

impl DateFormatter for LocaleFormatter {
    fn format_date(&self, date: NaiveDate) -> String {
        date.format(self.locale.date_pattern).to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportStyle {
    pub use_color: bool,
}

impl ReportStyle {
    pub fn plain() -> Self {
        Self { use_color: false }
    }

    /// Colour only when the config allows it, stdout is a terminal and `NO_COLOR` is unset.
    pub fn detect(config: &Config) -> Self {
        let stdout_tty = std::io::stdout().is_terminal();
        let no_color = std::env::var_os("NO_COLOR").is_some();
        Self {
            use_color: config.color_output() && stdout_tty && !no_color,
        }
    }

    fn header(&self, text: &str) -> String {
        if self.use_color {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn kind(&self, kind: MovementKind, text: &str) -> String {
        if !self.use_color {
            return text.to_string();
        }
        match kind {
            MovementKind::Income => text.green().to_string(),
            MovementKind::Expense => text.red().to_string(),
        }
    }
}

/// Renders the month heading, projection line, totals and the newest-first record list.
///
/// List numbers are 1-based view indices: entry `n` is deleted with view index `n - 1`.
pub fn render_summary(
    summary: &MonthlySummary<'_>,
    formatter: &LocaleFormatter,
    style: &ReportStyle,
) -> String {
    let labels = formatter.locale().labels;
    let month_name = formatter
        .locale()
        .month_name(summary.month.month)
        .unwrap_or_default();

    let mut lines = vec![
        style.header(labels.title),
        format!("{} {}", month_name, summary.month.year),
    ];
    if let Some(end) = summary.month_end {
        lines.push(format!(
            "{}: {}",
            labels.projection,
            formatter.format_date(end)
        ));
    }

    let totals = summary.totals;
    lines.push(style.kind(
        MovementKind::Income,
        &format!("{}: {:.2}", labels.income, totals.income),
    ));
    lines.push(style.kind(
        MovementKind::Expense,
        &format!("{}: {:.2}", labels.expense, totals.expense),
    ));
    lines.push(format!("{}: {:.2}", labels.saved, totals.saved_for_display()));

    lines.push(String::new());
    lines.push(style.header(&format!(
        "{} ({} {})",
        labels.records,
        summary.len(),
        labels.this_month
    )));
    if summary.is_empty() {
        lines.push(labels.empty.to_string());
    }
    for (index, entry) in summary.entries.iter().enumerate() {
        let kind = entry.record.kind();
        lines.push(format!(
            "{}. {}  {}  {}  {}",
            index + 1,
            formatter.format_date(entry.date),
            style.kind(kind, formatter.kind_label(kind)),
            entry.record.concept(),
            formatter.format_amount(entry.record.amount()),
        ));
    }
    lines.join("\n")
}
