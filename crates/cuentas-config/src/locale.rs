//! Static calendar and label tables consumed by renderers.

use chrono::Weekday;

/// User-facing wording for the monthly report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportLabels {
    pub title: &'static str,
    pub projection: &'static str,
    pub income: &'static str,
    pub expense: &'static str,
    pub saved: &'static str,
    pub records: &'static str,
    pub this_month: &'static str,
    pub income_kind: &'static str,
    pub expense_kind: &'static str,
    pub empty: &'static str,
}

/// Month and weekday names, week layout and date pattern for one language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarLocale {
    pub name: &'static str,
    /// `(full, short)` names, January first.
    pub months: [(&'static str, &'static str); 12],
    /// `(full, short)` names, starting at `first_weekday`.
    pub week_days: [(&'static str, &'static str); 7],
    pub first_weekday: Weekday,
    /// `chrono` format string for dates shown to the user.
    pub date_pattern: &'static str,
    pub labels: ReportLabels,
}

// The Spanish picker starts its week on Saturday.
const GREGORIAN_ES: CalendarLocale = CalendarLocale {
    name: "gregorian_es",
    months: [
        ("Enero", "Ene"),
        ("Febrero", "Feb"),
        ("Marzo", "Mar"),
        ("Abril", "Abr"),
        ("Mayo", "May"),
        ("Junio", "Jun"),
        ("Julio", "Jul"),
        ("Agosto", "Ago"),
        ("Septiembre", "Sep"),
        ("Octubre", "Oct"),
        ("Noviembre", "Nov"),
        ("Diciembre", "Dic"),
    ],
    week_days: [
        ("Sábado", "Sáb"),
        ("Domingo", "Dom"),
        ("Lunes", "Lun"),
        ("Martes", "Mar"),
        ("Miércoles", "Mié"),
        ("Jueves", "Jue"),
        ("Viernes", "Vie"),
    ],
    first_weekday: Weekday::Sat,
    date_pattern: "%d/%m/%Y",
    labels: ReportLabels {
        title: "CuentasApp",
        projection: "Proyección hasta fin de mes",
        income: "Ingresos",
        expense: "Salidas",
        saved: "Ahorrado",
        records: "Registros",
        this_month: "este mes",
        income_kind: "ingreso",
        expense_kind: "salida",
        empty: "Sin registros",
    },
};

const GREGORIAN_EN: CalendarLocale = CalendarLocale {
    name: "gregorian_en",
    months: [
        ("January", "Jan"),
        ("February", "Feb"),
        ("March", "Mar"),
        ("April", "Apr"),
        ("May", "May"),
        ("June", "Jun"),
        ("July", "Jul"),
        ("August", "Aug"),
        ("September", "Sep"),
        ("October", "Oct"),
        ("November", "Nov"),
        ("December", "Dec"),
    ],
    week_days: [
        ("Sunday", "Sun"),
        ("Monday", "Mon"),
        ("Tuesday", "Tue"),
        ("Wednesday", "Wed"),
        ("Thursday", "Thu"),
        ("Friday", "Fri"),
        ("Saturday", "Sat"),
    ],
    first_weekday: Weekday::Sun,
    date_pattern: "%m/%d/%Y",
    labels: ReportLabels {
        title: "CuentasApp",
        projection: "Projection to month end",
        income: "Income",
        expense: "Expenses",
        saved: "Saved",
        records: "Records",
        this_month: "this month",
        income_kind: "income",
        expense_kind: "expense",
        empty: "No records",
    },
};

impl CalendarLocale {
    pub fn gregorian_es() -> Self {
        GREGORIAN_ES
    }

    pub fn gregorian_en() -> Self {
        GREGORIAN_EN
    }

    /// Resolves a language tag such as `es`, `es-PE` or `en_US`. Unknown tags use Spanish.
    pub fn for_tag(tag: &str) -> Self {
        let language = tag
            .split(|c: char| c == '-' || c == '_')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        match language.as_str() {
            "en" => GREGORIAN_EN,
            _ => GREGORIAN_ES,
        }
    }

    /// Full month name for a 1-based month number.
    pub fn month_name(&self, month: u32) -> Option<&'static str> {
        self.month_entry(month).map(|(full, _)| full)
    }

    pub fn month_short(&self, month: u32) -> Option<&'static str> {
        self.month_entry(month).map(|(_, short)| short)
    }

    pub fn weekday_name(&self, weekday: Weekday) -> &'static str {
        self.week_days[self.weekday_column(weekday)].0
    }

    pub fn weekday_short(&self, weekday: Weekday) -> &'static str {
        self.week_days[self.weekday_column(weekday)].1
    }

    /// Column of `weekday` in a calendar grid that starts at `first_weekday`.
    pub fn weekday_column(&self, weekday: Weekday) -> usize {
        let offset = 7 + weekday.num_days_from_monday() - self.first_weekday.num_days_from_monday();
        (offset % 7) as usize
    }

    fn month_entry(&self, month: u32) -> Option<(&'static str, &'static str)> {
        let index = usize::try_from(month).ok()?.checked_sub(1)?;
        self.months.get(index).copied()
    }
}
