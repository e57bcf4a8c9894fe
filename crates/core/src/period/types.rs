//! Period domain types.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use payroll_id_shared::config::{CrossPeriodPolicy, LabelLocale};
use payroll_id_shared::types::CompanyId;
use serde::{Deserialize, Serialize};

use crate::period::error::PeriodError;

/// Calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Month {
    /// January / Januari.
    January = 1,
    /// February / Februari.
    February = 2,
    /// March / Maret.
    March = 3,
    /// April.
    April = 4,
    /// May / Mei.
    May = 5,
    /// June / Juni.
    June = 6,
    /// July / Juli.
    July = 7,
    /// August / Agustus.
    August = 8,
    /// September.
    September = 9,
    /// October / Oktober.
    October = 10,
    /// November.
    November = 11,
    /// December / Desember.
    December = 12,
}

const ENGLISH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const INDONESIAN_NAMES: [&str; 12] = [
    "Januari",
    "Februari",
    "Maret",
    "April",
    "Mei",
    "Juni",
    "Juli",
    "Agustus",
    "September",
    "Oktober",
    "November",
    "Desember",
];

impl Month {
    /// All months in calendar order.
    pub const ALL: [Self; 12] = [
        Self::January,
        Self::February,
        Self::March,
        Self::April,
        Self::May,
        Self::June,
        Self::July,
        Self::August,
        Self::September,
        Self::October,
        Self::November,
        Self::December,
    ];

    /// Returns the month for a 1-based number.
    #[must_use]
    pub fn from_number(number: u32) -> Option<Self> {
        let index = usize::try_from(number).ok()?.checked_sub(1)?;
        Self::ALL.get(index).copied()
    }

    /// Returns the 1-based month number.
    #[must_use]
    pub const fn number(self) -> u32 {
        self as u32
    }

    /// Returns the month name in the given locale.
    #[must_use]
    pub fn name(self, locale: Locale) -> &'static str {
        let index = self.index();
        match locale {
            Locale::English => ENGLISH_NAMES[index],
            Locale::Indonesian => INDONESIAN_NAMES[index],
        }
    }

    /// Parses a month name in either locale, ignoring case and surrounding whitespace.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        ENGLISH_NAMES
            .iter()
            .position(|candidate| candidate.eq_ignore_ascii_case(name))
            .or_else(|| {
                INDONESIAN_NAMES
                    .iter()
                    .position(|candidate| candidate.eq_ignore_ascii_case(name))
            })
            .map(|index| Self::ALL[index])
    }

    fn index(self) -> usize {
        self as usize - 1
    }
}

/// Language of month names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// English month names.
    #[default]
    English,
    /// Indonesian month names.
    Indonesian,
}

impl From<LabelLocale> for Locale {
    fn from(locale: LabelLocale) -> Self {
        match locale {
            LabelLocale::En => Self::English,
            LabelLocale::Id => Self::Indonesian,
        }
    }
}

/// A payroll period: one calendar month of one year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Period {
    year: i32,
    month: Month,
}

impl Period {
    /// Creates a period from a year and a 1-based month number.
    ///
    /// # Errors
    ///
    /// Returns `PeriodError::InvalidMonth` for a month outside 1..=12 and
    /// `PeriodError::YearOutOfRange` for a year chrono cannot represent.
    pub fn new(year: i32, month: u32) -> Result<Self, PeriodError> {
        let month = Month::from_number(month).ok_or(PeriodError::InvalidMonth(month))?;
        if NaiveDate::from_ymd_opt(year, month.number(), 1).is_none() {
            return Err(PeriodError::YearOutOfRange(year));
        }
        Ok(Self { year, month })
    }

    /// Creates a period from already-validated parts.
    #[must_use]
    pub const fn from_parts(year: i32, month: Month) -> Self {
        Self { year, month }
    }

    /// Returns the period containing `date`.
    #[must_use]
    pub fn of_date(date: NaiveDate) -> Self {
        let month = Month::ALL[date.month0() as usize];
        Self {
            year: date.year(),
            month,
        }
    }

    /// The calendar year.
    #[must_use]
    pub const fn year(&self) -> i32 {
        self.year
    }

    /// The calendar month.
    #[must_use]
    pub const fn month(&self) -> Month {
        self.month
    }

    /// Returns true for December, the month of the annual tax correction.
    #[must_use]
    pub fn is_december(&self) -> bool {
        self.month == Month::December
    }

    /// Human-readable label, e.g. "January 2025" or "Januari 2025".
    #[must_use]
    pub fn label(&self, locale: Locale) -> String {
        format!("{} {}", self.month.name(locale), self.year)
    }

    /// First day of the period.
    #[must_use]
    pub fn start_date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month.number(), 1)
    }

    /// Last day of the period.
    #[must_use]
    pub fn end_date(&self) -> Option<NaiveDate> {
        match self.month {
            Month::December => NaiveDate::from_ymd_opt(self.year, 12, 31),
            month => NaiveDate::from_ymd_opt(self.year, month.number() + 1, 1)?.pred_opt(),
        }
    }

    /// Returns true if `date` falls within this period.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        Self::of_date(date) == *self
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label(Locale::English))
    }
}

/// Grouping and dedup key of an aggregation document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PeriodKey {
    /// Employer.
    pub company_id: CompanyId,
    /// Payroll period.
    pub period: Period,
}

impl PeriodKey {
    /// Creates a new key.
    #[must_use]
    pub const fn new(company_id: CompanyId, period: Period) -> Self {
        Self { company_id, period }
    }
}

impl fmt::Display for PeriodKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.company_id, self.period)
    }
}

/// How to treat a date range that spans more than one month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodMode {
    /// Reject with `PeriodError::CrossPeriod`.
    #[default]
    Strict,
    /// Accept with a `CrossPeriodWarning`.
    Warn,
}

impl From<CrossPeriodPolicy> for PeriodMode {
    fn from(policy: CrossPeriodPolicy) -> Self {
        match policy {
            CrossPeriodPolicy::Strict => Self::Strict,
            CrossPeriodPolicy::Warn => Self::Warn,
        }
    }
}

/// What the caller knows about the period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PeriodInput {
    /// A single date inside the period.
    Date {
        /// The date.
        date: NaiveDate,
    },
    /// Explicit year and 1-based month.
    YearMonth {
        /// Year.
        year: i32,
        /// Month number.
        month: u32,
    },
    /// A payroll start/end date pair.
    Range {
        /// Start date.
        start: NaiveDate,
        /// End date.
        end: NaiveDate,
    },
}

/// Non-blocking signal that a range crossed a month boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrossPeriodWarning {
    /// Range start.
    pub start: NaiveDate,
    /// Range end.
    pub end: NaiveDate,
    /// Period the range was resolved to (the start date's).
    pub resolved: Period,
    /// Period of the end date.
    pub end_period: Period,
}

impl fmt::Display for CrossPeriodWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Dates {} and {} span {} and {}; using {}",
            self.start, self.end, self.resolved, self.end_period, self.resolved
        )
    }
}

/// Outcome of a successful resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodResolution {
    /// The canonical period.
    pub period: Period,
    /// Present when warn mode accepted a cross-period range.
    pub warning: Option<CrossPeriodWarning>,
}
