//! BPJS domain types.

use std::fmt;
use std::str::FromStr;

use payroll_id_shared::config::BpjsConfig;
use payroll_id_shared::types::EmployeeId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::bpjs::error::BpjsError;

/// BPJS contribution category.
///
/// Ordering follows the payment summary layout and is used for stable output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContributionCategory {
    /// BPJS Kesehatan (health), employee + employer.
    Health,
    /// JHT, Jaminan Hari Tua (old-age savings), employee + employer.
    OldAgeSavings,
    /// JP, Jaminan Pensiun (pension), employee + employer.
    Pension,
    /// JKK, Jaminan Kecelakaan Kerja (work accident), employer only.
    WorkAccident,
    /// JKM, Jaminan Kematian (death benefit), employer only.
    DeathBenefit,
}

impl ContributionCategory {
    /// All categories in summary order.
    pub const ALL: [Self; 5] = [
        Self::Health,
        Self::OldAgeSavings,
        Self::Pension,
        Self::WorkAccident,
        Self::DeathBenefit,
    ];

    /// Short code used in account mappings.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Health => "kesehatan",
            Self::OldAgeSavings => "jht",
            Self::Pension => "jp",
            Self::WorkAccident => "jkk",
            Self::DeathBenefit => "jkm",
        }
    }

    /// Payment component name, e.g. "BPJS JHT".
    #[must_use]
    pub fn component_name(&self) -> &'static str {
        match self {
            Self::Health => "BPJS Kesehatan",
            Self::OldAgeSavings => "BPJS JHT",
            Self::Pension => "BPJS JP",
            Self::WorkAccident => "BPJS JKK",
            Self::DeathBenefit => "BPJS JKM",
        }
    }

    /// Returns true if only the employer contributes to this category.
    #[must_use]
    pub fn is_employer_only(&self) -> bool {
        matches!(self, Self::WorkAccident | Self::DeathBenefit)
    }
}

impl fmt::Display for ContributionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.component_name())
    }
}

impl FromStr for ContributionCategory {
    type Err = BpjsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        let normalized = normalized.strip_prefix("bpjs ").unwrap_or(&normalized);
        match normalized {
            "kesehatan" | "health" => Ok(Self::Health),
            "jht" | "old_age_savings" => Ok(Self::OldAgeSavings),
            "jp" | "pension" => Ok(Self::Pension),
            "jkk" | "work_accident" => Ok(Self::WorkAccident),
            "jkm" | "death_benefit" => Ok(Self::DeathBenefit),
            _ => Err(BpjsError::UnknownCategory(s.to_string())),
        }
    }
}

/// One employee's contribution for one category in one period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionLine {
    /// Employee.
    pub employee_id: EmployeeId,
    /// Category.
    pub category: ContributionCategory,
    /// Amount deducted from the employee's pay.
    #[serde(default)]
    pub employee_amount: Decimal,
    /// Amount paid by the employer on top of pay.
    #[serde(default)]
    pub employer_amount: Decimal,
}

impl ContributionLine {
    /// Creates a line.
    #[must_use]
    pub fn new(
        employee_id: EmployeeId,
        category: ContributionCategory,
        employee_amount: Decimal,
        employer_amount: Decimal,
    ) -> Self {
        Self {
            employee_id,
            category,
            employee_amount,
            employer_amount,
        }
    }

    /// Amount this line contributes to its category total.
    ///
    /// Employer-only categories ignore the employee side.
    #[must_use]
    pub fn payable_amount(&self) -> Decimal {
        if self.category.is_employer_only() {
            self.employer_amount
        } else {
            self.employee_amount + self.employer_amount
        }
    }
}

/// Period total for one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTotal {
    /// Category.
    pub category: ContributionCategory,
    /// Summed payable amount.
    pub amount: Decimal,
}

/// Which BPJS programmes an employee is enrolled in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participation {
    /// Enrolled in BPJS Kesehatan.
    pub kesehatan: bool,
    /// Enrolled in BPJS Ketenagakerjaan (JHT, JP, JKK, JKM).
    pub ketenagakerjaan: bool,
}

impl Default for Participation {
    fn default() -> Self {
        Self {
            kesehatan: true,
            ketenagakerjaan: true,
        }
    }
}

/// Contribution rates as whole percents, plus salary caps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionRates {
    /// Kesehatan employee percent.
    pub health_employee_percent: Decimal,
    /// Kesehatan employer percent.
    pub health_employer_percent: Decimal,
    /// Kesehatan salary cap.
    pub health_salary_cap: Decimal,
    /// JHT employee percent.
    pub jht_employee_percent: Decimal,
    /// JHT employer percent.
    pub jht_employer_percent: Decimal,
    /// JP employee percent.
    pub jp_employee_percent: Decimal,
    /// JP employer percent.
    pub jp_employer_percent: Decimal,
    /// JP salary cap.
    pub jp_salary_cap: Decimal,
    /// JKK percent.
    pub jkk_percent: Decimal,
    /// JKM percent.
    pub jkm_percent: Decimal,
}

impl Default for ContributionRates {
    fn default() -> Self {
        Self::from(&BpjsConfig::default())
    }
}

impl From<&BpjsConfig> for ContributionRates {
    fn from(config: &BpjsConfig) -> Self {
        Self {
            health_employee_percent: config.health_employee_percent,
            health_employer_percent: config.health_employer_percent,
            health_salary_cap: config.health_salary_cap,
            jht_employee_percent: config.jht_employee_percent,
            jht_employer_percent: config.jht_employer_percent,
            jp_employee_percent: config.jp_employee_percent,
            jp_employer_percent: config.jp_employer_percent,
            jp_salary_cap: config.jp_salary_cap,
            jkk_percent: config.jkk_percent,
            jkm_percent: config.jkm_percent,
        }
    }
}
