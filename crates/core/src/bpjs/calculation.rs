//! Contribution calculation from basic salary.

use payroll_id_shared::types::EmployeeId;
use payroll_id_shared::types::money::round_currency;
use rust_decimal::Decimal;

use crate::bpjs::error::BpjsError;
use crate::bpjs::types::{ContributionCategory, ContributionLine, ContributionRates, Participation};

/// Stateless contribution calculator.
pub struct ContributionCalculator;

impl ContributionCalculator {
    /// Calculates one employee's contribution lines for a period.
    ///
    /// Kesehatan and JP use the salary capped at their configured maximum;
    /// JHT, JKK, and JKM use the full basic salary. Kesehatan requires
    /// Kesehatan enrolment, the other four require Ketenagakerjaan
    /// enrolment. A zero salary produces no lines.
    ///
    /// # Errors
    ///
    /// Returns `BpjsError::NegativeSalary` if `basic_salary` is negative.
    pub fn calculate(
        employee_id: EmployeeId,
        basic_salary: Decimal,
        participation: Participation,
        rates: &ContributionRates,
    ) -> Result<Vec<ContributionLine>, BpjsError> {
        if basic_salary.is_sign_negative() && !basic_salary.is_zero() {
            return Err(BpjsError::NegativeSalary {
                employee_id,
                salary: basic_salary,
            });
        }
        if basic_salary.is_zero() {
            return Ok(Vec::new());
        }

        let mut lines = Vec::with_capacity(ContributionCategory::ALL.len());

        if participation.kesehatan {
            let base = basic_salary.min(rates.health_salary_cap);
            lines.push(ContributionLine::new(
                employee_id,
                ContributionCategory::Health,
                percent_of(base, rates.health_employee_percent),
                percent_of(base, rates.health_employer_percent),
            ));
        }

        if participation.ketenagakerjaan {
            lines.push(ContributionLine::new(
                employee_id,
                ContributionCategory::OldAgeSavings,
                percent_of(basic_salary, rates.jht_employee_percent),
                percent_of(basic_salary, rates.jht_employer_percent),
            ));

            let pension_base = basic_salary.min(rates.jp_salary_cap);
            lines.push(ContributionLine::new(
                employee_id,
                ContributionCategory::Pension,
                percent_of(pension_base, rates.jp_employee_percent),
                percent_of(pension_base, rates.jp_employer_percent),
            ));

            lines.push(ContributionLine::new(
                employee_id,
                ContributionCategory::WorkAccident,
                Decimal::ZERO,
                percent_of(basic_salary, rates.jkk_percent),
            ));
            lines.push(ContributionLine::new(
                employee_id,
                ContributionCategory::DeathBenefit,
                Decimal::ZERO,
                percent_of(basic_salary, rates.jkm_percent),
            ));
        }

        Ok(lines)
    }

    /// Total deducted from the employee's pay across `lines`.
    ///
    /// This is the BPJS figure deductible from gross income for PPh 21.
    #[must_use]
    pub fn employee_total(lines: &[ContributionLine]) -> Decimal {
        lines.iter().map(|line| line.employee_amount).sum()
    }

    /// Total paid by the employer across `lines`.
    #[must_use]
    pub fn employer_total(lines: &[ContributionLine]) -> Decimal {
        lines.iter().map(|line| line.employer_amount).sum()
    }
}

fn percent_of(base: Decimal, percent: Decimal) -> Decimal {
    round_currency(base * percent / Decimal::ONE_HUNDRED)
}
