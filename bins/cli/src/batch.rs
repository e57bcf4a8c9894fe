//! Period batch input.
//!
//! A batch is a JSON file describing one company's payroll period: either
//! per-employee salaries to calculate from, precomputed lines, or both.

use std::fs;
use std::io;
use std::path::Path;

use payroll_id_core::bpjs::{
    ContributionCalculator, ContributionLine, ContributionRates, Participation,
};
use payroll_id_core::period::{PeriodInput, PeriodMode, PeriodResolution, PeriodResolver};
use payroll_id_core::reconciliation::{AccountTotal, Tolerance};
use payroll_id_core::settlement::{AccountMapping, AggregationDocument, SettlementGate};
use payroll_id_core::tax::{
    TaxCalculator, TaxCorrection, TaxLine, TaxMethod, TaxStatus, TerTable, YearToDate,
};
use payroll_id_shared::{AppConfig, AppError, AppResult};
use payroll_id_shared::types::{CompanyId, EmployeeId};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::warn;

/// One employee to calculate lines for.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EmployeeInput {
    /// Generated when absent.
    #[serde(default = "EmployeeId::new")]
    pub employee_id: EmployeeId,
    /// Basic salary for BPJS.
    pub basic_salary: Decimal,
    /// Gross income for PPh 21; defaults to the basic salary.
    #[serde(default)]
    pub gross_income: Option<Decimal>,
    /// Tax status; defaults to TK0.
    #[serde(default)]
    pub tax_status: TaxStatus,
    /// BPJS enrolment; defaults to both programmes.
    #[serde(default)]
    pub participation: Participation,
    /// Tax method; defaults to the configured one.
    #[serde(default)]
    pub method: Option<TaxMethod>,
    /// Year-to-date figures, used only in December.
    #[serde(default)]
    pub year_to_date: Option<YearToDate>,
}

/// A period batch file.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Batch {
    /// Employer; generated when absent.
    #[serde(default)]
    pub company_id: Option<CompanyId>,
    /// Date, year/month, or date range identifying the period.
    pub period: PeriodInput,
    /// Employees to calculate lines for.
    #[serde(default)]
    pub employees: Vec<EmployeeInput>,
    /// Precomputed contribution lines.
    #[serde(default)]
    pub contribution_lines: Vec<ContributionLine>,
    /// Precomputed tax lines.
    #[serde(default)]
    pub tax_lines: Vec<TaxLine>,
    /// Precomputed December corrections.
    #[serde(default)]
    pub corrections: Vec<TaxCorrection>,
    /// Totals posted to GL accounts.
    #[serde(default)]
    pub account_totals: Vec<AccountTotal>,
    /// Payable accounts used on settle.
    #[serde(default)]
    pub mapping: AccountMapping,
    /// TER brackets and status categories; the statutory defaults when absent.
    #[serde(default)]
    pub ter_table: Option<TerTable>,
}

/// A batch turned into a populated open document.
#[derive(Debug)]
pub struct PreparedBatch {
    /// How the period was resolved.
    pub resolution: PeriodResolution,
    /// The populated document.
    pub document: AggregationDocument,
    /// Account mapping from the batch.
    pub mapping: AccountMapping,
}

impl Batch {
    /// Reads and parses a batch file.
    ///
    /// A missing file is `NotFound`, malformed JSON is `Validation`.
    pub fn from_path(path: &Path) -> AppResult<Self> {
        let raw = fs::read_to_string(path).map_err(|err| match err.kind() {
            io::ErrorKind::NotFound => {
                AppError::NotFound(format!("batch file {}", path.display()))
            }
            _ => AppError::Internal(format!(
                "failed to read batch file {}: {err}",
                path.display()
            )),
        })?;
        serde_json::from_str(&raw).map_err(|err| {
            AppError::Validation(format!("invalid batch file {}: {err}", path.display()))
        })
    }

    /// Resolves the period, calculates employee lines, and populates a document.
    ///
    /// Engine errors come back classified as `AppError`.
    pub fn prepare(self, config: &AppConfig, mode: PeriodMode) -> AppResult<PreparedBatch> {
        let resolution = PeriodResolver::resolve(self.period, mode)?;
        let period = resolution.period;

        let rates = ContributionRates::from(&config.bpjs);
        let mut calculator = TaxCalculator::from_config(&config.tax);
        if let Some(ter) = self.ter_table {
            calculator = calculator.with_ter_table(ter);
        }
        let default_method = if config.tax.use_ter {
            TaxMethod::EffectiveRate
        } else {
            TaxMethod::Progressive
        };

        let mut contribution_lines = self.contribution_lines;
        let mut tax_lines = self.tax_lines;
        let mut corrections = self.corrections;

        for employee in &self.employees {
            let id = employee.employee_id;
            let lines = ContributionCalculator::calculate(
                id,
                employee.basic_salary,
                employee.participation,
                &rates,
            )?;
            let bpjs = ContributionCalculator::employee_total(&lines);
            contribution_lines.extend(lines);

            let gross = employee.gross_income.unwrap_or(employee.basic_salary);
            let line = match employee.method.unwrap_or(default_method) {
                TaxMethod::EffectiveRate => calculator.monthly_ter(id, gross, employee.tax_status)?,
                TaxMethod::Progressive => {
                    calculator.monthly_progressive(id, gross, bpjs, employee.tax_status)?
                }
            };

            if let Some(ytd) = employee.year_to_date {
                if period.is_december() {
                    let withheld = YearToDate {
                        tax: ytd.tax + line.computed_tax,
                        ..ytd
                    };
                    let annual = calculator.annual_correction(
                        id,
                        withheld,
                        gross,
                        bpjs,
                        employee.tax_status,
                    )?;
                    corrections.push(annual.to_correction());
                } else {
                    warn!(employee_id = %id, %period, "ignoring year-to-date figures outside December");
                }
            }

            tax_lines.push(line);
        }

        let document = AggregationDocument::new(self.company_id.unwrap_or_default(), period);
        let document = SettlementGate::populate_with(
            &document,
            contribution_lines,
            tax_lines,
            corrections,
            Tolerance::from(&config.reconciliation),
        )?;
        let document = if self.account_totals.is_empty() {
            document
        } else {
            SettlementGate::enter_account_totals(&document, self.account_totals)?
        };

        Ok(PreparedBatch {
            resolution,
            document,
            mapping: self.mapping,
        })
    }
}
