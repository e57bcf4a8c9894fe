//! Per-employee PPh 21 calculation.

use payroll_id_shared::config::TaxConfig;
use payroll_id_shared::types::EmployeeId;
use payroll_id_shared::types::money::round_currency;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::tax::error::TaxError;
use crate::tax::progressive::{BracketTax, ProgressiveBrackets};
use crate::tax::ptkp::PtkpTable;
use crate::tax::ter::TerTable;
use crate::tax::types::{
    TaxCorrection, TaxLine, TaxMethod, TaxStatus, YearToDate, round_rupiah,
};

const MONTHS_PER_YEAR: i64 = 12;

/// Occupational expense deduction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BiayaJabatan {
    /// Whole percent of gross income.
    pub percent: Decimal,
    /// Maximum per month; the annual cap is twelve times this.
    pub monthly_cap: Decimal,
}

impl BiayaJabatan {
    /// Deduction for one month of gross income.
    #[must_use]
    pub fn monthly(&self, gross: Decimal) -> Decimal {
        (gross * self.percent / Decimal::ONE_HUNDRED).min(self.monthly_cap)
    }

    /// Deduction for a full year of gross income.
    #[must_use]
    pub fn annual(&self, gross: Decimal) -> Decimal {
        (gross * self.percent / Decimal::ONE_HUNDRED)
            .min(self.monthly_cap * Decimal::from(MONTHS_PER_YEAR))
    }
}

impl Default for BiayaJabatan {
    fn default() -> Self {
        Self::from(&TaxConfig::default())
    }
}

impl From<&TaxConfig> for BiayaJabatan {
    fn from(config: &TaxConfig) -> Self {
        Self {
            percent: config.biaya_jabatan_percent,
            monthly_cap: config.biaya_jabatan_monthly_cap,
        }
    }
}

/// Year-end progressive computation for one employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnualTaxComputation {
    /// Employee.
    pub employee_id: EmployeeId,
    /// Gross income for the year.
    pub annual_gross: Decimal,
    /// Biaya jabatan for the year.
    pub biaya_jabatan: Decimal,
    /// BPJS employee contributions for the year.
    pub bpjs: Decimal,
    /// Gross minus biaya jabatan and BPJS.
    pub netto: Decimal,
    /// PTKP for the employee's status.
    pub ptkp: Decimal,
    /// Taxable income, never negative.
    pub pkp: Decimal,
    /// Progressive tax on `pkp`, whole rupiah.
    pub annual_tax: Decimal,
    /// Tax already withheld for the year.
    pub tax_paid: Decimal,
    /// `annual_tax − tax_paid`.
    pub correction: Decimal,
    /// Per-bracket breakdown.
    pub brackets: Vec<BracketTax>,
}

impl AnnualTaxComputation {
    /// The correction to feed into December aggregation.
    #[must_use]
    pub fn to_correction(&self) -> TaxCorrection {
        TaxCorrection {
            employee_id: self.employee_id,
            amount: self.correction,
        }
    }

    /// Returns true if the employee was underpaid during the year.
    #[must_use]
    pub fn is_underpaid(&self) -> bool {
        self.correction > Decimal::ZERO
    }
}

/// PPh 21 calculator holding the rate tables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaxCalculator {
    /// PTKP amounts.
    pub ptkp: PtkpTable,
    /// TER brackets.
    pub ter: TerTable,
    /// Progressive brackets.
    pub brackets: ProgressiveBrackets,
    /// Biaya jabatan settings.
    pub biaya_jabatan: BiayaJabatan,
}

impl TaxCalculator {
    /// Creates a calculator with statutory tables and configured biaya jabatan.
    #[must_use]
    pub fn from_config(config: &TaxConfig) -> Self {
        Self {
            biaya_jabatan: BiayaJabatan::from(config),
            ..Self::default()
        }
    }

    /// Replaces the TER table.
    #[must_use]
    pub fn with_ter_table(mut self, ter: TerTable) -> Self {
        self.ter = ter;
        self
    }

    /// Monthly tax under TER: `gross × rate(category, gross)`, with the
    /// category taken from the TER table's status mapping.
    ///
    /// # Errors
    ///
    /// Returns `TaxError::NegativeAmount` if `gross` is negative.
    pub fn monthly_ter(
        &self,
        employee_id: EmployeeId,
        gross: Decimal,
        status: TaxStatus,
    ) -> Result<TaxLine, TaxError> {
        ensure_non_negative(employee_id, "gross income", gross)?;

        let rate = self.ter.rate_for_status(status, gross);
        Ok(TaxLine {
            employee_id,
            gross_income: gross,
            allowable_deduction: Decimal::ZERO,
            taxable_income: gross,
            computed_tax: round_rupiah(gross * rate),
            method: TaxMethod::EffectiveRate,
            rate: Some(rate),
        })
    }

    /// Monthly tax under the progressive method.
    ///
    /// Annualizes the month, deducts biaya jabatan, BPJS, and PTKP, applies
    /// the progressive brackets, then divides by twelve.
    ///
    /// # Errors
    ///
    /// Returns `TaxError::NegativeAmount` if `gross` or `bpjs` is negative.
    pub fn monthly_progressive(
        &self,
        employee_id: EmployeeId,
        gross: Decimal,
        bpjs: Decimal,
        status: TaxStatus,
    ) -> Result<TaxLine, TaxError> {
        ensure_non_negative(employee_id, "gross income", gross)?;
        ensure_non_negative(employee_id, "BPJS deduction", bpjs)?;

        let months = Decimal::from(MONTHS_PER_YEAR);
        let annual_gross = gross * months;
        let annual_bpjs = bpjs * months;
        let netto = annual_gross - self.biaya_jabatan.annual(annual_gross) - annual_bpjs;
        let pkp = (netto - self.ptkp.amount(status)).max(Decimal::ZERO);
        let (annual_tax, _) = self.brackets.compute(pkp);

        Ok(TaxLine {
            employee_id,
            gross_income: gross,
            allowable_deduction: round_currency(self.biaya_jabatan.monthly(gross) + bpjs),
            taxable_income: round_currency(pkp / months),
            computed_tax: round_rupiah(annual_tax / months),
            method: TaxMethod::Progressive,
            rate: None,
        })
    }

    /// December true-up against the year's progressive liability.
    ///
    /// # Errors
    ///
    /// Returns `TaxError::NegativeAmount` if any input amount is negative.
    pub fn annual_correction(
        &self,
        employee_id: EmployeeId,
        ytd: YearToDate,
        december_gross: Decimal,
        december_bpjs: Decimal,
        status: TaxStatus,
    ) -> Result<AnnualTaxComputation, TaxError> {
        ensure_non_negative(employee_id, "year-to-date gross", ytd.gross)?;
        ensure_non_negative(employee_id, "year-to-date BPJS", ytd.bpjs)?;
        ensure_non_negative(employee_id, "year-to-date tax", ytd.tax)?;
        ensure_non_negative(employee_id, "December gross", december_gross)?;
        ensure_non_negative(employee_id, "December BPJS", december_bpjs)?;

        let annual_gross = ytd.gross + december_gross;
        let bpjs = ytd.bpjs + december_bpjs;
        let biaya_jabatan = self.biaya_jabatan.annual(annual_gross);
        let netto = annual_gross - biaya_jabatan - bpjs;
        let ptkp = self.ptkp.amount(status);
        let pkp = (netto - ptkp).max(Decimal::ZERO);
        let (tax, brackets) = self.brackets.compute(pkp);
        let annual_tax = round_rupiah(tax);

        Ok(AnnualTaxComputation {
            employee_id,
            annual_gross,
            biaya_jabatan,
            bpjs,
            netto,
            ptkp,
            pkp,
            annual_tax,
            tax_paid: ytd.tax,
            correction: annual_tax - ytd.tax,
            brackets,
        })
    }
}

fn ensure_non_negative(
    employee_id: EmployeeId,
    field: &'static str,
    amount: Decimal,
) -> Result<(), TaxError> {
    if amount < Decimal::ZERO {
        return Err(TaxError::NegativeAmount {
            employee_id,
            field,
            amount,
        });
    }
    Ok(())
}
