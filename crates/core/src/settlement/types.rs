//! Aggregation document and payment types.

use std::collections::BTreeMap;
use std::fmt;

use payroll_id_shared::types::{CompanyId, DocumentId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::bpjs::{CategoryTotal, ContributionCategory, ContributionLine};
use crate::period::{Period, PeriodKey};
use crate::reconciliation::AccountTotal;
use crate::tax::{TaxAggregate, TaxCorrection, TaxLine, TaxMismatchWarning};

/// Component name used for the PPh 21 withholding payment line.
pub const WITHHOLDING_TAX_COMPONENT: &str = "PPh 21";

/// Lifecycle status of an aggregation document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    /// Lines may still be replaced.
    #[default]
    Open,
    /// Totals are locked and reconciled.
    Finalized,
    /// Payment has been created. Terminal.
    Settled,
}

impl DocumentStatus {
    /// Returns true if no further transition is possible.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Settled)
    }

    /// Returns true if lines and account totals may be changed.
    #[must_use]
    pub fn is_editable(self) -> bool {
        matches!(self, Self::Open)
    }
}

impl fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open => write!(f, "open"),
            Self::Finalized => write!(f, "finalized"),
            Self::Settled => write!(f, "settled"),
        }
    }
}

/// Opaque reference to a payment created downstream.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PaymentReference(String);

impl PaymentReference {
    /// Wraps a reference returned by the payment service.
    #[must_use]
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    /// The reference string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PaymentReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// GL accounts that payment components are posted against.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountMapping {
    /// Payable account per BPJS category.
    #[serde(default)]
    pub categories: BTreeMap<ContributionCategory, String>,
    /// Payable account for PPh 21 withholding.
    #[serde(default)]
    pub withholding_tax: Option<String>,
}

impl AccountMapping {
    /// Maps a category to an account.
    #[must_use]
    pub fn with_category(mut self, category: ContributionCategory, account: impl Into<String>) -> Self {
        self.categories.insert(category, account.into());
        self
    }

    /// Sets the withholding tax account.
    #[must_use]
    pub fn with_withholding_tax(mut self, account: impl Into<String>) -> Self {
        self.withholding_tax = Some(account.into());
        self
    }

    /// Account mapped to `category`, ignoring blank entries.
    #[must_use]
    pub fn account_for(&self, category: ContributionCategory) -> Option<&str> {
        self.categories
            .get(&category)
            .map(String::as_str)
            .filter(|account| !account.trim().is_empty())
    }

    /// Withholding tax account, ignoring a blank entry.
    #[must_use]
    pub fn withholding_tax_account(&self) -> Option<&str> {
        self.withholding_tax
            .as_deref()
            .filter(|account| !account.trim().is_empty())
    }
}

/// One line of a payment request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentComponent {
    /// Component name, e.g. "BPJS JHT" or "PPh 21".
    pub name: String,
    /// BPJS category; `None` for withholding tax.
    pub category: Option<ContributionCategory>,
    /// Account to debit.
    pub account: String,
    /// Amount.
    pub amount: Decimal,
}

/// Request handed to the payment service on settle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRequest {
    /// Source document.
    pub document_id: DocumentId,
    /// Employer.
    pub company_id: CompanyId,
    /// Payroll period.
    pub period: Period,
    /// Payment lines.
    pub components: Vec<PaymentComponent>,
}

impl PaymentRequest {
    /// Sum of all components.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.components.iter().map(|c| c.amount).sum()
    }
}

/// Per-period document that owns the lines and derived totals.
///
/// Documents are values: every change goes through the settlement gate,
/// which returns an updated copy and bumps `version`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregationDocument {
    /// Document identifier.
    pub id: DocumentId,
    /// Company and period.
    pub key: PeriodKey,
    /// Lifecycle status.
    pub status: DocumentStatus,
    /// Incremented on every accepted change.
    pub version: u64,
    /// BPJS contribution lines.
    #[serde(default)]
    pub contribution_lines: Vec<ContributionLine>,
    /// PPh 21 lines.
    #[serde(default)]
    pub tax_lines: Vec<TaxLine>,
    /// December corrections.
    #[serde(default)]
    pub corrections: Vec<TaxCorrection>,
    /// Derived category totals.
    #[serde(default)]
    pub category_totals: Vec<CategoryTotal>,
    /// Derived tax totals.
    #[serde(default)]
    pub tax: TaxAggregate,
    /// Totals entered against GL accounts.
    #[serde(default)]
    pub account_totals: Vec<AccountTotal>,
    /// Set once the payment exists. Lookup only.
    #[serde(default)]
    pub payment_reference: Option<PaymentReference>,
}

impl AggregationDocument {
    /// Creates an empty open document for a company and period.
    #[must_use]
    pub fn new(company_id: CompanyId, period: Period) -> Self {
        Self {
            id: DocumentId::new(),
            key: PeriodKey::new(company_id, period),
            status: DocumentStatus::Open,
            version: 0,
            contribution_lines: Vec::new(),
            tax_lines: Vec::new(),
            corrections: Vec::new(),
            category_totals: Vec::new(),
            tax: TaxAggregate::default(),
            account_totals: Vec::new(),
            payment_reference: None,
        }
    }

    /// The document's period.
    #[must_use]
    pub fn period(&self) -> Period {
        self.key.period
    }

    /// Sum of category totals.
    #[must_use]
    pub fn contribution_total(&self) -> Decimal {
        self.category_totals.iter().map(|t| t.amount).sum()
    }

    /// Total amount the settle payment will carry.
    #[must_use]
    pub fn payable_total(&self) -> Decimal {
        self.contribution_total() + self.tax.payable()
    }

    /// Returns true if there is anything to pay.
    #[must_use]
    pub fn has_positive_totals(&self) -> bool {
        self.category_totals.iter().any(|t| t.amount > Decimal::ZERO)
            || self.tax.total > Decimal::ZERO
    }

    /// Tax mismatch warnings from the last aggregation.
    #[must_use]
    pub fn tax_warnings(&self) -> &[TaxMismatchWarning] {
        &self.tax.warnings
    }
}
