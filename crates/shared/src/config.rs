//! Application configuration management.
//!
//! Every field has a default so the engine runs with statutory values when
//! no configuration file is present. Amounts and percentages are decimals;
//! write them as strings in TOML to keep them exact.

use rust_decimal::Decimal;
use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Reconciliation configuration.
    #[serde(default)]
    pub reconciliation: ReconciliationConfig,
    /// Period resolution configuration.
    #[serde(default)]
    pub period: PeriodConfig,
    /// BPJS contribution rates and salary caps.
    #[serde(default)]
    pub bpjs: BpjsConfig,
    /// PPh 21 configuration.
    #[serde(default)]
    pub tax: TaxConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Reconciliation configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ReconciliationConfig {
    /// Absolute tolerance when comparing two totals.
    #[serde(default = "default_tolerance")]
    pub tolerance: Decimal,
}

impl Default for ReconciliationConfig {
    fn default() -> Self {
        Self {
            tolerance: default_tolerance(),
        }
    }
}

fn default_tolerance() -> Decimal {
    Decimal::new(1, 1) // 0.1
}

/// What to do when a date range spans more than one calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CrossPeriodPolicy {
    /// Reject the range.
    #[default]
    Strict,
    /// Accept the range, report a warning, use the start date's month.
    Warn,
}

/// Language used for period labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelLocale {
    /// English month names.
    #[default]
    En,
    /// Indonesian month names.
    Id,
}

/// Period resolution configuration.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PeriodConfig {
    /// Cross-period policy.
    #[serde(default)]
    pub mode: CrossPeriodPolicy,
    /// Label locale.
    #[serde(default)]
    pub locale: LabelLocale,
}

/// BPJS contribution configuration. Percentages are whole percents (4 = 4%).
#[derive(Debug, Clone, Deserialize)]
pub struct BpjsConfig {
    /// Kesehatan employee share.
    #[serde(default = "default_health_employee_percent")]
    pub health_employee_percent: Decimal,
    /// Kesehatan employer share.
    #[serde(default = "default_health_employer_percent")]
    pub health_employer_percent: Decimal,
    /// Salary cap for Kesehatan.
    #[serde(default = "default_health_salary_cap")]
    pub health_salary_cap: Decimal,
    /// JHT employee share.
    #[serde(default = "default_jht_employee_percent")]
    pub jht_employee_percent: Decimal,
    /// JHT employer share.
    #[serde(default = "default_jht_employer_percent")]
    pub jht_employer_percent: Decimal,
    /// JP employee share.
    #[serde(default = "default_jp_employee_percent")]
    pub jp_employee_percent: Decimal,
    /// JP employer share.
    #[serde(default = "default_jp_employer_percent")]
    pub jp_employer_percent: Decimal,
    /// Salary cap for JP.
    #[serde(default = "default_jp_salary_cap")]
    pub jp_salary_cap: Decimal,
    /// JKK rate (employer only).
    #[serde(default = "default_jkk_percent")]
    pub jkk_percent: Decimal,
    /// JKM rate (employer only).
    #[serde(default = "default_jkm_percent")]
    pub jkm_percent: Decimal,
}

impl Default for BpjsConfig {
    fn default() -> Self {
        Self {
            health_employee_percent: default_health_employee_percent(),
            health_employer_percent: default_health_employer_percent(),
            health_salary_cap: default_health_salary_cap(),
            jht_employee_percent: default_jht_employee_percent(),
            jht_employer_percent: default_jht_employer_percent(),
            jp_employee_percent: default_jp_employee_percent(),
            jp_employer_percent: default_jp_employer_percent(),
            jp_salary_cap: default_jp_salary_cap(),
            jkk_percent: default_jkk_percent(),
            jkm_percent: default_jkm_percent(),
        }
    }
}

fn default_health_employee_percent() -> Decimal {
    Decimal::ONE
}

fn default_health_employer_percent() -> Decimal {
    Decimal::from(4)
}

fn default_health_salary_cap() -> Decimal {
    Decimal::from(12_000_000)
}

fn default_jht_employee_percent() -> Decimal {
    Decimal::TWO
}

fn default_jht_employer_percent() -> Decimal {
    Decimal::new(37, 1)
}

fn default_jp_employee_percent() -> Decimal {
    Decimal::ONE
}

fn default_jp_employer_percent() -> Decimal {
    Decimal::TWO
}

fn default_jp_salary_cap() -> Decimal {
    Decimal::from(9_077_600)
}

fn default_jkk_percent() -> Decimal {
    Decimal::new(24, 2)
}

fn default_jkm_percent() -> Decimal {
    Decimal::new(3, 1)
}

/// PPh 21 configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct TaxConfig {
    /// Use the TER method for regular months.
    #[serde(default = "default_use_ter")]
    pub use_ter: bool,
    /// Biaya jabatan as a whole percent of gross income.
    #[serde(default = "default_biaya_jabatan_percent")]
    pub biaya_jabatan_percent: Decimal,
    /// Biaya jabatan cap per month.
    #[serde(default = "default_biaya_jabatan_monthly_cap")]
    pub biaya_jabatan_monthly_cap: Decimal,
}

impl Default for TaxConfig {
    fn default() -> Self {
        Self {
            use_ter: default_use_ter(),
            biaya_jabatan_percent: default_biaya_jabatan_percent(),
            biaya_jabatan_monthly_cap: default_biaya_jabatan_monthly_cap(),
        }
    }
}

fn default_use_ter() -> bool {
    true
}

fn default_biaya_jabatan_percent() -> Decimal {
    Decimal::from(5)
}

fn default_biaya_jabatan_monthly_cap() -> Decimal {
    Decimal::from(500_000)
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub filter: String,
    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
            json: false,
        }
    }
}

fn default_log_filter() -> String {
    "payroll_id=info".to_string()
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_with(None)
    }

    /// Loads configuration, layering an explicit file over the defaults.
    ///
    /// Order (later wins): `config/default`, `config/{RUN_MODE}`, `extra`,
    /// then `PAYROLL_ID__*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be read or values fail to deserialize.
    pub fn load_with(extra: Option<&str>) -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let mut builder = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false));

        if let Some(path) = extra {
            builder = builder.add_source(config::File::with_name(path).required(true));
        }

        let config = builder
            .add_source(config::Environment::with_prefix("PAYROLL_ID").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
