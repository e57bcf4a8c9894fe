//! Error classification at the process boundary.

use std::io::{self, Write};
use std::process::ExitCode;

use payroll_id_shared::AppError;
use serde::Serialize;

/// Exit status when the caller can fix the input and retry.
pub const EXIT_REJECTED: u8 = 1;
/// Exit status for configuration, payment service, and internal failures.
pub const EXIT_FAILED: u8 = 2;

/// A failed command, as reported on stderr.
#[derive(Debug, Serialize)]
pub struct Failure {
    /// `AppError::error_code`, or `INTERNAL_ERROR` when unclassified.
    pub code: &'static str,
    /// Status a host API would report.
    pub status: u16,
    /// Full context chain.
    pub message: String,
    /// Whether the caller can correct the input.
    pub user_correctable: bool,
}

impl Failure {
    /// Classifies an error by the `AppError` somewhere in its chain.
    pub fn from_error(err: &anyhow::Error) -> Self {
        let message = format!("{err:#}");
        match err.downcast_ref::<AppError>() {
            Some(app) => Self {
                code: app.error_code(),
                status: app.status_code(),
                message,
                user_correctable: app.is_user_correctable(),
            },
            None => Self {
                code: "INTERNAL_ERROR",
                status: 500,
                message,
                user_correctable: false,
            },
        }
    }

    /// Process exit status for this failure.
    pub fn exit_status(&self) -> u8 {
        if self.user_correctable {
            EXIT_REJECTED
        } else {
            EXIT_FAILED
        }
    }

    /// Writes the failure to stderr as one JSON line and returns the exit code.
    pub fn report(&self) -> ExitCode {
        let mut stderr = io::stderr().lock();
        if serde_json::to_writer(&mut stderr, self).is_err() {
            let _ = write!(stderr, "{}: {}", self.code, self.message);
        }
        let _ = writeln!(stderr);
        ExitCode::from(self.exit_status())
    }
}
