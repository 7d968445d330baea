//! Domain error types.
//!
//! The parsing, aggregation and derivation core is total and never produces
//! these; they surface only at the adapter and CLI boundary.

/// Top-level error type for ecomcalc.
#[derive(Debug, thiserror::Error)]
pub enum EcomcalcError {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("failed to read export {path}: {reason}")]
    ExportRead { path: String, reason: String },

    #[error("no daily records found in {path}")]
    EmptyImport { path: String },

    #[error("invalid date range {start} to {end}")]
    InvalidRange { start: String, end: String },

    #[error("report error: {reason}")]
    Report { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&EcomcalcError> for std::process::ExitCode {
    fn from(err: &EcomcalcError) -> Self {
        let code: u8 = match err {
            EcomcalcError::Io(_) => 1,
            EcomcalcError::ConfigParse { .. }
            | EcomcalcError::ConfigMissing { .. }
            | EcomcalcError::ConfigInvalid { .. } => 2,
            EcomcalcError::ExportRead { .. } | EcomcalcError::EmptyImport { .. } => 3,
            EcomcalcError::InvalidRange { .. } => 4,
            EcomcalcError::Report { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
