//! Domain error types.

/// Top-level error type for eodscan.
#[derive(Debug, thiserror::Error)]
pub enum EodscanError {
    #[error("database error: {reason}")]
    Database { reason: String },

    #[error("database query error: {reason}")]
    DatabaseQuery { reason: String },

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

    #[error("market data provider error: {reason}")]
    Provider { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&EodscanError> for std::process::ExitCode {
    fn from(err: &EodscanError) -> Self {
        let code: u8 = match err {
            EodscanError::Io(_) => 1,
            EodscanError::ConfigParse { .. }
            | EodscanError::ConfigMissing { .. }
            | EodscanError::ConfigInvalid { .. } => 2,
            EodscanError::Database { .. } | EodscanError::DatabaseQuery { .. } => 3,
            EodscanError::Provider { .. } => 4,
        };
        std::process::ExitCode::from(code)
    }
}
