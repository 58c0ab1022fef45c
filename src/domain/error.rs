//! Domain error types.

/// Top-level error type for signaltrader.
#[derive(Debug, thiserror::Error)]
pub enum TraderError {
    #[error("invalid parameter {name}: {reason}")]
    InvalidParameter { name: String, reason: String },

    #[error("insufficient data: window {window} exceeds series length {len}")]
    InsufficientData { window: usize, len: usize },

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

    #[error("data error: {reason}")]
    Data { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl TraderError {
    pub fn invalid(name: &str, reason: impl Into<String>) -> Self {
        TraderError::InvalidParameter {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}

/// Reject a window of zero or one longer than the series.
pub fn check_window(name: &str, window: usize, len: usize) -> Result<(), TraderError> {
    if window == 0 {
        return Err(TraderError::invalid(name, "must be a positive integer"));
    }
    if window > len {
        return Err(TraderError::InsufficientData { window, len });
    }
    Ok(())
}

impl From<&TraderError> for std::process::ExitCode {
    fn from(err: &TraderError) -> Self {
        let code: u8 = match err {
            TraderError::Io(_) => 1,
            TraderError::ConfigParse { .. }
            | TraderError::ConfigMissing { .. }
            | TraderError::ConfigInvalid { .. } => 2,
            TraderError::Data { .. } => 3,
            TraderError::InvalidParameter { .. } | TraderError::InsufficientData { .. } => 4,
        };
        std::process::ExitCode::from(code)
    }
}
