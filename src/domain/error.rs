//! Domain error types.

/// Top-level error type for accrual.
#[derive(Debug, thiserror::Error)]
pub enum AccrualError {
    #[error("invalid {kind} rate {value}: rate must be finite and greater than -1")]
    InvalidRate { kind: &'static str, value: f64 },

    #[error("invalid amount {amount} for event {event_id}: amount must be positive and finite")]
    InvalidAmount { event_id: String, amount: f64 },

    #[error("invalid amount '{value}' for event {event_id}: not a number")]
    MalformedAmount { event_id: String, value: String },

    #[error("invalid date '{value}' for event {event_id} (expected YYYY-MM-DD)")]
    InvalidDate { event_id: String, value: String },

    #[error("invalid event kind '{value}' for event {event_id}")]
    InvalidKind { event_id: String, value: String },

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

    #[error("event source error: {reason}")]
    EventSource { reason: String },

    #[error("report error: {reason}")]
    Report { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl AccrualError {
    /// True for errors that reject a computation before it starts.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            AccrualError::InvalidRate { .. }
                | AccrualError::InvalidAmount { .. }
                | AccrualError::MalformedAmount { .. }
                | AccrualError::InvalidDate { .. }
                | AccrualError::InvalidKind { .. }
        )
    }
}

impl From<&AccrualError> for std::process::ExitCode {
    fn from(err: &AccrualError) -> Self {
        let code: u8 = match err {
            AccrualError::Io(_) => 1,
            AccrualError::ConfigParse { .. }
            | AccrualError::ConfigMissing { .. }
            | AccrualError::ConfigInvalid { .. } => 2,
            AccrualError::EventSource { .. } => 3,
            AccrualError::InvalidRate { .. }
            | AccrualError::InvalidAmount { .. }
            | AccrualError::MalformedAmount { .. }
            | AccrualError::InvalidDate { .. }
            | AccrualError::InvalidKind { .. } => 4,
            AccrualError::Report { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
