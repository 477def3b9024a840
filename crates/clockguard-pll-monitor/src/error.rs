//! Error types for PLL monitor configuration.
//!
//! Polling itself never fails: register reads are non-failing at this layer
//! and lock loss is reported through diagnostics, not through `Result`.

use thiserror::Error;

/// Errors that can occur while configuring a PLL monitor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PllMonitorError {
    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The locked and reference-lost codes are identical.
    #[error("Status encoding conflict: locked and reference-lost both use code {code:#x}")]
    EncodingConflict {
        /// The code assigned to both states.
        code: u32,
    },
}

impl PllMonitorError {
    /// Create an invalid configuration error.
    #[must_use]
    pub fn invalid_configuration(msg: impl Into<String>) -> Self {
        Self::InvalidConfiguration(msg.into())
    }

    /// Create an encoding conflict error.
    #[must_use]
    pub fn encoding_conflict(code: u32) -> Self {
        Self::EncodingConflict { code }
    }
}

/// A specialized `Result` type for PLL monitor operations.
pub type PllMonitorResult<T> = Result<T, PllMonitorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            PllMonitorError::invalid_configuration("subsystem tag must not be empty").to_string(),
            "Invalid configuration: subsystem tag must not be empty"
        );
        assert_eq!(
            PllMonitorError::encoding_conflict(0x3).to_string(),
            "Status encoding conflict: locked and reference-lost both use code 0x3"
        );
    }

    #[test]
    fn test_error_constructors() {
        let err = PllMonitorError::invalid_configuration("bad tag");
        assert!(matches!(err, PllMonitorError::InvalidConfiguration(_)));

        let err = PllMonitorError::encoding_conflict(1);
        assert_eq!(err, PllMonitorError::EncodingConflict { code: 1 });
    }
}
