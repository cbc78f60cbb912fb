//! Error types for the simulation.

use thiserror::Error;

/// Errors surfaced by the simulation's outer operations.
///
/// Numerical routines never produce these; they propagate non-finite values instead.
#[derive(Debug, Error)]
pub enum SimError {
    /// A state component was NaN or infinite at step entry.
    #[error("invalid state: {component} is {value}")]
    InvalidState {
        /// Name of the offending component.
        component: &'static str,
        /// Its value.
        value: f64,
    },

    /// No tunable gain with this name.
    #[error("unknown gain: {0}")]
    UnknownGain(String),

    /// Malformed configuration or command-line input.
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for simulation operations.
pub type SimResult<T> = Result<T, SimError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = SimError::InvalidState {
            component: "x_dot",
            value: f64::INFINITY,
        };
        assert_eq!(err.to_string(), "invalid state: x_dot is inf");
        assert_eq!(
            SimError::UnknownGain("k_f".into()).to_string(),
            "unknown gain: k_f"
        );
    }

    #[test]
    fn test_json_error_converts() {
        let parsed: Result<serde_json::Value, _> = serde_json::from_str("{");
        let err: SimError = parsed.unwrap_err().into();
        assert!(matches!(err, SimError::Json(_)));
    }
}
