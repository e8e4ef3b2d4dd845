//! Error types for wait primitives

use thiserror::Error;

use crate::types::TargetState;

/// Errors surfaced by the condition poller and the test steps built on it
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WaitError {
    /// Deadline elapsed before the target was both visible and enabled
    #[error(
        "Wait timeout: '{target}' not ready after {elapsed_ms}ms (timeout {timeout_ms}ms, last seen: {})",
        describe_last(.last_state)
    )]
    Timeout {
        target: String,
        elapsed_ms: u64,
        timeout_ms: u64,
        last_state: Option<TargetState>,
    },

    /// Malformed input rejected before any polling
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The enclosing test step was aborted
    #[error("Wait interrupted: {0}")]
    Interrupted(String),

    /// The UI inspection layer failed to answer a query
    #[error("Inspection failed: {0}")]
    Inspection(String),
}

fn describe_last(state: &Option<TargetState>) -> String {
    match state {
        None => "target not found".to_string(),
        Some(state) => format!("visible={}, enabled={}", state.visible, state.enabled),
    }
}

impl WaitError {
    /// Whether a caller may reasonably retry the whole step.
    ///
    /// The poller itself never retries on these.
    pub fn is_retryable(&self) -> bool {
        matches!(self, WaitError::Timeout { .. } | WaitError::Inspection(_))
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, WaitError::Timeout { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_message_names_target_and_elapsed() {
        let err = WaitError::Timeout {
            target: "#submit".to_string(),
            elapsed_ms: 512,
            timeout_ms: 500,
            last_state: Some(TargetState {
                visible: true,
                enabled: false,
            }),
        };
        let message = err.to_string();
        assert!(message.contains("#submit"));
        assert!(message.contains("512ms"));
        assert!(message.contains("enabled=false"));
    }

    #[test]
    fn missing_target_is_described() {
        let err = WaitError::Timeout {
            target: "#gone".to_string(),
            elapsed_ms: 10,
            timeout_ms: 10,
            last_state: None,
        };
        assert!(err.to_string().contains("target not found"));
    }

    #[test]
    fn retry_classification() {
        assert!(WaitError::Inspection("socket closed".into()).is_retryable());
        assert!(!WaitError::Configuration("bad".into()).is_retryable());
        assert!(!WaitError::Interrupted("abort".into()).is_retryable());
    }
}
