//! Core data types for wait primitives

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use crate::errors::WaitError;

/// Default wait timeout in milliseconds
pub const DEFAULT_TIMEOUT_MS: i64 = 10_000;

/// Default delay between two polls in milliseconds
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 100;

/// Poll intervals above this add noticeable latency to every wait
pub const RECOMMENDED_MAX_POLL_INTERVAL_MS: u64 = 200;

/// Context of the test step a wait runs in
///
/// Cancelling the token aborts any wait running under this step.
#[derive(Clone, Debug)]
pub struct StepCtx {
    /// Unique identifier for this step
    pub step_id: String,

    /// Cancellation token for cooperative cancellation
    pub cancel_token: CancellationToken,
}

impl StepCtx {
    pub fn new(cancel_token: CancellationToken) -> Self {
        Self {
            step_id: uuid::Uuid::new_v4().to_string(),
            cancel_token,
        }
    }

    /// Check if the step has been aborted
    pub fn is_cancelled(&self) -> bool {
        self.cancel_token.is_cancelled()
    }
}

impl Default for StepCtx {
    fn default() -> Self {
        Self::new(CancellationToken::new())
    }
}

/// A single request to wait for a target to become ready
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaitRequest {
    /// Opaque identifier resolved by the inspection layer
    pub target: String,

    /// Timeout in milliseconds; must be positive
    pub timeout_ms: i64,
}

impl WaitRequest {
    /// Request with the default 10s timeout
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }

    pub fn with_timeout_ms(mut self, timeout_ms: i64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Check the request and return the timeout as an unsigned value
    pub fn validate(&self) -> Result<u64, WaitError> {
        if self.target.trim().is_empty() {
            return Err(WaitError::Configuration(
                "target identifier must not be empty".to_string(),
            ));
        }
        if self.timeout_ms <= 0 {
            return Err(WaitError::Configuration(format!(
                "timeout must be a positive number of milliseconds, got {}",
                self.timeout_ms
            )));
        }
        Ok(self.timeout_ms as u64)
    }
}

/// Snapshot of a resolved target taken by one poll
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetState {
    pub visible: bool,
    pub enabled: bool,
}

impl TargetState {
    pub fn ready() -> Self {
        Self {
            visible: true,
            enabled: true,
        }
    }

    /// Visible alone is not enough
    pub fn is_ready(&self) -> bool {
        self.visible && self.enabled
    }
}

/// Lifecycle of a single wait
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PollState {
    Pending,
    Satisfied,
    TimedOut,
}

impl PollState {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, PollState::Pending)
    }

    /// Advance from `Pending` given the outcome of one poll.
    ///
    /// Terminal states never change.
    pub fn advance(self, ready: bool, deadline_reached: bool) -> PollState {
        match self {
            PollState::Pending if ready => PollState::Satisfied,
            PollState::Pending if deadline_reached => PollState::TimedOut,
            other => other,
        }
    }
}

impl Default for PollState {
    fn default() -> Self {
        PollState::Pending
    }
}

/// Report of a successful wait
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaitReport {
    /// Target that became ready
    pub target: String,

    /// Number of inspector queries issued
    pub polls: u64,

    /// Time from start until the satisfying poll
    pub elapsed_ms: u64,

    /// When the wait started
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub started_at: DateTime<Utc>,

    /// State observed on the satisfying poll
    pub state: TargetState,

    /// Step the wait ran under
    pub step_id: String,
}
