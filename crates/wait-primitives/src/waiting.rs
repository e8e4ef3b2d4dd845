//! Condition poller - waits for a target to become visible and enabled

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::{sleep, Instant};
use tracing::{debug, info, warn};

use crate::{
    errors::WaitError,
    inspector::TargetInspector,
    types::{
        PollState, StepCtx, TargetState, WaitReport, WaitRequest, DEFAULT_POLL_INTERVAL_MS,
        DEFAULT_TIMEOUT_MS, RECOMMENDED_MAX_POLL_INTERVAL_MS,
    },
};

/// Tunables for the condition poller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PollerConfig {
    /// Delay between two polls (milliseconds)
    pub poll_interval_ms: u64,

    /// Timeout used by requests built through [`Poller::request`] (milliseconds)
    pub default_timeout_ms: u64,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            default_timeout_ms: DEFAULT_TIMEOUT_MS as u64,
        }
    }
}

impl PollerConfig {
    pub fn validate(&self) -> Result<(), WaitError> {
        if self.poll_interval_ms == 0 {
            return Err(WaitError::Configuration(
                "poll interval must be positive".to_string(),
            ));
        }
        if self.default_timeout_ms == 0 {
            return Err(WaitError::Configuration(
                "default timeout must be positive".to_string(),
            ));
        }
        if self.default_timeout_ms > i64::MAX as u64 {
            return Err(WaitError::Configuration(format!(
                "default timeout {}ms is out of range",
                self.default_timeout_ms
            )));
        }
        if self.poll_interval_ms > RECOMMENDED_MAX_POLL_INTERVAL_MS {
            warn!(
                poll_interval_ms = self.poll_interval_ms,
                "poll interval above {}ms delays every wait", RECOMMENDED_MAX_POLL_INTERVAL_MS
            );
        }
        Ok(())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

/// Wait until `request.target` is visible and enabled, with the default poll interval.
///
/// Fails with [`WaitError::Configuration`] before touching the inspector if
/// the request is malformed, and with [`WaitError::Timeout`] once the
/// deadline passes without a ready poll.
pub async fn wait_until_ready(
    inspector: &dyn TargetInspector,
    ctx: &StepCtx,
    request: &WaitRequest,
) -> Result<(), WaitError> {
    wait_until_ready_with_report(inspector, ctx, request, &PollerConfig::default())
        .await
        .map(|_| ())
}

/// Same as [`wait_until_ready`] but with explicit tunables, returning what happened.
pub async fn wait_until_ready_with_report(
    inspector: &dyn TargetInspector,
    ctx: &StepCtx,
    request: &WaitRequest,
    config: &PollerConfig,
) -> Result<WaitReport, WaitError> {
    let timeout_ms = request.validate()?;
    config.validate()?;

    let started_at = Utc::now();
    let start = Instant::now();
    let deadline = start + Duration::from_millis(timeout_ms);
    let interval = config.poll_interval();

    info!(
        step_id = %ctx.step_id,
        target_id = %request.target,
        timeout_ms,
        "Waiting for target to become ready"
    );

    let mut state = PollState::Pending;
    let mut polls: u64 = 0;
    let mut last_seen: Option<TargetState> = None;

    // A single query may not push the failure past one interval beyond the deadline.
    let query_deadline = deadline + interval;

    loop {
        if ctx.is_cancelled() {
            return Err(interrupted(ctx, request, polls));
        }

        let query = tokio::time::timeout_at(query_deadline, inspector.inspect(&request.target));
        let observed = tokio::select! {
            _ = ctx.cancel_token.cancelled() => {
                return Err(interrupted(ctx, request, polls));
            }
            answered = query => match answered {
                Ok(result) => result.map_err(|err| {
                    warn!(target_id = %request.target, polls, "inspection failed: {}", err);
                    err
                })?,
                Err(_) => {
                    let elapsed_ms = start.elapsed().as_millis() as u64;
                    warn!(
                        step_id = %ctx.step_id,
                        target_id = %request.target,
                        polls,
                        elapsed_ms,
                        "inspection still pending at deadline"
                    );
                    return Err(WaitError::Timeout {
                        target: request.target.clone(),
                        elapsed_ms,
                        timeout_ms,
                        last_state: last_seen,
                    });
                }
            },
        };
        polls = polls.saturating_add(1);
        last_seen = observed;

        let now = Instant::now();
        let ready = observed.map_or(false, |s| s.is_ready());
        state = state.advance(ready, now >= deadline);

        match state {
            PollState::Satisfied => {
                let elapsed_ms = now.duration_since(start).as_millis() as u64;
                info!(
                    step_id = %ctx.step_id,
                    target_id = %request.target,
                    polls,
                    elapsed_ms,
                    "Target ready"
                );
                return Ok(WaitReport {
                    target: request.target.clone(),
                    polls,
                    elapsed_ms,
                    started_at,
                    state: observed.unwrap_or_else(TargetState::ready),
                    step_id: ctx.step_id.clone(),
                });
            }
            PollState::TimedOut => {
                let elapsed_ms = now.duration_since(start).as_millis() as u64;
                warn!(
                    step_id = %ctx.step_id,
                    target_id = %request.target,
                    polls,
                    elapsed_ms,
                    "Wait timed out"
                );
                return Err(WaitError::Timeout {
                    target: request.target.clone(),
                    elapsed_ms,
                    timeout_ms,
                    last_state: observed,
                });
            }
            PollState::Pending => {
                debug!(target_id = %request.target, polls, state = ?observed, "target not ready");
            }
        }

        let pause = interval.min(deadline.saturating_duration_since(now));
        tokio::select! {
            _ = ctx.cancel_token.cancelled() => {
                return Err(interrupted(ctx, request, polls));
            }
            _ = sleep(pause) => {}
        }
    }
}

fn interrupted(ctx: &StepCtx, request: &WaitRequest, polls: u64) -> WaitError {
    warn!(step_id = %ctx.step_id, target_id = %request.target, polls, "wait aborted");
    WaitError::Interrupted(format!(
        "step {} aborted while waiting for '{}'",
        ctx.step_id, request.target
    ))
}

/// Poller bound to an inspector and a set of tunables.
///
/// Holds no per-call state; each wait is independent.
pub struct Poller<I> {
    inspector: I,
    config: PollerConfig,
}

impl<I: TargetInspector> Poller<I> {
    pub fn new(inspector: I, config: PollerConfig) -> Self {
        Self { inspector, config }
    }

    pub fn config(&self) -> &PollerConfig {
        &self.config
    }

    pub fn inspector(&self) -> &I {
        &self.inspector
    }

    /// Build a request using the configured default timeout
    pub fn request(&self, target: impl Into<String>) -> WaitRequest {
        WaitRequest::new(target).with_timeout_ms(self.config.default_timeout_ms as i64)
    }

    pub async fn wait_until_ready(
        &self,
        ctx: &StepCtx,
        request: &WaitRequest,
    ) -> Result<WaitReport, WaitError> {
        wait_until_ready_with_report(&self.inspector, ctx, request, &self.config).await
    }
}
