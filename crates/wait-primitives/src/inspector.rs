//! UI inspection seam used by the poller

use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::time::Instant;
use tracing::trace;

use crate::{errors::WaitError, types::TargetState};

/// Read-only view of the system under test
///
/// Implementations resolve a target identifier to zero or one live element
/// and report its visibility and enabled state. They must not mutate
/// application state.
#[async_trait]
pub trait TargetInspector: Send + Sync {
    /// Query the target once. `Ok(None)` means it did not resolve.
    async fn inspect(&self, target: &str) -> Result<Option<TargetState>, WaitError>;
}

/// Timeline for one scripted target, relative to inspector creation
#[derive(Debug, Clone, Default)]
pub struct TargetScript {
    /// When the target starts resolving
    pub present_after: Duration,

    /// When it becomes visible; `None` means never
    pub visible_after: Option<Duration>,

    /// When it becomes enabled; `None` means never
    pub enabled_after: Option<Duration>,

    /// Fail every query with this message
    pub failure: Option<String>,
}

impl TargetScript {
    /// Visible and enabled from the start
    pub fn ready() -> Self {
        Self::ready_after(Duration::ZERO)
    }

    /// Appears visible and enabled at `after`
    pub fn ready_after(after: Duration) -> Self {
        Self {
            present_after: after,
            visible_after: Some(after),
            enabled_after: Some(after),
            failure: None,
        }
    }

    /// Present and visible but never enabled
    pub fn visible_but_disabled() -> Self {
        Self {
            present_after: Duration::ZERO,
            visible_after: Some(Duration::ZERO),
            enabled_after: None,
            failure: None,
        }
    }

    /// Present but hidden and disabled forever
    pub fn never_ready() -> Self {
        Self::default()
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
            ..Self::default()
        }
    }

    fn state_at(&self, elapsed: Duration) -> Option<TargetState> {
        if elapsed < self.present_after {
            return None;
        }
        let reached = |at: Option<Duration>| at.map_or(false, |at| elapsed >= at);
        Some(TargetState {
            visible: reached(self.visible_after),
            enabled: reached(self.enabled_after),
        })
    }
}

/// Deterministic inspector driven by per-target timelines
///
/// Time is measured on the tokio clock, so tests running with a paused
/// runtime see exact offsets. Unknown targets never resolve.
pub struct ScriptedInspector {
    origin: Instant,
    scripts: DashMap<String, TargetScript>,
    queries: AtomicU64,
}

impl ScriptedInspector {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            scripts: DashMap::new(),
            queries: AtomicU64::new(0),
        }
    }

    pub fn with_target(self, target: impl Into<String>, script: TargetScript) -> Self {
        self.scripts.insert(target.into(), script);
        self
    }

    /// Replace the timeline of a target
    pub fn set_script(&self, target: impl Into<String>, script: TargetScript) {
        self.scripts.insert(target.into(), script);
    }

    /// Number of `inspect` calls served so far
    pub fn query_count(&self) -> u64 {
        self.queries.load(Ordering::SeqCst)
    }
}

impl Default for ScriptedInspector {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TargetInspector for ScriptedInspector {
    async fn inspect(&self, target: &str) -> Result<Option<TargetState>, WaitError> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        let Some(script) = self.scripts.get(target) else {
            trace!(target_id = target, "scripted target unknown");
            return Ok(None);
        };
        if let Some(message) = &script.failure {
            return Err(WaitError::Inspection(message.clone()));
        }
        Ok(script.state_at(self.origin.elapsed()))
    }
}
