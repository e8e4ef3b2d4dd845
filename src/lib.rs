//! ReadyWait library
//!
//! Configuration loading plus re-exports of the wait primitives, so test
//! code can depend on a single crate.

pub mod config;

pub use config::{load_config, Config, LoadedConfig};
pub use wait_primitives::{
    log_test_execution, wait_until_ready, wait_until_ready_with_report, PollState, Poller,
    PollerConfig, ScriptedInspector, StepCtx, TargetInspector, TargetScript, TargetState,
    TestTrace, WaitError, WaitReport, WaitRequest,
};
