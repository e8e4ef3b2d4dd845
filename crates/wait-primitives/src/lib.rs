//! Wait primitives for end-to-end browser tests
//!
//! This crate provides:
//! - A condition poller that waits for a target to be visible and enabled
//! - The `TargetInspector` seam to the UI inspection layer, plus a scripted
//!   inspector for tests and simulation
//! - Requirement-traceability logging for test steps

pub mod errors;
mod inspector;
mod steps;
pub mod types;
mod waiting;

pub use errors::*;
pub use inspector::*;
pub use steps::*;
pub use types::*;
pub use waiting::*;
