//! Reusable test steps
//!
//! Plain functions meant to be imported by test code; nothing is registered
//! globally.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{info, info_span, Span};

use crate::errors::WaitError;

/// Requirement traceability for a single test execution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestTrace {
    /// Requirement identifier, e.g. `REQ-LOGIN-001`
    pub requirement_id: String,

    /// Test case identifier, e.g. `TC-LOGIN-001`
    pub test_id: String,
}

impl TestTrace {
    pub fn new(
        requirement_id: impl Into<String>,
        test_id: impl Into<String>,
    ) -> Result<Self, WaitError> {
        let requirement_id = requirement_id.into();
        let test_id = test_id.into();
        if requirement_id.trim().is_empty() {
            return Err(WaitError::Configuration(
                "requirement id must not be empty".to_string(),
            ));
        }
        if test_id.trim().is_empty() {
            return Err(WaitError::Configuration(
                "test id must not be empty".to_string(),
            ));
        }
        Ok(Self {
            requirement_id,
            test_id,
        })
    }

    /// Span carrying both identifiers, for instrumenting the rest of the test
    pub fn span(&self) -> Span {
        info_span!(
            "test_execution",
            requirement_id = %self.requirement_id,
            test_id = %self.test_id
        )
    }
}

impl fmt::Display for TestTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}][{}]", self.requirement_id, self.test_id)
    }
}

/// Log which requirement and test case are about to run
pub fn log_test_execution(
    requirement_id: impl Into<String>,
    test_id: impl Into<String>,
) -> Result<TestTrace, WaitError> {
    let trace = TestTrace::new(requirement_id, test_id)?;
    info!(
        requirement_id = %trace.requirement_id,
        test_id = %trace.test_id,
        "Executing Test: {}",
        trace
    );
    Ok(trace)
}
