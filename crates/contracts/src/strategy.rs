//! Dispatch strategy policy.

use std::fmt;

use serde::{Deserialize, Serialize};

/// How an emission treats a failing handler.
///
/// Fixed when the dispatcher is constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatchStrategy {
    /// Return the first handler error; later handlers are skipped.
    #[default]
    #[serde(alias = "fail_fast")]
    StopOnFirstError,
    /// Run every handler and report all failures together.
    BestEffort,
}

/// What the dispatch loop does right after a handler failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureAction {
    /// Abort the chain and return this error.
    Stop,
    /// Record the error and keep going.
    Collect,
}

impl DispatchStrategy {
    pub fn on_failure(self) -> FailureAction {
        match self {
            Self::StopOnFirstError => FailureAction::Stop,
            Self::BestEffort => FailureAction::Collect,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::StopOnFirstError => "stop_on_first_error",
            Self::BestEffort => "best_effort",
        }
    }
}

impl fmt::Display for DispatchStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
