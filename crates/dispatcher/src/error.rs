//! Emission error types

use std::fmt;

use contracts::HandlerError;
use thiserror::Error;

/// Failure outcome of a single emission.
///
/// "No subscribers" is not an error; `emit` returns `Ok(())` for it.
#[derive(Debug, Error)]
pub enum EmitError {
    /// A single handler failed. Under fail-fast this is the first failure,
    /// under best-effort the only one. The handler's error is carried as-is.
    #[error(transparent)]
    Handler(HandlerError),

    /// Best-effort emission where two or more handlers failed
    #[error(transparent)]
    Joined(JoinedError),
}

impl EmitError {
    /// Fold collected failures into an outcome.
    ///
    /// Zero failures is success, one is returned unchanged, more are joined.
    pub fn from_failures(mut errors: Vec<HandlerError>) -> Result<(), Self> {
        match errors.len() {
            0 => Ok(()),
            1 => Err(Self::Handler(errors.remove(0))),
            _ => Err(Self::Joined(JoinedError { errors })),
        }
    }

    /// All underlying handler errors, in invocation order.
    pub fn handler_errors(&self) -> &[HandlerError] {
        match self {
            Self::Handler(e) => std::slice::from_ref(e),
            Self::Joined(j) => j.errors(),
        }
    }

    pub fn into_handler_errors(self) -> Vec<HandlerError> {
        match self {
            Self::Handler(e) => vec![e],
            Self::Joined(j) => j.into_errors(),
        }
    }

    /// Number of handlers that failed.
    pub fn failure_count(&self) -> usize {
        self.handler_errors().len()
    }
}

/// Every handler failure of one best-effort emission.
///
/// Displays one message per line, in invocation order.
#[derive(Debug)]
pub struct JoinedError {
    errors: Vec<HandlerError>,
}

impl JoinedError {
    pub fn errors(&self) -> &[HandlerError] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<HandlerError> {
        self.errors
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &HandlerError> {
        self.errors.iter()
    }
}

impl fmt::Display for JoinedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, e) in self.errors.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{e}")?;
        }
        Ok(())
    }
}

impl std::error::Error for JoinedError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.errors
            .first()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}
