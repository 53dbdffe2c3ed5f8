//! Emission context handed to every handler.

use tokio_util::sync::CancellationToken;

/// Per-emission context.
///
/// Carries a cancellation token through to handlers. The dispatcher never
/// checks it; honouring cancellation is up to each handler.
#[derive(Debug, Clone, Default)]
pub struct Context {
    token: CancellationToken,
}

impl Context {
    /// Context that is never cancelled unless [`Context::cancel`] is called.
    pub fn background() -> Self {
        Self::default()
    }

    /// Wrap an existing token, e.g. a runtime-wide shutdown token.
    pub fn from_token(token: CancellationToken) -> Self {
        Self { token }
    }

    /// Derive a child context. Cancelling the parent cancels the child, not the
    /// other way round.
    pub fn child(&self) -> Self {
        Self {
            token: self.token.child_token(),
        }
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    pub fn token(&self) -> &CancellationToken {
        &self.token
    }
}
