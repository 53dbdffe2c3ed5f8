//! Process-wide default dispatcher
//!
//! The free functions here target a single shared [`Dispatcher`] created on
//! first use with default options and never torn down. Tests that need
//! isolation should construct their own dispatcher instead of sharing this one.

use std::sync::OnceLock;

use contracts::{Context, Handler, Priority};

use crate::dispatcher::Dispatcher;
use crate::error::EmitError;

static DEFAULT: OnceLock<Dispatcher> = OnceLock::new();

/// The shared dispatcher (stop on first error).
pub fn default_dispatcher() -> &'static Dispatcher {
    DEFAULT.get_or_init(Dispatcher::new)
}

/// [`Dispatcher::subscribe`] on the default dispatcher.
pub fn subscribe<T, H>(handler: H)
where
    T: 'static,
    H: Handler<T>,
{
    default_dispatcher().subscribe(handler);
}

/// [`Dispatcher::subscribe_with_priority`] on the default dispatcher.
pub fn subscribe_with_priority<T, H>(handler: H, priority: impl Into<Priority>)
where
    T: 'static,
    H: Handler<T>,
{
    default_dispatcher().subscribe_with_priority(handler, priority);
}

/// [`Dispatcher::emit`] on the default dispatcher.
pub fn emit<T: 'static>(ctx: &Context, event: T) -> Result<(), EmitError> {
    default_dispatcher().emit(ctx, event)
}

/// [`Dispatcher::emit_async`] on the default dispatcher.
pub fn emit_async<T: Send + 'static>(ctx: Context, event: T) {
    default_dispatcher().emit_async(ctx, event);
}
