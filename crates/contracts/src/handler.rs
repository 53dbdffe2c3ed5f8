//! Handler trait - the subscriber side of the bus.

use crate::Context;

/// Error returned by a handler. Opaque to the dispatcher.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A typed event handler.
///
/// Implemented for any `Fn(&Context, &T) -> Result<(), HandlerError>` closure,
/// so most callers never name this trait.
pub trait Handler<T>: Send + Sync + 'static {
    /// Handle one event.
    ///
    /// # Errors
    /// Any error is reported to the emitter according to the dispatch strategy.
    fn handle(&self, ctx: &Context, event: &T) -> Result<(), HandlerError>;
}

impl<T, F> Handler<T> for F
where
    F: Fn(&Context, &T) -> Result<(), HandlerError> + Send + Sync + 'static,
{
    fn handle(&self, ctx: &Context, event: &T) -> Result<(), HandlerError> {
        self(ctx, event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Rejecting;

    impl Handler<u32> for Rejecting {
        fn handle(&self, _ctx: &Context, event: &u32) -> Result<(), HandlerError> {
            Err(format!("rejected {event}").into())
        }
    }

    fn call<T, H: Handler<T>>(h: &H, event: T) -> Result<(), HandlerError> {
        h.handle(&Context::background(), &event)
    }

    #[test]
    fn test_closure_is_handler() {
        let h = |_: &Context, e: &String| -> Result<(), HandlerError> {
            assert_eq!(e, "hi");
            Ok(())
        };
        assert!(call(&h, "hi".to_string()).is_ok());
    }

    #[test]
    fn test_struct_handler() {
        let err = call(&Rejecting, 7).unwrap_err();
        assert_eq!(err.to_string(), "rejected 7");
    }
}
