//! Subscriber record and type-erased handler storage

use std::any::Any;
use std::sync::Arc;

use contracts::{Context, Handler, HandlerError, Priority};

use crate::type_key::TypeKey;

/// Concrete box the registry erases to `dyn Any`.
struct Typed<T: 'static>(Box<dyn Handler<T>>);

/// One registered handler.
///
/// Immutable once built; the registry only reorders records, never edits them.
/// Cloning shares the handler.
#[derive(Clone)]
pub struct Subscriber {
    handler: Arc<dyn Any + Send + Sync>,
    priority: Priority,
    key: TypeKey,
    handler_name: &'static str,
}

impl Subscriber {
    pub fn new<T, H>(handler: H, priority: Priority) -> Self
    where
        T: 'static,
        H: Handler<T>,
    {
        Self {
            handler: Arc::new(Typed::<T>(Box::new(handler))),
            priority,
            key: TypeKey::of::<T>(),
            handler_name: std::any::type_name::<H>(),
        }
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    /// Key this record was registered under.
    pub fn key(&self) -> TypeKey {
        self.key
    }

    pub fn handler_name(&self) -> &'static str {
        self.handler_name
    }

    /// Invoke the handler with a payload of the registered type.
    ///
    /// # Panics
    /// If `T` is not the type the record was created for. Records are only ever
    /// stored under `TypeKey::of::<T>()` and looked up with the same key, so this
    /// indicates a broken registry rather than a caller error.
    pub fn invoke<T: 'static>(&self, ctx: &Context, event: &T) -> Result<(), HandlerError> {
        let Some(typed) = self.handler.downcast_ref::<Typed<T>>() else {
            panic!(
                "subscriber registered for `{}` invoked with `{}`",
                self.key,
                std::any::type_name::<T>()
            );
        };
        typed.0.handle(ctx, event)
    }
}

impl std::fmt::Debug for Subscriber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscriber")
            .field("key", &self.key)
            .field("priority", &self.priority)
            .field("handler", &self.handler_name)
            .finish()
    }
}
