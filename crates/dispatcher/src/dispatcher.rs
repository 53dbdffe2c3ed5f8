//! Dispatcher - typed subscription and synchronous fan-out

use std::sync::Arc;
use std::thread;

use tracing::{debug, error, instrument, trace, warn};

use contracts::{Context, DispatchStrategy, DispatcherConfig, FailureAction, Handler, Priority};
use observability::metrics::{record_emit, record_handler_failure, record_subscription, EmitStatus};

use crate::error::EmitError;
use crate::metrics::{DispatchMetrics, DispatchMetricsSnapshot};
use crate::registry::Registry;
use crate::subscriber::Subscriber;
use crate::type_key::TypeKey;

/// Builder for creating a Dispatcher
///
/// Options are applied in call order; the last one for a field wins.
#[derive(Debug, Clone, Default)]
pub struct DispatcherBuilder {
    config: DispatcherConfig,
}

impl DispatcherBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a loaded configuration
    pub fn from_config(config: DispatcherConfig) -> Self {
        Self { config }
    }

    pub fn strategy(mut self, strategy: DispatchStrategy) -> Self {
        self.config.strategy = strategy;
        self
    }

    pub fn build(self) -> Dispatcher {
        debug!(strategy = %self.config.strategy, "Dispatcher created");
        Dispatcher {
            inner: Arc::new(Inner {
                registry: Registry::new(),
                strategy: self.config.strategy,
                metrics: DispatchMetrics::new(),
            }),
        }
    }
}

struct Inner {
    registry: Registry,
    strategy: DispatchStrategy,
    metrics: DispatchMetrics,
}

/// Type-indexed event dispatcher.
///
/// Cheap to clone; clones share subscribers, strategy and counters.
///
/// Subscribers are keyed by the *static* type they are registered for, and
/// emissions look up the static type of the emitted value. Emitting a
/// `Box<dyn Trait>` therefore never reaches subscribers of the concrete type
/// inside it, only subscribers of `Box<dyn Trait>` itself.
#[derive(Clone)]
pub struct Dispatcher {
    inner: Arc<Inner>,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("strategy", &self.inner.strategy)
            .field("event_types", &self.inner.registry.key_count())
            .finish()
    }
}

impl Dispatcher {
    /// Dispatcher with default options (stop on first error)
    pub fn new() -> Self {
        DispatcherBuilder::new().build()
    }

    pub fn with_config(config: DispatcherConfig) -> Self {
        DispatcherBuilder::from_config(config).build()
    }

    pub fn builder() -> DispatcherBuilder {
        DispatcherBuilder::new()
    }

    pub fn strategy(&self) -> DispatchStrategy {
        self.inner.strategy
    }

    /// Register `handler` for events of type `T` at [`Priority::NORMAL`].
    pub fn subscribe<T, H>(&self, handler: H)
    where
        T: 'static,
        H: Handler<T>,
    {
        self.subscribe_with_priority(handler, Priority::NORMAL);
    }

    /// Register `handler` for events of type `T`.
    ///
    /// Higher priorities run first; equal priorities run in subscription order.
    /// Registering the same handler twice delivers to it twice. Emissions that
    /// start after this returns see the new subscriber.
    pub fn subscribe_with_priority<T, H>(&self, handler: H, priority: impl Into<Priority>)
    where
        T: 'static,
        H: Handler<T>,
    {
        let priority = priority.into();
        let subscriber = Subscriber::new::<T, H>(handler, priority);
        let key = subscriber.key();
        let handler_name = subscriber.handler_name();

        let subscribers = self.inner.registry.insert(subscriber);
        record_subscription(key.name());

        debug!(
            event = %key,
            %priority,
            handler = handler_name,
            subscribers,
            "Subscriber registered"
        );
    }

    /// Deliver `event` to every subscriber of `T` on the calling thread.
    ///
    /// # Errors
    /// - Stop on first error: the first handler error, unchanged
    /// - Best effort: the only error, or [`EmitError::Joined`] with all of them
    ///
    /// No subscribers is `Ok(())`.
    pub fn emit<T: 'static>(&self, ctx: &Context, event: T) -> Result<(), EmitError> {
        self.emit_ref(ctx, &event)
    }

    /// Same as [`Dispatcher::emit`] without giving up the value.
    pub fn emit_ref<T: 'static>(&self, ctx: &Context, event: &T) -> Result<(), EmitError> {
        let inner = &*self.inner;
        let key = TypeKey::of::<T>();
        inner.metrics.inc_emit_count();

        let Some(subscribers) = inner.registry.get(&key) else {
            inner.metrics.inc_unhandled_count();
            record_emit(key.name(), EmitStatus::Unhandled);
            trace!(event = %key, "No subscribers");
            return Ok(());
        };

        trace!(
            event = %key,
            subscribers = subscribers.len(),
            strategy = %inner.strategy,
            "Dispatching"
        );

        let mut failures = Vec::new();
        for subscriber in subscribers.iter() {
            inner.metrics.inc_invocation_count();

            let Err(e) = subscriber.invoke(ctx, event) else {
                continue;
            };

            inner.metrics.inc_failure_count();
            record_handler_failure(key.name());
            debug!(
                event = %key,
                handler = subscriber.handler_name(),
                priority = %subscriber.priority(),
                error = %e,
                "Handler failed"
            );

            match inner.strategy.on_failure() {
                FailureAction::Stop => {
                    record_emit(key.name(), EmitStatus::Failed);
                    return Err(EmitError::Handler(e));
                }
                FailureAction::Collect => failures.push(e),
            }
        }

        let outcome = EmitError::from_failures(failures);
        let status = if outcome.is_ok() {
            EmitStatus::Delivered
        } else {
            EmitStatus::Failed
        };
        record_emit(key.name(), status);
        outcome
    }

    /// Run [`Dispatcher::emit`] on another thread and return immediately.
    ///
    /// Inside a tokio runtime the work goes to its blocking pool, otherwise to a
    /// new OS thread. The outcome is logged and dropped; callers that need to
    /// know when handlers finished must signal it from the handlers.
    pub fn emit_async<T: Send + 'static>(&self, ctx: Context, event: T) {
        self.inner.metrics.inc_async_emit_count();

        let dispatcher = self.clone();
        let job = move || dispatcher.emit_detached(&ctx, event);

        match tokio::runtime::Handle::try_current() {
            Ok(runtime) => {
                runtime.spawn_blocking(job);
            }
            Err(_) => {
                let spawned = thread::Builder::new()
                    .name("signal-bus-emit".to_string())
                    .spawn(job);
                if let Err(e) = spawned {
                    error!(
                        event = std::any::type_name::<T>(),
                        error = %e,
                        "Failed to spawn async emit thread"
                    );
                }
            }
        }
    }

    #[instrument(
        name = "dispatcher_emit_async",
        skip_all,
        fields(event = std::any::type_name::<T>())
    )]
    fn emit_detached<T: 'static>(&self, ctx: &Context, event: T) {
        if let Err(e) = self.emit_ref(ctx, &event) {
            warn!(failures = e.failure_count(), error = %e, "Async emit failed");
        }
    }

    /// Number of subscribers currently registered for `T`.
    pub fn subscriber_count<T: 'static>(&self) -> usize {
        self.inner.registry.len(&TypeKey::of::<T>())
    }

    pub fn has_subscribers<T: 'static>(&self) -> bool {
        self.subscriber_count::<T>() > 0
    }

    pub fn metrics(&self) -> DispatchMetricsSnapshot {
        self.inner.metrics.snapshot()
    }
}
