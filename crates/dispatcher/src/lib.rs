//! # Dispatcher
//!
//! In-process, type-indexed publish/subscribe.
//!
//! Responsibilities:
//! - Keep a concurrent registry of handlers per payload type, sorted by priority
//! - Deliver an emitted value to every handler of its static type, synchronously
//!   or on a detached thread
//! - Fold handler failures according to the configured [`DispatchStrategy`]
//!
//! ```
//! use dispatcher::{Context, Dispatcher, HandlerError, Priority};
//!
//! struct UserCreated {
//!     name: String,
//! }
//!
//! let bus = Dispatcher::new();
//! bus.subscribe_with_priority(
//!     |_: &Context, e: &UserCreated| -> Result<(), HandlerError> {
//!         println!("welcome {}", e.name);
//!         Ok(())
//!     },
//!     Priority::HIGH,
//! );
//!
//! bus.emit(&Context::background(), UserCreated { name: "ada".into() }).unwrap();
//! ```

pub mod dispatcher;
pub mod error;
pub mod global;
pub mod metrics;
pub mod registry;
pub mod subscriber;
pub mod type_key;

pub use contracts::{Context, DispatchStrategy, DispatcherConfig, Handler, HandlerError, Priority};
pub use dispatcher::{Dispatcher, DispatcherBuilder};
pub use error::{EmitError, JoinedError};
pub use global::{default_dispatcher, emit, emit_async, subscribe, subscribe_with_priority};
pub use metrics::{DispatchMetrics, DispatchMetricsSnapshot};
pub use registry::Registry;
pub use subscriber::Subscriber;
pub use type_key::TypeKey;
