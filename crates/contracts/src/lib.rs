//! # Contracts
//!
//! Shared vocabulary of the signal bus. Every other crate in the workspace
//! depends on this one; it depends on none of them.
//!
//! ## Delivery model
//! - Handlers are keyed by the static payload type they are registered for
//! - Emission runs handlers synchronously, highest [`Priority`] first
//! - [`DispatchStrategy`] decides whether a failing handler stops the chain

mod config;
mod context;
mod error;
mod handler;
mod priority;
mod strategy;

pub use config::*;
pub use context::Context;
pub use error::*;
pub use handler::{Handler, HandlerError};
pub use priority::Priority;
pub use strategy::{DispatchStrategy, FailureAction};
