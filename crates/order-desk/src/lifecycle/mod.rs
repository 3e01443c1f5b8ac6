//! # System Lifecycle
//!
//! [`OrderSystem`] creates the actors, injects their contexts when it starts them and
//! shuts them down by closing their channels.
//!
//! ## Dependency graph
//!
//! ```text
//! Order actor ──context──▶ CustomerClient ──▶ Customer actor
//! ```
//!
//! The graph is acyclic, so dropping the clients is enough to stop everything: the Order
//! actor exits first and releases the customer client held in its context, then the
//! Customer actor exits. The customer deletion guard runs in
//! [`CustomerClient`](crate::clients::CustomerClient) with an order client passed in, which
//! keeps the graph that way.

pub mod order_system;

pub use order_system::*;
