//! # Order Desk
//!
//! A small order-management server: customers, the orders they place, validation of every
//! order write and a rule that a customer with orders cannot be deleted.
//!
//! - [`model`]: records, ids and the allow-listed parameter payloads
//! - [`customer_actor`], [`order_actor`]: resource actors and their rules
//! - [`clients`]: typed clients over the actors, including the guarded customer delete
//! - [`lifecycle`]: [`OrderSystem`](lifecycle::OrderSystem) starts and stops the actors
//! - [`web`]: controllers, views and the axum router
//! - [`config`], [`server`]: what the binary needs to run
//!
//! See [`actor_framework::mock`] for testing clients without spawning actors.

pub mod clients;
pub mod config;
pub mod customer_actor;
pub mod lifecycle;
pub mod model;
pub mod order_actor;
pub mod server;
pub mod web;
