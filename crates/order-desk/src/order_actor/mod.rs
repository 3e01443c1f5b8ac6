//! # Order Actor
//!
//! The Order resource actor. Its context is a [`CustomerClient`](crate::clients::CustomerClient), which validation uses to
//! check that `customer_id` names a stored customer.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](actor_framework::ActorEntity) implementation for [`Order`]
//! - [`validation`] - the order rules
//! - [`error`] - [`OrderError`]
//!
//! Destroying an order is unconditional.

pub mod entity;
pub mod error;
pub mod validation;

pub use error::*;

use crate::clients::OrderClient;
use crate::model::Order;
use actor_framework::ResourceActor;

/// Creates a new Order actor and its client. Start it with `actor.run(customer_client)`.
pub fn new(buffer_size: usize) -> (ResourceActor<Order>, OrderClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (actor, OrderClient::new(generic_client))
}
