//! What a resource has to provide so a `ResourceActor` can store it.
//!
//! # Write-time validation
//! Entities validate themselves inside the hooks. `from_create_params` either returns a fully
//! valid entity or an error; nothing is stored on error. `on_update` runs against a *copy* of the
//! stored entity, and the actor only commits that copy when the hook returns `Ok`, so a rejected
//! update never leaves a half-applied record behind.

use async_trait::async_trait;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// A resource owned by a [`ResourceActor`](crate::ResourceActor).
///
/// Hooks are async so they may call other actors, as an order does to resolve its customer.
/// Whatever they need arrives as `Context`, handed to `run()`.
#[async_trait]
pub trait ActorEntity: Clone + Send + Sync + 'static {
    /// Built from the actor's `u32` counter; `Ord` gives listings their id order.
    type Id: Eq + Ord + Hash + Clone + Send + Sync + Display + Debug + From<u32>;

    /// Create payload, as submitted.
    type Create: Send + Sync + Debug;

    type Update: Send + Sync + Debug;

    /// `()` when the hooks need nothing.
    type Context: Send + Sync;

    /// One enum per resource, shared by every operation.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Construct and validate the full entity from the assigned ID and the payload.
    async fn from_create_params(
        id: Self::Id,
        params: Self::Create,
        ctx: &Self::Context,
    ) -> Result<Self, Self::Error>;

    /// Apply an update. Called on a copy; the actor commits it only on `Ok`.
    async fn on_update(&mut self, update: Self::Update, ctx: &Self::Context)
        -> Result<(), Self::Error>;

    /// Runs just before removal; an `Err` vetoes the delete.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }
}
