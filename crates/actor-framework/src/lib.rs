//! # Actor Framework
//!
//! In-memory resource stores where each resource type lives inside its own Tokio task.
//! Nothing else touches the data; callers hold a [`ResourceClient`] and exchange messages.
//!
//! - [`ActorEntity`]: what a resource is, how it is built and updated, when it may be deleted.
//! - [`ResourceActor`]: the task that owns the ordered store and hands out ids.
//! - [`ResourceClient`] and [`ActorClient`]: the calling side, generic and per resource.
//!
//! An actor receives its dependencies in `run`, so actors can be constructed in any order
//! and wired afterwards:
//!
//! ```rust,ignore
//! let (customers, customer_client) = ResourceActor::<Customer>::new(32);
//! let (orders, order_client) = ResourceActor::<Order>::new(32);
//!
//! tokio::spawn(customers.run(()));
//! tokio::spawn(orders.run(CustomerClient::new(customer_client.clone())));
//! ```
//!
//! An actor exits when its last client is dropped. If two actors held clients to each other
//! through their contexts, neither would ever exit, so dependencies must form a DAG.
//!
//! Test doubles live in [`mock`].

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;
pub mod tracing;

pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use message::{ResourceRequest, Response};
