//! Typed wrappers around the generic resource clients. Import
//! [`ActorClient`](actor_framework::ActorClient) to get `get`, `list` and `delete`.

pub mod customer_client;
pub mod order_client;

pub use customer_client::CustomerClient;
pub use order_client::OrderClient;
