//! # Customer Actor
//!
//! The Customer resource actor. It has no dependencies (`Context = ()`); the rule that a
//! customer with orders cannot be deleted needs the order store, so it is enforced by
//! [`CustomerClient::delete_unless_ordered`](crate::clients::CustomerClient::delete_unless_ordered)
//! instead of here.
//!
//! ```rust
//! use actor_framework::ActorClient;
//! use order_desk::customer_actor;
//! use order_desk::model::CustomerParams;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (actor, client) = customer_actor::new(32);
//!     tokio::spawn(actor.run(()));
//!
//!     let params = CustomerParams {
//!         first_name: Some("Ada".into()),
//!         last_name: Some("Lovelace".into()),
//!         phone: None,
//!         email: Some("ada@example.com".into()),
//!     };
//!     let id = client.create_customer(params).await?;
//!     assert_eq!(client.list().await?.len(), 1);
//!     # let _ = id;
//!     Ok(())
//! }
//! ```

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::CustomerClient;
use crate::model::Customer;
use actor_framework::ResourceActor;

/// Creates a new Customer actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Customer>, CustomerClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (actor, CustomerClient::new(generic_client))
}
