//! Plain data: stored records, their identifiers and the parameter payloads that create and
//! update them. Nothing here talks to an actor.

pub mod customer;
pub mod order;
pub mod params;
pub mod validation;

pub use customer::*;
pub use order::*;
pub use params::*;
pub use validation::*;
