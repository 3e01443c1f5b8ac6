//! # HTTP Layer
//!
//! Handlers are thin: extract the id, payload and format, call a controller method and
//! write the [`Outcome`] it returns.
//!
//! - [`orders`], [`customers`] - controllers over the resource clients
//! - [`request`] - [`Format`] negotiation and the allow-listed [`Submission`] extractor
//! - [`outcome`] - the [`Page`] a request renders or where it redirects
//! - [`flash`] - one-shot messages in the `flash` cookie
//! - [`views`] - HTML
//! - [`routes`] - the route table, method override and request tracing

pub mod customers;
pub mod error;
pub mod flash;
pub mod orders;
pub mod outcome;
pub mod request;
pub mod routes;
pub mod views;

pub use error::WebError;
pub use flash::{Flash, FlashKind};
pub use outcome::{Outcome, Page};
pub use request::{Format, Submission};
pub use routes::{router, AppState};
