//! # Observability & Tracing
//!
//! [`setup_tracing`] installs the process-wide subscriber. Actors log with structured fields
//! (`entity`, `operation`, `id`, `size`) and clients open spans through `#[instrument]`:
//!
//! ```text
//! INFO create_order: Created entity="Order" id=3 size=3
//! ```
//!
//! `RUST_LOG` wins over the configured default, e.g. `RUST_LOG=debug` shows full payloads
//! and `RUST_LOG=actor_framework=debug,info` narrows it to the store.

use tracing_subscriber::EnvFilter;

/// Installs a compact fmt subscriber filtered by `RUST_LOG`, or by `default_filter` when the
/// variable is unset or unparsable.
///
/// Safe to call more than once; later calls are ignored.
pub fn setup_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false) // `entity` already says where a line comes from
        .compact()
        .try_init();
}
