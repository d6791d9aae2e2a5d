//! # Observability & Tracing
//!
//! [`setup_tracing`] installs the `tracing` subscriber used by the binary.
//!
//! Output is compact, hides module paths and goes to stderr, so it never
//! interleaves with the storefront rendering on stdout. Verbosity follows
//! `RUST_LOG`; without it only warnings and errors are shown.
//!
//! ```bash
//! RUST_LOG=info storefront browse     # catalog and order outcomes
//! RUST_LOG=debug storefront browse    # request URLs and payloads
//! RUST_LOG=storefront::api=debug storefront load-test
//! ```
//!
//! With `RUST_LOG=info` a session looks like:
//!
//! ```text
//! INFO View started
//! INFO catalog_fetch: Catalog ready count=3
//! INFO order_submission: Order placed product_id=product1
//! WARN order_submission: Order failed product_id=product2 error=Request failed with status code 400: Insufficient inventory
//! INFO Shutdown products=3
//! ```

use tracing_subscriber::EnvFilter;

/// Directive used when `RUST_LOG` is unset or unparsable.
pub const DEFAULT_LOG_FILTER: &str = "warn";

pub fn setup_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
