#![doc(html_logo_url = "https://www.rust-lang.org/logos/rust-logo-128x128.png")]
#![doc(html_favicon_url = "https://www.rust-lang.org/favicon.ico")]
//! # Storefront
//!
//! > **A product storefront over the shop gateway's REST API.**
//!
//! The storefront loads the product catalog once when it is activated, shows
//! a loading indicator, the catalog, or the reason it could not be loaded, and
//! places a single-unit order whenever a product's purchase control is used.
//! Each order produces exactly one success or failure notification; orders
//! never change what the view displays.
//!
//! ## 🏗️ Architecture
//!
//! ### View state as a sum type
//! What the storefront shows is a [`ViewState`](view::ViewState):
//! `Loading`, `Error` or `Ready`. Being loading and failed at the same time
//! cannot be expressed. The only transitions are out of `Loading`.
//!
//! ### One writer
//! The [`StorefrontView`](view::StorefrontView) runs as a single Tokio task.
//! It drives the catalog fetch and handles purchase requests one at a time,
//! and it is the only code that writes the state. Readers see it through a
//! `watch` channel, so no locks are needed.
//!
//! ### Independent orders
//! Each purchase is submitted from its own task. Two clicks make two
//! submissions; neither waits for the other, for the catalog fetch, or for the
//! view loop.
//!
//! ### Teardown
//! When the view is torn down, an outstanding catalog fetch is dropped along
//! with the loop. Its result can never land in a view that is gone.
//!
//! ## 🗺️ Module Tour
//!
//! - [`model`]: `Product`, `ProductId`, `OrderRequest` and the order receipt.
//! - [`api`]: the [`StorefrontApi`](api::StorefrontApi) seam, its `reqwest`
//!   implementation and an in-memory mock.
//! - [`view`]: state, event loop, handle, rendering and notifications.
//! - [`lifecycle`]: activation/shutdown of a storefront and logging setup.
//! - [`config`]: gateway URL and channel sizing.
//! - [`loadgen`]: synthetic shopper traffic against the same API.
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! # Browse the catalog served by the local gateway
//! storefront browse
//!
//! # Point at another gateway
//! STOREFRONT_API_URL=http://shop.internal:8080 storefront browse
//!
//! # Ten simulated shoppers for a minute
//! RUST_LOG=info storefront load-test --users 10 --duration-secs 60
//! ```

pub mod api;
pub mod config;
pub mod lifecycle;
pub mod loadgen;
pub mod model;
pub mod view;
