//! # Storefront View
//!
//! The product storefront: it loads the catalog once on activation, shows a
//! loading indicator, the error, or the product cards, and places a
//! quantity-1 order whenever a card's purchase control is activated.
//!
//! - [`StorefrontView`] is the event loop that owns the [`ViewState`].
//! - [`StorefrontHandle`] is the cloneable interface to it.
//! - [`Frame`] is what gets rendered for a given state.
//! - [`Notifier`] presents the one-per-submission [`Notification`].

mod actor;
pub mod error;
pub mod handle;
mod message;
pub mod notification;
pub mod render;
pub mod state;

pub use actor::StorefrontView;
pub use error::*;
pub use handle::StorefrontHandle;
pub use notification::*;
pub use render::*;
pub use state::ViewState;
