//! # Storefront Lifecycle
//!
//! Starting and stopping the storefront, and the logging setup that goes
//! with it.
//!
//! [`Storefront`] wires a gateway client and a notifier into a
//! [`StorefrontView`](crate::view::StorefrontView), spawns it, and tears it
//! down again:
//!
//! 1. **Activate**: the view task starts and issues the catalog fetch.
//! 2. **Use**: callers read and purchase through the cloned handles.
//! 3. **Shutdown**: an explicit close request ends the loop even while
//!    other handles are alive; the task is then awaited.
//!
//! Dropping every handle has the same effect as step 3 without the wait.

mod storefront;
pub mod tracing;

pub use self::storefront::*;
pub use self::tracing::*;
