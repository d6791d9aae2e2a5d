//! Wire-level data structures shared by the API client and the view.

pub mod order;
pub mod product;

pub use order::*;
pub use product::*;
