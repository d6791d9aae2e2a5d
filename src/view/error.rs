//! Error types surfaced by the storefront view.

use crate::api::ApiError;
use crate::model::ProductId;
use thiserror::Error;

/// The catalog could not be loaded. Once raised it is the only thing the view
/// shows.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("Failed to fetch products: {0}")]
pub struct CatalogLoadError(#[source] pub ApiError);

/// An order submission failed. Reported once through a notification and
/// never reflected in the view state.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("Order could not be placed: {source}")]
pub struct OrderSubmitError {
    pub product_id: ProductId,
    #[source]
    pub source: ApiError,
}

/// Errors returned by [`StorefrontHandle`](crate::view::StorefrontHandle).
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ViewError {
    /// The view has been torn down.
    #[error("Storefront view is closed")]
    ViewClosed,

    /// No purchase control is rendered for this product, either because the
    /// catalog is not ready or because the product is not in it.
    #[error("No purchase control for product {0}")]
    NoPurchaseControl(ProductId),
}
