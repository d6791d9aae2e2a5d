//! # Gateway API
//!
//! The storefront depends on the gateway only through the [`StorefrontApi`]
//! trait. [`HttpStorefrontApi`] is the real implementation; [`mock::MockApi`]
//! stands in for it in tests.

pub mod error;
pub mod http;
pub mod mock;

pub use error::*;
pub use http::*;

use crate::model::{OrderReceipt, OrderRequest, Product, ProductId};
use async_trait::async_trait;

/// Operations the storefront needs from the gateway.
#[async_trait]
pub trait StorefrontApi: Send + Sync + 'static {
    /// `GET /api/products`: the full catalog, in the order the service sends it.
    async fn list_products(&self) -> Result<Vec<Product>, ApiError>;

    /// `POST /api/orders`.
    ///
    /// Any 2xx is success. The receipt is returned when the body decodes as
    /// one and is `None` otherwise; callers are free to ignore it.
    async fn submit_order(&self, order: OrderRequest) -> Result<Option<OrderReceipt>, ApiError>;

    /// `GET /api/products/{id}`.
    async fn get_product(&self, id: &ProductId) -> Result<Product, ApiError>;

    /// `GET /health`. `true` when the gateway reports itself `UP`.
    async fn health(&self) -> Result<bool, ApiError>;
}
