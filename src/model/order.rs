/// Order payloads exchanged with the order endpoint.
///
/// The storefront only ever builds an [`OrderRequest`]. The [`OrderReceipt`]
/// mirrors what the order service answers with and is informational.
use crate::model::ProductId;
use serde::{Deserialize, Serialize};

/// Payload for `POST /api/orders`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    pub product_id: ProductId,
    pub quantity: u32,
}

impl OrderRequest {
    pub fn new(product_id: ProductId, quantity: u32) -> Self {
        Self {
            product_id,
            quantity,
        }
    }

    /// The request a purchase control issues: one unit of one product.
    pub fn single(product_id: ProductId) -> Self {
        Self::new(product_id, 1)
    }
}

/// Order record returned by the order service on creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderReceipt {
    pub id: String,
    pub product_id: ProductId,
    pub product_name: String,
    pub quantity: u32,
    pub unit_price: f64,
    pub total_price: f64,
    pub status: String,
}
