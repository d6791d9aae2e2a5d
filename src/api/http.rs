//! # HTTP Client
//!
//! [`HttpStorefrontApi`] implements [`StorefrontApi`] on top of `reqwest`.
//! No timeout or retry is layered on top of the transport.

use super::{ApiError, StorefrontApi};
use crate::config::StorefrontConfig;
use crate::model::{OrderReceipt, OrderRequest, Product, ProductId};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, instrument};
use url::Url;

/// Error body shape used by the gateway and the services behind it.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Debug, Deserialize)]
struct HealthBody {
    status: String,
}

/// Client for the storefront gateway.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Clone)]
pub struct HttpStorefrontApi {
    client: reqwest::Client,
    config: StorefrontConfig,
}

impl HttpStorefrontApi {
    pub fn new(config: StorefrontConfig) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| ApiError::Transport(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client, config })
    }

    fn url(&self, segments: &[&str]) -> Result<Url, ApiError> {
        Ok(self.config.endpoint(segments)?)
    }
}

/// Turns a non-2xx response into [`ApiError::Status`], picking up the
/// gateway's `{"error": ...}` message when there is one.
async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = match response.bytes().await {
        Ok(body) => body,
        Err(e) => {
            debug!(error = %e, "Could not read error body; reporting status only");
            Default::default()
        }
    };
    let detail = serde_json::from_slice::<ErrorBody>(&body)
        .ok()
        .map(|body| body.error);
    Err(ApiError::Status {
        status: status.as_u16(),
        detail,
    })
}

#[async_trait]
impl StorefrontApi for HttpStorefrontApi {
    #[instrument(skip(self))]
    async fn list_products(&self) -> Result<Vec<Product>, ApiError> {
        let url = self.url(&["api", "products"])?;
        debug!(%url, "Sending request");
        let response = ensure_success(self.client.get(url).send().await?).await?;
        let products: Vec<Product> = response.json().await?;
        debug!(count = products.len(), "Catalog received");
        Ok(products)
    }

    #[instrument(skip(self))]
    async fn submit_order(&self, order: OrderRequest) -> Result<Option<OrderReceipt>, ApiError> {
        let url = self.url(&["api", "orders"])?;
        debug!(%url, ?order, "Sending request");
        let response =
            ensure_success(self.client.post(url).json(&order).send().await?).await?;

        let body = response.bytes().await?;
        if body.is_empty() {
            return Ok(None);
        }
        match serde_json::from_slice::<OrderReceipt>(&body) {
            Ok(receipt) => Ok(Some(receipt)),
            Err(e) => {
                debug!(error = %e, "Order response is not a receipt; ignoring body");
                Ok(None)
            }
        }
    }

    #[instrument(skip(self))]
    async fn get_product(&self, id: &ProductId) -> Result<Product, ApiError> {
        let id = id.to_string();
        let url = self.url(&["api", "products", &id])?;
        debug!(%url, "Sending request");
        let response = ensure_success(self.client.get(url).send().await?).await?;
        Ok(response.json().await?)
    }

    #[instrument(skip(self))]
    async fn health(&self) -> Result<bool, ApiError> {
        let url = self.url(&["health"])?;
        debug!(%url, "Sending request");
        let response = ensure_success(self.client.get(url).send().await?).await?;
        let body: HealthBody = response.json().await?;
        Ok(body.status == "UP")
    }
}
