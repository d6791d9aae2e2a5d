//! In-process stand-in for the shop gateway, served by axum on an ephemeral
//! port.

#![allow(dead_code)]

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub struct FakeGateway {
    /// Catalog served by `GET /api/products`, or the status to fail with.
    pub catalog: Result<Value, StatusCode>,
    /// Status returned by `POST /api/orders`.
    pub order_status: StatusCode,
    /// Bodies received by `POST /api/orders`.
    pub orders: Arc<Mutex<Vec<Value>>>,
}

impl FakeGateway {
    pub fn with_catalog(catalog: Value) -> Self {
        Self {
            catalog: Ok(catalog),
            order_status: StatusCode::CREATED,
            orders: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn failing_catalog(status: StatusCode) -> Self {
        Self {
            catalog: Err(status),
            ..Self::with_catalog(json!([]))
        }
    }

    pub fn order_status(mut self, status: StatusCode) -> Self {
        self.order_status = status;
        self
    }

    pub fn received_orders(&self) -> Vec<Value> {
        self.orders.lock().unwrap().clone()
    }

    /// Serves the gateway and returns its base URL.
    pub async fn spawn(&self) -> String {
        let app = Router::new()
            .route("/api/products", get(list_products))
            .route("/api/products/{id}", get(get_product))
            .route("/api/orders", post(create_order))
            .route("/health", get(|| async { Json(json!({ "status": "UP" })) }))
            .with_state(self.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind listener");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("serve app");
        });
        format!("http://{addr}")
    }
}

async fn list_products(State(gateway): State<FakeGateway>) -> (StatusCode, Json<Value>) {
    match gateway.catalog {
        Ok(catalog) => (StatusCode::OK, Json(catalog)),
        Err(status) => (
            status,
            Json(json!({ "error": "Service unavailable: product-service" })),
        ),
    }
}

async fn get_product(
    State(gateway): State<FakeGateway>,
    Path(id): Path<String>,
) -> (StatusCode, Json<Value>) {
    let found = gateway.catalog.ok().and_then(|catalog| {
        catalog.as_array().and_then(|products| {
            products
                .iter()
                .find(|product| match &product["id"] {
                    Value::String(s) => s == &id,
                    other => other.to_string() == id,
                })
                .cloned()
        })
    });
    match found {
        Some(product) => (StatusCode::OK, Json(product)),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Product not found" })),
        ),
    }
}

async fn create_order(
    State(gateway): State<FakeGateway>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    gateway.orders.lock().unwrap().push(body.clone());

    if !gateway.order_status.is_success() {
        return (
            gateway.order_status,
            Json(json!({ "error": "Product service error: boom" })),
        );
    }
    (
        gateway.order_status,
        Json(json!({
            "id": "order-1",
            "productId": body["productId"],
            "productName": "Widget",
            "quantity": body["quantity"],
            "unitPrice": 9.99,
            "totalPrice": 9.99,
            "status": "CREATED"
        })),
    )
}
