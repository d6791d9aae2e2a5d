//! # Mock Gateway
//!
//! [`MockApi`] implements [`StorefrontApi`] entirely in memory so the view can
//! be exercised without a network.
//!
//! Each operation has its own queue of expected replies. A call pops the next
//! reply from its queue; a call with nothing queued is answered with an error
//! and recorded, and [`MockApi::verify`] will then fail the test.
//!
//! ```ignore
//! let mock = MockApi::new();
//! mock.expect_list_products().return_ok(vec![Product::new(1u64, "Widget", 9.99)]);
//! let gate = mock.expect_submit_order().return_gated();
//!
//! // ... drive the view; the order call now waits on `gate` ...
//! gate.send(Ok(None)).unwrap();
//!
//! mock.verify();
//! ```
//!
//! Gated replies let a test decide exactly when a call completes, which is
//! how ordering and teardown behaviour is pinned down.

use super::{ApiError, StorefrontApi};
use crate::model::{OrderReceipt, OrderRequest, Product, ProductId};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::oneshot;

/// A queued answer for one call.
enum Reply<T> {
    Ready(Result<T, ApiError>),
    Gated(oneshot::Receiver<Result<T, ApiError>>),
}

#[derive(Default)]
struct MockState {
    list_products: VecDeque<Reply<Vec<Product>>>,
    submit_order: VecDeque<Reply<Option<OrderReceipt>>>,
    get_product: VecDeque<Reply<Product>>,
    health: VecDeque<Reply<bool>>,
    orders: Vec<OrderRequest>,
    product_lookups: Vec<ProductId>,
    list_calls: usize,
    unexpected: Vec<&'static str>,
}

type QueueOf<T> = fn(&mut MockState) -> &mut VecDeque<Reply<T>>;

/// In-memory [`StorefrontApi`] with expectation tracking.
#[derive(Clone, Default)]
pub struct MockApi {
    state: Arc<Mutex<MockState>>,
}

impl MockApi {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Expects a `list_products` call.
    pub fn expect_list_products(&self) -> ReplyBuilder<Vec<Product>> {
        self.builder(|s| &mut s.list_products)
    }

    /// Expects a `submit_order` call.
    pub fn expect_submit_order(&self) -> ReplyBuilder<Option<OrderReceipt>> {
        self.builder(|s| &mut s.submit_order)
    }

    /// Expects a `get_product` call.
    pub fn expect_get_product(&self) -> ReplyBuilder<Product> {
        self.builder(|s| &mut s.get_product)
    }

    /// Expects a `health` call.
    pub fn expect_health(&self) -> ReplyBuilder<bool> {
        self.builder(|s| &mut s.health)
    }

    fn builder<T>(&self, queue: QueueOf<T>) -> ReplyBuilder<T> {
        ReplyBuilder {
            state: self.state.clone(),
            queue,
        }
    }

    /// Every order payload received so far, in arrival order.
    pub fn submitted_orders(&self) -> Vec<OrderRequest> {
        self.lock().orders.clone()
    }

    /// Every id passed to `get_product`, in arrival order.
    pub fn product_lookups(&self) -> Vec<ProductId> {
        self.lock().product_lookups.clone()
    }

    /// Number of `list_products` calls received.
    pub fn list_calls(&self) -> usize {
        self.lock().list_calls
    }

    /// Panics unless every queued reply was consumed and no call arrived
    /// without one.
    pub fn verify(&self) {
        let state = self.lock();
        if !state.unexpected.is_empty() {
            panic!("Unexpected calls: {:?}", state.unexpected);
        }
        let remaining = state.list_products.len()
            + state.submit_order.len()
            + state.get_product.len()
            + state.health.len();
        if remaining != 0 {
            panic!("Not all expectations were met. {} remaining", remaining);
        }
    }

    async fn answer<T>(&self, queue: QueueOf<T>, op: &'static str) -> Result<T, ApiError> {
        let reply = {
            let mut state = self.lock();
            let reply = queue(&mut state).pop_front();
            if reply.is_none() {
                state.unexpected.push(op);
            }
            reply
        };

        match reply {
            Some(Reply::Ready(result)) => result,
            Some(Reply::Gated(gate)) => gate
                .await
                .unwrap_or_else(|_| Err(ApiError::Transport(format!("{op} gate dropped")))),
            None => Err(ApiError::Transport(format!("unexpected {op} call"))),
        }
    }
}

/// Builder returned by the `expect_*` methods.
pub struct ReplyBuilder<T> {
    state: Arc<Mutex<MockState>>,
    queue: QueueOf<T>,
}

impl<T> ReplyBuilder<T> {
    /// Answers the call with `value`.
    pub fn return_ok(self, value: T) {
        self.push(Reply::Ready(Ok(value)));
    }

    /// Answers the call with `error`.
    pub fn return_err(self, error: ApiError) {
        self.push(Reply::Ready(Err(error)));
    }

    /// Holds the call open until the returned sender fires. Dropping the
    /// sender fails the call with a transport error.
    pub fn return_gated(self) -> oneshot::Sender<Result<T, ApiError>> {
        let (sender, receiver) = oneshot::channel();
        self.push(Reply::Gated(receiver));
        sender
    }

    fn push(self, reply: Reply<T>) {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        (self.queue)(&mut state).push_back(reply);
    }
}

#[async_trait]
impl StorefrontApi for MockApi {
    async fn list_products(&self) -> Result<Vec<Product>, ApiError> {
        self.lock().list_calls += 1;
        self.answer(|s| &mut s.list_products, "list_products").await
    }

    async fn submit_order(&self, order: OrderRequest) -> Result<Option<OrderReceipt>, ApiError> {
        self.lock().orders.push(order);
        self.answer(|s| &mut s.submit_order, "submit_order").await
    }

    async fn get_product(&self, id: &ProductId) -> Result<Product, ApiError> {
        self.lock().product_lookups.push(id.clone());
        self.answer(|s| &mut s.get_product, "get_product").await
    }

    async fn health(&self) -> Result<bool, ApiError> {
        self.answer(|s| &mut s.health, "health").await
    }
}
