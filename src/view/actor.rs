//! # View Event Loop
//!
//! [`StorefrontView`] owns the [`ViewState`] and is the only writer of it. It
//! runs as a single task that drives the catalog fetch and handles requests
//! from [`StorefrontHandle`]s one at a time, so no locking is involved.
//!
//! Order submissions are spawned as independent tasks: they never wait on
//! each other, on the catalog fetch, or on the loop itself.
//!
//! When the last handle is dropped (or [`ViewRequest::Shutdown`] arrives) the
//! loop ends. A catalog fetch still in flight at that point is dropped with
//! the loop and its outcome never reaches the state.

use super::message::ViewRequest;
use super::{
    Notification, Notifier, OrderSubmitError, StorefrontHandle, ViewError, ViewState,
};
use crate::api::{ApiError, StorefrontApi};
use crate::model::{OrderRequest, Product, ProductId};
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, info_span, warn, Instrument};

/// The server half of the storefront view.
///
/// ```ignore
/// let (view, handle) = StorefrontView::new(api, notifier, 32);
/// tokio::spawn(view.run());
///
/// let state = handle.settled().await?;
/// handle.purchase(state.products()[0].id.clone()).await?;
/// ```
pub struct StorefrontView {
    receiver: mpsc::Receiver<ViewRequest>,
    state: watch::Sender<ViewState>,
    api: Arc<dyn StorefrontApi>,
    notifier: Arc<dyn Notifier>,
}

impl StorefrontView {
    /// Creates a view in the `Loading` state and the handle used to talk to it.
    ///
    /// Nothing is fetched until [`run`](Self::run) is polled.
    pub fn new(
        api: Arc<dyn StorefrontApi>,
        notifier: Arc<dyn Notifier>,
        buffer_size: usize,
    ) -> (Self, StorefrontHandle) {
        let (sender, receiver) = mpsc::channel(buffer_size.max(1));
        let (state, state_rx) = watch::channel(ViewState::Loading);
        let view = Self {
            receiver,
            state,
            api,
            notifier,
        };
        (view, StorefrontHandle::new(sender, state_rx))
    }

    /// Activates the view: issues the catalog fetch once and processes
    /// requests until teardown.
    pub async fn run(mut self) {
        info!("View started");

        let api = self.api.clone();
        let fetch = async move { api.list_products().await }
            .instrument(info_span!("catalog_fetch"));
        tokio::pin!(fetch);
        let mut fetching = true;

        loop {
            tokio::select! {
                outcome = &mut fetch, if fetching => {
                    fetching = false;
                    self.settle(outcome);
                }
                request = self.receiver.recv() => match request {
                    Some(ViewRequest::Purchase { product_id, respond_to }) => {
                        let _ = respond_to.send(self.purchase(product_id));
                    }
                    Some(ViewRequest::Shutdown) | None => break,
                },
            }
        }

        if fetching {
            info!("Torn down before the catalog settled; discarding fetch");
        }
        info!(products = self.state.borrow().products().len(), "Shutdown");
    }

    fn settle(&self, outcome: Result<Vec<Product>, ApiError>) {
        let mut applied = false;
        self.state.send_modify(|state| applied = state.settle(outcome));
        if !applied {
            return;
        }

        match &*self.state.borrow() {
            ViewState::Ready(products) => info!(count = products.len(), "Catalog ready"),
            ViewState::Error(e) => warn!(error = %e, "Catalog failed"),
            ViewState::Loading => {}
        }
    }

    fn purchase(&self, product_id: ProductId) -> Result<(), ViewError> {
        if self.state.borrow().product(&product_id).is_none() {
            debug!(%product_id, "Purchase without a rendered control");
            return Err(ViewError::NoPurchaseControl(product_id));
        }

        let span = info_span!("order_submission", %product_id);
        tokio::spawn(
            submit_order(self.api.clone(), self.notifier.clone(), product_id).instrument(span),
        );
        Ok(())
    }
}

/// Places a quantity-1 order and reports the outcome. The view state is not
/// touched either way.
async fn submit_order(
    api: Arc<dyn StorefrontApi>,
    notifier: Arc<dyn Notifier>,
    product_id: ProductId,
) {
    let request = OrderRequest::single(product_id.clone());
    debug!(?request, "Submitting order");

    let notification = match api.submit_order(request).await {
        Ok(receipt) => {
            info!("Order placed");
            debug!(?receipt, "Order receipt");
            Notification::OrderPlaced { product_id }
        }
        Err(source) => {
            warn!(error = %source, "Order failed");
            Notification::OrderFailed(OrderSubmitError { product_id, source })
        }
    };

    notifier.notify(notification).await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockApi;
    use crate::view::ChannelNotifier;

    fn spawn_view(mock: &MockApi) -> (StorefrontHandle, tokio::task::JoinHandle<()>) {
        let (notifier, _notifications) = ChannelNotifier::new();
        let (view, handle) = StorefrontView::new(Arc::new(mock.clone()), Arc::new(notifier), 8);
        (handle, tokio::spawn(view.run()))
    }

    #[tokio::test]
    async fn test_catalog_is_fetched_exactly_once() {
        let mock = MockApi::new();
        mock.expect_list_products()
            .return_ok(vec![Product::new(1u64, "Widget", 9.99)]);

        let (handle, task) = spawn_view(&mock);
        let state = handle.settled().await.unwrap();
        assert_eq!(state.products().len(), 1);

        // Unknown products have no control, and later requests do not
        // trigger another fetch.
        assert_eq!(
            handle.purchase(ProductId::from(42u64)).await,
            Err(ViewError::NoPurchaseControl(ProductId::from(42u64)))
        );
        assert_eq!(mock.list_calls(), 1);

        drop(handle);
        task.await.unwrap();
        mock.verify();
    }

    #[tokio::test]
    async fn test_purchase_while_loading_has_no_control() {
        let mock = MockApi::new();
        let gate = mock.expect_list_products().return_gated();

        let (handle, task) = spawn_view(&mock);
        assert_eq!(
            handle.purchase(ProductId::from(1u64)).await,
            Err(ViewError::NoPurchaseControl(ProductId::from(1u64)))
        );
        assert!(handle.state().is_loading());

        gate.send(Ok(vec![Product::new(1u64, "Widget", 9.99)])).unwrap();
        handle.settled().await.unwrap();

        drop(handle);
        task.await.unwrap();
        assert!(mock.submitted_orders().is_empty());
    }

    #[tokio::test]
    async fn test_teardown_discards_outstanding_fetch() {
        let mock = MockApi::new();
        let gate = mock.expect_list_products().return_gated();

        let (handle, task) = spawn_view(&mock);
        while mock.list_calls() == 0 {
            tokio::task::yield_now().await;
        }
        let observer = handle.clone();
        handle.close().await;
        task.await.unwrap();

        // The fetch future went away with the loop, so nobody is listening.
        assert!(gate
            .send(Ok(vec![Product::new(1u64, "Widget", 9.99)]))
            .is_err());
        assert!(observer.state().is_loading());
        assert_eq!(observer.settled().await, Err(ViewError::ViewClosed));
        assert!(observer.is_closed());
    }
}
