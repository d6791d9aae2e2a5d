//! # Storefront Handle
//!
//! Cloneable client side of the view. Reads go straight to the published
//! state; purchases are sent to the view's event loop.

use super::message::ViewRequest;
use super::{Frame, ViewError, ViewState};
use crate::model::ProductId;
use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, instrument};

#[derive(Clone)]
pub struct StorefrontHandle {
    sender: mpsc::Sender<ViewRequest>,
    state: watch::Receiver<ViewState>,
}

impl StorefrontHandle {
    pub(crate) fn new(sender: mpsc::Sender<ViewRequest>, state: watch::Receiver<ViewState>) -> Self {
        Self { sender, state }
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> ViewState {
        self.state.borrow().clone()
    }

    /// Renders the current state.
    pub fn frame(&self) -> Frame {
        Frame::from_state(&self.state.borrow())
    }

    /// Waits until the catalog fetch has settled and returns the resulting
    /// state.
    ///
    /// Fails with [`ViewError::ViewClosed`] if the view is torn down while
    /// still loading.
    pub async fn settled(&self) -> Result<ViewState, ViewError> {
        let mut state = self.state.clone();
        let settled = state
            .wait_for(|state| !state.is_loading())
            .await
            .map_err(|_| ViewError::ViewClosed)?;
        Ok(settled.clone())
    }

    /// Activates the purchase control of `product_id`.
    ///
    /// Returns once the order submission has been dispatched; its outcome
    /// arrives later through the view's notifier. Every call dispatches a
    /// separate submission.
    #[instrument(skip_all)]
    pub async fn purchase(&self, product_id: impl Into<ProductId>) -> Result<(), ViewError> {
        let product_id = product_id.into();
        debug!(%product_id, "Sending request");

        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(ViewRequest::Purchase {
                product_id,
                respond_to,
            })
            .await
            .map_err(|_| ViewError::ViewClosed)?;
        response.await.map_err(|_| ViewError::ViewClosed)?
    }

    /// Asks the view to tear down. Has no effect if it is already gone.
    pub async fn close(&self) {
        let _ = self.sender.send(ViewRequest::Shutdown).await;
    }

    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}
