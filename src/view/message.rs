//! Requests accepted by the view's event loop.

use super::ViewError;
use crate::model::ProductId;
use tokio::sync::oneshot;

pub type Response<T> = oneshot::Sender<Result<T, ViewError>>;

#[derive(Debug)]
pub enum ViewRequest {
    /// A purchase control was activated. Answered once the submission has
    /// been dispatched, not when it completes.
    Purchase {
        product_id: ProductId,
        respond_to: Response<()>,
    },
    /// Tear the view down even if other handles are still alive.
    Shutdown,
}
