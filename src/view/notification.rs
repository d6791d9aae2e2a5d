//! Order outcome notifications.
//!
//! Every submission produces exactly one [`Notification`], delivered through
//! a [`Notifier`]. A notifier may hold the submission until the user
//! acknowledges it; that only ever holds up the submission it belongs to.

use super::OrderSubmitError;
use crate::model::ProductId;
use async_trait::async_trait;
use std::fmt::Display;
use tokio::sync::mpsc;
use tracing::debug;

/// Message shown to the user after a successful order.
pub const ORDER_PLACED_MESSAGE: &str = "Order placed successfully!";

/// Outcome of one order submission.
#[derive(Debug, Clone, PartialEq)]
pub enum Notification {
    OrderPlaced { product_id: ProductId },
    OrderFailed(OrderSubmitError),
}

impl Notification {
    pub fn is_success(&self) -> bool {
        matches!(self, Notification::OrderPlaced { .. })
    }

    pub fn product_id(&self) -> &ProductId {
        match self {
            Notification::OrderPlaced { product_id } => product_id,
            Notification::OrderFailed(e) => &e.product_id,
        }
    }
}

impl Display for Notification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Notification::OrderPlaced { .. } => f.write_str(ORDER_PLACED_MESSAGE),
            Notification::OrderFailed(e) => write!(f, "{e}"),
        }
    }
}

/// Presents notifications to the user.
#[async_trait]
pub trait Notifier: Send + Sync + 'static {
    /// Presents `notification`. Returning means the user has seen it.
    async fn notify(&self, notification: Notification);
}

/// Forwards notifications into an unbounded channel.
///
/// Whoever owns the receiver decides how to present them. Notifications sent
/// after the receiver is gone are dropped.
#[derive(Clone)]
pub struct ChannelNotifier {
    sender: mpsc::UnboundedSender<Notification>,
}

impl ChannelNotifier {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Notification>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

#[async_trait]
impl Notifier for ChannelNotifier {
    async fn notify(&self, notification: Notification) {
        if let Err(e) = self.sender.send(notification) {
            debug!(notification = %e.0, "Notification dropped, receiver closed");
        }
    }
}
