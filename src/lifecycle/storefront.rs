use crate::api::{ApiError, HttpStorefrontApi, StorefrontApi};
use crate::config::StorefrontConfig;
use crate::view::{Notifier, StorefrontHandle, StorefrontView};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// A running storefront view and the task that drives it.
///
/// `Storefront` is responsible for:
/// - **Activation**: spawning the view, which immediately fetches the catalog
/// - **Wiring**: injecting the gateway client and the notifier
/// - **Teardown**: stopping the view and waiting for its task to finish
///
/// # Example
///
/// ```ignore
/// let (notifier, mut notifications) = ChannelNotifier::new();
/// let storefront = Storefront::connect(StorefrontConfig::default(), Arc::new(notifier))?;
///
/// let state = storefront.handle.settled().await?;
/// storefront.handle.purchase(state.products()[0].id.clone()).await?;
/// println!("{}", notifications.recv().await.unwrap());
///
/// storefront.shutdown().await?;
/// ```
pub struct Storefront {
    /// Handle to the running view. Clone it freely.
    pub handle: StorefrontHandle,

    view_task: JoinHandle<()>,
}

impl Storefront {
    /// Activates a view backed by `api`.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn activate(
        api: Arc<dyn StorefrontApi>,
        notifier: Arc<dyn Notifier>,
        config: &StorefrontConfig,
    ) -> Self {
        let (view, handle) = StorefrontView::new(api, notifier, config.channel_capacity);
        let view_task = tokio::spawn(view.run());
        info!(api = %config.api_base_url, "Storefront activated");

        Self { handle, view_task }
    }

    /// Activates a view backed by the HTTP gateway named in `config`.
    pub fn connect(config: StorefrontConfig, notifier: Arc<dyn Notifier>) -> Result<Self, ApiError> {
        let api = HttpStorefrontApi::new(config.clone())?;
        Ok(Self::activate(Arc::new(api), notifier, &config))
    }

    /// Tears the view down and waits for its task.
    ///
    /// Handles cloned from [`Storefront::handle`] stay valid as values but
    /// report [`ViewError::ViewClosed`](crate::view::ViewError::ViewClosed)
    /// afterwards. Order submissions already dispatched are left to finish.
    ///
    /// # Returns
    ///
    /// - `Ok(())` if the view stopped cleanly
    /// - `Err(String)` if the view task panicked
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down storefront...");
        self.handle.close().await;
        drop(self.handle);

        if let Err(e) = self.view_task.await {
            error!("View task failed: {:?}", e);
            return Err(format!("View task failed: {:?}", e));
        }

        info!("Storefront shutdown complete.");
        Ok(())
    }
}
