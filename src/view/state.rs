//! The view's tri-state.

use super::CatalogLoadError;
use crate::api::ApiError;
use crate::model::{Product, ProductId};

/// What the storefront is currently showing.
///
/// The only transitions are `Loading → Ready` and `Loading → Error`; both are
/// made by [`ViewState::settle`] and nothing returns to `Loading`.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ViewState {
    #[default]
    Loading,
    Error(CatalogLoadError),
    Ready(Vec<Product>),
}

impl ViewState {
    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }

    /// Products on display. Empty unless the catalog is ready.
    pub fn products(&self) -> &[Product] {
        match self {
            ViewState::Ready(products) => products,
            _ => &[],
        }
    }

    pub fn product(&self, id: &ProductId) -> Option<&Product> {
        self.products().iter().find(|product| &product.id == id)
    }

    pub fn error(&self) -> Option<&CatalogLoadError> {
        match self {
            ViewState::Error(e) => Some(e),
            _ => None,
        }
    }

    /// Applies the outcome of the catalog fetch.
    ///
    /// Returns `false`, leaving the state untouched, unless the view is still
    /// `Loading`.
    pub fn settle(&mut self, outcome: Result<Vec<Product>, ApiError>) -> bool {
        if !self.is_loading() {
            return false;
        }
        *self = match outcome {
            Ok(products) => ViewState::Ready(products),
            Err(e) => ViewState::Error(CatalogLoadError(e)),
        };
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn widget() -> Product {
        Product::new(1u64, "Widget", 9.99)
    }

    #[test]
    fn test_loading_settles_to_ready_in_response_order() {
        let mut state = ViewState::default();
        let catalog = vec![
            Product::new("b", "Second", 2.0),
            Product::new("a", "First", 1.0),
        ];

        assert!(state.settle(Ok(catalog.clone())));
        assert_eq!(state.products(), catalog.as_slice());
        assert_eq!(state.product(&ProductId::from("a")).unwrap().name, "First");
    }

    #[test]
    fn test_loading_settles_to_error_with_prefix() {
        let mut state = ViewState::Loading;
        assert!(state.settle(Err(ApiError::Transport("connection refused".to_string()))));

        let error = state.error().unwrap();
        assert_eq!(
            error.to_string(),
            "Failed to fetch products: Network error: connection refused"
        );
        assert!(state.products().is_empty());
    }

    #[test]
    fn test_settled_state_ignores_later_outcomes() {
        let mut state = ViewState::Loading;
        state.settle(Ok(vec![widget()]));

        assert!(!state.settle(Err(ApiError::Transport("late".to_string()))));
        assert!(!state.settle(Ok(vec![])));
        assert_eq!(state, ViewState::Ready(vec![widget()]));

        let mut failed = ViewState::Loading;
        failed.settle(Err(ApiError::Decode("bad".to_string())));
        assert!(!failed.settle(Ok(vec![widget()])));
        assert!(failed.error().is_some());
    }
}
