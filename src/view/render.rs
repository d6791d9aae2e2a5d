//! # Rendering
//!
//! [`Frame::from_state`] derives what the view displays from a [`ViewState`].
//! A frame is plain data; its `Display` impl is the text rendering used by the
//! CLI.
//!
//! - `Loading` renders only [`LOADING_MESSAGE`].
//! - `Error` renders only the error message.
//! - `Ready` renders [`CATALOG_HEADING`] and one card per product, in catalog
//!   order, each with a purchase control.

use super::ViewState;
use crate::model::{Product, ProductId};
use std::fmt::Display;

pub const LOADING_MESSAGE: &str = "Loading...";
pub const CATALOG_HEADING: &str = "Products";
pub const PURCHASE_LABEL: &str = "Buy";

/// The button on a product card. Activating it orders one unit.
#[derive(Debug, Clone, PartialEq)]
pub struct PurchaseControl {
    pub product_id: ProductId,
    pub label: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProductCard {
    pub name: String,
    pub price: String,
    pub purchase: PurchaseControl,
}

impl From<&Product> for ProductCard {
    fn from(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            price: product.price_label(),
            purchase: PurchaseControl {
                product_id: product.id.clone(),
                label: PURCHASE_LABEL,
            },
        }
    }
}

/// One rendering of the view.
#[derive(Debug, Clone, PartialEq)]
pub enum Frame {
    Loading,
    Error { message: String },
    Catalog {
        heading: &'static str,
        cards: Vec<ProductCard>,
    },
}

impl Frame {
    pub fn from_state(state: &ViewState) -> Self {
        match state {
            ViewState::Loading => Frame::Loading,
            ViewState::Error(e) => Frame::Error {
                message: e.to_string(),
            },
            ViewState::Ready(products) => Frame::Catalog {
                heading: CATALOG_HEADING,
                cards: products.iter().map(ProductCard::from).collect(),
            },
        }
    }

    pub fn cards(&self) -> &[ProductCard] {
        match self {
            Frame::Catalog { cards, .. } => cards,
            _ => &[],
        }
    }

    /// Purchase controls in display order.
    pub fn purchase_controls(&self) -> impl Iterator<Item = &PurchaseControl> {
        self.cards().iter().map(|card| &card.purchase)
    }
}

impl Display for Frame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Frame::Loading => writeln!(f, "{LOADING_MESSAGE}"),
            Frame::Error { message } => writeln!(f, "Error: {message}"),
            Frame::Catalog { heading, cards } => {
                writeln!(f, "{heading}")?;
                for (index, card) in cards.iter().enumerate() {
                    writeln!(
                        f,
                        "  {}. {}  {}  [{} {}]",
                        index + 1,
                        card.name,
                        card.price,
                        card.purchase.label,
                        index + 1
                    )?;
                }
                Ok(())
            }
        }
    }
}
