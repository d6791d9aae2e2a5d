use serde::{Deserialize, Serialize};
use serde_json::Number;
use std::fmt::Display;

/// Opaque identifier of a catalog product.
///
/// The catalog service is free to hand out numeric (`1`, `-1`, `1.5`) or
/// string (`"product1"`) identifiers. Any JSON number or string is accepted
/// and written back in the form it arrived in, so an order always echoes the
/// id the catalog supplied.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProductId {
    Number(Number),
    Text(String),
}

impl From<u64> for ProductId {
    fn from(id: u64) -> Self {
        Self::Number(id.into())
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self::Text(id.to_string())
    }
}

impl From<String> for ProductId {
    fn from(id: String) -> Self {
        Self::Text(id)
    }
}

impl Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(id) => write!(f, "{id}"),
            Self::Text(id) => f.write_str(id),
        }
    }
}

/// A purchasable item as supplied by the catalog service.
///
/// The storefront never mutates a `Product`; it only displays it and orders it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: f64,
}

impl Product {
    /// Creates a new Product instance.
    ///
    /// # Arguments
    /// * `id` - Identifier assigned by the catalog service
    /// * `name` - Display name
    /// * `price` - Unit price, shown as-is
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, price: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
        }
    }

    /// Price as shown on a product card: a `$` followed by the number as it
    /// prints, with no rounding or currency formatting.
    ///
    /// Rust prints large magnitudes positionally (`1e21` becomes
    /// `$1000000000000000000000`, not `$1e+21`).
    pub fn price_label(&self) -> String {
        format!("${}", self.price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_and_text_ids_deserialize() {
        let products: Vec<Product> = serde_json::from_str(
            r#"[{"id":1,"name":"Widget","price":9.99},{"id":"product2","name":"Product 2","price":29.99}]"#,
        )
        .unwrap();

        assert_eq!(products[0].id, ProductId::from(1u64));
        assert_eq!(products[1].id, ProductId::Text("product2".to_string()));
    }

    #[test]
    fn test_negative_and_fractional_ids_pass_through() {
        let products: Vec<Product> = serde_json::from_str(
            r#"[{"id":-1,"name":"W","price":9.99},{"id":1.5,"name":"X","price":1.0}]"#,
        )
        .unwrap();

        assert_eq!(products[0].id.to_string(), "-1");
        assert_eq!(products[1].id.to_string(), "1.5");
        assert_eq!(serde_json::to_string(&products[0].id).unwrap(), "-1");
        assert_eq!(serde_json::to_string(&products[1].id).unwrap(), "1.5");
    }

    #[test]
    fn test_id_keeps_its_json_form() {
        assert_eq!(serde_json::to_string(&ProductId::from(1u64)).unwrap(), "1");
        assert_eq!(
            serde_json::to_string(&ProductId::from("product1")).unwrap(),
            r#""product1""#
        );
    }

    #[test]
    fn test_price_label_is_literal() {
        assert_eq!(Product::new(1u64, "Widget", 9.99).price_label(), "$9.99");
        assert_eq!(Product::new(2u64, "Gadget", 10.0).price_label(), "$10");
        assert_eq!(Product::new(3u64, "Gizmo", 5.49).price_label(), "$5.49");
    }
}
