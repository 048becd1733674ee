//! The cart model.
//!
//! A cart is an ordered list of line items, mutated by pure functions and
//! persisted through the [`CartStore`] port. Derived values (item count,
//! subtotal) are recomputed on every read, never stored. The serialized
//! form is a bare JSON array of lines, matching what the web client keeps
//! in browser storage under [`CART_STORAGE_KEY`].

use serde::{Deserialize, Serialize};

use crate::types::{Price, ProductId};

/// Storage key under which the client persists its cart.
pub const CART_STORAGE_KEY: &str = "lamore-cart";

/// One (product, quantity) pairing within a cart.
///
/// `name`, `price`, and `image_url` are display copies taken from the
/// catalog when the line is added; the checkout re-fetches the live product
/// before any money is computed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub product_id: ProductId,
    pub name: String,
    pub price: Price,
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl CartLine {
    /// This line's subtotal (price × quantity), saturating on overflow.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.price
            .checked_mul(self.quantity)
            .unwrap_or(Price::from_minor_units(i64::MAX))
    }
}

/// An ordered list of cart lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// An empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// The lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Add a line, merging by product id.
    ///
    /// If the product is already in the cart its quantity is incremented;
    /// otherwise the line is appended.
    pub fn add_line(&mut self, line: CartLine) {
        if let Some(existing) = self
            .lines
            .iter_mut()
            .find(|l| l.product_id == line.product_id)
        {
            existing.quantity = existing.quantity.saturating_add(line.quantity);
        } else {
            self.lines.push(line);
        }
    }

    /// Set the quantity for a product; a quantity of zero removes the line.
    ///
    /// Setting a quantity for a product not in the cart is a no-op.
    pub fn set_quantity(&mut self, product_id: ProductId, quantity: u32) {
        if quantity == 0 {
            self.remove(product_id);
            return;
        }
        if let Some(line) = self.lines.iter_mut().find(|l| l.product_id == product_id) {
            line.quantity = quantity;
        }
    }

    /// Remove a product's line entirely.
    pub fn remove(&mut self, product_id: ProductId) {
        self.lines.retain(|l| l.product_id != product_id);
    }

    /// Remove all lines.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines
            .iter()
            .fold(0_u32, |acc, l| acc.saturating_add(l.quantity))
    }

    /// Sum of all line subtotals, saturating on overflow.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.lines.iter().fold(Price::ZERO, |acc, l| {
            acc.checked_add(l.subtotal())
                .unwrap_or(Price::from_minor_units(i64::MAX))
        })
    }
}

/// Persistence port for a cart.
///
/// The storage mechanism is injected so the cart logic stays testable
/// without a real backend: browser local storage on the client, the
/// session store on the server, memory in tests.
pub trait CartStore {
    /// Storage-specific failure type.
    type Error;

    /// Load the persisted cart, or an empty one if none was saved.
    fn load(&self) -> Result<Cart, Self::Error>;

    /// Persist the cart, replacing any previous value.
    fn save(&mut self, cart: &Cart) -> Result<(), Self::Error>;
}

/// In-memory [`CartStore`], used in tests and as the reference
/// implementation of the port.
#[derive(Debug, Default)]
pub struct MemoryCartStore {
    cart: Option<Cart>,
}

impl CartStore for MemoryCartStore {
    type Error = std::convert::Infallible;

    fn load(&self) -> Result<Cart, Self::Error> {
        Ok(self.cart.clone().unwrap_or_default())
    }

    fn save(&mut self, cart: &Cart) -> Result<(), Self::Error> {
        self.cart = Some(cart.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(id: i32, price: i64, quantity: u32) -> CartLine {
        CartLine {
            product_id: ProductId::new(id),
            name: format!("Cupcake {id}"),
            price: Price::from_minor_units(price),
            quantity,
            image_url: None,
        }
    }

    #[test]
    fn test_add_line_merges_by_product() {
        let mut cart = Cart::new();
        cart.add_line(line(1, 1200, 1));
        cart.add_line(line(2, 1000, 2));
        cart.add_line(line(1, 1200, 2));

        assert_eq!(cart.lines().len(), 2);
        assert_eq!(cart.lines()[0].quantity, 3);
        assert_eq!(cart.item_count(), 5);
    }

    #[test]
    fn test_add_preserves_insertion_order() {
        let mut cart = Cart::new();
        cart.add_line(line(3, 1500, 1));
        cart.add_line(line(1, 1200, 1));
        let ids: Vec<i32> = cart.lines().iter().map(|l| l.product_id.as_i32()).collect();
        assert_eq!(ids, vec![3, 1]);
    }

    #[test]
    fn test_set_quantity_zero_removes() {
        let mut cart = Cart::new();
        cart.add_line(line(1, 1200, 2));
        cart.set_quantity(ProductId::new(1), 0);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_set_quantity_updates() {
        let mut cart = Cart::new();
        cart.add_line(line(1, 1200, 2));
        cart.set_quantity(ProductId::new(1), 7);
        assert_eq!(cart.lines()[0].quantity, 7);
        // Unknown product is a no-op
        cart.set_quantity(ProductId::new(99), 3);
        assert_eq!(cart.lines().len(), 1);
    }

    #[test]
    fn test_subtotal_recomputed_on_read() {
        let mut cart = Cart::new();
        cart.add_line(line(1, 1200, 2));
        cart.add_line(line(2, 1000, 1));
        assert_eq!(cart.subtotal(), Price::from_minor_units(3400));

        cart.remove(ProductId::new(2));
        assert_eq!(cart.subtotal(), Price::from_minor_units(2400));
    }

    #[test]
    fn test_clear() {
        let mut cart = Cart::new();
        cart.add_line(line(1, 1200, 2));
        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.subtotal(), Price::ZERO);
    }

    #[test]
    fn test_store_roundtrip() {
        let mut store = MemoryCartStore::default();
        assert!(store.load().expect("load").is_empty());

        let mut cart = Cart::new();
        cart.add_line(line(1, 1200, 2));
        store.save(&cart).expect("save");

        let loaded = store.load().expect("load");
        assert_eq!(loaded, cart);
    }

    #[test]
    fn test_serialized_form_is_bare_array() {
        let mut cart = Cart::new();
        cart.add_line(line(7, 1200, 2));
        let json = serde_json::to_value(&cart).expect("serialize");
        assert!(json.is_array());
        assert_eq!(json[0]["productId"], 7);
        assert_eq!(json[0]["price"], 1200);
        assert_eq!(json[0]["quantity"], 2);
    }
}
