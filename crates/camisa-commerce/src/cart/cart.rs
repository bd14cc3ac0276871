//! Cart and line item types.

use serde::{Deserialize, Serialize};

use crate::cart::CheckoutLink;
use crate::catalog::Product;
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::Money;

/// A shopping cart.
///
/// Items keep insertion order. At most one line exists per
/// `(product id, size, color)`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Cart {
    /// Items in the cart.
    pub items: Vec<LineItem>,
    /// Whether the cart drawer is open.
    pub is_open: bool,
}

impl Cart {
    /// Create an empty, closed cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an item, merging into an existing line with the same identity.
    ///
    /// Returns the index of the affected line.
    pub fn add_item(
        &mut self,
        product: &Product,
        size: impl Into<String>,
        color: impl Into<String>,
        quantity: u32,
    ) -> Result<usize, CommerceError> {
        if quantity == 0 {
            return Err(CommerceError::InvalidQuantity(0));
        }

        let size = size.into();
        let color = color.into();

        if let Some(index) = self.position_of(&product.id, &size, &color) {
            let existing = &mut self.items[index];
            existing.quantity = existing
                .quantity
                .checked_add(quantity)
                .ok_or(CommerceError::Overflow)?;
            return Ok(index);
        }

        self.items.push(LineItem {
            product: product.clone(),
            size,
            color,
            quantity,
        });
        Ok(self.items.len() - 1)
    }

    /// Add a single unit.
    pub fn add_one(
        &mut self,
        product: &Product,
        size: impl Into<String>,
        color: impl Into<String>,
    ) -> Result<usize, CommerceError> {
        self.add_item(product, size, color, 1)
    }

    /// Remove the line at `index` and return it.
    pub fn remove_item(&mut self, index: usize) -> Result<LineItem, CommerceError> {
        self.check_index(index)?;
        Ok(self.items.remove(index))
    }

    /// Overwrite the quantity at `index`. Zero or less removes the line.
    pub fn set_quantity(&mut self, index: usize, quantity: i64) -> Result<(), CommerceError> {
        self.check_index(index)?;
        if quantity <= 0 {
            self.items.remove(index);
            return Ok(());
        }
        self.items[index].quantity = u32::try_from(quantity).map_err(|_| CommerceError::Overflow)?;
        Ok(())
    }

    /// Remove all items.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn toggle_open(&mut self) {
        self.is_open = !self.is_open;
    }

    pub fn close(&mut self) {
        self.is_open = false;
    }

    /// Sum of quantities.
    pub fn total_item_count(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity)).sum()
    }

    /// Number of distinct lines.
    pub fn unique_item_count(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Order summary text before encoding, `None` for an empty cart.
    pub fn order_summary(&self) -> Option<String> {
        CheckoutLink::default().summary(self)
    }

    /// WhatsApp deep link for the order, empty for an empty cart.
    pub fn build_order_message(&self) -> String {
        CheckoutLink::default().build(self)
    }

    /// Sum of priced lines; `None` when any line has no price or currencies differ.
    pub fn estimated_subtotal(&self) -> Option<Money> {
        let first = self.items.first()?.product.price?;
        self.items.iter().try_fold(Money::zero(first.currency), |acc, item| {
            let line = item.product.price?.try_multiply(i64::from(item.quantity))?;
            acc.try_add(&line)
        })
    }

    fn position_of(&self, id: &ProductId, size: &str, color: &str) -> Option<usize> {
        self.items
            .iter()
            .position(|i| &i.product.id == id && i.size == size && i.color == color)
    }

    fn check_index(&self, index: usize) -> Result<(), CommerceError> {
        if index >= self.items.len() {
            return Err(CommerceError::IndexOutOfRange {
                index,
                len: self.items.len(),
            });
        }
        Ok(())
    }
}

/// A line in the cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItem {
    /// Product snapshot taken when the line was added.
    pub product: Product,
    pub size: String,
    pub color: String,
    /// Always at least 1.
    pub quantity: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    fn shirt(id: &str) -> Product {
        Product::new(id, format!("Camisa {}", id))
    }

    #[test]
    fn test_cart_creation() {
        let cart = Cart::new();
        assert!(cart.is_empty());
        assert!(!cart.is_open);
        assert_eq!(cart.total_item_count(), 0);
    }

    #[test]
    fn test_add_same_identity_merges() {
        let mut cart = Cart::new();
        let product = shirt("1");

        cart.add_one(&product, "M", "Negro").unwrap();
        let index = cart.add_item(&product, "M", "Negro", 2).unwrap();

        assert_eq!(index, 0);
        assert_eq!(cart.unique_item_count(), 1);
        assert_eq!(cart.items[0].quantity, 3);
    }

    #[test]
    fn test_lines_stay_distinct() {
        let mut cart = Cart::new();
        let product = shirt("1");

        cart.add_one(&product, "M", "Negro").unwrap();
        cart.add_one(&product, "L", "Negro").unwrap();
        cart.add_one(&product, "M", "Blanco").unwrap();
        cart.add_one(&shirt("2"), "M", "Negro").unwrap();
        cart.add_one(&product, "L", "Negro").unwrap();

        assert_eq!(cart.unique_item_count(), 4);
        assert_eq!(cart.total_item_count(), 5);
        for (i, a) in cart.items.iter().enumerate() {
            for b in &cart.items[i + 1..] {
                assert!((&a.product.id, &a.size, &a.color) != (&b.product.id, &b.size, &b.color));
            }
        }
    }

    #[test]
    fn test_zero_quantity_rejected() {
        let mut cart = Cart::new();
        let result = cart.add_item(&shirt("1"), "M", "Negro", 0);
        assert!(matches!(result, Err(CommerceError::InvalidQuantity(0))));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_merge_overflow() {
        let mut cart = Cart::new();
        cart.add_item(&shirt("1"), "M", "Negro", u32::MAX).unwrap();
        let result = cart.add_one(&shirt("1"), "M", "Negro");
        assert!(matches!(result, Err(CommerceError::Overflow)));
        assert_eq!(cart.items[0].quantity, u32::MAX);
    }

    #[test]
    fn test_set_quantity() {
        let mut cart = Cart::new();
        cart.add_one(&shirt("1"), "M", "Negro").unwrap();

        cart.set_quantity(0, 7).unwrap();
        assert_eq!(cart.total_item_count(), 7);

        assert!(matches!(
            cart.set_quantity(0, i64::from(u32::MAX) + 1),
            Err(CommerceError::Overflow)
        ));
    }

    #[test]
    fn test_set_quantity_zero_removes() {
        let mut cart = Cart::new();
        cart.add_one(&shirt("1"), "M", "Negro").unwrap();
        cart.add_one(&shirt("2"), "L", "Azul").unwrap();

        cart.set_quantity(0, 0).unwrap();
        assert_eq!(cart.unique_item_count(), 1);
        assert_eq!(cart.items[0].product.id.as_str(), "2");

        cart.set_quantity(0, -3).unwrap();
        assert!(cart.is_empty());
    }

    #[test]
    fn test_bad_index_leaves_cart_unchanged() {
        let mut cart = Cart::new();
        cart.add_one(&shirt("1"), "M", "Negro").unwrap();
        let before = cart.clone();

        assert!(matches!(
            cart.remove_item(3),
            Err(CommerceError::IndexOutOfRange { index: 3, len: 1 })
        ));
        assert!(cart.set_quantity(1, 0).is_err());
        assert_eq!(cart, before);
    }

    #[test]
    fn test_remove_item_returns_line() {
        let mut cart = Cart::new();
        cart.add_item(&shirt("1"), "M", "Negro", 2).unwrap();
        let removed = cart.remove_item(0).unwrap();
        assert_eq!(removed.quantity, 2);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_clear_is_idempotent() {
        let mut cart = Cart::new();
        cart.add_one(&shirt("1"), "M", "Negro").unwrap();
        cart.clear();
        cart.clear();
        assert!(cart.is_empty());
    }

    #[test]
    fn test_open_state() {
        let mut cart = Cart::new();
        cart.toggle_open();
        assert!(cart.is_open);
        cart.close();
        cart.close();
        assert!(!cart.is_open);
    }

    #[test]
    fn test_estimated_subtotal() {
        let mut cart = Cart::new();
        let priced = shirt("1").with_price(Money::new(25000, Currency::MXN), None);
        cart.add_item(&priced, "M", "Negro", 2).unwrap();
        assert_eq!(cart.estimated_subtotal().map(|m| m.amount_cents), Some(50000));

        cart.add_one(&shirt("2"), "M", "Negro").unwrap();
        assert_eq!(cart.estimated_subtotal(), None);
    }

    #[test]
    fn test_estimated_subtotal_mixed_currencies() {
        let mut cart = Cart::new();
        let pesos = shirt("1").with_price(Money::new(25000, Currency::MXN), None);
        let dollars = shirt("2").with_price(Money::new(1500, Currency::USD), None);
        cart.add_one(&pesos, "M", "Negro").unwrap();
        cart.add_one(&dollars, "M", "Negro").unwrap();
        assert_eq!(cart.estimated_subtotal(), None);
    }
}
