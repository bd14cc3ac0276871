//! Commerce error types.

use camisa_store::StoreError;
use thiserror::Error;

/// Errors that can occur in catalog and cart operations.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Product not found.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Category slug or name not recognized.
    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    /// Invalid quantity.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// Cart position outside the current item list.
    #[error("Cart index {index} out of range ({len} items)")]
    IndexOutOfRange { index: usize, len: usize },

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in cart calculation")]
    Overflow,

    /// Store error.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}
