//! Shopping cart module.
//!
//! Contains the cart, its line items and the WhatsApp checkout link.

mod cart;
mod checkout;

pub use cart::{Cart, LineItem};
pub use checkout::{encode_component, CheckoutLink, DEFAULT_CLOSING, DEFAULT_HEADER, DEFAULT_PHONE};
