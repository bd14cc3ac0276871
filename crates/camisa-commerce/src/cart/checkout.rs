//! WhatsApp checkout hand-off.
//!
//! Checkout never touches the network: the cart is rendered into a message and
//! percent-encoded into a `wa.me` deep link the customer opens.

use std::fmt::Write as _;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};

use crate::cart::Cart;

/// Bytes left unescaped, matching JavaScript's `encodeURIComponent`.
const COMPONENT_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

pub const DEFAULT_PHONE: &str = "523355550000";
pub const DEFAULT_HEADER: &str = "*PEDIDO - CamisaSTORE*";
pub const DEFAULT_CLOSING: &str = "Esta disponible mi pedido?";

const RULE: &str = "------------------------";

/// Target number and fixed lines of the order message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutLink {
    /// International number without `+`.
    pub phone: String,
    pub header: String,
    pub closing: String,
}

impl Default for CheckoutLink {
    fn default() -> Self {
        Self {
            phone: DEFAULT_PHONE.to_string(),
            header: DEFAULT_HEADER.to_string(),
            closing: DEFAULT_CLOSING.to_string(),
        }
    }
}

impl CheckoutLink {
    pub fn new(phone: impl Into<String>) -> Self {
        Self {
            phone: phone.into(),
            ..Default::default()
        }
    }

    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        self.header = header.into();
        self
    }

    pub fn with_closing(mut self, closing: impl Into<String>) -> Self {
        self.closing = closing.into();
        self
    }

    /// Plain-text order summary, `None` for an empty cart.
    pub fn summary(&self, cart: &Cart) -> Option<String> {
        if cart.is_empty() {
            return None;
        }

        let mut text = format!("{}\n{}\n\n", self.header, RULE);
        for (i, item) in cart.items.iter().enumerate() {
            // Writing into a String cannot fail.
            let _ = write!(
                text,
                "*{}. {}*\n   - Talla: {}\n   - Color: {}\n   - Cantidad: {}\n\n",
                i + 1,
                item.product.name,
                item.size,
                item.color,
                item.quantity
            );
        }
        let _ = write!(
            text,
            "{}\n*Total articulos:* {}\n{}",
            RULE,
            cart.total_item_count(),
            self.closing
        );
        Some(text)
    }

    /// Deep link carrying the encoded summary; empty for an empty cart.
    pub fn build(&self, cart: &Cart) -> String {
        match self.summary(cart) {
            Some(text) => {
                let url = format!("https://wa.me/{}?text={}", self.phone, encode_component(&text));
                tracing::debug!(lines = cart.unique_item_count(), url_len = url.len(), "built checkout link");
                url
            }
            None => String::new(),
        }
    }
}

/// Percent-encode a URI component.
pub fn encode_component(text: &str) -> String {
    utf8_percent_encode(text, COMPONENT_ENCODE_SET).to_string()
}
