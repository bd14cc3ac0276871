//! Product model and the mapper from store records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use camisa_store::ProductRecord;

use crate::catalog::Category;
use crate::ids::{CategoryId, ProductId};
use crate::money::{Currency, Money};

/// A catalog product, normalized from a store row.
///
/// Products are immutable once loaded; a reload replaces the whole list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// Empty when the store has no description.
    pub description: String,
    /// Available sizes, unique, in store order.
    pub sizes: Vec<String>,
    pub colors: Vec<String>,
    pub image_url: String,
    pub on_sale: bool,
    pub is_new: bool,
    /// Section label stamped at load time (`"Printed"`, `"Embroidered"`).
    pub category_tag: Option<String>,
    /// Subcategory names, unique.
    pub subcategories: Vec<String>,
    pub category_id: Option<CategoryId>,
    pub price: Option<Money>,
    pub previous_price: Option<Money>,
    pub created_at: Option<DateTime<Utc>>,
}

impl Product {
    /// Create a product with just an id and name.
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            sizes: Vec::new(),
            colors: Vec::new(),
            image_url: String::new(),
            on_sale: false,
            is_new: false,
            category_tag: None,
            subcategories: Vec::new(),
            category_id: None,
            price: None,
            previous_price: None,
            created_at: None,
        }
    }

    /// Map a store row, tagging it with the category it was loaded for.
    pub fn from_record(record: ProductRecord, category: Option<Category>) -> Self {
        Self {
            id: ProductId::new(record.id),
            name: record.name,
            description: record.description.unwrap_or_default(),
            sizes: dedup_in_order(record.sizes),
            colors: record.colors,
            image_url: record.image_url,
            on_sale: record.on_sale,
            is_new: record.is_new,
            category_tag: category.and_then(|c| c.tag()).map(str::to_string),
            subcategories: dedup_in_order(record.subcategories),
            category_id: Some(CategoryId::new(record.category_id)),
            price: record.price.map(|p| Money::from_decimal(p, Currency::MXN)),
            previous_price: record
                .previous_price
                .map(|p| Money::from_decimal(p, Currency::MXN)),
            created_at: Some(record.created_at),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_sizes(mut self, sizes: &[&str]) -> Self {
        self.sizes = dedup_in_order(sizes.iter().map(|s| s.to_string()).collect());
        self
    }

    pub fn with_colors(mut self, colors: &[&str]) -> Self {
        self.colors = colors.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_subcategories(mut self, names: &[&str]) -> Self {
        self.subcategories = dedup_in_order(names.iter().map(|s| s.to_string()).collect());
        self
    }

    pub fn with_flags(mut self, on_sale: bool, is_new: bool) -> Self {
        self.on_sale = on_sale;
        self.is_new = is_new;
        self
    }

    pub fn with_price(mut self, price: Money, previous: Option<Money>) -> Self {
        self.price = Some(price);
        self.previous_price = previous;
        self
    }

    /// Whether the product belongs to a subcategory.
    pub fn in_subcategory(&self, name: &str) -> bool {
        self.subcategories.iter().any(|s| s == name)
    }

    /// Whole-percent discount against the previous price, if any.
    pub fn discount_percent(&self) -> Option<u8> {
        self.price?.percent_below(&self.previous_price?)
    }

    /// Key for locale-aware name ordering.
    pub fn collation_key(&self) -> String {
        collation_key(&self.name)
    }
}

/// Lower-case a name and fold Latin diacritics so "Árbol" sorts with "arbol".
///
/// Folding covers Latin-1 accented letters plus the `œ`/`æ`/`ß` ligatures.
/// Other scripts and Latin Extended letters are compared by code point.
pub fn collation_key(name: &str) -> String {
    let mut key = String::with_capacity(name.len());
    for c in name.chars().flat_map(char::to_lowercase) {
        match c {
            'œ' => key.push_str("oe"),
            'æ' => key.push_str("ae"),
            'ß' => key.push_str("ss"),
            other => key.push(fold_diacritic(other)),
        }
    }
    key
}

/// Tie-breaker for names with equal [`collation_key`]s: lowercase sorts
/// before uppercase at the first differing letter.
pub fn case_key(name: &str) -> Vec<(bool, char)> {
    name.chars().map(|c| (c.is_uppercase(), c)).collect()
}

fn fold_diacritic(c: char) -> char {
    match c {
        'á' | 'à' | 'â' | 'ä' | 'ã' | 'å' => 'a',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'ó' | 'ò' | 'ô' | 'ö' | 'õ' | 'ø' => 'o',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'ñ' => 'n',
        'ç' => 'c',
        'ý' | 'ÿ' => 'y',
        other => other,
    }
}

fn dedup_in_order(values: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    values
        .into_iter()
        .filter(|v| seen.insert(v.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use camisa_store::NewProduct;

    fn record() -> ProductRecord {
        NewProduct::new("Camisa Anime", "https://cdn/anime.jpg", "cat-2")
            .with_sizes(&["M", "L", "M", "XL", "L"])
            .with_colors(&["Negro"])
            .with_subcategories(&["Anime y Manga", "Anime y Manga"])
            .on_sale()
            .with_price(249.0, Some(349.0))
            .into_record("prod-0001", Utc::now())
    }

    #[test]
    fn test_mapper_normalizes_record() {
        let product = Product::from_record(record(), Some(Category::Printed));

        assert_eq!(product.id.as_str(), "prod-0001");
        assert_eq!(product.description, "");
        assert_eq!(product.sizes, vec!["M", "L", "XL"]);
        assert_eq!(product.subcategories, vec!["Anime y Manga"]);
        assert_eq!(product.category_tag.as_deref(), Some("Printed"));
        assert!(product.on_sale);
        assert!(!product.is_new);
        assert_eq!(product.price.map(|p| p.amount_cents), Some(24900));
    }

    #[test]
    fn test_replicas_carry_no_tag() {
        let product = Product::from_record(record(), Some(Category::Replicas));
        assert_eq!(product.category_tag, None);
    }

    #[test]
    fn test_discount_percent() {
        let product = Product::from_record(record(), None);
        assert_eq!(product.discount_percent(), Some(29));

        let plain = Product::new("p", "Sin precio");
        assert_eq!(plain.discount_percent(), None);
    }

    #[test]
    fn test_collation_key_folds_accents() {
        assert_eq!(collation_key("Árbol Ñandú"), "arbol nandu");
        assert!(collation_key("Épica") < collation_key("Fresca"));
    }
}
