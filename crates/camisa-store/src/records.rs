//! Wire records for the hosted `productos` and `categorias` tables.
//!
//! Rust field names are English; serde renames keep the column names the
//! hosted store actually uses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Category name reported for products whose category cannot be resolved.
pub const UNKNOWN_CATEGORY_NAME: &str = "Sin categoría";

/// A row of the `productos` table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductRecord {
    /// Store-issued identifier.
    pub id: String,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion", default)]
    pub description: Option<String>,
    #[serde(rename = "imagen_url", default)]
    pub image_url: String,
    #[serde(rename = "tallas", default, deserialize_with = "null_as_empty")]
    pub sizes: Vec<String>,
    #[serde(rename = "colores", default, deserialize_with = "null_as_empty")]
    pub colors: Vec<String>,
    #[serde(rename = "en_oferta", default)]
    pub on_sale: bool,
    #[serde(rename = "es_nuevo", default)]
    pub is_new: bool,
    #[serde(rename = "categoria_id")]
    pub category_id: String,
    #[serde(rename = "subcategorias", default, deserialize_with = "null_as_empty")]
    pub subcategories: Vec<String>,
    /// Display price in currency units, when the store carries one.
    #[serde(rename = "precio", default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    /// Price before the current offer.
    #[serde(
        rename = "precio_anterior",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub previous_price: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A row of the `categorias` table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryRecord {
    pub id: String,
    #[serde(rename = "nombre")]
    pub name: String,
    pub slug: String,
    #[serde(rename = "descripcion", default)]
    pub description: Option<String>,
    #[serde(rename = "imagen_url", default)]
    pub image_url: Option<String>,
    #[serde(rename = "icono", default)]
    pub icon: Option<String>,
    /// Display order, ascending.
    #[serde(rename = "orden", default)]
    pub position: i32,
    pub created_at: DateTime<Utc>,
}

/// Admin listing row: a product plus its category name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductWithCategory {
    #[serde(flatten)]
    pub product: ProductRecord,
    #[serde(rename = "categoria_nombre")]
    pub category_name: String,
}

/// Insert payload. Identifier and timestamps are assigned by the store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct NewProduct {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion", default)]
    pub description: Option<String>,
    #[serde(rename = "imagen_url")]
    pub image_url: String,
    #[serde(rename = "tallas", default)]
    pub sizes: Vec<String>,
    #[serde(rename = "colores", default)]
    pub colors: Vec<String>,
    #[serde(rename = "en_oferta", default)]
    pub on_sale: bool,
    #[serde(rename = "es_nuevo", default)]
    pub is_new: bool,
    #[serde(rename = "categoria_id")]
    pub category_id: String,
    #[serde(rename = "subcategorias", default)]
    pub subcategories: Vec<String>,
    #[serde(rename = "precio", default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(
        rename = "precio_anterior",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub previous_price: Option<f64>,
}

impl NewProduct {
    /// Create an insert payload with the required columns.
    pub fn new(
        name: impl Into<String>,
        image_url: impl Into<String>,
        category_id: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            image_url: image_url.into(),
            category_id: category_id.into(),
            ..Default::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_sizes(mut self, sizes: &[&str]) -> Self {
        self.sizes = sizes.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_colors(mut self, colors: &[&str]) -> Self {
        self.colors = colors.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_subcategories(mut self, names: &[&str]) -> Self {
        self.subcategories = names.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn on_sale(mut self) -> Self {
        self.on_sale = true;
        self
    }

    pub fn new_arrival(mut self) -> Self {
        self.is_new = true;
        self
    }

    pub fn with_price(mut self, price: f64, previous: Option<f64>) -> Self {
        self.price = Some(price);
        self.previous_price = previous;
        self
    }

    /// Materialize the row the store would persist.
    pub fn into_record(self, id: impl Into<String>, now: DateTime<Utc>) -> ProductRecord {
        ProductRecord {
            id: id.into(),
            name: self.name,
            description: self.description,
            image_url: self.image_url,
            sizes: self.sizes,
            colors: self.colors,
            on_sale: self.on_sale,
            is_new: self.is_new,
            category_id: self.category_id,
            subcategories: self.subcategories,
            price: self.price,
            previous_price: self.previous_price,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update payload; `None` leaves the column untouched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ProductChanges {
    #[serde(rename = "nombre", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "descripcion", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "imagen_url", skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(rename = "tallas", skip_serializing_if = "Option::is_none")]
    pub sizes: Option<Vec<String>>,
    #[serde(rename = "colores", skip_serializing_if = "Option::is_none")]
    pub colors: Option<Vec<String>>,
    #[serde(rename = "en_oferta", skip_serializing_if = "Option::is_none")]
    pub on_sale: Option<bool>,
    #[serde(rename = "es_nuevo", skip_serializing_if = "Option::is_none")]
    pub is_new: Option<bool>,
    #[serde(rename = "categoria_id", skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    #[serde(rename = "subcategorias", skip_serializing_if = "Option::is_none")]
    pub subcategories: Option<Vec<String>>,
    #[serde(rename = "precio", skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(rename = "precio_anterior", skip_serializing_if = "Option::is_none")]
    pub previous_price: Option<f64>,
}

impl ProductChanges {
    /// Whether the payload touches no column.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Apply the changes to a stored row and bump `updated_at`.
    pub fn apply_to(&self, record: &mut ProductRecord, now: DateTime<Utc>) {
        if let Some(name) = &self.name {
            record.name = name.clone();
        }
        if let Some(description) = &self.description {
            record.description = Some(description.clone());
        }
        if let Some(url) = &self.image_url {
            record.image_url = url.clone();
        }
        if let Some(sizes) = &self.sizes {
            record.sizes = sizes.clone();
        }
        if let Some(colors) = &self.colors {
            record.colors = colors.clone();
        }
        if let Some(on_sale) = self.on_sale {
            record.on_sale = on_sale;
        }
        if let Some(is_new) = self.is_new {
            record.is_new = is_new;
        }
        if let Some(category_id) = &self.category_id {
            record.category_id = category_id.clone();
        }
        if let Some(subcategories) = &self.subcategories {
            record.subcategories = subcategories.clone();
        }
        if self.price.is_some() {
            record.price = self.price;
        }
        if self.previous_price.is_some() {
            record.previous_price = self.previous_price;
        }
        record.updated_at = now;
    }
}

/// Array columns may come back as `null`.
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}
