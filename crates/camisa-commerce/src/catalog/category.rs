//! Top-level categories and their subcategory taxonomy.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CommerceError;

/// One of the three storefront sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Replicas,
    Printed,
    Embroidered,
}

impl Category {
    /// All categories, in lookup order.
    pub const ALL: [Category; 3] = [Category::Replicas, Category::Printed, Category::Embroidered];

    /// The store's category slug.
    pub fn slug(&self) -> &'static str {
        match self {
            Category::Replicas => "replicas",
            Category::Printed => "estampadas",
            Category::Embroidered => "bordadas",
        }
    }

    /// Tag stamped on products loaded for this category. Replicas carry none.
    pub fn tag(&self) -> Option<&'static str> {
        match self {
            Category::Replicas => None,
            Category::Printed => Some("Printed"),
            Category::Embroidered => Some("Embroidered"),
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Category::Replicas => "Replicas",
            Category::Printed => "Camisas Estampadas",
            Category::Embroidered => "Camisas Bordadas",
        }
    }

    /// Resolve a slug loosely: any slug containing a category stem matches it.
    pub fn resolve_slug(slug: &str) -> Option<Self> {
        let normalized = slug.trim().to_lowercase();
        if normalized.is_empty() {
            None
        } else if normalized.contains("bordad") {
            Some(Category::Embroidered)
        } else if normalized.contains("estampad") {
            Some(Category::Printed)
        } else if normalized.contains("replic") {
            Some(Category::Replicas)
        } else {
            None
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.slug())
    }
}

impl FromStr for Category {
    type Err = CommerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "printed" => Ok(Category::Printed),
            "embroidered" => Ok(Category::Embroidered),
            other => {
                Category::resolve_slug(other).ok_or_else(|| CommerceError::UnknownCategory(s.to_string()))
            }
        }
    }
}

/// Subcategory names offered for each category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubcategoryTaxonomy {
    groups: BTreeMap<Category, Vec<String>>,
}

impl SubcategoryTaxonomy {
    /// A taxonomy with no names at all.
    pub fn empty() -> Self {
        Self {
            groups: BTreeMap::new(),
        }
    }

    /// Replace the names for one category.
    pub fn with_names<I, S>(mut self, category: Category, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.groups
            .insert(category, names.into_iter().map(Into::into).collect());
        self
    }

    /// Apply overrides keyed by slug. Unrecognized slugs are skipped and returned.
    pub fn with_overrides(mut self, overrides: &BTreeMap<String, Vec<String>>) -> (Self, Vec<String>) {
        let mut unknown = Vec::new();
        for (slug, names) in overrides {
            match Category::resolve_slug(slug) {
                Some(category) => {
                    self.groups.insert(category, names.clone());
                }
                None => unknown.push(slug.clone()),
            }
        }
        (self, unknown)
    }

    /// Names for a category, in display order.
    pub fn names(&self, category: Category) -> &[String] {
        self.groups.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Names for a loosely matched slug; empty when nothing matches.
    pub fn for_slug(&self, slug: &str) -> &[String] {
        match Category::resolve_slug(slug) {
            Some(category) => self.names(category),
            None => &[],
        }
    }
}

impl Default for SubcategoryTaxonomy {
    fn default() -> Self {
        Self::empty()
            .with_names(
                Category::Replicas,
                [
                    "Ligas Europeas",
                    "Selecciones Nacionales",
                    "Retro / Clasicas",
                    "Edicion Especial",
                    "Ninos",
                ],
            )
            .with_names(
                Category::Printed,
                [
                    "Anime y Manga",
                    "Bandas de Rock",
                    "Frases y Memes",
                    "Minimalistas",
                    "Parejas",
                ],
            )
            .with_names(
                Category::Embroidered,
                [
                    "Logos Empresariales",
                    "Nombres e Iniciales",
                    "Escudos",
                    "Gorras Bordadas",
                    "Uniformes",
                ],
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_slug_is_loose() {
        assert_eq!(Category::resolve_slug("camisas-bordadas"), Some(Category::Embroidered));
        assert_eq!(Category::resolve_slug("ESTAMPADAS"), Some(Category::Printed));
        assert_eq!(Category::resolve_slug("replicas"), Some(Category::Replicas));
        assert_eq!(Category::resolve_slug("gorras"), None);
        assert_eq!(Category::resolve_slug(""), None);
    }

    #[test]
    fn test_category_from_str() {
        assert_eq!("printed".parse::<Category>().unwrap(), Category::Printed);
        assert_eq!("bordadas".parse::<Category>().unwrap(), Category::Embroidered);
        assert!("shoes".parse::<Category>().is_err());
    }

    #[test]
    fn test_default_taxonomy() {
        let taxonomy = SubcategoryTaxonomy::default();
        assert_eq!(taxonomy.names(Category::Printed)[0], "Anime y Manga");
        assert_eq!(taxonomy.for_slug("camisas-bordadas").len(), 5);
        assert!(taxonomy.for_slug("accesorios").is_empty());
    }

    #[test]
    fn test_overrides() {
        let mut overrides = BTreeMap::new();
        overrides.insert("estampadas".to_string(), vec!["Minimalistas".to_string()]);
        overrides.insert("zapatos".to_string(), vec!["Tenis".to_string()]);

        let (taxonomy, unknown) = SubcategoryTaxonomy::default().with_overrides(&overrides);
        assert_eq!(taxonomy.names(Category::Printed), ["Minimalistas".to_string()]);
        assert_eq!(taxonomy.names(Category::Replicas).len(), 5);
        assert_eq!(unknown, vec!["zapatos".to_string()]);
    }
}
