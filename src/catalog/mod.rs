//! Product catalog vocabulary: marketplace categories, crafts and materials.
//!
//! Everything here is pure lookup logic over static tables so it can be shared by the
//! categorization service, the moderation queue filters and the CLI.

pub mod categories;
pub mod crafts;
pub mod materials;
pub mod text;

pub use categories::{
    category_from_craft, category_from_keywords, full_category_path, is_marketplace_category,
    matches_category_filter, normalize_category, subcategory, DEFAULT_CATEGORY,
    MARKETPLACE_CATEGORIES,
};
pub use crafts::{canonical_craft, is_valid_cross_sell, normalize_craft_type};
pub use materials::{normalize_material, normalize_materials, normalize_techniques};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Which signal decided a product's marketplace category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum CategorySource {
    Keyword,
    AiCategory,
    AiCraft,
    ShopCraft,
    Default,
}

/// Inputs available when picking a product's category.
#[derive(Debug, Default, Clone, Copy)]
pub struct CategorySignals<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub ai_category: Option<&'a str>,
    pub ai_craft: Option<&'a str>,
    pub shop_craft: Option<&'a str>,
}

/// Picks the marketplace category for a product.
///
/// Priority: product keywords, the classifier's category (only if it is one of the nine),
/// the classifier's craft, the shop's craft, then the default. The result is always a
/// member of [`MARKETPLACE_CATEGORIES`].
pub fn resolve_category(signals: CategorySignals<'_>) -> (&'static str, CategorySource) {
    if let Some(category) = category_from_keywords(signals.name, signals.description) {
        return (category, CategorySource::Keyword);
    }

    if let Some(category) = signals.ai_category.and_then(|candidate| {
        MARKETPLACE_CATEGORIES
            .iter()
            .copied()
            .find(|known| *known == candidate.trim())
    }) {
        return (category, CategorySource::AiCategory);
    }

    if let Some(category) = signals.ai_craft.and_then(category_from_craft) {
        return (category, CategorySource::AiCraft);
    }

    if let Some(category) = signals.shop_craft.and_then(category_from_craft) {
        return (category, CategorySource::ShopCraft);
    }

    (DEFAULT_CATEGORY, CategorySource::Default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords_beat_the_classifier() {
        let (category, source) = resolve_category(CategorySignals {
            name: "Collar de chaquiras",
            description: "",
            ai_category: Some("Muebles"),
            ..Default::default()
        });
        assert_eq!(category, "Joyería y Accesorios");
        assert_eq!(source, CategorySource::Keyword);
    }

    #[test]
    fn unknown_ai_category_falls_through_to_craft() {
        let (category, source) = resolve_category(CategorySignals {
            name: "Pieza",
            description: "única",
            ai_category: Some("Juguetes"),
            ai_craft: Some("Cerámica"),
            shop_craft: Some("Joyería"),
        });
        assert_eq!(category, "Vajillas y Cocina");
        assert_eq!(source, CategorySource::AiCraft);
    }

    #[test]
    fn shop_craft_then_default() {
        let (category, source) = resolve_category(CategorySignals {
            name: "Pieza",
            description: "única",
            shop_craft: Some("Marroquinería"),
            ..Default::default()
        });
        assert_eq!((category, source), ("Bolsos y Carteras", CategorySource::ShopCraft));

        let (category, source) = resolve_category(CategorySignals {
            name: "Pieza",
            description: "única",
            ..Default::default()
        });
        assert_eq!((category, source), (DEFAULT_CATEGORY, CategorySource::Default));
    }
}
