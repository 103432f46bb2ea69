use std::collections::BTreeSet;

use super::crafts::UNSPECIFIED;
use super::text::{comparison_key, title_case};

const MATERIAL_SYNONYMS: &[(&str, &str)] = &[
    ("ceramics", "Cerámica"),
    ("ceramic", "Cerámica"),
    ("wood", "Madera"),
    ("leather", "Cuero"),
    ("cotton", "Algodón"),
    ("wool", "Lana"),
    ("silver", "Plata"),
    ("gold", "Oro"),
    ("clay", "Arcilla"),
    ("glass", "Vidrio"),
    ("metal", "Metal"),
    ("bamboo", "Bambú"),
    ("fiber", "Fibra"),
    ("stone", "Piedra"),
    ("brass", "Latón"),
    ("copper", "Cobre"),
    ("silk", "Seda"),
    ("rattan", "Ratán"),
    ("straw", "Paja"),
    ("palm", "Palma"),
    ("thread", "Hilo"),
    ("yarn", "Hilaza"),
    ("cueros", "Cuero"),
    ("maderas", "Madera"),
    ("lanas", "Lana"),
    ("arcillas", "Arcilla"),
    ("fibras", "Fibra"),
];

/// Translates a single material into its Spanish canonical name.
pub fn normalize_material(raw: &str) -> String {
    if raw.trim().is_empty() {
        return UNSPECIFIED.to_string();
    }
    let key = comparison_key(raw);
    MATERIAL_SYNONYMS
        .iter()
        .find(|(synonym, _)| key.contains(synonym))
        .map(|(_, canonical)| canonical.to_string())
        .unwrap_or_else(|| title_case(raw))
}

/// Translates, dedupes and sorts a material list.
pub fn normalize_materials<S: AsRef<str>>(materials: &[S]) -> Vec<String> {
    materials
        .iter()
        .map(|material| normalize_material(material.as_ref()))
        .filter(|material| material != UNSPECIFIED)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Title-cases, dedupes and sorts a technique list.
pub fn normalize_techniques<S: AsRef<str>>(techniques: &[S]) -> Vec<String> {
    techniques
        .iter()
        .map(|technique| technique.as_ref().trim())
        .filter(|technique| !technique.is_empty())
        .map(title_case)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
