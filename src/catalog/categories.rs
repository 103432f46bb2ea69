//! Marketplace category tables.

use super::text::{comparison_key, fold_accents, title_case};

pub const DEFAULT_CATEGORY: &str = "Decoración del Hogar";

/// Category used when a stored category string is missing.
pub const UNCATEGORIZED: &str = "Otros";

/// The canonical marketplace categories a product can be filed under.
pub const MARKETPLACE_CATEGORIES: [&str; 9] = [
    "Joyería y Accesorios",
    "Decoración del Hogar",
    "Textiles y Moda",
    "Bolsos y Carteras",
    "Vajillas y Cocina",
    "Muebles",
    "Arte y Esculturas",
    "Iluminación",
    "Cuidado Personal",
];

/// Product-type keywords, checked in order against `name + description`.
const PRODUCT_KEYWORDS: &[(&str, &str)] = &[
    ("arete", "Joyería y Accesorios"),
    ("aretes", "Joyería y Accesorios"),
    ("collar", "Joyería y Accesorios"),
    ("pulsera", "Joyería y Accesorios"),
    ("anillo", "Joyería y Accesorios"),
    ("manilla", "Joyería y Accesorios"),
    ("brazalete", "Joyería y Accesorios"),
    ("diadema", "Joyería y Accesorios"),
    ("pendiente", "Joyería y Accesorios"),
    ("bolso", "Bolsos y Carteras"),
    ("mochila", "Bolsos y Carteras"),
    ("cartera", "Bolsos y Carteras"),
    ("morral", "Bolsos y Carteras"),
    ("canasta", "Bolsos y Carteras"),
    ("cesto", "Bolsos y Carteras"),
    ("estuche", "Bolsos y Carteras"),
    ("plato", "Vajillas y Cocina"),
    ("taza", "Vajillas y Cocina"),
    ("bowl", "Vajillas y Cocina"),
    ("bandeja", "Vajillas y Cocina"),
    ("vajilla", "Vajillas y Cocina"),
    ("olla", "Vajillas y Cocina"),
    ("vasija", "Vajillas y Cocina"),
    ("jarra", "Vajillas y Cocina"),
    ("ruana", "Textiles y Moda"),
    ("poncho", "Textiles y Moda"),
    ("bufanda", "Textiles y Moda"),
    ("tapete", "Textiles y Moda"),
    ("hamaca", "Textiles y Moda"),
    ("mantel", "Textiles y Moda"),
    ("cojín", "Textiles y Moda"),
    ("sombrero", "Textiles y Moda"),
    ("mesa", "Muebles"),
    ("silla", "Muebles"),
    ("banco", "Muebles"),
    ("estante", "Muebles"),
    ("baúl", "Muebles"),
    ("mueble", "Muebles"),
    ("figura", "Decoración del Hogar"),
    ("adorno", "Decoración del Hogar"),
    ("jarrón", "Decoración del Hogar"),
    ("florero", "Decoración del Hogar"),
    ("espejo", "Decoración del Hogar"),
    ("reloj", "Decoración del Hogar"),
    ("cuchillo", "Decoración del Hogar"),
    ("navaja", "Decoración del Hogar"),
    ("escultura", "Arte y Esculturas"),
    ("talla", "Arte y Esculturas"),
    ("pintura", "Arte y Esculturas"),
    ("cuadro", "Arte y Esculturas"),
    ("lámpara", "Iluminación"),
    ("lampara", "Iluminación"),
    ("vela", "Iluminación"),
    ("candelabro", "Iluminación"),
    ("farol", "Iluminación"),
    ("jabón", "Cuidado Personal"),
    ("jabon", "Cuidado Personal"),
    ("crema", "Cuidado Personal"),
    ("bálsamo", "Cuidado Personal"),
    ("aceite corporal", "Cuidado Personal"),
    ("aceite facial", "Cuidado Personal"),
    ("loción", "Cuidado Personal"),
    ("sérum", "Cuidado Personal"),
    ("exfoliante", "Cuidado Personal"),
    ("mascarilla", "Cuidado Personal"),
    ("hidratante", "Cuidado Personal"),
    ("cosmético", "Cuidado Personal"),
];

/// Craft (oficio) to marketplace category.
const CRAFT_TO_CATEGORY: &[(&str, &str)] = &[
    ("Joyería", "Joyería y Accesorios"),
    ("Bisutería", "Joyería y Accesorios"),
    ("Orfebrería/Platería", "Joyería y Accesorios"),
    ("Alambrismo", "Joyería y Accesorios"),
    ("Trabajo en Cacho/Hueso", "Joyería y Accesorios"),
    ("Marroquinería", "Bolsos y Carteras"),
    ("Talabartería", "Bolsos y Carteras"),
    ("Guarnielería", "Bolsos y Carteras"),
    ("Tafilería", "Bolsos y Carteras"),
    ("Cestería", "Bolsos y Carteras"),
    ("Cerámica", "Vajillas y Cocina"),
    ("Alfarería", "Vajillas y Cocina"),
    ("Trabajos en Vidrio", "Vajillas y Cocina"),
    ("Tejeduría", "Textiles y Moda"),
    ("Textilería", "Textiles y Moda"),
    ("Trabajos en Tela", "Textiles y Moda"),
    ("Textiles No Tejidos", "Textiles y Moda"),
    ("Carpintería y Ebanistería", "Muebles"),
    ("Trabajos en Guadua/Bambú", "Muebles"),
    ("Metalistería", "Decoración del Hogar"),
    ("Forja", "Decoración del Hogar"),
    ("Trabajo en Papel", "Decoración del Hogar"),
    ("Enchapado en Tamo", "Decoración del Hogar"),
    ("Barniz de Pasto", "Decoración del Hogar"),
    ("Enchapado", "Decoración del Hogar"),
    ("Tallado en Madera", "Decoración del Hogar"),
    ("Trabajos en Frutos Secos", "Decoración del Hogar"),
    ("Cuchillería", "Decoración del Hogar"),
    ("Trabajos en Piedra", "Arte y Esculturas"),
    ("Escultura", "Arte y Esculturas"),
    ("Arte Pictórico", "Arte y Esculturas"),
    ("Cosmética Artesanal", "Cuidado Personal"),
    ("Jabonería Artesanal", "Cuidado Personal"),
    ("Herbología/Aromaterapia", "Cuidado Personal"),
];

/// Canonical groupings for legacy category strings, keyed on the folded uppercase form.
const CATEGORY_GROUPS: &[(&[&str], &str)] = &[
    (&["CESTERIA"], "Cestería"),
    (&["TEJEDURIA"], "Tejeduría"),
    (&["JOYERIA", "BISUTERIA"], "Joyería"),
    (&["PAPEL MACHE"], "Papel Maché"),
    (&["LUTHERIA"], "Luthería"),
    (
        &[
            "TRABAJOS EN MADERA NAUFRAGA",
            "TRABAJOS EN MADERA",
            "TRABAJO EN MADERA",
        ],
        "Trabajos en madera",
    ),
    (&["TRABAJO EN TELA", "TELA SOBRE TELA"], "Trabajo en tela"),
    (
        &["TRABAJO EN CACHO", "HUESO Y COCO"],
        "Trabajo en cacho, hueso y coco",
    ),
    (&["TRABAJO EN NO MADERABLES"], "Trabajo en no maderables"),
];

pub fn is_marketplace_category(value: &str) -> bool {
    MARKETPLACE_CATEGORIES.contains(&value)
}

/// First keyword found in the lowercased `name description` wins.
pub fn category_from_keywords(name: &str, description: &str) -> Option<&'static str> {
    let text = format!("{} {}", name, description).to_lowercase();
    PRODUCT_KEYWORDS
        .iter()
        .find(|(keyword, _)| text.contains(keyword))
        .map(|(_, category)| *category)
}

/// Maps a canonical craft name to its marketplace category.
pub fn category_from_craft(craft: &str) -> Option<&'static str> {
    CRAFT_TO_CATEGORY
        .iter()
        .find(|(name, _)| *name == craft.trim())
        .map(|(_, category)| *category)
}

fn category_key(value: &str) -> String {
    fold_accents(&value.split_whitespace().collect::<Vec<_>>().join(" ")).to_uppercase()
}

/// Reduces a stored `MAIN/SUB/...` category to its canonical main group.
pub fn normalize_category(raw: Option<&str>) -> String {
    let Some(raw) = raw.filter(|value| !value.trim().is_empty()) else {
        return UNCATEGORIZED.to_string();
    };

    let main = raw.split('/').next().unwrap_or_default().trim();
    let key = category_key(main);

    CATEGORY_GROUPS
        .iter()
        .find(|(needles, _)| needles.iter().any(|needle| key.contains(needle)))
        .map(|(_, canonical)| canonical.to_string())
        .unwrap_or_else(|| title_case(main))
}

/// Second path segment of a stored category, if any.
pub fn subcategory(raw: Option<&str>) -> Option<String> {
    raw?.split('/').nth(1).map(|part| part.trim().to_string())
}

/// Display path: every segment title-cased and joined with `" > "`.
pub fn full_category_path(raw: Option<&str>) -> String {
    match raw.filter(|value| !value.trim().is_empty()) {
        Some(raw) => raw
            .split('/')
            .map(|part| title_case(part.trim()))
            .collect::<Vec<_>>()
            .join(" > "),
        None => UNCATEGORIZED.to_string(),
    }
}

/// True when a product category filter matches a stored category.
///
/// A single-segment filter compares canonical main groups. A `MAIN/SUB` filter compares
/// both segments, and matches a product that has no subcategory.
pub fn matches_category_filter(product_category: Option<&str>, filter: &str) -> bool {
    let Some(product_category) = product_category else {
        return false;
    };
    if filter.trim().is_empty() {
        return true;
    }

    let filter_parts: Vec<&str> = filter.split('/').map(str::trim).collect();
    let product_parts: Vec<&str> = product_category.split('/').map(str::trim).collect();

    match filter_parts.as_slice() {
        [_] => {
            comparison_key(&normalize_category(Some(product_category)))
                == comparison_key(&normalize_category(Some(filter)))
        }
        [main, sub] => {
            if category_key(product_parts[0]) != category_key(main) {
                return false;
            }
            product_parts
                .get(1)
                .map_or(true, |product_sub| category_key(product_sub) == category_key(sub))
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("Aretes de filigrana", "en plata" => Some("Joyería y Accesorios"); "earrings")]
    #[test_case("Mochila wayuu", "tejida a mano" => Some("Bolsos y Carteras"); "wayuu bag")]
    #[test_case("Pieza única", "hecha con cariño" => None; "no keyword")]
    #[test_case("Vela aromática", "" => Some("Iluminación"); "candle")]
    fn detects_category_from_keywords(name: &str, description: &str) -> Option<&'static str> {
        category_from_keywords(name, description)
    }

    #[test]
    fn keyword_order_is_respected() {
        // "collar" appears before "plato" in the table
        assert_eq!(
            category_from_keywords("Plato con collar", ""),
            Some("Joyería y Accesorios")
        );
    }

    #[test]
    fn every_craft_maps_into_the_marketplace_list() {
        for (_, category) in CRAFT_TO_CATEGORY {
            assert!(is_marketplace_category(category), "{category}");
        }
        for (_, category) in PRODUCT_KEYWORDS {
            assert!(is_marketplace_category(category), "{category}");
        }
    }

    #[test_case(None => "Otros"; "missing")]
    #[test_case(Some("TEJEDURÍA/TEJEDIDOS NO TEJIDOS") => "Tejeduría"; "accented main")]
    #[test_case(Some("tejeduria y cesteria") => "Cestería"; "cesteria wins")]
    #[test_case(Some("BISUTERÍA") => "Joyería"; "bisuteria groups into joyeria")]
    #[test_case(Some("trabajo en  madera/otros") => "Trabajos en madera"; "collapsed spaces")]
    #[test_case(Some("VIDRIO SOPLADO") => "Vidrio Soplado"; "unknown is title cased")]
    fn normalizes_category(raw: Option<&str>) -> String {
        normalize_category(raw)
    }

    #[test]
    fn splits_subcategory_and_path() {
        let raw = Some("TEJEDURÍA/TEJEDIDOS NO TEJIDOS/TRABAJO EN MADERA");
        assert_eq!(subcategory(raw).as_deref(), Some("TEJEDIDOS NO TEJIDOS"));
        assert_eq!(
            full_category_path(raw),
            "Tejeduría > Tejedidos No Tejidos > Trabajo En Madera"
        );
        assert_eq!(subcategory(Some("CERÁMICA")), None);
        assert_eq!(full_category_path(None), "Otros");
    }

    #[test]
    fn category_filter_matches_main_and_sub() {
        let product = Some("TEJEDURÍA/TEJEDIDOS NO TEJIDOS");
        assert!(matches_category_filter(product, "Tejeduria"));
        assert!(matches_category_filter(product, "TEJEDURIA/tejedidos no tejidos"));
        assert!(!matches_category_filter(product, "TEJEDURIA/HAMACAS"));
        assert!(matches_category_filter(Some("TEJEDURÍA"), "TEJEDURIA/HAMACAS"));
        assert!(!matches_category_filter(None, "Tejeduría"));
    }
}
