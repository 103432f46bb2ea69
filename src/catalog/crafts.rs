//! Craft (oficio) vocabulary.

use super::text::{comparison_key, title_case};

pub const UNSPECIFIED: &str = "Sin especificar";

/// Crafts the classifier is asked to choose from.
pub const CRAFTS: &[&str] = &[
    "Carpintería y Ebanistería",
    "Trabajos en Guadua/Bambú",
    "Trabajos en Frutos Secos",
    "Cestería",
    "Tejeduría",
    "Textilería",
    "Textiles No Tejidos",
    "Trabajos en Tela",
    "Cerámica",
    "Alfarería",
    "Marroquinería",
    "Talabartería",
    "Guarnielería",
    "Tafilería",
    "Trabajos en Vidrio",
    "Trabajos en Piedra",
    "Orfebrería/Platería",
    "Joyería",
    "Bisutería",
    "Forja",
    "Metalistería",
    "Trabajo en Papel",
    "Enchapado en Tamo",
    "Barniz de Pasto",
    "Enchapado",
    "Trabajo en Cacho/Hueso",
    "Alambrismo",
    "Tallado en Madera",
    "Cuchillería",
    "Cosmética Artesanal",
    "Jabonería Artesanal",
    "Herbología/Aromaterapia",
];

pub const RAW_MATERIALS: &[&str] = &[
    "Madera",
    "Guadua/Bambú/Chonta/Corozo",
    "Frutos Secos y Semillas",
    "Fibras Naturales",
    "Hilos y Filamentos",
    "Telas",
    "Arcilla",
    "Cuero",
    "Vidrio",
    "Piedras",
    "Metales Preciosos",
    "Metales No Preciosos",
    "Papel",
    "Tamo",
    "Mopa Mopa",
    "Cacho/Hueso",
    "Alambre",
    "Aceites Esenciales",
    "Plantas Medicinales",
    "Ceras Naturales",
    "Mantecas Vegetales",
    "Arcillas Cosméticas",
    "Extractos Botánicos",
];

pub const TECHNIQUES: &[&str] = &[
    "Talla",
    "Taracea",
    "Torneado",
    "Calado",
    "Curvado",
    "Labrado",
    "Ensamble",
    "Laminado",
    "Rollo",
    "Radial",
    "Entrecruzado",
    "Tejido de Punto",
    "Tejido Plano",
    "Redes",
    "Anudados",
    "Trenzado",
    "Tejido en Chaquira",
    "Afieltrado",
    "Textil Vegetal",
    "Aplicación",
    "Fruncido",
    "Bordado",
    "Tintura por Reserva",
    "Modelado",
    "Plancha",
    "Vaciado en Molde",
    "Apretón en Molde",
    "Cincelado",
    "Repujado",
    "Preforma",
    "Armado",
    "Soplado",
    "Vitrofusión",
    "Vitralería",
    "Grabado",
    "Embutido",
    "Obra Plana",
    "Esmaltado",
    "Martillado",
    "Burilado",
    "Estampado",
    "Filigrana",
    "Engaste",
    "Casting",
    "Mokumé",
    "Recalcado",
    "Entorchado",
    "Soldadura al Fuego",
    "Fundición",
    "Doblado",
    "Cartapesta",
    "Papel Maché",
    "Recorte con Incrustación",
    "Recubrimiento",
    "Hojillado",
    "Enrollado",
    "Saponificación en Frío",
    "Maceración",
    "Destilación",
    "Infusión",
    "Emulsificación",
];

/// Exact synonyms, keyed on the folded lowercase form.
const CRAFT_SYNONYMS: &[(&str, &str)] = &[
    ("tejeduria", "Tejeduría"),
    ("tejido", "Tejeduría"),
    ("textileria", "Textilería"),
    ("textil", "Textilería"),
    ("textiles", "Textilería"),
    ("ceramica", "Cerámica"),
    ("alfareria", "Alfarería"),
    ("joyeria", "Joyería"),
    ("bisuteria", "Bisutería"),
    ("marroquineria", "Marroquinería"),
    ("cesteria", "Cestería"),
    ("carpinteria", "Carpintería y Ebanistería"),
    ("madera", "Carpintería y Ebanistería"),
    ("tallado", "Tallado en Madera"),
    ("cosmetica", "Cosmética Artesanal"),
    ("jaboneria", "Jabonería Artesanal"),
    ("cosmetics", "Cosmética Artesanal"),
    ("woodwork", "Carpintería y Ebanistería"),
    ("jewelry", "Joyería"),
    ("ceramics", "Cerámica"),
    ("leather", "Marroquinería"),
    ("basketry", "Cestería"),
];

/// Substring groupings for free-text craft descriptions, checked in order.
const CRAFT_GROUPS: &[(&str, &str)] = &[
    ("tejeduria", "Tejeduría"),
    ("tejido", "Tejeduría"),
    ("weaving", "Tejeduría"),
    ("knitting", "Tejeduría"),
    ("crochet", "Tejeduría"),
    ("macrame", "Tejeduría"),
    ("cesteria", "Cestería"),
    ("cestas", "Cestería"),
    ("canastos", "Cestería"),
    ("basket", "Cestería"),
    ("joyeria", "Joyería"),
    ("bisuteria", "Joyería"),
    ("alhajas", "Joyería"),
    ("orfebreria", "Joyería"),
    ("jewel", "Joyería"),
    ("accessories", "Joyería"),
    ("ceramica", "Cerámica"),
    ("alfareria", "Cerámica"),
    ("barro", "Cerámica"),
    ("arcilla", "Cerámica"),
    ("ceramic", "Cerámica"),
    ("pottery", "Cerámica"),
    ("carpinteria", "Carpintería y Ebanistería"),
    ("ebanisteria", "Carpintería y Ebanistería"),
    ("madera", "Carpintería y Ebanistería"),
    ("muebles", "Carpintería y Ebanistería"),
    ("woodwork", "Carpintería y Ebanistería"),
    ("textiles", "Textiles No Tejidos"),
    ("telas", "Textiles No Tejidos"),
    ("bordado", "Textiles No Tejidos"),
    ("embroidery", "Textiles No Tejidos"),
    ("sewing", "Textiles No Tejidos"),
    ("marroquineria", "Marroquinería"),
    ("cuero", "Marroquinería"),
    ("piel", "Marroquinería"),
    ("leather", "Marroquinería"),
    ("talla", "Talla en Madera"),
    ("escultura", "Talla en Madera"),
    ("carving", "Talla en Madera"),
    ("pintura", "Pintura Artesanal"),
    ("arte", "Pintura Artesanal"),
    ("painting", "Pintura Artesanal"),
    ("flores", "Arte Floral"),
    ("floral", "Arte Floral"),
    ("encuadernacion", "Encuadernación"),
    ("libros", "Encuadernación"),
    ("bookbinding", "Encuadernación"),
    ("metal", "Metalistería"),
    ("glass", "Vidriería"),
    ("vidrio", "Vidriería"),
    ("paper", "Trabajo en Papel"),
    ("papel", "Trabajo en Papel"),
    ("other", UNSPECIFIED),
    ("otro", UNSPECIFIED),
    ("n/a", UNSPECIFIED),
    ("none", UNSPECIFIED),
    ("unknown", UNSPECIFIED),
    ("desconocido", UNSPECIFIED),
];

/// Shop craft to the product categories that are coherent with it.
const CROSS_SELLS: &[(&str, &[&str])] = &[
    (
        "Tejeduría",
        &["Textiles y Moda", "Bolsos y Carteras", "Joyería y Accesorios"],
    ),
    (
        "Textilería",
        &["Textiles y Moda", "Bolsos y Carteras", "Joyería y Accesorios"],
    ),
    ("Cestería", &["Bolsos y Carteras", "Decoración del Hogar"]),
    (
        "Cerámica",
        &["Vajillas y Cocina", "Decoración del Hogar", "Arte y Esculturas"],
    ),
    (
        "Alfarería",
        &["Vajillas y Cocina", "Decoración del Hogar", "Arte y Esculturas"],
    ),
    (
        "Carpintería y Ebanistería",
        &["Muebles", "Decoración del Hogar", "Arte y Esculturas"],
    ),
    (
        "Tallado en Madera",
        &["Decoración del Hogar", "Arte y Esculturas", "Muebles"],
    ),
    ("Joyería", &["Joyería y Accesorios", "Decoración del Hogar"]),
    ("Bisutería", &["Joyería y Accesorios", "Decoración del Hogar"]),
    ("Marroquinería", &["Bolsos y Carteras", "Joyería y Accesorios"]),
    ("Cosmética Artesanal", &["Cuidado Personal"]),
    ("Jabonería Artesanal", &["Cuidado Personal"]),
];

/// Looks a craft up in the exact synonym table only.
pub fn canonical_craft(raw: &str) -> Option<&'static str> {
    let key = comparison_key(raw);
    CRAFT_SYNONYMS
        .iter()
        .find(|(synonym, _)| *synonym == key)
        .map(|(_, canonical)| *canonical)
}

/// Canonical craft name for a free-text craft type.
///
/// Exact synonyms win, then substring groups; anything else is title-cased.
/// Missing and generic values ("otro", "n/a", ...) become `Sin especificar`.
pub fn normalize_craft_type(raw: Option<&str>) -> String {
    let Some(raw) = raw.filter(|value| !value.trim().is_empty()) else {
        return UNSPECIFIED.to_string();
    };

    if let Some(canonical) = canonical_craft(raw) {
        return canonical.to_string();
    }

    let key = comparison_key(raw);
    CRAFT_GROUPS
        .iter()
        .find(|(needle, _)| key.contains(needle))
        .map(|(_, canonical)| canonical.to_string())
        .unwrap_or_else(|| title_case(raw))
}

/// Advisory check that a product category fits the shop's craft.
///
/// Crafts without a cross-sell entry accept every category.
pub fn is_valid_cross_sell(shop_craft: &str, category: &str) -> bool {
    CROSS_SELLS
        .iter()
        .find(|(craft, _)| *craft == shop_craft)
        .map_or(true, |(_, categories)| categories.contains(&category))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Some("tejeduria"), "Tejeduría")]
    #[case(Some("  CERÁMICA "), "Cerámica")]
    #[case(Some("Textil"), "Textilería")]
    #[case(Some("leather"), "Marroquinería")]
    #[case(Some("tejidos en crochet"), "Tejeduría")]
    #[case(Some("Alfarería tradicional"), "Cerámica")]
    #[case(Some("otros"), "Sin especificar")]
    #[case(Some("n/a"), "Sin especificar")]
    #[case(Some("luthería"), "Luthería")]
    #[case(Some("   "), "Sin especificar")]
    #[case(None, "Sin especificar")]
    fn normalizes_craft_types(#[case] raw: Option<&str>, #[case] expected: &str) {
        assert_eq!(normalize_craft_type(raw), expected);
    }

    #[test]
    fn cross_sell_rules() {
        assert!(is_valid_cross_sell("Cerámica", "Vajillas y Cocina"));
        assert!(!is_valid_cross_sell("Cerámica", "Cuidado Personal"));
        assert!(is_valid_cross_sell("Forja", "Cuidado Personal"));
    }

    #[test]
    fn synonyms_resolve_to_known_crafts() {
        for (_, canonical) in CRAFT_SYNONYMS {
            assert!(CRAFTS.contains(canonical), "{canonical}");
        }
    }
}
