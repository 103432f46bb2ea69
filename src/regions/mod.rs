//! Free-text Colombian location parsing.
//!
//! Shops were historically created with a single `region` string ("Ráquira, Boyacá",
//! "Cra 7 # 12-30 Bogotá", ...). [`parse_region_string`] turns those strings into a
//! department/municipality pair the carrier and the marketplace filters can use.

mod tables;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use tables::{CITY_ALIASES, DEPARTMENT_ALIASES};

static COUNTRY_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i),?\s*colombia\s*$").expect("valid country regex"));

static STREET_ADDRESS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(?:calle|carrera|cra|cr|cl|barrio|br|avenida|av|transversal|diagonal)\b\s*.+",
    )
    .expect("valid address regex")
});

static TRAILING_STREET: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\s+(?:calle|carrera|cra|cr|cl|barrio|br|avenida|av)\b.*")
        .expect("valid street regex")
});

static ADDRESS_INDICATOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(?:calle|carrera|cra|cr|cl|barrio|br|avenida|av|transversal|diagonal)\b|#|\d",
    )
    .expect("valid indicator regex")
});

/// City aliases sorted longest first so "villa de leyva" is tried before shorter names.
static CITIES_BY_LENGTH: Lazy<Vec<(&'static str, (&'static str, &'static str))>> =
    Lazy::new(|| {
        let mut cities = CITY_ALIASES.to_vec();
        cities.sort_by_key(|(alias, _)| std::cmp::Reverse(alias.chars().count()));
        cities
    });

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

/// Structured location extracted from a free-text region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ParsedRegion {
    pub department: String,
    pub municipality: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    pub confidence: Confidence,
}

impl ParsedRegion {
    fn low() -> Self {
        Self {
            department: String::new(),
            municipality: String::new(),
            address: None,
            confidence: Confidence::Low,
        }
    }

    /// Both department and municipality were recognised.
    pub fn is_complete(&self) -> bool {
        !self.department.is_empty() && !self.municipality.is_empty()
    }

    /// Canonical `MUNICIPALITY, DEPARTMENT` form stored back on the shop.
    pub fn canonical_region(&self) -> String {
        format!("{}, {}", self.municipality, self.department)
    }
}

fn department_for(alias: &str) -> Option<&'static str> {
    DEPARTMENT_ALIASES
        .iter()
        .find(|(known, _)| *known == alias)
        .map(|(_, department)| *department)
}

fn contains_alias(text: &str, words: &[&str], alias: &str) -> bool {
    if alias.contains(' ') {
        text.contains(alias)
    } else {
        words.iter().any(|word| *word == alias)
    }
}

fn street_address(text: &str) -> Option<String> {
    STREET_ADDRESS.find(text).map(|m| m.as_str().to_string())
}

/// Parses a free-text Colombian location.
///
/// Rules are tried in order: known city, `municipality, department`, bare department,
/// street address, and finally the whole text as a municipality name.
pub fn parse_region_string(region: &str) -> ParsedRegion {
    let lowered = region.trim().to_lowercase();
    if lowered.is_empty() {
        return ParsedRegion::low();
    }

    let stripped = COUNTRY_SUFFIX.replace(&lowered, "");
    let text = stripped.split_whitespace().collect::<Vec<_>>().join(" ");
    let words: Vec<&str> = text
        .split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .collect();

    if let Some((_, (department, municipality))) = CITIES_BY_LENGTH
        .iter()
        .find(|(alias, _)| contains_alias(&text, &words, alias))
    {
        return ParsedRegion {
            department: department.to_string(),
            municipality: municipality.to_string(),
            address: street_address(&text),
            confidence: Confidence::High,
        };
    }

    let parts: Vec<&str> = text
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect();

    if parts.len() >= 2 {
        if let Some(department) = parts.last().and_then(|last| department_for(last)) {
            let first = parts[0];
            let municipality = TRAILING_STREET
                .replace(&first.to_uppercase(), "")
                .trim()
                .to_string();
            let address = street_address(first).or_else(|| {
                (parts.len() > 2).then(|| parts[1..parts.len() - 1].join(", "))
            });

            return ParsedRegion {
                department: department.to_string(),
                municipality,
                address,
                confidence: Confidence::High,
            };
        }
    }

    if let Some(department) = department_for(&text) {
        return ParsedRegion {
            department: department.to_string(),
            confidence: Confidence::Medium,
            ..ParsedRegion::low()
        };
    }

    if ADDRESS_INDICATOR.is_match(&text) {
        return ParsedRegion {
            address: Some(text),
            ..ParsedRegion::low()
        };
    }

    ParsedRegion {
        municipality: text.to_uppercase(),
        ..ParsedRegion::low()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Bogotá, Colombia", "BOGOTÁ D.C.", "BOGOTÁ D.C.")]
    #[case("villa de leyva", "BOYACÁ", "VILLA DE LEYVA")]
    #[case("Ráquira, Boyacá", "BOYACÁ", "RÁQUIRA")]
    #[case("La Chamba, Tolima", "TOLIMA", "GUAMO")]
    #[case("  MOMPOX  ", "BOLÍVAR", "SANTA CRUZ DE MOMPOX")]
    #[case("Arauca", "ARAUCA", "ARAUCA")]
    fn known_cities_resolve_with_high_confidence(
        #[case] input: &str,
        #[case] department: &str,
        #[case] municipality: &str,
    ) {
        let parsed = parse_region_string(input);
        assert_eq!(parsed.department, department);
        assert_eq!(parsed.municipality, municipality);
        assert_eq!(parsed.confidence, Confidence::High);
    }

    #[test]
    fn city_rule_captures_street_address() {
        let parsed = parse_region_string("Medellín calle 10 # 43-20");
        assert_eq!(parsed.municipality, "MEDELLÍN");
        assert_eq!(parsed.address.as_deref(), Some("calle 10 # 43-20"));
    }

    #[test]
    fn single_word_aliases_need_a_whole_word() {
        let parsed = parse_region_string("Caliente");
        assert_eq!(parsed.department, "");
        assert_eq!(parsed.municipality, "CALIENTE");
        assert_eq!(parsed.confidence, Confidence::Low);
    }

    #[test]
    fn municipality_department_pair() {
        let parsed = parse_region_string("San Gil, Santander, Colombia");
        assert_eq!(parsed.department, "SANTANDER");
        assert_eq!(parsed.municipality, "SAN GIL");
        assert_eq!(parsed.address, None);
        assert_eq!(parsed.confidence, Confidence::High);
        assert_eq!(parsed.canonical_region(), "SAN GIL, SANTANDER");
    }

    #[test]
    fn pair_with_street_and_middle_parts() {
        let parsed = parse_region_string("Chía carrera 9, vereda Fonquetá, Cundinamarca");
        assert_eq!(parsed.department, "CUNDINAMARCA");
        assert_eq!(parsed.municipality, "CHÍA");
        assert_eq!(parsed.address.as_deref(), Some("carrera 9"));

        let parsed = parse_region_string("Chía, vereda Fonquetá, Cundinamarca");
        assert_eq!(parsed.address.as_deref(), Some("vereda fonquetá"));
    }

    #[test]
    fn bare_department_is_medium_confidence() {
        let parsed = parse_region_string("Guajira");
        assert_eq!(parsed.department, "LA GUAJIRA");
        assert_eq!(parsed.municipality, "");
        assert_eq!(parsed.confidence, Confidence::Medium);
        assert!(!parsed.is_complete());
    }

    #[test]
    fn street_only_text_is_kept_as_address() {
        let parsed = parse_region_string("Vereda El Hato km 5");
        assert_eq!(parsed.department, "");
        assert_eq!(parsed.municipality, "");
        assert_eq!(parsed.address.as_deref(), Some("vereda el hato km 5"));
        assert_eq!(parsed.confidence, Confidence::Low);
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("Colombia")]
    fn empty_input_has_no_fields(#[case] input: &str) {
        let parsed = parse_region_string(input);
        assert_eq!(parsed.department, "");
        assert_eq!(parsed.municipality, "");
        assert_eq!(parsed.confidence, Confidence::Low);
    }
}
