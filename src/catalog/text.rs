//! Text folding helpers shared by the catalog and region tables.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Strips diacritics: decomposes to NFD and drops the combining marks.
///
/// Precomposed ("Cerámica") and decomposed ("Cera\u{301}mica") input fold alike.
pub fn fold_accents(input: &str) -> String {
    input.nfd().filter(|c| !is_combining_mark(*c)).collect()
}

/// Trims and collapses every whitespace run into a single space.
pub fn collapse_whitespace(input: &str) -> String {
    input.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Comparison key: collapsed whitespace, no accents, lowercase.
pub fn comparison_key(input: &str) -> String {
    fold_accents(&collapse_whitespace(input)).to_lowercase()
}

/// Uppercases the first letter of every space-separated word and lowercases the rest.
pub fn title_case(input: &str) -> String {
    input
        .trim()
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    let mut out: String = first.to_uppercase().collect();
                    out.push_str(&chars.as_str().to_lowercase());
                    out
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Builds a URL slug: lowercase ASCII, accents stripped, other runs collapsed to `-`.
pub fn slugify(input: &str) -> String {
    let folded = fold_accents(input).to_lowercase();
    let mut slug = String::with_capacity(folded.len());
    let mut pending_dash = false;
    for c in folded.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else {
            pending_dash = true;
        }
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folds_spanish_accents() {
        assert_eq!(fold_accents("Cerámica Ñandú"), "Ceramica Nandu");
    }

    #[test]
    fn decomposed_input_folds_like_precomposed() {
        let decomposed = "Cera\u{301}mica";
        assert_eq!(fold_accents(decomposed), "Ceramica");
        assert_eq!(slugify(decomposed), "ceramica");
        assert_eq!(comparison_key(decomposed), comparison_key("Cerámica"));
        assert_eq!(fold_accents("N\u{303}ame"), "Name");
    }

    #[test]
    fn title_cases_each_word() {
        assert_eq!(title_case("TEJEDIDOS NO TEJIDOS"), "Tejedidos No Tejidos");
        assert_eq!(title_case("  cerámica "), "Cerámica");
    }

    #[test]
    fn comparison_key_is_accent_and_case_insensitive() {
        assert_eq!(comparison_key("  Bogotá   D.C. "), "bogota d.c.");
    }

    #[test]
    fn slugify_collapses_separators() {
        assert_eq!(slugify("Taller  Cerámica & Barro!"), "taller-ceramica-barro");
        assert_eq!(slugify("--Ñame--"), "name");
        assert_eq!(slugify("¡¡!!"), "");
    }
}
