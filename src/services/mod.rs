// Storefront
pub mod brand_themes;
pub mod shop_regions;
pub mod shops;

// Catalog
pub mod inventory;
pub mod moderation;
pub mod products;

// Checkout
pub mod gift_cards;
pub mod promotions;
pub mod shipping;

// Coaching
pub mod maturity;

pub mod notifications;

use validator::ValidationError;

/// Field validator: the value must be a JSON object.
pub fn validate_json_object(value: &serde_json::Value) -> Result<(), ValidationError> {
    if value.is_object() {
        Ok(())
    } else {
        Err(ValidationError::new("must_be_object"))
    }
}

/// Field validator: lowercase ASCII words joined by single dashes.
pub fn validate_slug(value: &str) -> Result<(), ValidationError> {
    if crate::services::shops::is_valid_slug(value) {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_slug"))
    }
}

/// Field validator: the amount must not be negative.
pub fn validate_non_negative(value: &rust_decimal::Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() {
        Err(ValidationError::new("must_not_be_negative"))
    } else {
        Ok(())
    }
}

/// Deserializes an optional string trimmed, with blank values read as absent.
pub fn trimmed_opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw: Option<String> = serde::Deserialize::deserialize(deserializer)?;
    Ok(raw
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty()))
}

/// Offset for a 1-based page number.
pub(crate) fn page_offset(page: u64, per_page: u64) -> u64 {
    page.saturating_sub(1).saturating_mul(per_page)
}
