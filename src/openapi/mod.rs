use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

/// Registers the `bearer_auth` scheme referenced by every protected path
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Artisan Market API",
        version = "1.0.0",
        description = r#"
# Artisan Market API

Storefronts, catalog moderation, promotions and shipping quotes for an artisan marketplace,
plus business-maturity coaching scores for the artisans behind the shops.

## Authentication

Every `/api/v1` endpoint except `/api/v1/status` expects an HS256 bearer token:

```
Authorization: Bearer <your-jwt-token>
```

Moderation and admin endpoints additionally require the `moderator` or `admin` role.

## Error Handling

Failures share one body shape:

```json
{
  "error": "Bad Request",
  "message": "Promo code rejected: ...",
  "details": "Esta gift card ha expirado",
  "request_id": "req-abc123",
  "timestamp": "2026-01-01T00:00:00Z"
}
```

## Pagination

Shop listings accept `page` (default 1) and `limit` (server default and maximum apply).
Moderation queues accept `page` and `page_size`.
        "#,
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development")
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "brand-themes", description = "Palette and style configurations"),
        (name = "shops", description = "Artisan storefronts"),
        (name = "products", description = "Product creation and categorization"),
        (name = "moderation", description = "Product and shop review queues"),
        (name = "inventory", description = "Variants and the stock ledger"),
        (name = "promotions", description = "Coupons and promo code redemption"),
        (name = "gift-cards", description = "Gift card issuing and balance lookup"),
        (name = "shipping", description = "Carrier quotes grouped by shop"),
        (name = "maturity", description = "Business maturity scores"),
        (name = "notifications", description = "In-app notifications"),
        (name = "admin", description = "Operator maintenance endpoints")
    ),
    paths(
        // Brand themes
        crate::handlers::brand_themes::create_brand_theme,
        crate::handlers::brand_themes::list_brand_themes,
        crate::handlers::brand_themes::get_brand_theme,
        crate::handlers::brand_themes::get_brand_theme_by_theme_id,
        crate::handlers::brand_themes::update_brand_theme,
        crate::handlers::brand_themes::delete_brand_theme,
        crate::handlers::brand_themes::activate_brand_theme,

        // Shops
        crate::handlers::shops::create_shop,
        crate::handlers::shops::list_shops,
        crate::handlers::shops::get_shop,
        crate::handlers::shops::get_shop_by_slug,
        crate::handlers::shops::get_shop_by_user,
        crate::handlers::shops::update_shop,
        crate::handlers::shops::delete_shop,
        crate::handlers::shops::publish_shop,
        crate::handlers::shops::list_shop_products,

        // Products
        crate::handlers::products::categorize_product,
        crate::handlers::products::get_product,
        crate::handlers::products::product_moderation_history,

        // Moderation & admin
        crate::handlers::moderation::moderation_queue,
        crate::handlers::moderation::moderate_product,
        crate::handlers::moderation::set_marketplace_approval,
        crate::handlers::admin::normalize_shop_regions,

        // Inventory
        crate::handlers::inventory::create_variant,
        crate::handlers::inventory::get_variant,
        crate::handlers::inventory::list_product_variants,
        crate::handlers::inventory::record_movement,
        crate::handlers::inventory::list_movements,
        crate::handlers::inventory::low_stock,

        // Promotions & gift cards
        crate::handlers::promotions::validate_promo_code,
        crate::handlers::promotions::apply_promo_code,
        crate::handlers::promotions::create_coupon,
        crate::handlers::gift_cards::generate_gift_cards,
        crate::handlers::gift_cards::get_gift_card,

        // Shipping
        crate::handlers::shipping::quote_shipping,

        // Maturity
        crate::handlers::maturity::create_score,
        crate::handlers::maturity::list_scores,
        crate::handlers::maturity::global_stats,
        crate::handlers::maturity::get_score,
        crate::handlers::maturity::update_score,
        crate::handlers::maturity::delete_score,
        crate::handlers::maturity::user_scores,
        crate::handlers::maturity::latest_user_score,
        crate::handlers::maturity::user_average,
        crate::handlers::maturity::user_evolution,

        // Notifications
        crate::handlers::notifications::list_notifications,
        crate::handlers::notifications::mark_notification,
    ),
    components(
        schemas(
            crate::errors::ErrorResponse,
            crate::services::moderation::ModerationAction,
            crate::services::moderation::QueueType,
            crate::services::shop_regions::RegionUpdateStatus,
            crate::services::maturity::Trend,
            crate::regions::ParsedRegion,
        )
    )
)]
pub struct ApiDocV1;

pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui")
        .url("/api-docs/openapi.json", ApiDocV1::openapi())
        .config(utoipa_swagger_ui::Config::from("/api-docs/openapi.json").try_it_out_enabled(true))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_documents_every_resource() {
        let openapi = ApiDocV1::openapi();
        let json = serde_json::to_string_pretty(&openapi).unwrap();
        assert!(json.contains("Artisan Market API"));
        assert!(json.contains("/api/v1/shops/{id}"));
        assert!(json.contains("/api/v1/shipping/quote"));
        assert!(json.contains("/api/v1/maturity-scores/user/{user_id}/evolution"));
        assert!(json.contains("bearer_auth"));
    }
}
