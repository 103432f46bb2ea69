use crate::{
    catalog::{
        crafts::UNSPECIFIED, is_valid_cross_sell, normalize_craft_type, normalize_materials,
        normalize_techniques, resolve_category, CategorySignals, CategorySource,
    },
    clients::{AiClassifier, ArtisanClassification, ProductContext},
    db::DbPool,
    entities::{
        artisan_shop::Entity as ArtisanShop,
        product::{self, Entity as Product, ModerationStatus},
    },
    errors::ServiceError,
};
use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, instrument, warn};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// New product submitted for categorization and moderation
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CategorizeProduct {
    pub shop_id: Uuid,
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(min = 1))]
    pub description: String,
    pub short_description: Option<String>,
    #[validate(custom = "crate::services::validate_non_negative")]
    #[schema(value_type = Option<String>, example = "85000")]
    pub price: Option<Decimal>,
    #[validate(custom = "crate::services::validate_non_negative")]
    #[schema(value_type = Option<String>)]
    pub compare_price: Option<Decimal>,
    #[serde(default)]
    pub images: Vec<String>,
    #[validate(range(min = 0))]
    pub inventory: Option<i32>,
    pub sku: Option<String>,
    #[validate(custom = "crate::services::validate_non_negative")]
    #[schema(value_type = Option<String>)]
    pub weight: Option<Decimal>,
    #[schema(value_type = Option<Object>)]
    pub dimensions: Option<Value>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CategorizedProduct {
    pub product: product::Model,
    pub marketplace_category: String,
    pub category_source: CategorySource,
    pub shop_craft_type: Option<String>,
    pub artisan_tags: ArtisanClassification,
}

/// Weight above zero and every dimension (length, width, height) above zero.
pub fn shipping_data_complete(weight: Option<Decimal>, dimensions: Option<&Value>) -> bool {
    let has_weight = weight.map_or(false, |w| w > Decimal::ZERO);
    let has_dimensions = dimensions.map_or(false, |dims| {
        ["length", "width", "height"].iter().all(|axis| {
            dims.get(axis)
                .and_then(|v| v.as_f64().or_else(|| v.as_str()?.trim().parse().ok()))
                .map_or(false, |v| v > 0.0)
        })
    });
    has_weight && has_dimensions
}

/// Craft tag first (when known), then the marketplace category.
fn build_tags(oficio: Option<&str>, category: &str) -> Vec<String> {
    let mut tags = Vec::with_capacity(2);
    if let Some(oficio) = oficio.filter(|value| !value.trim().is_empty()) {
        tags.push(oficio.trim().to_string());
    }
    tags.push(category.to_string());
    tags
}

/// Runs the classifier if one is configured; any failure yields an empty classification.
async fn classify_or_empty(
    classifier: Option<&dyn AiClassifier>,
    context: &ProductContext,
) -> ArtisanClassification {
    let Some(classifier) = classifier else {
        return ArtisanClassification::default();
    };
    match classifier.classify(context).await {
        Ok(classification) => classification,
        Err(err) => {
            warn!(error = %err, product = %context.name, "classification unavailable, using local signals");
            ArtisanClassification::default()
        }
    }
}

#[derive(Clone)]
pub struct ProductService {
    db: Arc<DbPool>,
    classifier: Option<Arc<dyn AiClassifier>>,
}

impl ProductService {
    pub fn new(db: Arc<DbPool>, classifier: Option<Arc<dyn AiClassifier>>) -> Self {
        Self { db, classifier }
    }

    /// Classifies a new product, resolves its marketplace category and stores it pending
    /// moderation.
    #[instrument(skip(self, input), fields(shop_id = %input.shop_id, name = %input.name))]
    pub async fn categorize(
        &self,
        input: CategorizeProduct,
    ) -> Result<CategorizedProduct, ServiceError> {
        input.validate()?;

        let shop = ArtisanShop::find_by_id(input.shop_id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::not_found("shop", input.shop_id))?;

        let shop_craft_type = Some(normalize_craft_type(shop.craft_type.as_deref()))
            .filter(|craft| craft != UNSPECIFIED);

        let context = ProductContext {
            name: input.name.clone(),
            description: input.description.clone(),
            shop_name: Some(shop.shop_name.clone()),
            shop_craft: shop_craft_type.clone(),
            shop_description: shop.description.clone(),
        };
        let classification = classify_or_empty(self.classifier.as_deref(), &context).await;

        let (category, source) = resolve_category(CategorySignals {
            name: &input.name,
            description: &input.description,
            ai_category: classification.categoria_marketplace.as_deref(),
            ai_craft: classification.oficio.as_deref(),
            shop_craft: shop_craft_type.as_deref(),
        });

        if let Some(craft) = shop_craft_type.as_deref() {
            if !is_valid_cross_sell(craft, category) {
                warn!(
                    shop_craft = craft,
                    category, "category is unusual for the shop's craft"
                );
            }
        }

        let tags = build_tags(classification.oficio.as_deref(), category);
        let subcategory = classification
            .oficio
            .clone()
            .or_else(|| shop_craft_type.clone());
        let shipping_complete = shipping_data_complete(input.weight, input.dimensions.as_ref());

        let now = Utc::now();
        let product = product::ActiveModel {
            id: Set(Uuid::new_v4()),
            shop_id: Set(input.shop_id),
            name: Set(input.name),
            description: Set(Some(input.description)),
            short_description: Set(input.short_description),
            price: Set(input.price.unwrap_or_default()),
            compare_price: Set(input.compare_price),
            category: Set(Some(category.to_string())),
            subcategory: Set(subcategory),
            images: Set(Value::from(input.images)),
            tags: Set(Value::from(tags)),
            materials: Set(Value::from(normalize_materials(&classification.materia_prima))),
            techniques: Set(Value::from(normalize_techniques(&classification.tecnicas))),
            inventory: Set(input.inventory.unwrap_or(0)),
            sku: Set(input.sku),
            moderation_status: Set(ModerationStatus::PendingModeration),
            active: Set(false),
            featured: Set(false),
            weight: Set(input.weight),
            dimensions: Set(input.dimensions),
            shipping_data_complete: Set(shipping_complete),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&*self.db)
        .await?;

        info!(product_id = %product.id, category, source = ?source, "product categorized");
        Ok(CategorizedProduct {
            product,
            marketplace_category: category.to_string(),
            category_source: source,
            shop_craft_type,
            artisan_tags: classification,
        })
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: Uuid) -> Result<product::Model, ServiceError> {
        Product::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::not_found("product", id))
    }

    /// Products of a shop, newest first.
    #[instrument(skip(self))]
    pub async fn list_by_shop(&self, shop_id: Uuid) -> Result<Vec<product::Model>, ServiceError> {
        ArtisanShop::find_by_id(shop_id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::not_found("shop", shop_id))?;

        Ok(Product::find()
            .filter(product::Column::ShopId.eq(shop_id))
            .order_by_desc(product::Column::CreatedAt)
            .all(&*self.db)
            .await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::ai::MockAiClassifier;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn shipping_data_requires_weight_and_all_dimensions() {
        let dims = json!({"length": 20, "width": 10, "height": "5"});
        assert!(shipping_data_complete(Some(dec!(1.5)), Some(&dims)));
        assert!(!shipping_data_complete(None, Some(&dims)));
        assert!(!shipping_data_complete(Some(dec!(0)), Some(&dims)));
        assert!(!shipping_data_complete(
            Some(dec!(1)),
            Some(&json!({"length": 20, "width": 10}))
        ));
        assert!(!shipping_data_complete(
            Some(dec!(1)),
            Some(&json!({"length": 20, "width": 0, "height": 3}))
        ));
    }

    #[test]
    fn tags_put_craft_before_category() {
        assert_eq!(
            build_tags(Some("Cerámica"), "Vajillas y Cocina"),
            vec!["Cerámica", "Vajillas y Cocina"]
        );
        assert_eq!(build_tags(Some("  "), "Muebles"), vec!["Muebles"]);
        assert_eq!(build_tags(None, "Muebles"), vec!["Muebles"]);
    }

    #[tokio::test]
    async fn classifier_failure_yields_empty_classification() {
        let mut classifier = MockAiClassifier::new();
        classifier
            .expect_classify()
            .times(1)
            .returning(|_| Err(ServiceError::ExternalServiceError("timeout".into())));

        let result = classify_or_empty(Some(&classifier), &ProductContext::default()).await;
        assert_eq!(result, ArtisanClassification::default());
    }

    #[tokio::test]
    async fn classifier_result_is_passed_through() {
        let mut classifier = MockAiClassifier::new();
        classifier.expect_classify().returning(|_| {
            Ok(ArtisanClassification {
                oficio: Some("Cestería".into()),
                ..Default::default()
            })
        });

        let result = classify_or_empty(Some(&classifier), &ProductContext::default()).await;
        assert_eq!(result.oficio.as_deref(), Some("Cestería"));
    }

    #[tokio::test]
    async fn missing_classifier_is_not_an_error() {
        let result = classify_or_empty(None, &ProductContext::default()).await;
        assert!(result.oficio.is_none());
    }
}
