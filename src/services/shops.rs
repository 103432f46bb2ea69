use crate::{
    catalog::{crafts::UNSPECIFIED, normalize_craft_type, text::slugify},
    db::DbPool,
    entities::artisan_shop::{self, Entity as ArtisanShop, PublishStatus},
    errors::ServiceError,
};
use chrono::Utc;
use once_cell::sync::Lazy;
use regex::Regex;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, instrument};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

static SLUG_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").expect("valid slug regex"));

/// Upper bound on `-N` suffixes tried when deriving a slug from the shop name.
const MAX_SLUG_SUFFIX: u32 = 1000;

pub fn is_valid_slug(slug: &str) -> bool {
    SLUG_PATTERN.is_match(slug)
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateShop {
    pub user_id: Uuid,
    #[validate(length(min = 1, max = 200))]
    pub shop_name: String,
    #[validate(length(max = 120), custom = "crate::services::validate_slug")]
    pub shop_slug: Option<String>,
    pub description: Option<String>,
    pub story: Option<String>,
    #[validate(url)]
    pub logo_url: Option<String>,
    #[validate(url)]
    pub banner_url: Option<String>,
    pub craft_type: Option<String>,
    pub region: Option<String>,
    pub department: Option<String>,
    pub municipality: Option<String>,
    #[serde(default)]
    pub certifications: Vec<String>,
    #[schema(value_type = Option<Object>)]
    pub contact_info: Option<Value>,
    #[schema(value_type = Option<Object>)]
    pub social_links: Option<Value>,
    pub bank_account_ref: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct PatchShop {
    #[validate(length(min = 1, max = 200))]
    pub shop_name: Option<String>,
    #[validate(length(max = 120), custom = "crate::services::validate_slug")]
    pub shop_slug: Option<String>,
    pub description: Option<String>,
    pub story: Option<String>,
    #[validate(url)]
    pub logo_url: Option<String>,
    #[validate(url)]
    pub banner_url: Option<String>,
    pub craft_type: Option<String>,
    pub region: Option<String>,
    pub department: Option<String>,
    pub municipality: Option<String>,
    pub certifications: Option<Vec<String>>,
    #[schema(value_type = Option<Object>)]
    pub contact_info: Option<Value>,
    #[schema(value_type = Option<Object>)]
    pub social_links: Option<Value>,
    pub active: Option<bool>,
    pub featured: Option<bool>,
    pub bank_account_ref: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct ShopFilter {
    pub active: Option<bool>,
    pub featured: Option<bool>,
    pub department: Option<String>,
    pub municipality: Option<String>,
}

/// Stored craft type: canonical name, or nothing when the input carries no craft.
fn stored_craft_type(raw: Option<&str>) -> Option<String> {
    let normalized = normalize_craft_type(raw);
    (normalized != UNSPECIFIED).then_some(normalized)
}

#[derive(Clone)]
pub struct ShopService {
    db: Arc<DbPool>,
}

impl ShopService {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self { db }
    }

    async fn slug_owner(&self, slug: &str) -> Result<Option<Uuid>, ServiceError> {
        Ok(ArtisanShop::find()
            .filter(artisan_shop::Column::ShopSlug.eq(slug))
            .one(&*self.db)
            .await?
            .map(|shop| shop.id))
    }

    /// First free slug among `base`, `base-2`, `base-3`, ...
    async fn generate_slug(&self, shop_name: &str) -> Result<String, ServiceError> {
        let mut base = slugify(shop_name);
        if base.is_empty() {
            base = "tienda".to_string();
        }

        if self.slug_owner(&base).await?.is_none() {
            return Ok(base);
        }
        for suffix in 2..=MAX_SLUG_SUFFIX {
            let candidate = format!("{}-{}", base, suffix);
            if self.slug_owner(&candidate).await?.is_none() {
                return Ok(candidate);
            }
        }

        Err(ServiceError::Conflict(format!(
            "no free slug derived from '{}'",
            base
        )))
    }

    #[instrument(skip(self, input), fields(user_id = %input.user_id))]
    pub async fn create(&self, input: CreateShop) -> Result<artisan_shop::Model, ServiceError> {
        input.validate()?;

        let existing = ArtisanShop::find()
            .filter(artisan_shop::Column::UserId.eq(input.user_id))
            .one(&*self.db)
            .await?;
        if existing.is_some() {
            return Err(ServiceError::Conflict(format!(
                "user {} already owns a shop",
                input.user_id
            )));
        }

        let slug = match input.shop_slug.as_deref() {
            Some(slug) => {
                if self.slug_owner(slug).await?.is_some() {
                    return Err(ServiceError::Conflict(format!(
                        "shop slug '{}' is already taken",
                        slug
                    )));
                }
                slug.to_string()
            }
            None => self.generate_slug(&input.shop_name).await?,
        };

        let now = Utc::now();
        let shop = artisan_shop::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(input.user_id),
            shop_name: Set(input.shop_name.trim().to_string()),
            shop_slug: Set(slug),
            description: Set(input.description),
            story: Set(input.story),
            logo_url: Set(input.logo_url),
            banner_url: Set(input.banner_url),
            craft_type: Set(stored_craft_type(input.craft_type.as_deref())),
            region: Set(input.region),
            department: Set(input.department),
            municipality: Set(input.municipality),
            certifications: Set(Value::from(input.certifications)),
            contact_info: Set(input.contact_info),
            social_links: Set(input.social_links),
            active: Set(true),
            featured: Set(false),
            publish_status: Set(PublishStatus::PendingPublish),
            marketplace_approved: Set(false),
            marketplace_approved_at: Set(None),
            marketplace_approved_by: Set(None),
            bank_account_ref: Set(input.bank_account_ref),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&*self.db)
        .await?;

        info!(shop_id = %shop.id, slug = %shop.shop_slug, "shop created");
        Ok(shop)
    }

    /// Returns one page of shops, newest first, with the total match count.
    #[instrument(skip(self))]
    pub async fn list(
        &self,
        filter: ShopFilter,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<artisan_shop::Model>, u64), ServiceError> {
        let mut query = ArtisanShop::find();
        if let Some(active) = filter.active {
            query = query.filter(artisan_shop::Column::Active.eq(active));
        }
        if let Some(featured) = filter.featured {
            query = query.filter(artisan_shop::Column::Featured.eq(featured));
        }
        if let Some(department) = filter.department {
            query = query.filter(artisan_shop::Column::Department.eq(department));
        }
        if let Some(municipality) = filter.municipality {
            query = query.filter(artisan_shop::Column::Municipality.eq(municipality));
        }

        let paginator = query
            .order_by_desc(artisan_shop::Column::CreatedAt)
            .paginate(&*self.db, per_page.max(1));
        let total = paginator.num_items().await?;
        let shops = paginator.fetch_page(page.saturating_sub(1)).await?;

        Ok((shops, total))
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: Uuid) -> Result<artisan_shop::Model, ServiceError> {
        ArtisanShop::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::not_found("shop", id))
    }

    #[instrument(skip(self))]
    pub async fn get_by_slug(&self, slug: &str) -> Result<artisan_shop::Model, ServiceError> {
        ArtisanShop::find()
            .filter(artisan_shop::Column::ShopSlug.eq(slug))
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::not_found("shop", slug))
    }

    #[instrument(skip(self))]
    pub async fn get_by_user(&self, user_id: Uuid) -> Result<artisan_shop::Model, ServiceError> {
        ArtisanShop::find()
            .filter(artisan_shop::Column::UserId.eq(user_id))
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("shop for user {} not found", user_id)))
    }

    #[instrument(skip(self, patch))]
    pub async fn update(
        &self,
        id: Uuid,
        patch: PatchShop,
    ) -> Result<artisan_shop::Model, ServiceError> {
        patch.validate()?;
        let current = self.get(id).await?;

        if let Some(slug) = patch.shop_slug.as_deref() {
            if slug != current.shop_slug {
                if let Some(owner) = self.slug_owner(slug).await? {
                    if owner != id {
                        return Err(ServiceError::Conflict(format!(
                            "shop slug '{}' is already taken",
                            slug
                        )));
                    }
                }
            }
        }

        let mut shop: artisan_shop::ActiveModel = current.into();
        if let Some(name) = patch.shop_name {
            shop.shop_name = Set(name.trim().to_string());
        }
        if let Some(slug) = patch.shop_slug {
            shop.shop_slug = Set(slug);
        }
        if let Some(description) = patch.description {
            shop.description = Set(Some(description));
        }
        if let Some(story) = patch.story {
            shop.story = Set(Some(story));
        }
        if let Some(logo_url) = patch.logo_url {
            shop.logo_url = Set(Some(logo_url));
        }
        if let Some(banner_url) = patch.banner_url {
            shop.banner_url = Set(Some(banner_url));
        }
        if let Some(craft_type) = patch.craft_type {
            shop.craft_type = Set(stored_craft_type(Some(&craft_type)));
        }
        if let Some(region) = patch.region {
            shop.region = Set(Some(region));
        }
        if let Some(department) = patch.department {
            shop.department = Set(Some(department));
        }
        if let Some(municipality) = patch.municipality {
            shop.municipality = Set(Some(municipality));
        }
        if let Some(certifications) = patch.certifications {
            shop.certifications = Set(Value::from(certifications));
        }
        if let Some(contact_info) = patch.contact_info {
            shop.contact_info = Set(Some(contact_info));
        }
        if let Some(social_links) = patch.social_links {
            shop.social_links = Set(Some(social_links));
        }
        if let Some(active) = patch.active {
            shop.active = Set(active);
        }
        if let Some(featured) = patch.featured {
            shop.featured = Set(featured);
        }
        if let Some(bank_account_ref) = patch.bank_account_ref {
            shop.bank_account_ref = Set(Some(bank_account_ref));
        }
        shop.updated_at = Set(Utc::now());

        Ok(shop.update(&*self.db).await?)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
        let result = ArtisanShop::delete_by_id(id).exec(&*self.db).await?;
        if result.rows_affected == 0 {
            return Err(ServiceError::not_found("shop", id));
        }
        info!(%id, "shop deleted");
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn publish(&self, id: Uuid) -> Result<artisan_shop::Model, ServiceError> {
        let current = self.get(id).await?;
        if current.publish_status == PublishStatus::Published {
            return Ok(current);
        }

        let mut shop: artisan_shop::ActiveModel = current.into();
        shop.publish_status = Set(PublishStatus::Published);
        shop.updated_at = Set(Utc::now());
        let shop = shop.update(&*self.db).await?;

        info!(%id, "shop published");
        Ok(shop)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("mi-tienda" => true ; "dashed words")]
    #[test_case("tienda2024" => true ; "digits allowed")]
    #[test_case("Mi-Tienda" => false ; "uppercase rejected")]
    #[test_case("mi--tienda" => false ; "double dash rejected")]
    #[test_case("-tienda" => false ; "leading dash rejected")]
    #[test_case("tienda-" => false ; "trailing dash rejected")]
    #[test_case("" => false ; "empty rejected")]
    fn slug_pattern(slug: &str) -> bool {
        is_valid_slug(slug)
    }

    #[test]
    fn slugified_names_pass_the_slug_pattern() {
        assert!(is_valid_slug(&slugify("Artesanías  de la Sierra!")));
    }

    #[test]
    fn craft_type_is_canonicalized_before_storage() {
        assert_eq!(stored_craft_type(None), None);
        assert_eq!(stored_craft_type(Some("  ")), None);
        assert!(stored_craft_type(Some("ceramica")).is_some());
    }
}
