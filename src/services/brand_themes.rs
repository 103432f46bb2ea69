use crate::{
    db::DbPool,
    entities::brand_theme::{self, Entity as BrandTheme},
    errors::ServiceError,
};
use chrono::Utc;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, instrument};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateBrandTheme {
    #[validate(length(min = 1, max = 100))]
    pub theme_id: String,
    #[validate(custom = "crate::services::validate_json_object")]
    #[schema(value_type = Object)]
    pub palette: Value,
    #[schema(value_type = Option<Object>)]
    pub style_context: Option<Value>,
    #[schema(value_type = Option<Object>)]
    pub usage_rules: Option<Value>,
    pub preview_description: Option<String>,
    pub is_active: Option<bool>,
    pub user_id: Option<Uuid>,
}

/// Partial update; absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct PatchBrandTheme {
    #[validate(length(min = 1, max = 100))]
    pub theme_id: Option<String>,
    #[validate(custom = "crate::services::validate_json_object")]
    #[schema(value_type = Option<Object>)]
    pub palette: Option<Value>,
    #[schema(value_type = Option<Object>)]
    pub style_context: Option<Value>,
    #[schema(value_type = Option<Object>)]
    pub usage_rules: Option<Value>,
    pub preview_description: Option<String>,
    pub is_active: Option<bool>,
    pub user_id: Option<Uuid>,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct BrandThemeFilter {
    pub user_id: Option<Uuid>,
    pub is_active: Option<bool>,
}

/// Named palette and style configurations attachable to a user
#[derive(Clone)]
pub struct BrandThemeService {
    db: Arc<DbPool>,
}

impl BrandThemeService {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self { db }
    }

    async fn theme_id_taken(&self, theme_id: &str) -> Result<Option<Uuid>, ServiceError> {
        let existing = BrandTheme::find()
            .filter(brand_theme::Column::ThemeId.eq(theme_id))
            .one(&*self.db)
            .await?;
        Ok(existing.map(|theme| theme.id))
    }

    #[instrument(skip(self, input), fields(theme_id = %input.theme_id))]
    pub async fn create(
        &self,
        input: CreateBrandTheme,
    ) -> Result<brand_theme::Model, ServiceError> {
        input.validate()?;

        if self.theme_id_taken(&input.theme_id).await?.is_some() {
            return Err(ServiceError::Conflict(format!(
                "brand theme '{}' already exists",
                input.theme_id
            )));
        }

        let now = Utc::now();
        let theme = brand_theme::ActiveModel {
            id: Set(Uuid::new_v4()),
            theme_id: Set(input.theme_id),
            palette: Set(input.palette),
            style_context: Set(input.style_context),
            usage_rules: Set(input.usage_rules),
            preview_description: Set(input.preview_description),
            is_active: Set(input.is_active.unwrap_or(true)),
            user_id: Set(input.user_id),
            version: Set(1),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&*self.db)
        .await?;

        info!(id = %theme.id, "brand theme created");
        Ok(theme)
    }

    #[instrument(skip(self))]
    pub async fn list(
        &self,
        filter: BrandThemeFilter,
    ) -> Result<Vec<brand_theme::Model>, ServiceError> {
        let mut query = BrandTheme::find();
        if let Some(user_id) = filter.user_id {
            query = query.filter(brand_theme::Column::UserId.eq(user_id));
        }
        if let Some(is_active) = filter.is_active {
            query = query.filter(brand_theme::Column::IsActive.eq(is_active));
        }

        Ok(query
            .order_by_desc(brand_theme::Column::CreatedAt)
            .all(&*self.db)
            .await?)
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: Uuid) -> Result<brand_theme::Model, ServiceError> {
        BrandTheme::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::not_found("brand theme", id))
    }

    #[instrument(skip(self))]
    pub async fn get_by_theme_id(&self, theme_id: &str) -> Result<brand_theme::Model, ServiceError> {
        BrandTheme::find()
            .filter(brand_theme::Column::ThemeId.eq(theme_id))
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::not_found("brand theme", theme_id))
    }

    /// Applies every present field and bumps the version.
    #[instrument(skip(self, patch))]
    pub async fn update(
        &self,
        id: Uuid,
        patch: PatchBrandTheme,
    ) -> Result<brand_theme::Model, ServiceError> {
        patch.validate()?;
        let current = self.get(id).await?;

        if let Some(theme_id) = patch.theme_id.as_deref() {
            if theme_id != current.theme_id {
                if let Some(owner) = self.theme_id_taken(theme_id).await? {
                    if owner != id {
                        return Err(ServiceError::Conflict(format!(
                            "brand theme '{}' already exists",
                            theme_id
                        )));
                    }
                }
            }
        }

        let version = current.version;
        let mut theme: brand_theme::ActiveModel = current.into();
        if let Some(theme_id) = patch.theme_id {
            theme.theme_id = Set(theme_id);
        }
        if let Some(palette) = patch.palette {
            theme.palette = Set(palette);
        }
        if let Some(style_context) = patch.style_context {
            theme.style_context = Set(Some(style_context));
        }
        if let Some(usage_rules) = patch.usage_rules {
            theme.usage_rules = Set(Some(usage_rules));
        }
        if let Some(preview) = patch.preview_description {
            theme.preview_description = Set(Some(preview));
        }
        if let Some(is_active) = patch.is_active {
            theme.is_active = Set(is_active);
        }
        if let Some(user_id) = patch.user_id {
            theme.user_id = Set(Some(user_id));
        }
        theme.version = Set(version + 1);
        theme.updated_at = Set(Utc::now());

        Ok(theme.update(&*self.db).await?)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
        let result = BrandTheme::delete_by_id(id).exec(&*self.db).await?;
        if result.rows_affected == 0 {
            return Err(ServiceError::not_found("brand theme", id));
        }
        info!(%id, "brand theme deleted");
        Ok(())
    }

    /// Marks the theme active and deactivates the owner's other themes.
    #[instrument(skip(self))]
    pub async fn activate(&self, id: Uuid) -> Result<brand_theme::Model, ServiceError> {
        let theme = self
            .db
            .transaction::<_, brand_theme::Model, ServiceError>(move |txn| {
                Box::pin(async move {
                    let current = BrandTheme::find_by_id(id)
                        .one(txn)
                        .await?
                        .ok_or_else(|| ServiceError::not_found("brand theme", id))?;

                    let now = Utc::now();
                    if let Some(user_id) = current.user_id {
                        BrandTheme::update_many()
                            .col_expr(brand_theme::Column::IsActive, Expr::value(false))
                            .col_expr(brand_theme::Column::UpdatedAt, Expr::value(now))
                            .filter(brand_theme::Column::UserId.eq(user_id))
                            .filter(brand_theme::Column::Id.ne(id))
                            .filter(brand_theme::Column::IsActive.eq(true))
                            .exec(txn)
                            .await?;
                    }

                    let mut active: brand_theme::ActiveModel = current.into();
                    active.is_active = Set(true);
                    active.updated_at = Set(now);
                    Ok(active.update(txn).await?)
                })
            })
            .await?;

        info!(%id, "brand theme activated");
        Ok(theme)
    }
}
