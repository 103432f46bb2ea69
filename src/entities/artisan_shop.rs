use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A seller's storefront
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "artisan_shops")]
#[schema(as = ArtisanShop)]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub shop_name: String,
    #[sea_orm(unique)]
    pub shop_slug: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub story: Option<String>,
    pub logo_url: Option<String>,
    pub banner_url: Option<String>,
    pub craft_type: Option<String>,
    pub region: Option<String>,
    pub department: Option<String>,
    pub municipality: Option<String>,
    #[sea_orm(column_type = "Json")]
    #[schema(value_type = Vec<String>)]
    pub certifications: Json,
    #[sea_orm(column_type = "Json", nullable)]
    #[schema(value_type = Option<Object>)]
    pub contact_info: Option<Json>,
    #[sea_orm(column_type = "Json", nullable)]
    #[schema(value_type = Option<Object>)]
    pub social_links: Option<Json>,
    pub active: bool,
    pub featured: bool,
    pub publish_status: PublishStatus,
    pub marketplace_approved: bool,
    pub marketplace_approved_at: Option<DateTime<Utc>>,
    pub marketplace_approved_by: Option<Uuid>,
    /// Opaque reference to the payout account; presence means bank data is on file
    pub bank_account_ref: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::product::Entity")]
    Products,
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Products.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "snake_case")]
pub enum PublishStatus {
    #[sea_orm(string_value = "pending_publish")]
    PendingPublish,
    #[sea_orm(string_value = "published")]
    Published,
}
