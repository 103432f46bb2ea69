use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Catalog product owned by a shop
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "products")]
#[schema(as = Product)]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub shop_id: Uuid,
    pub name: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub short_description: Option<String>,
    #[sea_orm(column_type = "Decimal(Some((19, 4)))")]
    pub price: Decimal,
    #[sea_orm(column_type = "Decimal(Some((19, 4)))", nullable)]
    pub compare_price: Option<Decimal>,
    pub category: Option<String>,
    pub subcategory: Option<String>,
    #[sea_orm(column_type = "Json")]
    #[schema(value_type = Vec<String>)]
    pub images: Json,
    #[sea_orm(column_type = "Json")]
    #[schema(value_type = Vec<String>)]
    pub tags: Json,
    #[sea_orm(column_type = "Json")]
    #[schema(value_type = Vec<String>)]
    pub materials: Json,
    #[sea_orm(column_type = "Json")]
    #[schema(value_type = Vec<String>)]
    pub techniques: Json,
    pub inventory: i32,
    pub sku: Option<String>,
    pub moderation_status: ModerationStatus,
    pub active: bool,
    pub featured: bool,
    #[sea_orm(column_type = "Decimal(Some((10, 3)))", nullable)]
    pub weight: Option<Decimal>,
    /// `{length, width, height}` in centimetres
    #[sea_orm(column_type = "Json", nullable)]
    #[schema(value_type = Option<Object>)]
    pub dimensions: Option<Json>,
    pub shipping_data_complete: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::artisan_shop::Entity",
        from = "Column::ShopId",
        to = "super::artisan_shop::Column::Id"
    )]
    Shop,
    #[sea_orm(has_many = "super::product_variant::Entity")]
    Variants,
    #[sea_orm(has_many = "super::product_moderation_history::Entity")]
    ModerationHistory,
}

impl Related<super::artisan_shop::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Shop.def()
    }
}

impl Related<super::product_variant::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Variants.def()
    }
}

impl Related<super::product_moderation_history::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ModerationHistory.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Moderation state gating marketplace visibility
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[serde(rename_all = "snake_case")]
pub enum ModerationStatus {
    #[sea_orm(string_value = "draft")]
    Draft,
    #[sea_orm(string_value = "pending_moderation")]
    PendingModeration,
    #[sea_orm(string_value = "approved")]
    Approved,
    #[sea_orm(string_value = "approved_with_edits")]
    ApprovedWithEdits,
    #[sea_orm(string_value = "changes_requested")]
    ChangesRequested,
    #[sea_orm(string_value = "rejected")]
    Rejected,
}

impl ModerationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::PendingModeration => "pending_moderation",
            Self::Approved => "approved",
            Self::ApprovedWithEdits => "approved_with_edits",
            Self::ChangesRequested => "changes_requested",
            Self::Rejected => "rejected",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "draft" => Some(Self::Draft),
            "pending_moderation" => Some(Self::PendingModeration),
            "approved" => Some(Self::Approved),
            "approved_with_edits" => Some(Self::ApprovedWithEdits),
            "changes_requested" => Some(Self::ChangesRequested),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }

    pub const ALL: [ModerationStatus; 6] = [
        Self::PendingModeration,
        Self::Approved,
        Self::ApprovedWithEdits,
        Self::ChangesRequested,
        Self::Rejected,
        Self::Draft,
    ];

    /// Approved products are visible on the marketplace
    pub fn is_published(&self) -> bool {
        matches!(self, Self::Approved | Self::ApprovedWithEdits)
    }
}
