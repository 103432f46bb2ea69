use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Coaching snapshot; each dimension is scored 0..=100
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "user_maturity_scores")]
#[schema(as = UserMaturityScore)]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub idea_validation: i32,
    pub user_experience: i32,
    pub market_fit: i32,
    pub monetization: i32,
    #[sea_orm(column_type = "Json", nullable)]
    #[schema(value_type = Option<Object>)]
    pub profile_data: Option<Json>,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Rounded mean of the four dimensions
    pub fn total_score(&self) -> i32 {
        let sum = self.idea_validation + self.user_experience + self.market_fit + self.monetization;
        (sum as f64 / 4.0).round() as i32
    }
}
