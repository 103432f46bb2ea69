use crate::{
    db::DbPool,
    entities::user_maturity_score::{self, Entity as MaturityScore},
    errors::ServiceError,
    services::validate_json_object,
};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, QueryFilter, QueryOrder, Set,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{info, instrument};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Trend threshold in score points between the two latest snapshots.
const TREND_THRESHOLD: i32 = 5;

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateMaturityScore {
    pub user_id: Uuid,
    #[validate(range(min = 0, max = 100))]
    pub idea_validation: i32,
    #[validate(range(min = 0, max = 100))]
    pub user_experience: i32,
    #[validate(range(min = 0, max = 100))]
    pub market_fit: i32,
    #[validate(range(min = 0, max = 100))]
    pub monetization: i32,
    #[validate(custom = "validate_json_object")]
    #[schema(value_type = Option<Object>)]
    pub profile_data: Option<Value>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct PatchMaturityScore {
    #[validate(range(min = 0, max = 100))]
    pub idea_validation: Option<i32>,
    #[validate(range(min = 0, max = 100))]
    pub user_experience: Option<i32>,
    #[validate(range(min = 0, max = 100))]
    pub market_fit: Option<i32>,
    #[validate(range(min = 0, max = 100))]
    pub monetization: Option<i32>,
    #[validate(custom = "validate_json_object")]
    #[schema(value_type = Option<Object>)]
    pub profile_data: Option<Value>,
}

/// Stored snapshot plus its derived total.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MaturityScoreView {
    #[serde(flatten)]
    pub score: user_maturity_score::Model,
    pub total_score: i32,
}

impl From<user_maturity_score::Model> for MaturityScoreView {
    fn from(score: user_maturity_score::Model) -> Self {
        let total_score = score.total_score();
        Self { score, total_score }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct DimensionAverages {
    pub idea_validation: i32,
    pub user_experience: i32,
    pub market_fit: i32,
    pub monetization: i32,
    pub total_average: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Stable,
}

impl Trend {
    pub fn between(latest: i32, previous: i32) -> Self {
        let diff = latest - previous;
        if diff > TREND_THRESHOLD {
            Trend::Up
        } else if diff < -TREND_THRESHOLD {
            Trend::Down
        } else {
            Trend::Stable
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct DimensionTrends {
    pub idea_validation: Trend,
    pub user_experience: Trend,
    pub market_fit: Trend,
    pub monetization: Trend,
    pub total: Trend,
}

impl DimensionTrends {
    fn stable() -> Self {
        Self {
            idea_validation: Trend::Stable,
            user_experience: Trend::Stable,
            market_fit: Trend::Stable,
            monetization: Trend::Stable,
            total: Trend::Stable,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MaturityEvolution {
    pub scores: Vec<MaturityScoreView>,
    pub trend: DimensionTrends,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MaturityGlobalStats {
    pub total_users: u64,
    pub average_scores: DimensionAverages,
}

fn rounded_mean(sum: i64, count: usize) -> i32 {
    if count == 0 {
        0
    } else {
        (sum as f64 / count as f64).round() as i32
    }
}

/// Per-dimension rounded means; the total is the rounded mean of those.
pub fn average_scores(scores: &[user_maturity_score::Model]) -> DimensionAverages {
    if scores.is_empty() {
        return DimensionAverages::default();
    }
    let sum = |f: fn(&user_maturity_score::Model) -> i32| -> i64 {
        scores.iter().map(|s| f(s) as i64).sum()
    };
    let n = scores.len();
    let idea_validation = rounded_mean(sum(|s| s.idea_validation), n);
    let user_experience = rounded_mean(sum(|s| s.user_experience), n);
    let market_fit = rounded_mean(sum(|s| s.market_fit), n);
    let monetization = rounded_mean(sum(|s| s.monetization), n);
    let total_average = rounded_mean(
        (idea_validation + user_experience + market_fit + monetization) as i64,
        4,
    );
    DimensionAverages {
        idea_validation,
        user_experience,
        market_fit,
        monetization,
        total_average,
    }
}

/// Trends from a newest-first history; fewer than two snapshots is stable everywhere.
pub fn trends(history: &[user_maturity_score::Model]) -> DimensionTrends {
    let (Some(latest), Some(previous)) = (history.first(), history.get(1)) else {
        return DimensionTrends::stable();
    };
    DimensionTrends {
        idea_validation: Trend::between(latest.idea_validation, previous.idea_validation),
        user_experience: Trend::between(latest.user_experience, previous.user_experience),
        market_fit: Trend::between(latest.market_fit, previous.market_fit),
        monetization: Trend::between(latest.monetization, previous.monetization),
        total: Trend::between(latest.total_score(), previous.total_score()),
    }
}

#[derive(Clone)]
pub struct MaturityService {
    db: Arc<DbPool>,
}

impl MaturityService {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self { db }
    }

    #[instrument(skip(self, input), fields(user_id = %input.user_id))]
    pub async fn create(
        &self,
        input: CreateMaturityScore,
    ) -> Result<MaturityScoreView, ServiceError> {
        input.validate()?;
        let model = user_maturity_score::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(input.user_id),
            idea_validation: Set(input.idea_validation),
            user_experience: Set(input.user_experience),
            market_fit: Set(input.market_fit),
            monetization: Set(input.monetization),
            profile_data: Set(input.profile_data),
            created_at: Set(Utc::now()),
        }
        .insert(&*self.db)
        .await?;
        info!(score_id = %model.id, total = model.total_score(), "maturity score recorded");
        Ok(model.into())
    }

    pub async fn list_all(&self) -> Result<Vec<MaturityScoreView>, ServiceError> {
        Ok(MaturityScore::find()
            .order_by_desc(user_maturity_score::Column::CreatedAt)
            .all(&*self.db)
            .await?
            .into_iter()
            .map(Into::into)
            .collect())
    }

    async fn find(&self, id: Uuid) -> Result<user_maturity_score::Model, ServiceError> {
        MaturityScore::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::not_found("maturity score", id))
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: Uuid) -> Result<MaturityScoreView, ServiceError> {
        Ok(self.find(id).await?.into())
    }

    async fn history(&self, user_id: Uuid) -> Result<Vec<user_maturity_score::Model>, ServiceError> {
        Ok(MaturityScore::find()
            .filter(user_maturity_score::Column::UserId.eq(user_id))
            .order_by_desc(user_maturity_score::Column::CreatedAt)
            .all(&*self.db)
            .await?)
    }

    /// Newest first.
    #[instrument(skip(self))]
    pub async fn by_user(&self, user_id: Uuid) -> Result<Vec<MaturityScoreView>, ServiceError> {
        Ok(self
            .history(user_id)
            .await?
            .into_iter()
            .map(Into::into)
            .collect())
    }

    #[instrument(skip(self))]
    pub async fn latest_by_user(
        &self,
        user_id: Uuid,
    ) -> Result<Option<MaturityScoreView>, ServiceError> {
        Ok(MaturityScore::find()
            .filter(user_maturity_score::Column::UserId.eq(user_id))
            .order_by_desc(user_maturity_score::Column::CreatedAt)
            .one(&*self.db)
            .await?
            .map(Into::into))
    }

    #[instrument(skip(self))]
    pub async fn average_by_user(&self, user_id: Uuid) -> Result<DimensionAverages, ServiceError> {
        Ok(average_scores(&self.history(user_id).await?))
    }

    #[instrument(skip(self))]
    pub async fn evolution_by_user(&self, user_id: Uuid) -> Result<MaturityEvolution, ServiceError> {
        let history = self.history(user_id).await?;
        let trend = trends(&history);
        Ok(MaturityEvolution {
            scores: history.into_iter().map(Into::into).collect(),
            trend,
        })
    }

    #[instrument(skip(self))]
    pub async fn global_stats(&self) -> Result<MaturityGlobalStats, ServiceError> {
        let scores = MaturityScore::find().all(&*self.db).await?;
        let total_users = scores.iter().map(|s| s.user_id).collect::<HashSet<_>>().len() as u64;
        Ok(MaturityGlobalStats {
            total_users,
            average_scores: average_scores(&scores),
        })
    }

    #[instrument(skip(self, input))]
    pub async fn update(
        &self,
        id: Uuid,
        input: PatchMaturityScore,
    ) -> Result<MaturityScoreView, ServiceError> {
        input.validate()?;
        let mut model = self.find(id).await?.into_active_model();
        if let Some(v) = input.idea_validation {
            model.idea_validation = Set(v);
        }
        if let Some(v) = input.user_experience {
            model.user_experience = Set(v);
        }
        if let Some(v) = input.market_fit {
            model.market_fit = Set(v);
        }
        if let Some(v) = input.monetization {
            model.monetization = Set(v);
        }
        if let Some(profile) = input.profile_data {
            model.profile_data = Set(Some(profile));
        }
        Ok(model.update(&*self.db).await?.into())
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
        let result = MaturityScore::delete_by_id(id).exec(&*self.db).await?;
        if result.rows_affected == 0 {
            return Err(ServiceError::not_found("maturity score", id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn score(user: Uuid, dims: [i32; 4]) -> user_maturity_score::Model {
        user_maturity_score::Model {
            id: Uuid::new_v4(),
            user_id: user,
            idea_validation: dims[0],
            user_experience: dims[1],
            market_fit: dims[2],
            monetization: dims[3],
            profile_data: None,
            created_at: Utc::now(),
        }
    }

    #[test_case(60, 50, Trend::Up)]
    #[test_case(55, 50, Trend::Stable)]
    #[test_case(45, 50, Trend::Stable)]
    #[test_case(44, 50, Trend::Down)]
    fn trend_uses_five_point_band(latest: i32, previous: i32, expected: Trend) {
        assert_eq!(Trend::between(latest, previous), expected);
    }

    #[test]
    fn averages_round_each_dimension() {
        let user = Uuid::new_v4();
        let avg = average_scores(&[score(user, [10, 20, 31, 40]), score(user, [11, 20, 30, 41])]);
        assert_eq!(avg.idea_validation, 11);
        assert_eq!(avg.user_experience, 20);
        assert_eq!(avg.market_fit, 31);
        assert_eq!(avg.monetization, 41);
        assert_eq!(avg.total_average, 26);
    }

    #[test]
    fn empty_history_averages_to_zero() {
        assert_eq!(average_scores(&[]), DimensionAverages::default());
    }

    #[test]
    fn trends_compare_two_newest() {
        let user = Uuid::new_v4();
        let history = vec![score(user, [80, 50, 40, 60]), score(user, [60, 50, 50, 60])];
        let trend = trends(&history);
        assert_eq!(trend.idea_validation, Trend::Up);
        assert_eq!(trend.user_experience, Trend::Stable);
        assert_eq!(trend.market_fit, Trend::Down);
        assert_eq!(trend.total, Trend::Stable);
        assert_eq!(trends(&history[..1]), DimensionTrends::stable());
    }

    #[test]
    fn scores_out_of_range_are_rejected() {
        let input = CreateMaturityScore {
            user_id: Uuid::new_v4(),
            idea_validation: 101,
            user_experience: 0,
            market_fit: 0,
            monetization: 0,
            profile_data: None,
        };
        assert!(input.validate().is_err());
    }
}
