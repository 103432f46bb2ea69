use crate::{
    db::DbPool,
    entities::artisan_shop::{self, Entity as ArtisanShop},
    errors::ServiceError,
    regions::{parse_region_string, ParsedRegion},
};
use chrono::Utc;
use sea_orm::{
    sea_query::Condition, ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument, warn};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct NormalizeRegionsRequest {
    #[serde(default = "default_dry_run")]
    pub dry_run: bool,
    pub shop_id: Option<Uuid>,
}

fn default_dry_run() -> bool {
    true
}

impl Default for NormalizeRegionsRequest {
    fn default() -> Self {
        Self {
            dry_run: true,
            shop_id: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum RegionUpdateStatus {
    WouldUpdate,
    Updated,
    SkippedNoMatch,
    Error,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RegionNormalizationDetail {
    pub shop_id: Uuid,
    pub shop_name: String,
    pub original_region: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parsed: Option<ParsedRegion>,
    pub status: RegionUpdateStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct RegionNormalizationSummary {
    pub dry_run: bool,
    pub total: u64,
    pub processed: u64,
    pub updated: u64,
    pub skipped: u64,
    pub errors: u64,
    pub details: Vec<RegionNormalizationDetail>,
}

/// Backfills structured department/municipality from free-text shop regions
#[derive(Clone)]
pub struct ShopRegionService {
    db: Arc<DbPool>,
}

impl ShopRegionService {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self { db }
    }

    async fn candidates(
        &self,
        shop_id: Option<Uuid>,
    ) -> Result<Vec<artisan_shop::Model>, ServiceError> {
        let mut query = ArtisanShop::find().filter(artisan_shop::Column::Region.is_not_null());
        query = match shop_id {
            Some(id) => query.filter(artisan_shop::Column::Id.eq(id)),
            None => query.filter(
                Condition::any()
                    .add(artisan_shop::Column::Department.is_null())
                    .add(artisan_shop::Column::Municipality.is_null()),
            ),
        };

        Ok(query
            .order_by_asc(artisan_shop::Column::CreatedAt)
            .all(&*self.db)
            .await?)
    }

    async fn write_region(
        &self,
        shop: artisan_shop::Model,
        parsed: &ParsedRegion,
    ) -> Result<(), ServiceError> {
        let mut active: artisan_shop::ActiveModel = shop.into();
        active.department = Set(Some(parsed.department.clone()));
        active.municipality = Set(Some(parsed.municipality.clone()));
        active.region = Set(Some(parsed.canonical_region()));
        active.updated_at = Set(Utc::now());
        active.update(&*self.db).await?;
        Ok(())
    }

    /// Parses every candidate shop's region and, unless dry-running, stores the result.
    ///
    /// Only parses that yield both department and municipality are written. A failing
    /// shop is reported in the details and does not stop the batch.
    #[instrument(skip(self))]
    pub async fn normalize_shop_regions(
        &self,
        request: NormalizeRegionsRequest,
    ) -> Result<RegionNormalizationSummary, ServiceError> {
        let shops = self.candidates(request.shop_id).await?;
        let mut summary = RegionNormalizationSummary {
            dry_run: request.dry_run,
            total: shops.len() as u64,
            ..Default::default()
        };

        for shop in shops {
            let shop_id = shop.id;
            let shop_name = shop.shop_name.clone();
            let original_region = shop.region.clone().unwrap_or_default();
            let parsed = parse_region_string(&original_region);

            if !parsed.is_complete() {
                summary.skipped += 1;
                summary.details.push(RegionNormalizationDetail {
                    shop_id,
                    shop_name,
                    original_region,
                    parsed: Some(parsed),
                    status: RegionUpdateStatus::SkippedNoMatch,
                    error: None,
                });
                continue;
            }

            let status = if request.dry_run {
                RegionUpdateStatus::WouldUpdate
            } else {
                match self.write_region(shop, &parsed).await {
                    Ok(()) => RegionUpdateStatus::Updated,
                    Err(err) => {
                        warn!(%shop_id, error = %err, "failed to store normalized region");
                        summary.errors += 1;
                        summary.details.push(RegionNormalizationDetail {
                            shop_id,
                            shop_name,
                            original_region,
                            parsed: None,
                            status: RegionUpdateStatus::Error,
                            error: Some(err.to_string()),
                        });
                        continue;
                    }
                }
            };

            summary.updated += 1;
            summary.processed += 1;
            summary.details.push(RegionNormalizationDetail {
                shop_id,
                shop_name,
                original_region,
                parsed: Some(parsed),
                status,
                error: None,
            });
        }

        info!(
            total = summary.total,
            updated = summary.updated,
            skipped = summary.skipped,
            errors = summary.errors,
            dry_run = summary.dry_run,
            "region normalization finished"
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_defaults_to_dry_run() {
        let request: NormalizeRegionsRequest = serde_json::from_str("{}").unwrap();
        assert!(request.dry_run);
        assert!(request.shop_id.is_none());
    }

    #[test]
    fn statuses_serialize_in_snake_case() {
        assert_eq!(
            serde_json::to_value(RegionUpdateStatus::SkippedNoMatch).unwrap(),
            "skipped_no_match"
        );
        assert_eq!(
            serde_json::to_value(RegionUpdateStatus::WouldUpdate).unwrap(),
            "would_update"
        );
    }
}
