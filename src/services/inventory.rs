use crate::{
    db::DbPool,
    entities::{
        artisan_shop::Entity as ArtisanShop,
        inventory_movement::{self, Entity as InventoryMovement, MovementType},
        product::{self, Entity as Product},
        product_variant::{self, Entity as ProductVariant, VariantStatus},
    },
    errors::ServiceError,
};
use chrono::Utc;
use metrics::counter;
use rust_decimal::Decimal;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, JoinType,
    QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument, warn};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

pub const DEFAULT_MOVEMENT_LIMIT: u64 = 50;
const MAX_MOVEMENT_LIMIT: u64 = 500;

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateVariant {
    pub product_id: Uuid,
    #[validate(length(min = 1, max = 100))]
    pub sku: String,
    #[validate(custom = "crate::services::validate_non_negative")]
    #[schema(value_type = String, example = "45000")]
    pub price: Decimal,
    /// Opening stock, recorded as an IN movement
    #[validate(range(min = 0))]
    pub stock: Option<i32>,
    #[validate(range(min = 0))]
    pub min_stock: Option<i32>,
    pub status: Option<VariantStatus>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct RecordMovement {
    #[serde(rename = "type")]
    pub movement_type: MovementType,
    pub qty: i32,
    #[validate(length(max = 500))]
    pub reason: Option<String>,
    #[validate(length(max = 100))]
    pub ref_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MovementRecorded {
    pub variant: product_variant::Model,
    pub movement: inventory_movement::Model,
}

/// Stock after applying a movement to `current`.
///
/// IN and OUT take a positive quantity, ADJUST an absolute level of zero or more. An OUT
/// larger than the current stock fails with `InsufficientStock`.
pub fn apply_movement(current: i32, kind: MovementType, qty: i32) -> Result<i32, ServiceError> {
    match kind {
        MovementType::In => {
            if qty <= 0 {
                return Err(ServiceError::ValidationError(
                    "IN quantity must be positive".to_string(),
                ));
            }
            current
                .checked_add(qty)
                .ok_or_else(|| ServiceError::InvalidOperation("stock overflow".to_string()))
        }
        MovementType::Out => {
            if qty <= 0 {
                return Err(ServiceError::ValidationError(
                    "OUT quantity must be positive".to_string(),
                ));
            }
            if qty > current {
                return Err(ServiceError::InsufficientStock(format!(
                    "requested {} but only {} available",
                    qty, current
                )));
            }
            Ok(current - qty)
        }
        MovementType::Adjust => {
            if qty < 0 {
                return Err(ServiceError::ValidationError(
                    "ADJUST quantity must not be negative".to_string(),
                ));
            }
            Ok(qty)
        }
    }
}

/// Writes the stock change and its ledger row. The stock update only succeeds if the
/// balance is still the one the movement was computed from.
async fn write_movement<C: ConnectionTrait>(
    conn: &C,
    variant: &product_variant::Model,
    kind: MovementType,
    qty: i32,
    reason: Option<String>,
    ref_id: Option<String>,
) -> Result<(i32, inventory_movement::Model), ServiceError> {
    let resulting_stock = match apply_movement(variant.stock, kind, qty) {
        Ok(stock) => stock,
        Err(err) => {
            if matches!(err, ServiceError::InsufficientStock(_)) {
                counter!("artisan_inventory.stock_rejections", 1);
                warn!(variant_id = %variant.id, qty, stock = variant.stock, "movement would make stock negative");
            }
            return Err(err);
        }
    };

    let now = Utc::now();
    let updated = ProductVariant::update_many()
        .col_expr(product_variant::Column::Stock, Expr::value(resulting_stock))
        .col_expr(product_variant::Column::UpdatedAt, Expr::value(now))
        .filter(product_variant::Column::Id.eq(variant.id))
        .filter(product_variant::Column::Stock.eq(variant.stock))
        .exec(conn)
        .await?;
    if updated.rows_affected != 1 {
        return Err(ServiceError::Conflict(format!(
            "stock of variant {} changed concurrently",
            variant.id
        )));
    }

    let movement = inventory_movement::ActiveModel {
        id: Set(Uuid::new_v4()),
        product_variant_id: Set(variant.id),
        movement_type: Set(kind),
        qty: Set(qty),
        reason: Set(reason),
        ref_id: Set(ref_id),
        resulting_stock: Set(resulting_stock),
        created_at: Set(now),
    }
    .insert(conn)
    .await?;

    Ok((resulting_stock, movement))
}

/// Variant stock ledger
#[derive(Clone)]
pub struct InventoryService {
    db: Arc<DbPool>,
}

impl InventoryService {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self { db }
    }

    #[instrument(skip(self, input), fields(product_id = %input.product_id, sku = %input.sku))]
    pub async fn create_variant(
        &self,
        input: CreateVariant,
    ) -> Result<product_variant::Model, ServiceError> {
        input.validate()?;

        Product::find_by_id(input.product_id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::not_found("product", input.product_id))?;

        let existing = ProductVariant::find()
            .filter(product_variant::Column::Sku.eq(input.sku.as_str()))
            .one(&*self.db)
            .await?;
        if existing.is_some() {
            return Err(ServiceError::Conflict(format!(
                "variant sku '{}' already exists",
                input.sku
            )));
        }

        let opening_stock = input.stock.unwrap_or(0);
        let variant = self
            .db
            .transaction::<_, product_variant::Model, ServiceError>(move |txn| {
                Box::pin(async move {
                    let now = Utc::now();
                    let mut variant = product_variant::ActiveModel {
                        id: Set(Uuid::new_v4()),
                        product_id: Set(input.product_id),
                        sku: Set(input.sku),
                        price: Set(input.price),
                        stock: Set(0),
                        min_stock: Set(input.min_stock.unwrap_or(0)),
                        status: Set(input.status.unwrap_or(VariantStatus::Active)),
                        created_at: Set(now),
                        updated_at: Set(now),
                    }
                    .insert(txn)
                    .await?;

                    if opening_stock > 0 {
                        let (stock, _) = write_movement(
                            txn,
                            &variant,
                            MovementType::In,
                            opening_stock,
                            Some("initial stock".to_string()),
                            None,
                        )
                        .await?;
                        variant.stock = stock;
                    }
                    Ok(variant)
                })
            })
            .await?;

        info!(variant_id = %variant.id, stock = variant.stock, "variant created");
        Ok(variant)
    }

    /// User id of the shop that sells `product_id`.
    #[instrument(skip(self))]
    pub async fn product_owner(&self, product_id: Uuid) -> Result<Uuid, ServiceError> {
        let product = Product::find_by_id(product_id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::not_found("product", product_id))?;
        let shop = ArtisanShop::find_by_id(product.shop_id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::not_found("shop", product.shop_id))?;
        Ok(shop.user_id)
    }

    pub async fn variant_owner(&self, variant_id: Uuid) -> Result<Uuid, ServiceError> {
        let variant = self.get_variant(variant_id).await?;
        self.product_owner(variant.product_id).await
    }

    #[instrument(skip(self))]
    pub async fn get_variant(&self, id: Uuid) -> Result<product_variant::Model, ServiceError> {
        ProductVariant::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::not_found("variant", id))
    }

    #[instrument(skip(self))]
    pub async fn list_variants(
        &self,
        product_id: Uuid,
    ) -> Result<Vec<product_variant::Model>, ServiceError> {
        Ok(ProductVariant::find()
            .filter(product_variant::Column::ProductId.eq(product_id))
            .order_by_asc(product_variant::Column::CreatedAt)
            .all(&*self.db)
            .await?)
    }

    /// Applies one IN/OUT/ADJUST movement atomically; nothing is written on rejection.
    #[instrument(skip(self, input), fields(kind = ?input.movement_type, qty = input.qty))]
    pub async fn record_movement(
        &self,
        variant_id: Uuid,
        input: RecordMovement,
    ) -> Result<MovementRecorded, ServiceError> {
        input.validate()?;

        let recorded = self
            .db
            .transaction::<_, MovementRecorded, ServiceError>(move |txn| {
                Box::pin(async move {
                    let mut variant = ProductVariant::find_by_id(variant_id)
                        .one(txn)
                        .await?
                        .ok_or_else(|| ServiceError::not_found("variant", variant_id))?;

                    let (stock, movement) = write_movement(
                        txn,
                        &variant,
                        input.movement_type,
                        input.qty,
                        input.reason,
                        input.ref_id,
                    )
                    .await?;
                    variant.stock = stock;
                    variant.updated_at = movement.created_at;

                    Ok(MovementRecorded { variant, movement })
                })
            })
            .await?;

        info!(
            %variant_id,
            resulting_stock = recorded.movement.resulting_stock,
            "stock movement recorded"
        );
        Ok(recorded)
    }

    /// Most recent movements first.
    #[instrument(skip(self))]
    pub async fn list_movements(
        &self,
        variant_id: Uuid,
        limit: Option<u64>,
    ) -> Result<Vec<inventory_movement::Model>, ServiceError> {
        self.get_variant(variant_id).await?;

        Ok(InventoryMovement::find()
            .filter(inventory_movement::Column::ProductVariantId.eq(variant_id))
            .order_by_desc(inventory_movement::Column::CreatedAt)
            .limit(limit.unwrap_or(DEFAULT_MOVEMENT_LIMIT).clamp(1, MAX_MOVEMENT_LIMIT))
            .all(&*self.db)
            .await?)
    }

    /// Variants at or below their minimum stock, optionally for one shop.
    #[instrument(skip(self))]
    pub async fn low_stock(
        &self,
        shop_id: Option<Uuid>,
    ) -> Result<Vec<product_variant::Model>, ServiceError> {
        let mut query = ProductVariant::find().filter(
            Expr::col((product_variant::Entity, product_variant::Column::Stock)).lte(Expr::col((
                product_variant::Entity,
                product_variant::Column::MinStock,
            ))),
        );
        if let Some(shop_id) = shop_id {
            query = query
                .join(JoinType::InnerJoin, product_variant::Relation::Product.def())
                .filter(product::Column::ShopId.eq(shop_id));
        }

        Ok(query
            .order_by_asc(product_variant::Column::Stock)
            .all(&*self.db)
            .await?)
    }
}
