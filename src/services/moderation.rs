use crate::{
    catalog::{full_category_path, matches_category_filter, normalize_category, subcategory},
    db::DbPool,
    entities::{
        artisan_shop::{self, Entity as ArtisanShop},
        product::{self, Entity as Product, ModerationStatus},
        product_moderation_history,
    },
    errors::ServiceError,
    handlers::common::total_pages,
    services::{
        notifications::{self, NewNotification},
        page_offset,
        products::shipping_data_complete,
    },
};
use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    sea_query::{Expr, Func},
    ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, JoinType, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, RelationTrait, Select, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::collections::{BTreeMap, HashMap};
use std::str::FromStr;
use std::sync::Arc;
use tracing::{info, instrument};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

pub const DEFAULT_QUEUE_PAGE_SIZE: u64 = 20;
const MAX_QUEUE_PAGE_SIZE: u64 = 100;

/// Product fields a moderator may overwrite while approving.
pub const EDITABLE_FIELDS: [&str; 17] = [
    "name",
    "description",
    "short_description",
    "price",
    "compare_price",
    "category",
    "subcategory",
    "images",
    "tags",
    "materials",
    "techniques",
    "inventory",
    "sku",
    "active",
    "featured",
    "weight",
    "dimensions",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ModerationAction {
    Approve,
    ApproveWithEdits,
    RequestChanges,
    Reject,
}

impl ModerationAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Approve => "approve",
            Self::ApproveWithEdits => "approve_with_edits",
            Self::RequestChanges => "request_changes",
            Self::Reject => "reject",
        }
    }

    pub fn target_status(&self) -> ModerationStatus {
        match self {
            Self::Approve => ModerationStatus::Approved,
            Self::ApproveWithEdits => ModerationStatus::ApprovedWithEdits,
            Self::RequestChanges => ModerationStatus::ChangesRequested,
            Self::Reject => ModerationStatus::Rejected,
        }
    }

    fn allows_edits(&self) -> bool {
        matches!(self, Self::Approve | Self::ApproveWithEdits)
    }
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ModerateProduct {
    pub action: ModerationAction,
    pub comment: Option<String>,
    #[schema(value_type = Option<Object>)]
    pub edits: Option<Map<String, Value>>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ModerationOutcome {
    pub product: product::Model,
    pub previous_status: ModerationStatus,
    pub new_status: ModerationStatus,
    pub edits_applied: Vec<String>,
    pub history_id: Uuid,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct MarketplaceApproval {
    pub approved: bool,
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MarketplaceApprovalOutcome {
    pub shop_id: Uuid,
    pub previous_approval: bool,
    pub new_approval: bool,
    pub message: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum QueueType {
    #[default]
    Products,
    Shops,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ShopApprovalFilter {
    #[default]
    All,
    Approved,
    NotApproved,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum BankDataFilter {
    #[default]
    All,
    Yes,
    No,
}

/// Approved-product threshold for the shop queue; `0` means exactly none.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ToSchema)]
pub enum MinApprovedProducts {
    #[default]
    #[serde(rename = "all")]
    All,
    #[serde(rename = "0")]
    Zero,
    #[serde(rename = "1")]
    AtLeastOne,
    #[serde(rename = "5")]
    AtLeastFive,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ModerationQueueQuery {
    #[serde(rename = "type", default)]
    #[param(inline)]
    pub queue_type: QueueType,
    pub page: Option<u64>,
    pub page_size: Option<u64>,
    pub search: Option<String>,
    pub region: Option<String>,
    /// Products: a moderation status, or `all`. Defaults to `pending_moderation`.
    pub status: Option<String>,
    pub category: Option<String>,
    #[serde(default)]
    pub only_non_marketplace: bool,
    #[serde(default)]
    #[param(inline)]
    pub filter: ShopApprovalFilter,
    pub craft_type: Option<String>,
    #[serde(default)]
    #[param(inline)]
    pub has_bank_data: BankDataFilter,
    #[serde(default)]
    #[param(inline)]
    pub min_approved_products: MinApprovedProducts,
}

impl ModerationQueueQuery {
    fn paging(&self) -> (u64, u64) {
        let page = self.page.unwrap_or(1).max(1);
        let page_size = self
            .page_size
            .unwrap_or(DEFAULT_QUEUE_PAGE_SIZE)
            .clamp(1, MAX_QUEUE_PAGE_SIZE);
        (page, page_size)
    }

    /// `None` means every status.
    fn status_filter(&self) -> Result<Option<ModerationStatus>, ServiceError> {
        match self.status.as_deref().map(str::trim) {
            None | Some("") => Ok(Some(ModerationStatus::PendingModeration)),
            Some("all") => Ok(None),
            Some(raw) => ModerationStatus::parse(raw)
                .map(Some)
                .ok_or_else(|| ServiceError::BadRequest(format!("unknown status '{}'", raw))),
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ShopSummary {
    pub id: Uuid,
    pub shop_name: String,
    pub shop_slug: String,
    pub user_id: Uuid,
    pub region: Option<String>,
    pub craft_type: Option<String>,
    pub logo_url: Option<String>,
    pub marketplace_approved: bool,
}

impl From<&artisan_shop::Model> for ShopSummary {
    fn from(shop: &artisan_shop::Model) -> Self {
        Self {
            id: shop.id,
            shop_name: shop.shop_name.clone(),
            shop_slug: shop.shop_slug.clone(),
            user_id: shop.user_id,
            region: shop.region.clone(),
            craft_type: shop.craft_type.clone(),
            logo_url: shop.logo_url.clone(),
            marketplace_approved: shop.marketplace_approved,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProductQueueItem {
    #[serde(flatten)]
    pub product: product::Model,
    /// Canonical main group of the stored category
    pub category_group: String,
    /// Stored category rendered as `Main > Sub`
    pub category_path: String,
    pub shop: Option<ShopSummary>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProductQueue {
    pub products: Vec<ProductQueueItem>,
    pub counts: BTreeMap<String, u64>,
    pub page: u64,
    pub page_size: u64,
    pub total: u64,
    pub total_pages: u64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ShopQueueItem {
    #[serde(flatten)]
    pub shop: artisan_shop::Model,
    pub approved_products: u64,
}

#[derive(Debug, Clone, Default, Serialize, ToSchema)]
pub struct ShopCounts {
    pub all: u64,
    pub approved: u64,
    pub not_approved: u64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ShopQueue {
    pub shops: Vec<ShopQueueItem>,
    pub counts: ShopCounts,
    pub page: u64,
    pub page_size: u64,
    pub total: u64,
    pub total_pages: u64,
    pub available_regions: Vec<String>,
    pub available_craft_types: Vec<String>,
}

fn edit_error(field: &str, expected: &str) -> ServiceError {
    ServiceError::ValidationError(format!("edit '{}' must be {}", field, expected))
}

fn edit_string(field: &str, value: &Value) -> Result<String, ServiceError> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| edit_error(field, "a string"))
}

fn edit_optional_string(field: &str, value: &Value) -> Result<Option<String>, ServiceError> {
    if value.is_null() {
        Ok(None)
    } else {
        edit_string(field, value).map(Some)
    }
}

fn edit_decimal(field: &str, value: &Value) -> Result<Option<Decimal>, ServiceError> {
    let parsed = match value {
        Value::Null => return Ok(None),
        Value::Number(n) => Decimal::from_str(&n.to_string()).ok(),
        Value::String(s) => Decimal::from_str(s.trim()).ok(),
        _ => None,
    };
    parsed
        .filter(|d| !d.is_sign_negative())
        .map(Some)
        .ok_or_else(|| edit_error(field, "a non-negative number"))
}

fn edit_bool(field: &str, value: &Value) -> Result<bool, ServiceError> {
    value.as_bool().ok_or_else(|| edit_error(field, "a boolean"))
}

/// Applies whitelisted moderator edits to the product; returns the keys that were applied.
pub fn apply_edits(
    product: &mut product::Model,
    edits: &Map<String, Value>,
) -> Result<Vec<String>, ServiceError> {
    let mut applied = Vec::new();
    for field in EDITABLE_FIELDS {
        let Some(value) = edits.get(field) else {
            continue;
        };
        match field {
            "name" => product.name = edit_string(field, value)?,
            "description" => product.description = edit_optional_string(field, value)?,
            "short_description" => product.short_description = edit_optional_string(field, value)?,
            "price" => {
                product.price =
                    edit_decimal(field, value)?.ok_or_else(|| edit_error(field, "a number"))?
            }
            "compare_price" => product.compare_price = edit_decimal(field, value)?,
            "category" => {
                product.category = edit_optional_string(field, value)?;
                // a MAIN/SUB path carries its subcategory; an explicit edit below wins
                if let Some(sub) = subcategory(product.category.as_deref()) {
                    product.subcategory = Some(sub);
                }
            }
            "subcategory" => product.subcategory = edit_optional_string(field, value)?,
            "images" | "tags" | "materials" | "techniques" => {
                if !value.is_array() {
                    return Err(edit_error(field, "an array"));
                }
                let slot = match field {
                    "images" => &mut product.images,
                    "tags" => &mut product.tags,
                    "materials" => &mut product.materials,
                    _ => &mut product.techniques,
                };
                *slot = value.clone();
            }
            "inventory" => {
                product.inventory = value
                    .as_i64()
                    .and_then(|n| i32::try_from(n).ok())
                    .filter(|n| *n >= 0)
                    .ok_or_else(|| edit_error(field, "a non-negative integer"))?
            }
            "sku" => product.sku = edit_optional_string(field, value)?,
            "active" => product.active = edit_bool(field, value)?,
            "featured" => product.featured = edit_bool(field, value)?,
            "weight" => product.weight = edit_decimal(field, value)?,
            "dimensions" => {
                if !(value.is_object() || value.is_null()) {
                    return Err(edit_error(field, "an object"));
                }
                product.dimensions = (!value.is_null()).then(|| value.clone());
            }
            _ => continue,
        }
        applied.push(field.to_string());
    }
    Ok(applied)
}

/// The subset of requested edits that were written to the product.
fn applied_edits(requested: Option<&Map<String, Value>>, applied: &[String]) -> Map<String, Value> {
    requested
        .map(|edits| {
            edits
                .iter()
                .filter(|(key, _)| applied.contains(key))
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect()
        })
        .unwrap_or_default()
}

fn product_notification(
    action: ModerationAction,
    product_name: &str,
    comment: Option<&str>,
) -> (&'static str, String) {
    let comment = comment.unwrap_or_default();
    match action {
        ModerationAction::Approve => (
            "¡Producto aprobado!",
            format!(
                "Tu producto \"{}\" ha sido aprobado y ya está publicado.",
                product_name
            ),
        ),
        ModerationAction::ApproveWithEdits => (
            "Producto aprobado con ajustes",
            format!(
                "Tu producto \"{}\" fue aprobado con algunos ajustes realizados por el moderador.",
                product_name
            ),
        ),
        ModerationAction::RequestChanges => (
            "Cambios solicitados",
            format!(
                "Se han solicitado cambios para tu producto \"{}\". {}",
                product_name, comment
            )
            .trim_end()
            .to_string(),
        ),
        ModerationAction::Reject => (
            "Producto rechazado",
            format!("Tu producto \"{}\" fue rechazado. {}", product_name, comment)
                .trim_end()
                .to_string(),
        ),
    }
}

fn marketplace_notification(
    approved: bool,
    shop_name: &str,
    comment: Option<&str>,
) -> (&'static str, &'static str, String) {
    if approved {
        (
            "marketplace_approved",
            "¡Tu tienda fue aprobada para el Marketplace!",
            format!(
                "Tu tienda \"{}\" ahora aparecerá en telar.co y tus productos aprobados serán visibles para todos los compradores.",
                shop_name
            ),
        )
    } else {
        let reason = comment
            .filter(|c| !c.trim().is_empty())
            .map(|c| format!(" Razón: {}", c))
            .unwrap_or_default();
        (
            "marketplace_removed",
            "Tu tienda fue removida del Marketplace",
            format!(
                "Tu tienda \"{}\" fue removida del marketplace central. Tus productos seguirán disponibles en tu tienda propia.{}",
                shop_name, reason
            ),
        )
    }
}

fn lower_contains<C: sea_orm::sea_query::IntoColumnRef>(
    column: C,
    needle: &str,
) -> sea_orm::sea_query::SimpleExpr {
    Expr::expr(Func::lower(Expr::col(column)))
        .like(format!("%{}%", needle.trim().to_lowercase()))
}

/// Moderator workflows for products and shops
#[derive(Clone)]
pub struct ModerationService {
    db: Arc<DbPool>,
}

impl ModerationService {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self { db }
    }

    /// Approves, rejects or requests changes on a product and notifies the shop owner.
    #[instrument(skip(self, request), fields(action = request.action.as_str()))]
    pub async fn moderate_product(
        &self,
        product_id: Uuid,
        moderator_id: Uuid,
        request: ModerateProduct,
    ) -> Result<ModerationOutcome, ServiceError> {
        let outcome = self
            .db
            .transaction::<_, ModerationOutcome, ServiceError>(move |txn| {
                Box::pin(async move {
                    let (mut current, shop) = Product::find_by_id(product_id)
                        .find_also_related(ArtisanShop)
                        .one(txn)
                        .await?
                        .ok_or_else(|| ServiceError::not_found("product", product_id))?;
                    let shop = shop.ok_or_else(|| ServiceError::not_found("shop", current.shop_id))?;

                    let action = request.action;
                    let previous_status = current.moderation_status;
                    let new_status = action.target_status();

                    current.moderation_status = new_status;
                    current.active = new_status.is_published();

                    let mut edits_applied = Vec::new();
                    if let Some(edits) = request.edits.as_ref().filter(|_| action.allows_edits()) {
                        edits_applied = apply_edits(&mut current, edits)?;
                        current.shipping_data_complete =
                            shipping_data_complete(current.weight, current.dimensions.as_ref());
                    }
                    current.updated_at = Utc::now();

                    let product = current
                        .into_active_model()
                        .reset_all()
                        .update(txn)
                        .await?;

                    let history = product_moderation_history::ActiveModel {
                        id: Set(Uuid::new_v4()),
                        product_id: Set(product.id),
                        previous_status: Set(Some(previous_status.as_str().to_string())),
                        new_status: Set(new_status.as_str().to_string()),
                        moderator_id: Set(Some(moderator_id)),
                        artisan_id: Set(Some(shop.user_id)),
                        comment: Set(request.comment.clone()),
                        edits_made: Set(Some(Value::Object(applied_edits(
                            request.edits.as_ref(),
                            &edits_applied,
                        )))),
                        created_at: Set(Utc::now()),
                    }
                    .insert(txn)
                    .await?;

                    let (title, message) =
                        product_notification(action, &product.name, request.comment.as_deref());
                    notifications::record(
                        txn,
                        NewNotification {
                            user_id: shop.user_id,
                            notification_type: format!("moderation_{}", action.as_str()),
                            title: title.to_string(),
                            message,
                            metadata: Some(json!({
                                "product_id": product.id,
                                "product_name": product.name,
                                "action": action.as_str(),
                                "comment": request.comment,
                                "edits_applied": edits_applied,
                            })),
                        },
                    )
                    .await?;

                    Ok(ModerationOutcome {
                        product,
                        previous_status,
                        new_status,
                        edits_applied,
                        history_id: history.id,
                    })
                })
            })
            .await?;

        info!(
            %product_id,
            %moderator_id,
            previous = outcome.previous_status.as_str(),
            new = outcome.new_status.as_str(),
            "product moderated"
        );
        Ok(outcome)
    }

    /// Moderation history of a product, newest first.
    #[instrument(skip(self))]
    pub async fn history(
        &self,
        product_id: Uuid,
    ) -> Result<Vec<product_moderation_history::Model>, ServiceError> {
        Ok(product_moderation_history::Entity::find()
            .filter(product_moderation_history::Column::ProductId.eq(product_id))
            .order_by_desc(product_moderation_history::Column::CreatedAt)
            .all(&*self.db)
            .await?)
    }

    /// Adds a shop to, or removes it from, the central marketplace.
    #[instrument(skip(self, request), fields(approved = request.approved))]
    pub async fn set_marketplace_approval(
        &self,
        shop_id: Uuid,
        moderator_id: Uuid,
        request: MarketplaceApproval,
    ) -> Result<MarketplaceApprovalOutcome, ServiceError> {
        let outcome = self
            .db
            .transaction::<_, MarketplaceApprovalOutcome, ServiceError>(move |txn| {
                Box::pin(async move {
                    let shop = ArtisanShop::find_by_id(shop_id)
                        .one(txn)
                        .await?
                        .ok_or_else(|| ServiceError::not_found("shop", shop_id))?;

                    let previous_approval = shop.marketplace_approved;
                    let approved = request.approved;
                    let owner = shop.user_id;
                    let shop_name = shop.shop_name.clone();

                    let now = Utc::now();
                    let mut active: artisan_shop::ActiveModel = shop.into();
                    active.marketplace_approved = Set(approved);
                    active.marketplace_approved_at = Set(approved.then_some(now));
                    active.marketplace_approved_by = Set(approved.then_some(moderator_id));
                    active.updated_at = Set(now);
                    active.update(txn).await?;

                    let (kind, title, message) =
                        marketplace_notification(approved, &shop_name, request.comment.as_deref());
                    notifications::record(
                        txn,
                        NewNotification {
                            user_id: owner,
                            notification_type: kind.to_string(),
                            title: title.to_string(),
                            message,
                            metadata: Some(json!({
                                "shop_id": shop_id,
                                "shop_name": shop_name,
                                "approved": approved,
                                "comment": request.comment,
                                "moderator_id": moderator_id,
                            })),
                        },
                    )
                    .await?;

                    Ok(MarketplaceApprovalOutcome {
                        shop_id,
                        previous_approval,
                        new_approval: approved,
                        message: if approved {
                            "Tienda aprobada para marketplace".to_string()
                        } else {
                            "Tienda removida del marketplace".to_string()
                        },
                    })
                })
            })
            .await?;

        info!(%shop_id, %moderator_id, approved = outcome.new_approval, "marketplace approval changed");
        Ok(outcome)
    }

    async fn status_counts(&self) -> Result<BTreeMap<String, u64>, ServiceError> {
        let mut counts = BTreeMap::new();
        for status in ModerationStatus::ALL {
            let count = Product::find()
                .filter(product::Column::ModerationStatus.eq(status))
                .count(&*self.db)
                .await?;
            counts.insert(status.as_str().to_string(), count);
        }
        Ok(counts)
    }

    #[instrument(skip(self))]
    pub async fn product_queue(
        &self,
        query: &ModerationQueueQuery,
    ) -> Result<ProductQueue, ServiceError> {
        let (page, page_size) = query.paging();

        let mut select: Select<Product> =
            Product::find().join(JoinType::InnerJoin, product::Relation::Shop.def());
        if let Some(status) = query.status_filter()? {
            select = select.filter(product::Column::ModerationStatus.eq(status));
        }
        if let Some(search) = query.search.as_deref().filter(|s| !s.trim().is_empty()) {
            select = select.filter(lower_contains((product::Entity, product::Column::Name), search));
        }
        if let Some(category) = query.category.as_deref().filter(|c| !c.is_empty()) {
            let matching = self.categories_matching(category).await?;
            select = select.filter(product::Column::Category.is_in(matching));
        }
        if let Some(region) = query.region.as_deref().filter(|r| !r.is_empty()) {
            select = select.filter(artisan_shop::Column::Region.eq(region));
        }
        if query.only_non_marketplace {
            select = select.filter(artisan_shop::Column::MarketplaceApproved.eq(false));
        }

        let select = select.order_by_desc(product::Column::CreatedAt);
        let total = select.clone().count(&*self.db).await?;
        let products = select
            .offset(page_offset(page, page_size))
            .limit(page_size)
            .all(&*self.db)
            .await?;

        let shop_ids: Vec<Uuid> = products.iter().map(|p| p.shop_id).collect();
        let shops: HashMap<Uuid, artisan_shop::Model> = ArtisanShop::find()
            .filter(artisan_shop::Column::Id.is_in(shop_ids))
            .all(&*self.db)
            .await?
            .into_iter()
            .map(|shop| (shop.id, shop))
            .collect();

        let products = products
            .into_iter()
            .map(|product| ProductQueueItem {
                shop: shops.get(&product.shop_id).map(ShopSummary::from),
                category_group: normalize_category(product.category.as_deref()),
                category_path: full_category_path(product.category.as_deref()),
                product,
            })
            .collect();

        Ok(ProductQueue {
            products,
            counts: self.status_counts().await?,
            page,
            page_size,
            total,
            total_pages: total_pages(total, page_size),
        })
    }

    /// Stored categories a queue filter selects, either `MAIN` or `MAIN/SUB`.
    async fn categories_matching(&self, filter: &str) -> Result<Vec<String>, ServiceError> {
        let stored: Vec<Option<String>> = Product::find()
            .select_only()
            .column(product::Column::Category)
            .distinct()
            .into_tuple()
            .all(&*self.db)
            .await?;
        Ok(stored
            .into_iter()
            .flatten()
            .filter(|category| matches_category_filter(Some(category), filter))
            .collect())
    }

    async fn approved_product_counts(&self) -> Result<HashMap<Uuid, u64>, ServiceError> {
        let shop_ids: Vec<Uuid> = Product::find()
            .select_only()
            .column(product::Column::ShopId)
            .filter(product::Column::ModerationStatus.is_in([
                ModerationStatus::Approved,
                ModerationStatus::ApprovedWithEdits,
            ]))
            .into_tuple()
            .all(&*self.db)
            .await?;

        let mut counts = HashMap::new();
        for shop_id in shop_ids {
            *counts.entry(shop_id).or_insert(0) += 1;
        }
        Ok(counts)
    }

    async fn distinct_shop_values(
        &self,
        column: artisan_shop::Column,
    ) -> Result<Vec<String>, ServiceError> {
        let mut values: Vec<String> = ArtisanShop::find()
            .select_only()
            .column(column)
            .distinct()
            .filter(column.is_not_null())
            .into_tuple()
            .all(&*self.db)
            .await?;
        values.retain(|v| !v.trim().is_empty());
        values.sort();
        Ok(values)
    }

    #[instrument(skip(self))]
    pub async fn shop_queue(&self, query: &ModerationQueueQuery) -> Result<ShopQueue, ServiceError> {
        let (page, page_size) = query.paging();
        let approved_counts = self.approved_product_counts().await?;

        let mut select = ArtisanShop::find();
        select = match query.filter {
            ShopApprovalFilter::All => select,
            ShopApprovalFilter::Approved => {
                select.filter(artisan_shop::Column::MarketplaceApproved.eq(true))
            }
            ShopApprovalFilter::NotApproved => {
                select.filter(artisan_shop::Column::MarketplaceApproved.eq(false))
            }
        };
        if let Some(search) = query.search.as_deref().filter(|s| !s.trim().is_empty()) {
            select = select.filter(lower_contains(
                (artisan_shop::Entity, artisan_shop::Column::ShopName),
                search,
            ));
        }
        if let Some(region) = query.region.as_deref().filter(|r| !r.is_empty() && *r != "all") {
            select = select.filter(artisan_shop::Column::Region.eq(region));
        }
        if let Some(craft) = query
            .craft_type
            .as_deref()
            .filter(|c| !c.is_empty() && *c != "all")
        {
            select = select.filter(artisan_shop::Column::CraftType.eq(craft));
        }
        select = match query.has_bank_data {
            BankDataFilter::All => select,
            BankDataFilter::Yes => select.filter(artisan_shop::Column::BankAccountRef.is_not_null()),
            BankDataFilter::No => select.filter(artisan_shop::Column::BankAccountRef.is_null()),
        };

        let with_at_least = |min: u64| -> Vec<Uuid> {
            approved_counts
                .iter()
                .filter(|(_, count)| **count >= min)
                .map(|(id, _)| *id)
                .collect()
        };
        select = match query.min_approved_products {
            MinApprovedProducts::All => select,
            MinApprovedProducts::Zero => {
                select.filter(artisan_shop::Column::Id.is_not_in(with_at_least(1)))
            }
            MinApprovedProducts::AtLeastOne => {
                select.filter(artisan_shop::Column::Id.is_in(with_at_least(1)))
            }
            MinApprovedProducts::AtLeastFive => {
                select.filter(artisan_shop::Column::Id.is_in(with_at_least(5)))
            }
        };

        let paginator = select
            .order_by_desc(artisan_shop::Column::CreatedAt)
            .paginate(&*self.db, page_size);
        let total = paginator.num_items().await?;
        let shops = paginator
            .fetch_page(page - 1)
            .await?
            .into_iter()
            .map(|shop| ShopQueueItem {
                approved_products: approved_counts.get(&shop.id).copied().unwrap_or(0),
                shop,
            })
            .collect();

        let all = ArtisanShop::find().count(&*self.db).await?;
        let approved = ArtisanShop::find()
            .filter(artisan_shop::Column::MarketplaceApproved.eq(true))
            .count(&*self.db)
            .await?;

        Ok(ShopQueue {
            shops,
            counts: ShopCounts {
                all,
                approved,
                not_approved: all - approved,
            },
            page,
            page_size,
            total,
            total_pages: total_pages(total, page_size),
            available_regions: self
                .distinct_shop_values(artisan_shop::Column::Region)
                .await?,
            available_craft_types: self
                .distinct_shop_values(artisan_shop::Column::CraftType)
                .await?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::product::Model as ProductModel;
    use rust_decimal_macros::dec;

    fn sample_product() -> ProductModel {
        let now = Utc::now();
        ProductModel {
            id: Uuid::new_v4(),
            shop_id: Uuid::new_v4(),
            name: "Mochila wayuu".into(),
            description: Some("Tejida a mano".into()),
            short_description: None,
            price: dec!(120000),
            compare_price: None,
            category: Some("Bolsos y Carteras".into()),
            subcategory: None,
            images: json!([]),
            tags: json!([]),
            materials: json!([]),
            techniques: json!([]),
            inventory: 3,
            sku: None,
            moderation_status: ModerationStatus::PendingModeration,
            active: false,
            featured: false,
            weight: None,
            dimensions: None,
            shipping_data_complete: false,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn actions_map_to_statuses() {
        assert_eq!(
            ModerationAction::Approve.target_status(),
            ModerationStatus::Approved
        );
        assert!(ModerationAction::ApproveWithEdits
            .target_status()
            .is_published());
        assert!(!ModerationAction::RequestChanges
            .target_status()
            .is_published());
        assert_eq!(
            ModerationAction::Reject.target_status(),
            ModerationStatus::Rejected
        );
    }

    #[test]
    fn only_whitelisted_edits_are_applied() {
        let mut product = sample_product();
        let edits = json!({
            "name": "Mochila Wayuu grande",
            "price": "135000",
            "weight": 0.8,
            "dimensions": {"length": 30, "width": 10, "height": 35},
            "moderation_status": "approved",
            "shop_id": Uuid::nil(),
        });
        let edits = edits.as_object().unwrap();

        let applied = apply_edits(&mut product, edits).unwrap();

        assert_eq!(applied, vec!["name", "price", "weight", "dimensions"]);
        assert_eq!(product.name, "Mochila Wayuu grande");
        assert_eq!(product.price, dec!(135000));
        assert_eq!(product.weight, Some(dec!(0.8)));
        assert_eq!(product.moderation_status, ModerationStatus::PendingModeration);
        assert_ne!(product.shop_id, Uuid::nil());
        assert!(shipping_data_complete(product.weight, product.dimensions.as_ref()));
    }

    #[test]
    fn category_path_edit_sets_subcategory() {
        let mut product = sample_product();
        let edits = json!({"category": "TEJEDURÍA/Hamacas"});
        apply_edits(&mut product, edits.as_object().unwrap()).unwrap();
        assert_eq!(product.subcategory.as_deref(), Some("Hamacas"));

        let edits = json!({"category": "TEJEDURÍA/Hamacas", "subcategory": "Chinchorros"});
        apply_edits(&mut product, edits.as_object().unwrap()).unwrap();
        assert_eq!(product.subcategory.as_deref(), Some("Chinchorros"));
    }

    #[test]
    fn recorded_edits_exclude_ignored_keys() {
        let mut product = sample_product();
        let requested = json!({"name": "Mochila", "shop_id": Uuid::nil(), "moderation_status": "approved"});
        let requested = requested.as_object().unwrap();
        let applied = apply_edits(&mut product, requested).unwrap();

        let recorded = applied_edits(Some(requested), &applied);
        assert_eq!(recorded.keys().collect::<Vec<_>>(), vec!["name"]);
        assert!(applied_edits(None, &applied).is_empty());
    }

    #[test]
    fn mistyped_edits_are_rejected() {
        let mut product = sample_product();
        let edits = json!({"inventory": -2});
        let err = apply_edits(&mut product, edits.as_object().unwrap()).unwrap_err();
        assert!(matches!(err, ServiceError::ValidationError(_)));

        let edits = json!({"tags": "ceramica"});
        assert!(apply_edits(&mut product, edits.as_object().unwrap()).is_err());
    }

    #[test]
    fn rejection_message_carries_comment() {
        let (title, message) =
            product_notification(ModerationAction::Reject, "Jarrón", Some("Fotos borrosas"));
        assert_eq!(title, "Producto rechazado");
        assert!(message.contains("\"Jarrón\""));
        assert!(message.ends_with("Fotos borrosas"));

        let (_, message) = product_notification(ModerationAction::Reject, "Jarrón", None);
        assert!(message.ends_with("rechazado."));
    }

    #[test]
    fn marketplace_removal_appends_reason() {
        let (kind, _, message) = marketplace_notification(false, "Barro Vivo", Some("Sin fotos"));
        assert_eq!(kind, "marketplace_removed");
        assert!(message.ends_with(" Razón: Sin fotos"));

        let (kind, title, _) = marketplace_notification(true, "Barro Vivo", None);
        assert_eq!(kind, "marketplace_approved");
        assert_eq!(title, "¡Tu tienda fue aprobada para el Marketplace!");
    }

    #[test]
    fn queue_status_defaults_to_pending() {
        let query = ModerationQueueQuery::default();
        assert_eq!(
            query.status_filter().unwrap(),
            Some(ModerationStatus::PendingModeration)
        );

        let query = ModerationQueueQuery {
            status: Some("all".into()),
            ..Default::default()
        };
        assert_eq!(query.status_filter().unwrap(), None);

        let query = ModerationQueueQuery {
            status: Some("published".into()),
            ..Default::default()
        };
        assert!(query.status_filter().is_err());
    }

    #[test]
    fn queue_paging_defaults_and_clamps() {
        let query = ModerationQueueQuery::default();
        assert_eq!(query.paging(), (1, DEFAULT_QUEUE_PAGE_SIZE));

        let query = ModerationQueueQuery {
            page: Some(0),
            page_size: Some(10_000),
            ..Default::default()
        };
        assert_eq!(query.paging(), (1, MAX_QUEUE_PAGE_SIZE));
    }

    #[test]
    fn min_approved_products_parses_numeric_strings() {
        let query: ModerationQueueQuery =
            serde_json::from_value(json!({"type": "shops", "min_approved_products": "0"})).unwrap();
        assert_eq!(query.queue_type, QueueType::Shops);
        assert_eq!(query.min_approved_products, MinApprovedProducts::Zero);
    }
}
