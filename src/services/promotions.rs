use crate::{
    db::DbPool,
    entities::{
        coupon::{self, CouponType, Entity as Coupon},
        coupon_redemption::{self, Entity as CouponRedemption},
        gift_card::{self, Entity as GiftCard, GiftCardStatus},
        gift_card_transaction,
    },
    errors::ServiceError,
};
use chrono::{DateTime, Utc};
use metrics::counter;
use rust_decimal::{Decimal, RoundingStrategy};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait,
    QueryFilter, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, instrument};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// Condition keys that restrict a coupon to a buyer's first purchase.
const FIRST_PURCHASE_KEYS: [&str; 2] = ["first_purchase", "primera_compra"];

/// Codes are matched trimmed and uppercased.
pub fn normalize_code(code: &str) -> String {
    code.trim().to_uppercase()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum PromoType {
    GiftCard,
    Coupon,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct ValidatePromoCode {
    #[validate(length(min = 1, max = 64))]
    pub code: String,
    #[validate(custom = "crate::services::validate_non_negative")]
    #[schema(value_type = String, example = "150000")]
    pub cart_total: Decimal,
    pub user_id: Option<Uuid>,
    #[serde(default, deserialize_with = "crate::services::trimmed_opt_string")]
    #[validate(email)]
    pub user_email: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct ApplyPromoCode {
    #[validate(length(min = 1, max = 64))]
    pub code: String,
    #[validate(custom = "crate::services::validate_non_negative")]
    #[schema(value_type = String, example = "150000")]
    pub cart_total: Decimal,
    pub user_id: Option<Uuid>,
    #[serde(default, deserialize_with = "crate::services::trimmed_opt_string")]
    #[validate(email)]
    pub user_email: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub order_id: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PromoValidation {
    pub valid: bool,
    #[serde(rename = "type")]
    pub promo_type: PromoType,
    pub promo_id: Uuid,
    pub code: String,
    #[schema(value_type = String)]
    pub discount_amount: Decimal,
    #[schema(value_type = String)]
    pub new_total: Decimal,
    /// Gift cards only: balance left after this purchase
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub remaining_balance: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coupon_type: Option<CouponType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub coupon_value: Option<Decimal>,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PromoApplication {
    #[serde(rename = "type")]
    pub promo_type: PromoType,
    pub promo_id: Uuid,
    pub order_id: String,
    #[schema(value_type = String)]
    pub discount_applied: Decimal,
    #[schema(value_type = String)]
    pub new_total: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub remaining_balance: Option<Decimal>,
    pub message: String,
}

fn validate_coupon_dates(coupon: &CreateCoupon) -> Result<(), ValidationError> {
    match (coupon.start_date, coupon.end_date) {
        (Some(start), Some(end)) if end <= start => Err(ValidationError::new("end_before_start")),
        _ => Ok(()),
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_coupon_dates"))]
pub struct CreateCoupon {
    #[validate(length(min = 3, max = 64))]
    pub code: String,
    #[serde(rename = "type")]
    pub coupon_type: CouponType,
    #[validate(custom = "crate::services::validate_non_negative")]
    #[schema(value_type = String, example = "10")]
    pub value: Decimal,
    #[validate(custom = "crate::services::validate_non_negative")]
    #[schema(value_type = Option<String>)]
    pub min_order_amount: Option<Decimal>,
    #[validate(custom = "crate::services::validate_non_negative")]
    #[schema(value_type = Option<String>)]
    pub max_discount_amount: Option<Decimal>,
    #[validate(range(min = 1))]
    pub usage_limit_total: Option<i32>,
    #[validate(range(min = 1))]
    pub usage_limit_per_user: Option<i32>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub is_active: Option<bool>,
    #[schema(value_type = Option<Object>)]
    pub conditions: Option<Value>,
}

/// Who is redeeming; the user id wins over the email when both are present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Redeemer<'a> {
    User(Uuid),
    Email(&'a str),
}

/// The email as stored on redemptions and compared by usage limits.
fn redeemer_email(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|email| !email.is_empty())
        .map(str::to_string)
}

impl<'a> Redeemer<'a> {
    fn from_parts(user_id: Option<Uuid>, user_email: Option<&'a str>) -> Option<Self> {
        match (user_id, user_email.map(str::trim).filter(|e| !e.is_empty())) {
            (Some(id), _) => Some(Self::User(id)),
            (None, Some(email)) => Some(Self::Email(email)),
            (None, None) => None,
        }
    }

    fn condition(&self) -> sea_orm::Condition {
        match self {
            Self::User(id) => {
                sea_orm::Condition::all().add(coupon_redemption::Column::UserId.eq(*id))
            }
            Self::Email(email) => {
                sea_orm::Condition::all().add(coupon_redemption::Column::UserEmail.eq(*email))
            }
        }
    }
}

fn rejected(reason: impl Into<String>) -> ServiceError {
    ServiceError::PromoRejected(reason.into())
}

/// A gift card is redeemable when active and not past its expiration date.
pub fn check_gift_card(card: &gift_card::Model, now: DateTime<Utc>) -> Result<(), ServiceError> {
    match card.status {
        GiftCardStatus::Active => {}
        GiftCardStatus::Expired => return Err(rejected("Esta gift card ha expirado")),
        GiftCardStatus::Depleted => {
            return Err(rejected("Esta gift card ya fue utilizada completamente"))
        }
        GiftCardStatus::Blocked => return Err(rejected("Esta gift card está bloqueada")),
    }
    if card.expiration_date.map_or(false, |expires| expires < now) {
        return Err(rejected("Esta gift card ha expirado"));
    }
    Ok(())
}

/// A gift card covers at most the cart total.
pub fn gift_card_discount(cart_total: Decimal, remaining: Decimal) -> Decimal {
    cart_total.min(remaining).max(Decimal::ZERO)
}

/// Date window, minimum order and total usage rules of a coupon.
pub fn check_coupon_rules(
    coupon: &coupon::Model,
    cart_total: Decimal,
    now: DateTime<Utc>,
) -> Result<(), ServiceError> {
    if coupon.start_date.map_or(false, |start| start > now) {
        return Err(rejected("Este cupón aún no está activo"));
    }
    if coupon.end_date.map_or(false, |end| end < now) {
        return Err(rejected("Este cupón ha expirado"));
    }
    if let Some(min) = coupon.min_order_amount.filter(|min| *min > Decimal::ZERO) {
        if cart_total < min {
            return Err(rejected(format!("Monto mínimo de compra: ${}", min.normalize())));
        }
    }
    if let Some(limit) = coupon.usage_limit_total.filter(|limit| *limit > 0) {
        if coupon.times_used >= limit {
            return Err(rejected("Este cupón ya alcanzó su límite de usos"));
        }
    }
    Ok(())
}

fn requires_first_purchase(coupon: &coupon::Model) -> bool {
    coupon.conditions.as_ref().map_or(false, |conditions| {
        FIRST_PURCHASE_KEYS
            .iter()
            .any(|key| conditions.get(key).and_then(Value::as_bool).unwrap_or(false))
    })
}

/// Percent coupons round to whole units; the result is capped by max_discount_amount and
/// then by the cart total.
pub fn calculate_coupon_discount(coupon: &coupon::Model, cart_total: Decimal) -> Decimal {
    let raw = match coupon.coupon_type {
        CouponType::Percent => (cart_total * coupon.value / Decimal::ONE_HUNDRED)
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero),
        CouponType::Fixed => coupon.value,
    };
    let capped = match coupon.max_discount_amount.filter(|max| *max > Decimal::ZERO) {
        Some(max) => raw.min(max),
        None => raw,
    };
    capped.min(cart_total).max(Decimal::ZERO)
}

/// Per-user limit and first-purchase condition; both need the redeemer's history.
async fn check_coupon_usage<C: ConnectionTrait>(
    conn: &C,
    coupon: &coupon::Model,
    redeemer: Option<Redeemer<'_>>,
) -> Result<(), ServiceError> {
    let Some(redeemer) = redeemer else {
        return Ok(());
    };

    if let Some(limit) = coupon.usage_limit_per_user.filter(|limit| *limit > 0) {
        let used = CouponRedemption::find()
            .filter(coupon_redemption::Column::CouponId.eq(coupon.id))
            .filter(redeemer.condition())
            .count(conn)
            .await?;
        if used >= limit as u64 {
            return Err(rejected(
                "Ya usaste este cupón el máximo de veces permitido",
            ));
        }
    }

    if requires_first_purchase(coupon) {
        let previous = CouponRedemption::find()
            .filter(redeemer.condition())
            .count(conn)
            .await?;
        if previous > 0 {
            return Err(rejected("Este cupón es solo para primera compra"));
        }
    }
    Ok(())
}

async fn find_gift_card<C: ConnectionTrait>(
    conn: &C,
    code: &str,
) -> Result<Option<gift_card::Model>, ServiceError> {
    Ok(GiftCard::find()
        .filter(gift_card::Column::Code.eq(code))
        .one(conn)
        .await?)
}

async fn find_active_coupon<C: ConnectionTrait>(
    conn: &C,
    code: &str,
) -> Result<coupon::Model, ServiceError> {
    Coupon::find()
        .filter(coupon::Column::Code.eq(code))
        .filter(coupon::Column::IsActive.eq(true))
        .one(conn)
        .await?
        .ok_or_else(|| ServiceError::not_found("promo code", code))
}

fn format_amount(amount: Decimal) -> String {
    amount.normalize().to_string()
}

/// Gift card and coupon redemption at checkout
#[derive(Clone)]
pub struct PromotionService {
    db: Arc<DbPool>,
}

impl PromotionService {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self { db }
    }

    /// Checks a code against the cart without redeeming it. Gift cards are looked up first.
    #[instrument(skip(self, input), fields(code = %normalize_code(&input.code)))]
    pub async fn validate_promo_code(
        &self,
        input: ValidatePromoCode,
    ) -> Result<PromoValidation, ServiceError> {
        input.validate()?;
        let code = normalize_code(&input.code);
        let now = Utc::now();

        if let Some(card) = find_gift_card(&*self.db, &code).await? {
            check_gift_card(&card, now)?;
            let discount = gift_card_discount(input.cart_total, card.remaining_amount);
            return Ok(PromoValidation {
                valid: true,
                promo_type: PromoType::GiftCard,
                promo_id: card.id,
                code,
                discount_amount: discount,
                new_total: input.cart_total - discount,
                remaining_balance: Some(card.remaining_amount - discount),
                coupon_type: None,
                coupon_value: None,
                message: format!(
                    "Gift card válida - Saldo disponible: ${}",
                    format_amount(card.remaining_amount)
                ),
            });
        }

        let coupon = find_active_coupon(&*self.db, &code).await?;
        check_coupon_rules(&coupon, input.cart_total, now)?;
        let redeemer = Redeemer::from_parts(input.user_id, input.user_email.as_deref());
        check_coupon_usage(&*self.db, &coupon, redeemer).await?;

        let discount = calculate_coupon_discount(&coupon, input.cart_total);
        let discount_text = match coupon.coupon_type {
            CouponType::Percent => format!("{}% de descuento", format_amount(coupon.value)),
            CouponType::Fixed => format!("${} de descuento", format_amount(coupon.value)),
        };
        Ok(PromoValidation {
            valid: true,
            promo_type: PromoType::Coupon,
            promo_id: coupon.id,
            code,
            discount_amount: discount,
            new_total: input.cart_total - discount,
            remaining_balance: None,
            coupon_type: Some(coupon.coupon_type),
            coupon_value: Some(coupon.value),
            message: format!("Cupón válido - {}", discount_text),
        })
    }

    /// Re-validates the code and redeems it against an order in one transaction.
    #[instrument(skip(self, input), fields(code = %normalize_code(&input.code), order_id = %input.order_id))]
    pub async fn apply_promo_code(
        &self,
        input: ApplyPromoCode,
    ) -> Result<PromoApplication, ServiceError> {
        input.validate()?;
        let code = normalize_code(&input.code);

        let application = self
            .db
            .transaction::<_, PromoApplication, ServiceError>(move |txn| {
                Box::pin(async move {
                    let now = Utc::now();
                    if let Some(card) = find_gift_card(txn, &code).await? {
                        return redeem_gift_card(txn, card, &input, now).await;
                    }

                    let coupon = find_active_coupon(txn, &code).await?;
                    check_coupon_rules(&coupon, input.cart_total, now)?;
                    let redeemer =
                        Redeemer::from_parts(input.user_id, input.user_email.as_deref());
                    check_coupon_usage(txn, &coupon, redeemer).await?;
                    redeem_coupon(txn, coupon, &input, now).await
                })
            })
            .await?;

        let kind = match application.promo_type {
            PromoType::GiftCard => "giftcard",
            PromoType::Coupon => "coupon",
        };
        counter!("artisan_promotions.redemptions", 1, "type" => kind);
        info!(
            promo_id = %application.promo_id,
            discount = %application.discount_applied,
            "promo code applied"
        );
        Ok(application)
    }

    #[instrument(skip(self, input), fields(code = %normalize_code(&input.code)))]
    pub async fn create_coupon(&self, input: CreateCoupon) -> Result<coupon::Model, ServiceError> {
        input.validate()?;
        if input.coupon_type == CouponType::Percent && input.value > Decimal::ONE_HUNDRED {
            return Err(ServiceError::ValidationError(
                "percent coupons cannot exceed 100".to_string(),
            ));
        }

        let code = normalize_code(&input.code);
        let taken = Coupon::find()
            .filter(coupon::Column::Code.eq(code.as_str()))
            .one(&*self.db)
            .await?
            .is_some()
            || find_gift_card(&*self.db, &code).await?.is_some();
        if taken {
            return Err(ServiceError::Conflict(format!(
                "promo code '{}' already exists",
                code
            )));
        }

        let now = Utc::now();
        let coupon = coupon::ActiveModel {
            id: Set(Uuid::new_v4()),
            code: Set(code),
            coupon_type: Set(input.coupon_type),
            value: Set(input.value),
            min_order_amount: Set(input.min_order_amount),
            max_discount_amount: Set(input.max_discount_amount),
            usage_limit_total: Set(input.usage_limit_total),
            usage_limit_per_user: Set(input.usage_limit_per_user),
            times_used: Set(0),
            start_date: Set(input.start_date),
            end_date: Set(input.end_date),
            is_active: Set(input.is_active.unwrap_or(true)),
            conditions: Set(input.conditions),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&*self.db)
        .await?;

        info!(coupon_id = %coupon.id, "coupon created");
        Ok(coupon)
    }
}

async fn redeem_gift_card<C: ConnectionTrait>(
    txn: &C,
    card: gift_card::Model,
    input: &ApplyPromoCode,
    now: DateTime<Utc>,
) -> Result<PromoApplication, ServiceError> {
    check_gift_card(&card, now)?;
    if card.remaining_amount <= Decimal::ZERO {
        return Err(rejected("Gift card sin saldo disponible"));
    }

    let discount = gift_card_discount(input.cart_total, card.remaining_amount);
    let remaining = card.remaining_amount - discount;
    let status = if remaining <= Decimal::ZERO {
        GiftCardStatus::Depleted
    } else {
        GiftCardStatus::Active
    };

    let updated = GiftCard::update_many()
        .col_expr(gift_card::Column::RemainingAmount, Expr::value(remaining))
        .col_expr(gift_card::Column::Status, Expr::value(status))
        .col_expr(gift_card::Column::UpdatedAt, Expr::value(now))
        .filter(gift_card::Column::Id.eq(card.id))
        .filter(gift_card::Column::RemainingAmount.eq(card.remaining_amount))
        .exec(txn)
        .await?;
    if updated.rows_affected != 1 {
        return Err(ServiceError::Conflict(
            "gift card balance changed concurrently".to_string(),
        ));
    }

    gift_card_transaction::ActiveModel {
        id: Set(Uuid::new_v4()),
        gift_card_id: Set(card.id),
        order_id: Set(input.order_id.clone()),
        amount_used: Set(discount),
        created_at: Set(now),
    }
    .insert(txn)
    .await?;

    Ok(PromoApplication {
        promo_type: PromoType::GiftCard,
        promo_id: card.id,
        order_id: input.order_id.clone(),
        discount_applied: discount,
        new_total: input.cart_total - discount,
        remaining_balance: Some(remaining),
        message: "Gift card aplicada exitosamente".to_string(),
    })
}

async fn redeem_coupon<C: ConnectionTrait>(
    txn: &C,
    coupon: coupon::Model,
    input: &ApplyPromoCode,
    now: DateTime<Utc>,
) -> Result<PromoApplication, ServiceError> {
    let discount = calculate_coupon_discount(&coupon, input.cart_total);

    let updated = Coupon::update_many()
        .col_expr(coupon::Column::TimesUsed, Expr::value(coupon.times_used + 1))
        .col_expr(coupon::Column::UpdatedAt, Expr::value(now))
        .filter(coupon::Column::Id.eq(coupon.id))
        .filter(coupon::Column::TimesUsed.eq(coupon.times_used))
        .exec(txn)
        .await?;
    if updated.rows_affected != 1 {
        return Err(ServiceError::Conflict(
            "coupon usage changed concurrently".to_string(),
        ));
    }

    coupon_redemption::ActiveModel {
        id: Set(Uuid::new_v4()),
        coupon_id: Set(coupon.id),
        user_id: Set(input.user_id),
        user_email: Set(redeemer_email(input.user_email.as_deref())),
        order_id: Set(input.order_id.clone()),
        amount_discounted: Set(discount),
        created_at: Set(now),
    }
    .insert(txn)
    .await?;

    Ok(PromoApplication {
        promo_type: PromoType::Coupon,
        promo_id: coupon.id,
        order_id: input.order_id.clone(),
        discount_applied: discount,
        new_total: input.cart_total - discount,
        remaining_balance: None,
        message: "Cupón aplicado exitosamente".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use chrono::Duration;
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn coupon(coupon_type: CouponType, value: Decimal) -> coupon::Model {
        let now = Utc::now();
        coupon::Model {
            id: Uuid::new_v4(),
            code: "TELAR10".into(),
            coupon_type,
            value,
            min_order_amount: None,
            max_discount_amount: None,
            usage_limit_total: None,
            usage_limit_per_user: None,
            times_used: 0,
            start_date: None,
            end_date: None,
            is_active: true,
            conditions: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn gift_card(status: GiftCardStatus, remaining: Decimal) -> gift_card::Model {
        let now = Utc::now();
        gift_card::Model {
            id: Uuid::new_v4(),
            code: "GC-AAAA-BBBB-CCCC".into(),
            initial_amount: dec!(100000),
            remaining_amount: remaining,
            currency: "COP".into(),
            status,
            expiration_date: Some(now + Duration::days(30)),
            purchaser_email: "comprador@example.com".into(),
            recipient_email: None,
            message: None,
            marketplace_order_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn codes_are_trimmed_and_uppercased() {
        assert_eq!(normalize_code("  telar10 "), "TELAR10");
    }

    #[test]
    fn percent_discount_rounds_and_respects_cap() {
        let mut c = coupon(CouponType::Percent, dec!(15));
        assert_eq!(calculate_coupon_discount(&c, dec!(99999)), dec!(15000));

        c.max_discount_amount = Some(dec!(10000));
        assert_eq!(calculate_coupon_discount(&c, dec!(200000)), dec!(10000));
    }

    #[test]
    fn fixed_discount_never_exceeds_cart() {
        let c = coupon(CouponType::Fixed, dec!(50000));
        assert_eq!(calculate_coupon_discount(&c, dec!(30000)), dec!(30000));
        assert_eq!(calculate_coupon_discount(&c, dec!(80000)), dec!(50000));
    }

    #[test]
    fn gift_card_discount_is_bounded_by_cart_and_balance() {
        assert_eq!(gift_card_discount(dec!(40000), dec!(100000)), dec!(40000));
        assert_eq!(gift_card_discount(dec!(150000), dec!(100000)), dec!(100000));
    }

    #[test]
    fn inactive_gift_cards_are_rejected_with_reason() {
        let now = Utc::now();
        assert_matches!(
            check_gift_card(&gift_card(GiftCardStatus::Depleted, dec!(0)), now),
            Err(ServiceError::PromoRejected(reason)) if reason.contains("utilizada completamente")
        );
        assert_matches!(
            check_gift_card(&gift_card(GiftCardStatus::Blocked, dec!(10)), now),
            Err(ServiceError::PromoRejected(reason)) if reason.contains("bloqueada")
        );
        assert!(check_gift_card(&gift_card(GiftCardStatus::Active, dec!(10)), now).is_ok());
    }

    #[test]
    fn past_expiration_counts_as_expired() {
        let mut card = gift_card(GiftCardStatus::Active, dec!(10000));
        card.expiration_date = Some(Utc::now() - Duration::days(1));
        assert_matches!(
            check_gift_card(&card, Utc::now()),
            Err(ServiceError::PromoRejected(reason)) if reason.contains("expirado")
        );
    }

    #[test]
    fn coupon_rules_are_checked_in_order() {
        let now = Utc::now();
        let mut c = coupon(CouponType::Percent, dec!(10));
        c.start_date = Some(now + Duration::days(1));
        c.min_order_amount = Some(dec!(50000));
        assert_matches!(
            check_coupon_rules(&c, dec!(1000), now),
            Err(ServiceError::PromoRejected(reason)) if reason.contains("aún no está activo")
        );

        c.start_date = None;
        assert_matches!(
            check_coupon_rules(&c, dec!(1000), now),
            Err(ServiceError::PromoRejected(reason)) if reason.starts_with("Monto mínimo")
        );

        c.usage_limit_total = Some(5);
        c.times_used = 5;
        assert_matches!(
            check_coupon_rules(&c, dec!(60000), now),
            Err(ServiceError::PromoRejected(reason)) if reason.contains("límite de usos")
        );

        c.times_used = 4;
        assert!(check_coupon_rules(&c, dec!(60000), now).is_ok());
    }

    #[test]
    fn first_purchase_condition_accepts_both_keys() {
        let mut c = coupon(CouponType::Fixed, dec!(5000));
        assert!(!requires_first_purchase(&c));
        c.conditions = Some(json!({"first_purchase": true}));
        assert!(requires_first_purchase(&c));
        c.conditions = Some(json!({"primera_compra": true}));
        assert!(requires_first_purchase(&c));
        c.conditions = Some(json!({"primera_compra": false}));
        assert!(!requires_first_purchase(&c));
    }

    #[test]
    fn redeemer_prefers_user_id() {
        let id = Uuid::new_v4();
        assert_eq!(
            Redeemer::from_parts(Some(id), Some("a@b.co")),
            Some(Redeemer::User(id))
        );
        assert_eq!(
            Redeemer::from_parts(None, Some(" a@b.co ")),
            Some(Redeemer::Email("a@b.co"))
        );
        assert_eq!(Redeemer::from_parts(None, Some("  ")), None);
    }

    #[test]
    fn redemption_email_is_stored_trimmed() {
        let request: ApplyPromoCode = serde_json::from_value(json!({
            "code": "bienvenida",
            "cart_total": "30000",
            "user_email": "  ana@telar.co ",
            "order_id": "order-9",
        }))
        .unwrap();
        assert_eq!(request.user_email.as_deref(), Some("ana@telar.co"));
        assert!(request.validate().is_ok());

        assert_eq!(redeemer_email(Some(" ana@telar.co ")).as_deref(), Some("ana@telar.co"));
        assert_eq!(redeemer_email(Some("   ")), None);
    }

    #[test]
    fn promo_type_serializes_uppercase() {
        assert_eq!(serde_json::to_value(PromoType::GiftCard).unwrap(), "GIFTCARD");
        assert_eq!(serde_json::to_value(PromoType::Coupon).unwrap(), "COUPON");
    }
}
