use crate::{
    clients::{
        carrier::DEFAULT_DELIVERY_DAYS, CarrierClient, CarrierPiece, CarrierQuoteRequest,
    },
    config::CarrierConfig,
    errors::ServiceError,
};
use futures::future::join_all;
use metrics::counter;
use rust_decimal::{prelude::ToPrimitive, Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument, warn};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

const DEFAULT_PIECE_WEIGHT: f64 = 1.0;
const DEFAULT_PIECE_SIDE: f64 = 20.0;

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CartItem {
    pub product_id: Uuid,
    pub shop_id: Uuid,
    #[serde(default)]
    pub shop_name: String,
    #[validate(length(min = 1, max = 10))]
    pub origin_city_code: String,
    #[validate(range(min = 1, max = 1000))]
    pub quantity: u32,
    /// Unit price in minor units (centavos); wins over `price`
    pub unit_price_minor: Option<i64>,
    #[schema(value_type = Option<String>)]
    pub price: Option<Decimal>,
    /// Kilograms
    pub weight: Option<f64>,
    /// Centimetres
    pub length: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct QuoteRequest {
    #[validate]
    pub cart_items: Vec<CartItem>,
    #[validate(length(min = 1, max = 10))]
    pub destination_city_code: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ShopShippingQuote {
    pub shop_id: Uuid,
    pub shop_name: String,
    pub origin_city: String,
    pub destination_city: String,
    #[schema(value_type = String)]
    pub shipping_cost: Decimal,
    pub estimated_days: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ShippingQuote {
    #[schema(value_type = String)]
    pub total_shipping: Decimal,
    pub shops: Vec<ShopShippingQuote>,
}

/// Items of one shop, shipped from a single origin.
#[derive(Debug, Clone)]
pub struct ShopGroup {
    pub shop_id: Uuid,
    pub shop_name: String,
    pub origin_city: String,
    pub items: Vec<CartItem>,
}

/// Groups cart items by shop, keeping first-seen order.
pub fn group_by_shop(items: &[CartItem]) -> Vec<ShopGroup> {
    let mut groups: Vec<ShopGroup> = Vec::new();
    for item in items {
        match groups.iter_mut().find(|g| g.shop_id == item.shop_id) {
            Some(group) => group.items.push(item.clone()),
            None => groups.push(ShopGroup {
                shop_id: item.shop_id,
                shop_name: item.shop_name.clone(),
                origin_city: item.origin_city_code.clone(),
                items: vec![item.clone()],
            }),
        }
    }
    groups
}

/// Minor units when positive, else a positive price, else `default_price`.
pub fn unit_price(item: &CartItem, default_price: i64) -> Decimal {
    if let Some(minor) = item.unit_price_minor.filter(|m| *m > 0) {
        return Decimal::from(minor) / Decimal::from(100);
    }
    item.price
        .filter(|p| p.is_sign_positive() && !p.is_zero())
        .unwrap_or_else(|| Decimal::from(default_price))
}

/// Sum of unit price times quantity, in whole pesos, never below `minimum`.
pub fn declared_value(items: &[CartItem], default_price: i64, minimum: i64) -> i64 {
    let total: Decimal = items
        .iter()
        .map(|item| unit_price(item, default_price) * Decimal::from(item.quantity))
        .sum();
    total
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .unwrap_or(i64::MAX)
        .max(minimum)
}

fn positive_or(value: Option<f64>, default: f64) -> f64 {
    match value {
        Some(v) if v > 0.0 && v.is_finite() => v,
        _ => default,
    }
}

/// One piece per unit, with defaults for missing measures.
pub fn build_pieces(items: &[CartItem]) -> Vec<CarrierPiece> {
    items
        .iter()
        .flat_map(|item| {
            let piece = CarrierPiece {
                weight: positive_or(item.weight, DEFAULT_PIECE_WEIGHT),
                length: positive_or(item.length, DEFAULT_PIECE_SIDE),
                width: positive_or(item.width, DEFAULT_PIECE_SIDE),
                height: positive_or(item.height, DEFAULT_PIECE_SIDE),
            };
            std::iter::repeat(piece).take(item.quantity as usize)
        })
        .collect()
}

#[derive(Clone)]
pub struct ShippingService {
    carrier: Arc<dyn CarrierClient>,
    config: CarrierConfig,
}

impl ShippingService {
    pub fn new(carrier: Arc<dyn CarrierClient>, config: CarrierConfig) -> Self {
        Self { carrier, config }
    }

    fn fallback(&self, group: &ShopGroup, destination: &str, reason: String) -> ShopShippingQuote {
        counter!("artisan_shipping.carrier_fallbacks", 1);
        warn!(shop_id = %group.shop_id, %reason, "using fallback shipping cost");
        ShopShippingQuote {
            shop_id: group.shop_id,
            shop_name: group.shop_name.clone(),
            origin_city: group.origin_city.clone(),
            destination_city: destination.to_string(),
            shipping_cost: Decimal::from(self.config.fallback_cost),
            estimated_days: DEFAULT_DELIVERY_DAYS,
            error: Some(reason),
        }
    }

    async fn quote_group(
        &self,
        token: &str,
        group: &ShopGroup,
        destination: &str,
    ) -> ShopShippingQuote {
        let request = CarrierQuoteRequest::parcel(
            &group.origin_city,
            destination,
            build_pieces(&group.items),
            declared_value(
                &group.items,
                self.config.default_item_price,
                self.config.min_declared_value,
            ),
        );

        match self.carrier.quote(token, &request).await {
            Ok(quote) if quote.cost > Decimal::ZERO => ShopShippingQuote {
                shop_id: group.shop_id,
                shop_name: group.shop_name.clone(),
                origin_city: group.origin_city.clone(),
                destination_city: destination.to_string(),
                shipping_cost: quote.cost,
                estimated_days: quote.estimated_days,
                error: None,
            },
            Ok(_) => self.fallback(group, destination, "carrier returned no cost".to_string()),
            Err(err) => self.fallback(group, destination, err.to_string()),
        }
    }

    /// Quotes a cart, one carrier call per shop.
    ///
    /// A group the carrier cannot quote gets the fallback cost instead of failing the whole quote.
    #[instrument(skip(self, request), fields(items = request.cart_items.len(), destination = %request.destination_city_code))]
    pub async fn quote(&self, request: QuoteRequest) -> Result<ShippingQuote, ServiceError> {
        if request.cart_items.is_empty() {
            return Err(ServiceError::BadRequest("cart is empty".to_string()));
        }
        request.validate()?;

        let destination = request.destination_city_code.trim().to_string();
        let groups = group_by_shop(&request.cart_items);

        let shops = match self.carrier.authenticate().await {
            Ok(token) => {
                join_all(
                    groups
                        .iter()
                        .map(|group| self.quote_group(&token, group, &destination)),
                )
                .await
            }
            Err(err) => {
                warn!(error = %err, "carrier authentication failed");
                groups
                    .iter()
                    .map(|group| {
                        self.fallback(
                            group,
                            &destination,
                            format!("carrier authentication failed: {}", err),
                        )
                    })
                    .collect()
            }
        };

        let total_shipping = shops.iter().map(|s| s.shipping_cost).sum();
        info!(%total_shipping, groups = shops.len(), "shipping quoted");
        Ok(ShippingQuote {
            total_shipping,
            shops,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::{carrier::MockCarrierClient, CarrierQuote};
    use rust_decimal_macros::dec;

    fn item(shop: Uuid, qty: u32) -> CartItem {
        CartItem {
            product_id: Uuid::new_v4(),
            shop_id: shop,
            shop_name: "Taller".into(),
            origin_city_code: "05001".into(),
            quantity: qty,
            unit_price_minor: None,
            price: None,
            weight: None,
            length: None,
            width: None,
            height: None,
        }
    }

    #[test]
    fn groups_preserve_first_seen_order() {
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        let groups = group_by_shop(&[item(a, 1), item(b, 1), item(a, 2)]);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].shop_id, a);
        assert_eq!(groups[0].items.len(), 2);
        assert_eq!(groups[1].shop_id, b);
    }

    #[test]
    fn minor_units_win_over_price() {
        let mut it = item(Uuid::new_v4(), 1);
        it.unit_price_minor = Some(4_500_000);
        it.price = Some(dec!(1));
        assert_eq!(unit_price(&it, 50_000), dec!(45000));
        it.unit_price_minor = None;
        assert_eq!(unit_price(&it, 50_000), dec!(1));
        it.price = None;
        assert_eq!(unit_price(&it, 50_000), dec!(50000));
    }

    #[test]
    fn zero_and_negative_prices_use_the_default() {
        let mut it = item(Uuid::new_v4(), 1);
        it.unit_price_minor = Some(0);
        it.price = Some(dec!(20000));
        assert_eq!(unit_price(&it, 50_000), dec!(20000));

        it.price = Some(Decimal::ZERO);
        assert_eq!(unit_price(&it, 50_000), dec!(50000));
        assert_eq!(declared_value(&[it.clone()], 50_000, 30_000), 50_000);

        it.unit_price_minor = None;
        it.price = Some(dec!(-10000));
        let mut other = item(Uuid::new_v4(), 1);
        other.price = Some(dec!(40000));
        assert_eq!(declared_value(&[it, other], 50_000, 30_000), 90_000);
    }

    #[test]
    fn declared_value_has_a_floor() {
        let mut cheap = item(Uuid::new_v4(), 2);
        cheap.price = Some(dec!(5000));
        assert_eq!(declared_value(&[cheap.clone()], 50_000, 30_000), 30_000);
        cheap.quantity = 10;
        assert_eq!(declared_value(&[cheap], 50_000, 30_000), 50_000);
    }

    #[test]
    fn pieces_default_missing_measures() {
        let mut it = item(Uuid::new_v4(), 3);
        it.weight = Some(0.0);
        it.length = Some(35.0);
        let pieces = build_pieces(&[it]);
        assert_eq!(pieces.len(), 3);
        assert_eq!(pieces[0].weight, 1.0);
        assert_eq!(pieces[0].length, 35.0);
        assert_eq!(pieces[0].width, 20.0);
    }

    #[tokio::test]
    async fn empty_cart_is_rejected() {
        let service = ShippingService::new(Arc::new(MockCarrierClient::new()), CarrierConfig::default());
        let err = service
            .quote(QuoteRequest {
                cart_items: vec![],
                destination_city_code: "11001".into(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::BadRequest(_)));
    }

    #[tokio::test]
    async fn failed_group_falls_back_without_failing_quote() {
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        let mut carrier = MockCarrierClient::new();
        carrier
            .expect_authenticate()
            .times(1)
            .returning(|| Ok("token".into()));
        carrier.expect_quote().times(2).returning(|_, request| {
            if request.numero_piezas == 1 {
                Ok(CarrierQuote {
                    cost: dec!(12000),
                    estimated_days: 3,
                })
            } else {
                Err(ServiceError::ExternalServiceError("timeout".into()))
            }
        });

        let service = ShippingService::new(Arc::new(carrier), CarrierConfig::default());
        let quote = service
            .quote(QuoteRequest {
                cart_items: vec![item(a, 1), item(b, 2)],
                destination_city_code: "11001".into(),
            })
            .await
            .unwrap();

        assert_eq!(quote.shops.len(), 2);
        assert_eq!(quote.shops[0].shipping_cost, dec!(12000));
        assert!(quote.shops[0].error.is_none());
        assert_eq!(quote.shops[1].shipping_cost, dec!(15000));
        assert!(quote.shops[1].error.is_some());
        assert_eq!(quote.total_shipping, dec!(27000));
    }

    #[tokio::test]
    async fn auth_failure_falls_back_for_every_group() {
        let mut carrier = MockCarrierClient::new();
        carrier
            .expect_authenticate()
            .returning(|| Err(ServiceError::ExternalServiceError("bad login".into())));
        carrier.expect_quote().never();

        let service = ShippingService::new(Arc::new(carrier), CarrierConfig::default());
        let quote = service
            .quote(QuoteRequest {
                cart_items: vec![item(Uuid::new_v4(), 1), item(Uuid::new_v4(), 1)],
                destination_city_code: "11001".into(),
            })
            .await
            .unwrap();
        assert_eq!(quote.total_shipping, dec!(30000));
        assert!(quote.shops.iter().all(|s| s.error.is_some()));
    }

    #[tokio::test]
    async fn zero_cost_quote_uses_fallback() {
        let mut carrier = MockCarrierClient::new();
        carrier.expect_authenticate().returning(|| Ok("t".into()));
        carrier.expect_quote().returning(|_, _| {
            Ok(CarrierQuote {
                cost: Decimal::ZERO,
                estimated_days: 5,
            })
        });
        let service = ShippingService::new(Arc::new(carrier), CarrierConfig::default());
        let quote = service
            .quote(QuoteRequest {
                cart_items: vec![item(Uuid::new_v4(), 1)],
                destination_city_code: "11001".into(),
            })
            .await
            .unwrap();
        assert_eq!(quote.shops[0].shipping_cost, dec!(15000));
    }
}
