//! Property-based tests for the pure marketplace rules.
//!
//! These cover pricing, stock and text normalization invariants over wide input ranges.

use artisan_market_api::{
    catalog::text::slugify,
    entities::{
        coupon::{self, CouponType},
        inventory_movement::MovementType,
    },
    regions::parse_region_string,
    services::{
        gift_cards::generate_code,
        inventory::apply_movement,
        promotions::{calculate_coupon_discount, gift_card_discount, normalize_code},
        shipping::{build_pieces, declared_value, CartItem},
    },
};
use chrono::Utc;
use proptest::prelude::*;
use rand::{rngs::StdRng, SeedableRng};
use rust_decimal::Decimal;
use uuid::Uuid;

fn coupon(coupon_type: CouponType, value: Decimal, max: Option<Decimal>) -> coupon::Model {
    let now = Utc::now();
    coupon::Model {
        id: Uuid::new_v4(),
        code: "PROP".into(),
        coupon_type,
        value,
        min_order_amount: None,
        max_discount_amount: max,
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

fn cart_item(quantity: u32, price: Option<i64>) -> CartItem {
    CartItem {
        product_id: Uuid::new_v4(),
        shop_id: Uuid::nil(),
        shop_name: String::new(),
        origin_city_code: "05001".into(),
        quantity,
        unit_price_minor: None,
        price: price.map(Decimal::from),
        weight: None,
        length: None,
        width: None,
        height: None,
    }
}

fn amount_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..10_000_000).prop_map(Decimal::from)
}

// Property: discounts stay within the cart and the cap
proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn percent_discount_never_exceeds_cart_or_cap(
        cart in amount_strategy(),
        percent in 0i64..=100,
        cap in prop::option::of(1i64..1_000_000),
    ) {
        let cap = cap.map(Decimal::from);
        let c = coupon(CouponType::Percent, Decimal::from(percent), cap);
        let discount = calculate_coupon_discount(&c, cart);
        prop_assert!(discount >= Decimal::ZERO);
        prop_assert!(discount <= cart);
        if let Some(cap) = cap {
            prop_assert!(discount <= cap);
        }
        prop_assert_eq!(discount, discount.trunc());
    }

    #[test]
    fn fixed_discount_is_min_of_value_and_cart(cart in amount_strategy(), value in amount_strategy()) {
        let c = coupon(CouponType::Fixed, value, None);
        prop_assert_eq!(calculate_coupon_discount(&c, cart), value.min(cart));
    }

    #[test]
    fn gift_card_never_goes_below_zero(cart in amount_strategy(), balance in amount_strategy()) {
        let discount = gift_card_discount(cart, balance);
        prop_assert!(discount <= cart);
        prop_assert!(balance - discount >= Decimal::ZERO);
    }
}

// Property: stock never becomes negative
proptest! {
    #[test]
    fn out_movements_keep_stock_non_negative(current in 0i32..10_000, qty in 1i32..20_000) {
        match apply_movement(current, MovementType::Out, qty) {
            Ok(stock) => {
                prop_assert!(qty <= current);
                prop_assert_eq!(stock, current - qty);
            }
            Err(_) => prop_assert!(qty > current),
        }
    }

    #[test]
    fn in_then_out_restores_stock(current in 0i32..10_000, qty in 1i32..10_000) {
        let raised = apply_movement(current, MovementType::In, qty).unwrap();
        prop_assert_eq!(apply_movement(raised, MovementType::Out, qty).unwrap(), current);
    }

    #[test]
    fn adjust_sets_absolute_level(current in 0i32..10_000, level in 0i32..10_000) {
        prop_assert_eq!(apply_movement(current, MovementType::Adjust, level).unwrap(), level);
    }
}

// Property: shipping inputs
proptest! {
    #[test]
    fn declared_value_respects_floor(
        items in prop::collection::vec((1u32..20, prop::option::of(0i64..500_000)), 1..6),
        floor in 0i64..100_000,
    ) {
        let items: Vec<CartItem> = items.into_iter().map(|(q, p)| cart_item(q, p)).collect();
        let value = declared_value(&items, 50_000, floor);
        prop_assert!(value >= floor);
    }

    #[test]
    fn one_piece_per_unit(quantities in prop::collection::vec(1u32..30, 1..6)) {
        let items: Vec<CartItem> = quantities.iter().map(|q| cart_item(*q, None)).collect();
        let expected: u32 = quantities.iter().sum();
        prop_assert_eq!(build_pieces(&items).len() as u32, expected);
    }
}

// Property: text normalization
proptest! {
    #[test]
    fn slugs_are_url_safe(name in "\\PC{0,60}") {
        let slug = slugify(&name);
        prop_assert!(slug.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'));
        prop_assert!(!slug.starts_with('-'));
        prop_assert!(!slug.ends_with('-'));
        prop_assert!(!slug.contains("--"));
    }

    #[test]
    fn promo_codes_normalize_idempotently(code in "[ a-zA-Z0-9-]{0,20}") {
        let once = normalize_code(&code);
        prop_assert_eq!(normalize_code(&once), once.clone());
        prop_assert_eq!(once.trim(), once.as_str());
    }

    #[test]
    fn region_parsing_never_panics_and_uppercases(region in "[a-zA-Z ,]{0,60}") {
        let parsed = parse_region_string(&region);
        prop_assert_eq!(parsed.department.to_uppercase(), parsed.department.clone());
        prop_assert_eq!(parsed.municipality.to_uppercase(), parsed.municipality.clone());
    }

    #[test]
    fn gift_card_codes_have_fixed_shape(seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let code = generate_code(&mut rng);
        prop_assert_eq!(code.len(), 17);
        prop_assert!(code.starts_with("GC-"));
        prop_assert_eq!(code.matches('-').count(), 3);
    }
}
