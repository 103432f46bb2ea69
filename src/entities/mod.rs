pub mod artisan_shop;
pub mod brand_theme;
pub mod coupon;
pub mod coupon_redemption;
pub mod gift_card;
pub mod gift_card_transaction;
pub mod inventory_movement;
pub mod notification;
pub mod product;
pub mod product_moderation_history;
pub mod product_variant;
pub mod user_maturity_score;
