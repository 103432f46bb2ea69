pub mod admin;
pub mod brand_themes;
pub mod common;
pub mod gift_cards;
pub mod inventory;
pub mod maturity;
pub mod moderation;
pub mod notifications;
pub mod products;
pub mod promotions;
pub mod shipping;
pub mod shops;

use crate::{
    clients::{
        AiClassifier, CarrierClient, EmailSender, HttpAiClassifier, ResendEmailSender,
        ServientregaClient,
    },
    config::AppConfig,
    db::DbPool,
    errors::ServiceError,
    services::{
        brand_themes::BrandThemeService, gift_cards::GiftCardService,
        inventory::InventoryService, maturity::MaturityService, moderation::ModerationService,
        notifications::NotificationService, products::ProductService,
        promotions::PromotionService, shipping::ShippingService, shop_regions::ShopRegionService,
        shops::ShopService,
    },
};
use std::sync::Arc;
use tracing::info;

// Re-export AppState so handler modules can import it as crate::handlers::AppState
pub use crate::AppState;

/// Outbound integrations shared by the services
#[derive(Clone)]
pub struct Integrations {
    pub classifier: Option<Arc<dyn AiClassifier>>,
    pub email: Option<Arc<dyn EmailSender>>,
    pub carrier: Arc<dyn CarrierClient>,
}

impl Integrations {
    /// HTTP clients for every configured provider. Providers without an API key are left out.
    pub fn from_config(config: &AppConfig) -> Result<Self, ServiceError> {
        let classifier: Option<Arc<dyn AiClassifier>> = match config.ai.api_key.as_deref() {
            Some(key) if !key.is_empty() => {
                Some(Arc::new(HttpAiClassifier::new(config.ai.clone())?))
            }
            _ => {
                info!("AI gateway key not configured, categorizing by keyword only");
                None
            }
        };
        let email: Option<Arc<dyn EmailSender>> = match config.email.api_key.as_deref() {
            Some(key) if !key.is_empty() => {
                Some(Arc::new(ResendEmailSender::new(config.email.clone())?))
            }
            _ => None,
        };
        Ok(Self {
            classifier,
            email,
            carrier: Arc::new(ServientregaClient::new(config.carrier.clone())?),
        })
    }
}

/// Services layer that encapsulates business logic used by HTTP handlers
#[derive(Clone)]
pub struct AppServices {
    pub brand_themes: Arc<BrandThemeService>,
    pub shops: Arc<ShopService>,
    pub shop_regions: Arc<ShopRegionService>,
    pub products: Arc<ProductService>,
    pub moderation: Arc<ModerationService>,
    pub notifications: Arc<NotificationService>,
    pub inventory: Arc<InventoryService>,
    pub promotions: Arc<PromotionService>,
    pub gift_cards: Arc<GiftCardService>,
    pub shipping: Arc<ShippingService>,
    pub maturity: Arc<MaturityService>,
}

impl AppServices {
    pub fn new(db_pool: Arc<DbPool>, config: &AppConfig, integrations: Integrations) -> Self {
        Self {
            brand_themes: Arc::new(BrandThemeService::new(db_pool.clone())),
            shops: Arc::new(ShopService::new(db_pool.clone())),
            shop_regions: Arc::new(ShopRegionService::new(db_pool.clone())),
            products: Arc::new(ProductService::new(
                db_pool.clone(),
                integrations.classifier,
            )),
            moderation: Arc::new(ModerationService::new(db_pool.clone())),
            notifications: Arc::new(NotificationService::new(db_pool.clone())),
            inventory: Arc::new(InventoryService::new(db_pool.clone())),
            promotions: Arc::new(PromotionService::new(db_pool.clone())),
            gift_cards: Arc::new(GiftCardService::new(
                db_pool.clone(),
                integrations.email,
                config.default_currency.clone(),
            )),
            shipping: Arc::new(ShippingService::new(
                integrations.carrier,
                config.carrier.clone(),
            )),
            maturity: Arc::new(MaturityService::new(db_pool)),
        }
    }
}
