use crate::{
    clients::{EmailMessage, EmailSender},
    db::DbPool,
    entities::gift_card::{self, Entity as GiftCard, GiftCardStatus},
    errors::ServiceError,
    services::promotions::normalize_code,
};
use chrono::{DateTime, Datelike, Duration, Utc};
use rand::Rng;
use rust_decimal::{Decimal, RoundingStrategy};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set,
    TransactionTrait,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument, warn};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

const CODE_ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";
const CODE_ATTEMPTS: usize = 10;
const MAX_CARDS_PER_ITEM: u32 = 50;

const MONTHS_ES: [&str; 12] = [
    "enero",
    "febrero",
    "marzo",
    "abril",
    "mayo",
    "junio",
    "julio",
    "agosto",
    "septiembre",
    "octubre",
    "noviembre",
    "diciembre",
];

fn validate_positive(value: &Decimal) -> Result<(), ValidationError> {
    if *value > Decimal::ZERO {
        Ok(())
    } else {
        Err(ValidationError::new("must_be_positive"))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct GiftCardItem {
    #[validate(custom = "validate_positive")]
    #[schema(value_type = String, example = "100000")]
    pub amount: Decimal,
    #[validate(range(min = 1, max = 50))]
    pub quantity: Option<u32>,
    #[validate(email)]
    pub recipient_email: Option<String>,
    #[validate(length(max = 500))]
    pub message: Option<String>,
    #[validate(range(min = 1, max = 3650))]
    pub expiration_days: Option<i64>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct GenerateGiftCards {
    #[validate(length(min = 1, max = 100))]
    pub order_id: String,
    #[validate(email)]
    pub purchaser_email: String,
    #[validate(length(min = 1, max = 20))]
    #[validate]
    pub items: Vec<GiftCardItem>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct GeneratedGiftCards {
    pub order_id: String,
    pub gift_cards: Vec<gift_card::Model>,
    pub email_sent: bool,
}

/// Random code shaped `GC-XXXX-XXXX-XXXX`, avoiding look-alike characters.
pub fn generate_code<R: Rng + ?Sized>(rng: &mut R) -> String {
    let mut code = String::from("GC");
    for _ in 0..3 {
        code.push('-');
        for _ in 0..4 {
            let idx = rng.gen_range(0..CODE_ALPHABET.len());
            code.push(CODE_ALPHABET[idx] as char);
        }
    }
    code
}

/// Whole pesos with `.` thousands separators, e.g. `$100.000`.
pub fn format_cop(amount: Decimal) -> String {
    let whole = amount
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .abs()
        .normalize()
        .to_string();
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }
    let sign = if amount.is_sign_negative() && !amount.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{}${}", sign, grouped)
}

fn format_date_es(date: DateTime<Utc>) -> String {
    format!(
        "{} de {} de {}",
        date.day(),
        MONTHS_ES[date.month0() as usize],
        date.year()
    )
}

fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

pub fn email_subject(count: usize) -> String {
    if count == 1 {
        "🎁 Tu Gift Card de TELAR".to_string()
    } else {
        format!("🎁 Tus {} Gift Cards de TELAR", count)
    }
}

/// Purchaser summary: order, card count and total, then one block per card.
pub fn render_email_html(order_id: &str, cards: &[gift_card::Model]) -> String {
    let total: Decimal = cards.iter().map(|card| card.initial_amount).sum();
    let plural = if cards.len() == 1 { "" } else { "s" };

    let mut blocks = String::new();
    for (index, card) in cards.iter().enumerate() {
        let label = if cards.len() > 1 {
            format!("Gift Card #{}", index + 1)
        } else {
            "Gift Card".to_string()
        };
        blocks.push_str(&format!(
            r#"<div style="background:#142239;border-radius:16px;padding:24px;margin-bottom:16px;color:#fff;">
<p style="margin:0;font-size:12px;text-transform:uppercase;">{label}</p>
<p style="margin:8px 0 0 0;font-size:28px;font-weight:bold;color:#ffc716;">{amount}</p>
<p style="margin:16px 0 4px 0;font-size:11px;text-transform:uppercase;">Código</p>
<p style="margin:0;font-family:'Courier New',monospace;font-size:24px;font-weight:bold;color:#ffc716;">{code}</p>
"#,
            label = label,
            amount = format_cop(card.initial_amount),
            code = card.code,
        ));
        if let Some(expires) = card.expiration_date {
            blocks.push_str(&format!(
                "<p style=\"margin:8px 0;font-size:13px;\">⏰ Válido hasta: <strong>{}</strong></p>\n",
                format_date_es(expires)
            ));
        }
        if let Some(recipient) = card.recipient_email.as_deref() {
            blocks.push_str(&format!(
                "<p style=\"margin:8px 0;font-size:13px;\">🎁 Esta gift card es un regalo para: <strong>{}</strong></p>\n",
                escape_html(recipient)
            ));
            if let Some(message) = card.message.as_deref() {
                blocks.push_str(&format!(
                    "<p style=\"margin:8px 0;font-size:13px;font-style:italic;\">\"{}\"</p>\n",
                    escape_html(message)
                ));
            }
        }
        blocks.push_str("</div>\n");
    }

    format!(
        r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"><title>Tus Gift Cards de TELAR</title></head>
<body style="margin:0;padding:0;font-family:Arial,sans-serif;background-color:#f5f5f5;">
<div style="max-width:600px;margin:0 auto;background-color:#ffffff;padding:40px 32px;">
<h1 style="margin:0 0 8px 0;font-size:28px;color:#142239;">🎉 ¡Gracias por tu compra!</h1>
<p style="margin:0 0 24px 0;font-size:16px;color:#666;">Tu pedido <strong>#{order}</strong> ha sido procesado exitosamente.</p>
<div style="background:#fcf7ec;border-radius:12px;padding:20px;margin-bottom:32px;border-left:4px solid #ffc716;">
<p style="margin:0;font-size:14px;color:#666;">Resumen de tu compra</p>
<p style="margin:8px 0 0 0;font-size:20px;font-weight:bold;color:#142239;">{count} Gift Card{plural} • Total: {total}</p>
</div>
<h2 style="margin:0 0 20px 0;font-size:18px;color:#142239;">Tus Gift Cards</h2>
{blocks}<p style="font-size:14px;color:#666;">En el checkout de <a href="https://telar.co">telar.co</a>, ingresa el código de tu Gift Card. El saldo restante quedará disponible para futuras compras.</p>
</div>
</body>
</html>
"#,
        order = escape_html(order_id),
        count = cards.len(),
        plural = plural,
        total = format_cop(total),
        blocks = blocks,
    )
}

async fn code_exists<C: ConnectionTrait>(conn: &C, code: &str) -> Result<bool, ServiceError> {
    Ok(GiftCard::find()
        .filter(gift_card::Column::Code.eq(code))
        .one(conn)
        .await?
        .is_some())
}

async fn unique_code<C: ConnectionTrait>(conn: &C) -> Result<String, ServiceError> {
    for _ in 0..CODE_ATTEMPTS {
        let code = generate_code(&mut rand::thread_rng());
        if !code_exists(conn, &code).await? {
            return Ok(code);
        }
    }
    Err(ServiceError::Conflict(
        "could not generate a unique gift card code".to_string(),
    ))
}

#[derive(Clone)]
pub struct GiftCardService {
    db: Arc<DbPool>,
    email: Option<Arc<dyn EmailSender>>,
    currency: String,
}

impl GiftCardService {
    pub fn new(
        db: Arc<DbPool>,
        email: Option<Arc<dyn EmailSender>>,
        currency: impl Into<String>,
    ) -> Self {
        Self {
            db,
            email,
            currency: currency.into(),
        }
    }

    /// Issues the gift cards bought in a marketplace order and emails the purchaser.
    ///
    /// All cards are inserted in one transaction. The email is best effort.
    #[instrument(skip(self, input), fields(order_id = %input.order_id))]
    pub async fn generate(
        &self,
        input: GenerateGiftCards,
    ) -> Result<GeneratedGiftCards, ServiceError> {
        input.validate()?;
        let order_id = input.order_id.clone();
        let purchaser = input.purchaser_email.clone();
        let currency = self.currency.clone();

        let cards = self
            .db
            .transaction::<_, Vec<gift_card::Model>, ServiceError>(move |txn| {
                Box::pin(async move {
                    let now = Utc::now();
                    let mut cards = Vec::new();
                    for item in input.items {
                        let quantity = item.quantity.unwrap_or(1).min(MAX_CARDS_PER_ITEM);
                        for _ in 0..quantity {
                            let code = unique_code(txn).await?;
                            let card = gift_card::ActiveModel {
                                id: Set(Uuid::new_v4()),
                                code: Set(code),
                                initial_amount: Set(item.amount),
                                remaining_amount: Set(item.amount),
                                currency: Set(currency.clone()),
                                status: Set(GiftCardStatus::Active),
                                expiration_date: Set(item
                                    .expiration_days
                                    .map(|days| now + Duration::days(days))),
                                purchaser_email: Set(input.purchaser_email.clone()),
                                recipient_email: Set(item.recipient_email.clone()),
                                message: Set(item.message.clone()),
                                marketplace_order_id: Set(Some(input.order_id.clone())),
                                created_at: Set(now),
                                updated_at: Set(now),
                            }
                            .insert(txn)
                            .await?;
                            cards.push(card);
                        }
                    }
                    Ok(cards)
                })
            })
            .await?;

        info!(count = cards.len(), "gift cards issued");
        let email_sent = self.send_purchase_email(&order_id, &purchaser, &cards).await;

        Ok(GeneratedGiftCards {
            order_id,
            gift_cards: cards,
            email_sent,
        })
    }

    async fn send_purchase_email(
        &self,
        order_id: &str,
        purchaser: &str,
        cards: &[gift_card::Model],
    ) -> bool {
        let Some(sender) = self.email.as_ref() else {
            warn!("email provider not configured, skipping gift card email");
            return false;
        };
        let message = EmailMessage {
            to: vec![purchaser.to_string()],
            subject: email_subject(cards.len()),
            html: render_email_html(order_id, cards),
        };
        match sender.send(&message).await {
            Ok(()) => true,
            Err(err) => {
                warn!(error = %err, "gift card email failed");
                false
            }
        }
    }

    /// Balance lookup by code.
    #[instrument(skip(self))]
    pub async fn get_by_code(&self, code: &str) -> Result<gift_card::Model, ServiceError> {
        let code = normalize_code(code);
        GiftCard::find()
            .filter(gift_card::Column::Code.eq(code.as_str()))
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::not_found("gift card", code))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::email::MockEmailSender;
    use rand::{rngs::StdRng, SeedableRng};
    use rust_decimal_macros::dec;

    fn card(code: &str, amount: Decimal) -> gift_card::Model {
        let now = Utc::now();
        gift_card::Model {
            id: Uuid::new_v4(),
            code: code.into(),
            initial_amount: amount,
            remaining_amount: amount,
            currency: "COP".into(),
            status: GiftCardStatus::Active,
            expiration_date: None,
            purchaser_email: "compras@example.com".into(),
            recipient_email: Some("amiga@example.com".into()),
            message: Some("<b>Feliz cumpleaños</b>".into()),
            marketplace_order_id: Some("ORD-1".into()),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn codes_follow_the_grouped_format() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let code = generate_code(&mut rng);
            assert_eq!(code.len(), 17);
            let groups: Vec<&str> = code.split('-').collect();
            assert_eq!(groups[0], "GC");
            assert_eq!(groups.len(), 4);
            for group in &groups[1..] {
                assert_eq!(group.len(), 4);
                assert!(group.bytes().all(|b| CODE_ALPHABET.contains(&b)));
            }
        }
    }

    #[test]
    fn cop_amounts_use_dot_thousands() {
        assert_eq!(format_cop(dec!(100000)), "$100.000");
        assert_eq!(format_cop(dec!(1500)), "$1.500");
        assert_eq!(format_cop(dec!(999)), "$999");
        assert_eq!(format_cop(dec!(1234567.6)), "$1.234.568");
    }

    #[test]
    fn subject_reflects_card_count() {
        assert_eq!(email_subject(1), "🎁 Tu Gift Card de TELAR");
        assert_eq!(email_subject(3), "🎁 Tus 3 Gift Cards de TELAR");
    }

    #[test]
    fn email_lists_codes_and_escapes_messages() {
        let cards = vec![
            card("GC-AAAA-BBBB-CCCC", dec!(50000)),
            card("GC-DDDD-EEEE-FFFF", dec!(70000)),
        ];
        let html = render_email_html("ORD-1", &cards);
        assert!(html.contains("GC-AAAA-BBBB-CCCC"));
        assert!(html.contains("GC-DDDD-EEEE-FFFF"));
        assert!(html.contains("2 Gift Cards • Total: $120.000"));
        assert!(html.contains("&lt;b&gt;Feliz cumpleaños&lt;/b&gt;"));
        assert!(!html.contains("<b>Feliz"));
    }

    #[test]
    fn spanish_dates() {
        let date = DateTime::parse_from_rfc3339("2026-10-19T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(format_date_es(date), "19 de octubre de 2026");
    }

    #[tokio::test]
    async fn email_failure_is_reported_not_raised() {
        let mut sender = MockEmailSender::new();
        sender
            .expect_send()
            .times(1)
            .returning(|_| Err(ServiceError::ExternalServiceError("down".into())));

        let db = Arc::new(sea_orm::DatabaseConnection::Disconnected);
        let service = GiftCardService::new(db, Some(Arc::new(sender)), "COP");
        let sent = service
            .send_purchase_email("ORD-1", "a@b.co", &[card("GC-AAAA-BBBB-CCCC", dec!(1))])
            .await;
        assert!(!sent);
    }
}
