use async_trait::async_trait;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::instrument;

use super::{build_http_client, upstream_error};
use crate::config::CarrierConfig;
use crate::errors::ServiceError;
use crate::tracing::with_metrics;

/// Estimated delivery days when the carrier does not say.
pub const DEFAULT_DELIVERY_DAYS: u32 = 5;

/// One physical package. Weight in kg, dimensions in cm.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CarrierPiece {
    #[serde(rename = "Peso")]
    pub weight: f64,
    #[serde(rename = "Largo")]
    pub length: f64,
    #[serde(rename = "Ancho")]
    pub width: f64,
    #[serde(rename = "Alto")]
    pub height: f64,
}

/// Body of a quote call, in the carrier's wire names.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CarrierQuoteRequest {
    pub id_producto: u8,
    pub numero_piezas: u32,
    pub piezas: Vec<CarrierPiece>,
    pub valor_declarado: i64,
    pub id_dane_ciudad_origen: String,
    pub id_dane_ciudad_destino: String,
    pub envio_con_cobro: bool,
    pub forma_pago: u8,
    pub tiempo_entrega: u8,
    pub medio_transporte: u8,
    pub num_recaudo: u32,
}

impl CarrierQuoteRequest {
    /// Standard parcel quote between two DANE city codes.
    pub fn parcel(
        origin_city: &str,
        destination_city: &str,
        pieces: Vec<CarrierPiece>,
        declared_value: i64,
    ) -> Self {
        Self {
            id_producto: 2,
            numero_piezas: pieces.len() as u32,
            piezas: pieces,
            valor_declarado: declared_value,
            id_dane_ciudad_origen: format!("{}000", origin_city),
            id_dane_ciudad_destino: format!("{}000", destination_city),
            envio_con_cobro: false,
            forma_pago: 2,
            tiempo_entrega: 1,
            medio_transporte: 1,
            num_recaudo: 123456,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarrierQuote {
    pub cost: Decimal,
    pub estimated_days: u32,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CarrierClient: Send + Sync {
    /// Obtains a bearer token for subsequent quote calls.
    async fn authenticate(&self) -> Result<String, ServiceError>;

    async fn quote(
        &self,
        token: &str,
        request: &CarrierQuoteRequest,
    ) -> Result<CarrierQuote, ServiceError>;
}

/// Servientrega corporate quote API.
#[derive(Clone)]
pub struct ServientregaClient {
    client: reqwest::Client,
    config: CarrierConfig,
}

impl ServientregaClient {
    pub fn new(config: CarrierConfig) -> Result<Self, ServiceError> {
        Ok(Self {
            client: build_http_client(config.timeout_secs)?,
            config,
        })
    }
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    login: &'a str,
    password: &'a str,
    #[serde(rename = "codFacturacion", skip_serializing_if = "Option::is_none")]
    billing_code: Option<&'a str>,
}

#[derive(Deserialize)]
struct LoginResponse {
    token: Option<String>,
}

#[async_trait]
impl CarrierClient for ServientregaClient {
    #[instrument(skip(self))]
    async fn authenticate(&self) -> Result<String, ServiceError> {
        let (Some(login), Some(password)) = (
            self.config.login.as_deref(),
            self.config.password.as_deref(),
        ) else {
            return Err(upstream_error("carrier", "credentials not configured"));
        };

        let body = LoginRequest {
            login,
            password,
            billing_code: self.config.billing_code.as_deref(),
        };

        with_metrics("carrier.login", || async {
            let response = self
                .client
                .post(&self.config.auth_url)
                .json(&body)
                .send()
                .await
                .map_err(|e| upstream_error("carrier", e))?;

            if !response.status().is_success() {
                return Err(upstream_error(
                    "carrier",
                    format!("login returned {}", response.status()),
                ));
            }

            response
                .json::<LoginResponse>()
                .await
                .map_err(|e| upstream_error("carrier", e))?
                .token
                .filter(|token| !token.is_empty())
                .ok_or_else(|| upstream_error("carrier", "login response carried no token"))
        })
        .await
    }

    #[instrument(skip(self, token, request), fields(origin = %request.id_dane_ciudad_origen))]
    async fn quote(
        &self,
        token: &str,
        request: &CarrierQuoteRequest,
    ) -> Result<CarrierQuote, ServiceError> {
        with_metrics("carrier.quote", || async {
            let response = self
                .client
                .post(&self.config.quote_url)
                .bearer_auth(token)
                .json(request)
                .send()
                .await
                .map_err(|e| upstream_error("carrier", e))?;

            let status = response.status();
            let text = response
                .text()
                .await
                .map_err(|e| upstream_error("carrier", e))?;
            if !status.is_success() {
                return Err(upstream_error("carrier", format!("quote returned {}", status)));
            }

            let body: Value = serde_json::from_str(&text)
                .map_err(|e| upstream_error("carrier", format!("invalid quote body: {}", e)))?;
            Ok(parse_quote_response(&body))
        })
        .await
    }
}

fn numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Reads cost from the first positive of `ValorFlete`, `valorTotal`, `valor`; days from
/// `TiempoEntrega`. Missing cost reads as zero.
pub fn parse_quote_response(body: &Value) -> CarrierQuote {
    let cost = ["ValorFlete", "valorTotal", "valor"]
        .iter()
        .find_map(|key| body.get(key).and_then(numeric).filter(|v| *v > 0.0))
        .and_then(Decimal::from_f64)
        .map(|cost| cost.round_dp(2))
        .unwrap_or(Decimal::ZERO);

    let estimated_days = body
        .get("TiempoEntrega")
        .and_then(numeric)
        .filter(|days| *days > 0.0)
        .map(|days| days.round() as u32)
        .unwrap_or(DEFAULT_DELIVERY_DAYS);

    CarrierQuote {
        cost,
        estimated_days,
    }
}
