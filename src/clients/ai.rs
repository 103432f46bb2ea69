use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{instrument, warn};
use utoipa::ToSchema;

use super::{build_http_client, upstream_error};
use crate::catalog::{crafts, MARKETPLACE_CATEGORIES};
use crate::config::AiGatewayConfig;
use crate::errors::ServiceError;
use crate::tracing::with_metrics;

const SYSTEM_PROMPT: &str = "Eres un experto en artesanías colombianas. Responde SOLO con JSON válido. Presta especial atención al contexto de la tienda.";

/// What the classifier knows about the product and its shop.
#[derive(Debug, Clone, Default)]
pub struct ProductContext {
    pub name: String,
    pub description: String,
    pub shop_name: Option<String>,
    pub shop_craft: Option<String>,
    pub shop_description: Option<String>,
}

/// Artisan tags suggested by the classifier. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ArtisanClassification {
    #[serde(default)]
    pub materia_prima: Vec<String>,
    #[serde(default)]
    pub oficio: Option<String>,
    #[serde(default)]
    pub tecnicas: Vec<String>,
    #[serde(default)]
    pub categoria_marketplace: Option<String>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AiClassifier: Send + Sync {
    async fn classify(&self, product: &ProductContext)
        -> Result<ArtisanClassification, ServiceError>;
}

/// Classifier backed by an OpenAI-compatible chat completions endpoint.
#[derive(Clone)]
pub struct HttpAiClassifier {
    client: reqwest::Client,
    config: AiGatewayConfig,
}

impl HttpAiClassifier {
    pub fn new(config: AiGatewayConfig) -> Result<Self, ServiceError> {
        Ok(Self {
            client: build_http_client(config.timeout_secs)?,
            config,
        })
    }
}

#[derive(Deserialize)]
struct ChatCompletion {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: Option<ChatMessage>,
}

#[derive(Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

#[async_trait]
impl AiClassifier for HttpAiClassifier {
    #[instrument(skip(self, product), fields(product = %product.name))]
    async fn classify(
        &self,
        product: &ProductContext,
    ) -> Result<ArtisanClassification, ServiceError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| upstream_error("ai gateway", "no API key configured"))?;

        let body = json!({
            "model": self.config.model,
            "messages": [
                { "role": "system", "content": SYSTEM_PROMPT },
                { "role": "user", "content": build_prompt(product) },
            ],
        });

        let completion: ChatCompletion = with_metrics("ai.classify", || async {
            let response = self
                .client
                .post(&self.config.url)
                .bearer_auth(api_key)
                .json(&body)
                .send()
                .await
                .map_err(|e| upstream_error("ai gateway", e))?;

            let status = response.status();
            if !status.is_success() {
                let text = response.text().await.unwrap_or_default();
                return Err(upstream_error(
                    "ai gateway",
                    format!("status {}: {}", status, text),
                ));
            }

            response
                .json::<ChatCompletion>()
                .await
                .map_err(|e| upstream_error("ai gateway", e))
        })
        .await?;

        let content = completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content)
            .unwrap_or_default();

        Ok(parse_classification(&content))
    }
}

/// Parses the model reply, tolerating ```json fences. Unparseable replies yield an empty
/// classification.
pub fn parse_classification(content: &str) -> ArtisanClassification {
    let cleaned = content
        .trim()
        .trim_start_matches("```json")
        .trim_start_matches("```")
        .trim_end_matches("```")
        .trim();

    if cleaned.is_empty() {
        return ArtisanClassification::default();
    }

    serde_json::from_str(cleaned).unwrap_or_else(|e| {
        warn!(error = %e, "classifier reply was not valid JSON");
        ArtisanClassification::default()
    })
}

fn build_prompt(product: &ProductContext) -> String {
    let craft = product.shop_craft.as_deref().unwrap_or("No especificado");
    format!(
        "Analiza este producto artesanal colombiano y asigna tags relevantes.\n\n\
         CONTEXTO DE LA TIENDA:\n\
         - Nombre: {shop_name}\n\
         - Oficio de la tienda: {craft}\n\
         - Descripción de la tienda: {shop_description}\n\n\
         PRODUCTO A CATEGORIZAR:\n\
         - Nombre: {name}\n\
         - Descripción: {description}\n\n\
         OFICIOS ARTESANALES DISPONIBLES (usar EXACTAMENTE estos valores):\n{crafts}\n\n\
         CATEGORÍAS DE MARKETPLACE DISPONIBLES:\n{categories}\n\n\
         MATERIAS PRIMAS disponibles: {materials}\n\
         TÉCNICAS disponibles: {techniques}\n\n\
         REGLAS:\n\
         1. El \"oficio\" debe ser coherente con el oficio de la tienda ({craft})\n\
         2. La \"categoria_marketplace\" debe basarse en el TIPO DE PRODUCTO, no en el oficio\n\
         3. Para productos de cuidado personal (cremas, jabones, aceites, etc.), usa \"Cuidado Personal\"\n\
         4. Para accesorios tejidos (manillas, pulseras), usa \"Joyería y Accesorios\"\n\
         5. Para bolsos y mochilas tejidas, usa \"Bolsos y Carteras\"\n\n\
         Responde SOLO con un JSON válido:\n\
         {{\"materia_prima\": [\"...\"], \"oficio\": \"...\", \"tecnicas\": [\"...\"], \"categoria_marketplace\": \"...\"}}",
        shop_name = product.shop_name.as_deref().unwrap_or("No disponible"),
        craft = craft,
        shop_description = product.shop_description.as_deref().unwrap_or("No disponible"),
        name = product.name,
        description = product.description,
        crafts = crafts::CRAFTS.join(", "),
        categories = MARKETPLACE_CATEGORIES.join(", "),
        materials = crafts::RAW_MATERIALS.join(", "),
        techniques = crafts::TECHNIQUES.join(", "),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn parses_fenced_reply() {
        let reply = "```json\n{\"oficio\": \"Cerámica\", \"materia_prima\": [\"Arcilla\"], \"categoria_marketplace\": \"Vajillas y Cocina\"}\n```";
        let parsed = parse_classification(reply);
        assert_eq!(parsed.oficio.as_deref(), Some("Cerámica"));
        assert_eq!(parsed.materia_prima, vec!["Arcilla"]);
        assert!(parsed.tecnicas.is_empty());
    }

    #[test]
    fn garbage_reply_is_empty_classification() {
        assert_eq!(
            parse_classification("lo siento, no puedo"),
            ArtisanClassification::default()
        );
    }

    #[test]
    fn prompt_mentions_shop_context() {
        let prompt = build_prompt(&ProductContext {
            name: "Olla de barro".into(),
            description: "Para cocinar".into(),
            shop_craft: Some("Alfarería".into()),
            ..Default::default()
        });
        assert!(prompt.contains("Oficio de la tienda: Alfarería"));
        assert!(prompt.contains("Nombre: No disponible"));
        assert!(prompt.contains("Vajillas y Cocina"));
    }

    #[tokio::test]
    async fn classify_reads_first_choice() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(header("authorization", "Bearer test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{ "message": { "content": "{\"oficio\": \"Tejeduría\"}" } }]
            })))
            .mount(&server)
            .await;

        let classifier = HttpAiClassifier::new(AiGatewayConfig {
            url: server.uri(),
            api_key: Some("test-key".into()),
            ..Default::default()
        })
        .unwrap();

        let result = classifier
            .classify(&ProductContext {
                name: "Ruana".into(),
                description: "lana virgen".into(),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(result.oficio.as_deref(), Some("Tejeduría"));
    }

    #[tokio::test]
    async fn classify_without_key_is_an_upstream_error() {
        let classifier = HttpAiClassifier::new(AiGatewayConfig::default()).unwrap();
        let err = classifier
            .classify(&ProductContext::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::ExternalServiceError(_)));
    }
}
