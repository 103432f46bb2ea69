//! Outbound HTTP integrations.
//!
//! Each integration sits behind an `async_trait` so services can be exercised with mocks
//! and tests can point the real client at a local fake server.

pub mod ai;
pub mod carrier;
pub mod email;

pub use ai::{AiClassifier, ArtisanClassification, HttpAiClassifier, ProductContext};
pub use carrier::{
    CarrierClient, CarrierPiece, CarrierQuote, CarrierQuoteRequest, ServientregaClient,
};
pub use email::{EmailMessage, EmailSender, ResendEmailSender};

use crate::errors::ServiceError;
use std::time::Duration;

pub(crate) fn build_http_client(timeout_secs: u64) -> Result<reqwest::Client, ServiceError> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_secs.max(1)))
        .build()
        .map_err(|e| ServiceError::InternalError(format!("failed to build HTTP client: {}", e)))
}

pub(crate) fn upstream_error(service: &str, err: impl std::fmt::Display) -> ServiceError {
    ServiceError::ExternalServiceError(format!("{}: {}", service, err))
}
