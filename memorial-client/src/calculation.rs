//! Design price calculation request.

use memorial_core::DesignDocument;
use serde::Deserialize;

use crate::client::StorefrontClient;
use crate::error::{ApiError, ApiResult};

/// A price estimate returned by the calculation service.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PriceEstimate {
    /// Estimated total.
    pub total: f64,
    /// ISO currency code.
    pub currency: String,
    /// Optional note from the estimator.
    #[serde(default)]
    pub comment: Option<String>,
}

impl StorefrontClient {
    /// Send the serialized design to the pricing service.
    ///
    /// Read-only with respect to local state: the document is a snapshot
    /// and the live design is unaffected whether the request succeeds or
    /// fails. Single attempt, no backoff; the user re-triggers on failure.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] on transport failure,
    /// [`ApiError::Service`] on an error payload, or [`ApiError::Decode`]
    /// on a malformed estimate.
    pub async fn request_estimate(&self, document: &DesignDocument) -> ApiResult<PriceEstimate> {
        tracing::debug!(
            url = %self.endpoints.calculation,
            elements = document.elements.len(),
            "requesting price estimate"
        );
        let response = self
            .http
            .post(self.endpoints.calculation.clone())
            .json(document)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(Self::service_error(response).await);
        }
        response
            .json()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }
}
