//! Lead-capture submission.
//!
//! The quick-message dialog and the contacts form both post the same
//! record; only the `source` tag differs. Validation runs before any
//! network call so an incomplete form never reaches the wire.

use serde::{Deserialize, Serialize};

use crate::client::StorefrontClient;
use crate::error::{ApiError, ApiResult};

/// Where on the site the lead was captured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeadSource {
    /// The contacts section form.
    ContactSection,
    /// The quick-message dialog.
    QuickMessage,
}

impl LeadSource {
    /// The tag sent to the backend.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ContactSection => "site-contact-section",
            Self::QuickMessage => "site-quick-message",
        }
    }
}

/// A lead-capture submission.
#[derive(Debug, Clone, Serialize)]
pub struct LeadRequest {
    /// Customer name (optional).
    pub name: String,
    /// Customer e-mail (optional).
    pub email: String,
    /// Customer phone. Required.
    pub phone: String,
    /// Free-form message (optional).
    pub message: String,
    /// Capture source tag.
    pub source: String,
}

impl LeadRequest {
    /// Build a request from trimmed form fields.
    #[must_use]
    pub fn new(name: &str, email: &str, phone: &str, message: &str, source: LeadSource) -> Self {
        Self {
            name: name.trim().to_string(),
            email: email.trim().to_string(),
            phone: phone.trim().to_string(),
            message: message.trim().to_string(),
            source: source.as_str().to_string(),
        }
    }

    /// Client-side validation, run before any network call.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] if the phone is blank.
    pub fn validate(&self) -> ApiResult<()> {
        if self.phone.is_empty() {
            return Err(ApiError::Validation("phone is required".to_string()));
        }
        Ok(())
    }
}

/// Acknowledgement payload from the messages endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct LeadReceipt {
    /// Whether the backend accepted and forwarded the message.
    pub success: bool,
}

impl StorefrontClient {
    /// Submit a lead-capture message.
    ///
    /// Validates client-side first; an invalid request produces no
    /// network traffic. Single attempt, user-retriable.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] before the wire,
    /// [`ApiError::Http`] on transport failure, [`ApiError::Service`] on
    /// an error status or a `success: false` payload, and
    /// [`ApiError::Decode`] on a malformed acknowledgement.
    pub async fn submit_lead(&self, lead: &LeadRequest) -> ApiResult<LeadReceipt> {
        lead.validate()?;
        tracing::debug!(source = %lead.source, "submitting lead");
        let response = self
            .http
            .post(self.endpoints.messages.clone())
            .json(lead)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(Self::service_error(response).await);
        }
        let receipt: LeadReceipt = response
            .json()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))?;
        if !receipt.success {
            return Err(ApiError::Service {
                status: 200,
                message: "message was not accepted".to_string(),
            });
        }
        Ok(receipt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_phone_rejected() {
        let lead = LeadRequest::new("Ivan", "a@b.c", "   ", "hello", LeadSource::QuickMessage);
        assert!(matches!(lead.validate(), Err(ApiError::Validation(_))));
    }

    #[test]
    fn test_fields_are_trimmed_and_source_tagged() {
        let lead = LeadRequest::new(
            "  Ivan  ",
            "",
            " +7 999 123-45-67 ",
            "",
            LeadSource::ContactSection,
        );
        assert_eq!(lead.name, "Ivan");
        assert_eq!(lead.phone, "+7 999 123-45-67");
        assert_eq!(lead.source, "site-contact-section");
        assert!(lead.validate().is_ok());
    }
}
