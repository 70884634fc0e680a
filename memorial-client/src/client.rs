//! HTTP client and endpoint configuration.

use url::Url;

use crate::error::{ApiError, ApiResult};

/// The fixed backend function endpoints the storefront talks to.
///
/// Each is an independent external HTTP function; overriding them (e.g.
/// pointing at a mock server in tests) is supported via the builder
/// methods.
#[derive(Debug, Clone)]
pub struct Endpoints {
    /// Product catalog read endpoint.
    pub products: Url,
    /// Gallery feed read endpoint.
    pub gallery: Url,
    /// Lead-capture message endpoint.
    pub messages: Url,
    /// Design price calculation endpoint.
    pub calculation: Url,
}

impl Endpoints {
    /// Production endpoints baked into the storefront build.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidUrl`] if a base URL fails to parse
    /// (only possible with a corrupted build constant).
    pub fn production() -> ApiResult<Self> {
        Self::from_base("https://functions.granite-atelier.example")
    }

    /// Derive all endpoints from a single base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidUrl`] if `base` or a joined path is
    /// invalid.
    pub fn from_base(base: impl AsRef<str>) -> ApiResult<Self> {
        let base = Url::parse(base.as_ref())
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {e}", base.as_ref())))?;
        let join = |path: &str| -> ApiResult<Url> {
            base.join(path)
                .map_err(|e| ApiError::InvalidUrl(format!("{path}: {e}")))
        };
        Ok(Self {
            products: join("products")?,
            gallery: join("gallery")?,
            messages: join("send-quick-message")?,
            calculation: join("send-order")?,
        })
    }
}

/// Client for the storefront's external backend functions.
///
/// Cheap to clone; the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct StorefrontClient {
    pub(crate) http: reqwest::Client,
    pub(crate) endpoints: Endpoints,
}

impl StorefrontClient {
    /// Create a client over the given endpoints.
    #[must_use]
    pub fn new(endpoints: Endpoints) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoints,
        }
    }

    /// Create a client over the production endpoints.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidUrl`] if endpoint construction fails.
    pub fn production() -> ApiResult<Self> {
        Ok(Self::new(Endpoints::production()?))
    }

    /// The configured endpoints.
    #[must_use]
    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Decode an error payload of the form `{"error": "..."}`, falling
    /// back to the raw body.
    pub(crate) async fn service_error(response: reqwest::Response) -> ApiError {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(String::from))
            .unwrap_or(body);
        ApiError::Service { status, message }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints_from_base() {
        let endpoints = Endpoints::from_base("https://mock.example/").expect("endpoints");
        assert_eq!(endpoints.products.as_str(), "https://mock.example/products");
        assert_eq!(
            endpoints.calculation.as_str(),
            "https://mock.example/send-order"
        );
    }

    #[test]
    fn test_invalid_base_rejected() {
        assert!(matches!(
            Endpoints::from_base("not a url"),
            Err(ApiError::InvalidUrl(_))
        ));
    }
}
