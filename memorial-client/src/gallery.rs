//! Gallery feed fetch.

use memorial_core::GalleryItem;

use crate::client::StorefrontClient;
use crate::error::{ApiError, ApiResult};

impl StorefrontClient {
    /// Fetch the published gallery items.
    ///
    /// Single attempt. Items with a blank URL are rejected at the boundary
    /// rather than propagated into views.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] on transport failure,
    /// [`ApiError::Service`] on an error status, or [`ApiError::Decode`]
    /// on a malformed payload.
    pub async fn fetch_gallery(&self) -> ApiResult<Vec<GalleryItem>> {
        tracing::debug!(url = %self.endpoints.gallery, "fetching gallery");
        let response = self.http.get(self.endpoints.gallery.clone()).send().await?;
        if !response.status().is_success() {
            return Err(Self::service_error(response).await);
        }
        let items: Vec<GalleryItem> = response
            .json()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))?;
        for item in &items {
            if item.url.trim().is_empty() {
                return Err(ApiError::Decode(format!("gallery item {}: empty url", item.id)));
            }
        }
        Ok(items)
    }
}
