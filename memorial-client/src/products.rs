//! Product catalog: typed fetch and client-side search.

use serde::{Deserialize, Serialize};

use crate::client::StorefrontClient;
use crate::error::{ApiError, ApiResult};

/// Minimum trimmed query length before search runs.
pub const MIN_QUERY_LEN: usize = 2;

/// Maximum number of results shown in the search dropdown.
pub const SEARCH_RESULT_CAP: usize = 8;

/// One catalog product as served by the products endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Numeric product ID.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// URL slug for the product page.
    pub slug: String,
    /// Price as a decimal string.
    pub price: String,
    /// Optional product image; absent images get a placeholder in views.
    #[serde(default)]
    pub image_url: Option<String>,
    /// Category display name.
    pub category_name: String,
    /// Whether the price is a "from" lower bound.
    #[serde(default)]
    pub is_price_from: bool,
}

impl Product {
    /// Validate boundary invariants the schema alone cannot express.
    fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err(format!("product {}: empty name", self.id));
        }
        if self.slug.trim().is_empty() {
            return Err(format!("product {}: empty slug", self.id));
        }
        Ok(())
    }

    /// Human-readable price with thousands grouping, e.g. `"from 38 500 ₽"`.
    #[must_use]
    pub fn display_price(&self) -> String {
        let Ok(value) = self.price.trim().parse::<f64>() else {
            return self.price.clone();
        };
        #[allow(clippy::cast_possible_truncation)]
        let formatted = format!("{} ₽", group_thousands(value.round() as i64));
        if self.is_price_from {
            format!("from {formatted}")
        } else {
            formatted
        }
    }
}

/// Group an integer's digits with thin spaces, locale-style.
fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    let offset = digits.len() % 3;
    for (i, c) in digits.chars().enumerate() {
        if i != 0 && (i + 3 - offset) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(c);
    }
    if value < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// Result of a client-side catalog search.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// The query is too short; prompt the user to type more.
    Prompt,
    /// No product name or category matched.
    NotFound,
    /// Matching products, capped at [`SEARCH_RESULT_CAP`].
    Matches(Vec<Product>),
}

/// Filter the fetched product list by name or category, case-insensitive.
///
/// A query shorter than [`MIN_QUERY_LEN`] trimmed characters always yields
/// [`SearchOutcome::Prompt`]; a query matching nothing yields an explicit
/// [`SearchOutcome::NotFound`].
#[must_use]
pub fn search(query: &str, products: &[Product]) -> SearchOutcome {
    let trimmed = query.trim();
    if trimmed.chars().count() < MIN_QUERY_LEN {
        return SearchOutcome::Prompt;
    }
    let needle = trimmed.to_lowercase();
    let matches: Vec<Product> = products
        .iter()
        .filter(|p| {
            p.name.to_lowercase().contains(&needle)
                || p.category_name.to_lowercase().contains(&needle)
        })
        .take(SEARCH_RESULT_CAP)
        .cloned()
        .collect();
    if matches.is_empty() {
        SearchOutcome::NotFound
    } else {
        SearchOutcome::Matches(matches)
    }
}

impl StorefrontClient {
    /// Fetch the full product list.
    ///
    /// Single attempt; the caller re-triggers on failure. Every record is
    /// validated at the boundary and a malformed list is rejected whole.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] on transport failure,
    /// [`ApiError::Service`] on an error status, or [`ApiError::Decode`]
    /// on a malformed payload.
    pub async fn fetch_products(&self) -> ApiResult<Vec<Product>> {
        tracing::debug!(url = %self.endpoints.products, "fetching products");
        let response = self
            .http
            .get(self.endpoints.products.clone())
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(Self::service_error(response).await);
        }
        let products: Vec<Product> = response
            .json()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))?;
        for product in &products {
            product.validate().map_err(ApiError::Decode)?;
        }
        Ok(products)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: i64, name: &str, category: &str) -> Product {
        Product {
            id,
            name: name.to_string(),
            slug: format!("product-{id}"),
            price: "38500".to_string(),
            image_url: None,
            category_name: category.to_string(),
            is_price_from: false,
        }
    }

    #[test]
    fn test_short_query_prompts() {
        let products = vec![product(1, "Vertical stele", "Monuments")];
        assert_eq!(search("", &products), SearchOutcome::Prompt);
        assert_eq!(search("v", &products), SearchOutcome::Prompt);
        assert_eq!(search("  v  ", &products), SearchOutcome::Prompt);
    }

    #[test]
    fn test_no_match_is_explicit_not_found() {
        let products = vec![product(1, "Vertical stele", "Monuments")];
        assert_eq!(search("granite bench", &products), SearchOutcome::NotFound);
    }

    #[test]
    fn test_matches_by_name_and_category_case_insensitive() {
        let products = vec![
            product(1, "Vertical stele", "Monuments"),
            product(2, "Granite vase", "Accessories"),
        ];
        let SearchOutcome::Matches(by_name) = search("VERTICAL", &products) else {
            panic!("expected matches");
        };
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].id, 1);

        let SearchOutcome::Matches(by_category) = search("accessor", &products) else {
            panic!("expected matches");
        };
        assert_eq!(by_category[0].id, 2);
    }

    #[test]
    fn test_results_capped() {
        let products: Vec<_> = (0..20)
            .map(|i| product(i, &format!("Stele {i}"), "Monuments"))
            .collect();
        let SearchOutcome::Matches(matches) = search("stele", &products) else {
            panic!("expected matches");
        };
        assert_eq!(matches.len(), SEARCH_RESULT_CAP);
    }

    #[test]
    fn test_display_price_formats() {
        let mut p = product(1, "Stele", "Monuments");
        assert_eq!(p.display_price(), "38 500 ₽");
        p.is_price_from = true;
        assert_eq!(p.display_price(), "from 38 500 ₽");
        p.price = "on request".to_string();
        assert_eq!(p.display_price(), "on request");
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1 000");
        assert_eq!(group_thousands(1_234_567), "1 234 567");
    }
}
