//! Remote Catalog/Order API client.
//!
//! # Architecture
//!
//! - Plain REST over JSON via `reqwest`; the remote backend is the source
//!   of truth, no local sync
//! - In-memory caching via `moka` for catalog reads (5 minute TTL);
//!   order/donation mutations are never cached
//! - Admin operations attach `Authorization: Bearer <token>` obtained
//!   from `POST /auth/login`
//!
//! # Example
//!
//! ```rust,ignore
//! use recyclebay_storefront::api::CatalogClient;
//!
//! let client = CatalogClient::new(&config.catalog);
//!
//! // Browse the catalog
//! let page = client.get_products(&ProductQuery::default()).await?;
//! let product = client.get_product(&ProductId::new("sofa-42")).await?;
//!
//! // Submit an order
//! let order = client.checkout(&request).await?;
//! ```

mod cache;
mod client;
pub mod types;

pub use client::CatalogClient;
pub use types::*;

use thiserror::Error;

/// Errors that can occur when talking to the catalog/order API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bearer token missing, expired, or insufficient.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Rate limited by the backend.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// Any other non-success response.
    #[error("API returned {code}: {message}")]
    Status {
        /// HTTP status code.
        code: u16,
        /// Truncated response body.
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display() {
        let err = ApiError::NotFound("product sofa-42".to_string());
        assert_eq!(err.to_string(), "Not found: product sofa-42");

        let err = ApiError::RateLimited(30);
        assert_eq!(err.to_string(), "Rate limited, retry after 30 seconds");

        let err = ApiError::Status {
            code: 502,
            message: "bad gateway".to_string(),
        };
        assert_eq!(err.to_string(), "API returned 502: bad gateway");
    }
}
