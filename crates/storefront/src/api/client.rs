//! REST client for the catalog/order API.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::{debug, instrument};

use recyclebay_core::{DonationStatus, OrderStatus, ProductId};

use crate::config::CatalogConfig;

use super::cache::CacheValue;
use super::types::{
    AdminUser, AuthSession, CheckoutRequest, Credentials, Donation, DonationRequest, Order,
    Product, ProductInput, ProductPage, ProductQuery, StoreStats,
};
use super::ApiError;

/// How long catalog reads stay cached.
const CACHE_TTL: Duration = Duration::from_secs(300);

/// How much of an error body to keep for diagnostics.
const BODY_SNIPPET: usize = 200;

/// Client for the catalog/order API.
///
/// Catalog reads are cached for 5 minutes; order, donation, and admin
/// mutations always go to the backend.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    http: reqwest::Client,
    base_url: String,
    cache: Cache<String, CacheValue>,
}

impl CatalogClient {
    /// Create a new catalog API client.
    ///
    /// # Panics
    ///
    /// Panics if the TLS backend cannot be initialized; this is a startup
    /// failure, not a runtime one.
    #[must_use]
    pub fn new(config: &CatalogConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(CACHE_TTL)
            .build();

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("failed to build HTTP client");

        Self {
            inner: Arc::new(CatalogClientInner {
                http,
                base_url: config.base_url.trim_end_matches('/').to_string(),
                cache,
            }),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.inner.base_url)
    }

    /// Send a request and decode the JSON response.
    async fn execute<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ApiError> {
        let text = self.execute_raw(request).await?;
        serde_json::from_str(&text).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %snippet(&text),
                "failed to parse catalog API response"
            );
            ApiError::Parse(e)
        })
    }

    /// Send a request and map the status code, returning the body text.
    async fn execute_raw(&self, request: reqwest::RequestBuilder) -> Result<String, ApiError> {
        let response = request.send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(1);
            return Err(ApiError::RateLimited(retry_after));
        }

        let text = response.text().await?;

        match status {
            s if s.is_success() => Ok(text),
            reqwest::StatusCode::NOT_FOUND => Err(ApiError::NotFound(snippet(&text))),
            reqwest::StatusCode::UNAUTHORIZED | reqwest::StatusCode::FORBIDDEN => {
                Err(ApiError::Unauthorized(snippet(&text)))
            }
            s => {
                tracing::error!(
                    status = %s,
                    body = %snippet(&text),
                    "catalog API returned non-success status"
                );
                Err(ApiError::Status {
                    code: s.as_u16(),
                    message: snippet(&text),
                })
            }
        }
    }

    // =========================================================================
    // Catalog Methods
    // =========================================================================

    /// Get a product by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the product is not found or the request fails.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn get_product(&self, id: &ProductId) -> Result<Product, ApiError> {
        let cache_key = format!("product:{id}");

        if let Some(CacheValue::Product(product)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for product");
            return Ok(*product);
        }

        let product: Product = self
            .execute(self.inner.http.get(self.url(&format!("/products/{id}"))))
            .await?;

        self.inner
            .cache
            .insert(cache_key, CacheValue::Product(Box::new(product.clone())))
            .await;

        Ok(product)
    }

    /// Get a page of catalog products.
    ///
    /// Only the unfiltered default listing is cached.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn get_products(&self, query: &ProductQuery) -> Result<ProductPage, ApiError> {
        let cache_key = "products:default".to_string();

        if query.is_unfiltered()
            && let Some(CacheValue::Page(page)) = self.inner.cache.get(&cache_key).await
        {
            debug!("Cache hit for product listing");
            return Ok(*page);
        }

        let page: ProductPage = self
            .execute(
                self.inner
                    .http
                    .get(self.url("/products"))
                    .query(&query.to_pairs()),
            )
            .await?;

        if query.is_unfiltered() {
            self.inner
                .cache
                .insert(cache_key, CacheValue::Page(Box::new(page.clone())))
                .await;
        }

        Ok(page)
    }

    // =========================================================================
    // Order & Donation Methods (not cached - mutations)
    // =========================================================================

    /// Submit a checkout payload, creating an order.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the order or the request
    /// fails.
    #[instrument(skip(self, request))]
    pub async fn checkout(&self, request: &CheckoutRequest) -> Result<Order, ApiError> {
        self.execute(
            self.inner
                .http
                .post(self.url("/orders/checkout"))
                .json(request),
        )
        .await
    }

    /// Submit a donation.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the donation or the
    /// request fails.
    #[instrument(skip(self, request))]
    pub async fn create_donation(&self, request: &DonationRequest) -> Result<Donation, ApiError> {
        self.execute(self.inner.http.post(self.url("/donations")).json(request))
            .await
    }

    // =========================================================================
    // Auth & Admin Methods
    // =========================================================================

    /// Log in as an admin, obtaining a bearer-token session.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Unauthorized`] on bad credentials.
    #[instrument(skip(self, credentials))]
    pub async fn login(&self, credentials: &Credentials) -> Result<AuthSession, ApiError> {
        #[derive(serde::Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct LoginResponse {
            token: String,
            user: AdminUser,
        }

        let body = json!({
            "email": credentials.email,
            "password": credentials.password.expose_secret(),
        });

        let response: LoginResponse = self
            .execute(self.inner.http.post(self.url("/auth/login")).json(&body))
            .await?;

        Ok(AuthSession::new(
            SecretString::from(response.token),
            response.user,
        ))
    }

    /// Create a catalog product (admin).
    ///
    /// # Errors
    ///
    /// Returns an error if the session is rejected or the request fails.
    #[instrument(skip(self, session, input))]
    pub async fn create_product(
        &self,
        session: &AuthSession,
        input: &ProductInput,
    ) -> Result<Product, ApiError> {
        let product: Product = self
            .execute(self.bearer(session, self.inner.http.post(self.url("/products")).json(input)))
            .await?;
        self.invalidate_catalog().await;
        Ok(product)
    }

    /// Update a catalog product (admin).
    ///
    /// # Errors
    ///
    /// Returns an error if the product is missing, the session is
    /// rejected, or the request fails.
    #[instrument(skip(self, session, input), fields(product_id = %id))]
    pub async fn update_product(
        &self,
        session: &AuthSession,
        id: &ProductId,
        input: &ProductInput,
    ) -> Result<Product, ApiError> {
        let product: Product = self
            .execute(self.bearer(
                session,
                self.inner
                    .http
                    .put(self.url(&format!("/products/{id}")))
                    .json(input),
            ))
            .await?;
        self.invalidate_product(id).await;
        Ok(product)
    }

    /// Delete a catalog product (admin).
    ///
    /// # Errors
    ///
    /// Returns an error if the session is rejected or the request fails.
    #[instrument(skip(self, session), fields(product_id = %id))]
    pub async fn delete_product(
        &self,
        session: &AuthSession,
        id: &ProductId,
    ) -> Result<(), ApiError> {
        self.execute_raw(self.bearer(
            session,
            self.inner.http.delete(self.url(&format!("/products/{id}"))),
        ))
        .await?;
        self.invalidate_product(id).await;
        Ok(())
    }

    /// List all orders (admin).
    ///
    /// # Errors
    ///
    /// Returns an error if the session is rejected or the request fails.
    #[instrument(skip(self, session))]
    pub async fn list_orders(&self, session: &AuthSession) -> Result<Vec<Order>, ApiError> {
        self.execute(self.bearer(session, self.inner.http.get(self.url("/orders"))))
            .await
    }

    /// Update an order's status (admin).
    ///
    /// # Errors
    ///
    /// Returns an error if the order is missing, the session is rejected,
    /// or the request fails.
    #[instrument(skip(self, session), fields(order_id = %id))]
    pub async fn update_order_status(
        &self,
        session: &AuthSession,
        id: &recyclebay_core::OrderId,
        status: OrderStatus,
    ) -> Result<Order, ApiError> {
        self.execute(self.bearer(
            session,
            self.inner
                .http
                .put(self.url(&format!("/orders/{id}/status")))
                .json(&json!({ "status": status })),
        ))
        .await
    }

    /// List all donations (admin).
    ///
    /// # Errors
    ///
    /// Returns an error if the session is rejected or the request fails.
    #[instrument(skip(self, session))]
    pub async fn list_donations(&self, session: &AuthSession) -> Result<Vec<Donation>, ApiError> {
        self.execute(self.bearer(session, self.inner.http.get(self.url("/donations"))))
            .await
    }

    /// Update a donation's status (admin).
    ///
    /// # Errors
    ///
    /// Returns an error if the donation is missing, the session is
    /// rejected, or the request fails.
    #[instrument(skip(self, session), fields(donation_id = %id))]
    pub async fn update_donation_status(
        &self,
        session: &AuthSession,
        id: &recyclebay_core::DonationId,
        status: DonationStatus,
    ) -> Result<Donation, ApiError> {
        self.execute(self.bearer(
            session,
            self.inner
                .http
                .put(self.url(&format!("/donations/{id}/status")))
                .json(&json!({ "status": status })),
        ))
        .await
    }

    /// List admin users (admin).
    ///
    /// # Errors
    ///
    /// Returns an error if the session is rejected or the request fails.
    #[instrument(skip(self, session))]
    pub async fn list_users(&self, session: &AuthSession) -> Result<Vec<AdminUser>, ApiError> {
        self.execute(self.bearer(session, self.inner.http.get(self.url("/admin/users"))))
            .await
    }

    /// Fetch dashboard statistics (admin).
    ///
    /// # Errors
    ///
    /// Returns an error if the session is rejected or the request fails.
    #[instrument(skip(self, session))]
    pub async fn stats(&self, session: &AuthSession) -> Result<StoreStats, ApiError> {
        self.execute(self.bearer(session, self.inner.http.get(self.url("/stats"))))
            .await
    }

    fn bearer(
        &self,
        session: &AuthSession,
        request: reqwest::RequestBuilder,
    ) -> reqwest::RequestBuilder {
        request.bearer_auth(session.token().expose_secret())
    }

    // =========================================================================
    // Cache Management
    // =========================================================================

    /// Invalidate a cached product and the default listing.
    pub async fn invalidate_product(&self, id: &ProductId) {
        self.inner.cache.invalidate(&format!("product:{id}")).await;
        self.invalidate_catalog().await;
    }

    /// Invalidate the cached default listing.
    pub async fn invalidate_catalog(&self) {
        self.inner.cache.invalidate("products:default").await;
    }
}

/// Truncate a response body for logs and error messages.
fn snippet(text: &str) -> String {
    text.chars().take(BODY_SNIPPET).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snippet_truncates() {
        let long = "x".repeat(500);
        assert_eq!(snippet(&long).len(), BODY_SNIPPET);
        assert_eq!(snippet("short"), "short");
    }

    #[test]
    fn test_base_url_trailing_slash_normalized() {
        let config = CatalogConfig {
            base_url: "http://localhost:4000/".to_string(),
            timeout_secs: 10,
        };
        let client = CatalogClient::new(&config);
        assert_eq!(client.url("/products"), "http://localhost:4000/products");
    }
}
