//! Product catalog route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use tracing::instrument;

use recyclebay_core::{ProductId, ProductStatus};

use crate::api::types::{Product, ProductPage, ProductQuery};
use crate::error::Result;
use crate::state::AppState;

/// Listing query parameters.
#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub page: Option<u32>,
    pub category: Option<String>,
    pub status: Option<ProductStatus>,
    pub q: Option<String>,
}

impl From<ListParams> for ProductQuery {
    fn from(params: ListParams) -> Self {
        Self {
            page: params.page,
            category: params.category,
            status: params.status,
            search: params.q,
        }
    }
}

/// Product listing, paged and filterable by category/status/search.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<ProductPage>> {
    let page = state
        .catalog()
        .get_products(&ProductQuery::from(params))
        .await?;
    Ok(Json(page))
}

/// Single product detail.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Product>> {
    let product = state.catalog().get_product(&ProductId::new(id)).await?;
    Ok(Json(product))
}
