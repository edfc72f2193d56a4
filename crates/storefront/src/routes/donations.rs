//! Donation submission route handlers.

use axum::{Json, extract::State, http::StatusCode};
use tracing::instrument;

use crate::api::types::{Donation, DonationRequest};
use crate::error::{AppError, Result};
use crate::state::AppState;

/// Submit a donation for pickup.
#[instrument(skip(state, request))]
pub async fn create(
    State(state): State<AppState>,
    Json(request): Json<DonationRequest>,
) -> Result<(StatusCode, Json<Donation>)> {
    if request.item_description.trim().is_empty() {
        return Err(AppError::BadRequest(
            "item description cannot be empty".to_string(),
        ));
    }

    let donation = state.catalog().create_donation(&request).await?;
    Ok((StatusCode::CREATED, Json(donation)))
}
