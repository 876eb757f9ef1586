//! Package history handler.

use axum::{Json, extract::State};
use serde::Serialize;
use tracing::instrument;

use crate::error::AppError;
use crate::marketplace::PackageRecord;
use crate::middleware::RequireSeller;
use crate::state::AppState;

/// Package history response, newest first.
#[derive(Debug, Serialize)]
pub struct PackageHistoryResponse {
    pub packages: Vec<PackageRecord>,
}

/// The seller's package purchase history.
#[instrument(skip(state, seller), fields(seller_id = %seller.id))]
pub async fn history(
    State(state): State<AppState>,
    RequireSeller(seller): RequireSeller,
) -> Result<Json<PackageHistoryResponse>, AppError> {
    let packages = state.marketplace().package_history(seller.id).await?;
    Ok(Json(PackageHistoryResponse { packages }))
}
