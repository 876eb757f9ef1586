//! Stock management handlers.
//!
//! Every mutation answers with the re-fetched listing, matching the
//! re-fetch-after-write pattern used across the panel.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use sellerdesk_core::{ProductId, StockItemId};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::AppError;
use crate::marketplace::{NewStockItem, StockItem};
use crate::middleware::RequireApprovedSeller;
use crate::state::AppState;

/// Listing scope: the seller's own rows (default) or everything.
#[derive(Debug, Default, Deserialize)]
pub struct StockScope {
    pub scope: Option<String>,
}

/// Stock listing response.
#[derive(Debug, Serialize)]
pub struct StockListResponse {
    pub items: Vec<StockItem>,
}

/// Body for creating a stock row.
#[derive(Debug, Deserialize)]
pub struct CreateStockInput {
    pub product_id: ProductId,
    pub quantity: i64,
}

/// Body for updating a stock row.
#[derive(Debug, Deserialize)]
pub struct UpdateStockInput {
    pub quantity: i64,
}

fn scope_seller(
    scope: &StockScope,
    seller_id: sellerdesk_core::SellerId,
) -> Option<sellerdesk_core::SellerId> {
    match scope.scope.as_deref() {
        Some("all") => None,
        _ => Some(seller_id),
    }
}

/// List stock rows.
#[instrument(skip(state, seller), fields(seller_id = %seller.id))]
pub async fn list(
    State(state): State<AppState>,
    RequireApprovedSeller(seller): RequireApprovedSeller,
    Query(scope): Query<StockScope>,
) -> Result<Json<StockListResponse>, AppError> {
    let items = state
        .marketplace()
        .stock(scope_seller(&scope, seller.id))
        .await?;
    Ok(Json(StockListResponse { items }))
}

/// Create a stock row for the seller.
#[instrument(skip(state, seller, input), fields(seller_id = %seller.id))]
pub async fn create(
    State(state): State<AppState>,
    RequireApprovedSeller(seller): RequireApprovedSeller,
    Json(input): Json<CreateStockInput>,
) -> Result<Json<StockListResponse>, AppError> {
    state
        .marketplace()
        .create_stock(&NewStockItem {
            seller_id: seller.id,
            product_id: input.product_id,
            quantity: input.quantity,
        })
        .await?;

    let items = state.marketplace().stock(Some(seller.id)).await?;
    Ok(Json(StockListResponse { items }))
}

/// Update a stock row's quantity.
#[instrument(skip(state, seller, input), fields(seller_id = %seller.id))]
pub async fn update(
    State(state): State<AppState>,
    RequireApprovedSeller(seller): RequireApprovedSeller,
    Path(id): Path<StockItemId>,
    Json(input): Json<UpdateStockInput>,
) -> Result<Json<StockListResponse>, AppError> {
    state.marketplace().update_stock(id, input.quantity).await?;

    let items = state.marketplace().stock(Some(seller.id)).await?;
    Ok(Json(StockListResponse { items }))
}

/// Delete a stock row.
#[instrument(skip(state, seller), fields(seller_id = %seller.id))]
pub async fn remove(
    State(state): State<AppState>,
    RequireApprovedSeller(seller): RequireApprovedSeller,
    Path(id): Path<StockItemId>,
) -> Result<Json<StockListResponse>, AppError> {
    state.marketplace().delete_stock(id).await?;

    let items = state.marketplace().stock(Some(seller.id)).await?;
    Ok(Json(StockListResponse { items }))
}
