//! Authentication handlers.

use axum::{Json, extract::State};
use sellerdesk_core::Email;
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use crate::error::AppError;
use crate::marketplace::SellerSession;
use crate::middleware::auth::{RequireSeller, session_keys, set_current_seller};
use crate::state::AppState;

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// The current seller as returned by auth endpoints.
#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub seller: SellerSession,
    pub approved: bool,
}

impl From<SellerSession> for MeResponse {
    fn from(seller: SellerSession) -> Self {
        let approved = seller.is_approved();
        Self { seller, approved }
    }
}

/// Log a seller in against the upstream API.
#[instrument(skip(state, session, input), fields(email = %input.email))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(input): Json<LoginInput>,
) -> Result<Json<MeResponse>, AppError> {
    let email =
        Email::parse(&input.email).map_err(|e| AppError::BadRequest(e.to_string()))?;

    let seller = state
        .marketplace()
        .login(&email, &input.password)
        .await
        .map_err(|e| match e {
            crate::marketplace::MarketplaceError::Unauthorized(message) => {
                AppError::Unauthorized(message)
            }
            other => AppError::from(other),
        })?;

    // Single writer: the hub owns the live record; the cookie only points
    // at it.
    state.sessions().login(seller.clone()).await;
    set_current_seller(&session, seller.id)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    tracing::info!(seller_id = %seller.id, "Seller logged in");
    Ok(Json(seller.into()))
}

/// Destroy the current session.
pub async fn logout(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<serde_json::Value>, AppError> {
    if let Ok(Some(seller_id)) = session.get(session_keys::SELLER_ID).await {
        state.sessions().logout(seller_id).await;
    }
    session
        .flush()
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;
    Ok(Json(serde_json::json!({ "ok": true })))
}

/// Current seller and approval state.
pub async fn me(RequireSeller(seller): RequireSeller) -> Json<MeResponse> {
    Json(seller.into())
}

/// Force an immediate approval-status refresh.
///
/// The panel frontend calls this when its window regains focus or becomes
/// visible again, on top of the background poll cadence.
pub async fn refresh(
    State(state): State<AppState>,
    RequireSeller(seller): RequireSeller,
) -> Json<MeResponse> {
    state.sessions().trigger_refresh(seller.id).await;
    Json(seller.into())
}
