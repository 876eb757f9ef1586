//! Authentication extractors.
//!
//! The tower-session stores only the seller id (and the last shipping
//! editor context); the live seller record is read back from the
//! [`SessionHub`](crate::services::SessionHub) on every request. A cookie
//! whose seller is no longer in the hub (e.g. after a restart) is flushed
//! and rejected, forcing a clean re-login.

use axum::{
    Json,
    extract::{FromRef, FromRequestParts},
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use sellerdesk_core::SellerId;
use serde_json::json;
use tower_sessions::Session;

use crate::marketplace::{SellerSession, ShippingContext};
use crate::state::AppState;

/// Session keys.
pub mod session_keys {
    /// The logged-in seller's id.
    pub const SELLER_ID: &str = "seller.id";
    /// The last-opened shipping editor context.
    pub const SHIPPING_CONTEXT: &str = "shipping.context";
}

/// Extractor that requires a logged-in seller.
pub struct RequireSeller(pub SellerSession);

/// Error returned when authentication or approval is missing.
pub enum AuthRejection {
    /// No valid session.
    Unauthorized,
    /// Logged in but the account is not approved yet.
    NotApproved,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": "Not logged in" })),
            )
                .into_response(),
            Self::NotApproved => (
                StatusCode::FORBIDDEN,
                Json(json!({ "error": "Seller account is not approved yet" })),
            )
                .into_response(),
        }
    }
}

impl<S> FromRequestParts<S> for RequireSeller
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let session = parts
            .extensions
            .get::<Session>()
            .cloned()
            .ok_or(AuthRejection::Unauthorized)?;

        let seller_id: SellerId = session
            .get(session_keys::SELLER_ID)
            .await
            .ok()
            .flatten()
            .ok_or(AuthRejection::Unauthorized)?;

        let app = AppState::from_ref(state);
        match app.sessions().get(seller_id).await {
            Some(seller) => Ok(Self(seller)),
            None => {
                // Stale cookie: the hub no longer knows this seller
                let _ = session.flush().await;
                Err(AuthRejection::Unauthorized)
            }
        }
    }
}

/// Extractor that additionally requires the seller to be approved.
///
/// Approval gates everything beyond the dashboard, profile, and package
/// history, mirroring the navigation gating in the panel frontend.
pub struct RequireApprovedSeller(pub SellerSession);

impl<S> FromRequestParts<S> for RequireApprovedSeller
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let RequireSeller(seller) = RequireSeller::from_request_parts(parts, state).await?;
        if !seller.is_approved() {
            return Err(AuthRejection::NotApproved);
        }
        Ok(Self(seller))
    }
}

/// Store the logged-in seller id in the session.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_current_seller(
    session: &Session,
    seller_id: SellerId,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::SELLER_ID, seller_id).await
}

/// Store the last-opened shipping editor context.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_shipping_context(
    session: &Session,
    ctx: ShippingContext,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::SHIPPING_CONTEXT, ctx).await
}

/// Read the last-opened shipping editor context, if any.
pub async fn shipping_context(session: &Session) -> Option<ShippingContext> {
    session
        .get(session_keys::SHIPPING_CONTEXT)
        .await
        .ok()
        .flatten()
}

/// Clear the stored shipping editor context.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn clear_shipping_context(
    session: &Session,
) -> Result<(), tower_sessions::session::Error> {
    session
        .remove::<ShippingContext>(session_keys::SHIPPING_CONTEXT)
        .await?;
    Ok(())
}
