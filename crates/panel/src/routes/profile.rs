//! Seller profile handlers.
//!
//! The backend stores the profile nested; the panel edits it flat. Reads
//! flatten, saves go upstream as a multipart PATCH (flat keys plus the
//! bracketed backup keys) followed by an authoritative re-fetch.

use axum::{Json, extract::State};
use base64::Engine as _;
use serde::Deserialize;
use tracing::instrument;

use crate::error::AppError;
use crate::marketplace::conversions::flatten_profile;
use crate::marketplace::{ProfileFileUpload, ProfileForm};
use crate::middleware::RequireSeller;
use crate::state::AppState;

/// A document re-submitted with the profile.
#[derive(Debug, Deserialize)]
pub struct FileInput {
    /// Upstream field name (e.g. `company_logo`, `aadhar_front`).
    pub field: String,
    pub file_name: String,
    /// Base64-encoded file contents.
    pub content: String,
}

/// Profile save body: the flat form plus any changed documents.
#[derive(Debug, Deserialize)]
pub struct ProfileUpdateInput {
    pub form: ProfileForm,
    #[serde(default)]
    pub files: Vec<FileInput>,
}

/// Current profile, flattened for editing.
#[instrument(skip(state, seller), fields(seller_id = %seller.id))]
pub async fn show(
    State(state): State<AppState>,
    RequireSeller(seller): RequireSeller,
) -> Result<Json<ProfileForm>, AppError> {
    let data = state.marketplace().seller(seller.id).await?;
    Ok(Json(flatten_profile(&data)))
}

/// Save the profile and return the re-fetched, re-flattened form.
#[instrument(skip(state, seller, input), fields(seller_id = %seller.id))]
pub async fn update(
    State(state): State<AppState>,
    RequireSeller(seller): RequireSeller,
    Json(input): Json<ProfileUpdateInput>,
) -> Result<Json<ProfileForm>, AppError> {
    let files = input
        .files
        .into_iter()
        .map(|f| {
            let bytes = base64::engine::general_purpose::STANDARD
                .decode(&f.content)
                .map_err(|e| {
                    AppError::BadRequest(format!("File {} is not valid base64: {e}", f.field))
                })?;
            Ok(ProfileFileUpload {
                field: f.field,
                file_name: f.file_name,
                bytes,
            })
        })
        .collect::<Result<Vec<_>, AppError>>()?;

    state
        .marketplace()
        .update_seller(seller.id, &input.form, files)
        .await?;

    // The PATCH response shape varies; re-fetch to be sure.
    let data = state.marketplace().seller(seller.id).await?;
    Ok(Json(flatten_profile(&data)))
}
