//! Seller account resources: login, profile, seller list, package history.

use reqwest::multipart::{Form, Part};
use sellerdesk_core::{Email, SellerId};
use serde::Deserialize;
use serde_json::{Value, json};

use super::conversions::parse_timestamp;
use super::types::{PackageRecord, ProfileFileUpload, ProfileForm, SellerSession};
use super::{MarketplaceClient, MarketplaceError, unwrap_list};

/// Flat text keys sent on profile save, in form order.
const PROFILE_TEXT_KEYS: &[&str] = &[
    // seller
    "name",
    "mobile",
    "email",
    "status",
    "approve_status",
    "device_token",
    "subscription",
    "current_package_id",
    "current_package_start",
    "current_package_end",
    // company
    "company_name",
    "company_type",
    "company_GST_number",
    "company_website",
    "IEC_code",
    "annual_turnover",
    "facebook_link",
    "linkedin_link",
    "insta_link",
    "city",
    "state",
    "pincode",
    // kyc
    "aadhar_number",
    // bank
    "bank_name",
    "bank_IFSC_code",
    "account_number",
    "account_type",
];

#[derive(Debug, Deserialize)]
struct LoginResponse {
    #[serde(default)]
    seller: Option<Value>,
    #[serde(default)]
    message: Option<String>,
}

/// One package history row as the backend sends it.
#[derive(Debug, Deserialize)]
pub(crate) struct RawPackageRecord {
    #[serde(default)]
    pub package_name: Option<String>,
    #[serde(default)]
    pub package_price: Value,
    #[serde(default)]
    pub amount_paid: Value,
    #[serde(default)]
    pub payment_mode: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub package_start_date: Option<String>,
    #[serde(default)]
    pub package_end_date: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl MarketplaceClient {
    /// Authenticate a seller and build the merged session.
    ///
    /// Logs in, then fetches the full seller record to enrich the session;
    /// the enrichment fetch is best-effort and degrades to the login
    /// payload.
    ///
    /// # Errors
    ///
    /// Returns [`MarketplaceError::Unauthorized`] with the server-supplied
    /// message (generic fallback) when credentials are rejected or the
    /// response carries no seller.
    pub async fn login(
        &self,
        email: &Email,
        password: &str,
    ) -> Result<SellerSession, MarketplaceError> {
        let response: LoginResponse = self
            .post(
                "/seller-login",
                &json!({
                    "email": email.as_str(),
                    "password": password.trim(),
                }),
            )
            .await
            .map_err(|e| match e {
                // A non-2xx login answer is a rejection, whatever the code.
                MarketplaceError::Api { message, .. } => MarketplaceError::Unauthorized(message),
                MarketplaceError::NotFound(_) => {
                    MarketplaceError::Unauthorized("Invalid email or password".to_string())
                }
                other => other,
            })?;

        let Some(seller) = response.seller else {
            return Err(MarketplaceError::Unauthorized(
                response
                    .message
                    .unwrap_or_else(|| "Invalid email or password".to_string()),
            ));
        };

        let base: SellerSession = serde_json::from_value(seller)
            .map_err(|e| MarketplaceError::Parse(format!("Malformed seller payload: {e}")))?;

        // Enrich with the full record; failure here must not fail the login.
        match self.seller(base.id).await {
            Ok(details) => Ok(base.merged_with(&details)),
            Err(e) => {
                tracing::warn!(seller_id = %base.id, error = %e, "Seller detail fetch failed, using login payload");
                Ok(base.merged_with(&Value::Null))
            }
        }
    }

    /// Fetch one seller's full record.
    ///
    /// The backend sometimes wraps the record in a one-element array; the
    /// first element is taken in that case.
    ///
    /// # Errors
    ///
    /// Returns error on transport failure or a non-2xx response.
    pub async fn seller(&self, id: SellerId) -> Result<Value, MarketplaceError> {
        let value: Value = self.get(&format!("/seller/{id}")).await?;
        Ok(match value {
            Value::Array(mut rows) if !rows.is_empty() => rows.remove(0),
            other => other,
        })
    }

    /// Fetch all sellers.
    ///
    /// # Errors
    ///
    /// Returns error on transport failure or a non-2xx response.
    pub async fn sellers(&self) -> Result<Vec<Value>, MarketplaceError> {
        let value: Value = self.get("/sellers").await?;
        Ok(unwrap_list(value, &["sellers"]))
    }

    /// Find one seller in the list endpoint by id.
    ///
    /// # Errors
    ///
    /// Returns error on transport failure or a non-2xx response.
    pub async fn seller_from_list(
        &self,
        id: SellerId,
    ) -> Result<Option<Value>, MarketplaceError> {
        let sellers = self.sellers().await?;
        Ok(sellers
            .into_iter()
            .find(|s| s.get("id").and_then(Value::as_i64) == Some(id.as_i64())))
    }

    /// Save the seller profile.
    ///
    /// The PATCH is multipart: every text field flat, a handful of
    /// bracketed nested keys the backend also accepts, and file parts only
    /// for documents the operator re-submitted.
    ///
    /// # Errors
    ///
    /// Returns error on transport failure or a non-2xx response.
    pub async fn update_seller(
        &self,
        id: SellerId,
        form: &ProfileForm,
        files: Vec<ProfileFileUpload>,
    ) -> Result<(), MarketplaceError> {
        let flat = serde_json::to_value(form)
            .map_err(|e| MarketplaceError::Parse(format!("Unserializable profile form: {e}")))?;

        let mut multipart = Form::new();
        for key in PROFILE_TEXT_KEYS {
            if let Some(value) = flat.get(*key).and_then(Value::as_str) {
                multipart = multipart.text(*key, value.to_string());
            }
        }

        // Bracketed nested keys as backup; the backend ignores unknown fields.
        multipart = multipart
            .text("seller[name]", form.name.clone())
            .text("seller[mobile]", form.mobile.clone())
            .text("seller[email]", form.email.clone())
            .text("company[company_name]", form.company_name.clone())
            .text("company[company_type]", form.company_type.clone())
            .text(
                "company[company_GST_number]",
                form.company_gst_number.clone(),
            )
            .text("kyc[aadhar_number]", form.aadhar_number.clone())
            .text("bank[bank_name]", form.bank_name.clone())
            .text("bank[bank_IFSC_code]", form.bank_ifsc_code.clone())
            .text("bank[account_number]", form.account_number.clone())
            .text("bank[account_type]", form.account_type.clone());

        for file in files {
            multipart = multipart.part(
                file.field.clone(),
                Part::bytes(file.bytes).file_name(file.file_name),
            );
        }

        self.patch_multipart(&format!("/seller/{id}"), multipart)
            .await
    }

    /// Fetch the seller's package purchase history, newest first.
    ///
    /// Sorted client-side by creation date falling back to the package
    /// start date; 404/204 yields an empty history.
    ///
    /// # Errors
    ///
    /// Returns error on transport failure or a non-2xx response other than
    /// 404/204.
    pub async fn package_history(
        &self,
        id: SellerId,
    ) -> Result<Vec<PackageRecord>, MarketplaceError> {
        let Some(value) = self
            .get_optional(&format!("/seller/package-history/{id}"))
            .await?
        else {
            return Ok(Vec::new());
        };

        let raw: Vec<RawPackageRecord> = unwrap_list(value, &["packages", "history"]);
        let mut records: Vec<PackageRecord> = raw
            .into_iter()
            .map(|r| PackageRecord {
                package_name: r.package_name.unwrap_or_default(),
                package_price: serde_json::from_value(r.package_price).unwrap_or_default(),
                amount_paid: serde_json::from_value(r.amount_paid).unwrap_or_default(),
                payment_mode: r.payment_mode.unwrap_or_default(),
                status: r.status.unwrap_or_default(),
                package_start_date: parse_timestamp(r.package_start_date.as_deref()),
                package_end_date: parse_timestamp(r.package_end_date.as_deref()),
                created_at: parse_timestamp(r.created_at.as_deref()),
            })
            .collect();

        records.sort_by(|a, b| b.sort_key().cmp(&a.sort_key()));
        Ok(records)
    }
}
