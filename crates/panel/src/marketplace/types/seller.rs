//! Seller session and profile form types.

use sellerdesk_core::{ApprovalStatus, SellerId};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The logged-in seller, as cached in the panel session.
///
/// The identifying fields are pinned; everything else the backend returns
/// rides along in `extra` so refreshes can merge new fields without the
/// panel having to know every profile key the backend grows.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SellerSession {
    pub id: SellerId,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub approve_status: ApprovalStatus,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SellerSession {
    /// Whether this seller may access the gated panel sections.
    #[must_use]
    pub fn is_approved(&self) -> bool {
        self.approve_status.is_approved()
    }

    /// Merge freshly fetched seller data onto this session.
    ///
    /// Identifying fields (id, email, name) keep their cached values when
    /// already present; everything else takes the fetched value. Fields the
    /// session never heard of land in `extra`.
    #[must_use]
    pub fn merged_with(&self, fetched: &Value) -> Self {
        let fetched_map = fetched.as_object().cloned().unwrap_or_default();

        let fetched_str = |key: &str| -> Option<String> {
            fetched_map
                .get(key)
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(ToString::to_string)
        };

        let email = if self.email.trim().is_empty() {
            fetched_str("email").unwrap_or_default()
        } else {
            self.email.clone()
        };
        let name = if self.name.trim().is_empty() {
            fetched_str("name").unwrap_or_else(|| email.clone())
        } else {
            self.name.clone()
        };
        let approve_status = fetched_str("approve_status")
            .map_or_else(|| self.approve_status.clone(), ApprovalStatus::new);

        let mut extra = self.extra.clone();
        for (key, value) in fetched_map {
            if matches!(key.as_str(), "id" | "email" | "name" | "approve_status") {
                continue;
            }
            extra.insert(key, value);
        }

        Self {
            id: self.id,
            email,
            name,
            approve_status,
            extra,
        }
    }
}

/// Flat editable profile form.
///
/// The backend stores the profile as nested sections (`seller`, `company`,
/// `kyc`, `bank`); the panel edits it flat and re-nests on save. Field
/// names keep the backend's casing quirks so the flatten/unflatten stays a
/// mechanical mapping.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ProfileForm {
    // Seller
    pub name: String,
    pub mobile: String,
    pub email: String,
    pub status: String,
    pub approve_status: String,
    pub device_token: String,
    pub subscription: String,
    pub current_package_id: String,
    pub current_package_start: String,
    pub current_package_end: String,

    // Company
    pub company_name: String,
    pub company_type: String,
    #[serde(rename = "company_GST_number")]
    pub company_gst_number: String,
    pub company_website: String,
    #[serde(rename = "IEC_code")]
    pub iec_code: String,
    pub annual_turnover: String,
    pub facebook_link: String,
    pub linkedin_link: String,
    pub insta_link: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
    pub company_logo: String,

    // KYC
    pub aadhar_number: String,
    pub aadhar_front: String,
    pub aadhar_back: String,
    pub company_registration: String,
    pub company_pan_card: String,
    pub gst_certificate: String,

    // Bank
    pub bank_name: String,
    #[serde(rename = "bank_IFSC_code")]
    pub bank_ifsc_code: String,
    pub account_number: String,
    pub account_type: String,
    pub cancelled_cheque_photo: String,
}

/// A file re-submitted with the profile form.
///
/// Files are attached to the multipart PATCH only when the operator
/// actually changed them; unchanged documents keep their stored URL.
#[derive(Debug, Clone)]
pub struct ProfileFileUpload {
    /// Multipart field name (e.g. `company_logo`, `aadhar_front`).
    pub field: String,
    /// Original file name.
    pub file_name: String,
    /// Raw file contents.
    pub bytes: Vec<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_seller_session_preserves_extra_fields() {
        let session: SellerSession = serde_json::from_value(json!({
            "id": 6,
            "email": "seller@example.com",
            "name": "Acme Traders",
            "approve_status": "pending",
            "mobile": "9999999999"
        }))
        .expect("parses");

        assert_eq!(session.id, SellerId::new(6));
        assert!(!session.is_approved());
        assert_eq!(
            session.extra.get("mobile").and_then(Value::as_str),
            Some("9999999999")
        );

        // Round-trips with the extra fields re-flattened
        let back = serde_json::to_value(&session).expect("serializes");
        assert_eq!(back.get("mobile").and_then(Value::as_str), Some("9999999999"));
    }

    #[test]
    fn test_merged_with_prefers_cached_identity() {
        let cached: SellerSession = serde_json::from_value(json!({
            "id": 6,
            "email": "seller@example.com",
            "name": "Acme Traders",
            "approve_status": "pending"
        }))
        .expect("parses");

        let merged = cached.merged_with(&json!({
            "id": 999,
            "email": "other@example.com",
            "name": "Renamed",
            "approve_status": "approved",
            "mobile": "1234"
        }));

        assert_eq!(merged.id, SellerId::new(6));
        assert_eq!(merged.email, "seller@example.com");
        assert_eq!(merged.name, "Acme Traders");
        assert!(merged.is_approved());
        assert_eq!(merged.extra.get("mobile").and_then(Value::as_str), Some("1234"));
    }

    #[test]
    fn test_merged_with_fills_missing_identity() {
        let cached: SellerSession =
            serde_json::from_value(json!({"id": 6})).expect("parses");

        let merged = cached.merged_with(&json!({
            "email": "seller@example.com"
        }));

        assert_eq!(merged.email, "seller@example.com");
        // Name falls back to the email when nothing else is known
        assert_eq!(merged.name, "seller@example.com");
    }

    #[test]
    fn test_profile_form_backend_casing() {
        let form: ProfileForm = serde_json::from_value(json!({
            "company_GST_number": "22AAAAA0000A1Z5",
            "bank_IFSC_code": "HDFC0000001",
            "IEC_code": "IEC123"
        }))
        .expect("parses");
        assert_eq!(form.company_gst_number, "22AAAAA0000A1Z5");
        assert_eq!(form.bank_ifsc_code, "HDFC0000001");
        assert_eq!(form.iec_code, "IEC123");
    }
}
