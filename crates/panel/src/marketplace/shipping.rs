//! Shipping record resources.
//!
//! Shipping records are keyed by (order, seller). Creation is
//! create-if-absent: the POST is fired without checking for an existing
//! row and its failure is ignored by callers, after which the PATCH is
//! the authoritative write.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sellerdesk_core::{BuyerId, DeliveryType, Money, OrderId, SellerId, ShippingStatus};
use serde::Deserialize;
use serde_json::{Map, Value, json};

use super::conversions::convert_shipping_row;
use super::types::ShippingRecord;
use super::{MarketplaceClient, MarketplaceError, unwrap_list};

/// Canonical spelling of the cancellation-date field.
pub const CANCELLED_DATE_FIELD: &str = "cancelled_date";

/// Alternate spelling some backend deployments store instead.
///
/// Which spelling is authoritative has not been confirmed by the backend
/// team; until it is, every write carries both and reads prefer the
/// canonical one. Collapse to a single field once the contract is fixed.
pub const CANCELLED_DATE_FIELD_ALT: &str = "canceled_date";

/// One shipping row as the backend sends it.
#[derive(Debug, Deserialize)]
pub(crate) struct RawShippingRow {
    #[serde(default)]
    pub order_id: Option<i64>,
    #[serde(default)]
    pub seller_id: Option<i64>,
    #[serde(default)]
    pub courier_name: Option<String>,
    #[serde(default)]
    pub courier_company_name: Option<String>,
    #[serde(default)]
    pub courier_mobile: Option<String>,
    #[serde(default)]
    pub tracking_number: Option<String>,
    #[serde(default)]
    pub shipping_address: Option<String>,
    #[serde(default)]
    pub delivery_type: Option<String>,
    #[serde(default)]
    pub total_weight: Value,
    #[serde(default)]
    pub shipping_cost: Value,
    #[serde(default)]
    pub shipping_status: Option<String>,
    #[serde(default)]
    pub remarks: Option<String>,
    #[serde(default)]
    pub estimated_delivery_date: Option<String>,
    #[serde(default)]
    pub actual_delivery_date: Option<String>,
    #[serde(default)]
    pub cancelled_date: Option<String>,
    #[serde(default)]
    pub canceled_date: Option<String>,
}

/// Fields written to a shipping record.
///
/// Sparse for the status-sync side effect, full for the editor submit.
/// `None` fields are omitted from the wire body.
#[derive(Debug, Clone, Default)]
pub struct ShippingPatch {
    pub courier_name: Option<String>,
    pub courier_company_name: Option<String>,
    pub courier_mobile: Option<String>,
    pub tracking_number: Option<String>,
    pub shipping_address: Option<String>,
    pub delivery_type: Option<DeliveryType>,
    pub total_weight: Option<Decimal>,
    pub shipping_cost: Option<Money>,
    pub shipping_status: Option<ShippingStatus>,
    pub remarks: Option<String>,
    /// `Some(None)` writes an explicit null.
    pub estimated_delivery_date: Option<Option<DateTime<Utc>>>,
    pub actual_delivery_date: Option<Option<DateTime<Utc>>>,
    pub cancelled_date: Option<Option<DateTime<Utc>>>,
}

impl ShippingPatch {
    /// Build the wire body, applying the cancellation-date dual write.
    #[must_use]
    pub fn into_body(self) -> Value {
        let mut body = Map::new();
        let mut put = |key: &str, value: Option<Value>| {
            if let Some(value) = value {
                body.insert(key.to_string(), value);
            }
        };

        put("courier_name", self.courier_name.map(Value::from));
        put(
            "courier_company_name",
            self.courier_company_name.map(Value::from),
        );
        put("courier_mobile", self.courier_mobile.map(Value::from));
        put("tracking_number", self.tracking_number.map(Value::from));
        put("shipping_address", self.shipping_address.map(Value::from));
        put(
            "delivery_type",
            self.delivery_type.map(|d| json!(d)),
        );
        put("total_weight", self.total_weight.map(|w| json!(w)));
        put("shipping_cost", self.shipping_cost.map(|c| json!(c)));
        put("shipping_status", self.shipping_status.map(|s| json!(s)));
        put("remarks", self.remarks.map(Value::from));
        put(
            "estimated_delivery_date",
            self.estimated_delivery_date.map(|d| json!(d)),
        );
        put(
            "actual_delivery_date",
            self.actual_delivery_date.map(|d| json!(d)),
        );
        if let Some(date) = self.cancelled_date {
            let value = json!(date);
            body.insert(CANCELLED_DATE_FIELD.to_string(), value.clone());
            body.insert(CANCELLED_DATE_FIELD_ALT.to_string(), value);
        }

        Value::Object(body)
    }
}

/// Pick the row for a seller, falling back to the first row.
#[must_use]
pub fn pick_for_seller(
    rows: Vec<ShippingRecord>,
    seller_id: SellerId,
) -> Option<ShippingRecord> {
    let mut first = None;
    for row in rows {
        if row.seller_id == Some(seller_id) {
            return Some(row);
        }
        if first.is_none() {
            first = Some(row);
        }
    }
    first
}

impl MarketplaceClient {
    /// Fetch the shipping rows recorded for an order.
    ///
    /// 404 and 204 mean "no shipping info yet" and yield an empty list.
    ///
    /// # Errors
    ///
    /// Returns error on transport failure or a non-2xx response other than
    /// 404/204.
    pub async fn shipping_for_order(
        &self,
        order_id: OrderId,
    ) -> Result<Vec<ShippingRecord>, MarketplaceError> {
        let Some(value) = self
            .get_optional(&format!("/ordershipping/{order_id}"))
            .await?
        else {
            return Ok(Vec::new());
        };
        let raw: Vec<RawShippingRow> = unwrap_list(value, &["shipping"]);
        Ok(raw
            .into_iter()
            .map(|row| convert_shipping_row(row, order_id))
            .collect())
    }

    /// Create a shipping record for (order, buyer) if none exists.
    ///
    /// The backend rejects duplicates, so callers treat failure here as
    /// "probably exists already" and continue to the PATCH.
    ///
    /// # Errors
    ///
    /// Returns error on transport failure or a non-2xx response.
    pub async fn create_shipping(
        &self,
        order_id: OrderId,
        buyer_id: BuyerId,
    ) -> Result<(), MarketplaceError> {
        self.post_unit(
            "/shipping/",
            &json!({
                "order_id": order_id,
                "buyer_id": buyer_id,
            }),
        )
        .await
    }

    /// Update the shipping record for (order, seller). Authoritative write.
    ///
    /// # Errors
    ///
    /// Returns error on transport failure or a non-2xx response.
    pub async fn update_shipping(
        &self,
        order_id: OrderId,
        seller_id: SellerId,
        patch: ShippingPatch,
    ) -> Result<(), MarketplaceError> {
        self.patch_unit(
            &format!("/shipping/{order_id}/{seller_id}"),
            &patch.into_body(),
        )
        .await
    }
}
