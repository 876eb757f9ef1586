//! Shipping record and editor form types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sellerdesk_core::{BuyerId, DeliveryType, Money, OrderId, SellerId, ShippingStatus};
use serde::{Deserialize, Serialize};

/// Which (order, buyer, seller) a shipping editor refers to.
///
/// Captured when the editor opens and resolved again on submit, so a
/// submit without explicit ids still lands on the record the operator was
/// looking at, even if another editor open is racing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingContext {
    pub order_id: OrderId,
    pub buyer_id: BuyerId,
    pub seller_id: SellerId,
}

/// Courier/delivery metadata for one (order, seller) pair.
///
/// A record may not exist yet for an order; readers get `None` rather than
/// an error in that case.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShippingRecord {
    pub order_id: OrderId,
    /// Absent on rows the backend created before it stamped seller ids.
    pub seller_id: Option<SellerId>,
    pub courier_name: String,
    pub courier_company_name: String,
    pub courier_mobile: String,
    pub tracking_number: String,
    pub shipping_address: String,
    pub delivery_type: DeliveryType,
    pub total_weight: Decimal,
    pub shipping_cost: Money,
    pub shipping_status: ShippingStatus,
    pub remarks: String,
    pub estimated_delivery_date: Option<DateTime<Utc>>,
    pub actual_delivery_date: Option<DateTime<Utc>>,
    pub cancelled_date: Option<DateTime<Utc>>,
}

/// Editable shipping form, as presented by the editor endpoints.
///
/// Date fields are date-only strings (`YYYY-MM-DD`); submission converts
/// them to midnight-UTC timestamps. An absent upstream record seeds the
/// default form.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ShippingForm {
    pub courier_name: String,
    pub courier_company_name: String,
    pub courier_mobile: String,
    pub tracking_number: String,
    pub shipping_address: String,
    pub delivery_type: DeliveryType,
    #[serde(deserialize_with = "sellerdesk_core::lenient_decimal")]
    pub total_weight: Decimal,
    pub shipping_cost: Money,
    pub shipping_status: ShippingStatus,
    pub remarks: String,
    /// Date-only input, empty when unset.
    pub estimated_delivery_date: String,
    /// Date-only input, empty when unset.
    pub actual_delivery_date: String,
    /// Date-only input, empty when unset.
    pub cancelled_date: String,
}

impl Default for ShippingForm {
    fn default() -> Self {
        Self {
            courier_name: String::new(),
            courier_company_name: String::new(),
            courier_mobile: String::new(),
            tracking_number: String::new(),
            shipping_address: String::new(),
            delivery_type: DeliveryType::Standard,
            total_weight: Decimal::ZERO,
            shipping_cost: Money::ZERO,
            shipping_status: ShippingStatus::Shipped,
            remarks: String::new(),
            estimated_delivery_date: String::new(),
            actual_delivery_date: String::new(),
            cancelled_date: String::new(),
        }
    }
}
