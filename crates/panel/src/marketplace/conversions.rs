//! Wire-to-domain conversion and normalization.
//!
//! Everything leaving this module satisfies the domain invariants: statuses
//! are members of their allowed sets, retained line items belong to the
//! requesting seller, and orders without line items are gone. Malformed
//! scalar values degrade to defaults instead of failing the row.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use sellerdesk_core::{
    BuyerId, DeliveryType, Money, OrderId, OrderLineItemId, OrderStatus, OrderType, PaymentStatus,
    ProductId, SellerId, ShippingStatus,
};
use serde_json::Value;

use super::orders::RawOrder;
use super::shipping::RawShippingRow;
use super::types::{Order, OrderLineItem, ProfileForm, ShippingForm, ShippingRecord};

// =============================================================================
// Date helpers
// =============================================================================

/// Parse an upstream timestamp string leniently.
///
/// Accepts RFC 3339, `YYYY-MM-DD HH:MM:SS`, and bare `YYYY-MM-DD`
/// (midnight UTC). Anything else is `None`.
#[must_use]
pub fn parse_timestamp(raw: Option<&str>) -> Option<DateTime<Utc>> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Some(Utc.from_utc_datetime(&naive));
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0)?));
    }
    None
}

/// Convert date-only form input (`YYYY-MM-DD`) to a midnight-UTC timestamp.
#[must_use]
pub fn date_input_to_timestamp(input: &str) -> Option<DateTime<Utc>> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    let date = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").ok()?;
    Some(Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0)?))
}

/// Convert a timestamp to date-only form input, empty when absent.
#[must_use]
pub fn timestamp_to_date_input(timestamp: Option<DateTime<Utc>>) -> String {
    timestamp.map_or_else(String::new, |ts| ts.format("%Y-%m-%d").to_string())
}

// =============================================================================
// Lenient scalars
// =============================================================================

/// Read a quantity that may arrive as a number or a numeric string.
fn lenient_quantity(value: &Value) -> u32 {
    match value {
        Value::Number(n) => u32::try_from(n.as_i64().unwrap_or(0).max(0)).unwrap_or(0),
        Value::String(s) => s.trim().parse::<u32>().unwrap_or(0),
        _ => 0,
    }
}

/// Read a decimal that may arrive as a number, numeric string, or null.
fn lenient_decimal(value: &Value) -> Decimal {
    match value {
        Value::Number(_) | Value::String(_) => {
            serde_json::from_value::<Money>(value.clone())
                .map(|m| m.amount())
                .unwrap_or(Decimal::ZERO)
        }
        _ => Decimal::ZERO,
    }
}

// =============================================================================
// Orders
// =============================================================================

/// Normalize one raw order for a seller.
///
/// Returns `None` when no line items belong to the seller.
pub(crate) fn normalize_order(raw: RawOrder, seller_id: SellerId) -> Option<Order> {
    let line_items: Vec<OrderLineItem> = raw
        .products
        .into_iter()
        .filter(|item| item.seller_id == Some(seller_id.as_i64()))
        .map(|item| OrderLineItem {
            id: OrderLineItemId::new(item.id),
            product_id: ProductId::new(item.product_id.unwrap_or_default()),
            seller_id,
            quantity: lenient_quantity(&item.quantity),
            unit_price: Money::new(lenient_decimal(&item.price)),
            order_status: OrderStatus::parse_lenient(item.order_status.as_deref()),
            payment_status: PaymentStatus::parse_lenient(item.payment_status.as_deref()),
        })
        .collect();

    if line_items.is_empty() {
        return None;
    }

    Some(Order {
        id: OrderId::new(raw.id),
        buyer_id: BuyerId::new(raw.buyer_id),
        created_at: parse_timestamp(raw.created_at.as_deref()),
        order_type: OrderType::parse_lenient(raw.order_type.as_deref()),
        line_items,
    })
}

/// Normalize a raw order list for a seller.
pub(crate) fn normalize_orders(raw: Vec<RawOrder>, seller_id: SellerId) -> Vec<Order> {
    raw.into_iter()
        .filter_map(|order| normalize_order(order, seller_id))
        .collect()
}

// =============================================================================
// Shipping
// =============================================================================

/// Convert one raw shipping row into a domain record.
pub(crate) fn convert_shipping_row(raw: RawShippingRow, order_id: OrderId) -> ShippingRecord {
    // Reads prefer the canonical cancellation-date spelling.
    let cancelled = raw
        .cancelled_date
        .as_deref()
        .or(raw.canceled_date.as_deref());

    ShippingRecord {
        order_id: raw.order_id.map_or(order_id, OrderId::new),
        seller_id: raw.seller_id.map(SellerId::new),
        courier_name: raw.courier_name.unwrap_or_default(),
        courier_company_name: raw.courier_company_name.unwrap_or_default(),
        courier_mobile: raw.courier_mobile.unwrap_or_default(),
        tracking_number: raw.tracking_number.unwrap_or_default(),
        shipping_address: raw.shipping_address.unwrap_or_default(),
        delivery_type: DeliveryType::parse_lenient(raw.delivery_type.as_deref()),
        total_weight: lenient_decimal(&raw.total_weight),
        shipping_cost: Money::new(lenient_decimal(&raw.shipping_cost)),
        shipping_status: ShippingStatus::parse_lenient(raw.shipping_status.as_deref()),
        remarks: raw.remarks.unwrap_or_default(),
        estimated_delivery_date: parse_timestamp(raw.estimated_delivery_date.as_deref()),
        actual_delivery_date: parse_timestamp(raw.actual_delivery_date.as_deref()),
        cancelled_date: parse_timestamp(cancelled),
    }
}

/// Seed the editable form from a stored record (timestamps become
/// date-only input values).
#[must_use]
pub fn record_to_form(record: &ShippingRecord) -> ShippingForm {
    ShippingForm {
        courier_name: record.courier_name.clone(),
        courier_company_name: record.courier_company_name.clone(),
        courier_mobile: record.courier_mobile.clone(),
        tracking_number: record.tracking_number.clone(),
        shipping_address: record.shipping_address.clone(),
        delivery_type: record.delivery_type,
        total_weight: record.total_weight,
        shipping_cost: record.shipping_cost,
        shipping_status: record.shipping_status,
        remarks: record.remarks.clone(),
        estimated_delivery_date: timestamp_to_date_input(record.estimated_delivery_date),
        actual_delivery_date: timestamp_to_date_input(record.actual_delivery_date),
        cancelled_date: timestamp_to_date_input(record.cancelled_date),
    }
}

// =============================================================================
// Profile
// =============================================================================

fn section_str(data: &Value, section: &str, key: &str) -> String {
    match data.get(section).and_then(|s| s.get(key)) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

/// Flatten the nested profile response into the editable form shape.
#[must_use]
pub fn flatten_profile(data: &Value) -> ProfileForm {
    ProfileForm {
        // Seller
        name: section_str(data, "seller", "name"),
        mobile: section_str(data, "seller", "mobile"),
        email: section_str(data, "seller", "email"),
        status: section_str(data, "seller", "status"),
        approve_status: section_str(data, "seller", "approve_status"),
        device_token: section_str(data, "seller", "device_token"),
        subscription: section_str(data, "seller", "subscription"),
        current_package_id: section_str(data, "seller", "current_package_id"),
        current_package_start: section_str(data, "seller", "current_package_start"),
        current_package_end: section_str(data, "seller", "current_package_end"),

        // Company
        company_name: section_str(data, "company", "company_name"),
        company_type: section_str(data, "company", "company_type"),
        company_gst_number: section_str(data, "company", "company_GST_number"),
        company_website: section_str(data, "company", "company_website"),
        iec_code: section_str(data, "company", "IEC_code"),
        annual_turnover: section_str(data, "company", "annual_turnover"),
        facebook_link: section_str(data, "company", "facebook_link"),
        linkedin_link: section_str(data, "company", "linkedin_link"),
        insta_link: section_str(data, "company", "insta_link"),
        city: section_str(data, "company", "city"),
        state: section_str(data, "company", "state"),
        pincode: section_str(data, "company", "pincode"),
        company_logo: section_str(data, "company", "company_logo"),

        // KYC
        aadhar_number: section_str(data, "kyc", "aadhar_number"),
        aadhar_front: section_str(data, "kyc", "aadhar_front"),
        aadhar_back: section_str(data, "kyc", "aadhar_back"),
        company_registration: section_str(data, "kyc", "company_registration"),
        company_pan_card: section_str(data, "kyc", "company_pan_card"),
        gst_certificate: section_str(data, "kyc", "gst_certificate"),

        // Bank
        bank_name: section_str(data, "bank", "bank_name"),
        bank_ifsc_code: section_str(data, "bank", "bank_IFSC_code"),
        account_number: section_str(data, "bank", "account_number"),
        account_type: section_str(data, "bank", "account_type"),
        cancelled_cheque_photo: section_str(data, "bank", "cancelled_cheque_photo"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw_order(value: Value) -> RawOrder {
        serde_json::from_value(value).expect("raw order parses")
    }

    #[test]
    fn test_parse_timestamp_formats() {
        assert!(parse_timestamp(Some("2025-06-01T12:30:00.000Z")).is_some());
        assert!(parse_timestamp(Some("2025-06-01 12:30:00")).is_some());
        let midnight = parse_timestamp(Some("2025-06-01")).expect("parses");
        assert_eq!(midnight.format("%H:%M:%S").to_string(), "00:00:00");
        assert!(parse_timestamp(Some("not a date")).is_none());
        assert!(parse_timestamp(Some("")).is_none());
        assert!(parse_timestamp(None).is_none());
    }

    #[test]
    fn test_date_input_round_trip() {
        let ts = date_input_to_timestamp("2025-06-01").expect("parses");
        assert_eq!(timestamp_to_date_input(Some(ts)), "2025-06-01");
        assert_eq!(timestamp_to_date_input(None), "");
        assert!(date_input_to_timestamp("").is_none());
        assert!(date_input_to_timestamp("06/01/2025").is_none());
    }

    #[test]
    fn test_normalize_order_filters_foreign_line_items() {
        let raw = raw_order(json!({
            "id": 9,
            "buyer_id": 2,
            "order_type": "Order",
            "products": [
                {"id": 55, "product_id": 1, "seller_id": 6, "quantity": 2, "price": "10.00", "order_status": "pending"},
                {"id": 56, "product_id": 2, "seller_id": 4, "quantity": 1, "price": 5, "order_status": "New"}
            ]
        }));

        let order = normalize_order(raw, SellerId::new(6)).expect("retained");
        assert_eq!(order.line_items.len(), 1);
        assert!(order.line_items.iter().all(|i| i.seller_id == SellerId::new(6)));
    }

    #[test]
    fn test_normalize_order_drops_empty_orders() {
        let raw = raw_order(json!({
            "id": 9,
            "buyer_id": 2,
            "products": [
                {"id": 56, "product_id": 2, "seller_id": 4, "quantity": 1, "price": 5}
            ]
        }));
        assert!(normalize_order(raw, SellerId::new(6)).is_none());

        let raw = raw_order(json!({"id": 10, "buyer_id": 2, "products": []}));
        assert!(normalize_order(raw, SellerId::new(6)).is_none());
    }

    #[test]
    fn test_normalize_order_statuses() {
        let raw = raw_order(json!({
            "id": 9,
            "buyer_id": 2,
            "order_type": "weird-value",
            "products": [
                {"id": 55, "product_id": 1, "seller_id": 6, "quantity": "3",
                 "price": "19.99", "order_status": "pending", "payment_status": "PAID"}
            ]
        }));

        let order = normalize_order(raw, SellerId::new(6)).expect("retained");
        assert_eq!(order.order_type, OrderType::Order);
        let item = order.line_items.first().expect("line item");
        assert_eq!(item.order_status, OrderStatus::Pending);
        assert_eq!(item.payment_status, PaymentStatus::Paid);
        assert_eq!(item.quantity, 3);
        assert_eq!(item.line_total().to_string(), "59.97");
    }

    #[test]
    fn test_convert_shipping_row_prefers_canonical_cancellation_spelling() {
        let raw: RawShippingRow = serde_json::from_value(json!({
            "seller_id": 6,
            "shipping_status": "cancelled",
            "canceled_date": "2025-05-01",
            "cancelled_date": "2025-05-02"
        }))
        .expect("parses");

        let record = convert_shipping_row(raw, OrderId::new(9));
        assert_eq!(record.shipping_status, ShippingStatus::Cancelled);
        assert_eq!(
            timestamp_to_date_input(record.cancelled_date),
            "2025-05-02"
        );
    }

    #[test]
    fn test_convert_shipping_row_defaults() {
        let raw: RawShippingRow = serde_json::from_value(json!({})).expect("parses");
        let record = convert_shipping_row(raw, OrderId::new(9));
        assert_eq!(record.order_id, OrderId::new(9));
        assert_eq!(record.shipping_status, ShippingStatus::Shipped);
        assert_eq!(record.delivery_type, DeliveryType::Standard);
        assert!(record.courier_name.is_empty());
    }

    #[test]
    fn test_record_to_form_converts_dates() {
        let raw: RawShippingRow = serde_json::from_value(json!({
            "courier_name": "DTDC",
            "estimated_delivery_date": "2025-06-03T00:00:00.000Z"
        }))
        .expect("parses");
        let form = record_to_form(&convert_shipping_row(raw, OrderId::new(9)));
        assert_eq!(form.courier_name, "DTDC");
        assert_eq!(form.estimated_delivery_date, "2025-06-03");
        assert_eq!(form.actual_delivery_date, "");
    }

    #[test]
    fn test_flatten_profile() {
        let data = json!({
            "seller": {"name": "Acme", "email": "a@b.com", "approve_status": "approved",
                        "current_package_id": 12},
            "company": {"company_name": "Acme Pvt Ltd", "company_GST_number": "22AAAAA0000A1Z5"},
            "kyc": {"aadhar_number": "1234"},
            "bank": {"bank_IFSC_code": "HDFC0000001"}
        });
        let form = flatten_profile(&data);
        assert_eq!(form.name, "Acme");
        assert_eq!(form.approve_status, "approved");
        assert_eq!(form.current_package_id, "12");
        assert_eq!(form.company_gst_number, "22AAAAA0000A1Z5");
        assert_eq!(form.bank_ifsc_code, "HDFC0000001");
        // Missing sections flatten to empty strings
        assert_eq!(form.company_website, "");
    }
}
