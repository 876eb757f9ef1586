//! Seller order resources.

use sellerdesk_core::{OrderId, OrderLineItemId, OrderStatus, OrderType, SellerId};
use serde::Deserialize;
use serde_json::{Value, json};

use super::conversions::normalize_orders;
use super::types::Order;
use super::{MarketplaceClient, MarketplaceError, unwrap_list};

/// One order as the backend sends it: statuses free-text, numbers
/// sometimes strings, line items under `products`.
#[derive(Debug, Deserialize)]
pub(crate) struct RawOrder {
    pub id: i64,
    #[serde(default)]
    pub buyer_id: i64,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub order_type: Option<String>,
    #[serde(default)]
    pub products: Vec<RawLineItem>,
}

/// One line item as the backend sends it.
#[derive(Debug, Deserialize)]
pub(crate) struct RawLineItem {
    pub id: i64,
    #[serde(default)]
    pub product_id: Option<i64>,
    #[serde(default)]
    pub seller_id: Option<i64>,
    #[serde(default)]
    pub quantity: Value,
    #[serde(default)]
    pub price: Value,
    #[serde(default)]
    pub order_status: Option<String>,
    #[serde(default)]
    pub payment_status: Option<String>,
}

impl MarketplaceClient {
    /// Fetch the seller's orders, normalized and filtered.
    ///
    /// Line items belonging to other sellers are dropped, and orders left
    /// with no line items are dropped entirely. 404 and 204 mean "no orders
    /// yet", not an error.
    ///
    /// # Errors
    ///
    /// Returns error on transport failure or a non-2xx response other than
    /// 404/204.
    pub async fn orders_for_seller(
        &self,
        seller_id: SellerId,
    ) -> Result<Vec<Order>, MarketplaceError> {
        let Some(value) = self
            .get_optional(&format!("/orderseller/{seller_id}"))
            .await?
        else {
            return Ok(Vec::new());
        };
        let raw: Vec<RawOrder> = unwrap_list(value, &["orders"]);
        Ok(normalize_orders(raw, seller_id))
    }

    /// Set the order status of one line item.
    ///
    /// # Errors
    ///
    /// Returns error on transport failure or a non-2xx response.
    pub async fn update_line_item_status(
        &self,
        line_item_id: OrderLineItemId,
        status: OrderStatus,
    ) -> Result<(), MarketplaceError> {
        self.patch_unit(
            &format!("/orderProduct/{line_item_id}"),
            &json!({
                "order_product_id": line_item_id,
                "order_status": status,
            }),
        )
        .await
    }

    /// Set an order's type (order vs. inquiry).
    ///
    /// # Errors
    ///
    /// Returns error on transport failure or a non-2xx response.
    pub async fn update_order_type(
        &self,
        order_id: OrderId,
        order_type: OrderType,
    ) -> Result<(), MarketplaceError> {
        self.patch_unit(
            "/ordersOrderType",
            &json!({
                "order_id": order_id,
                "order_type": order_type,
            }),
        )
        .await
    }
}
