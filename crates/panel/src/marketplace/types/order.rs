//! Order and line-item domain types.

use chrono::{DateTime, Utc};
use sellerdesk_core::{
    BuyerId, Money, OrderId, OrderLineItemId, OrderStatus, OrderType, PaymentStatus, ProductId,
    SellerId,
};
use serde::{Deserialize, Serialize};

/// One seller order after normalization.
///
/// Line items belonging to other sellers are already filtered out; an order
/// with no remaining line items is dropped before it reaches this type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub buyer_id: BuyerId,
    pub created_at: Option<DateTime<Utc>>,
    pub order_type: OrderType,
    pub line_items: Vec<OrderLineItem>,
}

impl Order {
    /// Effective order status: the first line item's, defaulting to New.
    #[must_use]
    pub fn effective_status(&self) -> OrderStatus {
        self.line_items
            .first()
            .map_or(OrderStatus::New, |item| item.order_status)
    }

    /// Effective payment status: the first line item's, defaulting to Pending.
    #[must_use]
    pub fn effective_payment_status(&self) -> PaymentStatus {
        self.line_items
            .first()
            .map_or(PaymentStatus::Pending, |item| item.payment_status)
    }

    /// Total quantity across line items.
    #[must_use]
    pub fn total_quantity(&self) -> u32 {
        self.line_items.iter().map(|item| item.quantity).sum()
    }

    /// Total amount across line items (unit price times quantity).
    #[must_use]
    pub fn total_amount(&self) -> Money {
        self.line_items.iter().map(OrderLineItem::line_total).sum()
    }
}

/// One product entry within an order, carrying its own status fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLineItem {
    pub id: OrderLineItemId,
    pub product_id: ProductId,
    pub seller_id: SellerId,
    pub quantity: u32,
    pub unit_price: Money,
    pub order_status: OrderStatus,
    pub payment_status: PaymentStatus,
}

impl OrderLineItem {
    /// Line total: unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Money {
        self.unit_price.times(self.quantity)
    }
}

/// Reference to a line item together with its parent identifiers.
///
/// Status transitions need the parent order, buyer, and seller ids to drive
/// the shipping side effect, so the panel passes this bundle around instead
/// of a bare line-item id.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LineItemRef {
    pub line_item_id: OrderLineItemId,
    pub order_id: OrderId,
    pub buyer_id: BuyerId,
    pub seller_id: SellerId,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn line_item(status: OrderStatus, quantity: u32, price: &str) -> OrderLineItem {
        OrderLineItem {
            id: OrderLineItemId::new(1),
            product_id: ProductId::new(10),
            seller_id: SellerId::new(6),
            quantity,
            unit_price: Money::new(price.parse::<Decimal>().expect("valid decimal")),
            order_status: status,
            payment_status: PaymentStatus::Pending,
        }
    }

    fn order(line_items: Vec<OrderLineItem>) -> Order {
        Order {
            id: OrderId::new(9),
            buyer_id: BuyerId::new(2),
            created_at: None,
            order_type: OrderType::Order,
            line_items,
        }
    }

    #[test]
    fn test_effective_status_is_first_line_item() {
        let o = order(vec![
            line_item(OrderStatus::Shipped, 1, "10"),
            line_item(OrderStatus::New, 1, "10"),
        ]);
        assert_eq!(o.effective_status(), OrderStatus::Shipped);
    }

    #[test]
    fn test_effective_status_defaults_to_new() {
        let o = order(Vec::new());
        assert_eq!(o.effective_status(), OrderStatus::New);
        assert_eq!(o.effective_payment_status(), PaymentStatus::Pending);
    }

    #[test]
    fn test_totals() {
        let o = order(vec![
            line_item(OrderStatus::New, 2, "19.99"),
            line_item(OrderStatus::New, 1, "5.00"),
        ]);
        assert_eq!(o.total_quantity(), 3);
        assert_eq!(o.total_amount().to_string(), "44.98");
    }
}
