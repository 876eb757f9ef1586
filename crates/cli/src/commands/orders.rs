//! Order commands: listing, status transitions, shipping inspection.

use sellerdesk_core::{BuyerId, OrderId, OrderLineItemId, OrderStatus};
use sellerdesk_panel::marketplace::LineItemRef;
use sellerdesk_panel::marketplace::shipping::pick_for_seller;
use sellerdesk_panel::services::OrderService;

use super::{CliError, authenticate};

/// List the seller's orders, optionally filtered by effective status.
pub async fn list(
    email: &str,
    password: Option<&str>,
    status: Option<&str>,
) -> Result<(), CliError> {
    let wanted = status
        .map(|s| {
            s.parse::<OrderStatus>()
                .map_err(CliError::InvalidArgument)
        })
        .transpose()?;

    let (client, session) = authenticate(email, password).await?;
    let orders = client.orders_for_seller(session.id).await?;

    let orders: Vec<_> = orders
        .into_iter()
        .filter(|o| wanted.is_none_or(|w| o.effective_status() == w))
        .collect();

    if orders.is_empty() {
        println!("No orders found");
        return Ok(());
    }

    println!(
        "{:<8} {:<12} {:<10} {:<8} {:>6} {:>12} {:<10} {:<10}",
        "Order", "Date", "Type", "Buyer", "Qty", "Total", "Status", "Payment"
    );
    for order in &orders {
        println!(
            "{:<8} {:<12} {:<10} {:<8} {:>6} {:>12} {:<10} {:<10}",
            order.id,
            order
                .created_at
                .map_or_else(String::new, |d| d.format("%Y-%m-%d").to_string()),
            order.order_type.to_string(),
            order.buyer_id,
            order.total_quantity(),
            order.total_amount().to_string(),
            order.effective_status().to_string(),
            order.effective_payment_status().to_string(),
        );
        for item in &order.line_items {
            println!(
                "    line {:<6} product {:<8} qty {:>4} @ {:>10}  {}",
                item.id,
                item.product_id,
                item.quantity,
                item.unit_price.to_string(),
                item.order_status,
            );
        }
    }
    Ok(())
}

/// Transition one line item, including the shipping sync side effect.
pub async fn set_status(
    email: &str,
    password: Option<&str>,
    order_id: i64,
    line_item_id: i64,
    buyer_id: i64,
    status: &str,
) -> Result<(), CliError> {
    let status = status
        .parse::<OrderStatus>()
        .map_err(CliError::InvalidArgument)?;

    let (client, session) = authenticate(email, password).await?;
    let service = OrderService::new(client);

    let outcome = service
        .set_line_item_status(
            LineItemRef {
                line_item_id: OrderLineItemId::new(line_item_id),
                order_id: OrderId::new(order_id),
                buyer_id: BuyerId::new(buyer_id),
                seller_id: session.id,
            },
            status,
        )
        .await?;

    println!("Line item {line_item_id} on order {order_id} set to {status}");
    if outcome.open_shipping_editor {
        println!("Shipping record updated; review it with: sd-cli shipping show --order-id {order_id}");
    }
    Ok(())
}

/// Show the shipping record for an order.
pub async fn show_shipping(
    email: &str,
    password: Option<&str>,
    order_id: i64,
) -> Result<(), CliError> {
    let (client, session) = authenticate(email, password).await?;
    let rows = client.shipping_for_order(OrderId::new(order_id)).await?;

    let Some(record) = pick_for_seller(rows, session.id) else {
        println!("No shipping record for order {order_id} yet");
        return Ok(());
    };

    println!("Order:            {}", record.order_id);
    println!("Status:           {}", record.shipping_status);
    println!("Courier:          {}", record.courier_name);
    println!("Company:          {}", record.courier_company_name);
    println!("Mobile:           {}", record.courier_mobile);
    println!("Tracking:         {}", record.tracking_number);
    println!("Delivery type:    {}", record.delivery_type);
    println!("Weight:           {}", record.total_weight);
    println!("Cost:             {}", record.shipping_cost);
    println!(
        "Estimated:        {}",
        record
            .estimated_delivery_date
            .map_or_else(String::new, |d| d.to_rfc3339())
    );
    println!(
        "Delivered:        {}",
        record
            .actual_delivery_date
            .map_or_else(String::new, |d| d.to_rfc3339())
    );
    println!(
        "Cancelled:        {}",
        record
            .cancelled_date
            .map_or_else(String::new, |d| d.to_rfc3339())
    );
    if !record.remarks.is_empty() {
        println!("Remarks:          {}", record.remarks);
    }
    Ok(())
}
