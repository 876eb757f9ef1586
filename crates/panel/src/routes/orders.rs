//! Order management handlers.
//!
//! The order list is always served freshly normalized from upstream; every
//! mutation answers with a re-fetched list rather than patching local
//! state, so the last write observed after a re-fetch is authoritative.

use std::collections::HashMap;

use axum::{
    Json,
    extract::{Path, Query, State},
};
use chrono::{DateTime, Utc};
use sellerdesk_core::{
    BuyerId, Money, OrderId, OrderLineItemId, OrderStatus, OrderType, PaymentStatus, ProductId,
    SellerId,
};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use crate::error::AppError;
use crate::marketplace::{LineItemRef, Order, ShippingContext, ShippingForm};
use crate::middleware::RequireApprovedSeller;
use crate::middleware::auth::{clear_shipping_context, set_shipping_context, shipping_context};
use crate::routes::dashboard::OrderStats;
use crate::state::AppState;

// =============================================================================
// Views
// =============================================================================

/// One order as rendered in the listing.
#[derive(Debug, Serialize)]
pub struct OrderView {
    pub id: OrderId,
    pub created_at: Option<DateTime<Utc>>,
    pub order_type: OrderType,
    pub buyer_id: BuyerId,
    pub buyer_name: String,
    pub order_status: OrderStatus,
    pub payment_status: PaymentStatus,
    pub total_quantity: u32,
    pub total_amount: Money,
    pub line_items: Vec<LineItemView>,
}

/// One line item as rendered in the expanded order row.
#[derive(Debug, Serialize)]
pub struct LineItemView {
    pub id: OrderLineItemId,
    pub product_id: ProductId,
    pub product_name: String,
    pub quantity: u32,
    pub unit_price: Money,
    pub line_total: Money,
    pub order_status: OrderStatus,
    pub payment_status: PaymentStatus,
}

/// Display-name maps, filled best-effort.
#[derive(Debug, Default)]
struct NameMaps {
    buyers: HashMap<BuyerId, String>,
    products: HashMap<ProductId, String>,
}

fn build_view(order: &Order, names: &NameMaps) -> OrderView {
    OrderView {
        id: order.id,
        created_at: order.created_at,
        order_type: order.order_type,
        buyer_id: order.buyer_id,
        buyer_name: names
            .buyers
            .get(&order.buyer_id)
            .cloned()
            .unwrap_or_else(|| format!("Buyer {}", order.buyer_id)),
        order_status: order.effective_status(),
        payment_status: order.effective_payment_status(),
        total_quantity: order.total_quantity(),
        total_amount: order.total_amount(),
        line_items: order
            .line_items
            .iter()
            .map(|item| LineItemView {
                id: item.id,
                product_id: item.product_id,
                product_name: names
                    .products
                    .get(&item.product_id)
                    .cloned()
                    .unwrap_or_else(|| format!("Product {}", item.product_id)),
                quantity: item.quantity,
                unit_price: item.unit_price,
                line_total: item.line_total(),
                order_status: item.order_status,
                payment_status: item.payment_status,
            })
            .collect(),
    }
}

async fn name_maps(state: &AppState, seller_id: SellerId) -> NameMaps {
    let (buyers, products) = tokio::join!(
        state.marketplace().buyer_names(),
        state.marketplace().product_names(seller_id),
    );
    NameMaps {
        buyers: buyers.unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Buyer name fetch failed");
            HashMap::new()
        }),
        products: products.unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Product name fetch failed");
            HashMap::new()
        }),
    }
}

/// Re-fetch and decorate the full order list for a seller.
async fn fetch_views(state: &AppState, seller_id: SellerId) -> Result<Vec<OrderView>, AppError> {
    let orders = state.marketplace().orders_for_seller(seller_id).await?;
    let names = name_maps(state, seller_id).await;
    Ok(orders.iter().map(|o| build_view(o, &names)).collect())
}

// =============================================================================
// Listing
// =============================================================================

/// Listing filters; `all` (or absence) disables a filter.
#[derive(Debug, Default, Deserialize)]
pub struct OrderFilters {
    pub status: Option<String>,
    pub order_type: Option<String>,
}

fn filter_active(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim)
        .filter(|v| !v.is_empty() && !v.eq_ignore_ascii_case("all"))
}

/// Apply listing filters to normalized orders.
fn filter_orders(orders: Vec<Order>, filters: &OrderFilters) -> Vec<Order> {
    let status = filter_active(filters.status.as_deref());
    let order_type = filter_active(filters.order_type.as_deref());

    orders
        .into_iter()
        .filter(|order| {
            status.is_none_or(|wanted| {
                order
                    .effective_status()
                    .as_str()
                    .eq_ignore_ascii_case(wanted)
            })
        })
        .filter(|order| {
            order_type.is_none_or(|wanted| {
                order.order_type.as_str().eq_ignore_ascii_case(wanted)
            })
        })
        .collect()
}

/// Order listing response.
#[derive(Debug, Serialize)]
pub struct OrderListResponse {
    pub orders: Vec<OrderView>,
    pub stats: OrderStats,
}

/// List the seller's orders, filtered and decorated.
///
/// Stats are computed over the unfiltered list so filter dropdown counts
/// stay stable while a filter is active.
#[instrument(skip(state, seller), fields(seller_id = %seller.id))]
pub async fn list(
    State(state): State<AppState>,
    RequireApprovedSeller(seller): RequireApprovedSeller,
    Query(filters): Query<OrderFilters>,
) -> Result<Json<OrderListResponse>, AppError> {
    let orders = state.marketplace().orders_for_seller(seller.id).await?;
    let stats = OrderStats::tally(&orders);
    let names = name_maps(&state, seller.id).await;

    let views = filter_orders(orders, &filters)
        .iter()
        .map(|o| build_view(o, &names))
        .collect();

    Ok(Json(OrderListResponse {
        orders: views,
        stats,
    }))
}

// =============================================================================
// Status transition
// =============================================================================

/// Body for a line-item status transition.
#[derive(Debug, Deserialize)]
pub struct StatusUpdateInput {
    pub order_status: OrderStatus,
    pub buyer_id: BuyerId,
}

/// An open shipping editor: its context plus the seeded form.
#[derive(Debug, Serialize)]
pub struct ShippingEditor {
    pub context: ShippingContext,
    pub form: ShippingForm,
}

/// Response to a status transition: the re-fetched list, plus the shipping
/// editor when the transition was Shipped.
#[derive(Debug, Serialize)]
pub struct StatusUpdateResponse {
    pub orders: Vec<OrderView>,
    pub shipping: Option<ShippingEditor>,
}

/// Transition one line item's order status.
#[instrument(skip(state, seller, session, input), fields(seller_id = %seller.id))]
pub async fn update_status(
    State(state): State<AppState>,
    RequireApprovedSeller(seller): RequireApprovedSeller,
    session: Session,
    Path((order_id, line_item_id)): Path<(OrderId, OrderLineItemId)>,
    Json(input): Json<StatusUpdateInput>,
) -> Result<Json<StatusUpdateResponse>, AppError> {
    let item = LineItemRef {
        line_item_id,
        order_id,
        buyer_id: input.buyer_id,
        seller_id: seller.id,
    };

    let outcome = state
        .orders()
        .set_line_item_status(item, input.order_status)
        .await?;

    let orders = fetch_views(&state, seller.id).await?;

    let shipping = if outcome.open_shipping_editor {
        let context = ShippingContext {
            order_id,
            buyer_id: input.buyer_id,
            seller_id: seller.id,
        };
        // Capture the context before the editor fetch so a racing submit
        // resolves against this order
        set_shipping_context(&session, context)
            .await
            .map_err(|e| AppError::Internal(e.to_string()))?;

        let form = state
            .orders()
            .open_shipping_editor(order_id, seller.id)
            .await?;
        Some(ShippingEditor { context, form })
    } else {
        None
    };

    Ok(Json(StatusUpdateResponse { orders, shipping }))
}

// =============================================================================
// Order type
// =============================================================================

/// Body for an order-type change.
#[derive(Debug, Deserialize)]
pub struct OrderTypeInput {
    pub order_type: OrderType,
}

/// Toggle an order between order and inquiry.
///
/// The list is re-fetched whether the PATCH succeeded or not, so the
/// caller always sees the backend's view of the type.
#[instrument(skip(state, seller, input), fields(seller_id = %seller.id))]
pub async fn update_order_type(
    State(state): State<AppState>,
    RequireApprovedSeller(seller): RequireApprovedSeller,
    Path(order_id): Path<OrderId>,
    Json(input): Json<OrderTypeInput>,
) -> Result<Json<OrderListResponse>, AppError> {
    let update_result = state
        .marketplace()
        .update_order_type(order_id, input.order_type)
        .await;

    // Re-fetch on success and failure alike; the backend's view of the
    // type is what the caller ends up seeing.
    let orders = state.marketplace().orders_for_seller(seller.id).await?;

    update_result?;

    let stats = OrderStats::tally(&orders);
    let names = name_maps(&state, seller.id).await;
    Ok(Json(OrderListResponse {
        orders: orders.iter().map(|o| build_view(o, &names)).collect(),
        stats,
    }))
}

// =============================================================================
// Shipping editor
// =============================================================================

/// Query params for opening the shipping editor.
#[derive(Debug, Deserialize)]
pub struct OpenShippingParams {
    pub buyer_id: Option<BuyerId>,
    pub seller_id: Option<SellerId>,
}

/// Open the shipping editor for an order.
///
/// Requires a buyer id; without one this is a no-op rejection and no
/// upstream call is made. An order with no shipping record yet opens a
/// blank form.
#[instrument(skip(state, seller, session, params), fields(seller_id = %seller.id))]
pub async fn open_shipping(
    State(state): State<AppState>,
    RequireApprovedSeller(seller): RequireApprovedSeller,
    session: Session,
    Path(order_id): Path<OrderId>,
    Query(params): Query<OpenShippingParams>,
) -> Result<Json<ShippingEditor>, AppError> {
    let Some(buyer_id) = params.buyer_id else {
        return Err(AppError::BadRequest(
            "buyer_id is required to open the shipping editor".to_string(),
        ));
    };

    let context = ShippingContext {
        order_id,
        buyer_id,
        seller_id: params.seller_id.unwrap_or(seller.id),
    };

    // Capture the context before any await on the editor fetch
    set_shipping_context(&session, context)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    let form = state
        .orders()
        .open_shipping_editor(order_id, context.seller_id)
        .await?;

    Ok(Json(ShippingEditor { context, form }))
}

/// Body for a shipping editor submit.
///
/// Ids are optional: absent ones resolve from the last-opened editor
/// context in the session.
#[derive(Debug, Deserialize)]
pub struct SubmitShippingInput {
    pub order_id: Option<OrderId>,
    pub buyer_id: Option<BuyerId>,
    pub seller_id: Option<SellerId>,
    #[serde(default)]
    pub form: ShippingForm,
}

/// Response to a successful shipping submit.
#[derive(Debug, Serialize)]
pub struct SubmitShippingResponse {
    pub orders: Vec<OrderView>,
}

/// Submit the shipping editor.
///
/// With neither explicit ids nor a prior editor open, nothing is sent
/// upstream. On success the stored context is cleared and the re-fetched
/// order list is returned; on failure the context survives so the editor
/// can retry.
#[instrument(skip(state, seller, session, input), fields(seller_id = %seller.id))]
pub async fn submit_shipping(
    State(state): State<AppState>,
    RequireApprovedSeller(seller): RequireApprovedSeller,
    session: Session,
    Json(input): Json<SubmitShippingInput>,
) -> Result<Json<SubmitShippingResponse>, AppError> {
    let stored = shipping_context(&session).await;

    let order_id = input.order_id.or(stored.map(|c| c.order_id));
    let buyer_id = input.buyer_id.or(stored.map(|c| c.buyer_id));
    let seller_id = input
        .seller_id
        .or(stored.map(|c| c.seller_id))
        .unwrap_or(seller.id);

    let (Some(order_id), Some(buyer_id)) = (order_id, buyer_id) else {
        return Err(AppError::BadRequest(
            "order and buyer ids could not be resolved; open the shipping editor first"
                .to_string(),
        ));
    };

    state
        .orders()
        .submit_shipping(order_id, buyer_id, seller_id, input.form)
        .await?;

    clear_shipping_context(&session)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    let orders = fetch_views(&state, seller.id).await?;
    Ok(Json(SubmitShippingResponse { orders }))
}
