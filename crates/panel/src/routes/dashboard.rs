//! Dashboard handler: catalog counts and order statistics.

use axum::{Json, extract::State};
use sellerdesk_core::{OrderStatus, OrderType};
use serde::Serialize;
use tracing::instrument;

use crate::error::AppError;
use crate::marketplace::Order;
use crate::middleware::RequireSeller;
use crate::state::AppState;

/// Per-status and per-type order counts.
#[derive(Debug, Default, Serialize, PartialEq, Eq)]
pub struct OrderStats {
    pub total_orders: usize,
    pub new_orders: usize,
    pub pending_orders: usize,
    pub confirmed_orders: usize,
    pub shipped_orders: usize,
    pub delivered_orders: usize,
    pub cancelled_orders: usize,
    pub returned_orders: usize,
    pub order_orders: usize,
    pub inquiry_orders: usize,
}

impl OrderStats {
    /// Tally normalized orders by effective status and order type.
    #[must_use]
    pub fn tally(orders: &[Order]) -> Self {
        let mut stats = Self {
            total_orders: orders.len(),
            ..Self::default()
        };
        for order in orders {
            match order.effective_status() {
                OrderStatus::New => stats.new_orders += 1,
                OrderStatus::Pending => stats.pending_orders += 1,
                OrderStatus::Confirmed => stats.confirmed_orders += 1,
                OrderStatus::Shipped => stats.shipped_orders += 1,
                OrderStatus::Delivered => stats.delivered_orders += 1,
                OrderStatus::Cancelled => stats.cancelled_orders += 1,
                OrderStatus::Returned => stats.returned_orders += 1,
            }
            match order.order_type {
                OrderType::Order => stats.order_orders += 1,
                OrderType::Inquiry => stats.inquiry_orders += 1,
            }
        }
        stats
    }
}

/// Dashboard summary payload.
#[derive(Debug, Serialize)]
pub struct DashboardSummary {
    pub categories: usize,
    pub subcategories: usize,
    pub products: usize,
    pub orders: OrderStats,
}

/// Dashboard overview: counts plus order statistics.
///
/// Each count is fetched independently and degrades to zero on failure;
/// only the order fetch is load-bearing enough to surface an error.
#[instrument(skip(state, seller), fields(seller_id = %seller.id))]
pub async fn summary(
    State(state): State<AppState>,
    RequireSeller(seller): RequireSeller,
) -> Result<Json<DashboardSummary>, AppError> {
    let client = state.marketplace();

    let (categories, subcategories, products, orders) = tokio::join!(
        client.categories_count(),
        client.subcategories_count(),
        client.products_for_seller(seller.id),
        client.orders_for_seller(seller.id),
    );

    let categories = categories.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Category count fetch failed");
        0
    });
    let subcategories = subcategories.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Subcategory count fetch failed");
        0
    });
    let products = products.map_or_else(
        |e| {
            tracing::warn!(error = %e, "Product fetch failed");
            0
        },
        |p| p.len(),
    );
    let orders = orders?;

    Ok(Json(DashboardSummary {
        categories,
        subcategories,
        products,
        orders: OrderStats::tally(&orders),
    }))
}
