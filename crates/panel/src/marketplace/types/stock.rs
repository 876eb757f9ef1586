//! Stock item types.

use sellerdesk_core::{ProductId, SellerId, StockItemId};
use serde::{Deserialize, Serialize};

/// One stock row for a seller's product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockItem {
    pub id: StockItemId,
    pub seller_id: Option<SellerId>,
    pub product_id: Option<ProductId>,
    pub quantity: i64,
}

/// Payload for creating a stock row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewStockItem {
    pub seller_id: SellerId,
    pub product_id: ProductId,
    pub quantity: i64,
}

/// Payload for updating a stock row's quantity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockQuantityUpdate {
    pub quantity: i64,
}
