//! Stock item resources.

use sellerdesk_core::{ProductId, SellerId, StockItemId};
use serde::Deserialize;
use serde_json::{Value, json};

use super::types::{NewStockItem, StockItem};
use super::{MarketplaceClient, MarketplaceError, unwrap_list};

#[derive(Debug, Deserialize)]
struct RawStockItem {
    id: i64,
    #[serde(default)]
    seller_id: Option<i64>,
    #[serde(default)]
    product_id: Option<i64>,
    #[serde(default)]
    quantity: Value,
}

fn lenient_count(value: &Value) -> i64 {
    match value {
        Value::Number(n) => n.as_i64().unwrap_or(0),
        Value::String(s) => s.trim().parse().unwrap_or(0),
        _ => 0,
    }
}

impl MarketplaceClient {
    /// Fetch stock rows, scoped to one seller when an id is given.
    ///
    /// # Errors
    ///
    /// Returns error on transport failure or a non-2xx response other than
    /// 404/204 (which yield an empty list).
    pub async fn stock(
        &self,
        seller_id: Option<SellerId>,
    ) -> Result<Vec<StockItem>, MarketplaceError> {
        let path = seller_id.map_or_else(|| "/stock".to_string(), |id| format!("/stock/{id}"));
        let Some(value) = self.get_optional(&path).await? else {
            return Ok(Vec::new());
        };
        let raw: Vec<RawStockItem> = unwrap_list(value, &["stock", "stocks"]);
        Ok(raw
            .into_iter()
            .map(|r| StockItem {
                id: StockItemId::new(r.id),
                seller_id: r.seller_id.map(SellerId::new),
                product_id: r.product_id.map(ProductId::new),
                quantity: lenient_count(&r.quantity),
            })
            .collect())
    }

    /// Create a stock row.
    ///
    /// # Errors
    ///
    /// Returns error on transport failure or a non-2xx response.
    pub async fn create_stock(&self, item: &NewStockItem) -> Result<(), MarketplaceError> {
        self.post_unit("/stock", item).await
    }

    /// Update a stock row's quantity.
    ///
    /// # Errors
    ///
    /// Returns error on transport failure or a non-2xx response.
    pub async fn update_stock(
        &self,
        id: StockItemId,
        quantity: i64,
    ) -> Result<(), MarketplaceError> {
        self.patch_unit(&format!("/stock/{id}"), &json!({ "quantity": quantity }))
            .await
    }

    /// Delete a stock row.
    ///
    /// # Errors
    ///
    /// Returns error on transport failure or a non-2xx response.
    pub async fn delete_stock(&self, id: StockItemId) -> Result<(), MarketplaceError> {
        self.delete(&format!("/stock/{id}")).await
    }
}
