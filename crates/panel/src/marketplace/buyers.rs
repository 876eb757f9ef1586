//! Buyer display names.
//!
//! Orders reference buyers by id only; this endpoint backfills names for
//! display. Callers treat a failure here as "no names", never an error.

use std::collections::HashMap;

use sellerdesk_core::BuyerId;
use serde::Deserialize;
use serde_json::Value;

use super::{MarketplaceClient, MarketplaceError, unwrap_list};

#[derive(Debug, Deserialize)]
struct RawBuyer {
    id: i64,
    #[serde(default)]
    name: Option<String>,
}

impl MarketplaceClient {
    /// Buyer display names keyed by buyer id.
    ///
    /// # Errors
    ///
    /// Returns error on transport failure or a non-2xx response.
    pub async fn buyer_names(&self) -> Result<HashMap<BuyerId, String>, MarketplaceError> {
        let value: Value = self.get("/buyers").await?;
        let rows: Vec<RawBuyer> = unwrap_list(value, &["buyers"]);
        Ok(rows
            .into_iter()
            .map(|b| {
                let name = b.name.unwrap_or_else(|| format!("Buyer {}", b.id));
                (BuyerId::new(b.id), name)
            })
            .collect())
    }
}
