//! Catalog resources: categories, subcategories, seller products.
//!
//! The dashboard only needs counts from these endpoints; the orders screen
//! additionally uses the product list to show display names.

use std::collections::HashMap;

use sellerdesk_core::{ProductId, SellerId};
use serde::Deserialize;
use serde_json::Value;

use super::{MarketplaceClient, MarketplaceError, unwrap_list};

/// A catalog entry reduced to what the panel displays.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogEntry {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
}

impl MarketplaceClient {
    /// Count the categories visible to sellers.
    ///
    /// # Errors
    ///
    /// Returns error on transport failure or a non-2xx response.
    pub async fn categories_count(&self) -> Result<usize, MarketplaceError> {
        let value: Value = self.get("/categories").await?;
        let rows: Vec<CatalogEntry> = unwrap_list(value, &["categories"]);
        Ok(rows.len())
    }

    /// Count the subcategories visible to sellers.
    ///
    /// # Errors
    ///
    /// Returns error on transport failure or a non-2xx response.
    pub async fn subcategories_count(&self) -> Result<usize, MarketplaceError> {
        let value: Value = self.get("/subcategories").await?;
        let rows: Vec<CatalogEntry> = unwrap_list(value, &["subcategories"]);
        Ok(rows.len())
    }

    /// Fetch the seller's products.
    ///
    /// # Errors
    ///
    /// Returns error on transport failure or a non-2xx response.
    pub async fn products_for_seller(
        &self,
        seller_id: SellerId,
    ) -> Result<Vec<CatalogEntry>, MarketplaceError> {
        let value: Value = self.get(&format!("/product_seller/{seller_id}")).await?;
        Ok(unwrap_list(value, &["products"]))
    }

    /// Product display names for the seller, keyed by product id.
    ///
    /// # Errors
    ///
    /// Returns error on transport failure or a non-2xx response.
    pub async fn product_names(
        &self,
        seller_id: SellerId,
    ) -> Result<HashMap<ProductId, String>, MarketplaceError> {
        let products = self.products_for_seller(seller_id).await?;
        Ok(products
            .into_iter()
            .map(|p| {
                let name = p.name.unwrap_or_else(|| format!("Product {}", p.id));
                (ProductId::new(p.id), name)
            })
            .collect())
    }
}
