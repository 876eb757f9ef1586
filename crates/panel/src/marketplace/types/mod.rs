//! Normalized domain types for marketplace resources.
//!
//! Everything in this module is the post-normalization shape: statuses are
//! canonical enums, line items are already filtered to the session seller,
//! and timestamps are parsed. The lenient wire structs that absorb backend
//! inconsistency live next to the resource modules and in
//! [`conversions`](super::conversions).

pub mod order;
pub mod package;
pub mod seller;
pub mod shipping;
pub mod stock;

pub use order::{LineItemRef, Order, OrderLineItem};
pub use package::PackageRecord;
pub use seller::{ProfileFileUpload, ProfileForm, SellerSession};
pub use shipping::{ShippingContext, ShippingForm, ShippingRecord};
pub use stock::{NewStockItem, StockItem, StockQuantityUpdate};
