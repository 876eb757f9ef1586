//! Newtype IDs for type-safe entity references.
//!
//! Use the `define_id!` macro to create type-safe ID wrappers that prevent
//! accidentally mixing IDs from different entity types. The marketplace API
//! identifies every entity by a plain integer, so the wrappers are thin
//! `i64` newtypes with transparent serde.

/// Macro to define a type-safe ID wrapper.
///
/// Creates a newtype wrapper around `i64` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`, `PartialOrd`, `Ord`
/// - Conversion methods: `new()`, `as_i64()`
/// - `From<i64>` and `Into<i64>` implementations
///
/// # Example
///
/// ```rust
/// # use sellerdesk_core::define_id;
/// define_id!(SellerId);
/// define_id!(OrderId);
///
/// let seller_id = SellerId::new(6);
/// let order_id = OrderId::new(9);
///
/// // These are different types, so this won't compile:
/// // let _: SellerId = order_id;
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Create a new ID from an i64 value.
            #[must_use]
            pub const fn new(id: i64) -> Self {
                Self(id)
            }

            /// Get the underlying i64 value.
            #[must_use]
            pub const fn as_i64(&self) -> i64 {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

// Define standard entity IDs
define_id!(SellerId);
define_id!(BuyerId);
define_id!(OrderId);
define_id!(OrderLineItemId);
define_id!(ProductId);
define_id!(CategoryId);
define_id!(SubcategoryId);
define_id!(StockItemId);
define_id!(PackageId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_roundtrip() {
        let id = OrderId::new(42);
        assert_eq!(id.as_i64(), 42);
        assert_eq!(i64::from(id), 42);
        assert_eq!(OrderId::from(42), id);
    }

    #[test]
    fn test_id_display() {
        assert_eq!(SellerId::new(6).to_string(), "6");
    }

    #[test]
    fn test_id_serde_transparent() {
        let id: OrderLineItemId = serde_json::from_str("55").expect("parses from bare integer");
        assert_eq!(id, OrderLineItemId::new(55));
        assert_eq!(serde_json::to_string(&id).expect("serializes"), "55");
    }
}
