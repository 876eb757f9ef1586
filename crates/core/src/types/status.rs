//! Status enumerations for orders, payments, and shipping.
//!
//! The marketplace API stores every status as free text and is not
//! consistent about casing, so each enum here pairs its canonical spelling
//! with a lenient parser: [`normalize_to_allowed`] trims the input, matches
//! it case-insensitively against the allowed set, and falls back to a
//! designated default member. Unrecognized input never propagates past
//! this module.

use serde::{Deserialize, Serialize};

/// Normalize an arbitrary value against a fixed allowed set.
///
/// Trims the input and matches it case-insensitively against `allowed`,
/// returning the canonical-cased member on match and `fallback` otherwise.
/// Pure and total: never panics, and the result is always a member of
/// `allowed` or the fallback.
#[must_use]
pub fn normalize_to_allowed<'a>(
    value: Option<&str>,
    allowed: &[&'a str],
    fallback: &'a str,
) -> &'a str {
    let Some(raw) = value else { return fallback };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return fallback;
    }
    allowed
        .iter()
        .find(|candidate| candidate.eq_ignore_ascii_case(trimmed))
        .copied()
        .unwrap_or(fallback)
}

/// Lifecycle status of one order line item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum OrderStatus {
    #[default]
    New,
    Pending,
    Confirmed,
    Shipped,
    Delivered,
    Cancelled,
    Returned,
}

impl OrderStatus {
    /// All allowed statuses, in lifecycle order.
    pub const ALL: [Self; 7] = [
        Self::New,
        Self::Pending,
        Self::Confirmed,
        Self::Shipped,
        Self::Delivered,
        Self::Cancelled,
        Self::Returned,
    ];

    /// Canonical spelling used on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::New => "New",
            Self::Pending => "Pending",
            Self::Confirmed => "Confirmed",
            Self::Shipped => "Shipped",
            Self::Delivered => "Delivered",
            Self::Cancelled => "Cancelled",
            Self::Returned => "Returned",
        }
    }

    /// Parse free text, falling back to [`OrderStatus::New`] on no match.
    #[must_use]
    pub fn parse_lenient(value: Option<&str>) -> Self {
        match_lenient(value, &Self::ALL, Self::New, Self::as_str)
    }
}

/// Payment status of one order line item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PaymentStatus {
    #[default]
    Pending,
    Paid,
    Failed,
    Refunded,
    Cancelled,
}

impl PaymentStatus {
    /// All allowed payment statuses.
    pub const ALL: [Self; 5] = [
        Self::Pending,
        Self::Paid,
        Self::Failed,
        Self::Refunded,
        Self::Cancelled,
    ];

    /// Canonical spelling used on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Paid => "Paid",
            Self::Failed => "Failed",
            Self::Refunded => "Refunded",
            Self::Cancelled => "Cancelled",
        }
    }

    /// Parse free text, falling back to [`PaymentStatus::Pending`].
    #[must_use]
    pub fn parse_lenient(value: Option<&str>) -> Self {
        match_lenient(value, &Self::ALL, Self::Pending, Self::as_str)
    }
}

/// Kind of order record.
///
/// The backend spells the inquiry variant in lowercase; that spelling is
/// preserved on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum OrderType {
    #[default]
    Order,
    #[serde(rename = "inquiry")]
    Inquiry,
}

impl OrderType {
    /// All allowed order types.
    pub const ALL: [Self; 2] = [Self::Order, Self::Inquiry];

    /// Canonical spelling used on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Order => "Order",
            Self::Inquiry => "inquiry",
        }
    }

    /// Parse free text, falling back to [`OrderType::Order`].
    #[must_use]
    pub fn parse_lenient(value: Option<&str>) -> Self {
        match_lenient(value, &Self::ALL, Self::Order, Self::as_str)
    }

    /// The other order type (the panel toggles between the two).
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Order => Self::Inquiry,
            Self::Inquiry => Self::Order,
        }
    }
}

/// Delivery state of a shipping record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ShippingStatus {
    #[default]
    Shipped,
    #[serde(rename = "In Transit")]
    InTransit,
    Delivered,
    Cancelled,
}

impl ShippingStatus {
    /// All allowed shipping statuses.
    pub const ALL: [Self; 4] = [
        Self::Shipped,
        Self::InTransit,
        Self::Delivered,
        Self::Cancelled,
    ];

    /// Canonical spelling used on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Shipped => "Shipped",
            Self::InTransit => "In Transit",
            Self::Delivered => "Delivered",
            Self::Cancelled => "Cancelled",
        }
    }

    /// Parse free text, falling back to [`ShippingStatus::Shipped`].
    #[must_use]
    pub fn parse_lenient(value: Option<&str>) -> Self {
        match_lenient(value, &Self::ALL, Self::Shipped, Self::as_str)
    }
}

/// Delivery speed selected for a shipment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum DeliveryType {
    #[default]
    Standard,
    Express,
}

impl DeliveryType {
    /// All allowed delivery types.
    pub const ALL: [Self; 2] = [Self::Standard, Self::Express];

    /// Canonical spelling used on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Standard => "Standard",
            Self::Express => "Express",
        }
    }

    /// Parse free text, falling back to [`DeliveryType::Standard`].
    #[must_use]
    pub fn parse_lenient(value: Option<&str>) -> Self {
        match_lenient(value, &Self::ALL, Self::Standard, Self::as_str)
    }
}

/// Seller account moderation state.
///
/// The backend treats this as free text, so the raw value is kept verbatim
/// and only the approval check is normalized. Most panel sections are gated
/// on [`ApprovalStatus::is_approved`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApprovalStatus(String);

impl ApprovalStatus {
    /// Wrap a raw approval status value.
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The raw backend value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the account has been approved (case-insensitive match).
    #[must_use]
    pub fn is_approved(&self) -> bool {
        self.0.trim().eq_ignore_ascii_case("approved")
    }

    /// Case-insensitive equality against another raw status value.
    #[must_use]
    pub fn matches(&self, other: &str) -> bool {
        self.0.trim().eq_ignore_ascii_case(other.trim())
    }
}

impl Default for ApprovalStatus {
    fn default() -> Self {
        Self("Pending".to_string())
    }
}

impl std::fmt::Display for ApprovalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Shared lenient matcher: [`normalize_to_allowed`] over an enum's
/// canonical spellings, mapped back to the variant.
fn match_lenient<T: Copy>(
    value: Option<&str>,
    all: &[T],
    fallback: T,
    as_str: impl Fn(T) -> &'static str,
) -> T {
    let spellings: Vec<&str> = all.iter().map(|candidate| as_str(*candidate)).collect();
    let chosen = normalize_to_allowed(value, &spellings, as_str(fallback));
    all.iter()
        .find(|candidate| as_str(**candidate) == chosen)
        .copied()
        .unwrap_or(fallback)
}

macro_rules! impl_status_display {
    ($($name:ident),+ $(,)?) => {
        $(
            impl std::fmt::Display for $name {
                fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    f.write_str(self.as_str())
                }
            }

            impl std::str::FromStr for $name {
                type Err = String;

                fn from_str(s: &str) -> Result<Self, Self::Err> {
                    Self::ALL
                        .iter()
                        .find(|candidate| candidate.as_str().eq_ignore_ascii_case(s.trim()))
                        .copied()
                        .ok_or_else(|| format!("invalid {}: {s}", stringify!($name)))
                }
            }
        )+
    };
}

impl_status_display!(
    OrderStatus,
    PaymentStatus,
    OrderType,
    ShippingStatus,
    DeliveryType,
);
