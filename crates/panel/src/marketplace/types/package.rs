//! Package purchase history types.

use chrono::{DateTime, Utc};
use sellerdesk_core::Money;
use serde::{Deserialize, Serialize};

/// One package purchase record from the seller's history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageRecord {
    pub package_name: String,
    pub package_price: Money,
    pub amount_paid: Money,
    pub payment_mode: String,
    pub status: String,
    pub package_start_date: Option<DateTime<Utc>>,
    pub package_end_date: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
}

impl PackageRecord {
    /// Sort key for the history listing: creation time, falling back to the
    /// package start date. Records with neither sort last.
    #[must_use]
    pub fn sort_key(&self) -> Option<DateTime<Utc>> {
        self.created_at.or(self.package_start_date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_sort_key_prefers_created_at() {
        let created = Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).single();
        let started = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).single();
        let record = PackageRecord {
            package_name: "Gold".to_string(),
            package_price: Money::ZERO,
            amount_paid: Money::ZERO,
            payment_mode: String::new(),
            status: String::new(),
            package_start_date: started,
            package_end_date: None,
            created_at: created,
        };
        assert_eq!(record.sort_key(), created);

        let record = PackageRecord {
            created_at: None,
            ..record
        };
        assert_eq!(record.sort_key(), started);
    }
}
