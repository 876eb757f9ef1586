//! Order lifecycle orchestration.
//!
//! Transitioning a line item's status has a side effect on the order's
//! shipping record: certain statuses stamp the matching shipping status
//! and timestamp. The status PATCH is the primary operation and is awaited
//! first; the shipping sync that follows is best-effort and must never
//! fail the transition. Within the sync, create runs before patch because
//! the patch needs the record to exist.

use chrono::{DateTime, Utc};
use sellerdesk_core::{BuyerId, OrderId, OrderStatus, SellerId, ShippingStatus};
use tracing::instrument;

use crate::marketplace::shipping::ShippingPatch;
use crate::marketplace::{
    LineItemRef, MarketplaceClient, MarketplaceError, ShippingForm, conversions,
    shipping::pick_for_seller,
};

/// Result of a status transition.
#[derive(Debug, Clone, Copy)]
pub struct StatusUpdateOutcome {
    /// The caller should open the shipping editor (transition was Shipped).
    pub open_shipping_editor: bool,
}

/// Order lifecycle service.
#[derive(Debug, Clone)]
pub struct OrderService {
    client: MarketplaceClient,
}

impl OrderService {
    /// Create a new order service.
    #[must_use]
    pub const fn new(client: MarketplaceClient) -> Self {
        Self { client }
    }

    /// Transition one line item to a new status.
    ///
    /// The status PATCH must succeed before anything else happens; on
    /// failure the error is surfaced and no shipping write is attempted.
    /// On success the shipping sync runs best-effort.
    ///
    /// # Errors
    ///
    /// Returns error when the status PATCH itself fails.
    #[instrument(skip(self), fields(line_item = %item.line_item_id, status = %new_status))]
    pub async fn set_line_item_status(
        &self,
        item: LineItemRef,
        new_status: OrderStatus,
    ) -> Result<StatusUpdateOutcome, MarketplaceError> {
        self.client
            .update_line_item_status(item.line_item_id, new_status)
            .await?;

        self.sync_shipping_for_status(&item, new_status).await;

        Ok(StatusUpdateOutcome {
            open_shipping_editor: new_status == OrderStatus::Shipped,
        })
    }

    /// Derive the shipping patch a status transition implies.
    ///
    /// Statuses outside the three shipping-relevant ones imply nothing.
    #[must_use]
    pub fn shipping_patch_for_status(
        status: OrderStatus,
        now: DateTime<Utc>,
    ) -> Option<ShippingPatch> {
        match status {
            OrderStatus::Shipped => Some(ShippingPatch {
                shipping_status: Some(ShippingStatus::Shipped),
                estimated_delivery_date: Some(Some(now)),
                ..ShippingPatch::default()
            }),
            OrderStatus::Delivered => Some(ShippingPatch {
                shipping_status: Some(ShippingStatus::Delivered),
                actual_delivery_date: Some(Some(now)),
                ..ShippingPatch::default()
            }),
            OrderStatus::Cancelled => Some(ShippingPatch {
                shipping_status: Some(ShippingStatus::Cancelled),
                cancelled_date: Some(Some(now)),
                ..ShippingPatch::default()
            }),
            _ => None,
        }
    }

    /// Best-effort shipping sync: create-if-absent, then patch.
    async fn sync_shipping_for_status(&self, item: &LineItemRef, status: OrderStatus) {
        let Some(patch) = Self::shipping_patch_for_status(status, Utc::now()) else {
            return;
        };

        if let Err(e) = self
            .client
            .create_shipping(item.order_id, item.buyer_id)
            .await
        {
            tracing::warn!(
                order_id = %item.order_id,
                error = %e,
                "Shipping create failed (continuing to PATCH, record may exist)"
            );
        }

        if let Err(e) = self
            .client
            .update_shipping(item.order_id, item.seller_id, patch)
            .await
        {
            tracing::warn!(
                order_id = %item.order_id,
                seller_id = %item.seller_id,
                error = %e,
                "Shipping status sync PATCH failed"
            );
        }
    }

    /// Load the shipping editor form for (order, seller).
    ///
    /// Picks the seller's row, falling back to the first row, falling back
    /// to a blank form when no record exists yet.
    ///
    /// # Errors
    ///
    /// Returns error on transport failure or an unexpected non-2xx
    /// response (absence is not an error).
    pub async fn open_shipping_editor(
        &self,
        order_id: OrderId,
        seller_id: SellerId,
    ) -> Result<ShippingForm, MarketplaceError> {
        let rows = self.client.shipping_for_order(order_id).await?;
        Ok(pick_for_seller(rows, seller_id)
            .map_or_else(ShippingForm::default, |row| conversions::record_to_form(&row)))
    }

    /// Submit the shipping editor form for (order, buyer, seller).
    ///
    /// Create is best-effort; the PATCH is authoritative and its failure
    /// surfaces to the caller.
    ///
    /// # Errors
    ///
    /// Returns error when the authoritative PATCH fails.
    #[instrument(skip(self, form), fields(order_id = %order_id, seller_id = %seller_id))]
    pub async fn submit_shipping(
        &self,
        order_id: OrderId,
        buyer_id: BuyerId,
        seller_id: SellerId,
        form: ShippingForm,
    ) -> Result<(), MarketplaceError> {
        if let Err(e) = self.client.create_shipping(order_id, buyer_id).await {
            tracing::warn!(
                order_id = %order_id,
                error = %e,
                "Shipping create failed (continuing to PATCH, record may exist)"
            );
        }

        let patch = Self::form_to_patch(form, Utc::now());
        self.client
            .update_shipping(order_id, seller_id, patch)
            .await
    }

    /// Convert the editor form into the authoritative patch.
    ///
    /// Date-only inputs become midnight-UTC timestamps. A Delivered form
    /// without an actual delivery date gets `now`, as does a Cancelled
    /// form without a cancellation date.
    #[must_use]
    pub fn form_to_patch(form: ShippingForm, now: DateTime<Utc>) -> ShippingPatch {
        let estimated = conversions::date_input_to_timestamp(&form.estimated_delivery_date);
        let mut actual = conversions::date_input_to_timestamp(&form.actual_delivery_date);
        let mut cancelled = conversions::date_input_to_timestamp(&form.cancelled_date);

        match form.shipping_status {
            ShippingStatus::Delivered => actual = actual.or(Some(now)),
            ShippingStatus::Cancelled => cancelled = cancelled.or(Some(now)),
            ShippingStatus::Shipped | ShippingStatus::InTransit => {}
        }

        ShippingPatch {
            courier_name: Some(form.courier_name),
            courier_company_name: Some(form.courier_company_name),
            courier_mobile: Some(form.courier_mobile),
            tracking_number: Some(form.tracking_number),
            shipping_address: Some(form.shipping_address),
            delivery_type: Some(form.delivery_type),
            total_weight: Some(form.total_weight),
            shipping_cost: Some(form.shipping_cost),
            shipping_status: Some(form.shipping_status),
            remarks: Some(form.remarks),
            estimated_delivery_date: Some(estimated),
            actual_delivery_date: Some(actual),
            cancelled_date: Some(cancelled),
        }
    }
}
