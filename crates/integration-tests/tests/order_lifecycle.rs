//! Order lifecycle integration tests: status transitions and the shipping
//! sync side effect, driven through the running panel against a mock
//! upstream.

#![allow(clippy::unwrap_used)]

use serde_json::{Value, json};
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

use sellerdesk_integration_tests::{SELLER_ID, TestContext, mock_names, mock_orders};

async fn mock_status_patch(ctx: &TestContext) {
    Mock::given(method("PATCH"))
        .and(path("/orderProduct/55"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&ctx.upstream)
        .await;
}

async fn mock_shipping_endpoints(ctx: &TestContext) {
    Mock::given(method("POST"))
        .and(path("/shipping/"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&ctx.upstream)
        .await;
    Mock::given(method("PATCH"))
        .and(path(format!("/shipping/9/{SELLER_ID}")))
        .respond_with(ResponseTemplate::new(200))
        .mount(&ctx.upstream)
        .await;
    Mock::given(method("GET"))
        .and(path("/ordershipping/9"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&ctx.upstream)
        .await;
}

async fn transition(ctx: &TestContext, status: &str) -> reqwest::Response {
    ctx.client()
        .post(ctx.url("/orders/9/line-items/55/status"))
        .json(&json!({"order_status": status, "buyer_id": 2}))
        .send()
        .await
        .unwrap()
}

#[tokio::test]
async fn shipped_transition_syncs_shipping_and_opens_editor() {
    let ctx = TestContext::new().await;
    ctx.login("approved").await;
    mock_orders(&ctx.upstream, "Shipped").await;
    mock_names(&ctx.upstream).await;
    mock_status_patch(&ctx).await;
    mock_shipping_endpoints(&ctx).await;

    let resp = transition(&ctx, "Shipped").await;
    assert!(resp.status().is_success());
    let body: Value = resp.json().await.unwrap();

    // Exactly one create attempt followed by exactly one patch
    let creates = ctx.upstream_requests("POST", "/shipping/").await;
    assert_eq!(creates.len(), 1);
    assert_eq!(creates[0]["order_id"], 9);
    assert_eq!(creates[0]["buyer_id"], 2);

    let patches = ctx.upstream_requests("PATCH", "/shipping/9").await;
    assert_eq!(patches.len(), 1);
    assert_eq!(patches[0]["shipping_status"], "Shipped");
    assert!(!patches[0]["estimated_delivery_date"].is_null());

    // The editor opens pre-loaded (blank here, the record GET returned 204)
    assert!(!body["shipping"].is_null());
    assert_eq!(body["shipping"]["context"]["order_id"], 9);
    assert_eq!(body["shipping"]["form"]["shipping_status"], "Shipped");
}

#[tokio::test]
async fn delivered_transition_stamps_actual_delivery_date() {
    let ctx = TestContext::new().await;
    ctx.login("approved").await;
    mock_orders(&ctx.upstream, "Delivered").await;
    mock_names(&ctx.upstream).await;
    mock_status_patch(&ctx).await;
    mock_shipping_endpoints(&ctx).await;

    let resp = transition(&ctx, "Delivered").await;
    assert!(resp.status().is_success());
    let body: Value = resp.json().await.unwrap();

    let patches = ctx.upstream_requests("PATCH", "/shipping/9").await;
    assert_eq!(patches.len(), 1);
    assert_eq!(patches[0]["shipping_status"], "Delivered");
    assert!(!patches[0]["actual_delivery_date"].is_null());

    // No editor for Delivered
    assert!(body["shipping"].is_null());
}

#[tokio::test]
async fn cancelled_transition_writes_both_cancellation_spellings() {
    let ctx = TestContext::new().await;
    ctx.login("approved").await;
    mock_orders(&ctx.upstream, "Cancelled").await;
    mock_names(&ctx.upstream).await;
    mock_status_patch(&ctx).await;
    mock_shipping_endpoints(&ctx).await;

    let resp = transition(&ctx, "Cancelled").await;
    assert!(resp.status().is_success());

    let patches = ctx.upstream_requests("PATCH", "/shipping/9").await;
    assert_eq!(patches.len(), 1);
    assert_eq!(patches[0]["shipping_status"], "Cancelled");
    assert!(!patches[0]["cancelled_date"].is_null());
    assert_eq!(patches[0]["cancelled_date"], patches[0]["canceled_date"]);
}

#[tokio::test]
async fn confirmed_transition_has_no_shipping_side_effect() {
    let ctx = TestContext::new().await;
    ctx.login("approved").await;
    mock_orders(&ctx.upstream, "Confirmed").await;
    mock_names(&ctx.upstream).await;
    mock_status_patch(&ctx).await;
    mock_shipping_endpoints(&ctx).await;

    let resp = transition(&ctx, "Confirmed").await;
    assert!(resp.status().is_success());

    assert!(ctx.upstream_requests("POST", "/shipping/").await.is_empty());
    assert!(ctx.upstream_requests("PATCH", "/shipping/9").await.is_empty());
}

#[tokio::test]
async fn failed_status_patch_surfaces_error_and_skips_shipping_sync() {
    let ctx = TestContext::new().await;
    ctx.login("approved").await;
    mock_orders(&ctx.upstream, "Pending").await;
    mock_names(&ctx.upstream).await;
    mock_shipping_endpoints(&ctx).await;

    Mock::given(method("PATCH"))
        .and(path("/orderProduct/55"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({"message": "update failed"})),
        )
        .mount(&ctx.upstream)
        .await;

    let resp = transition(&ctx, "Shipped").await;
    assert_eq!(resp.status().as_u16(), 502);
    let body: Value = resp.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("update failed"));

    // The primary PATCH failed, so no shipping call was made
    assert!(ctx.upstream_requests("POST", "/shipping/").await.is_empty());
    assert!(ctx.upstream_requests("PATCH", "/shipping/9").await.is_empty());
}

#[tokio::test]
async fn failed_shipping_sync_does_not_fail_the_transition() {
    let ctx = TestContext::new().await;
    ctx.login("approved").await;
    mock_orders(&ctx.upstream, "Delivered").await;
    mock_names(&ctx.upstream).await;
    mock_status_patch(&ctx).await;

    // Both shipping endpoints are broken; the transition must still succeed
    Mock::given(method("POST"))
        .and(path("/shipping/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&ctx.upstream)
        .await;
    Mock::given(method("PATCH"))
        .and(path(format!("/shipping/9/{SELLER_ID}")))
        .respond_with(ResponseTemplate::new(500))
        .mount(&ctx.upstream)
        .await;

    let resp = transition(&ctx, "Delivered").await;
    assert!(resp.status().is_success());

    // Create was still attempted before the patch
    assert_eq!(ctx.upstream_requests("POST", "/shipping/").await.len(), 1);
    assert_eq!(ctx.upstream_requests("PATCH", "/shipping/9").await.len(), 1);
}

#[tokio::test]
async fn order_list_filters_foreign_line_items() {
    let ctx = TestContext::new().await;
    ctx.login("approved").await;
    mock_orders(&ctx.upstream, "pending").await;
    mock_names(&ctx.upstream).await;

    let resp = ctx
        .client()
        .get(ctx.url("/orders"))
        .send()
        .await
        .unwrap();
    assert!(resp.status().is_success());
    let body: Value = resp.json().await.unwrap();

    let orders = body["orders"].as_array().unwrap();
    assert_eq!(orders.len(), 1);
    // The foreign seller's line item is gone
    let items = orders[0]["line_items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["id"], 55);
    // Free-text status normalized to its canonical spelling
    assert_eq!(items[0]["order_status"], "Pending");
    assert_eq!(orders[0]["order_status"], "Pending");
    // Display names resolved
    assert_eq!(orders[0]["buyer_name"], "Basant Traders");
    assert_eq!(items[0]["product_name"], "Steel Bolts");
}

#[tokio::test]
async fn order_type_update_refetches_on_failure() {
    let ctx = TestContext::new().await;
    ctx.login("approved").await;
    mock_orders(&ctx.upstream, "New").await;
    mock_names(&ctx.upstream).await;

    Mock::given(method("PATCH"))
        .and(path("/ordersOrderType"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&ctx.upstream)
        .await;

    let resp = ctx
        .client()
        .post(ctx.url("/orders/9/type"))
        .json(&json!({"order_type": "inquiry"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 502);

    // The re-fetch happened despite the failure
    assert_eq!(
        ctx.upstream_requests("GET", "/orderseller/").await.len(),
        1
    );
}
