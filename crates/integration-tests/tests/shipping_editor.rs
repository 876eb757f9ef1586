//! Shipping editor integration tests: open/seed semantics, context
//! resolution on submit, and the forced-date rules.

#![allow(clippy::unwrap_used)]

use serde_json::{Value, json};
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

use sellerdesk_integration_tests::{SELLER_ID, TestContext, mock_names, mock_orders};

async fn mock_shipping_writes(ctx: &TestContext) {
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
}

#[tokio::test]
async fn editor_opens_blank_on_204() {
    let ctx = TestContext::new().await;
    ctx.login("approved").await;

    Mock::given(method("GET"))
        .and(path("/ordershipping/9"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&ctx.upstream)
        .await;

    let resp = ctx
        .client()
        .get(ctx.url("/orders/9/shipping?buyer_id=2"))
        .send()
        .await
        .unwrap();
    assert!(resp.status().is_success());
    let body: Value = resp.json().await.unwrap();

    // Blank defaults, no error surfaced
    assert_eq!(body["form"]["courier_name"], "");
    assert_eq!(body["form"]["shipping_status"], "Shipped");
    assert_eq!(body["form"]["delivery_type"], "Standard");
    assert_eq!(body["context"]["order_id"], 9);
    assert_eq!(body["context"]["buyer_id"], 2);
}

#[tokio::test]
async fn editor_seeds_from_the_sellers_row() {
    let ctx = TestContext::new().await;
    ctx.login("approved").await;

    Mock::given(method("GET"))
        .and(path("/ordershipping/9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": [
            {"seller_id": 999, "courier_name": "Other Courier"},
            {
                "seller_id": SELLER_ID,
                "courier_name": "DTDC",
                "shipping_status": "in transit",
                "estimated_delivery_date": "2025-06-03T00:00:00.000Z"
            }
        ]})))
        .mount(&ctx.upstream)
        .await;

    let resp = ctx
        .client()
        .get(ctx.url("/orders/9/shipping?buyer_id=2"))
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();

    assert_eq!(body["form"]["courier_name"], "DTDC");
    assert_eq!(body["form"]["shipping_status"], "In Transit");
    assert_eq!(body["form"]["estimated_delivery_date"], "2025-06-03");
}

#[tokio::test]
async fn open_without_buyer_id_makes_no_upstream_call() {
    let ctx = TestContext::new().await;
    ctx.login("approved").await;

    let resp = ctx
        .client()
        .get(ctx.url("/orders/9/shipping"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 400);

    assert!(
        ctx.upstream_requests("GET", "/ordershipping/")
            .await
            .is_empty()
    );
}

#[tokio::test]
async fn submit_without_context_makes_no_network_call() {
    let ctx = TestContext::new().await;
    ctx.login("approved").await;
    mock_shipping_writes(&ctx).await;

    let resp = ctx
        .client()
        .put(ctx.url("/shipping"))
        .json(&json!({"form": {"shipping_status": "Shipped"}}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 400);

    assert!(ctx.upstream_requests("POST", "/shipping/").await.is_empty());
    assert!(
        ctx.upstream_requests("PATCH", "/shipping/")
            .await
            .is_empty()
    );
}

#[tokio::test]
async fn submit_resolves_ids_from_the_opened_editor() {
    let ctx = TestContext::new().await;
    ctx.login("approved").await;
    mock_orders(&ctx.upstream, "Shipped").await;
    mock_names(&ctx.upstream).await;
    mock_shipping_writes(&ctx).await;

    Mock::given(method("GET"))
        .and(path("/ordershipping/9"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&ctx.upstream)
        .await;

    // Open stores the context in the session
    let resp = ctx
        .client()
        .get(ctx.url("/orders/9/shipping?buyer_id=2"))
        .send()
        .await
        .unwrap();
    assert!(resp.status().is_success());

    // Submit with no explicit ids
    let resp = ctx
        .client()
        .put(ctx.url("/shipping"))
        .json(&json!({"form": {
            "courier_name": "DTDC",
            "shipping_status": "Delivered"
        }}))
        .send()
        .await
        .unwrap();
    assert!(resp.status().is_success());

    let creates = ctx.upstream_requests("POST", "/shipping/").await;
    assert_eq!(creates.len(), 1);
    assert_eq!(creates[0]["order_id"], 9);
    assert_eq!(creates[0]["buyer_id"], 2);

    let patches = ctx.upstream_requests("PATCH", "/shipping/9").await;
    assert_eq!(patches.len(), 1);
    assert_eq!(patches[0]["courier_name"], "DTDC");
    // Delivered with no explicit date forces "now"
    assert!(!patches[0]["actual_delivery_date"].is_null());
}

#[tokio::test]
async fn submit_forces_cancelled_date_and_dual_writes() {
    let ctx = TestContext::new().await;
    ctx.login("approved").await;
    mock_orders(&ctx.upstream, "Cancelled").await;
    mock_names(&ctx.upstream).await;
    mock_shipping_writes(&ctx).await;

    let resp = ctx
        .client()
        .put(ctx.url("/shipping"))
        .json(&json!({
            "order_id": 9,
            "buyer_id": 2,
            "form": {"shipping_status": "Cancelled"}
        }))
        .send()
        .await
        .unwrap();
    assert!(resp.status().is_success());

    let patches = ctx.upstream_requests("PATCH", "/shipping/9").await;
    assert_eq!(patches.len(), 1);
    assert!(!patches[0]["cancelled_date"].is_null());
    assert_eq!(patches[0]["cancelled_date"], patches[0]["canceled_date"]);
}

#[tokio::test]
async fn submit_keeps_explicit_dates() {
    let ctx = TestContext::new().await;
    ctx.login("approved").await;
    mock_orders(&ctx.upstream, "Delivered").await;
    mock_names(&ctx.upstream).await;
    mock_shipping_writes(&ctx).await;

    let resp = ctx
        .client()
        .put(ctx.url("/shipping"))
        .json(&json!({
            "order_id": 9,
            "buyer_id": 2,
            "form": {
                "shipping_status": "Delivered",
                "actual_delivery_date": "2025-05-20"
            }
        }))
        .send()
        .await
        .unwrap();
    assert!(resp.status().is_success());

    let patches = ctx.upstream_requests("PATCH", "/shipping/9").await;
    let stamped = patches[0]["actual_delivery_date"].as_str().unwrap();
    assert!(stamped.starts_with("2025-05-20"));
}

#[tokio::test]
async fn failed_submit_patch_surfaces_error_and_keeps_context() {
    let ctx = TestContext::new().await;
    ctx.login("approved").await;
    mock_orders(&ctx.upstream, "Shipped").await;
    mock_names(&ctx.upstream).await;

    Mock::given(method("GET"))
        .and(path("/ordershipping/9"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&ctx.upstream)
        .await;
    Mock::given(method("POST"))
        .and(path("/shipping/"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&ctx.upstream)
        .await;
    Mock::given(method("PATCH"))
        .and(path(format!("/shipping/9/{SELLER_ID}")))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"message": "save failed"})))
        .mount(&ctx.upstream)
        .await;

    // Open, then submit into the broken PATCH
    ctx.client()
        .get(ctx.url("/orders/9/shipping?buyer_id=2"))
        .send()
        .await
        .unwrap();
    let resp = ctx
        .client()
        .put(ctx.url("/shipping"))
        .json(&json!({"form": {"shipping_status": "Shipped"}}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 502);

    // Context survived the failure: a retry still resolves the ids
    let resp = ctx
        .client()
        .put(ctx.url("/shipping"))
        .json(&json!({"form": {"shipping_status": "Shipped"}}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 502);

    let patches = ctx.upstream_requests("PATCH", "/shipping/9").await;
    assert_eq!(patches.len(), 2);
}
