//! Screen-level integration tests: dashboard, stock, packages, profile.

#![allow(clippy::unwrap_used)]

use serde_json::{Value, json};
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

use sellerdesk_integration_tests::{SELLER_ID, TestContext, mock_orders};

#[tokio::test]
async fn dashboard_reports_counts_and_order_stats() {
    let ctx = TestContext::new().await;
    ctx.login("pending").await;
    mock_orders(&ctx.upstream, "Shipped").await;

    Mock::given(method("GET"))
        .and(path("/categories"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([{"id": 1}, {"id": 2}, {"id": 3}])),
        )
        .mount(&ctx.upstream)
        .await;
    Mock::given(method("GET"))
        .and(path("/subcategories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": 1}])))
        .mount(&ctx.upstream)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/product_seller/{SELLER_ID}")))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"products": [{"id": 3}, {"id": 4}]})),
        )
        .mount(&ctx.upstream)
        .await;

    let resp = ctx
        .client()
        .get(ctx.url("/dashboard"))
        .send()
        .await
        .unwrap();
    assert!(resp.status().is_success());
    let body: Value = resp.json().await.unwrap();

    assert_eq!(body["categories"], 3);
    assert_eq!(body["subcategories"], 1);
    assert_eq!(body["products"], 2);
    assert_eq!(body["orders"]["total_orders"], 1);
    assert_eq!(body["orders"]["shipped_orders"], 1);
    assert_eq!(body["orders"]["order_orders"], 1);
    assert_eq!(body["orders"]["inquiry_orders"], 0);
}

#[tokio::test]
async fn dashboard_degrades_count_failures_to_zero() {
    let ctx = TestContext::new().await;
    ctx.login("pending").await;
    mock_orders(&ctx.upstream, "New").await;

    // categories/subcategories/products all broken
    for broken in ["/categories", "/subcategories"] {
        Mock::given(method("GET"))
            .and(path(broken))
            .respond_with(ResponseTemplate::new(500))
            .mount(&ctx.upstream)
            .await;
    }
    Mock::given(method("GET"))
        .and(path(format!("/product_seller/{SELLER_ID}")))
        .respond_with(ResponseTemplate::new(500))
        .mount(&ctx.upstream)
        .await;

    let resp = ctx
        .client()
        .get(ctx.url("/dashboard"))
        .send()
        .await
        .unwrap();
    assert!(resp.status().is_success());
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["categories"], 0);
    assert_eq!(body["orders"]["total_orders"], 1);
}

#[tokio::test]
async fn stock_create_sends_the_seller_id_and_refetches() {
    let ctx = TestContext::new().await;
    ctx.login("approved").await;

    Mock::given(method("POST"))
        .and(path("/stock"))
        .respond_with(ResponseTemplate::new(201))
        .mount(&ctx.upstream)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/stock/{SELLER_ID}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 11, "seller_id": SELLER_ID, "product_id": 3, "quantity": "40"}
        ])))
        .mount(&ctx.upstream)
        .await;

    let resp = ctx
        .client()
        .post(ctx.url("/stock"))
        .json(&json!({"product_id": 3, "quantity": 40}))
        .send()
        .await
        .unwrap();
    assert!(resp.status().is_success());
    let body: Value = resp.json().await.unwrap();

    let creates = ctx.upstream_requests("POST", "/stock").await;
    assert_eq!(creates.len(), 1);
    assert_eq!(creates[0]["seller_id"], SELLER_ID);
    assert_eq!(creates[0]["product_id"], 3);

    // String quantity normalized in the refetched listing
    assert_eq!(body["items"][0]["quantity"], 40);
}

#[tokio::test]
async fn stock_listing_treats_404_as_empty() {
    let ctx = TestContext::new().await;
    ctx.login("approved").await;

    Mock::given(method("GET"))
        .and(path(format!("/stock/{SELLER_ID}")))
        .respond_with(ResponseTemplate::new(404))
        .mount(&ctx.upstream)
        .await;

    let resp = ctx.client().get(ctx.url("/stock")).send().await.unwrap();
    assert!(resp.status().is_success());
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["items"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn package_history_sorts_newest_first() {
    let ctx = TestContext::new().await;
    ctx.login("pending").await;

    Mock::given(method("GET"))
        .and(path(format!("/seller/package-history/{SELLER_ID}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"package_name": "Silver", "package_price": 499,
             "created_at": "2025-01-05T00:00:00.000Z"},
            {"package_name": "Gold", "package_price": "999",
             "created_at": "2025-04-01T00:00:00.000Z"},
            {"package_name": "Trial", "package_price": 0,
             "package_start_date": "2025-03-01"}
        ])))
        .mount(&ctx.upstream)
        .await;

    let resp = ctx.client().get(ctx.url("/packages")).send().await.unwrap();
    assert!(resp.status().is_success());
    let body: Value = resp.json().await.unwrap();

    let names: Vec<&str> = body["packages"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["package_name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Gold", "Trial", "Silver"]);
}

#[tokio::test]
async fn profile_round_trips_through_the_flatten() {
    let ctx = TestContext::new().await;
    ctx.login("pending").await;

    // Re-mount the seller endpoint with the nested profile shape
    ctx.upstream.reset().await;
    Mock::given(method("GET"))
        .and(path(format!("/seller/{SELLER_ID}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "seller": {"name": "Acme Traders", "email": "seller@example.com",
                        "approve_status": "pending"},
            "company": {"company_name": "Acme Pvt Ltd",
                         "company_GST_number": "22AAAAA0000A1Z5"},
            "kyc": {"aadhar_number": "1234-5678"},
            "bank": {"bank_name": "HDFC", "bank_IFSC_code": "HDFC0000001"}
        })))
        .mount(&ctx.upstream)
        .await;
    Mock::given(method("PATCH"))
        .and(path(format!("/seller/{SELLER_ID}")))
        .respond_with(ResponseTemplate::new(200))
        .mount(&ctx.upstream)
        .await;

    let resp = ctx.client().get(ctx.url("/profile")).send().await.unwrap();
    assert!(resp.status().is_success());
    let form: Value = resp.json().await.unwrap();
    assert_eq!(form["name"], "Acme Traders");
    assert_eq!(form["company_GST_number"], "22AAAAA0000A1Z5");
    assert_eq!(form["bank_IFSC_code"], "HDFC0000001");

    // Save it back (no file changes) and get the re-fetched form
    let resp = ctx
        .client()
        .put(ctx.url("/profile"))
        .json(&json!({"form": form}))
        .send()
        .await
        .unwrap();
    assert!(resp.status().is_success());

    let patches = ctx.upstream_requests("PATCH", "/seller/").await;
    assert_eq!(patches.len(), 1);
}
