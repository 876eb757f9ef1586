//! Integration test harness for Sellerdesk.
//!
//! Spawns the real panel application on an ephemeral port with its
//! upstream pointed at a wiremock server, then drives it with a
//! cookie-holding reqwest client. Every test owns its own panel and mock
//! upstream, so expectations never bleed between tests.

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::time::Duration;

use serde_json::{Value, json};
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use sellerdesk_panel::config::{PanelConfig, UpstreamConfig};
use sellerdesk_panel::state::AppState;

/// The seller id used by the canned fixtures.
pub const SELLER_ID: i64 = 6;

/// A running panel wired to a mock upstream.
pub struct TestContext {
    /// The mock marketplace admin API.
    pub upstream: MockServer,
    /// Base URL of the running panel.
    pub base_url: String,
    client: reqwest::Client,
}

impl TestContext {
    /// Start a mock upstream and a panel pointed at it.
    pub async fn new() -> Self {
        let upstream = MockServer::start().await;

        let config = PanelConfig {
            host: "127.0.0.1".parse().unwrap(),
            port: 0,
            base_url: "http://127.0.0.1:0".to_string(),
            upstream: UpstreamConfig::new(
                Url::parse(&upstream.uri()).unwrap(),
                Duration::from_secs(5),
            ),
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 1.0,
            tls: None,
        };

        let state = AppState::new(config).expect("state builds");
        let app = sellerdesk_panel::app(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind ephemeral port");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("panel serves");
        });

        let client = reqwest::Client::builder()
            .cookie_store(true)
            .build()
            .expect("client builds");

        Self {
            upstream,
            base_url: format!("http://{addr}"),
            client,
        }
    }

    /// The cookie-holding HTTP client.
    #[must_use]
    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }

    /// Absolute URL for a panel path.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Mount the login fixtures and log the canned seller in.
    pub async fn login(&self, approve_status: &str) {
        mock_login(&self.upstream, approve_status).await;

        let resp = self
            .client
            .post(self.url("/auth/login"))
            .json(&json!({"email": "seller@example.com", "password": "hunter2!"}))
            .send()
            .await
            .expect("login request");
        assert!(
            resp.status().is_success(),
            "login failed: {}",
            resp.status()
        );
    }

    /// Requests the upstream received for a method/path prefix.
    pub async fn upstream_requests(&self, http_method: &str, path_prefix: &str) -> Vec<Value> {
        self.upstream
            .received_requests()
            .await
            .unwrap_or_default()
            .into_iter()
            .filter(|r| {
                r.method.as_str().eq_ignore_ascii_case(http_method)
                    && r.url.path().starts_with(path_prefix)
            })
            .map(|r| serde_json::from_slice(&r.body).unwrap_or(Value::Null))
            .collect()
    }
}

/// The canned seller record.
#[must_use]
pub fn seller_fixture(approve_status: &str) -> Value {
    json!({
        "id": SELLER_ID,
        "email": "seller@example.com",
        "name": "Acme Traders",
        "approve_status": approve_status,
        "mobile": "9999999999"
    })
}

/// Mount login + seller-detail mocks.
pub async fn mock_login(upstream: &MockServer, approve_status: &str) {
    Mock::given(method("POST"))
        .and(path("/seller-login"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({
                "seller": {"id": SELLER_ID, "email": "seller@example.com"}
            })),
        )
        .mount(upstream)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("/seller/{SELLER_ID}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(seller_fixture(approve_status)))
        .mount(upstream)
        .await;
}

/// One canned order (id 9, buyer 2) with one line item (id 55) owned by
/// the canned seller and one foreign line item that must be filtered out.
#[must_use]
pub fn orders_fixture(order_status: &str) -> Value {
    json!([{
        "id": 9,
        "buyer_id": 2,
        "created_at": "2025-05-20T09:30:00.000Z",
        "order_type": "Order",
        "products": [
            {
                "id": 55,
                "product_id": 3,
                "seller_id": SELLER_ID,
                "quantity": 2,
                "price": "19.99",
                "order_status": order_status,
                "payment_status": "Paid"
            },
            {
                "id": 56,
                "product_id": 4,
                "seller_id": 999,
                "quantity": 1,
                "price": "5.00",
                "order_status": "New",
                "payment_status": "Pending"
            }
        ]
    }])
}

/// Mount the order list mock.
pub async fn mock_orders(upstream: &MockServer, order_status: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/orderseller/{SELLER_ID}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(orders_fixture(order_status)))
        .mount(upstream)
        .await;
}

/// Mount best-effort display-name mocks (buyers and products).
pub async fn mock_names(upstream: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/buyers"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{"id": 2, "name": "Basant Traders"}])),
        )
        .mount(upstream)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("/product_seller/{SELLER_ID}")))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{"id": 3, "name": "Steel Bolts"}])),
        )
        .mount(upstream)
        .await;
}
