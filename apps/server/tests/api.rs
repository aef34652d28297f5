use std::{collections::HashMap, sync::Arc, time::Duration};

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use procplan_ai::{FakeCompositionService, LlmConfig};
use procplan_core::{
    pricing::{FakeMaterialMatcher, PricingConfig, PricingService},
    reference::{CompanyDirectory, ReferenceTables},
};
use procplan_market_data::{
    MarketDataError, MarketDataProvider, Quote, QuoteFetcher, RateLimiter, Symbol,
};
use procplan_server::{api::app_router, config::Config, AppState};
use rust_decimal_macros::dec;
use serde_json::{json, Value};
use tower::ServiceExt;

struct CopperOnlyProvider;

#[async_trait]
impl MarketDataProvider for CopperOnlyProvider {
    fn id(&self) -> &'static str {
        "STUB"
    }

    async fn get_latest_quote(&self, symbol: &Symbol) -> Result<Quote, MarketDataError> {
        match symbol.to_string().as_str() {
            "CPER" => Ok(Quote::new(
                symbol.clone(),
                dec!(25.5),
                "USD".to_string(),
                "STUB".to_string(),
            )),
            other => Err(MarketDataError::SymbolNotFound(other.to_string())),
        }
    }
}

/// Never answers within a request timeout.
struct StalledProvider;

#[async_trait]
impl MarketDataProvider for StalledProvider {
    fn id(&self) -> &'static str {
        "STALLED"
    }

    async fn get_latest_quote(&self, symbol: &Symbol) -> Result<Quote, MarketDataError> {
        tokio::time::sleep(Duration::from_secs(30)).await;
        Err(MarketDataError::Timeout {
            provider: symbol.to_string(),
        })
    }
}

fn test_config() -> Config {
    Config {
        listen_addr: "127.0.0.1:0".parse().unwrap(),
        cors_allow: vec!["*".to_string()],
        request_timeout: Duration::from_secs(5),
        alpha_vantage_api_key: "demo".to_string(),
        listings_dir: "info".into(),
        pricing: PricingConfig::default(),
        llm: LlmConfig::default(),
    }
}

fn app_with(provider: Arc<dyn MarketDataProvider>, config: &Config) -> Router {
    let fetcher = Arc::new(QuoteFetcher::new(
        provider,
        Arc::new(RateLimiter::new(Duration::ZERO)),
    ));
    let pricing = Arc::new(PricingService::new(
        Arc::new(ReferenceTables::new(CompanyDirectory::new())),
        Arc::new(FakeMaterialMatcher::new()),
        fetcher,
        config.pricing.clone(),
    ));
    let composition = Arc::new(FakeCompositionService::with_components(&[
        ("Steel", 70.0),
        ("Rubber", 30.0),
    ]));
    app_router(Arc::new(AppState::new(pricing, composition)), config)
}

fn test_app() -> Router {
    app_with(Arc::new(CopperOnlyProvider), &test_config())
}

async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn marketprice_rejects_empty_list() {
    let (status, body) = post_json(
        test_app(),
        "/api/v1/marketprice",
        json!({ "materials": [] }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 400);
}

#[tokio::test]
async fn marketprice_prices_each_material() {
    let (status, body) = post_json(
        test_app(),
        "/api/v1/marketprice",
        json!({ "materials": ["Copper", "Unobtainium"] }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let prices: HashMap<String, f64> = serde_json::from_value(body["prices"].clone()).unwrap();
    assert_eq!(prices.len(), 2);
    assert_eq!(prices["Copper"], 25.5);
    assert_eq!(prices["Unobtainium"], 100.0);
}

#[tokio::test]
async fn composition_returns_components() {
    let (status, body) = post_json(
        test_app(),
        "/api/v1/composition",
        json!({ "item": "bicycle" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["item"], "bicycle");
    assert_eq!(
        body["components"],
        json!([
            { "material": "Steel", "percentage": 70.0 },
            { "material": "Rubber", "percentage": 30.0 }
        ])
    );
}

#[tokio::test]
async fn composition_rejects_blank_item() {
    let (status, body) =
        post_json(test_app(), "/api/v1/composition", json!({ "item": "   " })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 400);
}

#[tokio::test]
async fn openapi_document_is_served() {
    let response = test_app()
        .oneshot(Request::builder().uri("/openapi.json").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn slow_request_times_out() {
    let config = Config {
        request_timeout: Duration::from_millis(50),
        ..test_config()
    };
    let app = app_with(Arc::new(StalledProvider), &config);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/marketprice")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json!({ "materials": ["Copper"] }).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
}
