use std::sync::Arc;

use crate::{
    config::Config,
    error::ApiResult,
    main_lib::AppState,
    models::{
        CompositionRequest, CompositionResponse, MarketPriceRequest, MarketPriceResponse,
        MaterialComponent,
    },
};
use axum::{
    extract::State,
    http::{HeaderValue, StatusCode},
    routing::{get, post},
    Json, Router,
};
use procplan_core::{errors::Error as CoreError, ValidationError};
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use utoipa::OpenApi;

#[utoipa::path(get, path = "/api/v1/healthz", responses((status = 200, description = "Health")))]
pub async fn healthz() -> &'static str {
    "ok"
}

#[utoipa::path(get, path = "/api/v1/readyz", responses((status = 200, description = "Ready")))]
pub async fn readyz() -> &'static str {
    "ok"
}

#[utoipa::path(
    post,
    path = "/api/v1/composition",
    request_body = CompositionRequest,
    responses(
        (status = 200, body = CompositionResponse),
        (status = 400, description = "Blank item"),
        (status = 502, description = "Language model unavailable")
    )
)]
pub async fn decompose_item(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CompositionRequest>,
) -> ApiResult<Json<CompositionResponse>> {
    let item = body.item.trim();
    if item.is_empty() {
        return Err(CoreError::from(ValidationError::BlankItem).into());
    }
    let components = state.composition_service.decompose(item).await?;
    tracing::info!("Decomposed '{}' into {} materials", item, components.len());
    Ok(Json(CompositionResponse {
        item: item.to_string(),
        components: components.into_iter().map(MaterialComponent::from).collect(),
    }))
}

#[utoipa::path(
    post,
    path = "/api/v1/marketprice",
    request_body = MarketPriceRequest,
    responses(
        (status = 200, body = MarketPriceResponse),
        (status = 400, description = "Empty material list")
    )
)]
pub async fn resolve_market_prices(
    State(state): State<Arc<AppState>>,
    Json(body): Json<MarketPriceRequest>,
) -> ApiResult<Json<MarketPriceResponse>> {
    let prices = state.pricing_service.resolve_prices(&body.materials).await?;
    Ok(Json(MarketPriceResponse::from(prices)))
}

#[derive(OpenApi)]
#[openapi(
    paths(healthz, readyz, decompose_item, resolve_market_prices),
    components(schemas(
        CompositionRequest,
        CompositionResponse,
        MaterialComponent,
        MarketPriceRequest,
        MarketPriceResponse
    )),
    tags((name = "procplan"))
)]
pub struct ApiDoc;

fn cors_layer(config: &Config) -> CorsLayer {
    if config.cors_allow.iter().any(|o| o == "*") {
        return CorsLayer::new().allow_origin(Any);
    }
    let origins = config
        .cors_allow
        .iter()
        .filter_map(|o| match o.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin '{}'", o);
                None
            }
        })
        .collect::<Vec<_>>();
    CorsLayer::new().allow_origin(origins)
}

pub fn app_router(state: Arc<AppState>, config: &Config) -> Router {
    let openapi = ApiDoc::openapi();

    let api = Router::new()
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .route("/composition", post(decompose_item))
        .route("/marketprice", post(resolve_market_prices));

    Router::new()
        .nest("/api/v1", api)
        .route("/openapi.json", get(|| async { Json(openapi) }))
        .with_state(state)
        .layer(cors_layer(config))
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            config.request_timeout,
        ))
        .layer(TraceLayer::new_for_http())
}
