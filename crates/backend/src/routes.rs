use axum::{
    http::{header, HeaderName, Method},
    middleware,
    routing::{get, patch, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};

use crate::handlers;
use crate::shared::state::AppState;
use crate::system::auth::middleware::require_admin;
use crate::system::auth::{ACTOR_ID_HEADER, ACTOR_ROLE_HEADER};
use crate::system::middleware::request_logger::request_logger;

fn cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            header::ACCEPT,
            HeaderName::from_static(ACTOR_ID_HEADER),
            HeaderName::from_static(ACTOR_ROLE_HEADER),
        ])
}

/// Конфигурация всех роутов приложения
pub fn configure_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        // ========================================
        // RETURNS (A003)
        // ========================================
        .route(
            "/api/returns",
            post(handlers::a003_return_case::open).get(handlers::a003_return_case::list),
        )
        .route("/api/returns/:id", get(handlers::a003_return_case::get_by_id))
        // Review (admin only)
        .route(
            "/api/returns/:id/take",
            post(handlers::a003_return_case::take).layer(middleware::from_fn(require_admin)),
        )
        .route(
            "/api/returns/:id/review",
            patch(handlers::a003_return_case::review).layer(middleware::from_fn(require_admin)),
        )
        // ========================================
        // RISK FUND (P901 / D401)
        // ========================================
        .route(
            "/api/insurance/fund",
            get(handlers::d401_risk_fund::get_summary),
        )
        .route(
            "/api/insurance/fund/entries",
            get(handlers::p901_risk_fund_ledger::list)
                .merge(post(handlers::p901_risk_fund_ledger::post).layer(middleware::from_fn(require_admin))),
        )
        // ========================================
        // ORDERS (A001)
        // ========================================
        .route(
            "/api/orders/testdata",
            post(handlers::a001_cargo_order::insert_test_data).layer(middleware::from_fn(require_admin)),
        )
        .route("/api/orders/:id", get(handlers::a001_cargo_order::get_by_id))
        .layer(middleware::from_fn(request_logger))
        .layer(cors())
        .with_state(state)
}
