use std::sync::Arc;
use std::time::Duration;

use auth::TokenMaker;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::delete;
use axum::routing::get;
use axum::routing::patch;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::confirm_email_change::confirm_email_change;
use super::handlers::create_account::create_account;
use super::handlers::delete_account::delete_account;
use super::handlers::get_account::get_account;
use super::handlers::list_accounts::list_accounts;
use super::handlers::login::login;
use super::handlers::request_email_change::request_email_change;
use super::handlers::request_password_reset::request_password_reset;
use super::handlers::reset_password::reset_password;
use super::handlers::update_avatar::update_avatar;
use super::handlers::verify_account::verify_account;
use super::middleware::authenticate;
use crate::domain::account::service::AccountService;
use crate::domain::otp::OtpExchange;
use crate::outbound::repositories::PostgresAccountRepository;
use crate::outbound::repositories::PostgresCodeStore;

#[derive(Clone)]
pub struct AppState {
    pub account_service: Arc<AccountService<PostgresAccountRepository, PostgresCodeStore>>,
    pub otp: Arc<OtpExchange<PostgresCodeStore>>,
    pub token_maker: Arc<TokenMaker>,
    pub token_duration: chrono::Duration,
}

pub fn create_router(
    account_service: Arc<AccountService<PostgresAccountRepository, PostgresCodeStore>>,
    otp: Arc<OtpExchange<PostgresCodeStore>>,
    token_maker: Arc<TokenMaker>,
    token_duration: chrono::Duration,
) -> Router {
    let state = AppState {
        account_service,
        otp,
        token_maker,
        token_duration,
    };

    let public_routes = Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/accounts", post(create_account))
        .route("/api/accounts", get(list_accounts))
        .route("/api/accounts/verify", post(verify_account))
        .route(
            "/api/accounts/reset-password/:email",
            get(request_password_reset),
        )
        .route("/api/accounts/reset-password", post(reset_password))
        .route("/api/accounts/:account_id", get(get_account));

    let protected_routes = Router::new()
        .route("/api/accounts/email-change", post(request_email_change))
        .route(
            "/api/accounts/email-change/:code",
            patch(confirm_email_change),
        )
        .route("/api/accounts/avatar", patch(update_avatar))
        .route("/api/accounts", delete(delete_account))
        .route_layer(middleware::from_fn_with_state(state.clone(), authenticate));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
                headers = ?request.headers(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
