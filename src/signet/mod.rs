#![allow(clippy::needless_for_each)]

use crate::{
    signet::{
        handlers::{
            health, health::__path_health, types, user_signin, user_signin::__path_signin,
            user_signup, user_signup::__path_signup,
        },
        password::PasswordHasher,
        service::UserService,
        token::TokenIssuer,
    },
    store::UserStore,
};
use anyhow::Result;
use axum::{
    body::Body,
    extract::MatchedPath,
    http::{HeaderName, HeaderValue, Request},
    routing::{get, post},
    Extension, Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    request_id::PropagateRequestIdLayer,
    set_header::SetRequestHeaderLayer,
    trace::TraceLayer,
};
use tracing::{info, info_span, Span};
use ulid::Ulid;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub mod handlers;
pub mod password;
pub mod service;
pub mod token;

#[cfg(test)]
pub(crate) mod test_support;

#[derive(OpenApi)]
#[openapi(
    paths(health, signup, signin),
    components(schemas(
        health::Health,
        types::UserSignup,
        types::UserSignin,
        types::SignupResponse,
        types::SigninResponse,
        types::UserSummary,
        types::ErrorResponse,
        types::MessageResponse,
        types::InternalErrorResponse,
    )),
    tags(
        (name = "user", description = "User signup and signin"),
        (name = "health", description = "Service health")
    )
)]
struct ApiDoc;

#[must_use]
pub fn openapi() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

/// Build the application router.
pub fn router(
    store: Arc<dyn UserStore>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<TokenIssuer>,
) -> Router {
    let service = UserService::new(store);

    Router::new()
        .route("/api/user/signup", post(user_signup::signup))
        .route("/api/user/signin", post(user_signin::signin))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestHeaderLayer::if_not_present(
                    HeaderName::from_static("x-request-id"),
                    |_req: &_| HeaderValue::from_str(Ulid::new().to_string().as_str()).ok(),
                ))
                .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
                    "x-request-id",
                )))
                .layer(TraceLayer::new_for_http().make_span_with(make_span))
                .layer(CorsLayer::permissive())
                .layer(Extension(hasher))
                .layer(Extension(tokens))
                .layer(Extension(service.clone())),
        )
        .merge(SwaggerUi::new("/swagger-ui").url("/openapi.json", openapi()))
        .route("/health", get(handlers::health).options(handlers::health))
        .layer(Extension(service))
}

/// Start the server
/// # Errors
/// Return error if failed to bind or serve
pub async fn new(
    port: u16,
    store: Arc<dyn UserStore>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<TokenIssuer>,
) -> Result<()> {
    let app = router(store, hasher, tokens);

    let listener = TcpListener::bind(format!("::0:{port}")).await?;

    info!("Listening on [::]:{}", port);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("Failed to listen for shutdown signal: {}", e);
            }
            info!("Gracefully shutdown");
        })
        .await?;

    Ok(())
}

fn make_span(request: &Request<Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|val| val.to_str().ok())
        .unwrap_or("none");
    let matched_path = request
        .extensions()
        .get::<MatchedPath>()
        .map_or_else(|| request.uri().path(), MatchedPath::as_str);

    info_span!(
        "http.request",
        http.method = %request.method(),
        http.route = matched_path,
        request_id
    )
}
