use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::create_post::create_post;
use super::handlers::create_user::create_user;
use super::handlers::delete_post::delete_post;
use super::handlers::delete_user::delete_user;
use super::handlers::get_post::get_post;
use super::handlers::get_user::get_user;
use super::handlers::list_posts::list_posts;
use super::handlers::list_users::list_users;
use super::handlers::login::login;
use super::handlers::update_post::update_post;
use super::handlers::update_user::update_user;
use super::middleware::authenticate as auth_middleware;
use crate::domain::post::service::PostService;
use crate::domain::user::service::UserService;
use crate::post::ports::PostRepository;
use crate::user::ports::UserRepository;

pub struct AppState<UR, PR>
where
    UR: UserRepository,
    PR: PostRepository,
{
    pub user_service: Arc<UserService<UR>>,
    pub post_service: Arc<PostService<PR, UR>>,
    pub authenticator: Arc<Authenticator<UserService<UR>>>,
}

impl<UR, PR> Clone for AppState<UR, PR>
where
    UR: UserRepository,
    PR: PostRepository,
{
    fn clone(&self) -> Self {
        Self {
            user_service: Arc::clone(&self.user_service),
            post_service: Arc::clone(&self.post_service),
            authenticator: Arc::clone(&self.authenticator),
        }
    }
}

pub fn create_router<UR, PR>(
    user_service: Arc<UserService<UR>>,
    post_service: Arc<PostService<PR, UR>>,
    authenticator: Arc<Authenticator<UserService<UR>>>,
) -> Router
where
    UR: UserRepository,
    PR: PostRepository,
{
    let state = AppState {
        user_service,
        post_service,
        authenticator,
    };

    let public_routes = Router::new()
        .route("/api/auth/login", post(login::<UR, PR>))
        .route("/api/users", post(create_user::<UR, PR>));

    let protected_routes = Router::new()
        .route("/api/users", get(list_users::<UR, PR>))
        .route(
            "/api/users/:user_id",
            get(get_user::<UR, PR>)
                .patch(update_user::<UR, PR>)
                .delete(delete_user::<UR, PR>),
        )
        .route(
            "/api/posts",
            get(list_posts::<UR, PR>).post(create_post::<UR, PR>),
        )
        .route(
            "/api/posts/:post_id",
            get(get_post::<UR, PR>)
                .patch(update_post::<UR, PR>)
                .delete(delete_post::<UR, PR>),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware::<UR, PR>,
        ));

    // Headers are left out of the span so bearer tokens never reach the logs.
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
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
