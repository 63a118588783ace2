use axum::{
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::{config, AppConfig, SecurityConfig};
use crate::handlers::{contacts, customers, profiles, subjects, system, users};
use crate::state::AppState;

/// Full application router using the process-wide configuration
pub fn app(state: AppState) -> Router {
    app_with_config(state, config())
}

pub fn app_with_config(state: AppState, config: &AppConfig) -> Router {
    let mut router = Router::new()
        // Public
        .route("/", get(system::root))
        .route("/health", get(system::health))
        .merge(user_routes())
        .merge(contact_routes())
        .merge(subject_routes())
        .merge(customer_routes())
        .merge(profile_routes())
        .with_state(state);

    if config.security.enable_cors {
        router = router.layer(cors_layer(&config.security));
    }
    if config.api.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }
    router
}

fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(users::list).post(users::create))
        .route("/users/subjects", get(users::list_with_subjects))
        .route("/users/restore", get(users::restore))
        .route(
            "/users/:id",
            get(users::show).put(users::update).delete(users::delete),
        )
}

fn contact_routes() -> Router<AppState> {
    Router::new()
        .route("/contacts", get(contacts::list))
        .route("/contacts/:user_id", post(contacts::create))
}

fn subject_routes() -> Router<AppState> {
    Router::new()
        .route("/subjects", get(subjects::list).post(subjects::create))
        // Partial assign paths answer 400 instead of falling through to 404
        .route("/subjects/assign", post(subjects::assign))
        .route("/subjects/assign/:user_id", post(subjects::assign))
        .route("/subjects/assign/:user_id/:subject_id", post(subjects::assign))
        .route("/subjects/:id", get(subjects::show).delete(subjects::delete))
}

fn customer_routes() -> Router<AppState> {
    Router::new()
        .route("/customers", get(customers::list).post(customers::create))
        .route("/customers/restore", get(customers::restore))
        .route(
            "/customers/:id",
            get(customers::show).put(customers::update).delete(customers::delete),
        )
}

fn profile_routes() -> Router<AppState> {
    Router::new()
        .route("/profiles", get(profiles::list).post(profiles::create))
        .route("/profiles/restore", get(profiles::restore))
        .route(
            "/profiles/:id",
            get(profiles::show).put(profiles::update).delete(profiles::delete),
        )
}

fn cors_layer(security: &SecurityConfig) -> CorsLayer {
    if security.cors_origins.iter().any(|origin| origin == "*") {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}
