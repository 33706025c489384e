//! Router assembly.
//!
//! `/health` and the register/login endpoints are public; everything
//! else under `/api` sits behind the JWT middleware.

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    middleware::from_fn_with_state,
    routing::get,
    routing::post,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    config::CorsConfig,
    handlers,
    middleware::auth::jwt_auth_middleware,
    state::AppState,
};

pub fn app(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login));

    let protected_routes = Router::new()
        .route("/auth/profile", get(handlers::auth::profile))
        .route(
            "/clients",
            get(handlers::clients::list_clients).post(handlers::clients::create_client),
        )
        .route(
            "/clients/{id}",
            get(handlers::clients::get_client)
                .put(handlers::clients::update_client)
                .delete(handlers::clients::delete_client),
        )
        .route(
            "/projects",
            get(handlers::projects::list_projects).post(handlers::projects::create_project),
        )
        .route(
            "/projects/{id}",
            get(handlers::projects::get_project)
                .put(handlers::projects::update_project)
                .delete(handlers::projects::delete_project),
        )
        .route(
            "/interactions",
            get(handlers::interactions::list_interactions)
                .post(handlers::interactions::create_interaction),
        )
        .route(
            "/interactions/{id}",
            get(handlers::interactions::get_interaction)
                .put(handlers::interactions::update_interaction)
                .delete(handlers::interactions::delete_interaction),
        )
        .route(
            "/reminders",
            get(handlers::reminders::list_reminders).post(handlers::reminders::create_reminder),
        )
        .route(
            "/reminders/{id}",
            get(handlers::reminders::get_reminder)
                .put(handlers::reminders::update_reminder)
                .delete(handlers::reminders::delete_reminder),
        )
        .route("/dashboard", get(handlers::dashboard::get_dashboard))
        .route_layer(from_fn_with_state(state.clone(), jwt_auth_middleware));

    let cors = cors_layer(&state.config.cors);

    Router::new()
        .route("/health", get(handlers::health::health_check))
        .nest("/api", public_routes.merge(protected_routes))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let origin = config
        .allowed_origin
        .parse::<HeaderValue>()
        .unwrap_or_else(|_| HeaderValue::from_static("http://localhost:3000"));

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_credentials(true)
}
