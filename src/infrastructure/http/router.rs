use crate::infrastructure::http::controllers::contacts;
use crate::infrastructure::http::middleware::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer, trace::TraceLayer};

/// Default request body cap when none is configured.
pub const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    build_router_with_limit(state, DEFAULT_MAX_BODY_BYTES)
}

pub fn build_router_with_limit(state: AppState, max_body_bytes: usize) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .merge(contact_routes())
        // Same routes under the /api prefix
        .nest("/api", contact_routes())
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

fn contact_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/contacts",
            get(contacts::list_contacts).post(contacts::create_contact),
        )
        .route(
            "/contacts/:id",
            get(contacts::get_contact)
                .put(contacts::update_contact)
                .delete(contacts::delete_contact),
        )
        .route("/contacts/:id/bookmark", post(contacts::set_bookmark))
}

async fn root_handler() -> &'static str {
    "Contactbook Contact Management API"
}

async fn health_handler() -> &'static str {
    "OK"
}
