use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::{
    DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer,
};
use tracing::Level;

use common::types::Health;

use crate::state::ServerState;

pub mod admins;
pub mod auth;
pub mod doctors;
pub mod patients;

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the full application router: public health, auth, and the three
/// role-gated resource groups under /api/v1.
pub fn build_router(cors: CorsLayer, state: ServerState) -> Router {
    let auth_routes = Router::new()
        .route("/auth/login", post(auth::login))
        .route("/auth/refresh", post(auth::refresh));

    let patient_routes = Router::new()
        .route("/patients", get(patients::list))
        .route("/patients/search", get(patients::search))
        .route("/patients/register", post(patients::register))
        .route(
            "/patients/:id",
            get(patients::get_one).put(patients::update).delete(patients::remove),
        );

    let doctor_routes = Router::new()
        .route("/doctors", get(doctors::list))
        .route("/doctors/search", get(doctors::search))
        .route("/doctors/register", post(doctors::register))
        .route("/doctors/iin/:iin", get(doctors::get_by_iin))
        .route(
            "/doctors/:id",
            get(doctors::get_one).put(doctors::update).delete(doctors::remove),
        )
        .route("/doctors/:id/patients", get(doctors::patients_of));

    let admin_routes = Router::new()
        .route("/admins", get(admins::list))
        .route("/admins/register", post(admins::register))
        .route(
            "/admins/:id",
            get(admins::get_one).put(admins::update).delete(admins::remove),
        );

    let api = auth_routes
        .merge(patient_routes)
        .merge(doctor_routes)
        .merge(admin_routes);

    Router::new()
        .route("/health", get(health))
        .nest("/api/v1", api)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
