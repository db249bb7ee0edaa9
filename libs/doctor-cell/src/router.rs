use axum::{
    Router,
    routing::{delete, get, post, put},
};

use shared_database::Database;

use crate::handlers;

pub fn doctor_routes(db: Database) -> Router {
    Router::new()
        // Identity
        .route("/register", post(handlers::register))
        .route("/login", post(handlers::login))
        .route("/doctors", get(handlers::search_doctors))
        .route("/doctors/me", get(handlers::get_me))
        .route("/doctors/batch", get(handlers::get_doctors_batch))
        .route("/doctors/{doctor_id}/color", put(handlers::update_color))

        // Connection handshake
        .route("/match-request", post(handlers::send_match_request))
        .route("/match-requests", get(handlers::get_match_requests))
        .route("/match-accept/{request_id}", post(handlers::accept_match))
        .route("/matches/{doctor_id}/{target_id}", delete(handlers::remove_match))
        .with_state(db)
}
