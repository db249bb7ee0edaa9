// libs/appointment-cell/src/router.rs
use axum::{
    Router,
    routing::{delete, get, put},
};

use shared_database::Database;

use crate::handlers;

pub fn appointment_routes(db: Database) -> Router {
    Router::new()
        // Weekly calendar
        .route(
            "/appointments",
            get(handlers::list_appointments).post(handlers::create_appointment),
        )
        .route("/appointments/reorder", put(handlers::reorder_appointments))
        .route("/appointments/{appointment_id}", delete(handlers::delete_appointment))
        .route("/appointments/{appointment_id}/move", put(handlers::move_appointment))

        // Blocking
        .route(
            "/blocked-days",
            get(handlers::list_blocked_days).post(handlers::toggle_blocked_day),
        )
        .route(
            "/global-blocks",
            get(handlers::list_global_blocks).post(handlers::toggle_global_block),
        )
        .with_state(db)
}
