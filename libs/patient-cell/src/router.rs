use axum::{routing::{delete, get}, Router};
use shared_database::Database;

use crate::handlers::*;

pub fn create_patient_router(db: Database) -> Router {
    Router::new()
        .route("/patients", get(list_patients).post(create_patient))
        .route("/patients/{id}", delete(delete_patient))
        .with_state(db)
}
