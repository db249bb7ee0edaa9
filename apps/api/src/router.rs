use std::path::Path;

use axum::{extract::State, routing::get, Json, Router};
use serde_json::{json, Value};
use tower_http::services::ServeFile;

use appointment_cell::router::appointment_routes;
use doctor_cell::router::doctor_routes;
use patient_cell::router::create_patient_router;
use shared_config::AppConfig;
use shared_database::Database;
use shared_models::error::AppError;

pub fn create_router(config: &AppConfig, db: Database) -> Router {
    let static_dir = Path::new(&config.static_dir);
    let index = static_dir.join("index.html");
    let admin = static_dir.join("admin.html");

    Router::new()
        .route_service("/", ServeFile::new(&index))
        .route_service("/index.html", ServeFile::new(&index))
        .route_service("/admin.html", ServeFile::new(&admin))
        .route("/health", get(health).with_state(db.clone()))
        .merge(doctor_routes(db.clone()))
        .merge(create_patient_router(db.clone()))
        .merge(appointment_routes(db))
}

async fn health(State(db): State<Database>) -> Result<Json<Value>, AppError> {
    db.ping()
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

    Ok(Json(json!({ "status": "ok" })))
}
