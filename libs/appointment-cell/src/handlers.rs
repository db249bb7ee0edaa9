// libs/appointment-cell/src/handlers.rs
use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde_json::{json, Value};

use shared_database::Database;
use shared_models::error::AppError;

use crate::models::{
    AppointmentListQuery, BlockedDay, BlockedDaysQuery, CreateAppointmentRequest, GlobalBlock,
    GlobalBlocksQuery, MoveRequest, ReorderRequest,
};
use crate::services::{AppointmentService, BlockingService};

// ==============================================================================
// APPOINTMENT HANDLERS
// ==============================================================================

#[axum::debug_handler]
pub async fn list_appointments(
    State(db): State<Database>,
    Query(query): Query<AppointmentListQuery>,
) -> Result<Json<Value>, AppError> {
    let appointments = AppointmentService::new(&db)
        .list_appointments(query.doctor_ids.into_inner())
        .await?;

    Ok(Json(json!(appointments)))
}

#[axum::debug_handler]
pub async fn create_appointment(
    State(db): State<Database>,
    Json(request): Json<CreateAppointmentRequest>,
) -> Result<Json<Value>, AppError> {
    let appointment = AppointmentService::new(&db).create_appointment(request).await?;

    Ok(Json(json!(appointment)))
}

#[axum::debug_handler]
pub async fn delete_appointment(
    State(db): State<Database>,
    Path(appointment_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    AppointmentService::new(&db).delete_appointment(&appointment_id).await?;

    Ok(Json(json!({ "status": "deleted" })))
}

#[axum::debug_handler]
pub async fn reorder_appointments(
    State(db): State<Database>,
    Json(request): Json<ReorderRequest>,
) -> Result<Json<Value>, AppError> {
    AppointmentService::new(&db).reorder(request.ids).await?;

    Ok(Json(json!({ "status": "reordered" })))
}

#[axum::debug_handler]
pub async fn move_appointment(
    State(db): State<Database>,
    Path(appointment_id): Path<String>,
    Json(request): Json<MoveRequest>,
) -> Result<Json<Value>, AppError> {
    AppointmentService::new(&db)
        .move_appointment(&appointment_id, request.day, request.session)
        .await?;

    Ok(Json(json!({ "status": "moved" })))
}

// ==============================================================================
// BLOCKING HANDLERS
// ==============================================================================

#[axum::debug_handler]
pub async fn list_blocked_days(
    State(db): State<Database>,
    Query(query): Query<BlockedDaysQuery>,
) -> Result<Json<Value>, AppError> {
    let days = BlockingService::new(&db).list_blocked_days(&query.doctor_id).await?;

    Ok(Json(json!(days)))
}

#[axum::debug_handler]
pub async fn toggle_blocked_day(
    State(db): State<Database>,
    Json(block): Json<BlockedDay>,
) -> Result<Json<Value>, AppError> {
    let state = BlockingService::new(&db).toggle_blocked_day(block).await?;

    Ok(Json(json!({ "status": state.as_str() })))
}

#[axum::debug_handler]
pub async fn list_global_blocks(
    State(db): State<Database>,
    Query(query): Query<GlobalBlocksQuery>,
) -> Result<Json<Value>, AppError> {
    let blocks = BlockingService::new(&db)
        .list_global_blocks(query.doctor_ids.into_inner())
        .await?;

    Ok(Json(json!(blocks)))
}

#[axum::debug_handler]
pub async fn toggle_global_block(
    State(db): State<Database>,
    Json(block): Json<GlobalBlock>,
) -> Result<Json<Value>, AppError> {
    let state = BlockingService::new(&db).toggle_global_block(block).await?;

    Ok(Json(json!({
        "status": "toggled",
        "blocked": state.is_blocked()
    })))
}
