use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde_json::{json, Value};

use shared_database::Database;
use shared_models::error::AppError;

use crate::models::{CreatePatientRequest, PatientListQuery};
use crate::services::PatientService;

#[axum::debug_handler]
pub async fn list_patients(
    State(db): State<Database>,
    Query(query): Query<PatientListQuery>,
) -> Result<Json<Value>, AppError> {
    let service = PatientService::new(&db);

    let patients = service.list_patients(&query.doctor_id).await?;

    Ok(Json(json!(patients)))
}

#[axum::debug_handler]
pub async fn create_patient(
    State(db): State<Database>,
    Json(request): Json<CreatePatientRequest>,
) -> Result<Json<Value>, AppError> {
    let service = PatientService::new(&db);

    let patient = service.create_patient(request).await?;

    Ok(Json(json!(patient)))
}

#[axum::debug_handler]
pub async fn delete_patient(
    State(db): State<Database>,
    Path(patient_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let service = PatientService::new(&db);

    service.delete_patient(&patient_id).await?;

    Ok(Json(json!({ "status": "deleted" })))
}
