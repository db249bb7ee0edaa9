use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use shared_database::Database;
use shared_models::error::AppError;
use shared_utils::extractor::IdList;

use crate::models::{ColorUpdate, LoginRequest, RegisterRequest, SendMatchRequest};
use crate::services::{DoctorService, MatchingService};

#[derive(Debug, Deserialize)]
pub struct ProfileQuery {
    pub id: String,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub student_id: String,
}

#[derive(Debug, Deserialize)]
pub struct BatchQuery {
    pub ids: IdList,
}

#[derive(Debug, Deserialize)]
pub struct IncomingRequestsQuery {
    pub to_student_id: String,
}

// ==============================================================================
// IDENTITY
// ==============================================================================

#[axum::debug_handler]
pub async fn register(
    State(db): State<Database>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let doctor = DoctorService::new(&db).register(request).await?;

    Ok((StatusCode::CREATED, Json(json!(doctor))))
}

#[axum::debug_handler]
pub async fn login(
    State(db): State<Database>,
    Json(credentials): Json<LoginRequest>,
) -> Result<Json<Value>, AppError> {
    let doctor = DoctorService::new(&db)
        .login(&credentials.student_id, &credentials.password)
        .await?;

    Ok(Json(json!(doctor)))
}

#[axum::debug_handler]
pub async fn get_me(
    State(db): State<Database>,
    Query(query): Query<ProfileQuery>,
) -> Result<Json<Value>, AppError> {
    let doctor = DoctorService::new(&db).get_doctor(&query.id).await?;

    Ok(Json(json!(doctor)))
}

#[axum::debug_handler]
pub async fn search_doctors(
    State(db): State<Database>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Value>, AppError> {
    let doctors = DoctorService::new(&db).search_doctors(&query.student_id).await?;

    Ok(Json(json!(doctors)))
}

#[axum::debug_handler]
pub async fn get_doctors_batch(
    State(db): State<Database>,
    Query(query): Query<BatchQuery>,
) -> Result<Json<Value>, AppError> {
    let doctors = DoctorService::new(&db)
        .get_doctors_batch(query.ids.into_inner())
        .await?;

    Ok(Json(json!(doctors)))
}

#[axum::debug_handler]
pub async fn update_color(
    State(db): State<Database>,
    Path(doctor_id): Path<String>,
    Json(update): Json<ColorUpdate>,
) -> Result<Json<Value>, AppError> {
    DoctorService::new(&db).update_color(&doctor_id, &update.color).await?;

    Ok(Json(json!({ "status": "updated" })))
}

// ==============================================================================
// MATCHING
// ==============================================================================

#[axum::debug_handler]
pub async fn send_match_request(
    State(db): State<Database>,
    Json(request): Json<SendMatchRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let pending = MatchingService::new(&db).send_request(request).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Request sent",
            "request_id": pending.id
        })),
    ))
}

#[axum::debug_handler]
pub async fn get_match_requests(
    State(db): State<Database>,
    Query(query): Query<IncomingRequestsQuery>,
) -> Result<Json<Value>, AppError> {
    let requests = MatchingService::new(&db)
        .incoming_requests(&query.to_student_id)
        .await?;

    Ok(Json(json!(requests)))
}

#[axum::debug_handler]
pub async fn accept_match(
    State(db): State<Database>,
    Path(request_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let accepted = MatchingService::new(&db).accept_request(&request_id).await?;

    Ok(Json(json!({
        "message": "Matched",
        "linked": accepted.target_id.is_some()
    })))
}

#[axum::debug_handler]
pub async fn remove_match(
    State(db): State<Database>,
    Path((doctor_id, target_id)): Path<(String, String)>,
) -> Result<Json<Value>, AppError> {
    MatchingService::new(&db).remove_match(&doctor_id, &target_id).await?;

    Ok(Json(json!({ "status": "removed" })))
}
