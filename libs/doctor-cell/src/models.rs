use serde::{Deserialize, Serialize};

use shared_database::DatabaseError;
use shared_models::error::AppError;

/// Practitioner profile as exposed over the API.
///
/// `matches` is only populated by lookups that resolve connections
/// (login, `/doctors/me`, registration); search and batch reads omit it.
/// The stored password is never serialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Doctor {
    pub id: String,
    pub student_id: String,
    pub username: String,
    #[serde(skip_serializing, default)]
    pub password: String,
    pub color: String,
    pub phone: Option<String>,
    pub country_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matches: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub student_id: String,
    pub username: String,
    pub password: String,
    pub phone: Option<String>,
    pub country_code: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub student_id: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColorUpdate {
    pub color: String,
}

/// Pending connection request, addressed by student id rather than by
/// practitioner id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRequest {
    pub id: String,
    pub from_id: String,
    pub from_name: String,
    pub to_student_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendMatchRequest {
    pub from_id: String,
    pub from_name: String,
    pub to_student_id: String,
}

/// Result of accepting a request. `target_id` is `None` when the addressed
/// student id no longer resolves; the request is consumed either way.
#[derive(Debug, Clone, PartialEq)]
pub struct AcceptedMatch {
    pub request: MatchRequest,
    pub target_id: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum DoctorError {
    #[error("Student ID already exists")]
    StudentIdTaken(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Doctor not found")]
    NotFound(String),

    #[error("Student ID not found")]
    StudentIdNotFound(String),

    #[error("Cannot match with self")]
    SelfMatch,

    #[error("Match request not found")]
    RequestNotFound(String),

    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),
}

impl From<rusqlite::Error> for DoctorError {
    fn from(e: rusqlite::Error) -> Self {
        DoctorError::Database(e.into())
    }
}

impl From<DoctorError> for AppError {
    fn from(e: DoctorError) -> Self {
        match e {
            // Duplicate student ids surface as 400 on the wire.
            DoctorError::StudentIdTaken(_) | DoctorError::SelfMatch => {
                AppError::BadRequest(e.to_string())
            }
            DoctorError::InvalidCredentials => AppError::Unauthorized(e.to_string()),
            DoctorError::NotFound(_)
            | DoctorError::StudentIdNotFound(_)
            | DoctorError::RequestNotFound(_) => AppError::NotFound(e.to_string()),
            DoctorError::Database(_) => AppError::Database(e.to_string()),
        }
    }
}
