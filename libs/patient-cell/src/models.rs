use serde::{Deserialize, Serialize};

use shared_database::DatabaseError;
use shared_models::error::AppError;

/// Roster entry owned by one practitioner. `r4` is the clinic's secondary
/// patient identifier and is stored as an empty string when not supplied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    pub id: String,
    pub doctor_id: String,
    pub name: String,
    pub r4: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePatientRequest {
    pub doctor_id: String,
    pub name: String,
    pub r4: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PatientListQuery {
    pub doctor_id: String,
}

#[derive(Debug, thiserror::Error)]
pub enum PatientError {
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),
}

impl From<rusqlite::Error> for PatientError {
    fn from(e: rusqlite::Error) -> Self {
        PatientError::Database(e.into())
    }
}

impl From<PatientError> for AppError {
    fn from(e: PatientError) -> Self {
        AppError::Database(e.to_string())
    }
}
