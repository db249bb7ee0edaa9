// libs/appointment-cell/src/models.rs
use serde::{Deserialize, Serialize};

use shared_database::DatabaseError;
use shared_models::error::AppError;
use shared_models::{Session, Weekday};
use shared_utils::extractor::IdList;

// ==============================================================================
// CORE APPOINTMENT MODELS
// ==============================================================================

/// One slot entry on a practitioner's weekly calendar.
///
/// `rank` orders appointments inside their bucket only; two appointments in
/// different buckets may share a rank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: String,
    pub doctor_id: String,
    pub day: Weekday,
    pub session: Session,
    pub patient_name: String,
    pub patient_r4: String,
    pub duration: String,
    #[serde(rename = "type")]
    pub appointment_type: String,
    pub other_type_details: Option<String>,
    pub rank: i64,
}

impl Appointment {
    pub fn bucket(&self) -> Bucket {
        Bucket {
            doctor_id: self.doctor_id.clone(),
            day: self.day,
            session: self.session,
        }
    }
}

/// The (practitioner, day, session) triple that scopes rank ordering.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Bucket {
    pub doctor_id: String,
    pub day: Weekday,
    pub session: Session,
}

/// Any `rank` sent by the client is ignored; new appointments always go to
/// the end of their bucket.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAppointmentRequest {
    pub doctor_id: String,
    pub day: Weekday,
    pub session: Session,
    pub patient_name: String,
    pub patient_r4: String,
    pub duration: String,
    #[serde(rename = "type")]
    pub appointment_type: String,
    pub other_type_details: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReorderRequest {
    pub ids: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveRequest {
    pub day: Weekday,
    pub session: Session,
}

#[derive(Debug, Deserialize)]
pub struct AppointmentListQuery {
    pub doctor_ids: IdList,
}

// ==============================================================================
// BLOCKING MODELS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockedDay {
    pub doctor_id: String,
    pub day: String,
}

/// Recurring block of one weekday session, independent of calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalBlock {
    pub doctor_id: String,
    pub day_of_week: Weekday,
    pub session: Session,
}

#[derive(Debug, Deserialize)]
pub struct BlockedDaysQuery {
    pub doctor_id: String,
}

#[derive(Debug, Deserialize)]
pub struct GlobalBlocksQuery {
    pub doctor_ids: IdList,
}

/// State of a presence toggle after it has been applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleState {
    Blocked,
    Unblocked,
}

impl ToggleState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ToggleState::Blocked => "blocked",
            ToggleState::Unblocked => "unblocked",
        }
    }

    pub fn is_blocked(&self) -> bool {
        matches!(self, ToggleState::Blocked)
    }
}

// ==============================================================================
// ERRORS
// ==============================================================================

#[derive(Debug, thiserror::Error)]
pub enum AppointmentError {
    #[error("Appointment not found: {0}")]
    NotFound(String),

    #[error("Reorder ids span more than one day/session bucket")]
    MixedBuckets,

    #[error("Appointment {0} listed more than once")]
    DuplicateId(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),
}

impl From<rusqlite::Error> for AppointmentError {
    fn from(e: rusqlite::Error) -> Self {
        AppointmentError::Database(e.into())
    }
}

impl From<AppointmentError> for AppError {
    fn from(e: AppointmentError) -> Self {
        match e {
            AppointmentError::NotFound(_) => AppError::NotFound(e.to_string()),
            AppointmentError::MixedBuckets
            | AppointmentError::DuplicateId(_)
            | AppointmentError::ValidationError(_) => AppError::BadRequest(e.to_string()),
            AppointmentError::Database(_) => AppError::Database(e.to_string()),
        }
    }
}
