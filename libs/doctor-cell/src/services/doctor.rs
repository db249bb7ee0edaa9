use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};
use tracing::{debug, info};
use uuid::Uuid;

use shared_database::{placeholders, Database};
use shared_utils::color::random_hex_color;

use crate::models::{Doctor, DoctorError, RegisterRequest};

const DOCTOR_COLUMNS: &str = "id, student_id, username, password, color, phone, country_code";

pub(crate) fn doctor_from_row(row: &Row<'_>) -> rusqlite::Result<Doctor> {
    Ok(Doctor {
        id: row.get(0)?,
        student_id: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
        username: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
        password: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
        color: row.get::<_, Option<String>>(4)?.unwrap_or_default(),
        phone: row.get(5)?,
        country_code: row.get(6)?,
        matches: None,
    })
}

/// Ids of every practitioner `doctor_id` is connected to.
pub(crate) fn connected_ids(conn: &Connection, doctor_id: &str) -> rusqlite::Result<Vec<String>> {
    let mut stmt = conn.prepare("SELECT target_id FROM matches WHERE doctor_id = ?1 ORDER BY rowid")?;
    let ids = stmt
        .query_map(params![doctor_id], |row| row.get(0))?
        .collect::<Result<Vec<String>, _>>()?;
    Ok(ids)
}

pub(crate) fn find_id_by_student_id(
    conn: &Connection,
    student_id: &str,
) -> rusqlite::Result<Option<String>> {
    conn.query_row(
        "SELECT id FROM doctors WHERE student_id = ?1",
        params![student_id],
        |row| row.get(0),
    )
    .optional()
}

fn with_matches(conn: &Connection, mut doctor: Doctor) -> rusqlite::Result<Doctor> {
    doctor.matches = Some(connected_ids(conn, &doctor.id)?);
    Ok(doctor)
}

pub struct DoctorService {
    db: Database,
}

impl DoctorService {
    pub fn new(db: &Database) -> Self {
        Self { db: db.clone() }
    }

    /// Create a practitioner with a generated id and a random display color.
    pub async fn register(&self, request: RegisterRequest) -> Result<Doctor, DoctorError> {
        debug!("Registering doctor with student id: {}", request.student_id);

        let doctor = Doctor {
            id: Uuid::new_v4().to_string(),
            student_id: request.student_id,
            username: request.username,
            password: request.password,
            color: random_hex_color(),
            phone: request.phone,
            country_code: request.country_code,
            matches: Some(Vec::new()),
        };

        let record = doctor.clone();
        self.db
            .call(move |conn| {
                if find_id_by_student_id(conn, &record.student_id)?.is_some() {
                    return Err(DoctorError::StudentIdTaken(record.student_id));
                }

                conn.execute(
                    "INSERT INTO doctors (id, student_id, username, password, color, phone, country_code)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                    params![
                        record.id,
                        record.student_id,
                        record.username,
                        record.password,
                        record.color,
                        record.phone,
                        record.country_code,
                    ],
                )?;
                Ok(())
            })
            .await?;

        info!("Registered doctor {} ({})", doctor.id, doctor.student_id);
        Ok(doctor)
    }

    pub async fn login(&self, student_id: &str, password: &str) -> Result<Doctor, DoctorError> {
        debug!("Login attempt for student id: {}", student_id);

        let (student_id, password) = (student_id.to_string(), password.to_string());
        self.db
            .call(move |conn| {
                let doctor = conn
                    .query_row(
                        &format!(
                            "SELECT {} FROM doctors WHERE student_id = ?1 AND password = ?2",
                            DOCTOR_COLUMNS
                        ),
                        params![student_id, password],
                        doctor_from_row,
                    )
                    .optional()?
                    .ok_or(DoctorError::InvalidCredentials)?;

                Ok(with_matches(conn, doctor)?)
            })
            .await
    }

    pub async fn get_doctor(&self, doctor_id: &str) -> Result<Doctor, DoctorError> {
        debug!("Fetching doctor profile: {}", doctor_id);

        let doctor_id = doctor_id.to_string();
        self.db
            .call(move |conn| {
                let doctor = conn
                    .query_row(
                        &format!("SELECT {} FROM doctors WHERE id = ?1", DOCTOR_COLUMNS),
                        params![doctor_id],
                        doctor_from_row,
                    )
                    .optional()?
                    .ok_or_else(|| DoctorError::NotFound(doctor_id.clone()))?;

                Ok(with_matches(conn, doctor)?)
            })
            .await
    }

    /// Literal, ASCII case-insensitive substring match on student id; an empty
    /// fragment matches everyone.
    pub async fn search_doctors(&self, fragment: &str) -> Result<Vec<Doctor>, DoctorError> {
        debug!("Searching doctors by student id fragment: {:?}", fragment);

        let fragment = fragment.to_string();
        self.db
            .call(move |conn| {
                let mut stmt = conn.prepare(&format!(
                    "SELECT {} FROM doctors WHERE instr(lower(student_id), lower(?1)) > 0 ORDER BY rowid",
                    DOCTOR_COLUMNS
                ))?;
                let doctors = stmt
                    .query_map(params![fragment], doctor_from_row)?
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(doctors)
            })
            .await
    }

    pub async fn get_doctors_batch(&self, ids: Vec<String>) -> Result<Vec<Doctor>, DoctorError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        debug!("Fetching {} doctor profiles", ids.len());

        self.db
            .call(move |conn| {
                let mut stmt = conn.prepare(&format!(
                    "SELECT {} FROM doctors WHERE id IN ({}) ORDER BY rowid",
                    DOCTOR_COLUMNS,
                    placeholders(ids.len())
                ))?;
                let doctors = stmt
                    .query_map(params_from_iter(ids.iter()), doctor_from_row)?
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(doctors)
            })
            .await
    }

    /// Unconditional overwrite; an unknown id changes nothing.
    pub async fn update_color(&self, doctor_id: &str, color: &str) -> Result<(), DoctorError> {
        debug!("Updating color for doctor {} to {}", doctor_id, color);

        let (doctor_id, color) = (doctor_id.to_string(), color.to_string());
        self.db
            .call(move |conn| {
                conn.execute(
                    "UPDATE doctors SET color = ?1 WHERE id = ?2",
                    params![color, doctor_id],
                )?;
                Ok(())
            })
            .await
    }
}
