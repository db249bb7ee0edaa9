// libs/appointment-cell/src/services/booking.rs
use std::collections::HashMap;

use rusqlite::{params, params_from_iter, Row};
use tracing::{debug, info};
use uuid::Uuid;

use shared_database::{placeholders, skip_undecodable, Database};
use shared_models::{Session, Weekday};

use crate::models::{Appointment, AppointmentError, Bucket, CreateAppointmentRequest};
use crate::services::ranking::{common_bucket, next_rank, positional_ranks, sort_for_display};

const APPOINTMENT_COLUMNS: &str = "id, doctor_id, day, session, patient_name, patient_r4, \
                                   duration, type, other_type_details, rank";

fn appointment_from_row(row: &Row<'_>) -> rusqlite::Result<Appointment> {
    Ok(Appointment {
        id: row.get(0)?,
        doctor_id: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
        day: row.get(2)?,
        session: row.get(3)?,
        patient_name: row.get::<_, Option<String>>(4)?.unwrap_or_default(),
        patient_r4: row.get::<_, Option<String>>(5)?.unwrap_or_default(),
        duration: row.get::<_, Option<String>>(6)?.unwrap_or_default(),
        appointment_type: row.get::<_, Option<String>>(7)?.unwrap_or_default(),
        other_type_details: row.get(8)?,
        rank: row.get::<_, Option<i64>>(9)?.unwrap_or_default(),
    })
}

pub struct AppointmentService {
    db: Database,
}

impl AppointmentService {
    pub fn new(db: &Database) -> Self {
        Self { db: db.clone() }
    }

    /// Append a new appointment to the end of its bucket.
    pub async fn create_appointment(
        &self,
        request: CreateAppointmentRequest,
    ) -> Result<Appointment, AppointmentError> {
        debug!(
            "Creating appointment for doctor {} on {} {}",
            request.doctor_id, request.day, request.session
        );

        let id = Uuid::new_v4().to_string();
        let appointment = self
            .db
            .call(move |conn| {
                let tx = conn.transaction()?;

                let current_max: Option<i64> = tx.query_row(
                    "SELECT MAX(rank) FROM appointments WHERE doctor_id = ?1 AND day = ?2 AND session = ?3",
                    params![request.doctor_id, request.day, request.session],
                    |row| row.get(0),
                )?;

                let appointment = Appointment {
                    id,
                    doctor_id: request.doctor_id,
                    day: request.day,
                    session: request.session,
                    patient_name: request.patient_name,
                    patient_r4: request.patient_r4,
                    duration: request.duration,
                    appointment_type: request.appointment_type,
                    other_type_details: request.other_type_details,
                    rank: next_rank(current_max),
                };

                tx.execute(
                    "INSERT INTO appointments
                     (id, doctor_id, day, session, patient_name, patient_r4, duration, type, other_type_details, rank)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
                    params![
                        appointment.id,
                        appointment.doctor_id,
                        appointment.day,
                        appointment.session,
                        appointment.patient_name,
                        appointment.patient_r4,
                        appointment.duration,
                        appointment.appointment_type,
                        appointment.other_type_details,
                        appointment.rank,
                    ],
                )?;
                tx.commit()?;

                Ok::<_, AppointmentError>(appointment)
            })
            .await?;

        info!("Created appointment {} with rank {}", appointment.id, appointment.rank);
        Ok(appointment)
    }

    /// Every appointment of the given practitioners, across all buckets.
    pub async fn list_appointments(
        &self,
        doctor_ids: Vec<String>,
    ) -> Result<Vec<Appointment>, AppointmentError> {
        if doctor_ids.is_empty() {
            return Ok(Vec::new());
        }
        debug!("Listing appointments for {} doctors", doctor_ids.len());

        let mut appointments = self
            .db
            .call(move |conn| {
                let mut stmt = conn.prepare(&format!(
                    "SELECT {} FROM appointments WHERE doctor_id IN ({}) ORDER BY rowid",
                    APPOINTMENT_COLUMNS,
                    placeholders(doctor_ids.len())
                ))?;
                let appointments = skip_undecodable(
                    stmt.query_map(params_from_iter(doctor_ids.iter()), appointment_from_row)?,
                    "appointments",
                )?;
                Ok::<_, AppointmentError>(appointments)
            })
            .await?;

        sort_for_display(&mut appointments);
        Ok(appointments)
    }

    pub async fn delete_appointment(&self, appointment_id: &str) -> Result<(), AppointmentError> {
        debug!("Deleting appointment: {}", appointment_id);

        let appointment_id = appointment_id.to_string();
        self.db
            .call(move |conn| {
                conn.execute("DELETE FROM appointments WHERE id = ?1", params![appointment_id])?;
                Ok(())
            })
            .await
    }

    /// Rewrite ranks so that `ids[i]` gets rank `i`.
    ///
    /// All ids must exist and share one bucket; nothing is written otherwise.
    pub async fn reorder(&self, ids: Vec<String>) -> Result<(), AppointmentError> {
        let ranks = positional_ranks(&ids)?;
        if ranks.is_empty() {
            return Ok(());
        }
        debug!("Reordering {} appointments", ranks.len());

        let bucket = self
            .db
            .call(move |conn| {
                let tx = conn.transaction()?;

                let buckets: HashMap<String, Bucket> = {
                    let mut stmt = tx.prepare(&format!(
                        "SELECT id, doctor_id, day, session FROM appointments WHERE id IN ({})",
                        placeholders(ids.len())
                    ))?;
                    let rows = stmt
                        .query_map(params_from_iter(ids.iter()), |row| {
                            Ok((
                                row.get::<_, String>(0)?,
                                Bucket {
                                    doctor_id: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
                                    day: row.get(2)?,
                                    session: row.get(3)?,
                                },
                            ))
                        })?
                        .collect::<Result<HashMap<_, _>, _>>()?;
                    rows
                };

                if let Some(missing) = ids.iter().find(|id| !buckets.contains_key(*id)) {
                    return Err(AppointmentError::NotFound(missing.clone()));
                }
                let bucket = common_bucket(buckets.values())?;

                for (id, rank) in &ranks {
                    tx.execute(
                        "UPDATE appointments SET rank = ?1 WHERE id = ?2",
                        params![rank, id],
                    )?;
                }
                tx.commit()?;

                Ok(bucket)
            })
            .await?;

        if let Some(bucket) = bucket {
            info!(
                "Reordered bucket {} {} {}",
                bucket.doctor_id, bucket.day, bucket.session
            );
        }
        Ok(())
    }

    /// Move an appointment to another day/session, keeping its rank.
    pub async fn move_appointment(
        &self,
        appointment_id: &str,
        day: Weekday,
        session: Session,
    ) -> Result<(), AppointmentError> {
        debug!("Moving appointment {} to {} {}", appointment_id, day, session);

        let appointment_id = appointment_id.to_string();
        self.db
            .call(move |conn| {
                let updated = conn.execute(
                    "UPDATE appointments SET day = ?1, session = ?2 WHERE id = ?3",
                    params![day, session, appointment_id],
                )?;

                if updated == 0 {
                    return Err(AppointmentError::NotFound(appointment_id));
                }
                Ok(())
            })
            .await
    }
}
