// libs/doctor-cell/src/services/matching.rs
use rusqlite::{params, OptionalExtension, Row};
use tracing::{debug, info, warn};
use uuid::Uuid;

use shared_database::Database;

use crate::models::{AcceptedMatch, DoctorError, MatchRequest, SendMatchRequest};
use crate::services::doctor::find_id_by_student_id;

fn match_request_from_row(row: &Row<'_>) -> rusqlite::Result<MatchRequest> {
    Ok(MatchRequest {
        id: row.get(0)?,
        from_id: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
        from_name: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
        to_student_id: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
    })
}

/// Two-phase connection handshake between practitioners: a request is
/// addressed to a student id, and accepting it links both sides.
pub struct MatchingService {
    db: Database,
}

impl MatchingService {
    pub fn new(db: &Database) -> Self {
        Self { db: db.clone() }
    }

    pub async fn send_request(&self, request: SendMatchRequest) -> Result<MatchRequest, DoctorError> {
        debug!(
            "Match request from {} to student id {}",
            request.from_id, request.to_student_id
        );

        let pending = MatchRequest {
            id: Uuid::new_v4().to_string(),
            from_id: request.from_id,
            from_name: request.from_name,
            to_student_id: request.to_student_id,
        };

        let record = pending.clone();
        self.db
            .call(move |conn| {
                let target_id = find_id_by_student_id(conn, &record.to_student_id)?
                    .ok_or_else(|| DoctorError::StudentIdNotFound(record.to_student_id.clone()))?;

                if target_id == record.from_id {
                    return Err(DoctorError::SelfMatch);
                }

                conn.execute(
                    "INSERT INTO match_requests (id, from_id, from_name, to_student_id)
                     VALUES (?1, ?2, ?3, ?4)",
                    params![record.id, record.from_id, record.from_name, record.to_student_id],
                )?;
                Ok(())
            })
            .await?;

        Ok(pending)
    }

    pub async fn incoming_requests(&self, to_student_id: &str) -> Result<Vec<MatchRequest>, DoctorError> {
        let to_student_id = to_student_id.to_string();
        self.db
            .call(move |conn| {
                let mut stmt = conn.prepare(
                    "SELECT id, from_id, from_name, to_student_id FROM match_requests
                     WHERE to_student_id = ?1 ORDER BY rowid",
                )?;
                let requests = stmt
                    .query_map(params![to_student_id], match_request_from_row)?
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(requests)
            })
            .await
    }

    /// Consume a pending request and link both practitioners.
    ///
    /// Existing links are left intact. The request is deleted even when its
    /// student id no longer resolves to anyone.
    pub async fn accept_request(&self, request_id: &str) -> Result<AcceptedMatch, DoctorError> {
        let request_id = request_id.to_string();
        let accepted = self
            .db
            .call(move |conn| {
                let tx = conn.transaction()?;

                let request = tx
                    .query_row(
                        "SELECT id, from_id, from_name, to_student_id FROM match_requests WHERE id = ?1",
                        params![request_id],
                        match_request_from_row,
                    )
                    .optional()?
                    .ok_or_else(|| DoctorError::RequestNotFound(request_id.clone()))?;

                let target_id = find_id_by_student_id(&tx, &request.to_student_id)?;

                if let Some(target_id) = &target_id {
                    for (doctor_id, other_id) in [(target_id, &request.from_id), (&request.from_id, target_id)] {
                        tx.execute(
                            "INSERT OR IGNORE INTO matches (doctor_id, target_id) VALUES (?1, ?2)",
                            params![doctor_id, other_id],
                        )?;
                    }
                }

                tx.execute("DELETE FROM match_requests WHERE id = ?1", params![request.id])?;
                tx.commit()?;

                Ok::<_, DoctorError>(AcceptedMatch { request, target_id })
            })
            .await?;

        match &accepted.target_id {
            Some(target_id) => info!("Linked doctors {} and {}", accepted.request.from_id, target_id),
            None => warn!(
                "Match request {} consumed but student id {} no longer resolves",
                accepted.request.id, accepted.request.to_student_id
            ),
        }

        Ok(accepted)
    }

    /// Removes the (doctor_id, target_id) direction only.
    pub async fn remove_match(&self, doctor_id: &str, target_id: &str) -> Result<(), DoctorError> {
        debug!("Removing match {} -> {}", doctor_id, target_id);

        let (doctor_id, target_id) = (doctor_id.to_string(), target_id.to_string());
        self.db
            .call(move |conn| {
                conn.execute(
                    "DELETE FROM matches WHERE doctor_id = ?1 AND target_id = ?2",
                    params![doctor_id, target_id],
                )?;
                Ok(())
            })
            .await
    }
}
