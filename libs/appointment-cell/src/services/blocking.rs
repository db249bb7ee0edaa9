use rusqlite::{params, params_from_iter};
use tracing::debug;

use shared_database::{placeholders, skip_undecodable, Database};

use crate::models::{AppointmentError, BlockedDay, GlobalBlock, ToggleState};

/// Per-practitioner day blocks and recurring weekday/session blocks.
///
/// Both are presence toggles: the delete runs first and an insert only
/// follows when nothing was removed, inside one transaction.
pub struct BlockingService {
    db: Database,
}

impl BlockingService {
    pub fn new(db: &Database) -> Self {
        Self { db: db.clone() }
    }

    pub async fn toggle_blocked_day(&self, block: BlockedDay) -> Result<ToggleState, AppointmentError> {
        if block.day.trim().is_empty() {
            return Err(AppointmentError::ValidationError("day must not be empty".to_string()));
        }
        debug!("Toggling blocked day {} for doctor {}", block.day, block.doctor_id);

        self.db
            .call(move |conn| {
                let tx = conn.transaction()?;

                let removed = tx.execute(
                    "DELETE FROM blocked_days WHERE doctor_id = ?1 AND day = ?2",
                    params![block.doctor_id, block.day],
                )?;
                if removed == 0 {
                    tx.execute(
                        "INSERT INTO blocked_days (doctor_id, day) VALUES (?1, ?2)",
                        params![block.doctor_id, block.day],
                    )?;
                }
                tx.commit()?;

                Ok(if removed == 0 { ToggleState::Blocked } else { ToggleState::Unblocked })
            })
            .await
    }

    pub async fn list_blocked_days(&self, doctor_id: &str) -> Result<Vec<String>, AppointmentError> {
        let doctor_id = doctor_id.to_string();
        self.db
            .call(move |conn| {
                let mut stmt =
                    conn.prepare("SELECT day FROM blocked_days WHERE doctor_id = ?1 ORDER BY rowid")?;
                let days = stmt
                    .query_map(params![doctor_id], |row| row.get(0))?
                    .collect::<Result<Vec<String>, _>>()?;
                Ok(days)
            })
            .await
    }

    pub async fn toggle_global_block(&self, block: GlobalBlock) -> Result<ToggleState, AppointmentError> {
        debug!(
            "Toggling global block {} {} for doctor {}",
            block.day_of_week, block.session, block.doctor_id
        );

        self.db
            .call(move |conn| {
                let tx = conn.transaction()?;

                let removed = tx.execute(
                    "DELETE FROM global_blocks WHERE doctor_id = ?1 AND day_of_week = ?2 AND session = ?3",
                    params![block.doctor_id, block.day_of_week, block.session],
                )?;
                if removed == 0 {
                    tx.execute(
                        "INSERT INTO global_blocks (doctor_id, day_of_week, session) VALUES (?1, ?2, ?3)",
                        params![block.doctor_id, block.day_of_week, block.session],
                    )?;
                }
                tx.commit()?;

                Ok(if removed == 0 { ToggleState::Blocked } else { ToggleState::Unblocked })
            })
            .await
    }

    pub async fn list_global_blocks(
        &self,
        doctor_ids: Vec<String>,
    ) -> Result<Vec<GlobalBlock>, AppointmentError> {
        if doctor_ids.is_empty() {
            return Ok(Vec::new());
        }

        self.db
            .call(move |conn| {
                let mut stmt = conn.prepare(&format!(
                    "SELECT doctor_id, day_of_week, session FROM global_blocks
                     WHERE doctor_id IN ({}) ORDER BY rowid",
                    placeholders(doctor_ids.len())
                ))?;
                let rows = stmt.query_map(params_from_iter(doctor_ids.iter()), |row| {
                    Ok(GlobalBlock {
                        doctor_id: row.get(0)?,
                        day_of_week: row.get(1)?,
                        session: row.get(2)?,
                    })
                })?;
                let blocks = skip_undecodable(rows, "global_blocks")?;
                Ok(blocks)
            })
            .await
    }
}
