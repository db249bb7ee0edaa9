use rusqlite::{params, Row};
use tracing::debug;
use uuid::Uuid;

use shared_database::Database;

use crate::models::{CreatePatientRequest, Patient, PatientError};

fn patient_from_row(row: &Row<'_>) -> rusqlite::Result<Patient> {
    Ok(Patient {
        id: row.get(0)?,
        doctor_id: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
        name: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
        r4: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
    })
}

pub struct PatientService {
    db: Database,
}

impl PatientService {
    pub fn new(db: &Database) -> Self {
        Self { db: db.clone() }
    }

    pub async fn list_patients(&self, doctor_id: &str) -> Result<Vec<Patient>, PatientError> {
        debug!("Listing patients for doctor: {}", doctor_id);

        let doctor_id = doctor_id.to_string();
        self.db
            .call(move |conn| {
                let mut stmt = conn.prepare(
                    "SELECT id, doctor_id, name, r4 FROM patients WHERE doctor_id = ?1 ORDER BY rowid",
                )?;
                let patients = stmt
                    .query_map(params![doctor_id], patient_from_row)?
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(patients)
            })
            .await
    }

    pub async fn create_patient(&self, request: CreatePatientRequest) -> Result<Patient, PatientError> {
        debug!("Adding patient {} for doctor {}", request.name, request.doctor_id);

        let patient = Patient {
            id: Uuid::new_v4().to_string(),
            doctor_id: request.doctor_id,
            name: request.name,
            r4: request.r4.unwrap_or_default(),
        };

        let record = patient.clone();
        self.db
            .call(move |conn| {
                conn.execute(
                    "INSERT INTO patients (id, doctor_id, name, r4) VALUES (?1, ?2, ?3, ?4)",
                    params![record.id, record.doctor_id, record.name, record.r4],
                )?;
                Ok::<_, PatientError>(())
            })
            .await?;

        Ok(patient)
    }

    /// Deletes by id alone; ownership is not checked.
    pub async fn delete_patient(&self, patient_id: &str) -> Result<(), PatientError> {
        debug!("Deleting patient: {}", patient_id);

        let patient_id = patient_id.to_string();
        self.db
            .call(move |conn| {
                conn.execute("DELETE FROM patients WHERE id = ?1", params![patient_id])?;
                Ok(())
            })
            .await
    }
}
