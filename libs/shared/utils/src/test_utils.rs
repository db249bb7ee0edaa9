use rusqlite::params;
use uuid::Uuid;

use shared_database::{Database, DatabaseError};

pub fn test_database() -> Database {
    Database::open_in_memory().expect("in-memory database should open")
}

/// Practitioner row inserted directly into the store, bypassing registration.
pub struct TestDoctor {
    pub id: String,
    pub student_id: String,
    pub username: String,
    pub password: String,
    pub color: String,
}

impl TestDoctor {
    pub fn new(student_id: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            student_id: student_id.to_string(),
            username: format!("dr-{}", student_id),
            password: "secret".to_string(),
            color: "#3b82f6".to_string(),
        }
    }

    pub fn with_password(mut self, password: &str) -> Self {
        self.password = password.to_string();
        self
    }

    pub async fn insert(self, db: &Database) -> Self {
        let (id, student_id, username, password, color) = (
            self.id.clone(),
            self.student_id.clone(),
            self.username.clone(),
            self.password.clone(),
            self.color.clone(),
        );

        db.call(move |conn| {
            conn.execute(
                "INSERT INTO doctors (id, student_id, username, password, color)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![id, student_id, username, password, color],
            )?;
            Ok::<_, DatabaseError>(())
        })
        .await
        .expect("test doctor insert");

        self
    }
}

/// Row count for a table, for assertions about side effects.
pub async fn count_rows(db: &Database, table: &'static str) -> i64 {
    db.call(move |conn| {
        let n = conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| row.get(0))?;
        Ok::<_, DatabaseError>(n)
    })
    .await
    .expect("row count")
}
