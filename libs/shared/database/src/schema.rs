//! Table definitions and additive migrations.
//!
//! The schema only ever grows: new optional columns are appended with
//! `ALTER TABLE ... ADD COLUMN`, and re-adding a column that already exists
//! is not an error.

use rusqlite::Connection;
use tracing::debug;

use crate::error::DatabaseError;

const CREATE_TABLES: &str = "
    CREATE TABLE IF NOT EXISTS doctors (
        id TEXT PRIMARY KEY,
        student_id TEXT UNIQUE,
        username TEXT,
        password TEXT,
        color TEXT
    );
    CREATE TABLE IF NOT EXISTS matches (
        doctor_id TEXT,
        target_id TEXT,
        PRIMARY KEY (doctor_id, target_id)
    );
    CREATE TABLE IF NOT EXISTS match_requests (
        id TEXT PRIMARY KEY,
        from_id TEXT,
        from_name TEXT,
        to_student_id TEXT
    );
    CREATE TABLE IF NOT EXISTS patients (
        id TEXT PRIMARY KEY,
        doctor_id TEXT,
        name TEXT,
        r4 TEXT
    );
    CREATE TABLE IF NOT EXISTS appointments (
        id TEXT PRIMARY KEY,
        doctor_id TEXT,
        day TEXT,
        session TEXT,
        patient_name TEXT,
        patient_r4 TEXT,
        duration TEXT,
        type TEXT,
        other_type_details TEXT
    );
    CREATE TABLE IF NOT EXISTS blocked_days (
        doctor_id TEXT,
        day TEXT,
        PRIMARY KEY (doctor_id, day)
    );
    CREATE TABLE IF NOT EXISTS global_blocks (
        doctor_id TEXT,
        day_of_week TEXT,
        session TEXT,
        PRIMARY KEY (doctor_id, day_of_week, session)
    );
";

/// Columns added after the first release, in the order they shipped.
const ADDITIVE_COLUMNS: &[(&str, &str)] = &[
    ("doctors", "phone TEXT"),
    ("doctors", "country_code TEXT"),
    ("appointments", "rank INTEGER DEFAULT 0"),
];

pub fn initialize(conn: &Connection) -> Result<(), DatabaseError> {
    conn.execute_batch(CREATE_TABLES)?;

    for (table, column) in ADDITIVE_COLUMNS {
        add_column(conn, table, column)?;
    }

    Ok(())
}

fn add_column(conn: &Connection, table: &str, column_def: &str) -> Result<(), DatabaseError> {
    let sql = format!("ALTER TABLE {} ADD COLUMN {}", table, column_def);

    match conn.execute(&sql, []) {
        Ok(_) => {
            debug!("Added column {} to {}", column_def, table);
            Ok(())
        }
        Err(e) if is_duplicate_column(&e) => {
            debug!("Column {} already present on {}", column_def, table);
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

fn is_duplicate_column(err: &rusqlite::Error) -> bool {
    matches!(err, rusqlite::Error::SqliteFailure(_, Some(msg)) if msg.contains("duplicate column name"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column_names(conn: &Connection, table: &str) -> Vec<String> {
        let mut stmt = conn
            .prepare(&format!("PRAGMA table_info({})", table))
            .unwrap();
        stmt.query_map([], |row| row.get::<_, String>(1))
            .unwrap()
            .collect::<Result<Vec<_>, _>>()
            .unwrap()
    }

    #[test]
    fn fresh_database_gets_every_column() {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();

        let doctor_columns = column_names(&conn, "doctors");
        assert!(doctor_columns.contains(&"phone".to_string()));
        assert!(doctor_columns.contains(&"country_code".to_string()));
        assert!(column_names(&conn, "appointments").contains(&"rank".to_string()));
    }

    #[test]
    fn initialize_is_repeatable() {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        initialize(&conn).unwrap();

        let rank_columns = column_names(&conn, "appointments")
            .into_iter()
            .filter(|name| name == "rank")
            .count();
        assert_eq!(rank_columns, 1);
    }

    #[test]
    fn legacy_tables_are_extended_in_place() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE doctors (id TEXT PRIMARY KEY, student_id TEXT UNIQUE,
                                   username TEXT, password TEXT, color TEXT);
             INSERT INTO doctors VALUES ('d1', 's1', 'alice', 'pw', '#000000');",
        )
        .unwrap();

        initialize(&conn).unwrap();

        let phone: Option<String> = conn
            .query_row("SELECT phone FROM doctors WHERE id = 'd1'", [], |row| row.get(0))
            .unwrap();
        assert_eq!(phone, None);
    }

    #[test]
    fn other_alter_failures_propagate() {
        let conn = Connection::open_in_memory().unwrap();
        assert!(add_column(&conn, "no_such_table", "x TEXT").is_err());
    }
}
