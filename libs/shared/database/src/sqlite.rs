use std::path::Path;
use std::sync::{Arc, Mutex};

use rusqlite::Connection;
use tracing::{debug, info, warn};

use shared_config::AppConfig;

use crate::error::DatabaseError;
use crate::schema;

/// Shared handle to the clinic store.
///
/// One connection sits behind a mutex and every operation runs as a single
/// closure on the blocking pool while holding it, so read-then-write
/// sequences never interleave between requests.
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    pub fn from_config(config: &AppConfig) -> Result<Self, DatabaseError> {
        if config.is_in_memory() {
            Self::open_in_memory()
        } else {
            Self::open(&config.database_path)
        }
    }

    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, DatabaseError> {
        let path = path.as_ref();
        info!("Opening database at {}", path.display());
        Self::with_connection(Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self, DatabaseError> {
        debug!("Opening in-memory database");
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self, DatabaseError> {
        schema::initialize(&conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Runs `f` against the connection on the blocking pool.
    ///
    /// Callers that issue more than one write should open a transaction
    /// inside `f` and commit before returning.
    pub async fn call<F, T, E>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce(&mut Connection) -> Result<T, E> + Send + 'static,
        T: Send + 'static,
        E: From<DatabaseError> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);

        tokio::task::spawn_blocking(move || -> Result<T, E> {
            let mut guard = conn.lock().map_err(|_| DatabaseError::Poisoned)?;
            f(&mut *guard)
        })
        .await
        .map_err(DatabaseError::from)?
    }

    pub async fn ping(&self) -> Result<(), DatabaseError> {
        self.call(|conn| {
            conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0))?;
            Ok::<_, DatabaseError>(())
        })
        .await
    }
}

/// `?,?,?` placeholder list for an `IN (...)` clause of `n` values.
pub fn placeholders(n: usize) -> String {
    vec!["?"; n].join(",")
}

/// Collects decoded rows, dropping any whose column values fail to convert
/// (for example codes written by an older client). Other errors propagate.
pub fn skip_undecodable<T, I>(rows: I, table: &str) -> rusqlite::Result<Vec<T>>
where
    I: IntoIterator<Item = rusqlite::Result<T>>,
{
    let mut decoded = Vec::new();
    for row in rows {
        match row {
            Ok(value) => decoded.push(value),
            Err(rusqlite::Error::FromSqlConversionFailure(column, _, e)) => {
                warn!("Skipping {} row with undecodable column {}: {}", table, column, e);
            }
            Err(e) => return Err(e),
        }
    }
    Ok(decoded)
}
