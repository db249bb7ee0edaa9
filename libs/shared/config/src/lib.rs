use std::env;
use tracing::warn;

const DEFAULT_DATABASE_PATH: &str = "dentbook.db";
const DEFAULT_STATIC_DIR: &str = "static";
const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8000;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_path: String,
    pub static_dir: String,
    pub host: String,
    pub port: u16,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_path: DEFAULT_DATABASE_PATH.to_string(),
            static_dir: DEFAULT_STATIC_DIR.to_string(),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup so tests don't have to
    /// mutate the process environment.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_path = lookup("DATABASE_PATH").unwrap_or_else(|| {
            warn!("DATABASE_PATH not set, using {}", DEFAULT_DATABASE_PATH);
            DEFAULT_DATABASE_PATH.to_string()
        });

        let static_dir = lookup("STATIC_DIR").unwrap_or_else(|| {
            warn!("STATIC_DIR not set, using {}", DEFAULT_STATIC_DIR);
            DEFAULT_STATIC_DIR.to_string()
        });

        let host = lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = match lookup("PORT") {
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                warn!("PORT value {:?} is not a valid port, using {}", raw, DEFAULT_PORT);
                DEFAULT_PORT
            }),
            None => DEFAULT_PORT,
        };

        Self {
            database_path,
            static_dir,
            host,
            port,
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn is_in_memory(&self) -> bool {
        self.database_path == ":memory:"
    }
}
