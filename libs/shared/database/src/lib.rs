pub mod error;
pub mod schema;
pub mod sqlite;

pub use error::DatabaseError;
pub use sqlite::{placeholders, skip_undecodable, Database};
