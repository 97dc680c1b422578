pub mod config;
pub mod paths;

pub use config::{Config, DatabaseConfig, DisplayConfig, ImportConfig, LoggingConfig, DEFAULT_IMPORT_URL};
pub use paths::{PathManager, DATABASE_FILE_NAME};
