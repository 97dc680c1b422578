use anyhow::Result;
use std::path::PathBuf;

/// File name of the SQLite database inside the data directory
pub const DATABASE_FILE_NAME: &str = "movies.db";

pub struct PathManager {
    config_dir: PathBuf,
    data_dir: PathBuf,
    log_dir: PathBuf,
}

impl PathManager {
    pub fn new() -> Result<Self> {
        let base_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?
            .join("watchlist");

        Ok(Self::with_base(base_dir))
    }

    /// Lay out config, data and logs under an explicit base directory
    pub fn with_base(base_dir: PathBuf) -> Self {
        Self {
            config_dir: base_dir.clone(),
            data_dir: base_dir.join("data"),
            log_dir: base_dir.join("logs"),
        }
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.toml")
    }

    pub fn database_file(&self) -> PathBuf {
        self.data_dir.join(DATABASE_FILE_NAME)
    }

    /// Default log file, used when file logging is requested without a configured path
    pub fn log_file(&self) -> PathBuf {
        self.log_dir.join("watchlist.log")
    }

    pub fn ensure_directories(&self) -> Result<()> {
        std::fs::create_dir_all(&self.config_dir)?;
        std::fs::create_dir_all(&self.data_dir)?;
        std::fs::create_dir_all(&self.log_dir)?;
        Ok(())
    }
}

impl Default for PathManager {
    fn default() -> Self {
        // Fall back to the working directory when the platform has no config dir
        Self::new().unwrap_or_else(|_| Self::with_base(PathBuf::from(".watchlist")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_layout_under_base() {
        let paths = PathManager::with_base(PathBuf::from("/tmp/wl"));
        assert_eq!(paths.config_file(), PathBuf::from("/tmp/wl/config.toml"));
        assert_eq!(paths.database_file(), PathBuf::from("/tmp/wl/data/movies.db"));
        assert!(paths.database_file().ends_with(DATABASE_FILE_NAME));
        assert_eq!(paths.log_file(), PathBuf::from("/tmp/wl/logs/watchlist.log"));
    }

    #[test]
    fn test_ensure_directories() {
        let dir = TempDir::new().unwrap();
        let paths = PathManager::with_base(dir.path().join("watchlist"));
        paths.ensure_directories().unwrap();
        assert!(paths.data_dir.is_dir());
        assert!(paths.log_file().parent().unwrap().is_dir());
    }
}
