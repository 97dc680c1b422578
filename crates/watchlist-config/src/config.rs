use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use watchlist_models::{SortOption, WatchedFilter};
use crate::paths::PathManager;

/// Endpoint the `import` command pulls from unless overridden
pub const DEFAULT_IMPORT_URL: &str =
    "https://67c824890acf98d0708518a5.mockapi.io/MaiThanhHaiQuan_22653671_FinalTerm_10_12";

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub import: ImportConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Overrides the platform default `data/movies.db`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    #[serde(default = "default_true")]
    pub seed_on_startup: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ImportConfig {
    #[serde(default = "default_import_url")]
    pub url: String,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default)]
    pub sort: SortOption,
    #[serde(default)]
    pub filter: WatchedFilter,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

fn default_true() -> bool {
    true
}

fn default_import_url() -> String {
    DEFAULT_IMPORT_URL.to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: None,
            seed_on_startup: default_true(),
        }
    }
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            url: default_import_url(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

impl Config {
    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load the file if it exists, otherwise return defaults
    pub fn load_or_default(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let config = Self::load_from_file(path)
            .map_err(|e| anyhow::anyhow!("Failed to load config from {}: {}", path.display(), e))?;
        config.validate()?;
        Ok(config)
    }

    pub fn save_to_file(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        let url = self.import.url.trim();
        if url.is_empty() {
            return Err(anyhow::anyhow!("import.url cannot be empty"));
        }
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(anyhow::anyhow!("import.url must start with http:// or https://: {}", url));
        }

        if let Some(path) = &self.database.path {
            if path.as_os_str().is_empty() {
                return Err(anyhow::anyhow!("database.path cannot be empty"));
            }
        }

        Ok(())
    }

    /// Effective database file: configured path or the platform default
    pub fn database_path(&self, paths: &PathManager) -> PathBuf {
        self.database
            .path
            .clone()
            .unwrap_or_else(|| paths.database_file())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_config_load_and_save() {
        let file = NamedTempFile::new().unwrap();
        let config = Config {
            database: DatabaseConfig {
                path: Some(PathBuf::from("/data/movies.db")),
                seed_on_startup: false,
            },
            import: ImportConfig {
                url: "https://example.com/movies".to_string(),
            },
            display: DisplayConfig {
                sort: SortOption::Rating,
                filter: WatchedFilter::Unwatched,
            },
            logging: LoggingConfig::default(),
        };

        config.save_to_file(file.path()).unwrap();

        let loaded = Config::load_from_file(file.path()).unwrap();
        assert_eq!(loaded.database.path, Some(PathBuf::from("/data/movies.db")));
        assert_eq!(loaded.database.seed_on_startup, false);
        assert_eq!(loaded.import.url, "https://example.com/movies");
        assert_eq!(loaded.display.sort, SortOption::Rating);
        assert_eq!(loaded.display.filter, WatchedFilter::Unwatched);
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.database.seed_on_startup);
        assert_eq!(config.database.path, None);
        assert_eq!(config.import.url, DEFAULT_IMPORT_URL);
        assert_eq!(config.display.sort, SortOption::Newest);
        assert_eq!(config.display.filter, WatchedFilter::All);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_partial_sections() {
        let config: Config = toml::from_str(
            r#"
            [display]
            sort = "year-desc"

            [database]
            seed_on_startup = false
            "#,
        )
        .unwrap();
        assert_eq!(config.display.sort, SortOption::YearDesc);
        assert_eq!(config.display.filter, WatchedFilter::All);
        assert!(!config.database.seed_on_startup);
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_or_default(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.import.url, DEFAULT_IMPORT_URL);
    }

    #[test]
    fn test_config_validate() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.import.url = "ftp://example.com".to_string();
        assert!(config.validate().is_err());

        config.import.url = "   ".to_string();
        assert!(config.validate().is_err());

        config.import.url = "http://localhost:8080/movies".to_string();
        config.database.path = Some(PathBuf::new());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_database_path_falls_back_to_platform_default() {
        let paths = PathManager::with_base(PathBuf::from("/tmp/wl"));
        let mut config = Config::default();
        assert_eq!(config.database_path(&paths), PathBuf::from("/tmp/wl/data/movies.db"));

        config.database.path = Some(PathBuf::from("/elsewhere/movies.db"));
        assert_eq!(config.database_path(&paths), PathBuf::from("/elsewhere/movies.db"));
    }
}
