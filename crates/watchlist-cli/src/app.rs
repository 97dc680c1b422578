use color_eyre::eyre::{eyre, Context as _};
use color_eyre::Result;
use std::path::PathBuf;
use tracing::{debug, info, warn};
use watchlist_config::{Config, PathManager};
use watchlist_core::MovieList;
use watchlist_store::MovieStore;

/// Resolved configuration and file locations for one invocation
pub struct Context {
    pub paths: PathManager,
    pub config: Config,
    pub config_path: PathBuf,
    pub db_path: PathBuf,
}

impl Context {
    pub fn load(config_override: Option<PathBuf>, db_override: Option<PathBuf>) -> Result<Self> {
        let paths = PathManager::default();
        let config_path = config_override.unwrap_or_else(|| paths.config_file());

        let config = Config::load_or_default(&config_path).map_err(|e| eyre!("{:#}", e))?;
        let db_path = db_override.unwrap_or_else(|| config.database_path(&paths));

        Ok(Self {
            paths,
            config,
            config_path,
            db_path,
        })
    }

    /// Log file to write, if any: the configured path, or the default
    /// location when `--log-file` is given without one
    pub fn log_file(&self, requested: bool) -> Option<PathBuf> {
        match &self.config.logging.file {
            Some(path) => Some(path.clone()),
            None if requested => Some(self.paths.log_file()),
            None => None,
        }
    }

    /// Open the database, seed it when configured and load the list
    pub fn open_list(&self) -> Result<MovieList> {
        let mut store = MovieStore::open(self.db_path.clone())
            .wrap_err_with(|| format!("Could not open {}", self.db_path.display()))?;

        if self.config.database.seed_on_startup {
            let seeded = store.seed_if_empty()?;
            if seeded > 0 {
                info!("Seeded {} suggested movies", seeded);
            }
        }

        let mut list = MovieList::new(store);
        list.set_filter(self.config.display.filter);
        list.set_sort(self.config.display.sort);

        // A failed first load is reported through list.status()
        if let Err(e) = list.reload() {
            debug!("Initial load failed: {}", e);
        }
        Ok(list)
    }
}

/// Close the store backing `list`
pub fn shutdown(list: MovieList) {
    let mut store = list.into_store();
    if let Err(e) = store.close() {
        warn!("Failed to close database: {}", e);
    }
}
