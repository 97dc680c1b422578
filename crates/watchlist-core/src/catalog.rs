use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info};
use watchlist_models::RemoteMovie;
use watchlist_store::SUGGESTED_MOVIES;
use crate::error::CatalogError;

/// A list of movies that can be imported into the watchlist
#[async_trait]
pub trait MovieCatalog: Send + Sync {
    /// Short name shown to the user, e.g. in "Imported 3 new movies from <name>"
    fn name(&self) -> &str;

    async fn fetch_movies(&self) -> Result<Vec<RemoteMovie>, CatalogError>;
}

/// Remote JSON endpoint returning `[{ "title", "year", "rating"? }, ...]`
#[derive(Clone)]
pub struct HttpCatalog {
    client: Client,
    url: String,
}

impl HttpCatalog {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn fetch_failed(&self, reason: impl ToString) -> CatalogError {
        CatalogError::ImportFetchFailed {
            url: self.url.clone(),
            reason: reason.to_string(),
        }
    }
}

#[async_trait]
impl MovieCatalog for HttpCatalog {
    fn name(&self) -> &str {
        "remote catalog"
    }

    async fn fetch_movies(&self) -> Result<Vec<RemoteMovie>, CatalogError> {
        debug!("Fetching movies from {}", self.url);

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| self.fetch_failed(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(self.fetch_failed(format!("HTTP {}", status)));
        }

        let body = response.text().await.map_err(|e| self.fetch_failed(e))?;
        let movies = parse_catalog_body(&self.url, &body)?;
        info!("Fetched {} movies from {}", movies.len(), self.url);
        Ok(movies)
    }
}

pub(crate) fn parse_catalog_body(url: &str, body: &str) -> Result<Vec<RemoteMovie>, CatalogError> {
    serde_json::from_str(body).map_err(|e| CatalogError::Decode {
        url: url.to_string(),
        reason: e.to_string(),
    })
}

/// The built-in list of well-known films, importable like a remote catalog
#[derive(Debug, Clone, Copy, Default)]
pub struct SuggestedCatalog;

#[async_trait]
impl MovieCatalog for SuggestedCatalog {
    fn name(&self) -> &str {
        "suggestions"
    }

    async fn fetch_movies(&self) -> Result<Vec<RemoteMovie>, CatalogError> {
        Ok(SUGGESTED_MOVIES
            .iter()
            .map(|s| RemoteMovie::new(s.title, Some(s.year), s.rating))
            .collect())
    }
}
