use std::fmt;
use thiserror::Error;
use watchlist_store::StoreError;
use crate::validation::FieldErrors;

/// User-triggered operation, used to name what failed in error messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Add,
    Update,
    Delete,
    Toggle,
    Import,
    Load,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Action::Add => "add movie",
            Action::Update => "update movie",
            Action::Delete => "delete movie",
            Action::Toggle => "update watched status",
            Action::Import => "import movies",
            Action::Load => "load movies",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to fetch movies from {url}: {reason}")]
    ImportFetchFailed { url: String, reason: String },

    #[error("Invalid movie data from {url}: {reason}")]
    Decode { url: String, reason: String },
}

#[derive(Debug, Error)]
pub enum ActionError {
    #[error("Failed to {action}: {source}")]
    Store {
        action: Action,
        #[source]
        source: StoreError,
    },

    #[error("Failed to import movies: {source}")]
    Catalog {
        #[source]
        source: CatalogError,
    },
}

impl ActionError {
    pub fn store(action: Action, source: StoreError) -> Self {
        ActionError::Store { action, source }
    }

    pub fn action(&self) -> Action {
        match self {
            ActionError::Store { action, .. } => *action,
            ActionError::Catalog { .. } => Action::Import,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ActionError::Store {
                source: StoreError::NotFound { .. },
                ..
            }
        )
    }
}

impl From<CatalogError> for ActionError {
    fn from(source: CatalogError) -> Self {
        ActionError::Catalog { source }
    }
}

/// Outcome of submitting an add or edit form
#[derive(Debug, Error)]
pub enum SubmitError {
    /// Field-level problems; nothing was sent to storage
    #[error("Please fix the highlighted fields")]
    Invalid(FieldErrors),

    #[error(transparent)]
    Action(#[from] ActionError),
}
