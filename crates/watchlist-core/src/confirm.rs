use watchlist_models::Movie;

/// A mutation waiting for the user to say yes or no
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingAction {
    ToggleWatched(Movie),
    Delete(Movie),
}

impl PendingAction {
    pub fn movie(&self) -> &Movie {
        match self {
            PendingAction::ToggleWatched(m) | PendingAction::Delete(m) => m,
        }
    }

    /// Question to put to the user
    pub fn prompt(&self) -> String {
        match self {
            PendingAction::ToggleWatched(m) if m.watched => format!("Mark \"{}\" as unwatched?", m.title),
            PendingAction::ToggleWatched(m) => format!("Mark \"{}\" as watched?", m.title),
            PendingAction::Delete(m) => format!("Delete \"{}\"? This cannot be undone.", m.title),
        }
    }
}
