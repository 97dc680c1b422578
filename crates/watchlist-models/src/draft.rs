use serde::{Deserialize, Serialize};

/// Validated field values for creating or updating a movie.
///
/// Produced by form validation; `title` is already trimmed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MovieDraft {
    pub title: String,
    pub year: Option<i32>,
    pub rating: Option<i32>,
}

impl MovieDraft {
    pub fn new(title: impl Into<String>, year: Option<i32>, rating: Option<i32>) -> Self {
        Self {
            title: title.into(),
            year,
            rating,
        }
    }
}
