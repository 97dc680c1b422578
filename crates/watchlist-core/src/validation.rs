use chrono::Datelike;
use std::ops::RangeInclusive;
use watchlist_models::{Movie, MovieDraft};

pub const MIN_YEAR: i32 = 1900;
pub const RATING_RANGE: RangeInclusive<i32> = 1..=5;

/// Current calendar year in local time, the upper bound for `year`
pub fn current_year() -> i32 {
    chrono::Local::now().year()
}

/// Raw text entered in the add or edit form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MovieForm {
    pub title: String,
    pub year: String,
    pub rating: String,
}

/// Per-field validation messages. A field with `None` is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    pub title: Option<String>,
    pub year: Option<String>,
    pub rating: Option<String>,
}

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.year.is_none() && self.rating.is_none()
    }

    /// `(field, message)` pairs in form order
    pub fn messages(&self) -> Vec<(&'static str, &str)> {
        [("title", &self.title), ("year", &self.year), ("rating", &self.rating)]
            .into_iter()
            .filter_map(|(field, msg)| msg.as_deref().map(|m| (field, m)))
            .collect()
    }
}

impl MovieForm {
    pub fn new(title: impl Into<String>, year: impl Into<String>, rating: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            year: year.into(),
            rating: rating.into(),
        }
    }

    /// Pre-fill the edit form from a stored record
    pub fn for_edit(movie: &Movie) -> Self {
        Self {
            title: movie.title.clone(),
            year: movie.year.map(|y| y.to_string()).unwrap_or_default(),
            rating: movie.rating.map(|r| r.to_string()).unwrap_or_default(),
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Check every field and produce the values to store.
    ///
    /// Empty `year`/`rating` mean "not set". All problems are reported at once.
    pub fn validate(&self, current_year: i32) -> Result<MovieDraft, FieldErrors> {
        let mut errors = FieldErrors::default();

        let title = self.title.trim();
        if title.is_empty() {
            errors.title = Some("Title is required".to_string());
        }

        let year = match parse_optional(&self.year) {
            Ok(Some(y)) if (MIN_YEAR..=current_year).contains(&y) => Some(y),
            Ok(None) => None,
            _ => {
                errors.year = Some(format!("Year must be between {} and {}", MIN_YEAR, current_year));
                None
            }
        };

        let rating = match parse_optional(&self.rating) {
            Ok(Some(r)) if RATING_RANGE.contains(&r) => Some(r),
            Ok(None) => None,
            _ => {
                errors.rating = Some(format!(
                    "Rating must be between {} and {}",
                    RATING_RANGE.start(),
                    RATING_RANGE.end()
                ));
                None
            }
        };

        if errors.is_empty() {
            Ok(MovieDraft::new(title, year, rating))
        } else {
            Err(errors)
        }
    }
}

fn parse_optional(raw: &str) -> Result<Option<i32>, std::num::ParseIntError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse::<i32>().map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    const THIS_YEAR: i32 = 2026;

    fn validate(title: &str, year: &str, rating: &str) -> Result<MovieDraft, FieldErrors> {
        MovieForm::new(title, year, rating).validate(THIS_YEAR)
    }

    #[test]
    fn test_valid_form_produces_trimmed_draft() {
        let draft = validate("  Dune  ", "2021", "4").unwrap();
        assert_eq!(draft, MovieDraft::new("Dune", Some(2021), Some(4)));
    }

    #[test]
    fn test_optional_fields_may_be_blank() {
        let draft = validate("Dune", "", "  ").unwrap();
        assert_eq!(draft.year, None);
        assert_eq!(draft.rating, None);
    }

    #[test]
    fn test_empty_title_fails() {
        assert!(validate("", "", "").unwrap_err().title.is_some());
        assert!(validate("   ", "", "").unwrap_err().title.is_some());
    }

    #[test]
    fn test_year_bounds() {
        assert!(validate("X", "1899", "").unwrap_err().year.is_some());
        assert!(validate("X", "2999", "").unwrap_err().year.is_some());
        assert!(validate("X", "2027", "").unwrap_err().year.is_some());
        assert_eq!(validate("X", "1900", "").unwrap().year, Some(1900));
        assert_eq!(validate("X", "2026", "").unwrap().year, Some(THIS_YEAR));
    }

    #[test]
    fn test_year_must_be_numeric() {
        let errors = validate("X", "nineteen", "").unwrap_err();
        assert_eq!(errors.year.as_deref(), Some("Year must be between 1900 and 2026"));
    }

    #[test]
    fn test_rating_bounds() {
        assert!(validate("X", "", "0").unwrap_err().rating.is_some());
        assert!(validate("X", "", "6").unwrap_err().rating.is_some());
        assert!(validate("X", "", "4.5").unwrap_err().rating.is_some());
        assert_eq!(validate("X", "", "1").unwrap().rating, Some(1));
        assert_eq!(validate("X", "", "5").unwrap().rating, Some(5));
    }

    #[test]
    fn test_all_errors_reported_together() {
        let errors = validate(" ", "1800", "9").unwrap_err();
        let fields: Vec<&str> = errors.messages().into_iter().map(|(f, _)| f).collect();
        assert_eq!(fields, vec!["title", "year", "rating"]);
    }

    #[test]
    fn test_for_edit_prefills_and_clear_resets() {
        let movie = Movie {
            id: 3,
            title: "Heat".to_string(),
            year: Some(1995),
            rating: None,
            watched: true,
            created_at: 0,
        };
        let mut form = MovieForm::for_edit(&movie);
        assert_eq!(form, MovieForm::new("Heat", "1995", ""));

        form.clear();
        assert_eq!(form, MovieForm::default());
    }

    #[test]
    fn test_current_year_is_plausible() {
        assert!(current_year() >= 2024);
    }
}
