use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which records the list view shows by watched state
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum WatchedFilter {
    #[default]
    All,
    Watched,
    Unwatched,
}

impl WatchedFilter {
    pub fn matches(self, watched: bool) -> bool {
        match self {
            WatchedFilter::All => true,
            WatchedFilter::Watched => watched,
            WatchedFilter::Unwatched => !watched,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            WatchedFilter::All => "all",
            WatchedFilter::Watched => "watched",
            WatchedFilter::Unwatched => "unwatched",
        }
    }
}

/// Sort criterion for the list view.
///
/// Missing values sort as 0, so unrated movies come last under `Rating`
/// and movies without a year come first under `YearAsc`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum SortOption {
    #[default]
    Newest,
    Oldest,
    YearAsc,
    YearDesc,
    Rating,
}

impl SortOption {
    pub fn as_str(self) -> &'static str {
        match self {
            SortOption::Newest => "newest",
            SortOption::Oldest => "oldest",
            SortOption::YearAsc => "year-asc",
            SortOption::YearDesc => "year-desc",
            SortOption::Rating => "rating",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ParseOptionError {
    message: String,
}

impl fmt::Display for ParseOptionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ParseOptionError {}

impl FromStr for WatchedFilter {
    type Err = ParseOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(WatchedFilter::All),
            "watched" => Ok(WatchedFilter::Watched),
            "unwatched" => Ok(WatchedFilter::Unwatched),
            other => Err(ParseOptionError {
                message: format!("Invalid filter: {}. Use 'all', 'watched', or 'unwatched'", other),
            }),
        }
    }
}

impl FromStr for SortOption {
    type Err = ParseOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "newest" => Ok(SortOption::Newest),
            "oldest" => Ok(SortOption::Oldest),
            "year-asc" | "year_asc" => Ok(SortOption::YearAsc),
            "year-desc" | "year_desc" => Ok(SortOption::YearDesc),
            "rating" => Ok(SortOption::Rating),
            other => Err(ParseOptionError {
                message: format!(
                    "Invalid sort: {}. Use 'newest', 'oldest', 'year-asc', 'year-desc', or 'rating'",
                    other
                ),
            }),
        }
    }
}

impl fmt::Display for WatchedFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for SortOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
