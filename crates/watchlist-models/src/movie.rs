use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::dedup::DedupKey;

/// One watchlist record as stored in the `movies` table.
///
/// `id` and `created_at` are assigned by storage on insert and never change.
/// `year` and `rating` are only range-checked at the form boundary, so a
/// record written by another path may carry any integer here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Movie {
    pub id: i64,
    pub title: String,
    pub year: Option<i32>,
    pub rating: Option<i32>,
    pub watched: bool,
    pub created_at: i64, // epoch seconds
}

impl Movie {
    /// Insertion time as a UTC timestamp, if `created_at` is representable
    pub fn added_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.created_at, 0)
    }

    /// Identity used by import to decide whether an incoming record is a duplicate
    pub fn dedup_key(&self) -> DedupKey {
        DedupKey::new(&self.title, self.year)
    }

    /// Star string for display, e.g. "★★★☆☆"; empty when unrated
    pub fn stars(&self) -> String {
        match self.rating {
            Some(r) if (1..=5).contains(&r) => {
                let filled = r as usize;
                format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
            }
            Some(r) => format!("{}/5", r),
            None => String::new(),
        }
    }
}
