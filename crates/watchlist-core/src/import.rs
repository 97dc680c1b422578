use serde::Serialize;
use std::collections::HashSet;
use tracing::debug;
use watchlist_models::{DedupKey, RemoteMovie};
use watchlist_store::{MovieStore, StoreError};
use crate::notice::Notice;

/// Counts from one import pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    pub catalog: String,
    pub fetched: usize,
    pub inserted: usize,
    pub skipped_duplicates: usize,
    pub skipped_untitled: usize,
}

impl ImportReport {
    /// "No new movies" is reported distinctly from "inserted N"
    pub fn notice(&self) -> Notice {
        if self.inserted > 0 {
            let noun = if self.inserted == 1 { "movie" } else { "movies" };
            Notice::success(
                "Import complete",
                format!("Imported {} new {} from {}", self.inserted, noun, self.catalog),
            )
        } else {
            Notice::info(
                "Nothing to import",
                "No new movies to import (all entries are duplicates)",
            )
        }
    }
}

/// Insert every remote record whose `(title, year)` is not already known.
///
/// `seen` starts as the keys of all stored rows and grows with each insert,
/// so duplicates inside one batch are only inserted once. On a storage
/// error the rows inserted so far stay in place and the counts in `report`
/// reflect them.
pub(crate) fn insert_new(
    store: &MovieStore,
    remote: &[RemoteMovie],
    seen: &mut HashSet<DedupKey>,
    report: &mut ImportReport,
) -> Result<(), StoreError> {
    for movie in remote {
        let Some(title) = movie.usable_title() else {
            report.skipped_untitled += 1;
            continue;
        };

        let key = DedupKey::new(title, movie.year);
        if seen.contains(&key) {
            report.skipped_duplicates += 1;
            continue;
        }

        store.insert(title, movie.year, movie.rating)?;
        debug!(title, year = ?movie.year, "Imported movie");
        report.inserted += 1;
        seen.insert(key);
    }
    Ok(())
}
