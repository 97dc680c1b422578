use serde::{Deserialize, Serialize};

/// Composite identity of a movie for import deduplication.
///
/// Kept as a structured pair rather than a joined string so that titles
/// containing separators or digits can never collide with another
/// title/year combination.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct DedupKey {
    pub title: String,
    pub year: Option<i32>,
}

impl DedupKey {
    /// Build a key from a raw title; surrounding whitespace is ignored, case is kept
    pub fn new(title: &str, year: Option<i32>) -> Self {
        Self {
            title: title.trim().to_string(),
            year,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_keys_do_not_collide_on_separator_titles() {
        // "A_1999" + None and "A" + 1999 would both join to "A_1999"
        let mut seen = HashSet::new();
        seen.insert(DedupKey::new("A_1999", None));
        assert!(!seen.contains(&DedupKey::new("A", Some(1999))));
    }

    #[test]
    fn test_whitespace_is_trimmed() {
        assert_eq!(DedupKey::new("  Dune ", Some(2021)), DedupKey::new("Dune", Some(2021)));
    }

    #[test]
    fn test_case_is_preserved() {
        assert_ne!(DedupKey::new("dune", Some(2021)), DedupKey::new("Dune", Some(2021)));
    }
}
