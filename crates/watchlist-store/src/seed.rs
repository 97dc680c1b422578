/// A well-known film used to seed an empty table and as a local import catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Suggestion {
    pub title: &'static str,
    pub year: i32,
    pub rating: Option<i32>,
}

const fn suggest(title: &'static str, year: i32, rating: i32) -> Suggestion {
    Suggestion {
        title,
        year,
        rating: Some(rating),
    }
}

pub const SUGGESTED_MOVIES: &[Suggestion] = &[
    suggest("The Shawshank Redemption", 1994, 5),
    suggest("The Godfather", 1972, 5),
    suggest("The Dark Knight", 2008, 5),
    suggest("Pulp Fiction", 1994, 5),
    suggest("Forrest Gump", 1994, 5),
    suggest("Inception", 2010, 5),
    suggest("Fight Club", 1999, 5),
    suggest("The Matrix", 1999, 5),
    suggest("Goodfellas", 1990, 5),
    suggest("The Silence of the Lambs", 1991, 5),
    suggest("Saving Private Ryan", 1998, 5),
    suggest("Jurassic Park", 1993, 5),
    suggest("Avatar", 2009, 5),
    suggest("Titanic", 1997, 5),
    suggest("The Avengers", 2012, 5),
    suggest("Interstellar", 2014, 5),
    suggest("The Wolf of Wall Street", 2013, 5),
    suggest("Django Unchained", 2012, 5),
    suggest("The Prestige", 2006, 5),
    suggest("Gladiator", 2000, 5),
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_suggestions_are_unique_and_valid() {
        let keys: HashSet<(&str, i32)> = SUGGESTED_MOVIES.iter().map(|s| (s.title, s.year)).collect();
        assert_eq!(keys.len(), SUGGESTED_MOVIES.len());
        for s in SUGGESTED_MOVIES {
            assert!(!s.title.trim().is_empty());
            assert!(s.year >= 1900);
            assert!(matches!(s.rating, Some(1..=5)));
        }
    }
}
