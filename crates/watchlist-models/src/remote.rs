use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One entry of an import catalog payload: `{ "title", "year", "rating"? }`.
///
/// Every field is optional on the wire. A `title` that is not a string is
/// read as absent. Numeric fields accept integers, floats with no fractional
/// part, and numeric strings. Anything else is read as absent rather than
/// failing the whole payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct RemoteMovie {
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_int")]
    pub year: Option<i32>,
    #[serde(default, deserialize_with = "lenient_int")]
    pub rating: Option<i32>,
}

impl RemoteMovie {
    pub fn new(title: &str, year: Option<i32>, rating: Option<i32>) -> Self {
        Self {
            title: Some(title.to_string()),
            year,
            rating,
        }
    }

    /// Trimmed title, or None when absent or blank
    pub fn usable_title(&self) -> Option<&str> {
        self.title
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        _ => None,
    })
}

fn lenient_int<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64))
            .and_then(|v| i32::try_from(v).ok()),
        Some(Value::String(s)) => s.trim().parse::<i32>().ok(),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_payload() {
        let json = r#"[
            {"title": "Dune", "year": 2021, "rating": 4},
            {"title": "Arrival", "year": 2016},
            {"title": "Heat", "year": "1995", "rating": 5.0},
            {"year": 2000}
        ]"#;
        let movies: Vec<RemoteMovie> = serde_json::from_str(json).unwrap();
        assert_eq!(movies.len(), 4);
        assert_eq!(movies[0], RemoteMovie::new("Dune", Some(2021), Some(4)));
        assert_eq!(movies[1].rating, None);
        assert_eq!(movies[2].year, Some(1995));
        assert_eq!(movies[2].rating, Some(5));
        assert_eq!(movies[3].title, None);
    }

    #[test]
    fn test_non_string_title_becomes_none() {
        let json = r#"[{"title": "Dune", "year": 2021}, {"title": 1917, "year": 2019}]"#;
        let movies: Vec<RemoteMovie> = serde_json::from_str(json).unwrap();
        assert_eq!(movies.len(), 2);
        assert_eq!(movies[1].title, None);
        assert_eq!(movies[1].year, Some(2019));
        assert_eq!(movies[1].usable_title(), None);
    }

    #[test]
    fn test_unusable_numbers_become_none() {
        let json = r#"{"title": "X", "year": "soon", "rating": 3.5}"#;
        let movie: RemoteMovie = serde_json::from_str(json).unwrap();
        assert_eq!(movie.year, None);
        assert_eq!(movie.rating, None);
    }

    #[test]
    fn test_usable_title() {
        assert_eq!(RemoteMovie::new("  Up ", None, None).usable_title(), Some("Up"));
        assert_eq!(RemoteMovie::new("   ", None, None).usable_title(), None);
        assert_eq!(RemoteMovie::default().usable_title(), None);
    }
}
