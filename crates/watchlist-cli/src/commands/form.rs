use crate::commands::prompts::prompt_string;
use color_eyre::Result;
use watchlist_core::{FieldErrors, MovieForm};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    Year,
    Rating,
}

impl Field {
    fn label(self) -> &'static str {
        match self {
            Field::Title => "Title",
            Field::Year => "Year (optional)",
            Field::Rating => "Rating 1-5 (optional)",
        }
    }
}

/// Field values given on the command line
#[derive(Debug, Default)]
pub struct FormArgs {
    pub title: Option<String>,
    pub year: Option<String>,
    pub rating: Option<String>,
}

impl FormArgs {
    pub fn new(title: Option<String>, year: Option<String>, rating: Option<String>) -> Self {
        Self { title, year, rating }
    }

    /// Copy the given values into `form` and return the fields left unset
    pub fn apply(self, form: &mut MovieForm) -> Vec<Field> {
        let mut missing = Vec::new();
        for (field, value, slot) in [
            (Field::Title, self.title, &mut form.title),
            (Field::Year, self.year, &mut form.year),
            (Field::Rating, self.rating, &mut form.rating),
        ] {
            match value {
                Some(v) => *slot = v,
                None => missing.push(field),
            }
        }
        missing
    }
}

/// Fields that failed validation, in form order
pub fn invalid_fields(errors: &FieldErrors) -> Vec<Field> {
    let mut fields = Vec::new();
    if errors.title.is_some() {
        fields.push(Field::Title);
    }
    if errors.year.is_some() {
        fields.push(Field::Year);
    }
    if errors.rating.is_some() {
        fields.push(Field::Rating);
    }
    fields
}

/// Prompt for each field, offering the current text as the default
pub fn prompt_fields(form: &mut MovieForm, fields: &[Field]) -> Result<()> {
    for field in fields {
        let slot = match field {
            Field::Title => &mut form.title,
            Field::Year => &mut form.year,
            Field::Rating => &mut form.rating,
        };
        *slot = prompt_string(field.label(), Some(slot.as_str()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_reports_missing_fields() {
        let mut form = MovieForm::default();
        let missing = FormArgs::new(Some("Dune".into()), None, Some("4".into())).apply(&mut form);

        assert_eq!(missing, vec![Field::Year]);
        assert_eq!(form, MovieForm::new("Dune", "", "4"));
    }

    #[test]
    fn test_apply_keeps_prefilled_values() {
        let mut form = MovieForm::new("Heat", "1995", "5");
        let missing = FormArgs::new(None, None, Some("".into())).apply(&mut form);

        assert_eq!(missing, vec![Field::Title, Field::Year]);
        assert_eq!(form, MovieForm::new("Heat", "1995", ""));
    }

    #[test]
    fn test_invalid_fields_in_form_order() {
        let errors = MovieForm::new("", "1800", "3").validate(2026).unwrap_err();
        assert_eq!(invalid_fields(&errors), vec![Field::Title, Field::Year]);
    }
}
