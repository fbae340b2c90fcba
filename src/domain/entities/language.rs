use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::{
    entities::form_fields::choice,
    entities::validation::{chosen, validate_non_blank},
    errors::AppError,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "language_proficiency", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Proficiency {
    Basic,
    Intermediate,
    Advanced,
    Fluent,
    Native,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Language {
    pub id: Uuid,
    pub name: String,
    pub proficiency: Proficiency,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LanguageInsert {
    pub name: String,
    pub proficiency: Proficiency,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LanguageForm {
    #[serde(default)]
    #[validate(
        custom(function = "validate_non_blank", message = "Name is required"),
        length(max = 60, message = "Name is too long (max 60 characters)")
    )]
    pub name: String,

    #[serde(default, deserialize_with = "choice")]
    #[validate(required(message = "Choose a proficiency"))]
    pub proficiency: Option<Proficiency>,
}

impl LanguageForm {
    pub fn prepare_for_insert(&self) -> Result<LanguageInsert, AppError> {
        Ok(LanguageInsert {
            name: self.name.trim().to_string(),
            proficiency: chosen("proficiency", self.proficiency)?,
        })
    }
}

/// Strongest proficiency first, then alphabetical.
pub fn sort_languages(languages: &mut [Language]) {
    languages.sort_by(|a, b| b.proficiency.cmp(&a.proficiency).then_with(|| a.name.cmp(&b.name)));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn language(name: &str, proficiency: Proficiency) -> Language {
        Language {
            id: Uuid::new_v4(),
            name: name.into(),
            proficiency,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn sorts_by_proficiency_then_name() {
        let mut languages = vec![
            language("Spanish", Proficiency::Intermediate),
            language("Portuguese", Proficiency::Native),
            language("English", Proficiency::Fluent),
            language("French", Proficiency::Intermediate),
        ];
        sort_languages(&mut languages);
        let names: Vec<&str> = languages.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["Portuguese", "English", "French", "Spanish"]);
    }

    #[test]
    fn form_needs_a_name_and_a_proficiency() {
        let form: LanguageForm = serde_json::from_value(serde_json::json!({
            "name": "  ",
            "proficiency": "",
        }))
        .unwrap();
        let errors = form.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("proficiency"));
    }

    #[test]
    fn valid_form_trims_the_name() {
        let form = LanguageForm {
            name: " English ".into(),
            proficiency: Some(Proficiency::Fluent),
        };
        assert!(form.validate().is_ok());
        let insert = form.prepare_for_insert().unwrap();
        assert_eq!(insert.name, "English");
        assert_eq!(insert.proficiency, Proficiency::Fluent);
    }
}
