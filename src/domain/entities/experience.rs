use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::{
    constants::MONTH_YEAR_RE,
    entities::form_fields::{blank_as_none, checkbox},
    entities::validation::{month_field, new_validation_error, validate_non_blank, validate_period},
    errors::AppError,
    month_year::MonthYear,
};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Experience {
    pub id: Uuid,
    pub role: String,
    pub company: String,
    pub location: Option<String>,
    pub start_date: MonthYear,
    pub end_date: Option<MonthYear>,
    pub is_current: bool,
    pub description: Option<String>,
    pub salary: Option<f64>,
    pub exit_reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExperienceInsert {
    pub role: String,
    pub company: String,
    pub location: Option<String>,
    pub start_date: MonthYear,
    pub end_date: Option<MonthYear>,
    pub is_current: bool,
    pub description: Option<String>,
    pub salary: Option<f64>,
    pub exit_reason: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_experience_period"))]
pub struct ExperienceForm {
    #[serde(default)]
    #[validate(
        custom(function = "validate_non_blank", message = "Role is required"),
        length(max = 120, message = "Role is too long (max 120 characters)")
    )]
    pub role: String,

    #[serde(default)]
    #[validate(
        custom(function = "validate_non_blank", message = "Company is required"),
        length(max = 120, message = "Company is too long (max 120 characters)")
    )]
    pub company: String,

    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(length(max = 120, message = "Location is too long"))]
    pub location: Option<String>,

    #[serde(default)]
    #[validate(regex(path = *MONTH_YEAR_RE, message = "Start date must use the MM/YYYY format"))]
    pub start_date: String,

    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(regex(path = *MONTH_YEAR_RE, message = "End date must use the MM/YYYY format"))]
    pub end_date: Option<String>,

    #[serde(default, deserialize_with = "checkbox")]
    pub is_current: bool,

    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(length(max = 5000, message = "Description is too long"))]
    pub description: Option<String>,

    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(range(min = 0.0, max = 100_000_000.0, message = "Salary must be a positive amount"))]
    pub salary: Option<f64>,

    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(length(max = 500, message = "Exit reason is too long"))]
    pub exit_reason: Option<String>,
}

fn validate_experience_period(form: &ExperienceForm) -> Result<(), ValidationError> {
    match (form.is_current, form.end_date.as_deref()) {
        (true, Some(_)) => Err(new_validation_error(
            "current_with_end_date",
            "A current position cannot have an end date",
        )),
        (false, None) => Err(new_validation_error(
            "end_date_required",
            "End date is required unless this is your current position",
        )),
        (_, end) => validate_period(&form.start_date, end),
    }
}

impl ExperienceForm {
    pub fn prepare_for_insert(&self) -> Result<ExperienceInsert, AppError> {
        Ok(ExperienceInsert {
            role: self.role.trim().to_string(),
            company: self.company.trim().to_string(),
            location: self.location.clone(),
            start_date: month_field("start_date", &self.start_date)?,
            end_date: self.end_date.as_deref().map(|end| month_field("end_date", end)).transpose()?,
            is_current: self.is_current,
            description: self.description.clone(),
            salary: self.salary,
            exit_reason: self.exit_reason.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> ExperienceForm {
        ExperienceForm {
            role: "Backend Engineer".into(),
            company: "Acme".into(),
            start_date: "02/2021".into(),
            end_date: Some("11/2023".into()),
            ..ExperienceForm::default()
        }
    }

    #[test]
    fn valid_form_prepares_typed_insert() {
        let form = form();
        assert!(form.validate().is_ok());

        let insert = form.prepare_for_insert().unwrap();
        assert_eq!(insert.start_date.to_string(), "02/2021");
        assert_eq!(insert.end_date.map(|d| d.to_string()), Some("11/2023".into()));
    }

    #[test]
    fn current_position_cannot_have_end_date() {
        let form = ExperienceForm { is_current: true, ..form() };
        assert!(form.validate().is_err());

        let form = ExperienceForm { is_current: true, end_date: None, ..form };
        assert!(form.validate().is_ok());
    }

    #[test]
    fn past_position_needs_ordered_end_date() {
        let missing_end = ExperienceForm { end_date: None, ..form() };
        assert!(missing_end.validate().is_err());

        let reversed = ExperienceForm { end_date: Some("01/2021".into()), ..form() };
        assert!(reversed.validate().is_err());
    }

    #[test]
    fn whitespace_role_and_company_are_missing() {
        let form = ExperienceForm {
            role: "  ".into(),
            company: " ".into(),
            ..form()
        };
        let errors = form.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("role"));
        assert!(fields.contains_key("company"));
    }

    #[test]
    fn rejects_negative_salary_and_bad_dates() {
        let form = ExperienceForm {
            salary: Some(-10.0),
            start_date: "2021-02".into(),
            ..form()
        };
        let errors = form.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("salary"));
        assert!(fields.contains_key("start_date"));
    }
}
