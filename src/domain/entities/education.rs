use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::{
    constants::MONTH_YEAR_RE,
    entities::form_fields::{blank_as_none, choice},
    entities::validation::{chosen, month_field, new_validation_error, validate_non_blank, validate_period},
    errors::AppError,
    month_year::MonthYear,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "education_level", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum EducationLevel {
    HighSchool,
    Technical,
    Associate,
    Bachelor,
    Postgraduate,
    Master,
    Doctorate,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "education_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum EducationStatus {
    Completed,
    InProgress,
    Paused,
    Dropped,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Education {
    pub id: Uuid,
    pub institution: String,
    pub level: EducationLevel,
    pub course_name: String,
    pub start_date: MonthYear,
    pub end_date: Option<MonthYear>,
    pub status: EducationStatus,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EducationInsert {
    pub institution: String,
    pub level: EducationLevel,
    pub course_name: String,
    pub start_date: MonthYear,
    pub end_date: Option<MonthYear>,
    pub status: EducationStatus,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_education_period"))]
pub struct EducationForm {
    #[serde(default)]
    #[validate(
        custom(function = "validate_non_blank", message = "Institution is required"),
        length(max = 200, message = "Institution is too long (max 200 characters)")
    )]
    pub institution: String,

    #[serde(default, deserialize_with = "choice")]
    #[validate(required(message = "Choose an education level"))]
    pub level: Option<EducationLevel>,

    #[serde(default)]
    #[validate(
        custom(function = "validate_non_blank", message = "Course name is required"),
        length(max = 200, message = "Course name is too long (max 200 characters)")
    )]
    pub course_name: String,

    #[serde(default)]
    #[validate(regex(path = *MONTH_YEAR_RE, message = "Start date must use the MM/YYYY format"))]
    pub start_date: String,

    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(regex(path = *MONTH_YEAR_RE, message = "End date must use the MM/YYYY format"))]
    pub end_date: Option<String>,

    #[serde(default, deserialize_with = "choice")]
    #[validate(required(message = "Choose a status"))]
    pub status: Option<EducationStatus>,

    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(length(max = 5000, message = "Description is too long"))]
    pub description: Option<String>,
}

fn validate_education_period(form: &EducationForm) -> Result<(), ValidationError> {
    if form.status == Some(EducationStatus::Completed) && form.end_date.is_none() {
        return Err(new_validation_error(
            "end_date_required",
            "A completed education needs an end date",
        ));
    }
    validate_period(&form.start_date, form.end_date.as_deref())
}

impl EducationForm {
    pub fn prepare_for_insert(&self) -> Result<EducationInsert, AppError> {
        Ok(EducationInsert {
            institution: self.institution.trim().to_string(),
            level: chosen("level", self.level)?,
            course_name: self.course_name.trim().to_string(),
            start_date: month_field("start_date", &self.start_date)?,
            end_date: self.end_date.as_deref().map(|end| month_field("end_date", end)).transpose()?,
            status: chosen("status", self.status)?,
            description: self.description.clone(),
        })
    }
}
