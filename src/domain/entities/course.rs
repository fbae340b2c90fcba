use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::{
    constants::MONTH_YEAR_RE,
    entities::form_fields::{blank_as_none, choice, id_list},
    entities::skill::SkillTag,
    entities::validation::{chosen, month_field, validate_non_blank, validate_url},
    errors::AppError,
    month_year::MonthYear,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "course_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum CourseType {
    Online,
    InPerson,
    Bootcamp,
    Workshop,
    Certification,
    Other,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CourseRow {
    pub id: Uuid,
    pub name: String,
    pub course_type: CourseType,
    pub institution: String,
    pub completed_on: MonthYear,
    pub workload_hours: Option<i32>,
    pub certificate_url: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    pub id: Uuid,
    pub name: String,
    pub course_type: CourseType,
    pub institution: String,
    pub completed_on: MonthYear,
    pub workload_hours: Option<i32>,
    pub certificate_url: Option<String>,
    pub notes: Option<String>,
    pub skills: Vec<SkillTag>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Course {
    pub fn from_row(row: CourseRow, skills: Vec<SkillTag>) -> Self {
        Course {
            id: row.id,
            name: row.name,
            course_type: row.course_type,
            institution: row.institution,
            completed_on: row.completed_on,
            workload_hours: row.workload_hours,
            certificate_url: row.certificate_url,
            notes: row.notes,
            skills,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Row of the course/skill join, read back with the skill name.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CourseSkillRow {
    pub course_id: Uuid,
    pub skill_id: Uuid,
    pub skill_name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CourseInsert {
    pub name: String,
    pub course_type: CourseType,
    pub institution: String,
    pub completed_on: MonthYear,
    pub workload_hours: Option<i32>,
    pub certificate_url: Option<String>,
    pub notes: Option<String>,
    pub skill_ids: Vec<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CourseForm {
    #[serde(default)]
    #[validate(
        custom(function = "validate_non_blank", message = "Name is required"),
        length(max = 200, message = "Name is too long (max 200 characters)")
    )]
    pub name: String,

    #[serde(default, deserialize_with = "choice")]
    #[validate(required(message = "Choose a course type"))]
    pub course_type: Option<CourseType>,

    #[serde(default)]
    #[validate(
        custom(function = "validate_non_blank", message = "Institution is required"),
        length(max = 200, message = "Institution is too long (max 200 characters)")
    )]
    pub institution: String,

    #[serde(default)]
    #[validate(regex(path = *MONTH_YEAR_RE, message = "Date must use the MM/YYYY format"))]
    pub completed_on: String,

    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(range(min = 1, max = 10_000, message = "Workload must be between 1 and 10000 hours"))]
    pub workload_hours: Option<i32>,

    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(custom(function = "validate_url"))]
    pub certificate_url: Option<String>,

    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(length(max = 5000, message = "Notes are too long"))]
    pub notes: Option<String>,

    #[serde(default, deserialize_with = "id_list")]
    #[validate(length(max = 50, message = "Too many skills tagged"))]
    pub skill_ids: Vec<Uuid>,
}

impl CourseForm {
    pub fn prepare_for_insert(&self) -> Result<CourseInsert, AppError> {
        let mut skill_ids = Vec::with_capacity(self.skill_ids.len());
        for id in &self.skill_ids {
            if !skill_ids.contains(id) {
                skill_ids.push(*id);
            }
        }

        Ok(CourseInsert {
            name: self.name.trim().to_string(),
            course_type: chosen("course_type", self.course_type)?,
            institution: self.institution.trim().to_string(),
            completed_on: month_field("completed_on", &self.completed_on)?,
            workload_hours: self.workload_hours,
            certificate_url: self.certificate_url.clone(),
            notes: self.notes.clone(),
            skill_ids,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> CourseForm {
        CourseForm {
            name: "Distributed Systems".into(),
            course_type: Some(CourseType::Online),
            institution: "Open University".into(),
            completed_on: "09/2022".into(),
            workload_hours: Some(40),
            certificate_url: Some("https://certs.example.com/abc".into()),
            notes: None,
            skill_ids: Vec::new(),
        }
    }

    #[test]
    fn rejects_date_not_matching_month_year() {
        let form = CourseForm { completed_on: "2022/09".into(), ..form() };
        let errors = form.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("completed_on"));
    }

    #[test]
    fn workload_must_be_in_range() {
        let form = CourseForm { workload_hours: Some(0), ..form() };
        assert!(form.validate().is_err());
    }

    #[test]
    fn certificate_must_be_a_web_url() {
        let form = CourseForm { certificate_url: Some("file:///etc/passwd".into()), ..form() };
        assert!(form.validate().is_err());
    }

    #[test]
    fn blank_name_and_missing_type_are_field_errors() {
        let form = CourseForm { name: " ".into(), course_type: None, ..form() };
        let errors = form.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("course_type"));
    }

    #[test]
    fn duplicate_skill_ids_collapse() {
        let id = Uuid::new_v4();
        let form = CourseForm { skill_ids: vec![id, id], ..form() };
        let insert = form.prepare_for_insert().unwrap();
        assert_eq!(insert.skill_ids, vec![id]);
        assert_eq!(insert.completed_on.to_string(), "09/2022");
    }
}
