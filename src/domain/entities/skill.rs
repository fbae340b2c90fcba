use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::{
    entities::form_fields::{blank_as_none, checkbox, choice},
    entities::validation::{chosen, validate_non_blank},
    errors::AppError,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "skill_category", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum SkillCategory {
    Language,
    Framework,
    Tool,
    Database,
    Cloud,
    SoftSkill,
    Other,
}

impl SkillCategory {
    pub const ALL: [SkillCategory; 7] = [
        SkillCategory::Language,
        SkillCategory::Framework,
        SkillCategory::Tool,
        SkillCategory::Database,
        SkillCategory::Cloud,
        SkillCategory::SoftSkill,
        SkillCategory::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SkillCategory::Language => "Languages",
            SkillCategory::Framework => "Frameworks",
            SkillCategory::Tool => "Tools",
            SkillCategory::Database => "Databases",
            SkillCategory::Cloud => "Cloud",
            SkillCategory::SoftSkill => "Soft skills",
            SkillCategory::Other => "Other",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Skill {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub category: SkillCategory,
    pub is_visible: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Compact shape used by tag lists and the autocomplete widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct SkillTag {
    pub id: Uuid,
    pub name: String,
}

impl From<&Skill> for SkillTag {
    fn from(skill: &Skill) -> Self {
        SkillTag {
            id: skill.id,
            name: skill.name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SkillInsert {
    pub name: String,
    pub description: Option<String>,
    pub category: SkillCategory,
    pub is_visible: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SkillForm {
    #[serde(default)]
    #[validate(
        custom(function = "validate_non_blank", message = "Name is required"),
        length(max = 80, message = "Name is too long (max 80 characters)")
    )]
    pub name: String,

    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(length(max = 1000, message = "Description is too long"))]
    pub description: Option<String>,

    #[serde(default, deserialize_with = "choice")]
    #[validate(required(message = "Choose a category"))]
    pub category: Option<SkillCategory>,

    #[serde(default, deserialize_with = "checkbox")]
    pub is_visible: bool,
}

impl SkillForm {
    pub fn prepare_for_insert(&self) -> Result<SkillInsert, AppError> {
        Ok(SkillInsert {
            name: self.name.trim().to_string(),
            description: self.description.clone(),
            category: chosen("category", self.category)?,
            is_visible: self.is_visible,
        })
    }
}

/// Body of the autocomplete "create if absent" call.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SkillTagRequest {
    #[serde(default)]
    #[validate(
        custom(function = "validate_non_blank", message = "Name is required"),
        length(max = 80, message = "Name is too long (max 80 characters)")
    )]
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct SkillSearchQuery {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Serialize)]
pub struct SkillGroup {
    pub category: SkillCategory,
    pub label: &'static str,
    pub skills: Vec<Skill>,
}

/// Groups skills by category in `SkillCategory::ALL` order, names ascending, empty groups dropped.
pub fn group_by_category(skills: impl IntoIterator<Item = Skill>) -> Vec<SkillGroup> {
    let mut skills: Vec<Skill> = skills.into_iter().collect();
    skills.sort_by(|a, b| a.category.cmp(&b.category).then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase())));

    SkillCategory::ALL
        .iter()
        .filter_map(|category| {
            let members: Vec<Skill> = skills.iter().filter(|s| s.category == *category).cloned().collect();
            (!members.is_empty()).then(|| SkillGroup {
                category: *category,
                label: category.label(),
                skills: members,
            })
        })
        .collect()
}
