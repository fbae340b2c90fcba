use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::{
    calendar::{age_on, ZodiacSign},
    entities::form_fields::blank_as_none,
    entities::validation::{new_validation_error, validate_non_blank, validate_url},
    utils::markdown::safe_markdown_to_html,
};

// ───── Database Models ───────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Profile {
    pub id: i32,
    pub full_name: String,
    pub title: String,
    pub email: String,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub website_url: Option<String>,
    pub linkedin_url: Option<String>,
    pub github_url: Option<String>,
    pub birthdate: Option<NaiveDate>,
    pub summary: Option<String>,
    pub objectives: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProfileUpsert {
    pub full_name: String,
    pub title: String,
    pub email: String,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub website_url: Option<String>,
    pub linkedin_url: Option<String>,
    pub github_url: Option<String>,
    pub birthdate: Option<NaiveDate>,
    pub summary: Option<String>,
    pub objectives: Option<String>,
}

// ───── API Response Models ──────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct ZodiacResponse {
    pub sign: ZodiacSign,
    pub name: &'static str,
    pub symbol: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    #[serde(flatten)]
    pub profile: Profile,
    pub age: Option<u32>,
    pub zodiac: Option<ZodiacResponse>,
    pub summary_html: Option<String>,
    pub objectives_html: Option<String>,
}

impl ProfileResponse {
    pub fn from_profile(profile: Profile, today: NaiveDate) -> Self {
        let age = profile.birthdate.map(|birth| age_on(birth, today));
        let zodiac = profile.birthdate.map(|birth| {
            let sign = ZodiacSign::from_date(birth);
            ZodiacResponse {
                sign,
                name: sign.name(),
                symbol: sign.symbol(),
            }
        });
        let summary_html = profile.summary.as_deref().map(safe_markdown_to_html);
        let objectives_html = profile.objectives.as_deref().map(safe_markdown_to_html);

        ProfileResponse {
            profile,
            age,
            zodiac,
            summary_html,
            objectives_html,
        }
    }
}

impl From<Profile> for ProfileResponse {
    fn from(profile: Profile) -> Self {
        ProfileResponse::from_profile(profile, Local::now().date_naive())
    }
}

// ───── Input & Validation ───────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ProfileForm {
    #[serde(default)]
    #[validate(
        custom(function = "validate_non_blank", message = "Name is required"),
        length(max = 120, message = "Name is too long (max 120 characters)")
    )]
    pub full_name: String,

    #[serde(default)]
    #[validate(
        custom(function = "validate_non_blank", message = "Title is required"),
        length(max = 120, message = "Title is too long (max 120 characters)")
    )]
    pub title: String,

    #[serde(default)]
    #[validate(email(message = "A valid email address is required"))]
    pub email: String,

    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(length(max = 40, message = "Phone number is too long"))]
    pub phone: Option<String>,

    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(length(max = 120, message = "Location is too long"))]
    pub location: Option<String>,

    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(custom(function = "validate_url"))]
    pub website_url: Option<String>,

    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(custom(function = "validate_url"))]
    pub linkedin_url: Option<String>,

    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(custom(function = "validate_url"))]
    pub github_url: Option<String>,

    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(custom(function = "validate_birthdate"))]
    pub birthdate: Option<NaiveDate>,

    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(length(max = 5000, message = "Summary is too long"))]
    pub summary: Option<String>,

    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(length(max = 5000, message = "Objectives are too long"))]
    pub objectives: Option<String>,
}

fn validate_birthdate(date: &NaiveDate) -> Result<(), ValidationError> {
    let earliest = NaiveDate::from_ymd_opt(1900, 1, 1).unwrap_or(NaiveDate::MIN);
    if *date < earliest || *date >= Local::now().date_naive() {
        return Err(new_validation_error("invalid_birthdate", "Birthdate must be in the past and after 1900"));
    }
    Ok(())
}

impl ProfileForm {
    pub fn prepare_for_upsert(&self) -> ProfileUpsert {
        ProfileUpsert {
            full_name: self.full_name.trim().to_string(),
            title: self.title.trim().to_string(),
            email: self.email.trim().to_lowercase(),
            phone: self.phone.clone(),
            location: self.location.clone(),
            website_url: self.website_url.clone(),
            linkedin_url: self.linkedin_url.clone(),
            github_url: self.github_url.clone(),
            birthdate: self.birthdate,
            summary: self.summary.clone(),
            objectives: self.objectives.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(birthdate: Option<NaiveDate>) -> Profile {
        Profile {
            id: 1,
            full_name: "Ada Lovelace".into(),
            title: "Analyst".into(),
            email: "ada@example.com".into(),
            phone: None,
            location: None,
            website_url: None,
            linkedin_url: None,
            github_url: None,
            birthdate,
            summary: Some("**Engines** and <script>alert(1)</script> notes".into()),
            objectives: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn response_computes_age_zodiac_and_safe_html() {
        let birth = NaiveDate::from_ymd_opt(1990, 12, 10).unwrap();
        let today = NaiveDate::from_ymd_opt(2024, 12, 9).unwrap();
        let response = ProfileResponse::from_profile(profile(Some(birth)), today);

        assert_eq!(response.age, Some(33));
        assert_eq!(response.zodiac.as_ref().map(|z| z.name), Some("Sagittarius"));
        let html = response.summary_html.unwrap();
        assert!(html.contains("<strong>Engines</strong>"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn response_without_birthdate_has_no_age() {
        let response = ProfileResponse::from_profile(profile(None), Local::now().date_naive());
        assert!(response.age.is_none());
        assert!(response.zodiac.is_none());
    }

    #[test]
    fn missing_required_fields_fail_validation() {
        let form = ProfileForm {
            title: "Engineer".into(),
            email: "someone@example.com".into(),
            ..ProfileForm::default()
        };
        let errors = form.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("full_name"));
    }

    #[test]
    fn whitespace_only_required_fields_are_missing() {
        let form = ProfileForm {
            full_name: "   ".into(),
            title: "\t".into(),
            email: "ada@example.com".into(),
            ..ProfileForm::default()
        };
        let errors = form.validate().unwrap_err();
        let fields = errors.field_errors();
        assert_eq!(fields["full_name"].len(), 1);
        assert_eq!(fields["full_name"][0].message.as_deref(), Some("Name is required"));
        assert!(fields.contains_key("title"));
    }

    #[test]
    fn rejects_non_http_urls_and_future_birthdates() {
        let form = ProfileForm {
            full_name: "Ada".into(),
            title: "Engineer".into(),
            email: "ada@example.com".into(),
            github_url: Some("ftp://example.com".into()),
            birthdate: Some(NaiveDate::from_ymd_opt(2999, 1, 1).unwrap()),
            ..ProfileForm::default()
        };
        let errors = form.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("github_url"));
        assert!(fields.contains_key("birthdate"));
    }
}
