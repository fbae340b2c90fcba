use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

pub static START_TIME: Lazy<DateTime<Utc>> = Lazy::new(Utc::now);

/// `MM/YYYY`, month 01-12.
pub static MONTH_YEAR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(0[1-9]|1[0-2])/\d{4}$").expect("month/year pattern is valid")
});

pub const SESSION_COOKIE: &str = "session";
pub const SKILL_SEARCH_LIMIT: i64 = 10;
pub const PROFILE_ID: i32 = 1;

/// Cache keys of rendered pages, named after the path that serves them.
pub mod pages {
    pub const PUBLIC: &str = "/";
    pub const EXPERIENCE_CARDS: &str = "/api/v1/experiences";
    pub const ADMIN_PROFILE: &str = "/admin/profile";
    pub const ADMIN_EXPERIENCES: &str = "/admin/experiences";
    pub const ADMIN_EDUCATIONS: &str = "/admin/educations";
    pub const ADMIN_COURSES: &str = "/admin/courses";
    pub const ADMIN_SKILLS: &str = "/admin/skills";
    pub const ADMIN_LANGUAGES: &str = "/admin/languages";
}
