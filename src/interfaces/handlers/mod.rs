pub mod auth;
pub mod courses;
pub mod dashboard;
pub mod educations;
pub mod experiences;
pub mod home;
pub mod json_error;
pub mod languages;
pub mod profile;
pub mod skills;
pub mod submission;
pub mod system;
