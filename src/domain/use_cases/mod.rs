pub mod auth;
pub mod course;
pub mod education;
pub mod experience;
pub mod extractors;
pub mod language;
pub mod portfolio;
pub mod profile;
pub mod skill;
