pub mod course;
pub mod education;
pub mod experience;
pub mod form_fields;
pub mod language;
pub mod profile;
pub mod skill;
pub mod token;
pub mod user;
pub mod validation;
