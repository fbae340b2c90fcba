pub mod course;
pub mod education;
pub mod experience;
pub mod language;
pub mod profile;
pub mod skill;
pub mod sqlx_repo;
pub mod token;
pub mod user;
