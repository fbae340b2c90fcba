pub mod entities;
pub mod use_cases;
pub mod month_year;
pub mod calendar;
pub mod timeline;
pub mod password;
