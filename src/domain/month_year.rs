use std::{fmt, str::FromStr};

use chrono::{Datelike, Local, NaiveDate};
use derive_more::Display;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// A calendar month, exchanged as `MM/YYYY` and stored as the first day of that month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, sqlx::Type)]
#[sqlx(transparent)]
pub struct MonthYear(NaiveDate);

#[derive(Debug, Display, PartialEq)]
pub enum MonthYearError {
    #[display("Date must use the MM/YYYY format")]
    Format,

    #[display("Month must be between 01 and 12")]
    Month,

    #[display("Year is out of range")]
    Year,
}

impl MonthYear {
    pub fn new(year: i32, month: u32) -> Result<Self, MonthYearError> {
        if !(1..=12).contains(&month) {
            return Err(MonthYearError::Month);
        }
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(MonthYear)
            .ok_or(MonthYearError::Year)
    }

    pub fn parse(value: &str) -> Result<Self, MonthYearError> {
        let (month, year) = value.trim().split_once('/').ok_or(MonthYearError::Format)?;
        let digits = |part: &str, len: usize| part.len() == len && part.bytes().all(|b| b.is_ascii_digit());
        if !digits(month, 2) || !digits(year, 4) {
            return Err(MonthYearError::Format);
        }
        let month: u32 = month.parse().map_err(|_| MonthYearError::Format)?;
        let year: i32 = year.parse().map_err(|_| MonthYearError::Format)?;
        MonthYear::new(year, month)
    }

    pub fn from_date(date: NaiveDate) -> Self {
        MonthYear(date.with_day(1).unwrap_or(date))
    }

    pub fn today() -> Self {
        MonthYear::from_date(Local::now().date_naive())
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn first_day(&self) -> NaiveDate {
        self.0
    }

    /// Months from `self` through `end`, both included. Zero when `end` is earlier.
    pub fn months_until(&self, end: MonthYear) -> u32 {
        let start = self.year() * 12 + self.month() as i32;
        let end = end.year() * 12 + end.month() as i32;
        (end - start + 1).max(0) as u32
    }
}

impl fmt::Display for MonthYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{:04}", self.month(), self.year())
    }
}

impl FromStr for MonthYear {
    type Err = MonthYearError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MonthYear::parse(s)
    }
}

impl Serialize for MonthYear {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MonthYear {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        MonthYear::parse(&raw).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_two_digit_month_and_four_digit_year() {
        let month = MonthYear::parse("03/2021").unwrap();
        assert_eq!(month.month(), 3);
        assert_eq!(month.year(), 2021);
        assert_eq!(month.to_string(), "03/2021");
    }

    #[test]
    fn rejects_malformed_values() {
        assert_eq!(MonthYear::parse("2021-03"), Err(MonthYearError::Format));
        assert_eq!(MonthYear::parse("3/2021"), Err(MonthYearError::Format));
        assert_eq!(MonthYear::parse("01/+999"), Err(MonthYearError::Format));
        assert_eq!(MonthYear::parse("01/-999"), Err(MonthYearError::Format));
        assert_eq!(MonthYear::parse("+1/2021"), Err(MonthYearError::Format));
        assert!(serde_json::from_str::<MonthYear>("\"06/-123\"").is_err());
        assert_eq!(MonthYear::parse("13/2021"), Err(MonthYearError::Month));
        assert_eq!(MonthYear::parse("00/2021"), Err(MonthYearError::Month));
        assert_eq!(MonthYear::parse(""), Err(MonthYearError::Format));
    }

    #[test]
    fn orders_chronologically() {
        let earlier = MonthYear::parse("12/2019").unwrap();
        let later = MonthYear::parse("01/2020").unwrap();
        assert!(earlier < later);
    }

    #[test]
    fn counts_months_inclusively() {
        let start = MonthYear::parse("01/2020").unwrap();
        assert_eq!(start.months_until(start), 1);
        assert_eq!(start.months_until(MonthYear::parse("12/2020").unwrap()), 12);
        assert_eq!(start.months_until(MonthYear::parse("03/2022").unwrap()), 27);
        assert_eq!(start.months_until(MonthYear::parse("06/2019").unwrap()), 0);
    }

    #[test]
    fn serializes_as_month_year_string() {
        let month = MonthYear::parse("07/2018").unwrap();
        assert_eq!(serde_json::to_string(&month).unwrap(), "\"07/2018\"");

        let back: MonthYear = serde_json::from_str("\"07/2018\"").unwrap();
        assert_eq!(back, month);
        assert!(serde_json::from_str::<MonthYear>("\"2018-07\"").is_err());
    }

    #[test]
    fn from_date_truncates_to_first_day() {
        let date = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        assert_eq!(MonthYear::from_date(date).first_day(), NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
    }
}
