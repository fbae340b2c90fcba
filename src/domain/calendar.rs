use chrono::{Datelike, NaiveDate};
use serde::Serialize;

/// Whole years lived on `today`. Leap-day birthdays are celebrated on 1 March in common years.
pub fn age_on(birthdate: NaiveDate, today: NaiveDate) -> u32 {
    if today < birthdate {
        return 0;
    }

    let mut years = today.year() - birthdate.year();
    let birthday_reached = (today.month(), today.day()) >= (birthdate.month(), birthdate.day());
    if !birthday_reached {
        years -= 1;
    }
    years.max(0) as u32
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ZodiacSign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

impl ZodiacSign {
    pub fn from_date(date: NaiveDate) -> Self {
        use ZodiacSign::*;

        match (date.month(), date.day()) {
            (3, 21..) | (4, ..=19) => Aries,
            (4, _) | (5, ..=20) => Taurus,
            (5, _) | (6, ..=20) => Gemini,
            (6, _) | (7, ..=22) => Cancer,
            (7, _) | (8, ..=22) => Leo,
            (8, _) | (9, ..=22) => Virgo,
            (9, _) | (10, ..=22) => Libra,
            (10, _) | (11, ..=21) => Scorpio,
            (11, _) | (12, ..=21) => Sagittarius,
            (12, _) | (1, ..=19) => Capricorn,
            (1, _) | (2, ..=18) => Aquarius,
            _ => Pisces,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ZodiacSign::Aries => "Aries",
            ZodiacSign::Taurus => "Taurus",
            ZodiacSign::Gemini => "Gemini",
            ZodiacSign::Cancer => "Cancer",
            ZodiacSign::Leo => "Leo",
            ZodiacSign::Virgo => "Virgo",
            ZodiacSign::Libra => "Libra",
            ZodiacSign::Scorpio => "Scorpio",
            ZodiacSign::Sagittarius => "Sagittarius",
            ZodiacSign::Capricorn => "Capricorn",
            ZodiacSign::Aquarius => "Aquarius",
            ZodiacSign::Pisces => "Pisces",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            ZodiacSign::Aries => "♈",
            ZodiacSign::Taurus => "♉",
            ZodiacSign::Gemini => "♊",
            ZodiacSign::Cancer => "♋",
            ZodiacSign::Leo => "♌",
            ZodiacSign::Virgo => "♍",
            ZodiacSign::Libra => "♎",
            ZodiacSign::Scorpio => "♏",
            ZodiacSign::Sagittarius => "♐",
            ZodiacSign::Capricorn => "♑",
            ZodiacSign::Aquarius => "♒",
            ZodiacSign::Pisces => "♓",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn age_counts_only_reached_birthdays() {
        let birth = date(1990, 6, 15);
        assert_eq!(age_on(birth, date(2024, 6, 14)), 33);
        assert_eq!(age_on(birth, date(2024, 6, 15)), 34);
        assert_eq!(age_on(birth, date(2024, 12, 31)), 34);
    }

    #[test]
    fn leap_day_birthday_turns_over_on_first_of_march() {
        let birth = date(2000, 2, 29);
        assert_eq!(age_on(birth, date(2023, 2, 28)), 22);
        assert_eq!(age_on(birth, date(2023, 3, 1)), 23);
        assert_eq!(age_on(birth, date(2024, 2, 29)), 24);
    }

    #[test]
    fn future_birthdate_is_age_zero() {
        assert_eq!(age_on(date(2030, 1, 1), date(2024, 1, 1)), 0);
    }

    #[test]
    fn zodiac_boundaries() {
        assert_eq!(ZodiacSign::from_date(date(1990, 3, 20)), ZodiacSign::Pisces);
        assert_eq!(ZodiacSign::from_date(date(1990, 3, 21)), ZodiacSign::Aries);
        assert_eq!(ZodiacSign::from_date(date(1990, 4, 19)), ZodiacSign::Aries);
        assert_eq!(ZodiacSign::from_date(date(1990, 4, 20)), ZodiacSign::Taurus);
        assert_eq!(ZodiacSign::from_date(date(1990, 12, 21)), ZodiacSign::Sagittarius);
        assert_eq!(ZodiacSign::from_date(date(1990, 12, 22)), ZodiacSign::Capricorn);
        assert_eq!(ZodiacSign::from_date(date(1991, 1, 19)), ZodiacSign::Capricorn);
        assert_eq!(ZodiacSign::from_date(date(1991, 1, 20)), ZodiacSign::Aquarius);
        assert_eq!(ZodiacSign::from_date(date(1991, 2, 18)), ZodiacSign::Aquarius);
        assert_eq!(ZodiacSign::from_date(date(1991, 2, 19)), ZodiacSign::Pisces);
        assert_eq!(ZodiacSign::from_date(date(1991, 8, 23)), ZodiacSign::Virgo);
    }

    #[test]
    fn zodiac_labels() {
        let sign = ZodiacSign::from_date(date(1988, 7, 30));
        assert_eq!(sign.name(), "Leo");
        assert_eq!(sign.symbol(), "♌");
    }
}
