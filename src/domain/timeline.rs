use std::cmp::Ordering;

use serde::Serialize;
use uuid::Uuid;

use crate::entities::experience::Experience;
use crate::month_year::MonthYear;

/// One card of the experience timeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineEntry {
    pub id: Uuid,
    pub role: String,
    pub company: String,
    pub location: Option<String>,
    pub start_date: MonthYear,
    pub end_date: Option<MonthYear>,
    pub is_current: bool,
    pub period: String,
    pub duration: String,
    pub description: Option<String>,
}

/// Current positions first, then most recent start, then most recent end.
pub fn timeline_order(a: &Experience, b: &Experience) -> Ordering {
    b.is_current
        .cmp(&a.is_current)
        .then_with(|| b.start_date.cmp(&a.start_date))
        .then_with(|| b.end_date.cmp(&a.end_date))
        .then_with(|| a.company.cmp(&b.company))
}

pub fn build_timeline(experiences: &[Experience], today: MonthYear) -> Vec<TimelineEntry> {
    let mut ordered: Vec<&Experience> = experiences.iter().collect();
    ordered.sort_by(|a, b| timeline_order(a, b));

    ordered
        .into_iter()
        .map(|experience| {
            let end = if experience.is_current {
                today
            } else {
                experience.end_date.unwrap_or(today)
            };

            TimelineEntry {
                id: experience.id,
                role: experience.role.clone(),
                company: experience.company.clone(),
                location: experience.location.clone(),
                start_date: experience.start_date,
                end_date: experience.end_date,
                is_current: experience.is_current,
                period: period_label(experience.start_date, experience.end_date, experience.is_current),
                duration: duration_label(experience.start_date.months_until(end)),
                description: experience.description.clone(),
            }
        })
        .collect()
}

pub fn period_label(start: MonthYear, end: Option<MonthYear>, is_current: bool) -> String {
    match (is_current, end) {
        (false, Some(end)) => format!("{} - {}", start, end),
        _ => format!("{} - Present", start),
    }
}

pub fn duration_label(months: u32) -> String {
    let years = months / 12;
    let rest = months % 12;

    let plural = |n: u32, one: &str, many: &str| {
        if n == 1 { format!("1 {}", one) } else { format!("{} {}", n, many) }
    };

    match (years, rest) {
        (0, m) => plural(m, "mo", "mos"),
        (y, 0) => plural(y, "yr", "yrs"),
        (y, m) => format!("{} {}", plural(y, "yr", "yrs"), plural(m, "mo", "mos")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn experience(company: &str, start: &str, end: Option<&str>, is_current: bool) -> Experience {
        Experience {
            id: Uuid::new_v4(),
            role: "Engineer".into(),
            company: company.into(),
            location: None,
            start_date: MonthYear::parse(start).unwrap(),
            end_date: end.map(|e| MonthYear::parse(e).unwrap()),
            is_current,
            description: None,
            salary: None,
            exit_reason: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn current_positions_come_first_then_most_recent() {
        let today = MonthYear::new(2024, 6).unwrap();
        let entries = build_timeline(
            &[
                experience("Old Corp", "01/2015", Some("12/2017"), false),
                experience("Mid Corp", "01/2018", Some("12/2020"), false),
                experience("Now Corp", "01/2021", None, true),
                experience("Side Gig", "03/2016", Some("05/2016"), false),
            ],
            today,
        );

        let companies: Vec<&str> = entries.iter().map(|e| e.company.as_str()).collect();
        assert_eq!(companies, vec!["Now Corp", "Mid Corp", "Side Gig", "Old Corp"]);
    }

    #[test]
    fn labels_period_and_duration() {
        let today = MonthYear::new(2024, 3).unwrap();
        let entries = build_timeline(
            &[
                experience("Acme", "01/2022", None, true),
                experience("Initech", "02/2019", Some("04/2021"), false),
            ],
            today,
        );

        assert_eq!(entries[0].period, "01/2022 - Present");
        assert_eq!(entries[0].duration, "2 yrs 3 mos");
        assert_eq!(entries[1].period, "02/2019 - 04/2021");
        assert_eq!(entries[1].duration, "2 yrs 3 mos");
    }

    #[test]
    fn duration_pluralisation() {
        assert_eq!(duration_label(1), "1 mo");
        assert_eq!(duration_label(5), "5 mos");
        assert_eq!(duration_label(12), "1 yr");
        assert_eq!(duration_label(13), "1 yr 1 mo");
        assert_eq!(duration_label(27), "2 yrs 3 mos");
        assert_eq!(duration_label(0), "0 mos");
    }
}
