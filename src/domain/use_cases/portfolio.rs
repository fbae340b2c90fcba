use chrono::NaiveDate;
use serde::Serialize;

use crate::{
    entities::{
        course::Course,
        education::Education,
        experience::Experience,
        language::{sort_languages, Language},
        profile::{Profile, ProfileResponse},
        skill::{group_by_category, Skill, SkillGroup},
    },
    month_year::MonthYear,
    timeline::{build_timeline, TimelineEntry},
};

/// Everything the public page is built from, as read from the store.
#[derive(Debug, Default)]
pub struct PortfolioSnapshot {
    pub profile: Option<Profile>,
    pub experiences: Vec<Experience>,
    pub educations: Vec<Education>,
    pub courses: Vec<Course>,
    pub skills: Vec<Skill>,
    pub languages: Vec<Language>,
}

#[derive(Debug, Serialize)]
pub struct PortfolioPage {
    pub profile: Option<ProfileResponse>,
    pub experiences: Vec<TimelineEntry>,
    pub educations: Vec<Education>,
    pub courses: Vec<Course>,
    pub skills: Vec<SkillGroup>,
    pub languages: Vec<Language>,
}

impl PortfolioPage {
    pub fn assemble(snapshot: PortfolioSnapshot, today: NaiveDate) -> Self {
        let PortfolioSnapshot {
            profile,
            experiences,
            mut educations,
            mut courses,
            skills,
            mut languages,
        } = snapshot;

        educations.sort_by(|a, b| b.start_date.cmp(&a.start_date));
        courses.sort_by(|a, b| b.completed_on.cmp(&a.completed_on));
        sort_languages(&mut languages);

        PortfolioPage {
            profile: profile.map(|p| ProfileResponse::from_profile(p, today)),
            experiences: build_timeline(&experiences, MonthYear::from_date(today)),
            educations,
            courses,
            skills: group_by_category(skills.into_iter().filter(|s| s.is_visible)),
            languages,
        }
    }
}
