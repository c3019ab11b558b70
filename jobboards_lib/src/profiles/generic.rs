//! Broad selectors for heterogeneous UK and Irish boards (totaljobs, cwjobs,
//! caterer, irishjobs, nijobs and similar templates).

use crate::extract::{attr, blocks, text, Field, FieldRule};

use super::JobProfile;

const SEARCH_PATHS: &[&str] = &["/search?{qs}", "/jobs?{qs}", "/jobs/search/?{qs}"];

const CARD_ANCHORS: &[&str] = &[
    "a[href*='/job/']",
    "a[href*='/jobs/']",
    "a.result-job__title",
    "a.job-card__title",
];

const TITLE: &[FieldRule] = &[
    text(".job-title"),
    text(".job-card__title"),
    text("h2"),
    text("h3"),
];

const COMPANY: &[FieldRule] = &[
    text(".job-card__company"),
    text(".company"),
    text("[data-company]"),
];

const LOCATION: &[FieldRule] = &[
    text(".location"),
    text(".job-card__location"),
    text("[data-location]"),
];

const SALARY: &[FieldRule] = &[
    text(".salary"),
    text(".job-card__salary"),
    text("[data-salary]"),
];

const DATE_POSTED: &[FieldRule] = &[
    attr("time[datetime]", "datetime"),
    text("time"),
    text(".date"),
    text(".posted"),
];

const DESCRIPTION: &[FieldRule] = &[
    blocks(".job-description"),
    blocks(".description"),
    blocks("article"),
    blocks("[data-description]"),
];

/// Fallback profile for boards without a tuned profile.
#[derive(Clone, Copy, Debug, Default)]
pub struct GenericProfile;

impl JobProfile for GenericProfile {
    fn name(&self) -> &'static str {
        "generic"
    }

    fn search_paths(&self) -> &'static [&'static str] {
        SEARCH_PATHS
    }

    fn card_anchors(&self) -> &'static [&'static str] {
        CARD_ANCHORS
    }

    fn field_rules(&self, field: Field) -> &'static [FieldRule] {
        match field {
            Field::Title => TITLE,
            Field::Company => COMPANY,
            Field::Location => LOCATION,
            Field::Salary => SALARY,
            Field::DatePosted => DATE_POSTED,
        }
    }

    fn description_rules(&self) -> &'static [FieldRule] {
        DESCRIPTION
    }
}
