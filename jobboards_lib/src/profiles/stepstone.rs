//! Selectors tuned for the Stepstone network (stepstone.de/.at/.be/.nl).
//!
//! Covers the current `data-at` card markup as well as the older
//! `resultlist` layout that some country sites still serve.

use jobboards_api::SearchParams;

use crate::extract::{attr, blocks, text, Field, FieldRule};

use super::JobProfile;

const SEARCH_PATHS: &[&str] = &["/5/ergebnisliste.html?{qs}", "/jobs?{qs}"];

const CARD_ANCHORS: &[&str] = &[
    "a[data-at='job-item-title']",
    "a[data-testid='job-item-title']",
    "a[href*='/stellenangebote--']",
    "a.resultlist-title",
    "a[href*='/job/']",
];

const TITLE: &[FieldRule] = &[
    text("[data-at='job-item-title']"),
    text("[data-testid='job-item-title']"),
    text(".resultlist-title"),
    text("h2"),
    text("h3"),
];

const COMPANY: &[FieldRule] = &[
    text("[data-at='job-item-company-name']"),
    text("[data-testid='job-item-company-name']"),
    text(".resultlist-company"),
    text("[data-company]"),
];

const LOCATION: &[FieldRule] = &[
    text("[data-at='job-item-location']"),
    text("[data-testid='job-item-location']"),
    text(".resultlist-location"),
    text("[data-location]"),
];

const SALARY: &[FieldRule] = &[
    text("[data-at='job-item-salary-info']"),
    text("[data-testid='job-item-salary-info']"),
    text(".resultlist-salary"),
    text("[data-salary]"),
];

const DATE_POSTED: &[FieldRule] = &[
    attr("time[datetime]", "datetime"),
    text("[data-at='job-item-timeago']"),
    text("time"),
    text(".resultlist-date"),
];

const DESCRIPTION: &[FieldRule] = &[
    blocks("[data-at='job-ad-content']"),
    blocks("[data-at='jobad-content']"),
    blocks(".listing-content"),
    blocks(".job-ad-display"),
    blocks("article"),
    blocks("main"),
];

/// Profile for Stepstone group sites.
#[derive(Clone, Copy, Debug, Default)]
pub struct StepstoneProfile;

impl JobProfile for StepstoneProfile {
    fn name(&self) -> &'static str {
        "stepstone"
    }

    fn search_paths(&self) -> &'static [&'static str] {
        SEARCH_PATHS
    }

    fn search_params(&self) -> SearchParams {
        SearchParams {
            keyword: "ke",
            location: "ws",
            page: "page",
        }
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
