//! Text, date, and URL normalization helpers.
//!
//! Everything here is total: bad input yields an empty string (or the input
//! passed through), never an error.

use chrono::{DateTime, Datelike, Local, Months, NaiveDate, NaiveDateTime};
use regex::Regex;
use url::Url;

/// Collapses every whitespace run (including non-breaking spaces) to one
/// space and trims the ends.
pub fn clean_text(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Like [`clean_text`] but keeps line structure: each line is collapsed and
/// blank lines are dropped.
pub fn clean_multiline(s: &str) -> String {
    s.lines()
        .map(clean_text)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Upper-cases the first letter of every alphabetic run: `full-time` becomes `Full-Time`.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;
    for ch in s.chars() {
        if ch.is_alphabetic() {
            if at_word_start {
                out.extend(ch.to_uppercase());
            } else {
                out.extend(ch.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(ch);
            at_word_start = true;
        }
    }
    out
}

/// Resolves `href` against `base`.
///
/// `base` is treated as a directory (a trailing slash is added when
/// missing). An empty `href` yields `base`; an unparsable base yields the
/// href unchanged.
pub fn make_absolute_url(base: &str, href: &str) -> String {
    let href = href.trim();
    if href.is_empty() {
        return base.to_string();
    }
    let base_dir = if base.ends_with('/') {
        base.to_string()
    } else {
        format!("{}/", base)
    };
    match Url::parse(&base_dir).and_then(|b| b.join(href)) {
        Ok(url) => url.to_string(),
        Err(_) => href.to_string(),
    }
}

/// Parses free-form date text into `YYYY-MM-DD`, or `""` when no date can be read.
///
/// Relative phrases ("today", "3 days ago", "vor 2 Tagen") are resolved
/// against the local calendar date.
pub fn parse_date(text: &str) -> String {
    parse_date_on(text, Local::now().date_naive())
}

/// [`parse_date`] with an explicit reference date for relative phrases.
pub fn parse_date_on(text: &str, today: NaiveDate) -> String {
    parse_naive_date(text, today)
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

fn parse_naive_date(text: &str, today: NaiveDate) -> Option<NaiveDate> {
    let cleaned = clean_text(text);
    if cleaned.is_empty() {
        return None;
    }
    parse_timestamp(&cleaned)
        .or_else(|| parse_relative(&cleaned.to_lowercase(), today))
        .or_else(|| parse_numeric(&cleaned))
        .or_else(|| parse_words(&cleaned.to_lowercase(), today))
}

fn parse_timestamp(s: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }
    None
}

fn parse_relative(lower: &str, today: NaiveDate) -> Option<NaiveDate> {
    let words: Vec<&str> = lower
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect();
    if words.iter().any(|w| matches!(*w, "today" | "heute" | "vandaag")) {
        return Some(today);
    }
    if words.iter().any(|w| matches!(*w, "yesterday" | "gestern" | "gisteren")) {
        return today.pred_opt();
    }

    let english = Regex::new(r"(\d+)\+?\s*(minute|hour|day|week|month)s?\s+ago").ok()?;
    let german = Regex::new(r"vor\s+(\d+)\s+(minute|stunde|tag|woche|monat)").ok()?;
    let (amount, unit) = if let Some(cap) = english.captures(lower) {
        (cap[1].parse::<u32>().ok()?, cap[2].to_string())
    } else if let Some(cap) = german.captures(lower) {
        (cap[1].parse::<u32>().ok()?, cap[2].to_string())
    } else {
        return None;
    };

    match unit.as_str() {
        "minute" | "hour" | "stunde" => Some(today),
        "day" | "tag" => today.checked_sub_days(chrono::Days::new(amount.into())),
        "week" | "woche" => today.checked_sub_days(chrono::Days::new(u64::from(amount) * 7)),
        "month" | "monat" => today.checked_sub_months(Months::new(amount)),
        _ => None,
    }
}

fn parse_numeric(s: &str) -> Option<NaiveDate> {
    let iso = Regex::new(r"\b(\d{4})[-/.](\d{1,2})[-/.](\d{1,2})\b").ok()?;
    if let Some(cap) = iso.captures(s) {
        return ymd(cap[1].parse().ok()?, cap[2].parse().ok()?, cap[3].parse().ok()?);
    }

    // Dotted dates are day-first, as written on German and Dutch boards.
    let dotted = Regex::new(r"\b(\d{1,2})\.(\d{1,2})\.(\d{4}|\d{2})\b").ok()?;
    if let Some(cap) = dotted.captures(s) {
        let year = full_year(cap[3].parse().ok()?);
        return ymd(year, cap[2].parse().ok()?, cap[1].parse().ok()?);
    }

    // Slashed dates are month-first unless the first part cannot be a month.
    let slashed = Regex::new(r"\b(\d{1,2})/(\d{1,2})/(\d{4}|\d{2})\b").ok()?;
    if let Some(cap) = slashed.captures(s) {
        let first: u32 = cap[1].parse().ok()?;
        let second: u32 = cap[2].parse().ok()?;
        let year = full_year(cap[3].parse().ok()?);
        return if first > 12 {
            ymd(year, second, first)
        } else {
            ymd(year, first, second)
        };
    }
    None
}

fn parse_words(lower: &str, today: NaiveDate) -> Option<NaiveDate> {
    let mut month = None;
    let mut day = None;
    let mut year = None;

    for token in lower
        .split(|c: char| c.is_whitespace() || matches!(c, ',' | '-' | '/'))
        .filter(|t| !t.is_empty())
    {
        let token = token.trim_matches(|c: char| c == '.' || c == '(' || c == ')');
        if month.is_none() {
            if let Some(m) = month_from_name(token) {
                month = Some(m);
                continue;
            }
        }
        let digits = token.trim_end_matches(|c: char| c.is_alphabetic());
        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            continue;
        }
        if digits.len() == 4 && year.is_none() {
            year = digits.parse::<i32>().ok().filter(|y| (1900..=2100).contains(y));
        } else if digits.len() <= 2 && day.is_none() {
            day = digits.parse::<u32>().ok().filter(|d| (1..=31).contains(d));
        }
    }

    let month = month?;
    match (day, year) {
        (Some(d), Some(y)) => ymd(y, month, d),
        (Some(d), None) => ymd(today.year(), month, d),
        (None, Some(y)) => ymd(y, month, 1),
        (None, None) => None,
    }
}

fn month_from_name(token: &str) -> Option<u32> {
    const MONTHS: [&[&str]; 12] = [
        &["january", "jan", "januar", "januari", "jänner"],
        &["february", "feb", "februar", "februari"],
        &["march", "mar", "märz", "maart", "mrt"],
        &["april", "apr"],
        &["may", "mai", "mei"],
        &["june", "jun", "juni"],
        &["july", "jul", "juli"],
        &["august", "aug", "augustus"],
        &["september", "sep", "sept"],
        &["october", "oct", "oktober", "okt"],
        &["november", "nov"],
        &["december", "dec", "dezember", "dez"],
    ];
    MONTHS
        .iter()
        .position(|names| names.contains(&token))
        .map(|i| i as u32 + 1)
}

fn full_year(year: i32) -> i32 {
    if year < 100 {
        2000 + year
    } else {
        year
    }
}

fn ymd(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
}
