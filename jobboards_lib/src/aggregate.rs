//! Cross-domain aggregation helpers.

use std::collections::HashSet;

use jobboards_api::JobRecord;

/// Keeps the first record for every `job_url`, preserving order.
///
/// Records without a URL cannot be told apart and are dropped.
pub fn unique_by_job_url(records: Vec<JobRecord>) -> Vec<JobRecord> {
    let mut seen = HashSet::new();
    records
        .into_iter()
        .filter(|r| !r.job_url.is_empty() && seen.insert(r.job_url.clone()))
        .collect()
}

/// Removes repeated strings, keeping the first occurrence of each.
pub fn dedup_preserving_order<I, S>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for item in items {
        let item = item.into();
        if seen.insert(item.clone()) {
            out.push(item);
        }
    }
    out
}

/// Splits `items` into consecutive groups of at most `size` (minimum 1).
pub fn batches<T>(items: &[T], size: usize) -> std::slice::Chunks<'_, T> {
    items.chunks(size.max(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(url: &str, title: &str) -> JobRecord {
        JobRecord {
            job_url: url.into(),
            job_title: title.into(),
            ..Default::default()
        }
    }

    #[test]
    fn first_record_per_url_wins() {
        let records = vec![
            record("https://a.example/job/1", "first"),
            record("https://a.example/job/2", "other"),
            record("https://a.example/job/1", "second"),
        ];
        let unique = unique_by_job_url(records);
        let titles: Vec<&str> = unique.iter().map(|r| r.job_title.as_str()).collect();
        assert_eq!(titles, vec!["first", "other"]);
    }

    #[test]
    fn records_without_url_are_dropped() {
        let unique = unique_by_job_url(vec![record("", "a"), record("", "b")]);
        assert!(unique.is_empty());
    }

    #[test]
    fn string_dedup_keeps_first_seen_order() {
        let urls = ["b", "a", "b", "c", "a"];
        assert_eq!(dedup_preserving_order(urls), vec!["b", "a", "c"]);
    }

    #[test]
    fn batches_respect_size() {
        let sites = ["a", "b", "c", "d", "e"];
        let groups: Vec<&[&str]> = batches(&sites, 2).collect();
        assert_eq!(groups, vec![&["a", "b"][..], &["c", "d"][..], &["e"][..]]);
    }

    #[test]
    fn zero_batch_size_is_treated_as_one() {
        let sites = ["a", "b"];
        assert_eq!(batches(&sites, 0).count(), 2);
    }

    #[test]
    fn empty_input_has_no_batches() {
        let sites: [&str; 0] = [];
        assert_eq!(batches(&sites, 3).count(), 0);
    }
}
