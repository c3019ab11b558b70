use serde::{Deserialize, Serialize};

/// Column order used by every export format.
pub const JOB_FIELDS: [&str; 11] = [
    "jobTitle",
    "companyName",
    "location",
    "jobUrl",
    "jobDescription",
    "salary",
    "employmentType",
    "datePosted",
    "category",
    "experienceLevel",
    "source",
];

/// One job listing as extracted from a job board.
///
/// Every field is a plain string and an empty string means "not found".
/// `job_url` is always absolute and identifies the job; `source` holds the
/// base URL of the board the listing was found on. Field declaration order
/// matches [`JOB_FIELDS`] so serializers emit the fixed column order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JobRecord {
    pub job_title: String,
    pub company_name: String,
    pub location: String,
    pub job_url: String,
    pub job_description: String,
    pub salary: String,
    pub employment_type: String,
    /// ISO calendar date (`YYYY-MM-DD`) or empty.
    pub date_posted: String,
    pub category: String,
    pub experience_level: String,
    pub source: String,
}

impl JobRecord {
    /// Field values in [`JOB_FIELDS`] order.
    pub fn values(&self) -> [&str; 11] {
        [
            &self.job_title,
            &self.company_name,
            &self.location,
            &self.job_url,
            &self.job_description,
            &self.salary,
            &self.employment_type,
            &self.date_posted,
            &self.category,
            &self.experience_level,
            &self.source,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_keys_follow_field_order() {
        let record = JobRecord {
            job_title: "Engineer".into(),
            job_url: "https://example.com/job/1".into(),
            ..Default::default()
        };
        let text = serde_json::to_string(&record).unwrap();
        let positions: Vec<usize> = JOB_FIELDS
            .iter()
            .map(|f| text.find(&format!("\"{}\"", f)).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn missing_keys_deserialize_as_empty() {
        let record: JobRecord = serde_json::from_str(r#"{"jobTitle":"Chef"}"#).unwrap();
        assert_eq!(record.job_title, "Chef");
        assert_eq!(record.salary, "");
    }

    #[test]
    fn values_match_fields() {
        let record = JobRecord {
            job_title: "t".into(),
            source: "s".into(),
            ..Default::default()
        };
        let values = record.values();
        assert_eq!(values[0], "t");
        assert_eq!(values[10], "s");
    }
}
