//! Run settings (`config/settings.json`) and per-run input overrides.

use std::path::Path;
use std::time::Duration;

use jobboards_api::RequestConfig;
use serde::Deserialize;

use crate::JobsError;

/// Crawl defaults read from the settings file. Every key is optional.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub default_query: String,
    pub default_location: String,
    pub max_pages: u32,
    pub sites: Vec<String>,
    pub request: RequestConfig,
    /// Pause after every request, in seconds.
    pub throttle_seconds: f64,
    /// Number of domains per processing batch.
    pub concurrency: usize,
    pub fetch_details: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_query: String::new(),
            default_location: String::new(),
            max_pages: 1,
            sites: Vec::new(),
            request: RequestConfig::default(),
            throttle_seconds: 1.0,
            concurrency: 3,
            fetch_details: true,
        }
    }
}

impl Settings {
    /// Throttle as a duration; negative or non-finite values mean no pause.
    pub fn throttle(&self) -> Duration {
        if self.throttle_seconds.is_finite() && self.throttle_seconds > 0.0 {
            Duration::from_secs_f64(self.throttle_seconds)
        } else {
            Duration::ZERO
        }
    }
}

/// Values that override the settings for a single run.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct InputOverrides {
    pub query: Option<String>,
    pub location: Option<String>,
    pub sites: Option<Vec<String>>,
    pub max_pages: Option<u32>,
}

/// Load the settings file.
///
/// # Returns
/// * `Ok(Settings)` - Parsed settings with defaults for absent keys
/// * `Err(JobsError)` - The file is missing, unreadable, or not valid JSON
pub fn load_settings(path: &Path) -> Result<Settings, JobsError> {
    read_json(path)
}

/// Load an input override file. A missing file yields empty overrides.
pub fn load_input(path: &Path) -> Result<InputOverrides, JobsError> {
    if !path.exists() {
        tracing::debug!("input file {} not found, using no overrides", path.display());
        return Ok(InputOverrides::default());
    }
    read_json(path)
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, JobsError> {
    let raw = std::fs::read_to_string(path).map_err(|source| JobsError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| JobsError::Json {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn write_file(dir: &tempfile::TempDir, name: &str, body: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(body.as_bytes()).unwrap();
        path
    }

    #[test]
    fn loads_full_settings() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "settings.json",
            r#"{
                "default_query": "nurse",
                "default_location": "Dublin",
                "max_pages": 3,
                "sites": ["www.irishjobs.ie", "www.stepstone.de"],
                "request": {"timeout": 5, "cookies": {"consent": "yes"}},
                "throttle_seconds": 0.5,
                "concurrency": 2,
                "fetch_details": false
            }"#,
        );
        let settings = load_settings(&path).unwrap();
        assert_eq!(settings.default_query, "nurse");
        assert_eq!(settings.max_pages, 3);
        assert_eq!(settings.sites.len(), 2);
        assert_eq!(settings.request.timeout(), Duration::from_secs(5));
        assert_eq!(settings.throttle(), Duration::from_millis(500));
        assert_eq!(settings.concurrency, 2);
        assert!(!settings.fetch_details);
    }

    #[test]
    fn absent_keys_take_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "settings.json", "{}");
        let settings = load_settings(&path).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.throttle(), Duration::from_secs(1));
        assert!(settings.fetch_details);
    }

    #[test]
    fn missing_settings_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_settings(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, JobsError::Io { .. }));
    }

    #[test]
    fn malformed_settings_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "settings.json", "{ not json");
        let err = load_settings(&path).unwrap_err();
        assert!(matches!(err, JobsError::Json { .. }));
    }

    #[test]
    fn negative_throttle_means_no_pause() {
        let settings = Settings {
            throttle_seconds: -2.0,
            ..Default::default()
        };
        assert_eq!(settings.throttle(), Duration::ZERO);
    }

    #[test]
    fn missing_input_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let input = load_input(&dir.path().join("input.json")).unwrap();
        assert_eq!(input, InputOverrides::default());
    }

    #[test]
    fn partial_input_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "input.json", r#"{"query": "chef", "max_pages": 2}"#);
        let input = load_input(&path).unwrap();
        assert_eq!(input.query.as_deref(), Some("chef"));
        assert_eq!(input.max_pages, Some(2));
        assert!(input.sites.is_none());
        assert!(input.location.is_none());
    }
}
