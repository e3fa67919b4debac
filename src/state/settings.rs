use nfl_api::CollegeMatcher;
use std::time::Duration;

const DEFAULT_INTERVAL_SECS: u64 = 300;
const MIN_INTERVAL_SECS: u64 = 30;

/// Runtime settings, loaded from environment variables:
///
/// - `WOLVEWATCH_COLLEGE`        target institution token (default "Michigan")
/// - `WOLVEWATCH_EXCLUDE`        comma-separated confusable variants to reject
/// - `WOLVEWATCH_INTERVAL_SECS`  seconds between scans (default 300, min 30)
#[derive(Debug, Clone)]
pub struct TrackerSettings {
    pub college: Option<String>,
    pub exclusions: Option<Vec<String>>,
    pub interval: Duration,
}

impl TrackerSettings {
    pub fn load() -> Self {
        let college = std::env::var("WOLVEWATCH_COLLEGE")
            .ok()
            .filter(|s| !s.trim().is_empty());
        let exclusions = std::env::var("WOLVEWATCH_EXCLUDE")
            .ok()
            .map(|s| parse_exclusions(&s));
        let interval_secs = std::env::var("WOLVEWATCH_INTERVAL_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .map(|n| n.max(MIN_INTERVAL_SECS))
            .unwrap_or(DEFAULT_INTERVAL_SECS);

        Self {
            college,
            exclusions,
            interval: Duration::from_secs(interval_secs),
        }
    }

    /// Build the matching policy. With no overrides this is the default
    /// Michigan matcher with the multi-campus exclusion list. A configured
    /// exclusion list applies whether or not the target was overridden.
    pub fn matcher(&self) -> CollegeMatcher {
        let target = self.college.as_deref().unwrap_or("Michigan");
        match &self.exclusions {
            None if self.college.is_none() => CollegeMatcher::default(),
            None => CollegeMatcher::new(target, &[]),
            Some(exclusions) => {
                let refs: Vec<&str> = exclusions.iter().map(String::as_str).collect();
                CollegeMatcher::new(target, &refs)
            }
        }
    }
}

fn parse_exclusions(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect()
}
