//! Suite configuration.
//!
//! Loaded from YAML. Each booking call site names its own date formats and
//! may override the suite-wide timeout, page-turn cap and match strategy:
//!
//! ```yaml
//! match_timeout_ms: 10000
//! call_sites:
//!   airport:
//!     date_format: dd/MMM/yyyy
//!     page_label_format: MMM yyyy
//!   hourly:
//!     strategy: exact_only
//! ```

use crate::calendar::{NavigatorConfig, DEFAULT_MAX_PAGE_TURNS};
use crate::date_format::{DateFormat, DAY_MONTH_YEAR, DAY_MON_YEAR, MONTH_YEAR, MON_YEAR};
use crate::matcher::{MatchStrategy, MatcherConfig, NoMatchPolicy};
use crate::page::{ACTIVITIES_CALL_SITE, AIRPORT_CALL_SITE, HOURLY_CALL_SITE, OUTSTATION_CALL_SITE};
use crate::result::RoamerResult;
use crate::wait::{WaitOptions, DEFAULT_POLL_INTERVAL_MS, DEFAULT_WAIT_TIMEOUT_MS};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Settings for one booking call site
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CallSiteConfig {
    /// Format of target date text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_format: Option<DateFormat>,
    /// Format of the calendar page label
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_label_format: Option<DateFormat>,
    /// Page-turn cap override
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_page_turns: Option<usize>,
    /// Timeout override in milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,
    /// Suggestion match strategy override
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strategy: Option<MatchStrategy>,
}

impl CallSiteConfig {
    fn dates(date: &str, label: &str) -> Self {
        Self {
            date_format: DateFormat::from_pattern(date).ok(),
            page_label_format: DateFormat::from_pattern(label).ok(),
            ..Self::default()
        }
    }
}

/// Suite-wide configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuiteConfig {
    /// Deadline for one suggestion match or calendar navigation
    pub match_timeout_ms: u64,
    /// Poll interval for interactability waits
    pub poll_interval_ms: u64,
    /// Default page-turn cap
    pub max_page_turns: usize,
    /// Behaviour when no suggestion matches
    pub no_match: NoMatchPolicy,
    /// Directory for JSON and text data files
    pub data_dir: PathBuf,
    /// Directory for screenshots
    pub screenshot_dir: PathBuf,
    /// Report directories removed by `clean`
    pub report_dirs: Vec<PathBuf>,
    /// Named call sites
    pub call_sites: BTreeMap<String, CallSiteConfig>,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        let call_sites = BTreeMap::from([
            (AIRPORT_CALL_SITE.to_string(), CallSiteConfig::dates(DAY_MON_YEAR, MON_YEAR)),
            (OUTSTATION_CALL_SITE.to_string(), CallSiteConfig::dates(DAY_MONTH_YEAR, MONTH_YEAR)),
            (ACTIVITIES_CALL_SITE.to_string(), CallSiteConfig::dates(DAY_MONTH_YEAR, MONTH_YEAR)),
            (
                HOURLY_CALL_SITE.to_string(),
                CallSiteConfig {
                    strategy: Some(MatchStrategy::ExactOnly),
                    ..CallSiteConfig::dates(DAY_MONTH_YEAR, MONTH_YEAR)
                },
            ),
        ]);

        Self {
            match_timeout_ms: DEFAULT_WAIT_TIMEOUT_MS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            max_page_turns: DEFAULT_MAX_PAGE_TURNS,
            no_match: NoMatchPolicy::default(),
            data_dir: PathBuf::from("data"),
            screenshot_dir: PathBuf::from("screenshots"),
            report_dirs: vec![
                PathBuf::from("target/allure-results"),
                PathBuf::from("target/allure-report"),
            ],
            call_sites,
        }
    }
}

impl SuiteConfig {
    /// Load a YAML config file
    pub fn load(path: impl AsRef<Path>) -> RoamerResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_yaml(&text)?;
        debug!(path = %path.display(), call_sites = config.call_sites.len(), "loaded suite config");
        Ok(config)
    }

    /// Parse YAML text
    pub fn from_yaml(text: &str) -> RoamerResult<Self> {
        Ok(serde_yaml_ng::from_str(text)?)
    }

    /// Render as YAML
    pub fn to_yaml(&self) -> RoamerResult<String> {
        Ok(serde_yaml_ng::to_string(self)?)
    }

    /// Settings for a call site, if configured
    #[must_use]
    pub fn call_site(&self, name: &str) -> Option<&CallSiteConfig> {
        self.call_sites.get(name)
    }

    fn wait(&self, timeout_ms: Option<u64>) -> WaitOptions {
        WaitOptions::new()
            .with_timeout(timeout_ms.unwrap_or(self.match_timeout_ms))
            .with_poll_interval(self.poll_interval_ms)
    }

    /// Suite-default matcher settings
    #[must_use]
    pub fn matcher_config(&self) -> MatcherConfig {
        MatcherConfig {
            wait: self.wait(None),
            strategy: MatchStrategy::default(),
            no_match: self.no_match,
        }
    }

    /// Matcher settings for a call site; unknown names get the defaults
    #[must_use]
    pub fn matcher_config_for(&self, call_site: &str) -> MatcherConfig {
        let Some(site) = self.call_site(call_site) else {
            return self.matcher_config();
        };
        MatcherConfig {
            wait: self.wait(site.timeout_ms),
            strategy: site.strategy.unwrap_or_default(),
            no_match: self.no_match,
        }
    }

    /// Navigator settings for a call site; unknown names get the defaults
    #[must_use]
    pub fn navigator_config(&self, call_site: &str) -> NavigatorConfig {
        let defaults = NavigatorConfig::default();
        let site = self.call_site(call_site).cloned().unwrap_or_default();
        NavigatorConfig {
            date_format: site.date_format.unwrap_or(defaults.date_format),
            page_label_format: site.page_label_format.unwrap_or(defaults.page_label_format),
            max_page_turns: site.max_page_turns.unwrap_or(self.max_page_turns),
            wait: self.wait(site.timeout_ms),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = SuiteConfig::default();
        assert_eq!(config.match_timeout_ms, 10_000);
        assert_eq!(config.max_page_turns, 60);
        assert_eq!(config.data_dir, PathBuf::from("data"));
        assert_eq!(config.report_dirs.len(), 2);
        assert!(config.call_site("airport").is_some());
    }

    #[test]
    fn test_airport_navigator_formats() {
        let nav = SuiteConfig::default().navigator_config("airport");
        assert_eq!(nav.date_format.pattern(), "dd/MMM/yyyy");
        assert_eq!(nav.page_label_format.pattern(), "MMM yyyy");
        assert_eq!(nav.max_page_turns, 60);
    }

    #[test]
    fn test_unknown_call_site_falls_back() {
        let config = SuiteConfig::default();
        assert_eq!(config.navigator_config("nowhere"), NavigatorConfig::default());
        assert_eq!(config.matcher_config_for("nowhere"), config.matcher_config());
    }

    #[test]
    fn test_hourly_is_exact_only() {
        let config = SuiteConfig::default();
        assert_eq!(config.matcher_config_for("hourly").strategy, MatchStrategy::ExactOnly);
        assert_eq!(config.matcher_config().strategy, MatchStrategy::ExactOrShortestFuzzy);
    }

    #[test]
    fn test_from_yaml_overrides() {
        let yaml = r"
match_timeout_ms: 2500
no_match: first_available
call_sites:
  hotels:
    date_format: d-M-yy
    max_page_turns: 12
    timeout_ms: 500
";
        let config = SuiteConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.match_timeout_ms, 2500);
        assert_eq!(config.poll_interval_ms, DEFAULT_POLL_INTERVAL_MS);
        assert_eq!(config.matcher_config().wait.timeout_ms, 2500);
        assert_eq!(config.matcher_config().no_match, NoMatchPolicy::FirstAvailable);

        let nav = config.navigator_config("hotels");
        assert_eq!(nav.date_format.pattern(), "d-M-yy");
        assert_eq!(nav.page_label_format.pattern(), MONTH_YEAR);
        assert_eq!(nav.max_page_turns, 12);
        assert_eq!(nav.wait.timeout_ms, 500);
    }

    #[test]
    fn test_bad_pattern_in_yaml() {
        let yaml = "call_sites:\n  hotels:\n    date_format: EEE\n";
        assert!(SuiteConfig::from_yaml(yaml).is_err());
    }

    #[test]
    fn test_load_and_render() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "max_page_turns: 24").unwrap();
        let config = SuiteConfig::load(file.path()).unwrap();
        assert_eq!(config.max_page_turns, 24);

        let yaml = config.to_yaml().unwrap();
        assert!(yaml.contains("max_page_turns: 24"));
        assert_eq!(SuiteConfig::from_yaml(&yaml).unwrap(), config);
    }

    #[test]
    fn test_load_missing_file() {
        let err = SuiteConfig::load("/nonexistent/roamer.yaml").unwrap_err();
        assert!(matches!(err, crate::result::RoamerError::Io(_)));
    }
}
