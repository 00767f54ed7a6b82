// Configuration for a NocoDB end-to-end session
//
// Values come from builder methods (mirroring `playwright_rs::LaunchOptions`)
// or from `NOCODB_E2E_*` environment variables. The struct is serde-ready so
// suites can also keep it in a JSON file.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const ENV_BASE_URL: &str = "NOCODB_E2E_BASE_URL";
pub const ENV_HEADLESS: &str = "NOCODB_E2E_HEADLESS";
pub const ENV_BROWSER: &str = "NOCODB_E2E_BROWSER";
pub const ENV_SLOW_MO_MS: &str = "NOCODB_E2E_SLOW_MO_MS";
pub const ENV_ASSERTION_TIMEOUT_MS: &str = "NOCODB_E2E_ASSERTION_TIMEOUT_MS";
pub const ENV_REQUEST_TIMEOUT_MS: &str = "NOCODB_E2E_REQUEST_TIMEOUT_MS";

const DEFAULT_BASE_URL: &str = "http://localhost:3000";

/// Default timeout for polling UI assertions (matches `playwright_rs::expect`)
const DEFAULT_ASSERTION_TIMEOUT_MS: u64 = 5_000;

/// Default timeout for network waits (matches Playwright's action timeout)
const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 30_000;

/// URL path fragment of the data API; saves are gated on requests to it.
pub const DATA_API_PATH: &str = "api/v1/db/data/noco/";

/// Browser engine to launch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrowserKind {
    #[default]
    Chromium,
    Firefox,
    Webkit,
}

impl std::str::FromStr for BrowserKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "chromium" | "chrome" => Ok(BrowserKind::Chromium),
            "firefox" => Ok(BrowserKind::Firefox),
            "webkit" => Ok(BrowserKind::Webkit),
            other => Err(Error::Config(format!(
                "{}: unknown browser '{}' (expected chromium, firefox or webkit)",
                ENV_BROWSER, other
            ))),
        }
    }
}

/// Session configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct E2eConfig {
    /// Origin of the application under test
    pub base_url: String,

    pub browser: BrowserKind,

    pub headless: bool,

    /// Slows every browser operation by this many milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slow_mo_ms: Option<f64>,

    /// Timeout for polling assertions (toasts, counts, URLs)
    pub assertion_timeout_ms: u64,

    /// Timeout for waiting on data API requests
    pub request_timeout_ms: u64,
}

impl Default for E2eConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            browser: BrowserKind::default(),
            headless: true,
            slow_mo_ms: None,
            assertion_timeout_ms: DEFAULT_ASSERTION_TIMEOUT_MS,
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
        }
    }
}

impl E2eConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads configuration from `NOCODB_E2E_*` environment variables.
    ///
    /// Unset variables keep their defaults; set but unparsable ones are errors.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Parses a JSON config; missing keys keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup(ENV_BASE_URL) {
            url::Url::parse(&url)
                .map_err(|e| Error::Config(format!("{}: {}", ENV_BASE_URL, e)))?;
            config.base_url = url;
        }
        if let Some(value) = lookup(ENV_HEADLESS) {
            config.headless = parse_bool(ENV_HEADLESS, &value)?;
        }
        if let Some(value) = lookup(ENV_BROWSER) {
            config.browser = value.parse()?;
        }
        if let Some(value) = lookup(ENV_SLOW_MO_MS) {
            config.slow_mo_ms = Some(
                value
                    .trim()
                    .parse::<f64>()
                    .map_err(|e| Error::Config(format!("{}: {}", ENV_SLOW_MO_MS, e)))?,
            );
        }
        if let Some(value) = lookup(ENV_ASSERTION_TIMEOUT_MS) {
            config.assertion_timeout_ms = parse_millis(ENV_ASSERTION_TIMEOUT_MS, &value)?;
        }
        if let Some(value) = lookup(ENV_REQUEST_TIMEOUT_MS) {
            config.request_timeout_ms = parse_millis(ENV_REQUEST_TIMEOUT_MS, &value)?;
        }

        Ok(config)
    }

    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn browser(mut self, browser: BrowserKind) -> Self {
        self.browser = browser;
        self
    }

    pub fn headless(mut self, enabled: bool) -> Self {
        self.headless = enabled;
        self
    }

    pub fn slow_mo(mut self, ms: f64) -> Self {
        self.slow_mo_ms = Some(ms);
        self
    }

    pub fn assertion_timeout(mut self, timeout: Duration) -> Self {
        self.assertion_timeout_ms = timeout.as_millis() as u64;
        self
    }

    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout_ms = timeout.as_millis() as u64;
        self
    }

    pub fn assertion_timeout_duration(&self) -> Duration {
        Duration::from_millis(self.assertion_timeout_ms)
    }

    pub fn request_timeout_duration(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    /// Glob the network gate intercepts on the configured origin
    pub fn data_api_glob(&self) -> String {
        format!("**/{}**", DATA_API_PATH)
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(Error::Config(format!(
            "{}: expected a boolean, got '{}'",
            key, other
        ))),
    }
}

fn parse_millis(key: &str, value: &str) -> Result<u64> {
    let millis: u64 = value
        .trim()
        .parse()
        .map_err(|e| Error::Config(format!("{}: {}", key, e)))?;
    if millis == 0 {
        return Err(Error::Config(format!("{}: must be greater than zero", key)));
    }
    Ok(millis)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = E2eConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, E2eConfig::default());
        assert_eq!(config.base_url, "http://localhost:3000");
        assert!(config.headless);
        assert_eq!(config.browser, BrowserKind::Chromium);
        assert_eq!(config.assertion_timeout_duration(), Duration::from_secs(5));
    }

    #[test]
    fn test_env_overrides() {
        let config = E2eConfig::from_lookup(lookup(&[
            (ENV_BASE_URL, "http://127.0.0.1:8080"),
            (ENV_HEADLESS, "false"),
            (ENV_BROWSER, "Firefox"),
            (ENV_SLOW_MO_MS, "250"),
            (ENV_ASSERTION_TIMEOUT_MS, "10000"),
            (ENV_REQUEST_TIMEOUT_MS, "45000"),
        ]))
        .unwrap();

        assert_eq!(config.base_url, "http://127.0.0.1:8080");
        assert!(!config.headless);
        assert_eq!(config.browser, BrowserKind::Firefox);
        assert_eq!(config.slow_mo_ms, Some(250.0));
        assert_eq!(config.assertion_timeout_ms, 10_000);
        assert_eq!(config.request_timeout_duration(), Duration::from_secs(45));
    }

    #[test]
    fn test_invalid_env_values() {
        for vars in [
            [(ENV_BASE_URL, "not a url")],
            [(ENV_HEADLESS, "maybe")],
            [(ENV_BROWSER, "netscape")],
            [(ENV_ASSERTION_TIMEOUT_MS, "0")],
            [(ENV_REQUEST_TIMEOUT_MS, "-1")],
        ] {
            let result = E2eConfig::from_lookup(lookup(&vars));
            assert!(
                matches!(result, Err(Error::Config(_))),
                "expected config error for {:?}",
                vars
            );
        }
    }

    #[test]
    fn test_builder() {
        let config = E2eConfig::new()
            .base_url("http://nocodb.test")
            .browser(BrowserKind::Webkit)
            .headless(false)
            .slow_mo(50.0)
            .assertion_timeout(Duration::from_millis(1500))
            .request_timeout(Duration::from_secs(3));

        assert_eq!(config.base_url, "http://nocodb.test");
        assert_eq!(config.browser, BrowserKind::Webkit);
        assert_eq!(config.assertion_timeout_ms, 1500);
        assert_eq!(config.request_timeout_ms, 3000);
        assert_eq!(config.data_api_glob(), "**/api/v1/db/data/noco/**");
    }

    #[test]
    fn test_deserialize_partial_json() {
        let config =
            E2eConfig::from_json(r#"{"baseUrl":"http://ci:3000","browser":"webkit"}"#).unwrap();
        assert_eq!(config.base_url, "http://ci:3000");
        assert_eq!(config.browser, BrowserKind::Webkit);
        assert!(config.headless);
        assert_eq!(config.request_timeout_ms, 30_000);
    }

    #[test]
    fn test_from_json_rejects_unknown_browser() {
        let err = E2eConfig::from_json(r#"{"browser":"netscape"}"#).unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }
}
