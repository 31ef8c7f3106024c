use crate::Result;
use crate::stargazers::{DEFAULT_MAX_RATE_LIMIT_WAIT, GITHUB_API_URL, MAX_PER_PAGE, RateLimitPolicy};
use camino::{Utf8Path, Utf8PathBuf};
use core::time::Duration;
use ohno::{IntoAppError, bail};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;

/// Name of the configuration file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "stars.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Base URL of the GitHub REST API
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Number of stargazers requested per page (1..=100)
    #[serde(default = "default_per_page")]
    pub per_page: u8,

    /// Pause before a page request when fewer than this many requests remain in the quota
    #[serde(default = "default_min_remaining_quota")]
    pub min_remaining_quota: u64,

    /// Longest pause, in seconds, while waiting for the rate limit to reset
    #[serde(default = "default_max_rate_limit_wait")]
    pub max_rate_limit_wait: u64,

    /// Timeout, in seconds, applied to every HTTP request
    #[serde(default = "default_request_timeout")]
    pub request_timeout: u64,
}

fn default_api_base_url() -> String {
    GITHUB_API_URL.to_string()
}

const fn default_per_page() -> u8 {
    MAX_PER_PAGE
}

const fn default_min_remaining_quota() -> u64 {
    1
}

const fn default_max_rate_limit_wait() -> u64 {
    DEFAULT_MAX_RATE_LIMIT_WAIT.as_secs()
}

const fn default_request_timeout() -> u64 {
    60
}

impl Config {
    /// Load configuration from a file or use defaults
    ///
    /// An explicit `config_path` must exist. Otherwise `stars.toml` is looked up in
    /// `base_dir` and defaults are used when it is absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or holds out-of-range values
    pub fn load(base_dir: &Utf8Path, config_path: Option<&Utf8PathBuf>) -> Result<Self> {
        let (final_path, text) = if let Some(path) = config_path {
            let text = fs::read_to_string(path).into_app_err_with(|| format!("reading configuration file '{path}'"))?;
            (path.clone(), text)
        } else {
            let path = base_dir.join(DEFAULT_CONFIG_FILE);
            match fs::read_to_string(&path) {
                Ok(text) => (path, text),
                Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
                Err(e) => return Err(e).into_app_err_with(|| format!("reading configuration file '{path}'")),
            }
        };

        let config: Self = toml::from_str(&text).into_app_err_with(|| format!("parsing configuration file '{final_path}'"))?;
        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if !(1..=MAX_PER_PAGE).contains(&self.per_page) {
            bail!("per_page must be between 1 and {MAX_PER_PAGE}, got {}", self.per_page);
        }

        if self.request_timeout == 0 {
            bail!("request_timeout must be at least one second");
        }

        if url::Url::parse(&self.api_base_url).is_err() {
            bail!("api_base_url '{}' is not a valid URL", self.api_base_url);
        }

        Ok(())
    }

    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }

    #[must_use]
    pub const fn rate_limit_policy(&self) -> RateLimitPolicy {
        RateLimitPolicy {
            min_remaining: self.min_remaining_quota,
            max_wait: Duration::from_secs(self.max_rate_limit_wait),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            per_page: default_per_page(),
            min_remaining_quota: default_min_remaining_quota(),
            max_rate_limit_wait: default_max_rate_limit_wait(),
            request_timeout: default_request_timeout(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir() -> (tempfile::TempDir, Utf8PathBuf) {
        let tmp = tempfile::tempdir().unwrap();
        let path = Utf8PathBuf::try_from(tmp.path().to_path_buf()).unwrap();
        (tmp, path)
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        config.validate().unwrap();
        assert_eq!(config.api_base_url, GITHUB_API_URL);
        assert_eq!(config.per_page, 100);
        assert_eq!(config.request_timeout(), Duration::from_secs(60));
        assert_eq!(config.rate_limit_policy(), RateLimitPolicy::default());
    }

    #[test]
    fn test_empty_toml_matches_default() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_missing_config_uses_defaults() {
        let (_tmp, dir) = temp_dir();
        assert_eq!(Config::load(&dir, None).unwrap(), Config::default());
    }

    #[test]
    fn test_load_from_base_dir() {
        let (_tmp, dir) = temp_dir();
        fs::write(dir.join(DEFAULT_CONFIG_FILE), "per_page = 30\nmax_rate_limit_wait = 120\n").unwrap();

        let config = Config::load(&dir, None).unwrap();
        assert_eq!(config.per_page, 30);
        assert_eq!(config.rate_limit_policy().max_wait, Duration::from_secs(120));
        assert_eq!(config.api_base_url, GITHUB_API_URL);
    }

    #[test]
    fn test_load_explicit_path() {
        let (_tmp, dir) = temp_dir();
        let path = dir.join("custom.toml");
        fs::write(&path, "api_base_url = \"http://127.0.0.1:8080\"\nrequest_timeout = 5\n").unwrap();

        let config = Config::load(&dir, Some(&path)).unwrap();
        assert_eq!(config.api_base_url, "http://127.0.0.1:8080");
        assert_eq!(config.request_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_load_explicit_missing_path_fails() {
        let (_tmp, dir) = temp_dir();
        let _ = Config::load(&dir, Some(&dir.join("missing.toml"))).unwrap_err();
    }

    #[test]
    fn test_unknown_field_rejected() {
        let (_tmp, dir) = temp_dir();
        fs::write(dir.join(DEFAULT_CONFIG_FILE), "per_pages = 30\n").unwrap();
        let _ = Config::load(&dir, None).unwrap_err();
    }

    #[test]
    fn test_validate_per_page_out_of_range() {
        let config = Config { per_page: 0, ..Config::default() };
        let _ = config.validate().unwrap_err();

        let config = Config { per_page: 101, ..Config::default() };
        let _ = config.validate().unwrap_err();
    }

    #[test]
    fn test_validate_zero_timeout() {
        let config = Config { request_timeout: 0, ..Config::default() };
        let _ = config.validate().unwrap_err();
    }

    #[test]
    fn test_validate_bad_url() {
        let config = Config { api_base_url: "not a url".to_string(), ..Config::default() };
        let _ = config.validate().unwrap_err();
    }
}
