// Judge connection configuration

use std::time::Duration;

/// First sleep between polls once the optimistic poll finds the submission unfinished
pub const INITIAL_POLL_DELAY: Duration = Duration::from_millis(50);
/// Delay multiplier applied after every non-terminal poll
pub const POLL_GROWTH_FACTOR: f64 = 1.5;
/// Upper bound for a single sleep between polls
pub const MAX_POLL_DELAY: Duration = Duration::from_millis(500);
/// Total time a single submission may take before the client gives up waiting
pub const WAIT_CEILING: Duration = Duration::from_secs(30);

pub const DEFAULT_JUDGE_URL: &str = "http://127.0.0.1:2358";
pub const DEFAULT_MAX_CONCURRENCY: usize = 16;

/// Backoff used while polling a submission towards a terminal status
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BackoffConfig {
    pub initial_delay: Duration,
    pub growth_factor: f64,
    pub max_delay: Duration,
    pub ceiling: Duration,
}

impl Default for BackoffConfig {
    fn default() -> Self {
        Self {
            initial_delay: INITIAL_POLL_DELAY,
            growth_factor: POLL_GROWTH_FACTOR,
            max_delay: MAX_POLL_DELAY,
            ceiling: WAIT_CEILING,
        }
    }
}

impl BackoffConfig {
    /// Delay to use after `current`, capped at `max_delay`
    pub fn next_delay(&self, current: Duration) -> Duration {
        current.mul_f64(self.growth_factor).min(self.max_delay)
    }
}

#[derive(Debug, Clone)]
pub struct JudgeConfig {
    pub base_url: String,
    pub auth_token: Option<String>,
    pub max_concurrency: usize,
    pub use_batch_endpoint: bool,
    pub request_timeout: Duration,
    pub backoff: BackoffConfig,
}

impl Default for JudgeConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_JUDGE_URL.to_string(),
            auth_token: None,
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            use_batch_endpoint: false,
            request_timeout: Duration::from_secs(10),
            backoff: BackoffConfig::default(),
        }
    }
}

impl JudgeConfig {
    /// Read JUDGE_* environment variables, falling back to defaults
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build from a variable lookup; unset or unparsable values keep the default
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let base_url = var("JUDGE_URL")
            .filter(|url| !url.is_empty())
            .unwrap_or(defaults.base_url)
            .trim_end_matches('/')
            .to_string();

        let auth_token = var("JUDGE_AUTH_TOKEN").filter(|token| !token.is_empty());

        let max_concurrency = var("JUDGE_MAX_CONCURRENCY")
            .and_then(|v| v.parse::<usize>().ok())
            .filter(|n| *n > 0)
            .unwrap_or(defaults.max_concurrency);

        let use_batch_endpoint = var("JUDGE_USE_BATCH_ENDPOINT")
            .is_some_and(|v| v.eq_ignore_ascii_case("true"));

        let request_timeout = var("JUDGE_REQUEST_TIMEOUT_MS")
            .and_then(|v| v.parse::<u64>().ok())
            .map(Duration::from_millis)
            .unwrap_or(defaults.request_timeout);

        Self {
            base_url,
            auth_token,
            max_concurrency,
            use_batch_endpoint,
            request_timeout,
            backoff: defaults.backoff,
        }
    }
}
