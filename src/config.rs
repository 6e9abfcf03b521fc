//! Companion configuration (code defaults, env overrides).

use std::time::Duration;

use bon::Builder;

const DEFAULT_RETRY_INTERVAL: Duration = Duration::from_secs(5);
const DEFAULT_NOTIFICATION_TTL: Duration = Duration::from_secs(2);

/// Timing knobs for the companion core.
///
/// # Example
/// ```
/// use std::time::Duration;
/// use tagtrail::config::CompanionConfig;
///
/// let config = CompanionConfig::builder()
///     .retry_interval(Duration::from_secs(10))
///     .build();
/// assert_eq!(config.notification_ttl, Duration::from_secs(2));
/// ```
#[derive(Debug, Clone, Builder)]
pub struct CompanionConfig {
    /// Delay between silent re-acquisition attempts.
    #[builder(default = DEFAULT_RETRY_INTERVAL)]
    pub retry_interval: Duration,
    /// How long a transient notification stays visible.
    #[builder(default = DEFAULT_NOTIFICATION_TTL)]
    pub notification_ttl: Duration,
}

impl Default for CompanionConfig {
    fn default() -> Self {
        Self {
            retry_interval: DEFAULT_RETRY_INTERVAL,
            notification_ttl: DEFAULT_NOTIFICATION_TTL,
        }
    }
}

impl CompanionConfig {
    /// Defaults, then `TAGTRAIL_RETRY_INTERVAL_MS` and
    /// `TAGTRAIL_NOTIFICATION_TTL_MS` overrides from the environment.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv(); // load .env if present, ignore error
        let mut config = Self::default();
        if let Some(interval) = env_millis("TAGTRAIL_RETRY_INTERVAL_MS") {
            config.retry_interval = interval;
        }
        if let Some(ttl) = env_millis("TAGTRAIL_NOTIFICATION_TTL_MS") {
            config.notification_ttl = ttl;
        }
        config
    }
}

fn env_millis(var: &str) -> Option<Duration> {
    std::env::var(var)
        .ok()?
        .trim()
        .parse::<u64>()
        .ok()
        .map(Duration::from_millis)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_timings() {
        let config = CompanionConfig::default();
        assert_eq!(config.retry_interval, Duration::from_secs(5));
        assert_eq!(config.notification_ttl, Duration::from_secs(2));
    }

    #[test]
    fn builder_overrides_only_named_fields() {
        let config = CompanionConfig::builder()
            .notification_ttl(Duration::from_millis(500))
            .build();
        assert_eq!(config.retry_interval, Duration::from_secs(5));
        assert_eq!(config.notification_ttl, Duration::from_millis(500));
    }
}
