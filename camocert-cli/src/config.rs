use std::env;

use camocert_core::cert::{GeneratorConfig, KeyAlgorithm};
use camocert_core::constants::MAX_BACKDATE_PERIODS;

/// CLI configuration loaded from environment variables, then overridden by flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Key algorithm for generated credentials.
    pub key_algorithm: KeyAlgorithm,
    /// Upper bound of the backdating draw, in ~30-day periods.
    pub max_backdate_periods: u32,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// - `CAMOCERT_KEY` (optional, default `rsa`): `rsa`, `rsa-<bits>` or `p256`.
    /// - `CAMOCERT_MAX_BACKDATE_PERIODS` (optional, default 12).
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let key_algorithm = lookup("CAMOCERT_KEY")
            .and_then(|s| match s.parse::<KeyAlgorithm>() {
                Ok(alg) => Some(alg),
                Err(e) => {
                    tracing::warn!(error = %e, "ignoring CAMOCERT_KEY");
                    None
                }
            })
            .unwrap_or_default();

        let max_backdate_periods = lookup("CAMOCERT_MAX_BACKDATE_PERIODS")
            .and_then(|s| match s.parse::<u32>() {
                Ok(periods) => Some(periods),
                Err(e) => {
                    tracing::warn!(error = %e, value = %s, "ignoring CAMOCERT_MAX_BACKDATE_PERIODS");
                    None
                }
            })
            .unwrap_or(MAX_BACKDATE_PERIODS);

        Self {
            key_algorithm,
            max_backdate_periods,
        }
    }

    pub fn with_overrides(mut self, key: Option<KeyAlgorithm>, max_backdate_periods: Option<u32>) -> Self {
        if let Some(key) = key {
            self.key_algorithm = key;
        }
        if let Some(periods) = max_backdate_periods {
            self.max_backdate_periods = periods;
        }
        self
    }

    pub fn generator_config(&self) -> GeneratorConfig {
        let mut config = GeneratorConfig {
            key_algorithm: self.key_algorithm,
            ..GeneratorConfig::default()
        };
        config.validity.backdate.max_periods = self.max_backdate_periods;
        config
    }
}
