//! Runtime configuration, read from the environment.
//!
//! | variable | default | meaning |
//! |---|---|---|
//! | `CUSTOMSNET_LOG` | `info` | tracing filter (`RUST_LOG` syntax) |
//! | `CUSTOMSNET_LOG_JSON` | `false` | emit JSON log lines |
//! | `CUSTOMSNET_DEMO_INVOICES` | `1` | invoices seeded by `SetupDemo` (1..=999) |

use thiserror::Error;
use tracing::warn;

use crate::fixture::MAX_DEMO_INVOICES;
use crate::transaction::SetupDemo;

pub const ENV_LOG: &str = "CUSTOMSNET_LOG";
pub const ENV_LOG_JSON: &str = "CUSTOMSNET_LOG_JSON";
pub const ENV_DEMO_INVOICES: &str = "CUSTOMSNET_DEMO_INVOICES";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value '{value}' for {key}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub log_filter: String,
    pub log_json: bool,
    pub demo_invoices: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            log_filter: "info".to_string(),
            log_json: false,
            demo_invoices: 1,
        }
    }
}

impl RuntimeConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; unset keys fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let log_filter = match lookup(ENV_LOG) {
            Some(filter) if !filter.trim().is_empty() => filter,
            Some(_) => {
                warn!("{ENV_LOG} is blank; using '{}'", defaults.log_filter);
                defaults.log_filter
            }
            None => defaults.log_filter,
        };

        let log_json = match lookup(ENV_LOG_JSON) {
            Some(raw) => parse_bool(ENV_LOG_JSON, &raw)?,
            None => defaults.log_json,
        };

        let demo_invoices = match lookup(ENV_DEMO_INVOICES) {
            Some(raw) => {
                let n: usize = raw.trim().parse().map_err(|e| ConfigError::Invalid {
                    key: ENV_DEMO_INVOICES,
                    value: raw.clone(),
                    reason: format!("{e}"),
                })?;
                if !(1..=MAX_DEMO_INVOICES).contains(&n) {
                    return Err(ConfigError::Invalid {
                        key: ENV_DEMO_INVOICES,
                        value: raw,
                        reason: format!("must be between 1 and {MAX_DEMO_INVOICES}"),
                    });
                }
                n
            }
            None => defaults.demo_invoices,
        };

        Ok(Self {
            log_filter,
            log_json,
            demo_invoices,
        })
    }

    pub fn setup_demo(&self) -> SetupDemo {
        SetupDemo {
            invoice_count: self.demo_invoices,
        }
    }
}

fn parse_bool(key: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid {
            key,
            value: raw.to_string(),
            reason: "expected a boolean".to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn unset_keys_use_defaults() {
        let cfg = RuntimeConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(cfg, RuntimeConfig::default());
        assert_eq!(cfg.setup_demo(), SetupDemo { invoice_count: 1 });
    }

    #[test]
    fn values_are_parsed() {
        let cfg = RuntimeConfig::from_lookup(lookup(&[
            (ENV_LOG, "customsnet_runtime=debug"),
            (ENV_LOG_JSON, "TRUE"),
            (ENV_DEMO_INVOICES, " 3 "),
        ]))
        .unwrap();

        assert_eq!(cfg.log_filter, "customsnet_runtime=debug");
        assert!(cfg.log_json);
        assert_eq!(cfg.demo_invoices, 3);
    }

    #[test]
    fn invalid_values_are_rejected() {
        let err = RuntimeConfig::from_lookup(lookup(&[(ENV_DEMO_INVOICES, "0")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: ENV_DEMO_INVOICES, .. }));

        let err = RuntimeConfig::from_lookup(lookup(&[(ENV_DEMO_INVOICES, "many")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: ENV_DEMO_INVOICES, .. }));

        let err = RuntimeConfig::from_lookup(lookup(&[(ENV_DEMO_INVOICES, "1000")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: ENV_DEMO_INVOICES, .. }));

        let huge = usize::MAX.to_string();
        let err = RuntimeConfig::from_lookup(lookup(&[(ENV_DEMO_INVOICES, huge.as_str())])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: ENV_DEMO_INVOICES, .. }));

        let err = RuntimeConfig::from_lookup(lookup(&[(ENV_LOG_JSON, "maybe")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: ENV_LOG_JSON, .. }));
    }

    #[test]
    fn blank_filter_falls_back() {
        let cfg = RuntimeConfig::from_lookup(lookup(&[(ENV_LOG, "  ")])).unwrap();
        assert_eq!(cfg.log_filter, "info");
    }
}
