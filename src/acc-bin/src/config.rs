// SPDX-FileCopyrightText: 2025 Stanislaw Grams <stanislawgrams@gmail.com>
//
// SPDX-License-Identifier: BSD-2-Clause

//! Configuration file support for acc.
//!
//! Config is loaded from the `[acc]` section of `acc.toml`.
//! Default search order:
//! 1. Path specified via `--config` CLI argument
//! 2. `./acc.toml`
//! 3. `~/.config/acc/acc.toml`
//! 4. `/etc/acc/acc.toml`
//!
//! CLI arguments override config file values.

use serde::{Deserialize, Serialize};

use acc_app::ConfigFile;
use acc_core::{AdvisoryThresholds, SpeedPolicy};
use acc_status_log::StatusLogConfig;

/// Top-level configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AccConfig {
    /// General settings
    pub general: GeneralConfig,
    /// Speed adjustment policy
    pub policy: SpeedPolicy,
    /// Advisory text thresholds
    pub advisory: AdvisoryThresholds,
    /// Accepted telemetry ranges for operator input
    pub input: InputLimits,
    /// Status log files
    pub log: StatusLogConfig,
}

/// General application settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log level (trace, debug, info, warn, error)
    pub log_level: Option<String>,
}

/// Ranges enforced on operator input before it reaches the controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputLimits {
    /// Highest accepted ego / ahead speed in km/h
    pub max_speed_kmh: f64,
    /// Highest accepted gap in meters
    pub max_distance_m: f64,
}

impl Default for InputLimits {
    fn default() -> Self {
        Self {
            max_speed_kmh: 120.0,
            max_distance_m: 200.0,
        }
    }
}

impl InputLimits {
    pub fn check_speed(&self, value: f64) -> Result<f64, String> {
        check_range(value, self.max_speed_kmh)
    }

    pub fn check_distance(&self, value: f64) -> Result<f64, String> {
        check_range(value, self.max_distance_m)
    }
}

fn check_range(value: f64, max: f64) -> Result<f64, String> {
    if (0.0..=max).contains(&value) {
        Ok(value)
    } else {
        Err(format!("Please enter a value between 0 and {}.", max))
    }
}

impl AccConfig {
    /// Check value ranges that serde cannot express.
    pub fn validate(&self) -> Result<(), String> {
        validate_log_level(self.general.log_level.as_deref())?;

        let policy = &self.policy;
        if !is_positive(policy.following_time_s) {
            return Err("[acc.policy].following_time_s must be > 0".to_string());
        }
        if !is_positive(policy.decrease_step_kmh) {
            return Err("[acc.policy].decrease_step_kmh must be > 0".to_string());
        }
        if !is_positive(policy.increase_step_kmh) {
            return Err("[acc.policy].increase_step_kmh must be > 0".to_string());
        }
        if !is_positive(policy.max_speed_kmh) {
            return Err("[acc.policy].max_speed_kmh must be > 0".to_string());
        }
        if !is_factor(policy.increase_gap_factor) {
            return Err("[acc.policy].increase_gap_factor must be >= 1".to_string());
        }
        if !is_factor(self.advisory.hold_gap_factor) {
            return Err("[acc.advisory].hold_gap_factor must be >= 1".to_string());
        }
        if !is_positive(self.input.max_speed_kmh) {
            return Err("[acc.input].max_speed_kmh must be > 0".to_string());
        }
        if !is_positive(self.input.max_distance_m) {
            return Err("[acc.input].max_distance_m must be > 0".to_string());
        }

        for (key, name) in [
            ("file", &self.log.file),
            ("demo_file", &self.log.demo_file),
            ("interactive_file", &self.log.interactive_file),
        ] {
            if name.trim().is_empty() {
                return Err(format!("[acc.log].{} must not be empty", key));
            }
        }

        Ok(())
    }

    /// Generate an example configuration as a TOML string.
    pub fn example_toml() -> String {
        #[derive(Serialize)]
        struct Document<'a> {
            acc: &'a AccConfig,
        }

        let example = AccConfig {
            general: GeneralConfig {
                log_level: Some("info".to_string()),
            },
            ..AccConfig::default()
        };

        toml::to_string_pretty(&Document { acc: &example }).unwrap_or_default()
    }
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

fn is_factor(value: f64) -> bool {
    value.is_finite() && value >= 1.0
}

fn validate_log_level(level: Option<&str>) -> Result<(), String> {
    if let Some(level) = level {
        match level {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(format!(
                    "[acc.general].log_level '{}' is invalid (expected one of: trace, debug, info, warn, error)",
                    level
                ))
            }
        }
    }
    Ok(())
}

impl ConfigFile for AccConfig {
    fn section_key() -> &'static str {
        "acc"
    }
}
