// SPDX-FileCopyrightText: 2025 Stanislaw Grams <stanislawgrams@gmail.com>
//
// SPDX-License-Identifier: BSD-2-Clause

//! Operator advisory derived from the current gap.
//!
//! The hold threshold (1.2x the safe distance) is separate from the
//! threshold the speed policy uses to increase speed (1.5x). Between the
//! two the advisory reports a safe gap while the controller holds speed.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Multiple of the safe distance above which the gap is reported as safe.
pub const DEFAULT_HOLD_GAP_FACTOR: f64 = 1.2;

/// Thresholds used to pick an advisory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvisoryThresholds {
    /// Multiple of the safe distance above which the gap is reported as safe
    pub hold_gap_factor: f64,
}

impl Default for AdvisoryThresholds {
    fn default() -> Self {
        Self {
            hold_gap_factor: DEFAULT_HOLD_GAP_FACTOR,
        }
    }
}

/// Advisory shown to the driver alongside the telemetry.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Advisory {
    /// Gap below the safe distance; slow to the lead vehicle speed.
    TooClose { target_speed_kmh: f64 },
    /// Gap comfortably above the safe distance.
    HoldSpeed,
    /// Gap between the safe distance and the hold threshold.
    Caution,
}

impl Advisory {
    /// Pick the advisory for a gap. Boundaries resolve to [`Advisory::Caution`].
    pub fn evaluate(
        thresholds: &AdvisoryThresholds,
        gap_m: f64,
        safe_distance_m: f64,
        ahead_speed_kmh: f64,
    ) -> Self {
        if gap_m < safe_distance_m {
            Self::TooClose {
                target_speed_kmh: ahead_speed_kmh,
            }
        } else if gap_m > safe_distance_m * thresholds.hold_gap_factor {
            Self::HoldSpeed
        } else {
            Self::Caution
        }
    }

    /// True when the advisory asks the driver to slow down.
    pub fn is_warning(&self) -> bool {
        !matches!(self, Self::HoldSpeed)
    }
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooClose { target_speed_kmh } => {
                write!(f, "Too close! Reduce speed to {:.1} km/h", target_speed_kmh)
            }
            Self::HoldSpeed => write!(f, "Safe gap maintained — Hold speed"),
            Self::Caution => write!(f, "Caution — Maintain current speed"),
        }
    }
}
