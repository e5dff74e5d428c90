// SPDX-FileCopyrightText: 2025 Stanislaw Grams <stanislawgrams@gmail.com>
//
// SPDX-License-Identifier: BSD-2-Clause

//! Speed policy for gap keeping.
//!
//! This module provides the tunable policy that decides how the ego
//! vehicle reacts to the gap in front of it. Every constant of the
//! decision rule is a field so callers can override it without touching
//! the rule itself.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Following time used by the 2-second rule.
pub const DEFAULT_FOLLOWING_TIME_S: f64 = 2.0;
/// Speed reduction applied when too close behind a faster lead vehicle.
pub const DEFAULT_DECREASE_STEP_KMH: f64 = 5.0;
/// Speed increase applied when the gap is wide open.
pub const DEFAULT_INCREASE_STEP_KMH: f64 = 2.0;
/// Upper bound enforced by the increase branch.
pub const DEFAULT_MAX_SPEED_KMH: f64 = 120.0;
/// Multiple of the safe distance above which the ego vehicle may speed up.
pub const DEFAULT_INCREASE_GAP_FACTOR: f64 = 1.5;

const METERS_PER_KM: f64 = 1000.0;
const SECONDS_PER_HOUR: f64 = 3600.0;

/// Position of the measured gap relative to the safe distance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GapZone {
    /// Gap strictly below the safe distance.
    TooClose,
    /// Gap between the safe distance and the increase threshold, both inclusive.
    Comfort,
    /// Gap strictly above the increase threshold.
    Open,
}

impl fmt::Display for GapZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooClose => write!(f, "too-close"),
            Self::Comfort => write!(f, "comfort"),
            Self::Open => write!(f, "open"),
        }
    }
}

/// Outcome of a single adjustment step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum SpeedAdjustment {
    /// Snapped down to the speed of the slower lead vehicle.
    MatchLead { to: f64 },
    /// Reduced by the decrease step, floored at zero.
    Decrease { to: f64 },
    /// Raised by the increase step, capped at the maximum speed.
    Increase { to: f64 },
    /// Speed left unchanged.
    Hold,
}

impl SpeedAdjustment {
    /// New ego speed, or `None` when the speed is held.
    pub fn target(&self) -> Option<f64> {
        match self {
            Self::MatchLead { to } | Self::Decrease { to } | Self::Increase { to } => Some(*to),
            Self::Hold => None,
        }
    }
}

impl fmt::Display for SpeedAdjustment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MatchLead { to } => write!(f, "match lead vehicle at {:.1} km/h", to),
            Self::Decrease { to } => write!(f, "decrease to {:.1} km/h", to),
            Self::Increase { to } => write!(f, "increase to {:.1} km/h", to),
            Self::Hold => write!(f, "hold speed"),
        }
    }
}

/// Gap-keeping policy parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeedPolicy {
    /// Following time in seconds (2-second rule)
    pub following_time_s: f64,
    /// Decrease step in km/h when too close behind a faster vehicle
    pub decrease_step_kmh: f64,
    /// Increase step in km/h when the gap is open
    pub increase_step_kmh: f64,
    /// Maximum speed in km/h reachable through the increase step
    pub max_speed_kmh: f64,
    /// Multiple of the safe distance that opens the increase branch
    pub increase_gap_factor: f64,
}

impl Default for SpeedPolicy {
    fn default() -> Self {
        Self {
            following_time_s: DEFAULT_FOLLOWING_TIME_S,
            decrease_step_kmh: DEFAULT_DECREASE_STEP_KMH,
            increase_step_kmh: DEFAULT_INCREASE_STEP_KMH,
            max_speed_kmh: DEFAULT_MAX_SPEED_KMH,
            increase_gap_factor: DEFAULT_INCREASE_GAP_FACTOR,
        }
    }
}

impl SpeedPolicy {
    /// Safe following distance in meters for the given ego speed in km/h.
    ///
    /// The speed is converted to m/s and multiplied by the following time,
    /// which at 2 s reduces to `speed * 5/9`.
    pub fn safe_distance(&self, ego_speed_kmh: f64) -> f64 {
        ego_speed_kmh * (self.following_time_s * METERS_PER_KM / SECONDS_PER_HOUR)
    }

    /// Classify a gap against a safe distance.
    pub fn zone(&self, gap_m: f64, safe_distance_m: f64) -> GapZone {
        if gap_m < safe_distance_m {
            GapZone::TooClose
        } else if gap_m > safe_distance_m * self.increase_gap_factor {
            GapZone::Open
        } else {
            GapZone::Comfort
        }
    }

    /// Decide the next ego speed from the current telemetry.
    pub fn next_speed(&self, ego_speed_kmh: f64, ahead_speed_kmh: f64, gap_m: f64) -> SpeedAdjustment {
        let safe = self.safe_distance(ego_speed_kmh);
        match self.zone(gap_m, safe) {
            GapZone::TooClose => {
                if ahead_speed_kmh < ego_speed_kmh {
                    SpeedAdjustment::MatchLead {
                        to: ahead_speed_kmh,
                    }
                } else {
                    SpeedAdjustment::Decrease {
                        to: (ego_speed_kmh - self.decrease_step_kmh).max(0.0),
                    }
                }
            }
            GapZone::Open => {
                if ahead_speed_kmh > ego_speed_kmh && ego_speed_kmh < self.max_speed_kmh {
                    SpeedAdjustment::Increase {
                        to: (ego_speed_kmh + self.increase_step_kmh).min(self.max_speed_kmh),
                    }
                } else {
                    SpeedAdjustment::Hold
                }
            }
            GapZone::Comfort => SpeedAdjustment::Hold,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-6;

    #[test]
    fn test_safe_distance_two_second_rule() {
        let policy = SpeedPolicy::default();

        assert_eq!(policy.safe_distance(0.0), 0.0);
        assert!((policy.safe_distance(60.0) - 60.0 * 5.0 / 9.0).abs() < EPS);
        assert!((policy.safe_distance(120.0) - 66.666_666_7).abs() < EPS);
        // Same bits as the closed form at the default following time
        assert_eq!(policy.safe_distance(60.0), 60.0 * (5.0 / 9.0));
    }

    #[test]
    fn test_safe_distance_scales_with_following_time() {
        let policy = SpeedPolicy {
            following_time_s: 3.0,
            ..SpeedPolicy::default()
        };

        assert!((policy.safe_distance(36.0) - 30.0).abs() < EPS);
    }

    #[test]
    fn test_zone_boundaries_fall_in_comfort() {
        let policy = SpeedPolicy::default();

        assert_eq!(policy.zone(9.9, 10.0), GapZone::TooClose);
        assert_eq!(policy.zone(10.0, 10.0), GapZone::Comfort);
        assert_eq!(policy.zone(15.0, 10.0), GapZone::Comfort);
        assert_eq!(policy.zone(15.1, 10.0), GapZone::Open);
    }

    #[test]
    fn test_zero_safe_distance_opens_gap() {
        let policy = SpeedPolicy::default();

        assert_eq!(policy.zone(0.0, 0.0), GapZone::Comfort);
        assert_eq!(policy.zone(10.0, 0.0), GapZone::Open);
    }

    #[test]
    fn test_next_speed_branches() {
        let policy = SpeedPolicy::default();

        assert_eq!(
            policy.next_speed(80.0, 70.0, 20.0),
            SpeedAdjustment::MatchLead { to: 70.0 }
        );
        assert_eq!(
            policy.next_speed(90.0, 95.0, 15.0),
            SpeedAdjustment::Decrease { to: 85.0 }
        );
        assert_eq!(
            policy.next_speed(70.0, 80.0, 60.0),
            SpeedAdjustment::Increase { to: 72.0 }
        );
        assert_eq!(policy.next_speed(60.0, 65.0, 50.0), SpeedAdjustment::Hold);
        // Open gap but lead vehicle is slower
        assert_eq!(policy.next_speed(50.0, 40.0, 100.0), SpeedAdjustment::Hold);
    }

    #[test]
    fn test_decrease_floors_at_zero() {
        let policy = SpeedPolicy::default();

        // ego 3 km/h -> safe 1.67 m, gap 1 m, lead not slower
        assert_eq!(
            policy.next_speed(3.0, 10.0, 1.0),
            SpeedAdjustment::Decrease { to: 0.0 }
        );
    }

    #[test]
    fn test_increase_respects_max_speed() {
        let policy = SpeedPolicy::default();

        assert_eq!(
            policy.next_speed(119.0, 130.0, 150.0),
            SpeedAdjustment::Increase { to: 120.0 }
        );
        assert_eq!(policy.next_speed(120.0, 130.0, 150.0), SpeedAdjustment::Hold);
    }

    #[test]
    fn test_overridden_steps() {
        let policy = SpeedPolicy {
            decrease_step_kmh: 10.0,
            increase_step_kmh: 4.0,
            max_speed_kmh: 100.0,
            ..SpeedPolicy::default()
        };

        assert_eq!(
            policy.next_speed(90.0, 95.0, 15.0),
            SpeedAdjustment::Decrease { to: 80.0 }
        );
        assert_eq!(
            policy.next_speed(98.0, 110.0, 150.0),
            SpeedAdjustment::Increase { to: 100.0 }
        );
    }

    #[test]
    fn test_adjustment_target() {
        assert_eq!(SpeedAdjustment::Hold.target(), None);
        assert_eq!(SpeedAdjustment::Increase { to: 2.0 }.target(), Some(2.0));
    }
}
