// SPDX-FileCopyrightText: 2025 Stanislaw Grams <stanislawgrams@gmail.com>
//
// SPDX-License-Identifier: BSD-2-Clause

use crate::advisory::{Advisory, AdvisoryThresholds};
use crate::controller::policy::{GapZone, SpeedAdjustment, SpeedPolicy};
use crate::snapshot::StatusSnapshot;

/// Telemetry held by the cruise controller for one ego vehicle.
///
/// Speeds are in km/h, the gap in meters. The ego speed given at
/// construction is taken as-is; the maximum speed only applies once
/// [`CruiseController::adjust_speed`] runs its increase branch.
#[derive(Debug, Clone, Default)]
pub struct CruiseController {
    ego_speed: f64,
    ahead_vehicle_speed: f64,
    gap_distance: f64,
    policy: SpeedPolicy,
}

impl CruiseController {
    /// Create a controller with the default policy.
    pub fn new(ego_speed: f64, ahead_vehicle_speed: f64, gap_distance: f64) -> Self {
        Self {
            ego_speed,
            ahead_vehicle_speed,
            gap_distance,
            policy: SpeedPolicy::default(),
        }
    }

    /// Replace the policy used by subsequent adjustment steps.
    pub fn with_policy(mut self, policy: SpeedPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Set the speed of the vehicle ahead. Negative (and NaN) values are ignored.
    pub fn update_ahead_vehicle_speed(&mut self, speed: f64) {
        if speed >= 0.0 {
            self.ahead_vehicle_speed = speed;
        }
    }

    /// Set the gap to the vehicle ahead. Negative (and NaN) values are ignored.
    pub fn update_distance(&mut self, distance: f64) {
        if distance >= 0.0 {
            self.gap_distance = distance;
        }
    }

    /// Safe following distance in meters for the current ego speed.
    pub fn safe_distance(&self) -> f64 {
        self.policy.safe_distance(self.ego_speed)
    }

    /// Where the current gap sits relative to the safe distance.
    pub fn zone(&self) -> GapZone {
        self.policy.zone(self.gap_distance, self.safe_distance())
    }

    /// Run one adjustment step and apply it to the ego speed.
    pub fn adjust_speed(&mut self) -> SpeedAdjustment {
        let adjustment =
            self.policy
                .next_speed(self.ego_speed, self.ahead_vehicle_speed, self.gap_distance);
        if let Some(speed) = adjustment.target() {
            self.ego_speed = speed;
        }
        adjustment
    }

    /// Capture the current telemetry together with the advisory for it.
    pub fn snapshot(&self, thresholds: &AdvisoryThresholds) -> StatusSnapshot {
        let safe_distance = self.safe_distance();
        StatusSnapshot {
            ego_speed_kmh: self.ego_speed,
            ahead_speed_kmh: self.ahead_vehicle_speed,
            gap_m: self.gap_distance,
            safe_distance_m: safe_distance,
            advisory: Advisory::evaluate(
                thresholds,
                self.gap_distance,
                safe_distance,
                self.ahead_vehicle_speed,
            ),
        }
    }

    pub fn ego_speed(&self) -> f64 {
        self.ego_speed
    }

    pub fn ahead_vehicle_speed(&self) -> f64 {
        self.ahead_vehicle_speed
    }

    pub fn gap_distance(&self) -> f64 {
        self.gap_distance
    }

    pub fn policy(&self) -> &SpeedPolicy {
        &self.policy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-6;

    #[test]
    fn test_default_is_all_zero() {
        let acc = CruiseController::default();
        assert_eq!(acc.ego_speed(), 0.0);
        assert_eq!(acc.ahead_vehicle_speed(), 0.0);
        assert_eq!(acc.gap_distance(), 0.0);
        assert_eq!(acc.safe_distance(), 0.0);
        assert_eq!(acc.policy(), &SpeedPolicy::default());
    }

    #[test]
    fn test_updates_accept_non_negative() {
        let mut acc = CruiseController::default();
        acc.update_ahead_vehicle_speed(60.0);
        acc.update_distance(25.0);
        assert_eq!(acc.ahead_vehicle_speed(), 60.0);
        assert_eq!(acc.gap_distance(), 25.0);

        acc.update_ahead_vehicle_speed(0.0);
        acc.update_distance(0.0);
        assert_eq!(acc.ahead_vehicle_speed(), 0.0);
        assert_eq!(acc.gap_distance(), 0.0);
    }

    #[test]
    fn test_updates_reject_negative() {
        let mut acc = CruiseController::new(50.0, 60.0, 30.0);
        acc.update_ahead_vehicle_speed(-10.0);
        acc.update_distance(-5.0);
        acc.update_ahead_vehicle_speed(f64::NAN);
        acc.update_distance(f64::NAN);
        assert_eq!(acc.ahead_vehicle_speed(), 60.0);
        assert_eq!(acc.gap_distance(), 30.0);
    }

    #[test]
    fn test_safe_distance_tracks_ego_speed() {
        assert!((CruiseController::new(60.0, 0.0, 0.0).safe_distance() - 33.333_333).abs() < EPS);
        assert!((CruiseController::new(120.0, 0.0, 0.0).safe_distance() - 66.666_667).abs() < EPS);
        assert!((CruiseController::new(30.0, 0.0, 0.0).safe_distance() - 30.0 * 5.0 / 9.0).abs() < EPS);
    }

    #[test]
    fn test_too_close_matches_slower_lead() {
        let mut acc = CruiseController::new(80.0, 70.0, 20.0);
        assert_eq!(acc.zone(), GapZone::TooClose);
        assert_eq!(acc.adjust_speed(), SpeedAdjustment::MatchLead { to: 70.0 });
        assert_eq!(acc.ego_speed(), 70.0);
    }

    #[test]
    fn test_too_close_behind_slower_lead_snaps_exactly() {
        let mut acc = CruiseController::new(90.0, 85.0, 15.0);
        acc.adjust_speed();
        assert_eq!(acc.ego_speed(), 85.0);
    }

    #[test]
    fn test_too_close_behind_faster_lead_decreases() {
        let mut acc = CruiseController::new(90.0, 95.0, 15.0);
        assert_eq!(acc.adjust_speed(), SpeedAdjustment::Decrease { to: 85.0 });
        assert_eq!(acc.ego_speed(), 85.0);
    }

    #[test]
    fn test_comfort_boundary_holds() {
        // 1.5 * safe distance is exactly 50 m
        let mut acc = CruiseController::new(60.0, 65.0, 50.0);
        assert_eq!(acc.zone(), GapZone::Comfort);
        assert_eq!(acc.adjust_speed(), SpeedAdjustment::Hold);
        assert_eq!(acc.ego_speed(), 60.0);
    }

    #[test]
    fn test_safe_distance_boundary_holds() {
        let mut acc = CruiseController::new(36.0, 40.0, 0.0);
        acc.update_distance(acc.safe_distance());
        assert_eq!(acc.zone(), GapZone::Comfort);
        acc.adjust_speed();
        assert_eq!(acc.ego_speed(), 36.0);
    }

    #[test]
    fn test_open_gap_increases() {
        let mut acc = CruiseController::new(70.0, 80.0, 60.0);
        acc.adjust_speed();
        assert_eq!(acc.ego_speed(), 72.0);
    }

    #[test]
    fn test_increase_capped_at_max() {
        let mut acc = CruiseController::new(118.0, 125.0, 120.0);
        assert_eq!(acc.zone(), GapZone::Open);
        acc.adjust_speed();
        assert_eq!(acc.ego_speed(), 120.0);
        acc.adjust_speed();
        assert_eq!(acc.ego_speed(), 120.0);
    }

    #[test]
    fn test_zero_speed_takes_increase_branch() {
        let mut acc = CruiseController::new(0.0, 50.0, 10.0);
        assert_eq!(acc.safe_distance(), 0.0);
        assert_eq!(acc.zone(), GapZone::Open);
        acc.adjust_speed();
        assert_eq!(acc.ego_speed(), 2.0);
    }

    #[test]
    fn test_comfort_zone_is_idempotent() {
        let mut acc = CruiseController::new(60.0, 65.0, 40.0);
        for _ in 0..10 {
            assert_eq!(acc.adjust_speed(), SpeedAdjustment::Hold);
        }
        assert_eq!(acc.ego_speed(), 60.0);
    }

    #[test]
    fn test_unclamped_initial_speed_persists_until_adjusted() {
        let mut acc = CruiseController::new(200.0, 180.0, 100.0);
        assert_eq!(acc.ego_speed(), 200.0);
        assert!(acc.safe_distance() > 0.0);

        acc.adjust_speed();
        assert_eq!(acc.ego_speed(), 180.0);
    }

    #[test]
    fn test_repeated_adjustments_converge_on_lead() {
        let mut acc = CruiseController::new(80.0, 70.0, 25.0);
        acc.adjust_speed();
        assert_eq!(acc.ego_speed(), 70.0);

        // safe 38.9 m, gap 25 m, lead no longer slower
        acc.adjust_speed();
        assert_eq!(acc.ego_speed(), 65.0);
    }

    #[test]
    fn test_custom_policy_is_used() {
        let policy = SpeedPolicy {
            decrease_step_kmh: 10.0,
            ..SpeedPolicy::default()
        };
        let mut acc = CruiseController::new(90.0, 95.0, 15.0).with_policy(policy);
        acc.adjust_speed();
        assert_eq!(acc.ego_speed(), 80.0);
    }

    #[test]
    fn test_snapshot_carries_telemetry() {
        let acc = CruiseController::new(80.0, 70.0, 20.0);
        let snap = acc.snapshot(&AdvisoryThresholds::default());
        assert_eq!(snap.ego_speed_kmh, 80.0);
        assert_eq!(snap.ahead_speed_kmh, 70.0);
        assert_eq!(snap.gap_m, 20.0);
        assert!((snap.safe_distance_m - 44.444_444).abs() < EPS);
        assert_eq!(
            snap.advisory,
            Advisory::TooClose {
                target_speed_kmh: 70.0
            }
        );
    }
}
