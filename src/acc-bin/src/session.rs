// SPDX-FileCopyrightText: 2025 Stanislaw Grams <stanislawgrams@gmail.com>
//
// SPDX-License-Identifier: BSD-2-Clause

//! Scenario runs shared by the CLI commands.
//!
//! A [`Session`] bundles the configured policy, the advisory thresholds
//! and the status log so every command reports the controller the same
//! way: render to the console, then append to the log.

use std::io::{self, Write};
use std::path::Path;

use serde_json::json;
use tracing::{debug, info, warn};

use acc_core::{AdvisoryThresholds, CruiseController, SpeedAdjustment, SpeedPolicy, StatusSnapshot};
use acc_status_log::{read_log, StatusLog};

use crate::config::{AccConfig, InputLimits};
use crate::render::render_status;

/// Telemetry entered by the operator for one scenario.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Telemetry {
    pub ego_speed_kmh: f64,
    pub ahead_speed_kmh: f64,
    pub gap_m: f64,
}

impl Telemetry {
    /// Apply the operator input ranges.
    pub fn checked(self, limits: &InputLimits) -> Result<Self, String> {
        Ok(Self {
            ego_speed_kmh: limits
                .check_speed(self.ego_speed_kmh)
                .map_err(|e| format!("ego speed: {e}"))?,
            ahead_speed_kmh: limits
                .check_speed(self.ahead_speed_kmh)
                .map_err(|e| format!("ahead speed: {e}"))?,
            gap_m: limits
                .check_distance(self.gap_m)
                .map_err(|e| format!("distance: {e}"))?,
        })
    }
}

pub struct Session {
    policy: SpeedPolicy,
    thresholds: AdvisoryThresholds,
    log: Option<StatusLog>,
}

impl Session {
    pub fn new(cfg: &AccConfig, log: Option<StatusLog>) -> Self {
        Self {
            policy: cfg.policy.clone(),
            thresholds: cfg.advisory.clone(),
            log,
        }
    }

    pub fn log(&self) -> Option<&StatusLog> {
        self.log.as_ref()
    }

    /// Build a controller for the given telemetry using the session policy.
    pub fn controller(&self, telemetry: Telemetry) -> CruiseController {
        CruiseController::new(
            telemetry.ego_speed_kmh,
            telemetry.ahead_speed_kmh,
            telemetry.gap_m,
        )
        .with_policy(self.policy.clone())
    }

    pub fn snapshot(&self, acc: &CruiseController) -> StatusSnapshot {
        acc.snapshot(&self.thresholds)
    }

    /// Render the controller status and append it to the status log.
    ///
    /// A log that cannot be written is reported on `out` and otherwise
    /// ignored.
    pub fn report<W: Write>(&self, out: &mut W, acc: &CruiseController) -> io::Result<StatusSnapshot> {
        let snapshot = self.snapshot(acc);
        write!(out, "{}", render_status(&snapshot))?;

        if let Some(log) = &self.log {
            match log.append(&snapshot) {
                Ok(()) => writeln!(out, "Status saved to log file: {}", log.path().display())?,
                Err(e) => {
                    warn!("{}", e);
                    writeln!(out, "Error: Could not open log file for writing!")?;
                }
            }
        }
        Ok(snapshot)
    }

    /// Append to the status log without console output.
    pub fn record(&self, snapshot: &StatusSnapshot) {
        if let Some(log) = &self.log {
            if let Err(e) = log.append(snapshot) {
                warn!("{}", e);
            }
        }
    }

    /// Run one adjustment step, tracing the decision.
    pub fn adjust(&self, acc: &mut CruiseController) -> SpeedAdjustment {
        let zone = acc.zone();
        let before = acc.ego_speed();
        let adjustment = acc.adjust_speed();
        debug!(
            "adjust: zone={} ego={:.1} ahead={:.1} gap={:.1} -> {}",
            zone,
            before,
            acc.ahead_vehicle_speed(),
            acc.gap_distance(),
            adjustment
        );
        adjustment
    }
}

/// Pre-configured following scenarios.
pub fn run_demo<W: Write>(session: &Session, out: &mut W) -> io::Result<CruiseController> {
    info!("Running demo scenarios");
    writeln!(out, "=== Adaptive Cruise Control System - Demo Mode ===")?;
    writeln!(out, "Simulating vehicle following scenarios...")?;
    writeln!(out)?;

    let mut acc = session.controller(Telemetry {
        ego_speed_kmh: 60.0,
        ahead_speed_kmh: 55.0,
        gap_m: 25.0,
    });

    writeln!(out, "Scenario 1: Vehicle too close")?;
    session.report(out, &acc)?;
    session.adjust(&mut acc);
    writeln!(out, "After speed adjustment:")?;
    session.report(out, &acc)?;

    acc.update_distance(34.0);
    writeln!(out, "Scenario 2: Safe distance achieved")?;
    session.report(out, &acc)?;

    writeln!(out, "\n=== Dynamic Updates Demo ===")?;
    acc.update_ahead_vehicle_speed(70.0);
    acc.update_distance(40.0);
    writeln!(out, "Updated scenario:")?;
    session.report(out, &acc)?;
    session.adjust(&mut acc);
    writeln!(out, "After adjustment for new conditions:")?;
    session.report(out, &acc)?;

    writeln!(out, "\n=== Emergency Scenario ===")?;
    acc.update_distance(15.0);
    session.report(out, &acc)?;
    session.adjust(&mut acc);
    writeln!(out, "Emergency response:")?;
    session.report(out, &acc)?;

    writeln!(out, "\n=== System Summary ===")?;
    writeln!(out, "Final Status:")?;
    session.report(out, &acc)?;

    if let Some(log) = session.log() {
        writeln!(
            out,
            "\nDemo completed. All scenarios have been logged to: {}",
            log.path().display()
        )?;
    }
    Ok(acc)
}

/// One non-interactive scenario. Prints text, or a JSON document when `json` is set.
pub fn run_step<W: Write>(
    session: &Session,
    out: &mut W,
    telemetry: Telemetry,
    adjust: bool,
    json: bool,
) -> io::Result<CruiseController> {
    let mut acc = session.controller(telemetry);

    if json {
        let before = session.snapshot(&acc);
        session.record(&before);
        let adjustment = adjust.then(|| {
            let adjustment = session.adjust(&mut acc);
            session.record(&session.snapshot(&acc));
            adjustment
        });
        let after = session.snapshot(&acc);
        let doc = json!({
            "before": before,
            "adjustment": adjustment,
            "after": after,
        });
        writeln!(out, "{}", serde_json::to_string_pretty(&doc)?)?;
        return Ok(acc);
    }

    session.report(out, &acc)?;
    if adjust {
        let adjustment = session.adjust(&mut acc);
        writeln!(out, "\nAfter speed adjustment ({}):", adjustment)?;
        session.report(out, &acc)?;
    }
    Ok(acc)
}

/// Print a status log file with a header.
pub fn view_log<W: Write>(out: &mut W, path: &Path) -> io::Result<()> {
    writeln!(out, "=== Viewing Log File: {} ===", path.display())?;
    writeln!(out, "----------------------------------------")?;
    match read_log(path) {
        Ok(content) if !content.is_empty() => write!(out, "{}", content)?,
        Ok(_) => writeln!(out, "No log file found or file is empty.")?,
        Err(e) => {
            debug!("{}", e);
            writeln!(out, "No log file found or file is empty.")?;
        }
    }
    Ok(())
}
