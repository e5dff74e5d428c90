// SPDX-FileCopyrightText: 2025 Stanislaw Grams <stanislawgrams@gmail.com>
//
// SPDX-License-Identifier: BSD-2-Clause

use std::fmt::Write as _;

use acc_core::{Advisory, StatusSnapshot};
use acc_status_log::RECORD_SEPARATOR;

/// Console status block for one snapshot.
pub fn render_status(snapshot: &StatusSnapshot) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Current Speed: {:.1} km/h", snapshot.ego_speed_kmh);
    let _ = writeln!(out, "Car Ahead Speed: {:.1} km/h", snapshot.ahead_speed_kmh);
    let _ = writeln!(out, "Distance: {:.1} m", snapshot.gap_m);
    let _ = writeln!(out, "Safe Distance: {:.1} m", snapshot.safe_distance_m);
    let _ = writeln!(out, "{} {}", marker(&snapshot.advisory), snapshot.advisory);
    let _ = writeln!(out, "{}", RECORD_SEPARATOR);
    out
}

fn marker(advisory: &Advisory) -> &'static str {
    if advisory.is_warning() {
        "⚠"
    } else {
        "✅"
    }
}
