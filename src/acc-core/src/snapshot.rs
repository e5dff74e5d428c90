// SPDX-FileCopyrightText: 2025 Stanislaw Grams <stanislawgrams@gmail.com>
//
// SPDX-License-Identifier: BSD-2-Clause

use serde::Serialize;

use crate::advisory::Advisory;

/// Point-in-time view of the controller used for rendering and logging.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusSnapshot {
    pub ego_speed_kmh: f64,
    pub ahead_speed_kmh: f64,
    pub gap_m: f64,
    pub safe_distance_m: f64,
    pub advisory: Advisory,
}
