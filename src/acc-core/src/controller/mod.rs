// SPDX-FileCopyrightText: 2025 Stanislaw Grams <stanislawgrams@gmail.com>
//
// SPDX-License-Identifier: BSD-2-Clause

//! Cruise controller components.
//!
//! This module holds the telemetry state of the ego vehicle and the
//! policy that turns a gap measurement into the next ego speed.

pub mod policy;
pub mod state;

pub use policy::{
    GapZone, SpeedAdjustment, SpeedPolicy, DEFAULT_DECREASE_STEP_KMH, DEFAULT_FOLLOWING_TIME_S,
    DEFAULT_INCREASE_GAP_FACTOR, DEFAULT_INCREASE_STEP_KMH, DEFAULT_MAX_SPEED_KMH,
};
pub use state::CruiseController;
