// SPDX-FileCopyrightText: 2025 Stanislaw Grams <stanislawgrams@gmail.com>
//
// SPDX-License-Identifier: BSD-2-Clause

pub mod advisory;
pub mod controller;
pub mod snapshot;

pub type DynResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

pub use advisory::{Advisory, AdvisoryThresholds};
pub use controller::{CruiseController, GapZone, SpeedAdjustment, SpeedPolicy};
pub use snapshot::StatusSnapshot;
