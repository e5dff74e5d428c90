// SPDX-FileCopyrightText: 2025 Stanislaw Grams <stanislawgrams@gmail.com>
//
// SPDX-License-Identifier: BSD-2-Clause

//! Terminal prompts for the menu and interactive mode.

use std::io::{self, Write};
use std::path::PathBuf;

use dialoguer::{Confirm, Input, Select};
use tracing::info;

use acc_core::DynResult;
use acc_status_log::StatusLog;

use crate::config::{AccConfig, InputLimits};
use crate::session::{run_demo, view_log, Session, Telemetry};

const MENU_ITEMS: &[&str] = &[
    "Run Demo Mode (Pre-configured scenarios)",
    "Interactive Mode (Enter your own values)",
    "View Log Files",
    "Exit",
];

/// Top-level menu loop.
pub fn run_menu(cfg: &AccConfig) -> DynResult<()> {
    let stdout = io::stdout();
    println!("Welcome to Adaptive Cruise Control System!");
    println!("This system implements the 2-second rule for safe following distance.");
    println!("All sessions will be automatically logged for record keeping.");
    println!();

    loop {
        let choice = Select::new()
            .with_prompt("=== Adaptive Cruise Control System ===")
            .items(MENU_ITEMS)
            .default(0)
            .interact()?;

        match choice {
            0 => {
                let session = Session::new(cfg, Some(StatusLog::new(&cfg.log.demo_file)));
                run_demo(&session, &mut stdout.lock())?;
                pause()?;
            }
            1 => run_interactive(cfg, None)?,
            2 => {
                let path = prompt_file_name("Enter log file name to view", &cfg.log.file)?;
                view_log(&mut stdout.lock(), &path)?;
                pause()?;
            }
            _ => {
                println!("\nThank you for using Adaptive Cruise Control System!");
                println!("Check the log files for a complete record of all sessions.");
                return Ok(());
            }
        }
    }
}

/// Enter telemetry by hand, one scenario per loop iteration.
pub fn run_interactive(cfg: &AccConfig, log_file: Option<PathBuf>) -> DynResult<()> {
    let log_file = match log_file {
        Some(path) => path,
        None => prompt_file_name("Enter log file name", &cfg.log.interactive_file)?,
    };
    info!("Interactive mode logging to {}", log_file.display());
    let session = Session::new(cfg, Some(StatusLog::new(&log_file)));
    let stdout = io::stdout();

    loop {
        println!("=== Adaptive Cruise Control System - Interactive Mode ===");
        println!("Logging to: {}", log_file.display());
        println!("Enter your own values to test different scenarios");
        println!();

        let telemetry = prompt_telemetry(&cfg.input)?;

        println!("\n=== Your Scenario ===");
        let mut acc = session.controller(telemetry);
        session.report(&mut stdout.lock(), &acc)?;

        if Confirm::new()
            .with_prompt("Would you like to adjust speed based on current conditions?")
            .default(true)
            .interact()?
        {
            session.adjust(&mut acc);
            println!("\nAfter speed adjustment:");
            session.report(&mut stdout.lock(), &acc)?;
        }

        if !Confirm::new()
            .with_prompt("Would you like to test another scenario?")
            .default(false)
            .interact()?
        {
            break;
        }
    }

    println!("\nAll scenarios have been logged to: {}", log_file.display());
    Ok(())
}

fn prompt_telemetry(limits: &InputLimits) -> DynResult<Telemetry> {
    let ego_speed_kmh = prompt_value(
        &format!("Enter ego vehicle speed (km/h, 0-{})", limits.max_speed_kmh),
        |v| limits.check_speed(v),
    )?;
    let ahead_speed_kmh = prompt_value(
        &format!("Enter ahead vehicle speed (km/h, 0-{})", limits.max_speed_kmh),
        |v| limits.check_speed(v),
    )?;
    let gap_m = prompt_value(
        &format!(
            "Enter distance to ahead vehicle (meters, 0-{})",
            limits.max_distance_m
        ),
        |v| limits.check_distance(v),
    )?;
    Ok(Telemetry {
        ego_speed_kmh,
        ahead_speed_kmh,
        gap_m,
    })
}

fn prompt_value<F>(prompt: &str, check: F) -> DynResult<f64>
where
    F: Fn(f64) -> Result<f64, String>,
{
    let value = Input::<f64>::new()
        .with_prompt(prompt)
        .validate_with(|v: &f64| -> Result<(), String> {
            check(*v).map(|_| ()).map_err(|e| format!("Invalid input! {e}"))
        })
        .interact_text()?;
    Ok(value)
}

fn prompt_file_name(prompt: &str, default: &str) -> DynResult<PathBuf> {
    let name = Input::<String>::new()
        .with_prompt(prompt)
        .default(default.to_string())
        .interact_text()?;
    let name = name.trim();
    Ok(PathBuf::from(if name.is_empty() { default } else { name }))
}

fn pause() -> DynResult<()> {
    print!("\nPress Enter to continue...");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(())
}
