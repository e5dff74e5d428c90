// SPDX-FileCopyrightText: 2025 Stanislaw Grams <stanislawgrams@gmail.com>
//
// SPDX-License-Identifier: BSD-2-Clause

use std::io;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::info;

mod config;
mod interactive;
mod render;
mod session;

use crate::config::AccConfig;
use crate::session::{run_demo, run_step, view_log, Session, Telemetry};
use acc_app::{init_logging, ConfigError, ConfigFile};
use acc_core::DynResult;
use acc_status_log::StatusLog;

const PKG_DESCRIPTION: &str = concat!(env!("CARGO_PKG_NAME"), " - ", env!("CARGO_PKG_DESCRIPTION"));

#[derive(Debug, Parser)]
#[command(
    author = env!("CARGO_PKG_AUTHORS"),
    version = env!("CARGO_PKG_VERSION"),
    about = PKG_DESCRIPTION,
)]
struct Cli {
    /// Path to configuration file
    #[arg(long = "config", short = 'C', value_name = "FILE", global = true)]
    config: Option<PathBuf>,
    /// Print example configuration and exit
    #[arg(long = "print-config")]
    print_config: bool,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Interactive menu (default)
    Menu,
    /// Run the pre-configured following scenarios
    Demo {
        /// Status log file
        #[arg(short = 'l', long = "log", value_name = "FILE")]
        log: Option<PathBuf>,
    },
    /// Enter telemetry by hand
    Interactive {
        /// Status log file (prompted for when omitted)
        #[arg(short = 'l', long = "log", value_name = "FILE")]
        log: Option<PathBuf>,
    },
    /// Print a status log file
    View {
        /// Log file to show
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,
    },
    /// Evaluate one scenario without prompting
    Step {
        /// Ego vehicle speed in km/h
        #[arg(long = "ego")]
        ego: f64,
        /// Ahead vehicle speed in km/h
        #[arg(long = "ahead")]
        ahead: f64,
        /// Gap to the ahead vehicle in meters
        #[arg(long = "distance")]
        distance: f64,
        /// Run one speed adjustment step
        #[arg(long = "adjust")]
        adjust: bool,
        /// Status log file
        #[arg(short = 'l', long = "log", value_name = "FILE", conflicts_with = "no_log")]
        log: Option<PathBuf>,
        /// Do not append to the status log
        #[arg(long = "no-log")]
        no_log: bool,
        /// Print snapshots as JSON
        #[arg(long = "json")]
        json: bool,
    },
}

fn main() -> DynResult<()> {
    let cli = Cli::parse();

    if cli.print_config {
        println!("{}", AccConfig::example_toml());
        return Ok(());
    }

    let (cfg, config_path) = if let Some(ref path) = cli.config {
        let cfg = AccConfig::load_from_file(path)?;
        (cfg, Some(path.clone()))
    } else {
        AccConfig::load_from_default_paths()?
    };
    cfg.validate().map_err(ConfigError::Invalid)?;

    init_logging(cfg.general.log_level.as_deref());

    if let Some(ref path) = config_path {
        info!("Loaded configuration from {}", path.display());
    }

    match cli.command.unwrap_or(Command::Menu) {
        Command::Menu => interactive::run_menu(&cfg),
        Command::Demo { log } => {
            let log = StatusLog::new(log.unwrap_or_else(|| PathBuf::from(&cfg.log.demo_file)));
            let session = Session::new(&cfg, Some(log));
            run_demo(&session, &mut io::stdout().lock())?;
            Ok(())
        }
        Command::Interactive { log } => interactive::run_interactive(&cfg, log),
        Command::View { file } => {
            let file = file.unwrap_or_else(|| PathBuf::from(&cfg.log.file));
            view_log(&mut io::stdout().lock(), &file)?;
            Ok(())
        }
        Command::Step {
            ego,
            ahead,
            distance,
            adjust,
            log,
            no_log,
            json,
        } => {
            let telemetry = Telemetry {
                ego_speed_kmh: ego,
                ahead_speed_kmh: ahead,
                gap_m: distance,
            }
            .checked(&cfg.input)?;
            let log = (!no_log)
                .then(|| StatusLog::new(log.unwrap_or_else(|| PathBuf::from(&cfg.log.file))));
            let session = Session::new(&cfg, log);
            run_step(&session, &mut io::stdout().lock(), telemetry, adjust, json)?;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_step() {
        let cli = Cli::try_parse_from([
            "acc", "step", "--ego", "80", "--ahead", "70", "--distance", "20", "--adjust",
        ])
        .unwrap();
        match cli.command {
            Some(Command::Step {
                ego,
                ahead,
                distance,
                adjust,
                no_log,
                ..
            }) => {
                assert_eq!((ego, ahead, distance), (80.0, 70.0, 20.0));
                assert!(adjust);
                assert!(!no_log);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_default_command_is_menu() {
        let cli = Cli::try_parse_from(["acc"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.print_config);
    }

    #[test]
    fn test_log_conflicts_with_no_log() {
        assert!(Cli::try_parse_from([
            "acc", "step", "--ego", "1", "--ahead", "1", "--distance", "1", "--log", "x.txt",
            "--no-log",
        ])
        .is_err());
    }
}
