//! # Emitter Demo
//!
//! Replays the classic publish/subscribe walkthrough against the
//! `event_registry` crate: a name-changed notification, a multiplication event
//! with one listener removed halfway, a division event with a once-listener,
//! and a wildcard broadcast across both arithmetic events.
//!
//! ## Quick Start
//!
//! ```bash
//! # Run every scenario with default configuration
//! emitter-demo
//!
//! # Only the broadcast scenario, with the historical once-removal behaviour
//! emitter-demo --scenario broadcast --literal-once-removal
//!
//! # Custom wildcard and JSON logs
//! emitter-demo --wildcard all --json-logs --log-level debug
//! ```
//!
//! ## Configuration
//!
//! Settings are read from a TOML file (default: `emitter.toml`), which is
//! created with defaults when missing:
//!
//! ```toml
//! [logging]
//! level = "info"
//! json_format = false
//!
//! [registry]
//! quiet_events = []
//!
//! [broadcast]
//! wildcard = "*"
//! once_removal = "per_event"
//! ```

use tracing::{error, info};

pub mod app;
pub mod cli;
pub mod config;
pub mod logging;

pub use app::{run_scenario, Application, Scenario, ScenarioReport};
pub use cli::CliArgs;
pub use config::{AppConfig, ConfigError, LoggingSettings};

/// Entry point for the emitter demo.
///
/// Parses arguments, loads configuration, initializes logging and replays
/// the requested scenarios. Exits the process with status 1 on failure once
/// logging is available.
pub fn init() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    let mut config = match AppConfig::load_from_file(&args.config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("⚠️ Falling back to default configuration: {e}");
            AppConfig::default()
        }
    };
    config.apply_cli_overrides(&args);

    if let Err(e) = logging::setup_logging(&config.logging, args.json_logs) {
        eprintln!("❌ Failed to setup logging: {e}");
        std::process::exit(1);
    }

    match Application::new(args, config) {
        Ok(app) => match app.run() {
            Ok(reports) => info!("✅ Completed {} scenario(s)", reports.len()),
            Err(e) => {
                error!("❌ Scenario failed: {e}");
                std::process::exit(1);
            }
        },
        Err(e) => {
            error!("❌ Failed to start application: {e}");
            std::process::exit(1);
        }
    }

    Ok(())
}
