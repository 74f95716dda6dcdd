//! Scenario replay and application lifecycle.

use crate::cli::CliArgs;
use crate::config::AppConfig;
use event_registry::{
    BroadcastRegistry, Callback, EventError, EventRegistry, EventStats, EVENT_REGISTRY_VERSION,
};
use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, Mutex};
use tracing::info;

/// One replayable walkthrough of the registry API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scenario {
    NameChanged,
    Multiplication,
    Division,
    Broadcast,
}

impl Scenario {
    pub const ALL: [Scenario; 4] = [
        Scenario::NameChanged,
        Scenario::Multiplication,
        Scenario::Division,
        Scenario::Broadcast,
    ];

    pub const NAMES: [&'static str; 4] = ["name-changed", "multiplication", "division", "broadcast"];

    pub fn name(self) -> &'static str {
        match self {
            Scenario::NameChanged => "name-changed",
            Scenario::Multiplication => "multiplication",
            Scenario::Division => "division",
            Scenario::Broadcast => "broadcast",
        }
    }
}

impl FromStr for Scenario {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Scenario::ALL
            .into_iter()
            .find(|scenario| scenario.name() == s)
            .ok_or_else(|| format!("unknown scenario: {s}"))
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Outputs and statistics of one scenario run
#[derive(Debug, Clone)]
pub struct ScenarioReport {
    pub scenario: Scenario,
    /// Values produced by listeners, in invocation order
    pub outputs: Vec<String>,
    pub stats: EventStats,
}

type Outputs = Arc<Mutex<Vec<String>>>;

/// Listener applying `op` to the payload and recording the result
fn arithmetic(outputs: &Outputs, name: &str, op: fn(i64) -> i64) -> Callback<i64> {
    let outputs = outputs.clone();
    let label = name.to_string();
    Callback::named(name, move |n: &i64| {
        let value = op(*n);
        info!("  {} -> {}", label, value);
        outputs
            .lock()
            .map_err(|_| EventError::handler("output buffer poisoned"))?
            .push(value.to_string());
        Ok(())
    })
}

fn collected(outputs: &Outputs) -> Vec<String> {
    outputs.lock().map(|o| o.clone()).unwrap_or_default()
}

/// Payload of the name-changed event
#[derive(Debug, Clone)]
pub struct NameChanged {
    pub name: String,
}

/// Runs `scenario` on a fresh registry built from `config`.
pub fn run_scenario(
    scenario: Scenario,
    config: &AppConfig,
    name: &str,
) -> Result<ScenarioReport, EventError> {
    info!("▶️ Scenario: {}", scenario);
    let outputs = Outputs::default();

    let stats = match scenario {
        Scenario::NameChanged => {
            let emitter = EventRegistry::<NameChanged>::with_config(config.registry.clone());
            let sink = outputs.clone();
            emitter.subscribe(
                "event:name-changed",
                Callback::named("update_headline", move |data: &NameChanged| {
                    let headline = format!("New value is: {}", data.name);
                    info!("  {}", headline);
                    sink.lock()
                        .map_err(|_| EventError::handler("output buffer poisoned"))?
                        .push(headline);
                    Ok(())
                }),
            );
            emitter.emit(
                "event:name-changed",
                &NameChanged {
                    name: name.to_string(),
                },
            )?;
            emitter.stats()
        }
        Scenario::Multiplication => {
            let emitter = EventRegistry::with_config(config.registry.clone());
            let multiply_two = arithmetic(&outputs, "multiply_two", |n| n * 2);
            let multiply_three = arithmetic(&outputs, "multiply_three", |n| n * 3);

            emitter.subscribe("multiplication", multiply_two);
            emitter.subscribe("multiplication", multiply_three.clone());
            emitter.emit("multiplication", &2)?;

            emitter.unsubscribe("multiplication", &multiply_three);
            emitter.emit("multiplication", &2)?;
            emitter.stats()
        }
        Scenario::Division => {
            let emitter = EventRegistry::with_config(config.registry.clone());
            emitter.subscribe("division", arithmetic(&outputs, "divide_two", |n| n / 2));
            emitter.subscribe_once("division", arithmetic(&outputs, "divide_three", |n| n / 3));

            for _ in 0..3 {
                emitter.emit("division", &6)?;
            }
            emitter.stats()
        }
        Scenario::Broadcast => {
            let emitter =
                BroadcastRegistry::with_configs(config.registry.clone(), config.broadcast.clone());
            emitter.subscribe("multiplication", arithmetic(&outputs, "multiply_two", |n| n * 2));
            emitter.subscribe("multiplication", arithmetic(&outputs, "multiply_three", |n| n * 3));
            emitter.subscribe("division", arithmetic(&outputs, "divide_two", |n| n / 2));
            emitter.subscribe("division", arithmetic(&outputs, "divide_three", |n| n / 3));
            emitter.emit(emitter.wildcard(), &6)?;

            // Where the once-listener goes after fan-out depends on the policy.
            emitter.subscribe_once("division", arithmetic(&outputs, "divide_six", |n| n / 6));
            emitter.emit(emitter.wildcard(), &6)?;
            emitter.emit(emitter.wildcard(), &6)?;
            emitter.stats()
        }
    };

    Ok(ScenarioReport {
        scenario,
        outputs: collected(&outputs),
        stats,
    })
}

/// Demo and library versions, logged at startup
pub fn version_banner() -> String {
    format!(
        "emitter-demo v{} (event_registry v{})",
        env!("CARGO_PKG_VERSION"),
        EVENT_REGISTRY_VERSION
    )
}

/// Main application struct: validated configuration plus the scenarios to run.
pub struct Application {
    config: AppConfig,
    args: CliArgs,
}

impl Application {
    /// Validates `config` (already merged with CLI overrides) and builds the app.
    pub fn new(args: CliArgs, config: AppConfig) -> Result<Self, Box<dyn std::error::Error>> {
        if let Err(e) = config.validate() {
            return Err(format!("Configuration validation failed: {e}").into());
        }
        info!("✅ Configuration loaded and validated successfully");
        Ok(Self { config, args })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Runs every requested scenario and logs a statistics summary.
    pub fn run(&self) -> Result<Vec<ScenarioReport>, Box<dyn std::error::Error>> {
        info!("🌟 {}", version_banner());
        info!(
            "Running {} scenario(s) | wildcard: '{}' | once removal: {:?}",
            self.args.scenarios.len(),
            self.config.broadcast.wildcard,
            self.config.broadcast.once_removal
        );

        let mut reports = Vec::with_capacity(self.args.scenarios.len());
        for &scenario in &self.args.scenarios {
            let report = run_scenario(scenario, &self.config, &self.args.name)?;
            info!(
                "📊 {}: {}",
                scenario,
                serde_json::to_string(&report.stats)?
            );
            reports.push(report);
        }
        Ok(reports)
    }
}
