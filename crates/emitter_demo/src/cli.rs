//! Command-line interface handling for the emitter demo.
//!
//! Arguments are parsed with the `clap` builder API; every option either
//! overrides a configuration value or picks which scenarios to replay.

use crate::app::Scenario;
use clap::{Arg, ArgMatches, Command};
use std::path::PathBuf;

/// Command line arguments parsed from user input.
#[derive(Debug, Clone)]
pub struct CliArgs {
    /// Path to the configuration file
    pub config_path: PathBuf,
    /// Optional override for log level
    pub log_level: Option<String>,
    /// Whether to force JSON log output
    pub json_logs: bool,
    /// Optional override for the broadcast wildcard
    pub wildcard: Option<String>,
    /// Aim wildcard once-removals at the wildcard name itself
    pub literal_once_removal: bool,
    /// Value carried by the name-changed event
    pub name: String,
    /// Scenarios to replay, in order
    pub scenarios: Vec<Scenario>,
}

/// Builds the clap command definition.
pub fn command() -> Command {
    Command::new("emitter-demo")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Replays publish/subscribe scenarios against the event registry")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Configuration file path")
                .default_value("emitter.toml"),
        )
        .arg(
            Arg::new("log-level")
                .short('l')
                .long("log-level")
                .value_name("LEVEL")
                .help("Log level (trace, debug, info, warn, error)"),
        )
        .arg(
            Arg::new("json-logs")
                .long("json-logs")
                .help("Output logs in JSON format")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("wildcard")
                .short('w')
                .long("wildcard")
                .value_name("NAME")
                .help("Reserved event name that broadcasts to every event"),
        )
        .arg(
            Arg::new("literal-once-removal")
                .long("literal-once-removal")
                .help("During a wildcard emit, remove fired once-listeners from the wildcard name instead of their own event")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("name")
                .short('n')
                .long("name")
                .value_name("VALUE")
                .help("Value sent with the name-changed event")
                .default_value("World"),
        )
        .arg(
            Arg::new("scenario")
                .short('s')
                .long("scenario")
                .value_name("SCENARIO")
                .help("Scenario to run (name-changed, multiplication, division, broadcast); repeatable, defaults to all")
                .action(clap::ArgAction::Append)
                .value_parser(clap::builder::PossibleValuesParser::new(Scenario::NAMES)),
        )
}

impl CliArgs {
    /// Parses the process arguments.
    ///
    /// Exits with a usage message when the arguments are invalid.
    pub fn parse() -> Self {
        Self::from_matches(&command().get_matches())
    }

    /// Parses an explicit argument list; the first item is the binary name.
    pub fn try_parse_from<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Ok(Self::from_matches(&command().try_get_matches_from(args)?))
    }

    fn from_matches(matches: &ArgMatches) -> Self {
        let scenarios = matches
            .get_many::<String>("scenario")
            .map(|values| values.filter_map(|v| v.parse().ok()).collect())
            .unwrap_or_else(|| Scenario::ALL.to_vec());

        Self {
            config_path: matches
                .get_one::<String>("config")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("emitter.toml")),
            log_level: matches.get_one::<String>("log-level").cloned(),
            json_logs: matches.get_flag("json-logs"),
            wildcard: matches.get_one::<String>("wildcard").cloned(),
            literal_once_removal: matches.get_flag("literal-once-removal"),
            name: matches
                .get_one::<String>("name")
                .cloned()
                .unwrap_or_else(|| "World".to_string()),
            scenarios,
        }
    }
}
