use clap::{Arg, ArgMatches};
use tracing::Level;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

pub fn add_args<'a>(app: clap::App<'a, 'a>) -> clap::App<'a, 'a> {
    app.arg(
        Arg::with_name("log_level")
            .long("log-level")
            .env("LOG_LEVEL")
            .value_name("LOG_LEVEL")
            .help("Log level")
            .default_value("INFO")
            .case_insensitive(true)
            .possible_values(&LOG_LEVELS)
            .global(true)
            .takes_value(true),
    )
}

pub fn parse_level(s: &str) -> Option<Level> {
    match &s.to_lowercase()[..] {
        "trace" => Some(Level::TRACE),
        "debug" => Some(Level::DEBUG),
        "info" => Some(Level::INFO),
        "warn" => Some(Level::WARN),
        "error" => Some(Level::ERROR),
        _ => None,
    }
}

/// Installs the global subscriber. Logs go to stderr, stdout is left to the console.
pub fn handle(matches: &ArgMatches) -> Result<(), tracing::subscriber::SetGlobalDefaultError> {
    let log_level = matches
        .value_of("log_level")
        .and_then(parse_level)
        .unwrap_or(Level::INFO);

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
}
