use clap::{Arg, ArgAction, Command, builder::ValueParser};

pub const ARG_VERBOSITY: &str = "verbosity";
pub const ARG_LOG_JSON: &str = "log-json";

pub const ENV_LOG_LEVEL: &str = "SESSIONGATE_LOG_LEVEL";

/// Level names in verbosity order; a name's index is its `-v` count.
const LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

/// Highest numeric verbosity accepted from `SESSIONGATE_LOG_LEVEL`.
const MAX_VERBOSITY: u8 = 5;

/// Accepts a level name (any case) or a count `0..=5`, so
/// `SESSIONGATE_LOG_LEVEL=debug` and `SESSIONGATE_LOG_LEVEL=3` agree with `-vvv`.
fn parse_log_level(raw: &str) -> Result<u8, String> {
    let level = raw.trim();

    let by_name = LOG_LEVELS
        .iter()
        .position(|name| name.eq_ignore_ascii_case(level))
        .and_then(|index| u8::try_from(index).ok());
    let by_count = level.parse::<u8>().ok().filter(|count| *count <= MAX_VERBOSITY);

    by_name.or(by_count).ok_or_else(|| {
        format!(
            "invalid {ENV_LOG_LEVEL} value '{raw}': expected one of {} or 0-{MAX_VERBOSITY}",
            LOG_LEVELS.join(", ")
        )
    })
}

#[must_use]
pub fn validator_log_level() -> ValueParser {
    ValueParser::from(parse_log_level)
}

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_VERBOSITY)
                .short('v')
                .long("verbose")
                .help("Verbosity level: ERROR, WARN, INFO, DEBUG, TRACE (default: ERROR)")
                .env(ENV_LOG_LEVEL)
                .global(true)
                .action(ArgAction::Count)
                .value_parser(validator_log_level()),
        )
        .arg(
            Arg::new(ARG_LOG_JSON)
                .long("log-json")
                .help("Emit logs as JSON lines on stderr")
                .env("SESSIONGATE_LOG_JSON")
                .global(true)
                .action(ArgAction::SetTrue),
        )
}
