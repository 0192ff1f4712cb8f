use crate::cli::{
    actions::Action,
    commands::{
        ARG_API_URL, ARG_PASSWORD, ARG_REPEAT_PASSWORD, ARG_STORE, ARG_TIMEOUT, ARG_URL,
        ARG_USERNAME,
    },
    globals::GlobalArgs,
};
use anyhow::{Result, anyhow};
use clap::ArgMatches;
use secrecy::SecretString;
use std::{path::PathBuf, time::Duration};

/// Builds the action for the selected subcommand.
///
/// # Errors
/// Returns an error if no subcommand was given or a required argument is missing.
pub fn handler(matches: &ArgMatches) -> Result<Action> {
    match matches.subcommand() {
        Some(("signup", sub_m)) => Ok(Action::Signup {
            username: required(sub_m, ARG_USERNAME)?,
            password: SecretString::from(required(sub_m, ARG_PASSWORD)?),
            repeat_password: SecretString::from(required(sub_m, ARG_REPEAT_PASSWORD)?),
        }),
        Some(("login", sub_m)) => Ok(Action::Login {
            username: required(sub_m, ARG_USERNAME)?,
            password: SecretString::from(required(sub_m, ARG_PASSWORD)?),
        }),
        Some(("landing", sub_m)) => Ok(Action::Landing {
            url: required(sub_m, ARG_URL)?,
        }),
        Some(("google", _)) => Ok(Action::OAuth),
        Some(("logout", _)) => Ok(Action::Logout),
        Some(("status", _)) => Ok(Action::Status),
        Some((name, _)) => Err(anyhow!("unknown command: {name}")),
        None => Err(anyhow!("missing command")),
    }
}

/// Collects the global arguments.
///
/// # Errors
/// Returns an error if the API URL is missing.
pub fn globals(matches: &ArgMatches) -> Result<GlobalArgs> {
    let api_url = required(matches, ARG_API_URL)?;
    let store_path = matches
        .get_one::<PathBuf>(ARG_STORE)
        .cloned()
        .ok_or_else(|| anyhow!("missing required argument: --{ARG_STORE}"))?;

    let mut globals = GlobalArgs::new(api_url, store_path);
    if let Some(seconds) = matches.get_one::<u64>(ARG_TIMEOUT) {
        globals.set_timeout(Duration::from_secs(*seconds));
    }

    Ok(globals)
}

fn required(matches: &ArgMatches, name: &str) -> Result<String> {
    matches
        .get_one::<String>(name)
        .cloned()
        .ok_or_else(|| anyhow!("missing required argument: --{name}"))
}
