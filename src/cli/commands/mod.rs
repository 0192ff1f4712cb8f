pub mod logging;

use crate::auth::{config::DEFAULT_API_BASE_URL, navigation::routes::OAUTH_LANDING};
use clap::{
    Arg, ColorChoice, Command,
    builder::styling::{AnsiColor, Effects, Styles},
};
use std::path::PathBuf;

pub const ARG_API_URL: &str = "api-url";
pub const ARG_STORE: &str = "store";
pub const ARG_TIMEOUT: &str = "timeout";
pub const ARG_USERNAME: &str = "username";
pub const ARG_PASSWORD: &str = "password";
pub const ARG_REPEAT_PASSWORD: &str = "repeat-password";
pub const ARG_URL: &str = "url";

pub const DEFAULT_STORE_PATH: &str = ".sessiongate/session.json";

fn username_arg() -> Arg {
    Arg::new(ARG_USERNAME)
        .short('u')
        .long("username")
        .help("Account username")
        .env("SESSIONGATE_USERNAME")
        .required(true)
}

fn password_arg() -> Arg {
    Arg::new(ARG_PASSWORD)
        .short('p')
        .long("password")
        .help("Account password")
        .env("SESSIONGATE_PASSWORD")
        .hide_env_values(true)
        .required(true)
}

#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    let command = Command::new("sessiongate")
        .about("Sign up, log in, and manage the chat client session")
        .version(env!("CARGO_PKG_VERSION"))
        .color(ColorChoice::Auto)
        .styles(styles)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new(ARG_API_URL)
                .long("api-url")
                .help("Identity service base URL")
                .default_value(DEFAULT_API_BASE_URL)
                .env("SESSIONGATE_API_URL")
                .global(true),
        )
        .arg(
            Arg::new(ARG_STORE)
                .long("store")
                .help("Path of the session store document")
                .default_value(DEFAULT_STORE_PATH)
                .env("SESSIONGATE_STORE")
                .global(true)
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new(ARG_TIMEOUT)
                .long("timeout")
                .help("Request timeout in seconds")
                .default_value("10")
                .env("SESSIONGATE_TIMEOUT")
                .global(true)
                .value_parser(clap::value_parser!(u64).range(1..)),
        )
        .subcommand(
            Command::new("signup")
                .about("Register a new account")
                .arg(username_arg())
                .arg(password_arg())
                .arg(
                    Arg::new(ARG_REPEAT_PASSWORD)
                        .short('r')
                        .long("repeat-password")
                        .help("Password confirmation, checked locally")
                        .required(true),
                ),
        )
        .subcommand(
            Command::new("login")
                .about("Log in with username and password")
                .arg(username_arg())
                .arg(password_arg()),
        )
        .subcommand(
            Command::new("landing")
                .about("Complete third-party login from the redirect landing URL")
                .arg(
                    Arg::new(ARG_URL)
                        .help(format!(
                            "Landing URL, e.g. http://localhost:5173{OAUTH_LANDING}?token=..."
                        ))
                        .required(true),
                ),
        )
        .subcommand(Command::new("google").about("Print the URL that starts Google login"))
        .subcommand(Command::new("logout").about("Forget the stored session"))
        .subcommand(Command::new("status").about("Show whether a session is stored"));

    logging::with_args(command)
}
