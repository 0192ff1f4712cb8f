use anyhow::Result;
use tracing::Level;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt, layer::SubscriberExt};

/// Installs the global subscriber. Logs go to stderr so command output on
/// stdout stays clean. `RUST_LOG` overrides the verbosity-derived default.
///
/// # Errors
/// Returns an error if a global subscriber is already set.
pub fn init(verbosity_level: Option<Level>, json: bool) -> Result<()> {
    let fmt_layer = if json {
        fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(false)
            .boxed()
    } else {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_file(true)
            .with_line_number(true)
            .with_target(false)
            .boxed()
    };

    let env_filter = EnvFilter::builder()
        .with_default_directive(verbosity_level.unwrap_or(Level::ERROR).into())
        .from_env_lossy();

    let subscriber = Registry::default().with(fmt_layer).with(env_filter);

    tracing::subscriber::set_global_default(subscriber)?;

    Ok(())
}
