//! Process logging through `tracing-subscriber`.
//!
//! Logs go to stderr so stdout stays free for the diagnostics log and
//! command output. `TRAX_LOG`, or failing that `RUST_LOG`, overrides the
//! level chosen on the command line.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

const ENV_VAR: &str = "TRAX_LOG";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    #[default]
    Compact,
    Json,
}

#[derive(Debug, Clone)]
pub struct LogConfig {
    pub level: LevelFilter,
    pub format: LogFormat,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: LevelFilter::WARN,
            format: LogFormat::default(),
        }
    }
}

impl LogConfig {
    /// Level from `-v` count and `-q`.
    ///
    /// Diagnostics entries are printed on stdout and only reach the process
    /// log as debug events, so they show up there from `-vv` on.
    pub fn from_verbosity(verbose: u8, quiet: bool) -> Self {
        let level = if quiet {
            LevelFilter::ERROR
        } else {
            match verbose {
                0 => LevelFilter::WARN,
                1 => LevelFilter::INFO,
                2 => LevelFilter::DEBUG,
                _ => LevelFilter::TRACE,
            }
        };
        Self {
            level,
            ..Default::default()
        }
    }
}

fn build_filter(level: LevelFilter) -> EnvFilter {
    EnvFilter::try_from_env(ENV_VAR)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::default().add_directive(level.into()))
}

pub fn init_logging(config: &LogConfig) -> Result<(), String> {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(build_filter(config.level))
        .with_writer(std::io::stderr)
        .with_target(false);

    match config.format {
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Json => builder.json().try_init(),
    }
    .map_err(|e| e.to_string())
}
