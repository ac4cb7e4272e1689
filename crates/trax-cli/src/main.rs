mod commands;
mod logging;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use logging::{LogConfig, LogFormat};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "trax",
    version,
    about = "Convert legacy lab reports into WaterTrax upload files"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// More log output on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Log line format
    #[arg(long, value_enum, default_value = "compact", global = true)]
    log_format: LogFormatArg,
}

#[derive(Clone, Copy, ValueEnum)]
enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a job's report and write its upload file
    Convert {
        /// Job number; the report is looked up in --reports-dir
        #[arg(required_unless_present = "input")]
        job_number: Option<String>,

        /// Convert this report (or pre-parsed JSON) instead of looking up a job
        #[arg(short, long, value_name = "FILE", conflicts_with = "job_number")]
        input: Option<PathBuf>,

        /// Directory holding the W<job>.CHM reports
        #[arg(long, default_value = ".", value_name = "DIR")]
        reports_dir: PathBuf,

        /// Root directory for upload files
        #[arg(long, default_value = "out", value_name = "DIR")]
        out_dir: PathBuf,

        /// Custom JSON profile (lookup tables and layout)
        #[arg(short, long, value_name = "FILE")]
        profile: Option<PathBuf>,

        /// Mark the upload as a replacement of an earlier one
        #[arg(long)]
        replacement: bool,

        /// Print the upload lines instead of writing the file
        #[arg(long)]
        dry_run: bool,
    },
    /// Parse a report into the intermediate model (without converting)
    Parse {
        /// Path to the report text file
        input_file: PathBuf,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Write the parsed model to a JSON file
        #[arg(short = 'O', long = "out", value_name = "FILE")]
        out: Option<PathBuf>,

        /// Custom JSON profile (lookup tables and layout)
        #[arg(short, long, value_name = "FILE")]
        profile: Option<PathBuf>,
    },
    /// Inspect and validate conversion profiles
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },
}

#[derive(Subcommand)]
enum ProfileAction {
    /// List predefined profiles
    List,
    /// Print a profile's lookup tables and layout
    Show {
        /// Custom JSON profile; defaults to the built-in one
        #[arg(short, long, value_name = "FILE")]
        profile: Option<PathBuf>,
    },
    /// Validate a custom profile file
    Validate {
        /// Path to JSON profile
        file: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    let log_config = LogConfig {
        format: match cli.log_format {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Compact => LogFormat::Compact,
            LogFormatArg::Json => LogFormat::Json,
        },
        ..LogConfig::from_verbosity(cli.verbose, cli.quiet)
    };
    if let Err(e) = logging::init_logging(&log_config) {
        eprintln!("Error: failed to initialize logging: {e}");
        std::process::exit(1);
    }

    let result = match cli.command {
        Commands::Convert {
            job_number,
            input,
            reports_dir,
            out_dir,
            profile,
            replacement,
            dry_run,
        } => commands::convert::run(commands::convert::ConvertArgs {
            job_number,
            input,
            reports_dir,
            out_dir,
            profile,
            replacement,
            dry_run,
        }),
        Commands::Parse {
            input_file,
            output,
            out,
            profile,
        } => commands::parse::run(input_file, &output, out, profile),
        Commands::Profile { action } => match action {
            ProfileAction::List => commands::profile::list(),
            ProfileAction::Show { profile } => commands::profile::show(profile.as_deref()),
            ProfileAction::Validate { file } => commands::profile::validate(&file),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
