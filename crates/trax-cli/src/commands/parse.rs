use std::path::PathBuf;
use trax_core::error::TraxError;
use trax_core::source::read_report;

use super::resolve_profile;
use crate::output;

pub fn run(
    input_file: PathBuf,
    output_format: &str,
    output_file: Option<PathBuf>,
    profile: Option<PathBuf>,
) -> Result<(), TraxError> {
    let profile = resolve_profile(profile.as_deref())?;
    let text = read_report(&input_file)?;
    let parsed = trax_core::parse_text(&text, &profile)?;

    match output_file {
        Some(path) => {
            // Saved files always hold the bare model so `convert --input` can read them back
            let json = serde_json::to_string_pretty(&parsed.report)?;
            std::fs::write(&path, json)?;
            eprintln!(
                "Parsed {} sample(s) for job {}, written to {}",
                parsed.report.samples.len(),
                parsed.report.job.job_number,
                path.display()
            );
            output::table::eprint_diagnostics(&parsed.diagnostics);
        }
        None => match output_format {
            "json" => output::json::print(&parsed)?,
            _ => print!("{}", output::table::format_parsed(&parsed)),
        },
    }

    Ok(())
}
