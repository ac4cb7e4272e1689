use std::path::PathBuf;
use trax_core::diagnostics::Diagnostics;
use trax_core::error::TraxError;
use trax_core::model::ParsedReport;
use trax_core::profile::schema::Purpose;
use trax_core::source::{read_report, ReportLocator};
use trax_core::Conversion;

use super::resolve_profile;

pub struct ConvertArgs {
    pub job_number: Option<String>,
    pub input: Option<PathBuf>,
    pub reports_dir: PathBuf,
    pub out_dir: PathBuf,
    pub profile: Option<PathBuf>,
    pub replacement: bool,
    pub dry_run: bool,
}

pub fn run(args: ConvertArgs) -> Result<(), TraxError> {
    let mut profile = resolve_profile(args.profile.as_deref())?;
    if args.replacement {
        profile.format.purpose = Purpose::Replacement;
    }
    tracing::debug!(profile = %profile.name, version = %profile.version, "using profile");

    let conversion = match (&args.input, &args.job_number) {
        (Some(path), _) => {
            // Pre-parsed (possibly hand-edited) model saved by `trax parse -O`
            let is_json = path
                .extension()
                .map(|ext| ext.eq_ignore_ascii_case("json"))
                .unwrap_or(false);
            if is_json {
                let json_bytes = std::fs::read(path)?;
                let report: ParsedReport = serde_json::from_slice(&json_bytes)?;
                trax_core::convert_parsed(report, &profile, Diagnostics::new())?
            } else {
                trax_core::convert_text(&read_report(path)?, &profile)?
            }
        }
        (None, Some(job_number)) if args.dry_run => {
            let text = ReportLocator::new(&args.reports_dir).read(job_number)?;
            trax_core::convert_text(&text, &profile)?
        }
        (None, Some(job_number)) => {
            let written = trax_core::convert_job(
                job_number,
                &ReportLocator::new(&args.reports_dir),
                &args.out_dir,
                &profile,
            )?;
            report_done(&written.conversion);
            println!(
                "Wrote {} record(s) to {}",
                written.conversion.upload.lines.len(),
                written.path.display()
            );
            return Ok(());
        }
        (None, None) => {
            return Err(TraxError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "a job number or --input is required",
            )));
        }
    };

    report_done(&conversion);
    if args.dry_run {
        print!("{}", conversion.upload.render());
    } else {
        let path = trax_core::output::write_upload(&args.out_dir, &conversion.upload)?;
        println!(
            "Wrote {} record(s) to {}",
            conversion.upload.lines.len(),
            path.display()
        );
    }
    Ok(())
}

fn report_done(conversion: &Conversion) {
    print!("{}", conversion.diagnostics.render());
    if conversion.upload.lines.is_empty() {
        eprintln!(
            "  warning: job {} produced no upload records",
            conversion.upload.job_number
        );
    }
}
