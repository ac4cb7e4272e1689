pub mod diagnostics;
pub mod error;
pub mod model;
pub mod output;
pub mod parsing;
pub mod profile;
pub mod report;
pub mod source;

use diagnostics::Diagnostics;
use error::TraxError;
use model::ParsedReport;
use profile::schema::ConversionProfile;
use report::UploadReport;
use serde::{Deserialize, Serialize};
use source::ReportLocator;
use std::path::{Path, PathBuf};

/// Result of parsing one report, with everything noticed along the way.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParseOutcome {
    pub report: ParsedReport,
    pub diagnostics: Diagnostics,
}

/// A finished conversion, not yet written anywhere.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conversion {
    pub report: ParsedReport,
    pub upload: UploadReport,
    pub diagnostics: Diagnostics,
}

/// A conversion that has been written to disk.
#[derive(Debug, Clone)]
pub struct WrittenJob {
    pub path: PathBuf,
    pub conversion: Conversion,
}

/// Parse report text into the intermediate model.
pub fn parse_text(text: &str, profile: &ConversionProfile) -> Result<ParseOutcome, TraxError> {
    let mut diagnostics = Diagnostics::new();
    let report = parsing::parse_report(text, &profile.layout, &mut diagnostics)?;
    Ok(ParseOutcome {
        report,
        diagnostics,
    })
}

/// Format an already parsed (or hand-edited) intermediate model.
pub fn convert_parsed(
    report: ParsedReport,
    profile: &ConversionProfile,
    mut diagnostics: Diagnostics,
) -> Result<Conversion, TraxError> {
    let upload = report::format_report(&report, profile, &mut diagnostics)?;
    Ok(Conversion {
        report,
        upload,
        diagnostics,
    })
}

/// Main API entry point: parse report text and format it for upload.
pub fn convert_text(text: &str, profile: &ConversionProfile) -> Result<Conversion, TraxError> {
    let parsed = parse_text(text, profile)?;
    convert_parsed(parsed.report, profile, parsed.diagnostics)
}

/// Locate the report for `job_number`, convert it and write the upload
/// file under `out_root`. Nothing is written if the conversion fails.
pub fn convert_job(
    job_number: &str,
    locator: &ReportLocator,
    out_root: &Path,
    profile: &ConversionProfile,
) -> Result<WrittenJob, TraxError> {
    let text = locator.read(job_number)?;
    let conversion = convert_text(&text, profile)?;
    let path = output::write_upload(out_root, &conversion.upload)?;
    Ok(WrittenJob { path, conversion })
}
