pub mod assemble;
pub mod backup;
pub mod horizontal;
pub mod locator;
pub mod tokens;
pub mod vertical;

use crate::diagnostics::Diagnostics;
use crate::error::TraxError;
use crate::model::{ParsedReport, SampleStore};
use crate::profile::schema::LayoutDef;
use assemble::{merge_vertical, PendingTriplets};
use tokens::{parse_job_header, tokenize, TokenLine};

/// Why a table (or backup entry) did not match the shape it must have.
///
/// Line numbers are 1-based, as an operator would count them in the report.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TableShape {
    #[error("no header row above line {line}")]
    MissingHeader { line: usize },

    #[error("line {line}: {found} unit token(s) for {expected} analyte(s) that need one")]
    UnitCount {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("line {line}: {found} token(s), at least {needed} needed")]
    ShortRow {
        line: usize,
        found: usize,
        needed: usize,
    },

    #[error("no sample id row above line {line}")]
    MissingSampleIds { line: usize },
}

/// Parse report text into the intermediate model.
///
/// Only a missing or unreadable job header is fatal. Tables that do not
/// have the expected shape are skipped and reported in `diagnostics`.
pub fn parse_report(
    text: &str,
    layout: &LayoutDef,
    diagnostics: &mut Diagnostics,
) -> Result<ParsedReport, TraxError> {
    let lines = tokenize(text);
    let job = parse_job_header(&lines)?;
    tracing::debug!(job = %job.job_number, client = %job.client_identifier, "parsed job header");

    let anchors = locator::locate(&lines, layout, diagnostics);

    let mut samples = SampleStore::new();
    for &anchor in &anchors.horizontal {
        read_horizontal(&lines, anchor, &mut samples, diagnostics);
    }
    for &anchor in &anchors.backup {
        read_backup(&lines, anchor, &mut samples, diagnostics);
    }

    let mut pending = PendingTriplets::default();
    for &anchor in &anchors.vertical {
        match vertical::extract(&lines, anchor, layout) {
            Ok(table) => {
                tracing::debug!(
                    line = anchor + 1,
                    rows = table.rows_read,
                    triplets = table.triplet_count(),
                    samples = table.sample_ids.len(),
                    "read ICP table"
                );
                for (id, triplets) in table.into_columns() {
                    pending.add(id, triplets);
                }
            }
            Err(shape) => diagnostics.important(format!(
                "ICP table at line {} has issues and was skipped: {}. \
                 Check the sample id row above it and the limit annotations at the end of each row",
                anchor + 1,
                shape
            )),
        }
    }
    if !anchors.vertical.is_empty() && pending.is_empty() {
        diagnostics.important(format!(
            "{} ICP table(s) found but no ICP results were extracted. Likely causes: the ICP \
             header text changed, or the sample id row above '{}' is missing",
            anchors.vertical.len(),
            layout.vertical_marker
        ));
    }
    merge_vertical(&mut samples, pending, diagnostics);

    diagnostics.info(format!("{} samples resolved", samples.len()));
    Ok(ParsedReport { job, samples })
}

fn read_horizontal(
    lines: &[TokenLine],
    anchor: usize,
    samples: &mut SampleStore,
    diagnostics: &mut Diagnostics,
) {
    match horizontal::extract(lines, anchor) {
        Ok(table) => {
            tracing::debug!(
                line = anchor + 1,
                analytes = table.analytes.len(),
                rows = table.rows.len(),
                "read horizontal table"
            );
            for row in table.rows {
                samples.upsert(row.meta).triplets.extend(row.triplets);
            }
        }
        Err(shape) => diagnostics.important(format!(
            "table at line {} has issues and was skipped: {}; \
             possible unescaped space in an analyte name, check the header row above it",
            anchor + 1,
            shape
        )),
    }
}

fn read_backup(
    lines: &[TokenLine],
    anchor: usize,
    samples: &mut SampleStore,
    diagnostics: &mut Diagnostics,
) {
    let mut added = 0;
    for entry in backup::extract(lines, anchor) {
        match entry {
            Ok(meta) if samples.contains(&meta.name) => {}
            Ok(meta) => {
                samples.upsert(meta);
                added += 1;
            }
            Err(shape) => diagnostics.important(format!(
                "sample header entry skipped: {}. Each entry needs a name, a date and a time",
                shape
            )),
        }
    }
    if added > 0 {
        diagnostics.info(format!(
            "{} sample(s) taken from the header block at line {}",
            added,
            anchor + 1
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::Severity;

    #[test]
    fn test_misaligned_table_is_skipped_others_kept() {
        let text = "\
BC Ferries 2101234

Hardness (mg/L CaCO3)
SAMPLE DATE TIME (mg/L)
----
1 Well A1234 02Jan21 13:30p 120

TSS
SAMPLE DATE TIME (mg/L)
----
1 Well A1234 02Jan21 13:30p 12
";
        let mut log = Diagnostics::new();
        let report = parse_report(text, &LayoutDef::default(), &mut log).unwrap();
        assert_eq!(report.samples.len(), 1);
        assert_eq!(report.samples.get("1 Well").unwrap().triplets.len(), 1);
        assert_eq!(log.count(Severity::Important), 1);
        assert!(log.mentions("unescaped space in an analyte name"));
    }

    #[test]
    fn test_backup_block_does_not_override_table_metadata() {
        let text = "\
BC Ferries 2101234
TSS
SAMPLE DATE TIME (mg/L)
----
1 Well A1234 02Jan21 13:30p 12

SAMPLES
(1) Well Z9999 09Sep21 08:00a
(2) Tap 03Jan21 09:10a
";
        let mut log = Diagnostics::new();
        let report = parse_report(text, &LayoutDef::default(), &mut log).unwrap();
        assert_eq!(report.samples.len(), 2);
        assert_eq!(report.samples.get("1 Well").unwrap().location_code, "A1234");
        assert!(report.samples.get("2 Tap").unwrap().triplets.is_empty());
    }

    #[test]
    fn test_location_only_row_keeps_rest_of_table() {
        let text = "\
BC Ferries 2101234
TSS
SAMPLE DATE TIME (mg/L)
----
1 Well A1234 02Jan21 13:30p 12
21001 03Jan21 09:10a 7
";
        let mut log = Diagnostics::new();
        let report = parse_report(text, &LayoutDef::default(), &mut log).unwrap();
        assert_eq!(report.samples.len(), 2);
        assert_eq!(report.samples.get("1 Well").unwrap().triplets.len(), 1);
        assert_eq!(report.samples.get("").unwrap().location_code, "21001");
        assert_eq!(log.count(Severity::Important), 0);
    }

    #[test]
    fn test_icp_without_results_is_reported() {
        let text = "\
BC Ferries 2101234
SAMPLES
(1) Well A1234 02Jan21 13:30p

Maximum Limits Permissable
ELEMENTS x In Drinking Water
";
        let mut log = Diagnostics::new();
        parse_report(text, &LayoutDef::default(), &mut log).unwrap();
        assert!(log.mentions("no ICP results were extracted"));
    }

    #[test]
    fn test_missing_header_is_fatal() {
        let mut log = Diagnostics::new();
        assert!(parse_report("", &LayoutDef::default(), &mut log).is_err());
    }
}
