pub mod datetime;
pub mod line;

use crate::diagnostics::Diagnostics;
use crate::error::TraxError;
use crate::model::{ParsedReport, SampleRecord, NO_DATE, NO_MEASUREMENT, NO_TIME};
use crate::profile::schema::ConversionProfile;
use datetime::{format_date, format_time};
use line::UploadLine;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Client id written when the report's client is not in the client table.
pub const NO_CLIENT_ID: &str = "No client ID";

/// The formatted upload for one job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadReport {
    pub job_number: String,
    pub lines: Vec<UploadLine>,
}

impl UploadReport {
    /// File contents: one record per line.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for line in &self.lines {
            out.push_str(&line.to_string());
            out.push('\n');
        }
        out
    }
}

/// Job-wide fields shared by every line.
struct JobFields<'a> {
    version: &'a str,
    purpose: &'static str,
    lab_id: &'a str,
    client_id: String,
    job_number: &'a str,
}

/// Map the intermediate model onto upload records.
///
/// The lab blank never produces output. An analyte or unit missing from the
/// lookup tables fails the whole job, since every record needs valid codes.
pub fn format_report(
    report: &ParsedReport,
    profile: &ConversionProfile,
    diagnostics: &mut Diagnostics,
) -> Result<UploadReport, TraxError> {
    let client_id = match profile.tables.client_code(&report.job.client_identifier) {
        Some(code) => code.to_string(),
        None => {
            diagnostics.important(format!(
                "client '{}' is not in the client table; writing '{}'",
                report.job.client_identifier, NO_CLIENT_ID
            ));
            NO_CLIENT_ID.to_string()
        }
    };
    let job = JobFields {
        version: &profile.format.wtx_version,
        purpose: profile.format.purpose.code(),
        lab_id: &profile.format.lab_id,
        client_id,
        job_number: &report.job.job_number,
    };

    let mut lines = Vec::new();
    for sample in report.samples.iter().filter(|s| !s.is_lab_blank()) {
        format_sample(sample, &job, profile, diagnostics, &mut lines)?;
    }

    diagnostics.info(format!(
        "{} upload lines for job {}",
        lines.len(),
        report.job.job_number
    ));
    Ok(UploadReport {
        job_number: report.job.job_number.clone(),
        lines,
    })
}

fn format_sample(
    sample: &SampleRecord,
    job: &JobFields<'_>,
    profile: &ConversionProfile,
    diagnostics: &mut Diagnostics,
    lines: &mut Vec<UploadLine>,
) -> Result<(), TraxError> {
    let tables = &profile.tables;
    let location_code = if sample.has_location() {
        sample.location_code.clone()
    } else {
        String::new()
    };
    let date = if sample.sample_date == NO_DATE {
        String::new()
    } else {
        format_date(&sample.sample_date, tables).unwrap_or_else(|| {
            diagnostics.important(format!(
                "sample '{}': date '{}' is not DDMonYY; date left empty",
                sample.name, sample.sample_date
            ));
            String::new()
        })
    };
    let time = if sample.sample_time == NO_TIME {
        String::new()
    } else {
        format_time(&sample.sample_time)
    };

    let mut emitted = HashSet::new();
    for triplet in &sample.triplets {
        let analyte = tables
            .analyte(&triplet.analyte)
            .ok_or_else(|| TraxError::UnmappedAnalyte {
                analyte: triplet.analyte.clone(),
                sample: sample.name.clone(),
            })?;
        let unit_code = tables
            .unit_code(&triplet.unit)
            .ok_or_else(|| TraxError::UnmappedUnit {
                unit: triplet.unit.clone(),
                analyte: triplet.analyte.clone(),
            })?;

        if triplet.value == NO_MEASUREMENT {
            continue;
        }
        if !emitted.insert(analyte.code) {
            diagnostics.info(format!(
                "sample '{}': repeated {} ({}) = {} dropped, first value kept",
                sample.name, triplet.analyte, analyte.description, triplet.value
            ));
            continue;
        }

        lines.push(UploadLine {
            version: job.version.to_string(),
            purpose: job.purpose.to_string(),
            lab_id: job.lab_id.to_string(),
            client_id: job.client_id.clone(),
            location_code: location_code.clone(),
            job_number: job.job_number.to_string(),
            sample_id: sample.sample_id().to_string(),
            date: date.clone(),
            time: time.clone(),
            analyte_code: analyte.code,
            value: triplet.value.clone(),
            unit_code,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{JobRecord, SampleMeta, SampleStore, Triplet, LAB_BLANK};
    use crate::profile::builtin::default_profile;

    fn report(client: &str, samples: Vec<(&str, Vec<Triplet>)>) -> ParsedReport {
        let mut store = SampleStore::new();
        for (name, triplets) in samples {
            let meta = if name == LAB_BLANK {
                SampleMeta::lab_blank()
            } else {
                SampleMeta {
                    name: name.to_string(),
                    location_code: "A1234".into(),
                    sample_date: "02Jan21".into(),
                    sample_time: "13:30p".into(),
                }
            };
            store.upsert(meta).triplets.extend(triplets);
        }
        ParsedReport {
            job: JobRecord {
                job_number: "2101234".into(),
                client_identifier: client.into(),
            },
            samples: store,
        }
    }

    fn format(report: &ParsedReport) -> Result<UploadReport, TraxError> {
        let profile = default_profile().unwrap();
        format_report(report, &profile, &mut Diagnostics::new())
    }

    #[test]
    fn test_one_line_per_distinct_analyte() {
        let r = report(
            "BC Ferries",
            vec![(
                "1 Well",
                vec![
                    Triplet::new("pH", "pH", "7.1"),
                    Triplet::new("TSS", "(mg/L)", "12"),
                    Triplet::new("Al", "(mg/L)", "ND"),
                ],
            )],
        );
        let upload = format(&r).unwrap();
        assert_eq!(upload.lines.len(), 3);
        assert_eq!(
            upload.lines[0].to_string(),
            "WTX_2.0|O|F|3393||11273|A1234|2101234T||2101234-1||01022021|13:30|||228|7.1|115"
        );
    }

    #[test]
    fn test_first_duplicate_wins() {
        let r = report(
            "BC Ferries",
            vec![(
                "1 Well",
                vec![
                    Triplet::new("TSS", "(mg/L)", "12"),
                    Triplet::new("TSS", "(mg/L)", "99"),
                ],
            )],
        );
        let upload = format(&r).unwrap();
        assert_eq!(upload.lines.len(), 1);
        assert_eq!(upload.lines[0].value, "12");
    }

    #[test]
    fn test_placeholder_value_skipped() {
        let r = report(
            "BC Ferries",
            vec![(
                "1 Well",
                vec![
                    Triplet::new("TSS", "(mg/L)", "---"),
                    Triplet::new("TSS", "(mg/L)", "14"),
                ],
            )],
        );
        let upload = format(&r).unwrap();
        assert_eq!(upload.lines.len(), 1);
        assert_eq!(upload.lines[0].value, "14");
    }

    #[test]
    fn test_lab_blank_excluded() {
        let r = report(
            "BC Ferries",
            vec![(LAB_BLANK, vec![Triplet::new("TSS", "(mg/L)", "<1")])],
        );
        assert!(format(&r).unwrap().lines.is_empty());
    }

    #[test]
    fn test_unknown_client_is_soft() {
        let r = report(
            "Nobody Known",
            vec![("1 Well", vec![Triplet::new("TSS", "(mg/L)", "12")])],
        );
        let profile = default_profile().unwrap();
        let mut log = Diagnostics::new();
        let upload = format_report(&r, &profile, &mut log).unwrap();
        assert_eq!(upload.lines[0].client_id, NO_CLIENT_ID);
        assert!(log.mentions("Nobody Known"));
    }

    #[test]
    fn test_unmapped_analyte_is_fatal() {
        let r = report(
            "BC Ferries",
            vec![("1 Well", vec![Triplet::new("Unobtainium", "(mg/L)", "1")])],
        );
        assert!(matches!(
            format(&r),
            Err(TraxError::UnmappedAnalyte { .. })
        ));
    }

    #[test]
    fn test_unmapped_unit_is_fatal_even_for_placeholder() {
        let r = report(
            "BC Ferries",
            vec![("1 Well", vec![Triplet::new("TSS", "(furlongs)", "---")])],
        );
        assert!(matches!(format(&r), Err(TraxError::UnmappedUnit { .. })));
    }

    #[test]
    fn test_synonyms_share_one_code() {
        let mut profile = default_profile().unwrap();
        let tss = profile.tables.analytes["TSS"].clone();
        profile.tables.analytes.insert("T.S.S.".into(), tss);
        let r = report(
            "BC Ferries",
            vec![(
                "1 Well",
                vec![
                    Triplet::new("T.S.S.", "(mg/L)", "12"),
                    Triplet::new("TSS", "(mg/L)", "13"),
                ],
            )],
        );
        let upload = format_report(&r, &profile, &mut Diagnostics::new()).unwrap();
        assert_eq!(upload.lines.len(), 1);
        assert_eq!(upload.lines[0].value, "12");
    }

    #[test]
    fn test_formatting_is_deterministic() {
        let r = report(
            "Cranbrook, City",
            vec![
                ("1 Well", vec![Triplet::new("TSS", "(mg/L)", "12")]),
                ("2 Tap", vec![Triplet::new("pH", "pH", "6.9")]),
            ],
        );
        assert_eq!(format(&r).unwrap().render(), format(&r).unwrap().render());
    }

    #[test]
    fn test_replacement_purpose_code() {
        let mut profile = default_profile().unwrap();
        profile.format.purpose = crate::profile::schema::Purpose::Replacement;
        let r = report(
            "BC Ferries",
            vec![("1 Well", vec![Triplet::new("TSS", "(mg/L)", "12")])],
        );
        let upload = format_report(&r, &profile, &mut Diagnostics::new()).unwrap();
        assert_eq!(upload.lines[0].purpose, "R");
    }
}
