use trax_core::diagnostics::{Diagnostics, Severity};
use trax_core::ParseOutcome;

/// Human-readable dump of a parsed report.
pub fn format_parsed(parsed: &ParseOutcome) -> String {
    let mut out = String::new();
    let job = &parsed.report.job;
    out.push_str(&format!(
        "Job {} ({})\n",
        job.job_number, job.client_identifier
    ));
    out.push_str(&format!("{} sample(s)\n", parsed.report.samples.len()));

    for sample in parsed.report.samples.iter() {
        out.push_str(&format!("\n--- {} ---\n", sample.name));
        out.push_str(&format!(
            "  location: {}  date: {}  time: {}\n",
            sample.location_code, sample.sample_date, sample.sample_time
        ));
        if sample.triplets.is_empty() {
            out.push_str("  (no results)\n");
            continue;
        }

        let max_name = sample
            .triplets
            .iter()
            .map(|t| t.analyte.len())
            .max()
            .unwrap_or(10);
        for t in &sample.triplets {
            out.push_str(&format!(
                "  {:<width$}  {:>10}  {}\n",
                t.analyte,
                t.value,
                t.unit,
                width = max_name
            ));
        }
    }

    let problems = parsed.diagnostics.count(Severity::Important)
        + parsed.diagnostics.count(Severity::Critical);
    if problems > 0 {
        out.push_str(&format!("\n{} warning(s):\n", problems));
        for entry in parsed.diagnostics.entries() {
            if entry.severity != Severity::Info {
                out.push_str(&format!("  {}: {}\n", entry.severity, entry.message));
            }
        }
    }

    out
}

pub fn eprint_diagnostics(diagnostics: &Diagnostics) {
    for entry in diagnostics.entries() {
        if entry.severity != Severity::Info {
            eprintln!("  {}: {}", entry.severity, entry.message);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trax_core::profile::builtin::default_profile;

    #[test]
    fn test_format_parsed_lists_samples_and_warnings() {
        let text = "\
BC Ferries 2101234
TSS
SAMPLE DATE TIME (mg/L)
----
1 Well A1234 02Jan21 13:30p 12
";
        let profile = default_profile().unwrap();
        let parsed = trax_core::parse_text(text, &profile).unwrap();
        let out = format_parsed(&parsed);
        assert!(out.starts_with("Job 2101234 (BC Ferries)"));
        assert!(out.contains("--- 1 Well ---"));
        assert!(out.contains("location: A1234"));
        assert!(!out.contains("warning(s)"));
    }
}
