pub mod builtin;
pub mod schema;

use crate::error::TraxError;
use schema::ConversionProfile;
use std::collections::HashSet;
use std::path::Path;

/// Load a conversion profile from a JSON file.
pub fn load_profile(path: &Path) -> Result<ConversionProfile, TraxError> {
    let content = std::fs::read_to_string(path).map_err(|e| TraxError::ProfileLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    parse_profile(&content, path)
}

/// Parse a profile from a JSON string.
pub fn parse_profile(json: &str, source: &Path) -> Result<ConversionProfile, TraxError> {
    let profile: ConversionProfile =
        serde_json::from_str(json).map_err(|e| TraxError::ProfileLoad {
            path: source.to_path_buf(),
            reason: e.to_string(),
        })?;
    validate_profile(&profile)?;
    Ok(profile)
}

/// Parse a profile from a JSON string (no file path context).
pub fn parse_profile_str(json: &str) -> Result<ConversionProfile, TraxError> {
    let profile: ConversionProfile = serde_json::from_str(json).map_err(TraxError::Json)?;
    validate_profile(&profile)?;
    Ok(profile)
}

/// Validate that a profile is usable for a conversion.
pub fn validate_profile(profile: &ConversionProfile) -> Result<(), TraxError> {
    if profile.format.wtx_version.trim().is_empty() {
        return Err(TraxError::ProfileInvalid(
            "format.wtx_version must not be empty".into(),
        ));
    }
    if profile.format.lab_id.trim().is_empty() {
        return Err(TraxError::ProfileInvalid(
            "format.lab_id must not be empty".into(),
        ));
    }

    let tables = &profile.tables;
    if tables.analytes.is_empty() {
        return Err(TraxError::ProfileInvalid(
            "analyte table must not be empty".into(),
        ));
    }
    if tables.analytes.keys().any(|k| k.trim().is_empty()) {
        return Err(TraxError::ProfileInvalid(
            "analyte labels must not be empty".into(),
        ));
    }
    if tables.units.is_empty() {
        return Err(TraxError::ProfileInvalid("unit table must not be empty".into()));
    }

    if tables.months.len() != 12 {
        return Err(TraxError::ProfileInvalid(format!(
            "month table must have 12 entries, found {}",
            tables.months.len()
        )));
    }
    for (abbr, number) in &tables.months {
        if abbr.chars().count() != 3 {
            return Err(TraxError::ProfileInvalid(format!(
                "month abbreviation '{}' must be three letters",
                abbr
            )));
        }
        if number.len() != 2 || !number.chars().all(|c| c.is_ascii_digit()) {
            return Err(TraxError::ProfileInvalid(format!(
                "month '{}' maps to '{}', expected two digits",
                abbr, number
            )));
        }
    }

    let mut aliases = HashSet::new();
    for client in &tables.clients {
        if client.alias.is_empty() {
            continue;
        }
        if !aliases.insert(client.alias.as_str()) {
            return Err(TraxError::ProfileInvalid(format!(
                "client alias '{}' is used more than once",
                client.alias
            )));
        }
    }

    let layout = &profile.layout;
    let markers = [
        &layout.horizontal_marker,
        &layout.vertical_marker,
        &layout.backup_marker,
    ];
    if markers.iter().any(|m| m.trim().is_empty()) {
        return Err(TraxError::ProfileInvalid(
            "layout markers must not be empty".into(),
        ));
    }
    if markers.iter().collect::<HashSet<_>>().len() != markers.len() {
        return Err(TraxError::ProfileInvalid(
            "layout markers must be distinct".into(),
        ));
    }
    if layout.icp_analyte_rows == 0 {
        return Err(TraxError::ProfileInvalid(
            "layout.icp_analyte_rows must be at least 1".into(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const MONTHS: &str = r#"{
        "Jan": "01", "Feb": "02", "Mar": "03", "Apr": "04", "May": "05", "Jun": "06",
        "Jul": "07", "Aug": "08", "Sep": "09", "Oct": "10", "Nov": "11", "Dec": "12"
    }"#;

    fn profile_json(months: &str, clients: &str) -> String {
        format!(
            r#"{{
                "name": "Test",
                "version": "1.0",
                "format": {{ "wtx_version": "WTX_2.0", "lab_id": "3393" }},
                "tables": {{
                    "analytes": {{ "pH": {{ "code": 228, "description": "pH" }} }},
                    "units": {{ "pH": 115 }},
                    "clients": {clients},
                    "months": {months}
                }}
            }}"#
        )
    }

    #[test]
    fn test_parse_valid_profile_uses_default_layout() {
        let p = parse_profile_str(&profile_json(MONTHS, "[]")).unwrap();
        assert_eq!(p.name, "Test");
        assert_eq!(p.layout.horizontal_marker, "SAMPLE");
        assert_eq!(p.layout.icp_analyte_rows, 34);
        assert_eq!(p.format.purpose, schema::Purpose::Original);
    }

    #[test]
    fn test_incomplete_month_table_rejected() {
        let json = profile_json(r#"{ "Jan": "01" }"#, "[]");
        assert!(parse_profile_str(&json).is_err());
    }

    #[test]
    fn test_duplicate_client_alias_rejected() {
        let clients = r#"[
            { "name": "A", "alias": "Same", "code": 1 },
            { "name": "B", "alias": "Same", "code": 2 }
        ]"#;
        assert!(parse_profile_str(&profile_json(MONTHS, clients)).is_err());
    }

    #[test]
    fn test_empty_aliases_may_repeat() {
        let clients = r#"[
            { "name": "A", "code": 1 },
            { "name": "B", "alias": "", "code": 2 }
        ]"#;
        assert!(parse_profile_str(&profile_json(MONTHS, clients)).is_ok());
    }

    #[test]
    fn test_colliding_layout_markers_rejected() {
        let mut p = parse_profile_str(&profile_json(MONTHS, "[]")).unwrap();
        p.layout.backup_marker = p.layout.horizontal_marker.clone();
        assert!(validate_profile(&p).is_err());
    }

    #[test]
    fn test_load_missing_file_reports_path() {
        let err = load_profile(Path::new("/nonexistent/profile.json")).unwrap_err();
        assert!(matches!(err, TraxError::ProfileLoad { .. }));
    }
}
