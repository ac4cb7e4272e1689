use crate::error::TraxError;
use crate::profile::schema::ConversionProfile;
use crate::profile::validate_profile;

const WATERTRAX_JSON: &str = include_str!("../../../../profiles/watertrax.json");

/// Available predefined profiles.
pub const PRESETS: &[&str] = &["watertrax"];

pub const DEFAULT_PRESET: &str = "watertrax";

/// Load a predefined profile by name.
pub fn load_preset(name: &str) -> Result<ConversionProfile, TraxError> {
    match name {
        "watertrax" => {
            let profile: ConversionProfile = serde_json::from_str(WATERTRAX_JSON)?;
            validate_profile(&profile)?;
            Ok(profile)
        }
        _ => Err(TraxError::ProfileInvalid(format!(
            "unknown preset '{}'. Available: {}",
            name,
            PRESETS.join(", ")
        ))),
    }
}

/// The profile used when no other is requested.
pub fn default_profile() -> Result<ConversionProfile, TraxError> {
    load_preset(DEFAULT_PRESET)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_watertrax_preset() {
        let p = load_preset("watertrax").unwrap();
        assert_eq!(p.format.wtx_version, "WTX_2.0");
        assert_eq!(p.format.lab_id, "3393");
        assert_eq!(p.tables.analyte("pH").map(|a| a.code), Some(228));
        assert_eq!(p.tables.unit_code("(mg/L)"), Some(111));
        assert_eq!(p.tables.month("Dec"), Some("12"));
    }

    #[test]
    fn test_client_lookup_by_alias() {
        let p = default_profile().unwrap();
        assert_eq!(p.tables.client_code("Cranbrook, City"), Some(17573));
        assert_eq!(p.tables.client_code("City of Cranbrook"), None);
        assert_eq!(p.tables.client_code(""), None);
        assert_eq!(p.tables.client_code("BC Ferries"), Some(11273));
        assert_eq!(p.tables.client_code("Comox, City"), Some(16581));
        assert_eq!(p.tables.client_code("Campbell River,"), Some(10625));
        assert_eq!(p.tables.client_code("North Salt"), Some(16672));
    }

    #[test]
    fn test_unknown_preset() {
        assert!(load_preset("xyz").is_err());
    }
}
