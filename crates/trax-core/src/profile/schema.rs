use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Everything one deployment needs to turn a lab report into an upload:
/// wire constants, code tables and the report layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionProfile {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub version: String,
    pub format: FormatDef,
    pub tables: LookupTables,
    #[serde(default)]
    pub layout: LayoutDef,
}

/// Fixed job-level values written into every upload record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormatDef {
    /// Upload format version, e.g. "WTX_2.0".
    pub wtx_version: String,
    pub lab_id: String,
    #[serde(default)]
    pub purpose: Purpose,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Purpose {
    #[default]
    Original,
    Replacement,
}

impl Purpose {
    /// Single-letter code used on the wire.
    pub fn code(&self) -> &'static str {
        match self {
            Purpose::Original => "O",
            Purpose::Replacement => "R",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyteDef {
    pub code: u32,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientDef {
    pub name: String,
    /// Client text as it appears in the report header. Empty never matches.
    #[serde(default)]
    pub alias: String,
    pub code: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LookupTables {
    /// Report analyte label -> WaterTrax analyte. Several labels may share a code.
    pub analytes: BTreeMap<String, AnalyteDef>,
    /// Report unit label -> WaterTrax unit code.
    pub units: BTreeMap<String, u32>,
    pub clients: Vec<ClientDef>,
    /// Three-letter month abbreviation -> two-digit month number.
    pub months: BTreeMap<String, String>,
}

impl LookupTables {
    pub fn analyte(&self, label: &str) -> Option<&AnalyteDef> {
        self.analytes.get(label)
    }

    pub fn unit_code(&self, label: &str) -> Option<u32> {
        self.units.get(label).copied()
    }

    /// First client whose alias equals `identifier` exactly.
    pub fn client_code(&self, identifier: &str) -> Option<u32> {
        self.clients
            .iter()
            .find(|c| !c.alias.is_empty() && c.alias == identifier)
            .map(|c| c.code)
    }

    pub fn month(&self, abbreviation: &str) -> Option<&str> {
        self.months.get(abbreviation).map(|s| s.as_str())
    }
}

/// Layout constants of the legacy report template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutDef {
    /// First token of the unit row of a samples-as-rows table.
    pub horizontal_marker: String,
    /// First token of the header row of an ICP (samples-as-columns) table.
    pub vertical_marker: String,
    /// First token of the line introducing a backup sample header block.
    pub backup_marker: String,
    /// Maximum number of analyte rows read after an ICP header.
    pub icp_analyte_rows: usize,
    /// Tokens dropped from the ICP sample-id line (the trailer phrase).
    pub icp_sample_line_trailer: usize,
    /// Last token of an ICP row -> number of limit-annotation tokens to drop.
    pub icp_trailer_markers: BTreeMap<String, usize>,
    /// Tokens dropped from an ICP row whose last token is not a known marker.
    pub icp_default_trailer: usize,
}

impl Default for LayoutDef {
    fn default() -> Self {
        let mut icp_trailer_markers = BTreeMap::new();
        icp_trailer_markers.insert("listed".to_string(), 3);
        icp_trailer_markers.insert("AO".to_string(), 4);
        icp_trailer_markers.insert("hard".to_string(), 4);
        LayoutDef {
            horizontal_marker: "SAMPLE".to_string(),
            vertical_marker: "ELEMENTS".to_string(),
            backup_marker: "SAMPLES".to_string(),
            icp_analyte_rows: 34,
            icp_sample_line_trailer: 3,
            icp_trailer_markers,
            icp_default_trailer: 2,
        }
    }
}

impl LayoutDef {
    /// Number of annotation tokens to strip from an ICP analyte row.
    pub fn icp_trailer_len(&self, row: &[String]) -> usize {
        row.last()
            .and_then(|last| self.icp_trailer_markers.get(last))
            .copied()
            .unwrap_or(self.icp_default_trailer)
    }
}
