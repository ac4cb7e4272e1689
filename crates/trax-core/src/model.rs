use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Name given to the quality-control blank row of a horizontal table.
pub const LAB_BLANK: &str = "Lab Blank";
pub const NO_LOCATION: &str = "no location";
pub const NO_DATE: &str = "no date";
pub const NO_TIME: &str = "no time";
/// Value placeholder for an analyte that was not measured.
pub const NO_MEASUREMENT: &str = "---";
/// Normalized value for anything below the detection limit.
pub const NON_DETECT: &str = "ND";

/// One (analyte, unit, value) observation for a sample.
///
/// Values are kept verbatim: the upload format expects them exactly as the
/// lab reported them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Triplet {
    pub analyte: String,
    pub unit: String,
    pub value: String,
}

impl Triplet {
    pub fn new(analyte: impl Into<String>, unit: impl Into<String>, value: impl Into<String>) -> Self {
        Triplet {
            analyte: analyte.into(),
            unit: unit.into(),
            value: value.into(),
        }
    }
}

/// Identity of a sample as read from a table row or a backup header entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleMeta {
    pub name: String,
    pub location_code: String,
    pub sample_date: String,
    pub sample_time: String,
}

impl SampleMeta {
    pub fn lab_blank() -> Self {
        SampleMeta {
            name: LAB_BLANK.to_string(),
            location_code: NO_LOCATION.to_string(),
            sample_date: NO_DATE.to_string(),
            sample_time: NO_TIME.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleRecord {
    pub name: String,
    pub location_code: String,
    pub sample_date: String,
    pub sample_time: String,
    /// Every observation in extraction order, duplicates included.
    #[serde(default)]
    pub triplets: Vec<Triplet>,
}

impl SampleRecord {
    fn from_meta(meta: SampleMeta) -> Self {
        SampleRecord {
            name: meta.name,
            location_code: meta.location_code,
            sample_date: meta.sample_date,
            sample_time: meta.sample_time,
            triplets: Vec::new(),
        }
    }

    pub fn is_lab_blank(&self) -> bool {
        self.name == LAB_BLANK
    }

    pub fn has_location(&self) -> bool {
        self.location_code != NO_LOCATION
    }

    /// First whitespace-delimited token of the name; this is the id the
    /// upload format knows the sample by.
    pub fn sample_id(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or("")
    }

    pub fn numeric_id(&self) -> &str {
        leading_number(&self.name)
    }
}

/// Leading numeric portion of a sample name: up to two leading ASCII digits.
pub fn leading_number(name: &str) -> &str {
    let end = name
        .char_indices()
        .take(2)
        .take_while(|(_, c)| c.is_ascii_digit())
        .map(|(i, c)| i + c.len_utf8())
        .last()
        .unwrap_or(0);
    &name[..end]
}

/// Legacy location-code heuristic: exactly five characters with at least one digit.
pub fn is_location_code(token: &str) -> bool {
    token.chars().count() == 5 && token.chars().any(|c| c.is_ascii_digit())
}

/// Samples of one job, in first-seen order, keyed by name.
///
/// Inserting is an upsert: metadata is set only the first time a name is
/// seen, later occurrences just get their triplets appended.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<SampleRecord>", into = "Vec<SampleRecord>")]
pub struct SampleStore {
    records: Vec<SampleRecord>,
    index: HashMap<String, usize>,
}

impl SampleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the record for `meta.name`, creating it from `meta` if absent.
    pub fn upsert(&mut self, meta: SampleMeta) -> &mut SampleRecord {
        let idx = match self.index.get(&meta.name) {
            Some(&idx) => idx,
            None => {
                let idx = self.records.len();
                self.index.insert(meta.name.clone(), idx);
                self.records.push(SampleRecord::from_meta(meta));
                idx
            }
        };
        &mut self.records[idx]
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&SampleRecord> {
        self.index.get(name).map(|&idx| &self.records[idx])
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut SampleRecord> {
        match self.index.get(name) {
            Some(&idx) => Some(&mut self.records[idx]),
            None => None,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &SampleRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl From<Vec<SampleRecord>> for SampleStore {
    fn from(records: Vec<SampleRecord>) -> Self {
        let mut store = SampleStore::new();
        for record in records {
            let meta = SampleMeta {
                name: record.name,
                location_code: record.location_code,
                sample_date: record.sample_date,
                sample_time: record.sample_time,
            };
            store.upsert(meta).triplets.extend(record.triplets);
        }
        store
    }
}

impl From<SampleStore> for Vec<SampleRecord> {
    fn from(store: SampleStore) -> Self {
        store.records
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRecord {
    pub job_number: String,
    pub client_identifier: String,
}

/// Everything parsing learned about one report; the only input the
/// formatter needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedReport {
    pub job: JobRecord,
    pub samples: SampleStore,
}
