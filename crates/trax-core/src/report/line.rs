use serde::{Deserialize, Serialize};
use std::fmt;

/// Field separator of the upload format.
pub const DELIMITER: char = '|';

/// One upload record: a single analyte result of a single sample.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadLine {
    pub version: String,
    pub purpose: String,
    pub lab_id: String,
    pub client_id: String,
    pub location_code: String,
    pub job_number: String,
    pub sample_id: String,
    pub date: String,
    pub time: String,
    pub analyte_code: u32,
    pub value: String,
    pub unit_code: u32,
}

impl UploadLine {
    /// Fields in wire order, empty ones included.
    pub fn fields(&self) -> Vec<String> {
        vec![
            self.version.clone(),
            self.purpose.clone(),
            "F".to_string(),
            self.lab_id.clone(),
            String::new(),
            self.client_id.clone(),
            self.location_code.clone(),
            format!("{}T", self.job_number),
            String::new(),
            format!("{}-{}", self.job_number, self.sample_id),
            String::new(),
            self.date.clone(),
            self.time.clone(),
            String::new(),
            String::new(),
            self.analyte_code.to_string(),
            self.value.clone(),
            self.unit_code.to_string(),
        ]
    }
}

impl fmt::Display for UploadLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields = self.fields();
        f.write_str(&fields.join(&DELIMITER.to_string()))
    }
}
