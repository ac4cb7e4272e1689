use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum TraxError {
    #[error("no file found for job {job_number}: {}", path.display())]
    ReportNotFound { job_number: String, path: PathBuf },

    #[error("malformed report header: {0}")]
    MalformedHeader(String),

    #[error("analyte '{analyte}' (sample '{sample}') has no WaterTrax code. Add it to the profile's analyte table")]
    UnmappedAnalyte { analyte: String, sample: String },

    #[error("unit '{unit}' for analyte '{analyte}' has no WaterTrax code. Add it to the profile's unit table")]
    UnmappedUnit { unit: String, analyte: String },

    #[error("failed to load profile from {path}: {reason}")]
    ProfileLoad { path: PathBuf, reason: String },

    #[error("invalid profile: {0}")]
    ProfileInvalid(String),

    #[error("failed to write output to {path}: {reason}")]
    OutputWrite { path: PathBuf, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
