use crate::error::TraxError;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Finds the report file for a job number in the report directory.
///
/// Reports are stored flat as `<dir>/<prefix><job><extension>`.
#[derive(Debug, Clone)]
pub struct ReportLocator {
    pub dir: PathBuf,
    pub prefix: String,
    pub extension: String,
}

impl ReportLocator {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        ReportLocator {
            dir: dir.into(),
            prefix: "W".to_string(),
            extension: ".CHM".to_string(),
        }
    }

    pub fn path_for(&self, job_number: &str) -> PathBuf {
        self.dir
            .join(format!("{}{}{}", self.prefix, job_number.trim(), self.extension))
    }

    /// Read the report for `job_number`.
    pub fn read(&self, job_number: &str) -> Result<String, TraxError> {
        let path = self.path_for(job_number);
        read_report(&path).map_err(|e| match e {
            TraxError::ReportNotFound { path, .. } => TraxError::ReportNotFound {
                job_number: job_number.trim().to_string(),
                path,
            },
            other => other,
        })
    }
}

/// Read a report file. Bytes that are not valid UTF-8 are replaced, since
/// the legacy tool writes a single-byte code page.
pub fn read_report(path: &Path) -> Result<String, TraxError> {
    match std::fs::read(path) {
        Ok(bytes) => Ok(String::from_utf8_lossy(&bytes).into_owned()),
        Err(e) if e.kind() == ErrorKind::NotFound => Err(TraxError::ReportNotFound {
            job_number: path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default(),
            path: path.to_path_buf(),
        }),
        Err(e) => Err(TraxError::Io(e)),
    }
}
