use crate::error::TraxError;
use crate::report::UploadReport;
use std::io::Write;
use std::path::{Path, PathBuf};

/// `<out_root>/<first 7 chars of job>/<job>.txt`, with any `/` in the job
/// number turned into `-` so it cannot open a sub-directory.
pub fn output_path(out_root: &Path, job_number: &str) -> PathBuf {
    let dir: String = job_number.chars().take(7).collect();
    out_root
        .join(sanitize(&dir))
        .join(format!("{}.txt", sanitize(job_number)))
}

fn sanitize(component: &str) -> String {
    component.replace('/', "-")
}

/// Write the upload file for `upload`, creating its directory if needed.
///
/// The content goes to a temporary file next to the target first and is
/// renamed into place, so an interrupted write never leaves a partial file.
pub fn write_upload(out_root: &Path, upload: &UploadReport) -> Result<PathBuf, TraxError> {
    let path = output_path(out_root, &upload.job_number);
    let dir = path.parent().unwrap_or(out_root);
    std::fs::create_dir_all(dir).map_err(|e| TraxError::OutputWrite {
        path: dir.to_path_buf(),
        reason: e.to_string(),
    })?;

    let write_err = |e: std::io::Error| TraxError::OutputWrite {
        path: path.clone(),
        reason: e.to_string(),
    };
    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(write_err)?;
    tmp.write_all(upload.render().as_bytes()).map_err(write_err)?;
    tmp.persist(&path).map_err(|e| write_err(e.error))?;

    tracing::info!(path = %path.display(), lines = upload.lines.len(), "wrote upload file");
    Ok(path)
}
