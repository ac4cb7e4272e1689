use crate::error::TraxError;
use crate::model::JobRecord;

/// A report line split on whitespace. Blank lines become empty vectors and
/// are kept, since they terminate tables.
pub type TokenLine = Vec<String>;

const JOB_NUMBER_LEN: usize = 7;
const CLIENT_TOKENS: usize = 2;

pub fn tokenize(text: &str) -> Vec<TokenLine> {
    text.lines()
        .map(|line| line.split_whitespace().map(str::to_string).collect())
        .collect()
}

/// Read client identifier and job number from the first non-blank line.
///
/// The job number is the last token when it is seven characters long;
/// otherwise the last token is taken to be a page marker ("pg 2") and the
/// job number is the token before it. The client identifier is the first
/// two tokens preceding the job number.
pub fn parse_job_header(lines: &[TokenLine]) -> Result<JobRecord, TraxError> {
    let header = lines
        .iter()
        .find(|l| !l.is_empty())
        .ok_or_else(|| TraxError::MalformedHeader("report is empty".into()))?;

    let job_pos = match header.last() {
        Some(last) if last.chars().count() == JOB_NUMBER_LEN => header.len() - 1,
        _ if header.len() >= 2 => header.len() - 2,
        _ => {
            return Err(TraxError::MalformedHeader(format!(
                "no job number in first line '{}'",
                header.join(" ")
            )))
        }
    };

    let client_end = job_pos.min(CLIENT_TOKENS);
    Ok(JobRecord {
        job_number: header[job_pos].clone(),
        client_identifier: header[..client_end].join(" "),
    })
}
