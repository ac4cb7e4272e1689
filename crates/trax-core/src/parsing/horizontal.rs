//! Samples-as-rows tables.
//!
//! Layout, relative to the anchor line (the one starting with the
//! horizontal marker):
//!
//! ```text
//! 0 pH    TSS       NO3-N           <- analyte header (anchor - 1)
//! SAMPLE DATE TIME (mg/L) (mg/L)    <- unit header (anchor)
//! ---------------------------       <- ignored (anchor + 1)
//! 1 Well A1234 02Jan21 13:30p 7.1 12 0.4
//! Lab Blank 5.6 <1 <0.01
//!                                   <- blank line ends the table
//! ```

use crate::model::{is_location_code, SampleMeta, Triplet, LAB_BLANK, NO_LOCATION};
use crate::parsing::tokens::TokenLine;
use crate::parsing::TableShape;

/// pH has no unit column; its unit label is fixed.
pub const PH: &str = "pH";
const HEADER_PLACEHOLDER: &str = "0";
/// SAMPLE, DATE and TIME labels in front of the unit tokens.
const UNIT_ROW_LABELS: usize = 3;
/// Name, date and time: the least a non-blank row carries besides values.
const MIN_METADATA_TOKENS: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HorizontalRow {
    pub meta: SampleMeta,
    pub triplets: Vec<Triplet>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HorizontalTable {
    pub analytes: Vec<String>,
    pub units: Vec<String>,
    pub rows: Vec<HorizontalRow>,
}

/// Extract the table whose unit row is at `anchor`.
///
/// The whole table is validated before anything is returned, so a single
/// misaligned row rejects the table rather than contributing half of it.
pub fn extract(lines: &[TokenLine], anchor: usize) -> Result<HorizontalTable, TableShape> {
    let header = anchor
        .checked_sub(1)
        .and_then(|idx| lines.get(idx))
        .ok_or(TableShape::MissingHeader { line: anchor + 1 })?;
    let analytes: Vec<String> = match header.split_first() {
        Some((first, rest)) if first == HEADER_PLACEHOLDER => rest.to_vec(),
        _ => header.clone(),
    };
    if analytes.is_empty() {
        return Err(TableShape::MissingHeader { line: anchor + 1 });
    }

    let units: Vec<String> = lines
        .get(anchor)
        .and_then(|l| l.get(UNIT_ROW_LABELS..))
        .unwrap_or(&[])
        .to_vec();
    let unit_bearing = analytes.iter().filter(|a| *a != PH).count();
    if units.len() < unit_bearing {
        return Err(TableShape::UnitCount {
            line: anchor + 1,
            expected: unit_bearing,
            found: units.len(),
        });
    }

    let mut rows = Vec::new();
    for (idx, row) in lines.iter().enumerate().skip(anchor + 2) {
        if row.is_empty() {
            break;
        }
        rows.push(split_row(row, idx + 1, &analytes, &units)?);
    }

    Ok(HorizontalTable {
        analytes,
        units,
        rows,
    })
}

fn is_lab_blank_row(row: &[String]) -> bool {
    row.len() >= 2 && format!("{} {}", row[0], row[1]) == LAB_BLANK
}

fn split_row(
    row: &[String],
    line: usize,
    analytes: &[String],
    units: &[String],
) -> Result<HorizontalRow, TableShape> {
    let (meta, values) = if is_lab_blank_row(row) {
        let values = &row[2..];
        if values.len() < analytes.len() {
            return Err(TableShape::ShortRow {
                line,
                found: row.len(),
                needed: analytes.len() + 2,
            });
        }
        (SampleMeta::lab_blank(), values)
    } else {
        let needed = analytes.len() + MIN_METADATA_TOKENS;
        if row.len() < needed {
            return Err(TableShape::ShortRow {
                line,
                found: row.len(),
                needed,
            });
        }
        let split = row.len() - analytes.len();
        (split_metadata(&row[..split], line)?, &row[split..])
    };

    Ok(HorizontalRow {
        meta,
        triplets: build_triplets(analytes, units, values, line)?,
    })
}

/// Turn the leading tokens of a row into sample metadata.
///
/// Time and date are the last two tokens. The token before them is the
/// location code only if it passes the location heuristic; otherwise it
/// belongs to the sample name. The name may end up empty when the only
/// token left is taken as the location.
pub(crate) fn split_metadata(leading: &[String], line: usize) -> Result<SampleMeta, TableShape> {
    let mut tokens = leading.to_vec();
    let (Some(sample_time), Some(sample_date)) = (tokens.pop(), tokens.pop()) else {
        return Err(TableShape::ShortRow {
            line,
            found: leading.len(),
            needed: MIN_METADATA_TOKENS,
        });
    };
    let location_code = match tokens.last() {
        Some(last) if is_location_code(last) => tokens.pop().unwrap_or_default(),
        _ => NO_LOCATION.to_string(),
    };
    Ok(SampleMeta {
        name: tokens.join(" "),
        location_code,
        sample_date,
        sample_time,
    })
}

fn build_triplets(
    analytes: &[String],
    units: &[String],
    values: &[String],
    line: usize,
) -> Result<Vec<Triplet>, TableShape> {
    let mut units = units.iter();
    let mut triplets = Vec::with_capacity(analytes.len());
    for (analyte, value) in analytes.iter().zip(values) {
        let unit = if analyte == PH {
            PH.to_string()
        } else {
            units.next().cloned().ok_or(TableShape::UnitCount {
                line,
                expected: analytes.len(),
                found: triplets.len(),
            })?
        };
        triplets.push(Triplet::new(analyte.clone(), unit, value.clone()));
    }
    Ok(triplets)
}
