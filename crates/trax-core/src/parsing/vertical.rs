//! Samples-as-columns ICP metals tables.
//!
//! ```text
//! 1       2       3      Maximum Limits Permissable   <- sample ids (anchor - 1)
//! ELEMENTS ...               In Drinking Water        <- anchor
//! ...                                                 <- ignored
//! 13 Al  Al   0.021  <0.005 0.110  mg/L  0.1 AO        <- short-name row
//! Hardness (mg/L CaCO3) 120 85 98 mg/L  No limit listed  <- long-name row
//! ```
//!
//! Each analyte row ends in a drinking-water limit annotation whose length
//! depends on its last token; the token left in front of it is the unit.

use crate::model::{Triplet, NON_DETECT};
use crate::parsing::tokens::TokenLine;
use crate::parsing::TableShape;
use crate::profile::schema::LayoutDef;

/// Tokens in front of the values: row number, symbol, analyte (or a
/// three-word analyte name).
const LEADING_TOKENS: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerticalTable {
    /// Sample ids in column order.
    pub sample_ids: Vec<String>,
    /// Triplets per sample id, same order as `sample_ids`.
    pub columns: Vec<Vec<Triplet>>,
    pub rows_read: usize,
}

impl VerticalTable {
    pub fn into_columns(self) -> impl Iterator<Item = (String, Vec<Triplet>)> {
        self.sample_ids.into_iter().zip(self.columns)
    }

    pub fn triplet_count(&self) -> usize {
        self.columns.iter().map(Vec::len).sum()
    }
}

/// Extract the ICP table whose header row is at `anchor`.
pub fn extract(
    lines: &[TokenLine],
    anchor: usize,
    layout: &LayoutDef,
) -> Result<VerticalTable, TableShape> {
    let id_line = anchor
        .checked_sub(1)
        .and_then(|idx| lines.get(idx))
        .ok_or(TableShape::MissingSampleIds { line: anchor + 1 })?;
    let keep = id_line.len().saturating_sub(layout.icp_sample_line_trailer);
    let sample_ids = id_line[..keep].to_vec();
    if sample_ids.is_empty() {
        return Err(TableShape::MissingSampleIds { line: anchor + 1 });
    }

    let mut columns = vec![Vec::new(); sample_ids.len()];
    let mut rows_read = 0;
    for offset in 0..layout.icp_analyte_rows {
        let idx = anchor + 2 + offset;
        let row = match lines.get(idx) {
            Some(row) if !row.is_empty() => row,
            _ => break,
        };
        let keep = row.len().saturating_sub(layout.icp_trailer_len(row));
        let row = &row[..keep];

        let needed = LEADING_TOKENS + sample_ids.len() + 1;
        if row.len() < needed {
            return Err(TableShape::ShortRow {
                line: idx + 1,
                found: row.len(),
                needed,
            });
        }

        let analyte = analyte_identifier(row);
        let unit = format!("({})", row[row.len() - 1]);
        let values = &row[LEADING_TOKENS..LEADING_TOKENS + sample_ids.len()];
        for (column, value) in columns.iter_mut().zip(values) {
            column.push(Triplet::new(analyte.clone(), unit.clone(), normalize_value(value)));
        }
        rows_read += 1;
    }

    Ok(VerticalTable {
        sample_ids,
        columns,
        rows_read,
    })
}

/// Rows numbered in the first column carry a short analyte symbol as the
/// third token; unnumbered rows spell the analyte out over three tokens.
fn analyte_identifier(row: &[String]) -> String {
    let numbered = row[0]
        .chars()
        .next()
        .map(|c| c.is_ascii_digit())
        .unwrap_or(false);
    if numbered {
        row[2].clone()
    } else {
        row[..LEADING_TOKENS].join(" ")
    }
}

/// Below-detection values ("<0.001") become "ND".
fn normalize_value(value: &str) -> String {
    if value.starts_with('<') {
        NON_DETECT.to_string()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::tokens::tokenize;

    const ICP: &str = "\
1 2 Maximum Limits Permissable
ELEMENTS Symbol mg/L mg/L In Drinking Water
----
13 Al Al 0.021 <0.005 mg/L 0.1 AO
29 Cu Cu 0.30 0.12 mg/L 2.0 MAC
Hardness (mg/L CaCO3) 120 85 mg/L No limit listed
";

    fn icp(text: &str, layout: &LayoutDef) -> Result<VerticalTable, TableShape> {
        let lines = tokenize(text);
        extract(&lines, 1, layout)
    }

    #[test]
    fn test_extracts_columns_per_sample() {
        let mut layout = LayoutDef::default();
        layout.icp_trailer_markers.insert("AO".into(), 2);
        let t = icp(ICP, &layout).unwrap();
        assert_eq!(t.sample_ids, vec!["1", "2"]);
        assert_eq!(t.rows_read, 3);
        assert_eq!(
            t.columns[0],
            vec![
                Triplet::new("Al", "(mg/L)", "0.021"),
                Triplet::new("Cu", "(mg/L)", "0.30"),
                Triplet::new("Hardness (mg/L CaCO3)", "(mg/L)", "120"),
            ]
        );
        assert_eq!(t.columns[1][1], Triplet::new("Cu", "(mg/L)", "0.12"));
    }

    #[test]
    fn test_non_detect_rewritten() {
        let mut layout = LayoutDef::default();
        layout.icp_trailer_markers.insert("AO".into(), 2);
        let t = icp(ICP, &layout).unwrap();
        assert_eq!(t.columns[1][0].value, "ND");
    }

    #[test]
    fn test_row_limit_respected() {
        let mut layout = LayoutDef::default();
        layout.icp_trailer_markers.insert("AO".into(), 2);
        layout.icp_analyte_rows = 1;
        let t = icp(ICP, &layout).unwrap();
        assert_eq!(t.rows_read, 1);
        assert_eq!(t.triplet_count(), 2);
    }

    #[test]
    fn test_four_token_ao_annotation() {
        let text = "\
1 Maximum Limits Permissable
ELEMENTS Symbol In Drinking Water
----
25 Mn Mn 0.05 mg/L 0.02 MAC 0.12 AO
";
        let t = icp(text, &LayoutDef::default()).unwrap();
        assert_eq!(t.columns[0], vec![Triplet::new("Mn", "(mg/L)", "0.05")]);
    }

    #[test]
    fn test_missing_sample_ids() {
        let text = "Maximum Limits Permissable\nELEMENTS x\n----\n13 Al Al 0.021 mg/L 0.1 MAC\n";
        assert_eq!(
            icp(text, &LayoutDef::default()).unwrap_err(),
            TableShape::MissingSampleIds { line: 2 }
        );
    }

    #[test]
    fn test_row_shorter_than_sample_ids() {
        let text = "1 2 3 Maximum Limits Permissable\nELEMENTS x\n----\n13 Al Al 0.021 mg/L 0.1 MAC\n";
        assert!(matches!(
            icp(text, &LayoutDef::default()).unwrap_err(),
            TableShape::ShortRow { line: 4, .. }
        ));
    }
}
