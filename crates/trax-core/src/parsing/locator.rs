use crate::diagnostics::Diagnostics;
use crate::parsing::tokens::TokenLine;
use crate::profile::schema::LayoutDef;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorKind {
    HorizontalTableStart,
    VerticalTableStart,
    BackupHeaderStart,
}

/// Line indices of every anchor in the report, per kind, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Anchors {
    pub horizontal: Vec<usize>,
    pub vertical: Vec<usize>,
    pub backup: Vec<usize>,
}

pub fn anchor_kind(line: &TokenLine, layout: &LayoutDef) -> Option<AnchorKind> {
    let first = line.first()?;
    if *first == layout.horizontal_marker {
        Some(AnchorKind::HorizontalTableStart)
    } else if *first == layout.vertical_marker {
        Some(AnchorKind::VerticalTableStart)
    } else if *first == layout.backup_marker {
        Some(AnchorKind::BackupHeaderStart)
    } else {
        None
    }
}

/// Find all table and backup-header anchors.
pub fn locate(lines: &[TokenLine], layout: &LayoutDef, diagnostics: &mut Diagnostics) -> Anchors {
    let mut anchors = Anchors::default();
    for (idx, line) in lines.iter().enumerate() {
        match anchor_kind(line, layout) {
            Some(AnchorKind::HorizontalTableStart) => anchors.horizontal.push(idx),
            Some(AnchorKind::VerticalTableStart) => anchors.vertical.push(idx),
            Some(AnchorKind::BackupHeaderStart) => anchors.backup.push(idx),
            None => {}
        }
    }

    diagnostics.info(format!(
        "{} horizontal tables, {} vertical tables found",
        anchors.horizontal.len(),
        anchors.vertical.len()
    ));
    if anchors.horizontal.is_empty() && anchors.backup.is_empty() {
        diagnostics.critical(format!(
            "no '{}' tables and no '{}' header block found; without them no sample \
             names, locations or dates can be recovered and the run will likely produce no output",
            layout.horizontal_marker, layout.backup_marker
        ));
    }
    anchors
}
