//! Backup sample header blocks.
//!
//! Reports without (complete) horizontal tables still list their samples
//! in a header block. Every entry opens with a parenthesised token and
//! ends with an optional location code, a date and a time:
//!
//! ```text
//! SAMPLES  ID  LOCATION  DATE  TIME
//! (1) Well Head A1234 02Jan21 13:30p
//! (2) Tap Water 03Jan21 09:10a
//! ```

use crate::model::SampleMeta;
use crate::parsing::horizontal::split_metadata;
use crate::parsing::tokens::TokenLine;
use crate::parsing::TableShape;

/// Parse the block at `anchor` into one result per entry, in order.
///
/// Tokens before the first opening parenthesis are column labels and are
/// ignored. The block ends at the first blank line.
pub fn extract(lines: &[TokenLine], anchor: usize) -> Vec<Result<SampleMeta, TableShape>> {
    let mut entries: Vec<(usize, Vec<String>)> = Vec::new();

    for (idx, line) in lines.iter().enumerate().skip(anchor) {
        if line.is_empty() {
            break;
        }
        let tokens = if idx == anchor { &line[1..] } else { &line[..] };
        for token in tokens {
            if token.starts_with('(') {
                let rest = token.trim_start_matches('(').trim_end_matches(')');
                let mut entry = Vec::new();
                if !rest.is_empty() {
                    entry.push(rest.to_string());
                }
                entries.push((idx + 1, entry));
            } else if let Some((_, entry)) = entries.last_mut() {
                entry.push(token.clone());
            }
        }
    }

    entries
        .into_iter()
        .map(|(line, tokens)| split_metadata(&tokens, line))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NO_LOCATION;
    use crate::parsing::tokens::tokenize;

    #[test]
    fn test_entries_with_and_without_location() {
        let text = "SAMPLES ID LOCATION DATE TIME\n(1) Well Head A1234 02Jan21 13:30p\n(2) Tap Water 03Jan21 09:10a\n";
        let entries = extract(&tokenize(text), 0);
        assert_eq!(entries.len(), 2);

        let first = entries[0].as_ref().unwrap();
        assert_eq!(first.name, "1 Well Head");
        assert_eq!(first.location_code, "A1234");
        assert_eq!(first.sample_date, "02Jan21");
        assert_eq!(first.sample_time, "13:30p");

        let second = entries[1].as_ref().unwrap();
        assert_eq!(second.name, "2 Tap Water");
        assert_eq!(second.location_code, NO_LOCATION);
    }

    #[test]
    fn test_bare_parenthesis_and_wrapped_entries() {
        let text = "SAMPLES\n( 3 Reservoir\n12B45 04Feb21 10:00a ( 4 Creek 05Feb21 11:00a\n\n(5) ignored 01Jan21 1:00p";
        let entries = extract(&tokenize(text), 0);
        assert_eq!(entries.len(), 2);
        let first = entries[0].as_ref().unwrap();
        assert_eq!(first.name, "3 Reservoir");
        assert_eq!(first.location_code, "12B45");
        assert_eq!(entries[1].as_ref().unwrap().name, "4 Creek");
    }

    #[test]
    fn test_short_entry_is_rejected() {
        let text = "SAMPLES\n(1)\n(2) Tap 03Jan21 09:10a\n(3) 03Jan21 09:10a\n( A1234 04Jan21 10:00a\n";
        let entries = extract(&tokenize(text), 0);
        assert_eq!(entries.len(), 4);
        assert!(matches!(entries[0], Err(TableShape::ShortRow { line: 2, .. })));
        assert!(entries[1].is_ok());
        // The parenthesised number alone is enough for a name.
        assert_eq!(entries[2].as_ref().unwrap().name, "3");
        let location_only = entries[3].as_ref().unwrap();
        assert_eq!(location_only.name, "");
        assert_eq!(location_only.location_code, "A1234");
    }
}
