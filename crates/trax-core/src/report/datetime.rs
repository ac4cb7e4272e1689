use crate::profile::schema::LookupTables;

const CENTURY: &str = "20";

/// Reformat a report date ("02Jan21") as an upload date ("01022021").
///
/// Returns `None` when the date is not seven characters of `DDMonYY` or the
/// month abbreviation is not in the month table.
pub fn format_date(raw: &str, tables: &LookupTables) -> Option<String> {
    if raw.len() != 7 || !raw.is_ascii() {
        return None;
    }
    let (day, month, year) = (&raw[0..2], &raw[2..5], &raw[5..7]);
    if !is_digits(day) || !is_digits(year) {
        return None;
    }
    let month = tables.month(month)?;
    Some(format!("{month}{day}{CENTURY}{year}"))
}

/// Drop the trailing am/pm marker of a report time: "13:30p" -> "13:30".
pub fn format_time(raw: &str) -> String {
    raw.trim_end_matches(|c: char| c.is_ascii_alphabetic())
        .to_string()
}

fn is_digits(s: &str) -> bool {
    s.chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::builtin::default_profile;

    #[test]
    fn test_format_date() {
        let p = default_profile().unwrap();
        assert_eq!(format_date("02Jan21", &p.tables).as_deref(), Some("01022021"));
        assert_eq!(format_date("31Dec99", &p.tables).as_deref(), Some("12312099"));
    }

    #[test]
    fn test_format_date_rejects_bad_input() {
        let p = default_profile().unwrap();
        assert_eq!(format_date("2Jan21", &p.tables), None);
        assert_eq!(format_date("02Foo21", &p.tables), None);
        assert_eq!(format_date("AAJan21", &p.tables), None);
        assert_eq!(format_date("no date", &p.tables), None);
    }

    #[test]
    fn test_format_time() {
        assert_eq!(format_time("13:30p"), "13:30");
        assert_eq!(format_time("09:10am"), "09:10");
        assert_eq!(format_time("13:30"), "13:30");
    }
}
