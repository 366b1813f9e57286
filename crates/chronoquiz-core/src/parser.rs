//! Event payload parser.
//!
//! Converts the positional JSON rows served by the data source
//! (`[label, year, month, day, "tag, tag"]`) into `Event` records, once,
//! at load time. Bad rows are skipped with a warning rather than failing
//! the whole load.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::SourceError;
use crate::model::{Event, EventPool};

/// A row that was skipped or partially accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowWarning {
    /// Zero-based position of the row in the payload.
    pub index: usize,
    pub message: String,
}

/// The result of parsing a payload: the usable events plus anything noteworthy.
#[derive(Debug, Clone, Default)]
pub struct ParsedPool {
    pub pool: EventPool,
    pub warnings: Vec<RowWarning>,
}

/// Parse a JSON string into events.
pub fn parse_payload_str(content: &str) -> Result<ParsedPool, SourceError> {
    let value: Value = serde_json::from_str(content)
        .map_err(|e| SourceError::Malformed(format!("invalid JSON: {e}")))?;
    parse_payload(&value)
}

/// Parse an already-decoded JSON payload into events.
pub fn parse_payload(value: &Value) -> Result<ParsedPool, SourceError> {
    let rows = match value {
        Value::Array(rows) => rows,
        Value::Object(map) => {
            if let Some(err) = map.get("error") {
                let message = match err {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                return Err(SourceError::Remote(message));
            }
            return Err(SourceError::Malformed(
                "expected an array of events, got an object".into(),
            ));
        }
        other => {
            return Err(SourceError::Malformed(format!(
                "expected an array of events, got {}",
                json_kind(other)
            )))
        }
    };

    let mut events = Vec::with_capacity(rows.len());
    let mut warnings = Vec::new();

    for (index, row) in rows.iter().enumerate() {
        let mut warn = |message: String| {
            tracing::warn!("row {index}: {message}");
            warnings.push(RowWarning { index, message });
        };

        match parse_row(row) {
            Ok((event, notes)) => {
                for note in notes {
                    warn(note);
                }
                events.push(event);
            }
            Err(message) => warn(format!("skipped: {message}")),
        }
    }

    tracing::debug!(
        "parsed {} events ({} warnings) from {} rows",
        events.len(),
        warnings.len(),
        rows.len()
    );

    Ok(ParsedPool {
        pool: EventPool::new(events),
        warnings,
    })
}

/// Parse one row. Returns the event plus non-fatal notes, or the reason the
/// row was rejected.
fn parse_row(row: &Value) -> Result<(Event, Vec<String>), String> {
    let cells = row
        .as_array()
        .ok_or_else(|| format!("expected an array, got {}", json_kind(row)))?;
    if cells.len() < 2 {
        return Err(format!("expected at least 2 columns, got {}", cells.len()));
    }

    let label = cells[0]
        .as_str()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or("label must be a non-empty string")?
        .to_string();

    let year = whole_number(&cells[1])
        .ok_or("year must be a whole number")?
        .ok_or("year is missing")?;
    let year = i32::try_from(year).map_err(|_| format!("year {year} is out of range"))?;
    if year == 0 {
        return Err("year 0 does not exist".into());
    }

    let mut notes = Vec::new();

    let month = optional_part(cells.get(2), "month", 1..=12, &mut notes);
    let day = optional_part(cells.get(3), "day", 1..=31, &mut notes);
    let day = match (month, day) {
        (None, Some(_)) => {
            notes.push("day given without a month; ignoring it".into());
            None
        }
        (_, day) => day,
    };

    let tags = match cells.get(4) {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::String(s)) => split_tags(s),
        Some(other) => {
            notes.push(format!("tags must be a string, got {}", json_kind(other)));
            Vec::new()
        }
    };

    Ok((
        Event {
            label,
            year,
            month,
            day,
            tags,
        },
        notes,
    ))
}

/// Read an optional month/day cell. Blank cells are absent; out-of-range or
/// non-numeric values are dropped with a note.
fn optional_part(
    cell: Option<&Value>,
    name: &str,
    range: std::ops::RangeInclusive<i64>,
    notes: &mut Vec<String>,
) -> Option<u8> {
    let cell = cell?;
    match whole_number(cell) {
        Some(Some(n)) if range.contains(&n) => u8::try_from(n).ok(),
        Some(Some(n)) => {
            notes.push(format!("{name} {n} is out of range; ignoring it"));
            None
        }
        Some(None) => None,
        None => {
            notes.push(format!("{name} must be a number, got {}", json_kind(cell)));
            None
        }
    }
}

/// Interpret a cell as a whole number.
///
/// `Some(Some(n))` for a number, `Some(None)` for null or an empty string,
/// `None` if the cell holds something else. Spreadsheet exports turn every
/// number into a float, so floats without a fractional part are accepted.
fn whole_number(value: &Value) -> Option<Option<i64>> {
    match value {
        Value::Null => Some(None),
        Value::String(s) if s.trim().is_empty() => Some(None),
        Value::String(s) => s.trim().parse::<i64>().ok().map(Some),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Some(Some(i))
            } else {
                let f = n.as_f64()?;
                if f.fract() == 0.0 && f.abs() < i64::MAX as f64 {
                    Some(Some(f as i64))
                } else {
                    None
                }
            }
        }
        _ => None,
    }
}

/// Split a comma-joined tag string into trimmed, non-empty tags.
pub fn split_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(String::from)
        .collect()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_full_rows() {
        let payload = json!([
            ["Assassination of Julius Caesar", -44, 3, 15, "Rome, politics"],
            ["Moon landing", 1969, 7, 20, "space"],
            ["Fall of Constantinople", 1453, null, null, null]
        ]);
        let parsed = parse_payload(&payload).unwrap();
        assert_eq!(parsed.pool.len(), 3);
        assert!(parsed.warnings.is_empty());

        let caesar = &parsed.pool.events()[0];
        assert_eq!(caesar.year, -44);
        assert_eq!(caesar.month, Some(3));
        assert_eq!(caesar.day, Some(15));
        assert_eq!(caesar.tags, vec!["Rome", "politics"]);

        let constantinople = &parsed.pool.events()[2];
        assert_eq!(constantinople.month, None);
        assert!(constantinople.tags.is_empty());
    }

    #[test]
    fn error_object_is_remote_failure() {
        let payload = json!({"error": "Sheet not found"});
        let err = parse_payload(&payload).unwrap_err();
        assert!(matches!(err, SourceError::Remote(ref m) if m == "Sheet not found"));
    }

    #[test]
    fn non_array_is_malformed() {
        assert!(matches!(
            parse_payload(&json!({"events": []})),
            Err(SourceError::Malformed(_))
        ));
        assert!(matches!(
            parse_payload(&json!("nope")),
            Err(SourceError::Malformed(_))
        ));
        assert!(matches!(
            parse_payload_str("not json"),
            Err(SourceError::Malformed(_))
        ));
    }

    #[test]
    fn bad_rows_are_skipped_with_warnings() {
        let payload = json!([
            ["Good", 1000],
            ["", 1000],
            ["No year", null],
            ["Zero", 0],
            ["Fraction", 1000.5],
            "not a row",
            ["Short"]
        ]);
        let parsed = parse_payload(&payload).unwrap();
        assert_eq!(parsed.pool.len(), 1);
        let skipped: Vec<usize> = parsed.warnings.iter().map(|w| w.index).collect();
        assert_eq!(skipped, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn spreadsheet_style_values() {
        let payload = json!([["Float year", 1815.0, 6.0, 18.0, ""], ["Blank cells", 1492, "", "", ""]]);
        let parsed = parse_payload(&payload).unwrap();
        assert!(parsed.warnings.is_empty());
        let waterloo = &parsed.pool.events()[0];
        assert_eq!(waterloo.year, 1815);
        assert_eq!(waterloo.month, Some(6));
        assert_eq!(waterloo.day, Some(18));
        assert!(waterloo.tags.is_empty());
        assert_eq!(parsed.pool.events()[1].month, None);
    }

    #[test]
    fn out_of_range_date_parts_degrade() {
        let payload = json!([
            ["Bad month", 1700, 13, 2, null],
            ["Bad day", 1700, 2, 40, null],
            ["Day only", 1700, null, 9, null]
        ]);
        let parsed = parse_payload(&payload).unwrap();
        assert_eq!(parsed.pool.len(), 3);
        assert_eq!(parsed.warnings.len(), 4);

        let events = parsed.pool.events();
        assert_eq!(events[0].display_date(), "1700 AD");
        assert_eq!(events[1].month, Some(2));
        assert_eq!(events[1].day, None);
        assert_eq!(events[2].day, None);
    }

    #[test]
    fn split_tags_trims_and_drops_empties() {
        assert_eq!(split_tags(" war ,, Europe ,"), vec!["war", "Europe"]);
        assert!(split_tags("  ").is_empty());
    }
}
