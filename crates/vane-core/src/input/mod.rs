//! Headline extraction from files and pasted text.
//!
//! Every loader returns a flat ordered list of trimmed, non-empty strings.
//! A failed load never touches the caller's current headline list; errors
//! carry a message naming the unsupported structure or type.

pub mod error;


pub use error::InputError;

use std::path::Path;

use serde_json::Value;

/// Tabular column names probed in priority order.
const HEADLINE_COLUMNS: [&str; 4] = ["headline", "headlines", "title", "text"];

/// Per-record fields probed in priority order for arrays of JSON objects.
const HEADLINE_FIELDS: [&str; 3] = ["headline", "title", "text"];

/// Extracts headlines from a payload, dispatching on the file name suffix.
pub fn load_headlines(name: &str, bytes: &[u8]) -> Result<Vec<String>, InputError> {
    let lower = name.to_ascii_lowercase();
    if lower.ends_with(".txt") {
        Ok(headlines_from_text(&String::from_utf8_lossy(bytes)))
    } else if lower.ends_with(".csv") {
        Ok(headlines_from_csv(&String::from_utf8_lossy(bytes)))
    } else if lower.ends_with(".json") {
        headlines_from_json(bytes)
    } else {
        Err(InputError::UnsupportedType {
            name: name.to_string(),
        })
    }
}

/// Reads a file and extracts headlines from it.
pub fn load_headlines_from_path(path: &Path) -> Result<Vec<String>, InputError> {
    let bytes = std::fs::read(path).map_err(|source| InputError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();
    load_headlines(name, &bytes)
}

/// One headline per non-blank line. Also used for bulk-pasted text.
pub fn headlines_from_text(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}

fn headlines_from_csv(text: &str) -> Vec<String> {
    let rows = parse_delimited(text);
    let Some(header) = rows.first() else {
        return Vec::new();
    };

    let column = HEADLINE_COLUMNS
        .iter()
        .find_map(|name| header.iter().position(|cell| cell == name))
        // No recognized column: fall back to the first one.
        .unwrap_or(0);

    rows[1..]
        .iter()
        .filter_map(|row| row.get(column))
        .map(|cell| cell.trim())
        .filter(|cell| !cell.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}

/// Minimal RFC 4180 reader: quoted fields, doubled quotes, embedded commas
/// and newlines. The pack carries no CSV crate, and headline tables need
/// nothing more.
fn parse_delimited(text: &str) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    let mut row: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;

    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if in_quotes {
            if c == '"' {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    field.push('"');
                } else {
                    in_quotes = false;
                }
            } else {
                field.push(c);
            }
            continue;
        }
        match c {
            '"' if field.is_empty() => in_quotes = true,
            ',' => row.push(std::mem::take(&mut field)),
            '\r' => {}
            '\n' => {
                row.push(std::mem::take(&mut field));
                rows.push(std::mem::take(&mut row));
            }
            _ => field.push(c),
        }
    }
    if !field.is_empty() || !row.is_empty() {
        row.push(field);
        rows.push(row);
    }

    // Blank lines parse as a single empty field; drop them.
    rows.retain(|r| !(r.len() == 1 && r[0].is_empty()));
    rows
}

fn headlines_from_json(bytes: &[u8]) -> Result<Vec<String>, InputError> {
    let data: Value = serde_json::from_slice(bytes)?;

    if let Some(list) = data.get("headlines").and_then(Value::as_array) {
        return Ok(collect_strings(list));
    }

    if let Value::Array(items) = &data {
        // An empty array satisfies the all-strings probe vacuously.
        if items.iter().all(Value::is_string) {
            return Ok(collect_strings(items));
        }
        if items.iter().all(Value::is_object) {
            let mut out = Vec::new();
            for item in items {
                let Some(map) = item.as_object() else { continue };
                for key in HEADLINE_FIELDS {
                    let Some(text) = map.get(key).and_then(Value::as_str) else {
                        continue;
                    };
                    let text = text.trim();
                    // A present-but-blank field falls through to the next
                    // candidate; records with no usable field are skipped.
                    if !text.is_empty() {
                        out.push(text.to_string());
                        break;
                    }
                }
            }
            return Ok(out);
        }
    }

    Err(InputError::UnsupportedStructure {
        reason: "expected {\"headlines\": [...]}, an array of strings, or an array of records"
            .to_string(),
    })
}

fn collect_strings(items: &[Value]) -> Vec<String> {
    items
        .iter()
        .filter_map(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}
