//! Parsing identifier lists into (identifier, quantity) pairs
//!
//! Three text formats are accepted:
//!
//! - **Manual**: one `ID` or `ID,QTY` per line
//! - **Csv**: `ID,QTY` rows with optional quotes and an optional header row
//! - **Legacy**: an identifier line followed by its quantity line
//!
//! Parsing is lenient: a missing, malformed or non-positive quantity becomes
//! 1, and blank lines or empty identifiers are skipped. The strict checks
//! happen later when the pairs are built into a [`crate::LabelJob`].

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Text layout of an identifier list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputFormat {
    #[default]
    Manual,
    Csv,
    Legacy,
}

/// Identifier column names recognized in a CSV header row
const ID_HEADERS: &[&str] = &["id", "wire", "wire id", "wire_id", "label", "identifier", "name"];

fn parse_quantity(raw: &str) -> u32 {
    match raw.trim().parse::<i64>() {
        Ok(qty) if qty >= 1 => u32::try_from(qty).unwrap_or(u32::MAX),
        _ => 1,
    }
}

fn push_pair(pairs: &mut Vec<(String, u32)>, id: &str, qty: u32) {
    let id = id.trim();
    if id.is_empty() {
        return;
    }
    trace!("Parsed '{}' x{}", id, qty);
    pairs.push((id.to_string(), qty));
}

/// Parse `ID` or `ID,QTY` lines. The line is split at the first comma only.
pub fn parse_manual(text: &str) -> Vec<(String, u32)> {
    let mut pairs = Vec::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match line.split_once(',') {
            Some((id, qty)) => push_pair(&mut pairs, id, parse_quantity(qty)),
            None => push_pair(&mut pairs, line, 1),
        }
    }
    debug!("Parsed {} manual entries", pairs.len());
    pairs
}

/// Split one CSV record, honoring double quotes and `""` escapes
fn split_record(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                field.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(std::mem::take(&mut field)),
            _ => field.push(ch),
        }
    }
    fields.push(field);
    fields
}

fn is_header(fields: &[String]) -> bool {
    let Some(first) = fields.first() else {
        return false;
    };
    let qty_is_numeric = fields
        .get(1)
        .is_some_and(|qty| qty.trim().parse::<i64>().is_ok());
    !qty_is_numeric && ID_HEADERS.contains(&first.trim().to_ascii_lowercase().as_str())
}

/// Parse CSV rows of identifier and quantity; extra columns are ignored
pub fn parse_csv(text: &str) -> Vec<(String, u32)> {
    let mut pairs = Vec::new();
    let mut first_row = true;

    for line in text.lines() {
        if line.trim().is_empty() {
            continue;
        }
        let fields = split_record(line);
        if std::mem::take(&mut first_row) && is_header(&fields) {
            trace!("Skipping CSV header {:?}", fields);
            continue;
        }
        let qty = fields.get(1).map_or(1, |raw| parse_quantity(raw));
        if let Some(id) = fields.first() {
            push_pair(&mut pairs, id, qty);
        }
    }
    debug!("Parsed {} CSV rows", pairs.len());
    pairs
}

/// Parse alternating identifier and quantity lines; a trailing identifier
/// without a quantity line prints once
pub fn parse_legacy(text: &str) -> Vec<(String, u32)> {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    let mut pairs = Vec::new();
    for chunk in lines.chunks(2) {
        let qty = chunk.get(1).map_or(1, |raw| parse_quantity(raw));
        push_pair(&mut pairs, chunk[0], qty);
    }
    debug!("Parsed {} legacy entries", pairs.len());
    pairs
}

pub fn parse_input(text: &str, format: InputFormat) -> Vec<(String, u32)> {
    match format {
        InputFormat::Manual => parse_manual(text),
        InputFormat::Csv => parse_csv(text),
        InputFormat::Legacy => parse_legacy(text),
    }
}
