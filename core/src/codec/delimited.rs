//! Single-column delimited text (CSV, TSV) and plain line lists.

use crate::codec::Records;
use crate::error::CodecError;

const QUOTE: char = '"';
const COMMENT: char = '#';
const BYTE_ORDER_MARK: char = '\u{feff}';

/// Writes an optional header followed by one value per line.
pub(super) fn write(values: &[String], header: Option<&str>, delimiter: u8) -> Vec<u8> {
    let delimiter = char::from(delimiter);
    let mut out = String::new();

    for cell in header.into_iter().chain(values.iter().map(String::as_str)) {
        out.push_str(&quote(cell, delimiter));
        out.push('\n');
    }
    out.into_bytes()
}

/// Reads the cells of the `column` column, skipping blanks.
pub(super) fn read(text: &str, column: &str, delimiter: u8) -> Result<Records, CodecError> {
    let delimiter = char::from(delimiter);
    let text = text.trim_start_matches(BYTE_ORDER_MARK);
    let mut lines = text.lines().filter(|line| !line.trim().is_empty());

    let header = lines
        .next()
        .map(|line| split_record(line, delimiter))
        .unwrap_or_default();
    let index = header
        .iter()
        .position(|name| name.trim() == column)
        .ok_or_else(|| CodecError::MissingColumn(column.to_string()))?;

    let values = lines
        .filter_map(|line| split_record(line, delimiter).into_iter().nth(index))
        .map(|cell| cell.trim().to_string())
        .filter(|cell| !cell.is_empty())
        .collect();

    Ok(Records {
        values,
        ranges: Vec::new(),
    })
}

/// Reads one value per line, ignoring blank lines and `#` comments.
pub(super) fn read_lines(text: &str) -> Records {
    let values = text
        .trim_start_matches(BYTE_ORDER_MARK)
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with(COMMENT))
        .map(str::to_string)
        .collect();

    Records {
        values,
        ranges: Vec::new(),
    }
}

fn quote(cell: &str, delimiter: char) -> String {
    if cell.contains(delimiter) || cell.contains(QUOTE) || cell.contains('\n') {
        format!("{QUOTE}{}{QUOTE}", cell.replace(QUOTE, "\"\""))
    } else {
        cell.to_string()
    }
}

/// Splits one record, honouring double-quoted cells with `""` escapes.
fn split_record(line: &str, delimiter: char) -> Vec<String> {
    let mut cells = Vec::new();
    let mut cell = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            QUOTE if in_quotes && chars.peek() == Some(&QUOTE) => {
                cell.push(QUOTE);
                chars.next();
            }
            QUOTE => in_quotes = !in_quotes,
            c if c == delimiter && !in_quotes => cells.push(std::mem::take(&mut cell)),
            c => cell.push(c),
        }
    }
    cells.push(cell);
    cells
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
