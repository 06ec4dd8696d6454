//! XLSX workbooks: one worksheet, header in `A1`, values below it.
//!
//! Reading uses the first worksheet and locates the column by its header,
//! the same way the delimited reader does.

use std::io::Cursor;

use calamine::{Data, Reader, Xlsx};
use rust_xlsxwriter::Workbook;

use crate::codec::Records;
use crate::error::CodecError;

/// Rows available in a worksheet, header included.
const MAX_ROWS: usize = 1_048_576;

pub(super) fn write(values: &[String], column: &str) -> Result<Vec<u8>, CodecError> {
    if values.len() >= MAX_ROWS {
        return Err(CodecError::TooManyRows(values.len()));
    }

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.write_string(0, 0, column)?;

    for (row, value) in (1u32..).zip(values) {
        worksheet.write_string(row, 0, value.as_str())?;
    }

    Ok(workbook.save_to_buffer()?)
}

/// Reads the cells under the `column` header, skipping blanks.
pub(super) fn read(bytes: &[u8], column: &str) -> Result<Records, CodecError> {
    let missing = || CodecError::MissingColumn(column.to_string());

    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes))?;
    let sheet = workbook.worksheet_range_at(0).ok_or_else(missing)??;

    let mut rows = sheet.rows();
    let index = rows
        .next()
        .and_then(|header| {
            header
                .iter()
                .position(|cell| cell_text(cell).as_deref() == Some(column))
        })
        .ok_or_else(missing)?;

    let values = rows
        .filter_map(|row| row.get(index))
        .filter_map(cell_text)
        .collect();

    Ok(Records {
        values,
        ranges: Vec::new(),
    })
}

fn cell_text(cell: &Data) -> Option<String> {
    let text = match cell {
        Data::Empty => return None,
        Data::String(s) => s.trim().to_string(),
        other => other.to_string().trim().to_string(),
    };
    (!text.is_empty()).then_some(text)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
