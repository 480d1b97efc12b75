use crate::SheetError;
use bulletin::{Cell, FlattenedBulletin, Table};
use rust_xlsxwriter::{ColNum, Format, RowNum, Workbook, Worksheet, XlsxError};
use std::path::Path;
use tracing::debug;

/// Excel's limit on worksheet name length.
pub const MAX_SHEET_NAME_CHARS: usize = 31;
/// Excel's limit on characters in a single cell.
pub const MAX_CELL_CHARS: usize = 32_767;

/// Writes all sheets, metadata first, with a bold header row.
pub fn write_workbook(flattened: &FlattenedBulletin, path: &Path) -> Result<(), SheetError> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();

    for table in flattened.sheets() {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(sheet_name(&table.name))?;
        write_table(worksheet, table, &header_format)?;
        debug!("Wrote sheet '{}' with {} rows.", table.name, table.rows.len());
    }

    workbook.save(path)?;
    Ok(())
}

fn write_table(
    worksheet: &mut Worksheet,
    table: &Table,
    header_format: &Format,
) -> Result<(), SheetError> {
    for (col, header) in table.headers.iter().enumerate() {
        let (row, col) = position(0, col)?;
        worksheet.write_string_with_format(row, col, clamp(header), header_format)?;
    }

    for (row_idx, cells) in table.rows.iter().enumerate() {
        for (col, cell) in cells.iter().enumerate() {
            let (row, col) = position(row_idx + 1, col)?;
            match cell {
                Cell::Empty => {}
                Cell::Text(text) => {
                    worksheet.write_string(row, col, clamp(text))?;
                }
                Cell::Number(n) => {
                    worksheet.write_number(row, col, *n)?;
                }
                Cell::Bool(b) => {
                    worksheet.write_boolean(row, col, *b)?;
                }
            }
        }
    }

    worksheet.set_freeze_panes(1, 0)?;
    worksheet.autofit();
    Ok(())
}

/// Converts zero-based indices to worksheet coordinates, failing instead of
/// wrapping when they exceed what the file format can address.
fn position(row: usize, col: usize) -> Result<(RowNum, ColNum), SheetError> {
    let row = RowNum::try_from(row).map_err(|_| XlsxError::RowColumnLimitError)?;
    let col = ColNum::try_from(col).map_err(|_| XlsxError::RowColumnLimitError)?;
    Ok((row, col))
}

/// Makes a table name acceptable to Excel: forbidden characters become `_`
/// and the result is cut to 31 characters.
pub fn sheet_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| match c {
            '[' | ']' | ':' | '*' | '?' | '/' | '\\' => '_',
            other => other,
        })
        .take(MAX_SHEET_NAME_CHARS)
        .collect();
    if cleaned.trim().is_empty() {
        "Sheet".to_string()
    } else {
        cleaned
    }
}

fn clamp(text: &str) -> &str {
    match text.char_indices().nth(MAX_CELL_CHARS) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sheet_names_are_sanitized_and_clamped() {
        assert_eq!(sheet_name("Parts"), "Parts");
        assert_eq!(sheet_name("a/b:c"), "a_b_c");
        assert_eq!(sheet_name(&"x".repeat(40)).len(), MAX_SHEET_NAME_CHARS);
        assert_eq!(sheet_name("  "), "Sheet");
    }

    #[test]
    fn positions_beyond_the_address_space_are_errors() {
        assert_eq!(position(2, 3).unwrap(), (2, 3));
        assert!(matches!(
            position(0, 70_000),
            Err(SheetError::Xlsx(XlsxError::RowColumnLimitError))
        ));
    }

    #[test]
    fn oversized_tables_fail_to_write() {
        let table = Table {
            name: "Wide".to_string(),
            headers: (0..70_000).map(|i| format!("c{i}")).collect(),
            rows: Vec::new(),
        };
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();

        let result = write_table(worksheet, &table, &Format::new());

        assert!(matches!(result, Err(SheetError::Xlsx(_))));
    }

    #[test]
    fn long_cells_are_clamped_on_char_boundaries() {
        let long = "é".repeat(MAX_CELL_CHARS + 5);
        assert_eq!(clamp(&long).chars().count(), MAX_CELL_CHARS);
        assert_eq!(clamp("short"), "short");
    }
}
