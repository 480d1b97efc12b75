use crate::{xlsx::sheet_name, SheetError};
use bulletin::{FlattenedBulletin, Table};
use std::path::{Path, PathBuf};

/// Writes one CSV per sheet as `{stem}_{sheet}.csv` and returns their paths.
pub fn write_csv(
    flattened: &FlattenedBulletin,
    out_dir: &Path,
    stem: &str,
) -> Result<Vec<PathBuf>, SheetError> {
    flattened
        .sheets()
        .map(|table| {
            let path = out_dir.join(format!("{stem}_{}.csv", sheet_name(&table.name)));
            write_table(table, &path)?;
            Ok(path)
        })
        .collect()
}

fn write_table(table: &Table, path: &Path) -> Result<(), SheetError> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(&table.headers)?;
    for row in &table.rows {
        writer.write_record(row.iter().map(|cell| cell.to_string()))?;
    }
    writer.flush()?;
    Ok(())
}
