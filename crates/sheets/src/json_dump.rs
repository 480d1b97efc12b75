use crate::SheetError;
use bulletin::ExtractedBulletin;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Dumps the model's answer exactly as returned, pretty-printed.
pub fn write_json(extracted: &ExtractedBulletin, path: &Path) -> Result<(), SheetError> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, &extracted.data)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}
