//! JSON lines output.

use std::io::Write;

use anyhow::Result;

use crate::beacon::BeaconRecord;

/// Writes each record as one JSON object per line.
///
/// Returns the number of records written.
pub fn write_jsonl<'a, W, I>(mut writer: W, records: I) -> Result<usize>
where
    W: Write,
    I: IntoIterator<Item = &'a BeaconRecord>,
{
    let mut written = 0;
    for record in records {
        serde_json::to_writer(&mut writer, record)?;
        writeln!(writer)?;
        written += 1;
    }
    writer.flush()?;
    Ok(written)
}
