//! Result rendering.
//!
//! Two formats are supported:
//! - JSON lines (`--json`): every record, every field
//! - summary (default): a reduced, human-readable view (see [`crate::reduce`])

mod jsonl;
mod summary;

use std::io::Write;

use anyhow::Result;
use log::info;

use crate::beacon::BeaconRecord;
use crate::reduce::Summary;

pub use jsonl::write_jsonl;
pub use summary::{render_table, write_summary};

/// Renders `records` to `writer` in the selected format.
///
/// In summary mode, logs a hint when the summary left data out.
pub fn render<W: Write>(writer: W, records: &[BeaconRecord], json: bool) -> Result<()> {
    if json {
        write_jsonl(writer, records)?;
        return Ok(());
    }

    let summary = Summary::from_records(records);
    write_summary(writer, &summary)?;
    if summary.reduced {
        info!("Some data was reduced for clarity, specify --json to dump everything.");
    }
    Ok(())
}
