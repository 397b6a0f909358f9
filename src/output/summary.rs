//! Human-readable summary output.
//!
//! Layout:
//!
//! ```text
//! | Timestamp  | IP           | URL          |
//! |------------|--------------|--------------|
//! | 2023-01-15 | 198.51.100.7 | evil.example |
//!
//! User-Agents:
//!     Mozilla/5.0 (Windows NT 10.0; Win64; x64)
//!
//! First Active: 2023-01-15 08:00:00
//! Last Active: 2023-01-15 08:00:00
//!
//! Time of day histogram:
//!  8: oooooooooooooooooooooooooooooooooooooooooooooooooooooooooooooooooooooo (1)
//! ```

use std::io::{self, Write};

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::beacon::format_timestamp;
use crate::config::{ABSENT_PLACEHOLDER, HISTOGRAM_WIDTH};
use crate::reduce::{Summary, TableRow};

#[derive(Tabled)]
struct DisplayRow<'a> {
    #[tabled(rename = "Timestamp")]
    date: &'a str,
    #[tabled(rename = "IP")]
    actor_ip: &'a str,
    #[tabled(rename = "URL")]
    c2: &'a str,
}

impl<'a> From<&'a TableRow> for DisplayRow<'a> {
    fn from(row: &'a TableRow) -> Self {
        Self {
            date: &row.date,
            actor_ip: row.actor_ip.as_deref().unwrap_or(ABSENT_PLACEHOLDER),
            c2: row.c2.as_deref().unwrap_or(ABSENT_PLACEHOLDER),
        }
    }
}

/// Renders the deduplicated table in markdown style.
pub fn render_table(rows: &[TableRow]) -> String {
    let rows: Vec<DisplayRow<'_>> = rows.iter().map(DisplayRow::from).collect();
    Table::new(rows).with(Style::markdown()).to_string()
}

/// Writes the full summary: table, user agents, activity range, histogram.
pub fn write_summary<W: Write>(mut writer: W, summary: &Summary) -> io::Result<()> {
    writeln!(writer, "{}", render_table(&summary.rows))?;

    if !summary.user_agents.is_empty() {
        writeln!(writer)?;
        writeln!(writer, "User-Agents:")?;
        for user_agent in &summary.user_agents {
            writeln!(writer, "    {}", user_agent)?;
        }
        if summary.user_agents_truncated {
            writeln!(writer, "    ...")?;
        }
    }

    if let (Some(first), Some(last)) = (&summary.first_active, &summary.last_active) {
        writeln!(writer)?;
        writeln!(writer, "First Active: {}", format_timestamp(first))?;
        writeln!(writer, "Last Active: {}", format_timestamp(last))?;
        writeln!(writer)?;
        writeln!(writer, "Time of day histogram:")?;
        for line in summary.histogram.render(HISTOGRAM_WIDTH) {
            writeln!(writer, "{}", line)?;
        }
    }

    writer.flush()
}
