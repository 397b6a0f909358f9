//! Result reduction for the human-readable summary.
//!
//! [`Reducer`] consumes beacon records one at a time and keeps only what the
//! summary needs:
//! - table rows, with consecutive repeats of the same (actor IP, C2) pair dropped
//! - the first few distinct user agents
//! - an hour-of-day histogram
//! - first and last activity
//!
//! Whenever something is left out, the summary is flagged as `reduced` so the
//! caller can point the user at `--json`.

mod histogram;

use chrono::NaiveDateTime;

use crate::beacon::{format_date, BeaconRecord};
use crate::config::MAX_DISPLAYED_USER_AGENTS;

pub use histogram::HourHistogram;

/// One row of the summary table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    /// Date of the beacon (`YYYY-MM-DD`)
    pub date: String,
    /// Actor IP address
    pub actor_ip: Option<String>,
    /// C2 URL or identifier
    pub c2: Option<String>,
}

/// Everything the summary output shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    /// Number of records consumed
    pub total_records: usize,
    /// Table rows after deduplication
    pub rows: Vec<TableRow>,
    /// Distinct user agents in first-seen order, at most five
    pub user_agents: Vec<String>,
    /// More distinct user agents exist than are listed
    pub user_agents_truncated: bool,
    /// Beacon counts per hour of day
    pub histogram: HourHistogram,
    /// Earliest timestamp
    pub first_active: Option<NaiveDateTime>,
    /// Latest timestamp
    pub last_active: Option<NaiveDateTime>,
    /// Some data was left out of the summary
    pub reduced: bool,
}

impl Summary {
    /// Reduces a whole record sequence.
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a BeaconRecord>,
    {
        let mut reducer = Reducer::new();
        for record in records {
            reducer.push(record);
        }
        reducer.finish()
    }
}

/// Streaming reducer; holds no records, only the running summary.
#[derive(Debug, Default)]
pub struct Reducer {
    summary: Summary,
}

impl Reducer {
    /// Creates an empty reducer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Consumes one record.
    pub fn push(&mut self, record: &BeaconRecord) {
        let summary = &mut self.summary;
        summary.total_records += 1;

        summary.histogram.record(&record.timestamp);
        summary.first_active = Some(match summary.first_active {
            Some(first) => first.min(record.timestamp),
            None => record.timestamp,
        });
        summary.last_active = Some(match summary.last_active {
            Some(last) => last.max(record.timestamp),
            None => record.timestamp,
        });

        if let Some(user_agent) = &record.user_agent {
            if !summary.user_agents.contains(user_agent) {
                if summary.user_agents.len() < MAX_DISPLAYED_USER_AGENTS {
                    summary.user_agents.push(user_agent.clone());
                } else {
                    summary.user_agents_truncated = true;
                    summary.reduced = true;
                }
            }
        }

        let repeats_previous = summary
            .rows
            .last()
            .is_some_and(|prev| prev.actor_ip == record.actor_ip && prev.c2 == record.c2);
        if repeats_previous {
            summary.reduced = true;
        } else {
            summary.rows.push(TableRow {
                date: format_date(&record.timestamp),
                actor_ip: record.actor_ip.clone(),
                c2: record.c2.clone(),
            });
        }
    }

    /// Finishes reduction.
    pub fn finish(self) -> Summary {
        self.summary
    }
}
