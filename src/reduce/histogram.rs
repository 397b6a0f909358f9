//! Hour-of-day activity histogram.

use chrono::{NaiveDateTime, Timelike};

/// Beacon counts per hour of day (0-23), in source time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HourHistogram {
    counts: [usize; 24],
}

impl HourHistogram {
    /// Counts one timestamp.
    pub fn record(&mut self, timestamp: &NaiveDateTime) {
        self.counts[timestamp.hour() as usize] += 1;
    }

    /// Count for `hour`; hours above 23 have none.
    pub fn count(&self, hour: usize) -> usize {
        self.counts.get(hour).copied().unwrap_or(0)
    }

    /// Total number of recorded timestamps.
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Renders one line per non-empty hour, `"HH: ooo (n)"`.
    ///
    /// The busiest hour gets a bar of `width` characters and the others are
    /// scaled and rounded relative to it. Any non-empty hour gets at least one
    /// character so that it stays visible next to a much busier one.
    pub fn render(&self, width: usize) -> Vec<String> {
        let max = self.counts.iter().copied().max().unwrap_or(0);
        if max == 0 {
            return Vec::new();
        }
        self.counts
            .iter()
            .enumerate()
            .filter(|(_, &count)| count > 0)
            .map(|(hour, &count)| {
                let bar = "o".repeat(bar_width(count, max, width));
                format!("{:2}: {} ({})", hour, bar, count)
            })
            .collect()
    }
}

fn bar_width(count: usize, max: usize, width: usize) -> usize {
    // Rounded integer division: round(count * width / max)
    let scaled = (count * width * 2 + max) / (max * 2);
    scaled.max(1)
}
