// Newline-delimited JSON event stream reader

use super::RunnerEvent;
use anyhow::{Context, Result};
use std::io::BufRead;

/// Decode every event in the stream. Blank lines are skipped; the first
/// malformed line aborts with its line number.
pub fn read_events<R: BufRead>(reader: R) -> Result<Vec<RunnerEvent>> {
    let mut events = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line_no = index + 1;
        let line = line.with_context(|| format!("Failed to read event line {}", line_no))?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let event = serde_json::from_str(line)
            .with_context(|| format!("Invalid event on line {}", line_no))?;
        events.push(event);
    }

    Ok(events)
}
