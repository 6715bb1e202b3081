//! Run log schema: blocks, extracted events and the per-run summary record.

use std::fmt;

/// Line that opens every run block.
pub const BOOT_MARKER: &str = "BOOT transition underway";

/// One run block in chronological order, boot marker line first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunBlock {
    lines: Vec<String>,
}

impl RunBlock {
    /// Build a block from lines gathered newest-first.
    pub fn from_reversed(mut lines: Vec<String>) -> Self {
        lines.reverse();
        RunBlock { lines }
    }

    pub fn from_lines(lines: Vec<String>) -> Self {
        RunBlock { lines }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Epoch seconds and `MM/DD/YYYY HH:MM` rendering of one log timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stamp {
    /// Unix seconds in the local zone, absent when the local time does not exist
    pub epoch: Option<i64>,
    /// Minute-truncated rendering
    pub minute: String,
}

/// Field carried by a single marker line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunField {
    BootStart(Stamp),
    BootComplete(Stamp),
    ConfigTransition(Stamp),
    ConfigName(String),
    ConfigComplete(Stamp),
    RunNumber(String),
    RunStart(Stamp),
    RunStop(Stamp),
    RunRecovered(Stamp),
    RunTerminated(Stamp),
}

impl RunField {
    /// Report label, padded so the colons line up.
    pub fn label(&self) -> &'static str {
        match self {
            RunField::BootStart(_) => "BOOT start time         ",
            RunField::BootComplete(_) => "BOOT complete time      ",
            RunField::ConfigTransition(_) => "CONFIG transition time  ",
            RunField::ConfigName(_) => "Config                  ",
            RunField::ConfigComplete(_) => "CONFIG complete time    ",
            RunField::RunNumber(_) => "Run number              ",
            RunField::RunStart(_) => "Run START timestamp     ",
            RunField::RunStop(_) => "Run END timestamp       ",
            RunField::RunRecovered(_) => "Run RECOVERED timestamp ",
            RunField::RunTerminated(_) => "Run TERMINATED timestamp",
        }
    }

    pub fn stamp(&self) -> Option<&Stamp> {
        match self {
            RunField::BootStart(s)
            | RunField::BootComplete(s)
            | RunField::ConfigTransition(s)
            | RunField::ConfigComplete(s)
            | RunField::RunStart(s)
            | RunField::RunStop(s)
            | RunField::RunRecovered(s)
            | RunField::RunTerminated(s) => Some(s),
            RunField::ConfigName(_) | RunField::RunNumber(_) => None,
        }
    }
}

/// A field together with the block line it came from (0-based).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunEvent {
    pub line: usize,
    pub field: RunField,
}

/// How the extractor treats a marker line whose timestamp or number is missing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExtractMode {
    /// Fail the whole invocation
    #[default]
    Strict,
    /// Log and skip the line
    Lenient,
}

/// Summary of one run block, rendered as a one-line log summary.
///
/// Every field is optional; only the present ones are printed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunRecord {
    boot_start: Option<Stamp>,
    boot_complete: Option<Stamp>,
    config_transition_start: Option<Stamp>,
    config_name: Option<String>,
    config_complete: Option<Stamp>,
    run_number: Option<String>,
    run_start: Option<Stamp>,
    run_stop: Option<Stamp>,
    run_recovered: Option<Stamp>,
    run_terminated: Option<Stamp>,
}

impl RunRecord {
    /// Fold events in order; a repeated field keeps the latest value.
    pub fn from_events(events: &[RunEvent]) -> Self {
        let mut record = RunRecord::default();
        for event in events {
            match event.field.clone() {
                RunField::BootStart(s) => record.boot_start = Some(s),
                RunField::BootComplete(s) => record.boot_complete = Some(s),
                RunField::ConfigTransition(s) => record.config_transition_start = Some(s),
                RunField::ConfigName(name) => record.config_name = Some(name),
                RunField::ConfigComplete(s) => record.config_complete = Some(s),
                RunField::RunNumber(n) => record.run_number = Some(n),
                RunField::RunStart(s) => record.run_start = Some(s),
                RunField::RunStop(s) => record.run_stop = Some(s),
                RunField::RunRecovered(s) => record.run_recovered = Some(s),
                RunField::RunTerminated(s) => record.run_terminated = Some(s),
            }
        }
        record
    }
}

impl fmt::Display for RunRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn minute(s: &Option<Stamp>) -> Option<&str> {
            s.as_ref().map(|s| s.minute.as_str())
        }
        let parts = [
            ("run", self.run_number.as_deref()),
            ("config", self.config_name.as_deref()),
            ("boot", minute(&self.boot_start)),
            ("booted", minute(&self.boot_complete)),
            ("configuring", minute(&self.config_transition_start)),
            ("configured", minute(&self.config_complete)),
            ("start", minute(&self.run_start)),
            ("stop", minute(&self.run_stop)),
            ("recovered", minute(&self.run_recovered)),
            ("terminated", minute(&self.run_terminated)),
        ];
        let mut first = true;
        for (key, value) in parts {
            let Some(value) = value else { continue };
            if !first {
                f.write_str(" ")?;
            }
            first = false;
            write!(f, "{key}={value}")?;
        }
        if first {
            f.write_str("empty")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stamp(minute: &str) -> Stamp {
        Stamp { epoch: Some(0), minute: minute.to_string() }
    }

    #[test]
    fn test_block_from_reversed_restores_order() {
        let block = RunBlock::from_reversed(vec!["c".into(), "b".into(), BOOT_MARKER.into()]);
        assert_eq!(block.lines(), [BOOT_MARKER, "b", "c"]);
        assert_eq!(block.len(), 3);
    }

    #[test]
    fn test_record_keeps_latest_value() {
        let events = vec![
            RunEvent { line: 0, field: RunField::RunNumber("10".into()) },
            RunEvent { line: 3, field: RunField::RunStart(stamp("01/01/2024 10:00")) },
            RunEvent { line: 7, field: RunField::RunNumber("11".into()) },
        ];
        let record = RunRecord::from_events(&events);
        assert_eq!(record.to_string(), "run=11 start=01/01/2024 10:00");
    }

    #[test]
    fn test_record_summary_lists_present_fields() {
        let events = vec![
            RunEvent { line: 0, field: RunField::BootStart(stamp("01/01/2024 09:00")) },
            RunEvent { line: 2, field: RunField::ConfigName("demo".into()) },
            RunEvent { line: 9, field: RunField::RunTerminated(stamp("01/01/2024 12:30")) },
        ];
        assert_eq!(
            RunRecord::from_events(&events).to_string(),
            "config=demo boot=01/01/2024 09:00 terminated=01/01/2024 12:30"
        );
        assert_eq!(RunRecord::from_events(&[]).to_string(), "empty");
    }

    #[test]
    fn test_labels_align() {
        let fields = [
            RunField::BootStart(stamp("")),
            RunField::ConfigName(String::new()),
            RunField::RunTerminated(stamp("")),
        ];
        for field in fields {
            assert_eq!(field.label().len(), 24);
        }
    }
}
