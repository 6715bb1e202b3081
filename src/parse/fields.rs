use std::sync::OnceLock;

use regex::Regex;
use tracing::{debug, warn};

use super::timestamp::Timestamp;
use crate::core::{BOOT_MARKER, ExtractMode, RunBlock, RunEvent, RunField, Stamp};
use crate::{RunInfoError, RunInfoResult};

const TIMESTAMP: &str = "timestamp";
const RUN_NUMBER: &str = "trailing run number";

#[derive(Debug, Clone, Copy)]
enum Extract {
    Stamp(fn(Stamp) -> RunField),
    ConfigName,
    RunStart,
}

/// Checked in order; the first marker contained in a line wins.
const MARKERS: &[(&str, Extract)] = &[
    (BOOT_MARKER, Extract::Stamp(RunField::BootStart)),
    ("BOOT transition complete", Extract::Stamp(RunField::BootComplete)),
    ("CONFIG transition underway", Extract::Stamp(RunField::ConfigTransition)),
    ("Config name:", Extract::ConfigName),
    ("CONFIG transition complete", Extract::Stamp(RunField::ConfigComplete)),
    ("START transition complete", Extract::RunStart),
    ("STOP transition complete", Extract::Stamp(RunField::RunStop)),
    ("RECOVER transition complete", Extract::Stamp(RunField::RunRecovered)),
    ("TERMINATE transition complete", Extract::Stamp(RunField::RunTerminated)),
];

static RUN_NUMBER_REGEX: OnceLock<Regex> = OnceLock::new();

fn trailing_number(line: &str) -> Option<&str> {
    RUN_NUMBER_REGEX
        .get_or_init(|| Regex::new(r"(\d+)$").expect("Invalid run number Regex"))
        .find(line.trim_end())
        .map(|m| m.as_str())
}

/// Text between the first and second colon, trimmed.
fn config_name(line: &str) -> String {
    line.split(':').nth(1).unwrap_or_default().trim().to_string()
}

struct LineScan<'a> {
    index: usize,
    line: &'a str,
    marker: &'static str,
    mode: ExtractMode,
}

impl LineScan<'_> {
    /// Resolve a missing sub-pattern: an error in strict mode, a skip otherwise.
    fn require<T>(&self, value: Option<T>, expected: &'static str) -> RunInfoResult<Option<T>> {
        match (value, self.mode) {
            (Some(v), _) => Ok(Some(v)),
            (None, ExtractMode::Strict) => Err(RunInfoError::MissingPattern {
                marker: self.marker,
                expected,
                line: self.line.to_string(),
            }),
            (None, ExtractMode::Lenient) => {
                warn!(line = self.index, marker = self.marker, expected, "skipping incomplete marker line");
                Ok(None)
            }
        }
    }

    fn stamp(&self) -> RunInfoResult<Option<Stamp>> {
        Ok(self.require(Timestamp::find(self.line), TIMESTAMP)?.map(|ts| ts.to_stamp()))
    }
}

/// Extract marker fields from a chronologically ordered block.
///
/// Events come out in line order. A `START transition complete` line yields
/// the run number followed by the start timestamp.
pub fn extract_events(block: &RunBlock, mode: ExtractMode) -> RunInfoResult<Vec<RunEvent>> {
    let mut events = Vec::new();

    for (index, line) in block.lines().iter().enumerate() {
        let Some(&(marker, kind)) = MARKERS.iter().find(|(m, _)| line.contains(m)) else {
            continue;
        };
        let scan = LineScan { index, line, marker, mode };
        let mut push = |field: RunField| events.push(RunEvent { line: index, field });

        match kind {
            Extract::ConfigName => push(RunField::ConfigName(config_name(line))),
            Extract::RunStart => {
                if let Some(number) = scan.require(trailing_number(line), RUN_NUMBER)? {
                    push(RunField::RunNumber(number.to_string()));
                }
                if let Some(s) = scan.stamp()? {
                    push(RunField::RunStart(s));
                }
            }
            Extract::Stamp(field) => {
                if let Some(s) = scan.stamp()? {
                    push(field(s));
                }
            }
        }
    }

    debug!(lines = block.len(), events = events.len(), "extracted run block");
    Ok(events)
}
