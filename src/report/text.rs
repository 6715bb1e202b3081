//! Console rendering of run blocks.

use std::io::{self, Write};

use crate::core::{RunBlock, RunEvent, RunField};

/// English ordinal, e.g. `1st`, `12th`, `22nd`.
pub fn ordinal(n: usize) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{n}{suffix}")
}

pub fn banner(n: usize) -> String {
    format!("-------------------- {} Run Log Block --------------------", ordinal(n))
}

/// One aligned report line for a field.
pub fn field_line(field: &RunField, zone_label: &str) -> String {
    let value = match field {
        RunField::ConfigName(v) | RunField::RunNumber(v) => v.clone(),
        RunField::BootStart(s)
        | RunField::BootComplete(s)
        | RunField::ConfigTransition(s)
        | RunField::ConfigComplete(s)
        | RunField::RunStart(s)
        | RunField::RunStop(s)
        | RunField::RunRecovered(s)
        | RunField::RunTerminated(s) => {
            let epoch = s.epoch.map(|e| e.to_string()).unwrap_or_else(|| "None".to_string());
            format!("{epoch} ( {} [{zone_label}] )", s.minute)
        }
    };
    format!("{}:  {value}", field.label())
}

pub fn write_fields<W: Write>(out: &mut W, n: usize, events: &[RunEvent], zone_label: &str) -> io::Result<()> {
    writeln!(out, "{}", banner(n))?;
    for event in events {
        writeln!(out, "{}", field_line(&event.field, zone_label))?;
    }
    Ok(())
}

/// Banner followed by the block's original lines.
pub fn write_raw<W: Write>(out: &mut W, n: usize, block: &RunBlock) -> io::Result<()> {
    writeln!(out, "{}", banner(n))?;
    for line in block.lines() {
        writeln!(out, "{line}")?;
    }
    Ok(())
}
