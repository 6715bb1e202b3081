use std::io::Write;

use tracing::{debug, info};

use crate::config::Config;
use crate::core::RunRecord;
use crate::parse::{extract_events, segment_blocks};
use crate::reader::ReverseLines;
use crate::report;
use crate::{RunInfoError, RunInfoResult};

/// Print the `runs` most recent run blocks, oldest first, to `out`.
///
/// Every block is parsed before anything is written, so a strict-mode parse
/// failure produces no partial report. Returns the number of blocks printed.
pub fn run<W: Write>(cfg: &Config, runs: usize, raw: bool, out: &mut W) -> RunInfoResult<usize> {
    info!(log = %cfg.log_path.display(), runs, "scanning log");
    let lines = ReverseLines::open(&cfg.log_path, cfg.chunk_size)?;
    let blocks = segment_blocks(lines, runs).map_err(|e| RunInfoError::io(&cfg.log_path, e))?;
    if blocks.len() < runs {
        info!(found = blocks.len(), requested = runs, "log holds fewer runs than requested");
    }

    let write_err = |e: std::io::Error| RunInfoError::Message(format!("failed to write report: {e}"));

    if raw {
        for (n, block) in blocks.iter().rev().enumerate() {
            report::write_raw(out, n + 1, block).map_err(write_err)?;
        }
        out.flush().map_err(write_err)?;
        return Ok(blocks.len());
    }

    let mode = cfg.extract_mode();
    let mut parsed = Vec::with_capacity(blocks.len());
    for block in blocks.iter().rev() {
        let events = extract_events(block, mode)?;
        debug!(record = %RunRecord::from_events(&events), "parsed run");
        parsed.push(events);
    }

    for (n, events) in parsed.iter().enumerate() {
        report::write_fields(out, n + 1, events, &cfg.zone_label).map_err(write_err)?;
    }
    out.flush().map_err(write_err)?;
    Ok(parsed.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_for(text: &str) -> (tempfile::TempDir, Config) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("daq.log");
        std::fs::write(&path, text).unwrap();
        let cfg = Config { log_path: path, chunk_size: 16, ..Config::default() };
        (dir, cfg)
    }

    #[test]
    fn test_zero_runs_prints_nothing() {
        let (_dir, cfg) = config_for("Mon Jan  1 10:00:00 CST 2024 BOOT transition underway\n");
        let mut out = Vec::new();
        assert_eq!(run(&cfg, 0, false, &mut out).unwrap(), 0);
        assert!(out.is_empty());
    }

    #[test]
    fn test_strict_failure_writes_nothing() {
        let (_dir, cfg) = config_for(
            "Mon Jan  1 10:00:00 CST 2024 BOOT transition underway\nSTOP transition complete\n\
             Tue Jan  2 10:00:00 CST 2024 BOOT transition underway\n",
        );
        let mut out = Vec::new();
        let err = run(&cfg, 2, false, &mut out).unwrap_err();
        assert!(matches!(err, RunInfoError::MissingPattern { .. }));
        assert!(out.is_empty());
    }

    #[test]
    fn test_raw_mode_dumps_lines() {
        let (_dir, cfg) = config_for("junk\nMon Jan  1 10:00:00 CST 2024 BOOT transition underway\nhello\n");
        let mut out = Vec::new();
        assert_eq!(run(&cfg, 1, true, &mut out).unwrap(), 1);
        let text = String::from_utf8(out).unwrap();
        assert!(text.ends_with("BOOT transition underway\nhello\n"));
        assert!(!text.contains("junk"));
    }

    #[test]
    fn test_both_modes_flush_buffered_output() {
        let (_dir, cfg) = config_for("Mon Jan  1 10:00:00 CST 2024 BOOT transition underway\n");
        for raw in [true, false] {
            let mut out = std::io::BufWriter::with_capacity(4096, Vec::new());
            assert_eq!(run(&cfg, 1, raw, &mut out).unwrap(), 1);
            assert!(out.buffer().is_empty(), "raw={raw}");
            assert!(out.get_ref().starts_with(b"-------------------- 1st Run Log Block"));
        }
    }
}
