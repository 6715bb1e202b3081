use std::io;

use tracing::debug;

use crate::core::{BOOT_MARKER, RunBlock};

/// Group a newest-first line stream into at most `limit` run blocks.
///
/// Each block ends (in reading order) at a boot marker line, which becomes the
/// block's first line once its order is restored. The result is newest-first.
/// Lines older than the last boot marker reached are dropped.
pub fn segment_blocks<I>(lines: I, limit: usize) -> io::Result<Vec<RunBlock>>
where
    I: IntoIterator<Item = io::Result<String>>,
{
    let mut blocks = Vec::new();
    if limit == 0 {
        return Ok(blocks);
    }

    let mut pending: Vec<String> = Vec::new();
    for line in lines {
        let line = line?;
        let is_boot = line.contains(BOOT_MARKER);
        pending.push(line);
        if is_boot {
            blocks.push(RunBlock::from_reversed(std::mem::take(&mut pending)));
            if blocks.len() >= limit {
                break;
            }
        }
    }

    debug!(found = blocks.len(), requested = limit, dropped_lines = pending.len(), "segmented run blocks");
    Ok(blocks)
}
