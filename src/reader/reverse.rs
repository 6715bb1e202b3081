//! Reverse line streaming over a seekable source.

use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::Path;

use tracing::trace;

use crate::{RunInfoError, RunInfoResult};

pub const DEFAULT_CHUNK_SIZE: usize = 8192;

/// Lines of a file from last to first, read one chunk at a time.
///
/// Only the current chunk's lines and the leading fragment of the chunk read
/// before it (`carry`) are held in memory. A line that straddles a chunk
/// boundary is reassembled from the fragment of the earlier chunk and the
/// carry of the later one.
#[derive(Debug)]
pub struct ReverseLines<R> {
    source: R,
    chunk_size: usize,
    file_size: u64,
    /// Start of the bytes not yet read; everything at or after it is consumed.
    end: u64,
    carry: Option<Vec<u8>>,
    /// Complete lines of the current chunk, popped from the back.
    pending: Vec<Vec<u8>>,
    done: bool,
}

impl ReverseLines<File> {
    /// Open `path` and position the cursor at its end.
    pub fn open(path: impl AsRef<Path>, chunk_size: usize) -> RunInfoResult<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| RunInfoError::io(path, e))?;
        ReverseLines::new(file, chunk_size).map_err(|e| RunInfoError::io(path, e))
    }
}

impl<R: Read + Seek> ReverseLines<R> {
    pub fn new(mut source: R, chunk_size: usize) -> io::Result<Self> {
        let file_size = source.seek(SeekFrom::End(0))?;
        Ok(ReverseLines {
            source,
            chunk_size: chunk_size.max(1),
            file_size,
            end: file_size,
            carry: None,
            pending: Vec::new(),
            done: false,
        })
    }

    /// Read chunks backwards until at least one line is ready or the start is reached.
    fn refill(&mut self) -> io::Result<()> {
        while self.pending.is_empty() {
            if self.end == 0 {
                self.done = true;
                if let Some(segment) = self.carry.take() {
                    self.pending.push(segment);
                }
                return Ok(());
            }

            let start = self.end.saturating_sub(self.chunk_size as u64);
            let mut buf = vec![0u8; (self.end - start) as usize];
            self.source.seek(SeekFrom::Start(start))?;
            self.source.read_exact(&mut buf)?;
            trace!(start, len = buf.len(), "read chunk");

            // A trailing newline ends the last line; it does not start an empty one.
            if self.end == self.file_size && buf.last() == Some(&b'\n') {
                buf.pop();
            }
            self.end = start;

            let mut parts: Vec<Vec<u8>> = buf.split(|b| *b == b'\n').map(<[u8]>::to_vec).collect();
            if let (Some(carry), Some(last)) = (self.carry.take(), parts.last_mut()) {
                last.extend_from_slice(&carry);
            }
            // split always yields at least one part
            let head = parts.remove(0);
            self.carry = Some(head);
            self.pending = parts;
        }
        Ok(())
    }
}

impl<R: Read + Seek> Iterator for ReverseLines<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pending.is_empty() && !self.done {
            if let Err(e) = self.refill() {
                self.done = true;
                self.pending.clear();
                self.carry = None;
                return Some(Err(e));
            }
        }
        self.pending
            .pop()
            .map(|bytes| Ok(String::from_utf8_lossy(&bytes).into_owned()))
    }
}
