//! JSON-lines file sink

use alloy_primitives::BlockHash;
use async_trait::async_trait;
use std::collections::HashSet;
use std::io::SeekFrom;
use std::path::{Path, PathBuf};
use tokio::fs::{self, File, OpenOptions};
use tokio::io::{AsyncReadExt, AsyncSeekExt, AsyncWriteExt};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use super::{FeeRecordSink, SinkStats};
use crate::errors::SinkError;
use crate::record::BlockFeeRecord;

/// Internal state for the JSON-lines sink
#[derive(Debug, Default)]
struct JsonLinesState {
    /// Hashes written by this sink instance
    written: HashSet<BlockHash>,
    /// Whether the file's last line has been checked for a partial write
    tail_checked: bool,
    stats: SinkStats,
}

/// Sink that appends each record as one JSON object per line
///
/// Records use the flat persisted shape (see [`BlockFeeRecord`]). The file
/// and its parent directories are created on the first save; an existing file
/// is appended to. Duplicate hashes are rejected for the lifetime of the sink
/// instance only, not across restarts.
///
/// A save that fails mid-write truncates the file back to its previous length.
/// On its first save, the sink also checks for a trailing partial line left by
/// an interrupted process: an undecodable fragment is removed, a complete
/// record missing its newline is terminated.
///
/// # Examples
///
/// ```rust,ignore
/// use feescan::{FeeRecordSink, JsonLinesSink};
///
/// let sink = JsonLinesSink::new("/var/lib/feescan/mainnet.jsonl");
/// sink.save(record).await?;
///
/// let records = JsonLinesSink::read_records("/var/lib/feescan/mainnet.jsonl").await?;
/// ```
#[derive(Debug)]
pub struct JsonLinesSink {
    path: PathBuf,
    state: Mutex<JsonLinesState>,
}

impl JsonLinesSink {
    /// Creates a sink writing to `path`
    ///
    /// No I/O happens until the first save.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            state: Mutex::new(JsonLinesState::default()),
        }
    }

    /// Path records are appended to
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads every record from a JSON-lines file, skipping blank lines
    pub async fn read_records(path: impl AsRef<Path>) -> Result<Vec<BlockFeeRecord>, SinkError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .await
            .map_err(|e| SinkError::io(path, e))?;

        let records = contents
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(serde_json::from_str)
            .collect::<Result<Vec<BlockFeeRecord>, _>>()?;

        info!(path = %path.display(), records = records.len(), "Loaded fee records");
        Ok(records)
    }

    async fn append_line(&self, line: &[u8], tail_checked: &mut bool) -> Result<(), SinkError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)
                    .await
                    .map_err(|e| SinkError::io(parent, e))?;
                debug!(path = %parent.display(), "Created record directory");
            }
        }

        let io_err = |e| SinkError::io(&self.path, e);

        let mut file = OpenOptions::new()
            .read(true)
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(io_err)?;

        let mut start = file.metadata().await.map_err(io_err)?.len();
        if !*tail_checked {
            start = self.repair_tail(&mut file, start).await.map_err(io_err)?;
            *tail_checked = true;
        }

        let written = async {
            file.write_all(line).await?;
            file.flush().await
        }
        .await;

        if let Err(e) = written {
            // Drop whatever part of the line made it to disk
            if let Err(rollback) = file.set_len(start).await {
                warn!(
                    path = %self.path.display(),
                    error = %rollback,
                    "Failed to remove partial record line"
                );
            }
            return Err(io_err(e));
        }
        Ok(())
    }

    /// Make sure the file ends on a line boundary, returning its new length.
    ///
    /// A trailing line without a newline is kept (newline added) when it
    /// decodes as a record and truncated otherwise.
    async fn repair_tail(&self, file: &mut File, len: u64) -> std::io::Result<u64> {
        let complete = complete_lines_len(file, len).await?;
        if complete == len {
            return Ok(len);
        }

        let mut tail = Vec::with_capacity((len - complete) as usize);
        file.seek(SeekFrom::Start(complete)).await?;
        file.read_to_end(&mut tail).await?;

        if serde_json::from_slice::<BlockFeeRecord>(&tail).is_ok() {
            file.write_all(b"\n").await?;
            file.flush().await?;
            debug!(path = %self.path.display(), "Terminated last record line");
            return Ok(len + 1);
        }

        warn!(
            path = %self.path.display(),
            bytes = len - complete,
            "Dropping partial record line"
        );
        file.set_len(complete).await?;
        Ok(complete)
    }
}

/// Length of the prefix of `file` that ends with a newline (0 if none does)
async fn complete_lines_len(file: &mut File, len: u64) -> std::io::Result<u64> {
    const CHUNK: u64 = 4096;

    let mut buf = vec![0u8; CHUNK as usize];
    let mut end = len;
    while end > 0 {
        let start = end.saturating_sub(CHUNK);
        let chunk = &mut buf[..(end - start) as usize];
        file.seek(SeekFrom::Start(start)).await?;
        file.read_exact(chunk).await?;

        if let Some(pos) = chunk.iter().rposition(|&b| b == b'\n') {
            return Ok(start + pos as u64 + 1);
        }
        end = start;
    }
    Ok(0)
}

#[async_trait]
impl FeeRecordSink for JsonLinesSink {
    async fn save(&self, record: BlockFeeRecord) -> Result<(), SinkError> {
        // Held across the write so concurrent saves never interleave lines
        let mut state = self.state.lock().await;
        let hash = record.hash();

        if state.written.contains(&hash) {
            state.stats.failed += 1;
            return Err(SinkError::DuplicateRecord { hash });
        }

        let mut line = match serde_json::to_vec(&record) {
            Ok(line) => line,
            Err(e) => {
                state.stats.failed += 1;
                return Err(e.into());
            }
        };
        line.push(b'\n');

        if let Err(e) = self.append_line(&line, &mut state.tail_checked).await {
            state.stats.failed += 1;
            return Err(e);
        }

        debug!(
            block_number = record.number(),
            %hash,
            path = %self.path.display(),
            "Appended fee record"
        );
        state.written.insert(hash);
        state.stats.record_saved(&record);
        Ok(())
    }

    async fn stats(&self) -> SinkStats {
        self.state.lock().await.stats.clone()
    }

    fn name(&self) -> &'static str {
        "JsonLinesSink"
    }
}
