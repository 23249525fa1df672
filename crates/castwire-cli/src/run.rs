//! Line-oriented decode loop: one base64 frame per input line, one JSON
//! record per output line.

use std::io::{BufRead, Write};

use castwire_core::error::{CastwireError, Result};
use castwire_core::{decode_base64, DecodeStats, LiveEvent};

use crate::config::CliConfig;

/// Totals for one run.
#[derive(Debug, Default)]
pub struct RunSummary {
    /// Non-blank input lines.
    pub lines: u64,
    /// Lines that failed at the envelope level.
    pub failed: u64,
    pub records_written: u64,
    pub stats: DecodeStats,
}

/// Decode every line of `input`, writing records to `out`.
///
/// A bad line is logged and counted; it never stops the run. Only I/O
/// failures on the reader or writer abort.
pub fn decode_lines<R: BufRead, W: Write>(
    input: R,
    out: &mut W,
    cfg: &CliConfig,
) -> Result<RunSummary> {
    let mut summary = RunSummary::default();

    for (idx, line) in input.lines().enumerate() {
        let line = line.map_err(|e| CastwireError::Io(format!("read input failed: {e}")))?;
        if line.trim().is_empty() {
            continue;
        }
        summary.lines += 1;
        let line_no = idx + 1;

        let output = match decode_base64(&line, &cfg.decode) {
            Ok(output) => output,
            Err(e) => {
                tracing::warn!(
                    line = line_no,
                    code = e.code().as_str(),
                    error = %e,
                    "frame rejected"
                );
                summary.failed += 1;
                continue;
            }
        };
        summary.stats.merge(&output.stats);

        for (record, event) in output.records.iter().zip(&output.events) {
            if !cfg.output.include_unknown && matches!(event, LiveEvent::Unknown { .. }) {
                continue;
            }
            if cfg.output.skip_partial && record.is_partial() {
                continue;
            }
            write_json_line(out, record)?;
            summary.records_written += 1;
        }
    }

    if cfg.output.stats_line {
        write_json_line(out, &summary.stats)?;
    }
    out.flush()
        .map_err(|e| CastwireError::Io(format!("flush output failed: {e}")))?;

    Ok(summary)
}

fn write_json_line<W: Write, T: serde::Serialize>(out: &mut W, value: &T) -> Result<()> {
    serde_json::to_writer(&mut *out, value)
        .map_err(|e| CastwireError::Io(format!("write output failed: {e}")))?;
    out.write_all(b"\n")
        .map_err(|e| CastwireError::Io(format!("write output failed: {e}")))
}
