//! Gzip inflation with an output cap.

use std::io::Read as _;

use flate2::read::GzDecoder;

use crate::error::{CastwireError, Result};

const GZIP_MAGIC: [u8; 2] = [0x1F, 0x8B];

/// True if `data` starts with the gzip member header magic.
pub fn has_gzip_magic(data: &[u8]) -> bool {
    data.starts_with(&GZIP_MAGIC)
}

/// Inflate a gzip stream, refusing to produce more than `cap` bytes.
pub fn gunzip(data: &[u8], cap: usize) -> Result<Vec<u8>> {
    if !has_gzip_magic(data) {
        return Err(CastwireError::GzipDecode("missing gzip magic".into()));
    }

    let limit = u64::try_from(cap).unwrap_or(u64::MAX).saturating_add(1);
    let mut out = Vec::with_capacity(data.len().saturating_mul(4).min(cap));
    GzDecoder::new(data)
        .take(limit)
        .read_to_end(&mut out)
        .map_err(|e| CastwireError::GzipDecode(e.to_string()))?;

    if out.len() > cap {
        return Err(CastwireError::GzipDecode(format!(
            "inflated size exceeds {cap} bytes"
        )));
    }
    Ok(out)
}
