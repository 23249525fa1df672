//! Decoder options (strict serde schema + range validation).

use serde::{Deserialize, Serialize};

use crate::error::{CastwireError, Result};

/// Knobs for one decode call. Plain data: cheap to clone, safe to share.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DecodeOptions {
    /// Upper bound for any single gzip inflation.
    #[serde(default = "default_max_decompressed_bytes")]
    pub max_decompressed_bytes: usize,

    /// Inflate inner message payloads that start with the gzip magic.
    #[serde(default = "default_sniff_inner_gzip")]
    pub sniff_inner_gzip: bool,

    /// Attach a human-readable `display` line to recognized records.
    #[serde(default)]
    pub display: bool,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            max_decompressed_bytes: default_max_decompressed_bytes(),
            sniff_inner_gzip: default_sniff_inner_gzip(),
            display: false,
        }
    }
}

impl DecodeOptions {
    pub fn validate(&self) -> Result<()> {
        let cap = self.max_decompressed_bytes;
        if !(MIN_DECOMPRESSED_BYTES..=MAX_DECOMPRESSED_BYTES).contains(&cap) {
            return Err(CastwireError::InvalidConfig(format!(
                "max_decompressed_bytes must be between {} and {}",
                MIN_DECOMPRESSED_BYTES, MAX_DECOMPRESSED_BYTES
            )));
        }
        Ok(())
    }
}

const MIN_DECOMPRESSED_BYTES: usize = 1024;
const MAX_DECOMPRESSED_BYTES: usize = 64 * 1024 * 1024;

fn default_max_decompressed_bytes() -> usize {
    4 * 1024 * 1024
}
fn default_sniff_inner_gzip() -> bool {
    true
}
