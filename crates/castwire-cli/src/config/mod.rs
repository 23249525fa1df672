//! CLI config loader (strict parsing).

pub mod schema;

use std::fs;
use std::path::Path;

use castwire_core::error::{CastwireError, Result};

pub use schema::{CliConfig, OutputSection};

pub fn load_from_file(path: impl AsRef<Path>) -> Result<CliConfig> {
    let path = path.as_ref();
    let s = fs::read_to_string(path).map_err(|e| {
        CastwireError::Io(format!("read config {} failed: {e}", path.display()))
    })?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<CliConfig> {
    let cfg: CliConfig = serde_yaml::from_str(s)
        .map_err(|e| CastwireError::InvalidConfig(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}
