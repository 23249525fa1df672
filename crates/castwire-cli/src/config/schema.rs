use serde::Deserialize;

use castwire_core::error::{CastwireError, Result};
use castwire_core::DecodeOptions;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CliConfig {
    pub version: u32,

    #[serde(default)]
    pub decode: DecodeOptions,

    #[serde(default)]
    pub output: OutputSection,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            version: 1,
            decode: DecodeOptions::default(),
            output: OutputSection::default(),
        }
    }
}

impl CliConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(CastwireError::InvalidConfig(format!(
                "unsupported config version {}",
                self.version
            )));
        }

        self.decode.validate()?;

        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputSection {
    /// Print records for unregistered methods too.
    #[serde(default = "default_include_unknown")]
    pub include_unknown: bool,

    /// Drop records whose decode stopped early.
    #[serde(default)]
    pub skip_partial: bool,

    /// Print the merged statistics as a final JSON line.
    #[serde(default)]
    pub stats_line: bool,
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            include_unknown: default_include_unknown(),
            skip_partial: false,
            stats_line: false,
        }
    }
}

fn default_include_unknown() -> bool {
    true
}
