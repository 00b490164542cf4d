use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::foundation::error::{FbPaintError, FbPaintResult};

/// Settings for the bouncing-image driver.
///
/// Every field has a default, so `{}` is a valid config file.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BounceConfig {
    /// Frame buffer device node.
    pub device: PathBuf,
    /// Image moves, one pixel each, per second.
    pub pixels_per_second: u32,
    /// Image file to bounce; the built-in cursor when absent.
    pub image: Option<PathBuf>,
    /// Stop after this many moves; run until interrupted when absent.
    pub steps: Option<u64>,
    /// Restore the surface when the run ends.
    pub clear_on_exit: bool,
}

impl Default for BounceConfig {
    fn default() -> Self {
        Self {
            device: PathBuf::from("/dev/fb0"),
            pixels_per_second: 300,
            image: None,
            steps: None,
            clear_on_exit: true,
        }
    }
}

impl BounceConfig {
    /// Load and validate a JSON config file.
    pub fn from_json_path(path: impl AsRef<Path>) -> FbPaintResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).with_context(|| format!("open config '{}'", path.display()))?;
        let cfg: Self = serde_json::from_reader(BufReader::new(f))
            .map_err(|e| FbPaintError::config(format!("parse '{}': {e}", path.display())))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Parse and validate a JSON config document.
    pub fn from_json_str(s: &str) -> FbPaintResult<Self> {
        let cfg: Self = serde_json::from_str(s)
            .map_err(|e| FbPaintError::config(format!("parse config: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> FbPaintResult<()> {
        if self.pixels_per_second == 0 {
            return Err(FbPaintError::config("pixels_per_second must be > 0"));
        }
        Ok(())
    }
}
