//! Build configuration
//!
//! Loaded from an optional JSON file; command-line flags take precedence.
//!
//! ```json
//! { "out_dir": "build", "extension": "mjs", "builtins": ["document"] }
//! ```

use crate::cli::Cli;
use crate::error::CliResult;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Settings shared by every compiled file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// Output directory; `None` writes next to each input
    pub out_dir: Option<PathBuf>,
    /// Extension of generated files, without the dot
    pub extension: String,
    /// Extra global names the compiled code may reference
    pub builtins: Vec<String>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            out_dir: None,
            extension: "js".to_string(),
            builtins: Vec::new(),
        }
    }
}

impl BuildConfig {
    /// Read a JSON config file
    pub fn load(path: &Path) -> CliResult<Self> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Config file named by `--config` (if any) with CLI overrides applied
    pub fn from_cli(cli: &Cli) -> CliResult<Self> {
        let config = match &cli.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        Ok(config.with_overrides(cli))
    }

    /// Apply command-line overrides
    pub fn with_overrides(mut self, cli: &Cli) -> Self {
        if let Some(out_dir) = &cli.out_dir {
            self.out_dir = Some(out_dir.clone());
        }
        self
    }

    /// Where the output for `input` goes
    pub fn output_path(&self, input: &Path) -> PathBuf {
        let dir = match &self.out_dir {
            Some(dir) => dir.clone(),
            None => input.parent().map(Path::to_path_buf).unwrap_or_default(),
        };
        let stem = input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "out".to_string());
        dir.join(format!("{}.{}", stem, self.extension))
    }
}
