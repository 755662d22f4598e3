//! Slice configuration: an optional JSON file whose values CLI flags can override.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};

use crate::model::RecordId;
use crate::trace::MergeMode;

/// Serializable slice configuration. Every field is optional so a file can
/// hold shared inputs while the start records come from the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SliceConfig {
    /// Path to the JSON-lines log (relative paths resolve against the config file).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log: Option<PathBuf>,
    /// Path to the program manifest.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub program: Option<PathBuf>,
    /// Start record of the first pointer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pt1: Option<RecordId>,
    /// Start record of the second pointer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pt2: Option<RecordId>,
    /// Keep both copies of the convergence record in the merged listing.
    /// Unset means deduplicate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keep_duplicates: Option<bool>,
    /// Emit a JSON report instead of the text listing. Unset means text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub json: Option<bool>,
}

/// Fully resolved inputs for one slicing run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SliceSettings {
    pub log: PathBuf,
    pub program: PathBuf,
    pub starts: [RecordId; 2],
    pub merge_mode: MergeMode,
    pub json: bool,
}

impl SliceConfig {
    /// Load a config file from disk, anchoring relative paths at its directory.
    pub fn load(path: &Path) -> Result<Self> {
        let body = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read slice config at {}", path.display()))?;
        let mut config: SliceConfig =
            serde_json::from_str(&body).context("Failed to parse slice config JSON")?;
        if let Some(base) = path.parent() {
            config.log = config.log.map(|p| anchor(base, p));
            config.program = config.program.map(|p| anchor(base, p));
        }
        Ok(config)
    }

    /// Apply `overrides` on top of `self`; set fields in `overrides` win.
    pub fn overlay(self, overrides: SliceConfig) -> SliceConfig {
        SliceConfig {
            log: overrides.log.or(self.log),
            program: overrides.program.or(self.program),
            pt1: overrides.pt1.or(self.pt1),
            pt2: overrides.pt2.or(self.pt2),
            keep_duplicates: overrides.keep_duplicates.or(self.keep_duplicates),
            json: overrides.json.or(self.json),
        }
    }

    /// Check that every required input is present.
    pub fn resolve(self) -> Result<SliceSettings> {
        let log = self
            .log
            .ok_or_else(|| anyhow!("Missing log path (use --log or set `log` in the config)"))?;
        let program = self.program.ok_or_else(|| {
            anyhow!("Missing program manifest (use --program or set `program` in the config)")
        })?;
        let pt1 = self.pt1.ok_or_else(|| anyhow!("Missing first pointer record (use --pt1)"))?;
        let pt2 = self.pt2.ok_or_else(|| anyhow!("Missing second pointer record (use --pt2)"))?;
        Ok(SliceSettings {
            log,
            program,
            starts: [pt1, pt2],
            merge_mode: if self.keep_duplicates.unwrap_or(false) {
                MergeMode::KeepBoth
            } else {
                MergeMode::Dedup
            },
            json: self.json.unwrap_or(false),
        })
    }
}

fn anchor(base: &Path, path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        path
    } else {
        base.join(path)
    }
}
