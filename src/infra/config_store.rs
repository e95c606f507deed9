// ============================================================
// Layer 6 — Config Store
// ============================================================
// Saves and restores the EncodeConfig as pretty JSON so the
// same encoder architecture can be rebuilt later.
//
// File layout (single file, path chosen by the caller):
//   encode_config.json
//     {
//       "embedding_dim": 300,
//       "encoder": "cnn",
//       "widths": [3, 4, 5],
//       ...
//     }
//
// Missing fields fall back to EncodeConfig::default().
//
// Reference: Rust Book §9 (Error Handling)

use anyhow::{Context, Result};
use std::{fs, path::PathBuf};

use crate::application::encode_use_case::EncodeConfig;

/// Default file name used by the CLI when `--save-config` is a directory
pub const CONFIG_FILE: &str = "encode_config.json";

pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path: PathBuf = path.into();
        let path = if path.is_dir() { path.join(CONFIG_FILE) } else { path };
        Self { path }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    pub fn save(&self, cfg: &EncodeConfig) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Cannot create '{}'", parent.display()))?;
        }

        let json = serde_json::to_string_pretty(cfg)?;
        fs::write(&self.path, json)
            .with_context(|| format!("Cannot write config to '{}'", self.path.display()))?;

        tracing::debug!("Saved encoder config to '{}'", self.path.display());
        Ok(())
    }

    pub fn load(&self) -> Result<EncodeConfig> {
        let json = fs::read_to_string(&self.path)
            .with_context(|| format!("Cannot read config from '{}'", self.path.display()))?;

        serde_json::from_str(&json)
            .with_context(|| format!("Invalid encoder config in '{}'", self.path.display()))
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::encode_use_case::EncoderKind;
    use tempfile::tempdir;

    #[test]
    fn test_save_then_load() {
        let dir   = tempdir().unwrap();
        let store = ConfigStore::new(dir.path().join("nested").join("cfg.json"));
        let cfg   = EncodeConfig {
            encoder: EncoderKind::Average,
            embedding_dim: 50,
            ..EncodeConfig::default()
        };

        store.save(&cfg).unwrap();
        assert_eq!(store.load().unwrap(), cfg);
    }

    #[test]
    fn test_directory_resolves_to_default_file() {
        let dir   = tempdir().unwrap();
        let store = ConfigStore::new(dir.path());
        assert_eq!(store.path(), &dir.path().join(CONFIG_FILE));
    }

    #[test]
    fn test_missing_file_has_context() {
        let dir = tempdir().unwrap();
        let err = ConfigStore::new(dir.path().join("absent.json")).load().unwrap_err();
        assert!(err.to_string().contains("Cannot read config"));
    }
}
