//! Writes generated modules beneath an output root.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tokio::fs;
use tracing::{debug, info};

use crate::core::types::GeneratedModule;

/// Persists rendered modules to disk, creating directories as needed.
pub struct ModuleWriter {
    output_root: PathBuf,
}

impl ModuleWriter {
    pub fn new(output_root: impl Into<PathBuf>) -> Self {
        Self {
            output_root: output_root.into(),
        }
    }

    pub fn output_root(&self) -> &Path {
        &self.output_root
    }

    /// Write every module, returning the paths written.
    pub async fn write_all(&self, modules: &[GeneratedModule]) -> Result<Vec<PathBuf>> {
        let mut written = Vec::with_capacity(modules.len());
        for module in modules {
            written.push(self.write_module(module).await?);
        }
        info!(
            "Wrote {} files under {}",
            written.len(),
            self.output_root.display()
        );
        Ok(written)
    }

    async fn write_module(&self, module: &GeneratedModule) -> Result<PathBuf> {
        let path = self.output_root.join(&module.path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await.with_context(|| {
                format!("Failed to create output directory {}", parent.display())
            })?;
        }
        fs::write(&path, &module.content)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;
        debug!("Wrote {}", path.display());
        Ok(path)
    }
}
