use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use razor_compiler::RazorEngineHost;

pub const DEFAULT_CONFIG_FILE: &str = "razor.json";
pub const DEFAULT_INCLUDE: &str = "**/*.chunks.json";
pub const DEFAULT_OUT_DIR: &str = "generated";

/// Contents of `razor.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProjectConfig {
    /// Glob patterns, relative to the project directory, selecting chunk tree files.
    pub include: Vec<String>,
    pub exclude: Vec<String>,
    pub out_dir: Option<String>,
    pub root_namespace: String,
    pub source_map: bool,
    pub emit_mappings: bool,
    /// Wrap values bound to `ModelExpression` properties in `CreateModelExpression`.
    pub model_expressions: bool,
    pub host: RazorEngineHost,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        ProjectConfig {
            include: vec![DEFAULT_INCLUDE.to_string()],
            exclude: Vec::new(),
            out_dir: None,
            root_namespace: String::new(),
            source_map: false,
            emit_mappings: false,
            model_expressions: false,
            host: RazorEngineHost::default(),
        }
    }
}

impl ProjectConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let config: ProjectConfig = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        Ok(config)
    }

    /// Output directory resolved against `base_dir`.
    pub fn resolve_out_dir(&self, base_dir: &Path) -> PathBuf {
        base_dir.join(self.out_dir.as_deref().unwrap_or(DEFAULT_OUT_DIR))
    }

    /// Expands the include globs under `base_dir`, dropping excluded and
    /// duplicate paths. The result is sorted.
    pub fn discover_files(&self, base_dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
        let excludes = self
            .exclude
            .iter()
            .map(|pattern| {
                glob::Pattern::new(&base_dir.join(pattern).to_string_lossy())
                    .with_context(|| format!("invalid exclude pattern '{}'", pattern))
            })
            .collect::<anyhow::Result<Vec<_>>>()?;

        let mut files = Vec::new();
        for pattern in &self.include {
            let full_pattern = base_dir.join(pattern);
            let paths = glob::glob(&full_pattern.to_string_lossy())
                .with_context(|| format!("invalid include pattern '{}'", pattern))?;
            for entry in paths {
                let path = match entry {
                    Ok(path) => path,
                    Err(e) => {
                        tracing::warn!("skipping unreadable path: {}", e);
                        continue;
                    }
                };
                if !path.is_file() || excludes.iter().any(|p| p.matches_path(&path)) {
                    continue;
                }
                files.push(path);
            }
        }
        files.sort();
        files.dedup();
        Ok(files)
    }
}
