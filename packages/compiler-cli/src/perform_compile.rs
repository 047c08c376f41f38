//! Perform Compile
//!
//! Configuration parsing, compilation and emit for `razorc`.

use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::compile::{parallel_compile, CompiledTemplate};
use crate::config::project::{ProjectConfig, DEFAULT_CONFIG_FILE};

/// Settings taken from the command line. They override `razor.json`.
#[derive(Debug, Clone, Default)]
pub struct CommandLineOptions {
    /// `razor.json`, or a directory containing one.
    pub project: Option<PathBuf>,
    /// Explicit inputs; when empty the project's include globs are used.
    pub files: Vec<PathBuf>,
    pub out_dir: Option<PathBuf>,
    pub root_namespace: Option<String>,
    pub design_time: bool,
    pub source_map: bool,
    pub emit_mappings: bool,
}

/// Project configuration merged with the command line.
#[derive(Debug, Clone)]
pub struct ParsedConfiguration {
    /// `None` when no `razor.json` was found and defaults are in effect.
    pub config_path: Option<PathBuf>,
    pub config: ProjectConfig,
    /// Chunk tree files to compile.
    pub root_names: Vec<PathBuf>,
    pub out_dir: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub file: Option<PathBuf>,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.file {
            Some(file) => write!(f, "{}: {}", file.display(), self.message),
            None => f.write_str(&self.message),
        }
    }
}

#[derive(Debug, Default)]
pub struct PerformCompileResult {
    pub diagnostics: Vec<Diagnostic>,
    /// Every file written, in input order.
    pub emitted_files: Vec<PathBuf>,
}

impl PerformCompileResult {
    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }
}

fn locate_config(project: Option<&Path>) -> anyhow::Result<(Option<PathBuf>, PathBuf)> {
    match project {
        Some(path) if path.is_dir() => {
            let config_path = path.join(DEFAULT_CONFIG_FILE);
            if config_path.is_file() {
                Ok((Some(config_path), path.to_path_buf()))
            } else {
                Ok((None, path.to_path_buf()))
            }
        }
        Some(path) if path.is_file() => {
            let base_dir = path.parent().unwrap_or(Path::new(".")).to_path_buf();
            Ok((Some(path.to_path_buf()), base_dir))
        }
        Some(path) => anyhow::bail!("project file not found: {}", path.display()),
        None => {
            let default = Path::new(DEFAULT_CONFIG_FILE);
            if default.is_file() {
                Ok((Some(default.to_path_buf()), PathBuf::from(".")))
            } else {
                Ok((None, PathBuf::from(".")))
            }
        }
    }
}

/// Loads `razor.json` (if any), applies the command line and discovers inputs.
pub fn read_configuration(options: &CommandLineOptions) -> anyhow::Result<ParsedConfiguration> {
    let (config_path, base_dir) = locate_config(options.project.as_deref())?;
    let mut config = match &config_path {
        Some(path) => ProjectConfig::load(path)?,
        None => ProjectConfig::default(),
    };

    if let Some(namespace) = &options.root_namespace {
        config.root_namespace = namespace.clone();
    }
    if options.design_time {
        config.host.design_time_mode = true;
    }
    config.source_map |= options.source_map;
    config.emit_mappings |= options.emit_mappings;

    let out_dir = match &options.out_dir {
        Some(dir) => dir.clone(),
        None => config.resolve_out_dir(&base_dir),
    };

    let root_names = if options.files.is_empty() {
        config.discover_files(&base_dir)?
    } else {
        options.files.clone()
    };
    tracing::debug!(
        config = ?config_path,
        inputs = root_names.len(),
        out_dir = %out_dir.display(),
        "configuration read"
    );

    Ok(ParsedConfiguration {
        config_path,
        config,
        root_names,
        out_dir,
    })
}

/// Writes the generated file and its optional companions into `out_dir`.
pub fn emit_template(
    compiled: &CompiledTemplate,
    out_dir: &Path,
    config: &ProjectConfig,
) -> anyhow::Result<Vec<PathBuf>> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("failed to create {}", out_dir.display()))?;

    let mut written = Vec::new();
    let code_path = out_dir.join(compiled.output_file_name());
    fs::write(&code_path, &compiled.generated_code)
        .with_context(|| format!("failed to write {}", code_path.display()))?;
    written.push(code_path);

    if let Some(source_map) = &compiled.source_map {
        let map_path = out_dir.join(format!("{}.map", compiled.output_file_name()));
        fs::write(&map_path, source_map.to_json()?)
            .with_context(|| format!("failed to write {}", map_path.display()))?;
        written.push(map_path);
    }

    if config.emit_mappings {
        let mappings_path = out_dir.join(format!("{}.mappings.json", compiled.class_name));
        let json = serde_json::to_string_pretty(&compiled.line_mappings)?;
        fs::write(&mappings_path, json)
            .with_context(|| format!("failed to write {}", mappings_path.display()))?;
        written.push(mappings_path);
    }

    Ok(written)
}

/// Compiles and emits every input of an already parsed configuration.
pub fn perform_compilation(parsed: &ParsedConfiguration) -> PerformCompileResult {
    let mut result = PerformCompileResult::default();
    let mut output_names = HashSet::new();

    for (path, compiled) in parallel_compile(&parsed.root_names, &parsed.config) {
        let compiled = match compiled {
            Ok(compiled) => compiled,
            Err(e) => {
                result.diagnostics.push(Diagnostic {
                    file: Some(path),
                    message: format!("{:#}", e),
                });
                continue;
            }
        };

        if !output_names.insert(compiled.output_file_name()) {
            result.diagnostics.push(Diagnostic {
                file: Some(path),
                message: format!(
                    "class '{}' is generated by more than one template",
                    compiled.class_name
                ),
            });
            continue;
        }

        match emit_template(&compiled, &parsed.out_dir, &parsed.config) {
            Ok(written) => result.emitted_files.extend(written),
            Err(e) => result.diagnostics.push(Diagnostic {
                file: Some(path),
                message: format!("{:#}", e),
            }),
        }
    }
    result
}

/// Reads the configuration and compiles it; configuration errors become diagnostics.
pub fn perform_compilation_simple(options: &CommandLineOptions) -> PerformCompileResult {
    match read_configuration(options) {
        Ok(parsed) => {
            if parsed.root_names.is_empty() {
                tracing::warn!("no chunk tree files matched");
            }
            perform_compilation(&parsed)
        }
        Err(e) => PerformCompileResult {
            diagnostics: vec![Diagnostic {
                file: options.project.clone(),
                message: format!("{:#}", e),
            }],
            emitted_files: Vec::new(),
        },
    }
}
