//! Compiling chunk tree files into generated C#.

pub mod parallel;

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use razor_compiler::codegen::ModelExpressionAttributeValueRenderer;
use razor_compiler::output::source_map::SourceMap;
use razor_compiler::{CodeTree, LineMapping, RazorCodeGenerator};

use crate::config::ProjectConfig;

pub use parallel::parallel_compile;

/// Suffixes stripped from an input file name to get the template name.
const INPUT_SUFFIXES: [&str; 2] = [".json", ".chunks"];

/// A chunk tree file as written by the parser.
///
/// The tree's `chunks` sit at the top level next to the optional metadata.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateInput {
    /// Template path used in `#line` pragmas.
    pub source_file: Option<String>,
    pub class_name: Option<String>,
    /// Template text, embedded in the source map when one is written.
    pub source_content: Option<String>,
    #[serde(flatten)]
    pub tree: CodeTree,
}

impl TemplateInput {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let input: TemplateInput = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse chunk tree {}", path.display()))?;
        Ok(input)
    }
}

#[derive(Debug, Clone)]
pub struct CompiledTemplate {
    pub input_path: PathBuf,
    pub class_name: String,
    pub generated_code: String,
    pub line_mappings: Vec<LineMapping>,
    pub source_map: Option<SourceMap>,
}

impl CompiledTemplate {
    /// File name of the generated C# file.
    pub fn output_file_name(&self) -> String {
        format!("{}.cs", self.class_name)
    }
}

/// Class name derived from an input path: `Views/Home.chunks.json` becomes `Home`.
pub fn class_name_from_path(path: &Path) -> String {
    let mut name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    for suffix in INPUT_SUFFIXES {
        if let Some(stripped) = name.strip_suffix(suffix) {
            name = stripped.to_string();
        }
    }
    sanitize_identifier(&name)
}

/// Replaces characters that cannot appear in a C# identifier with `_`.
pub fn sanitize_identifier(name: &str) -> String {
    let mut identifier: String = name
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    if identifier.starts_with(|c: char| c.is_ascii_digit()) {
        identifier.insert(0, '_');
    }
    identifier
}

/// Generates C# for one chunk tree file.
pub fn compile_template(path: &Path, config: &ProjectConfig) -> anyhow::Result<CompiledTemplate> {
    let input = TemplateInput::load(path)?;
    let class_name = match &input.class_name {
        Some(name) if !name.is_empty() => name.clone(),
        _ => class_name_from_path(path),
    };

    let mut generator = RazorCodeGenerator::new(
        config.host.clone(),
        &class_name,
        &config.root_namespace,
        input.source_file.as_deref(),
    );
    if config.model_expressions {
        generator = generator.with_attribute_value_renderer(ModelExpressionAttributeValueRenderer);
    }
    let results = generator
        .generate(&input.tree)
        .with_context(|| format!("failed to generate code for {}", path.display()))?;

    // The generator falls back to the host default when the name is empty.
    let class_name = if class_name.is_empty() {
        config.host.default_class_name.clone()
    } else {
        class_name
    };

    let source_map = if config.source_map {
        let generated_file = format!("{}.cs", class_name);
        Some(
            results
                .source_map(Some(&generated_file), input.source_content.as_deref())
                .with_context(|| format!("failed to build source map for {}", path.display()))?,
        )
    } else {
        None
    };

    Ok(CompiledTemplate {
        input_path: path.to_path_buf(),
        class_name,
        generated_code: results.generated_code,
        line_mappings: results.line_mappings,
        source_map,
    })
}
