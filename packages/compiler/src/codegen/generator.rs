//! Razor Code Generator
//!
//! Entry point: turns a chunk tree into C# source plus its line mapping table.

use crate::chunks::CodeTree;
use crate::config::RazorEngineHost;
use crate::error::Result;
use crate::output::source_map::{SourceMap, SourceMapBuilder};

use super::attribute_value_renderer::{DefaultAttributeValueRenderer, TagHelperAttributeValueRenderer};
use super::code_builder::CSharpCodeBuilder;
use super::context::{CodeGeneratorContext, UNKNOWN_SOURCE_FILE};
use super::line_mapping::LineMapping;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorResults {
    pub generated_code: String,
    /// In the order the mappings were written.
    pub line_mappings: Vec<LineMapping>,
    source_file: Option<String>,
}

impl GeneratorResults {
    /// Source map from the generated file back to the template.
    pub fn source_map(&self, generated_file: Option<&str>, template_content: Option<&str>) -> Result<SourceMap> {
        let source = self.source_file.as_deref().unwrap_or(UNKNOWN_SOURCE_FILE);
        SourceMapBuilder::new(generated_file, source, template_content)
            .add_line_mappings(&self.line_mappings)
            .build()
    }
}

pub struct RazorCodeGenerator {
    host: RazorEngineHost,
    class_name: String,
    root_namespace: String,
    source_file: Option<String>,
    attribute_value_renderer: Box<dyn TagHelperAttributeValueRenderer + Send + Sync>,
}

impl RazorCodeGenerator {
    /// Empty class or namespace names fall back to the host defaults.
    pub fn new(host: RazorEngineHost, class_name: &str, root_namespace: &str, source_file: Option<&str>) -> Self {
        let class_name = if class_name.is_empty() {
            host.default_class_name.clone()
        } else {
            class_name.to_string()
        };
        let root_namespace = if root_namespace.is_empty() {
            host.default_namespace.clone()
        } else {
            root_namespace.to_string()
        };
        RazorCodeGenerator {
            host,
            class_name,
            root_namespace,
            source_file: source_file.map(str::to_string),
            attribute_value_renderer: Box::new(DefaultAttributeValueRenderer),
        }
    }

    pub fn with_attribute_value_renderer(
        mut self,
        renderer: impl TagHelperAttributeValueRenderer + Send + Sync + 'static,
    ) -> Self {
        self.attribute_value_renderer = Box::new(renderer);
        self
    }

    pub fn host(&self) -> &RazorEngineHost {
        &self.host
    }

    #[tracing::instrument(level = "debug", skip_all, fields(class = %self.class_name, chunks = tree.chunks.len()))]
    pub fn generate(&self, tree: &CodeTree) -> Result<GeneratorResults> {
        let context = CodeGeneratorContext::new(
            self.host.clone(),
            &self.class_name,
            &self.root_namespace,
            self.source_file.as_deref(),
        );
        let result = CSharpCodeBuilder::new(context, self.attribute_value_renderer.as_ref()).build(tree)?;
        Ok(GeneratorResults {
            generated_code: result.code,
            line_mappings: result.line_mappings,
            source_file: self.source_file.clone(),
        })
    }

    pub fn generate_from_json(&self, chunk_tree_json: &str) -> Result<GeneratorResults> {
        let tree = CodeTree::from_json(chunk_tree_json)?;
        self.generate(&tree)
    }
}
