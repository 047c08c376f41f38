//! Code Generator Context
//!
//! Per-generation state shared by all passes.

use crate::config::{GeneratedClassContext, GeneratorFlags, RazorEngineHost};
use crate::parse_util::SourceSpan;

/// Placeholder written into `#line` pragmas when the template has no file name.
pub const UNKNOWN_SOURCE_FILE: &str = "--------------------";

/// Whether an expression is written to the output or spliced into surrounding code.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExpressionRenderingMode {
    /// `Write(expr);`
    #[default]
    WriteToOutput,
    /// The bare expression, e.g. inside an attribute value or expression block.
    InjectCode,
}

#[derive(Debug, Clone)]
pub struct CodeGeneratorContext {
    pub host: RazorEngineHost,
    pub class_name: String,
    pub root_namespace: String,
    pub source_file: Option<String>,
    /// Writer that write calls target; `None` writes to the page output.
    pub target_writer_name: Option<String>,
    pub expression_rendering_mode: ExpressionRenderingMode,
    flags: GeneratorFlags,
}

impl CodeGeneratorContext {
    pub fn new(
        host: RazorEngineHost,
        class_name: &str,
        root_namespace: &str,
        source_file: Option<&str>,
    ) -> Self {
        let flags = host.flags();
        CodeGeneratorContext {
            host,
            class_name: class_name.to_string(),
            root_namespace: root_namespace.to_string(),
            source_file: source_file.map(str::to_string),
            target_writer_name: None,
            expression_rendering_mode: ExpressionRenderingMode::WriteToOutput,
            flags,
        }
    }

    pub fn flags(&self) -> GeneratorFlags {
        self.flags
    }

    pub fn design_time_mode(&self) -> bool {
        self.flags.contains(GeneratorFlags::DESIGN_TIME)
    }

    pub fn instrumentation_enabled(&self) -> bool {
        self.flags.contains(GeneratorFlags::INSTRUMENTATION)
            && self.host.generated_class_context.supports_instrumentation()
    }

    pub fn class_context(&self) -> &GeneratedClassContext {
        &self.host.generated_class_context
    }

    pub fn source_file_name(&self) -> &str {
        self.source_file.as_deref().unwrap_or(UNKNOWN_SOURCE_FILE)
    }

    /// Whitespace that moves generated code starting at column
    /// `generated_start` to the template column of `span`.
    pub fn padding(&self, span: &SourceSpan, generated_start: usize) -> String {
        let width = span.start.character_index.saturating_sub(generated_start);
        if self.flags.contains(GeneratorFlags::INDENT_WITH_TABS) && self.host.tab_size > 0 {
            let tab_size = self.host.tab_size;
            let mut padding = "\t".repeat(width / tab_size);
            padding.push_str(&" ".repeat(width % tab_size));
            padding
        } else {
            " ".repeat(width)
        }
    }
}
