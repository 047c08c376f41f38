//! Host configuration consumed by the code generator.
//!
//! Every field has a default so a partial `razor.json` deserializes cleanly.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::error::Result;

bitflags! {
    /// Switches that change the shape of generated code.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct GeneratorFlags: u8 {
        /// Editor-oriented output: no runtime write calls, `__o = expr;` probes instead.
        const DESIGN_TIME = 0b0001;
        /// Wrap literals and expressions in begin/end context calls.
        const INSTRUMENTATION = 0b0010;
        /// Helpers are emitted as static members.
        const STATIC_HELPERS = 0b0100;
        /// Indentation padding uses tabs.
        const INDENT_WITH_TABS = 0b1000;
    }
}

/// Names of the runtime members the generated class calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GeneratedClassContext {
    pub execute_method_name: String,
    pub write_method_name: String,
    pub write_to_method_name: String,
    pub write_literal_method_name: String,
    pub write_literal_to_method_name: String,
    pub write_attribute_method_name: String,
    pub write_attribute_to_method_name: String,
    pub template_type_name: String,
    pub define_section_method_name: String,
    pub begin_context_method_name: String,
    pub end_context_method_name: String,
    pub layout_property_name: String,
    pub tag_helper_context: GeneratedTagHelperContext,
}

impl Default for GeneratedClassContext {
    fn default() -> Self {
        GeneratedClassContext {
            execute_method_name: "ExecuteAsync".to_string(),
            write_method_name: "Write".to_string(),
            write_to_method_name: "WriteTo".to_string(),
            write_literal_method_name: "WriteLiteral".to_string(),
            write_literal_to_method_name: "WriteLiteralTo".to_string(),
            write_attribute_method_name: "WriteAttribute".to_string(),
            write_attribute_to_method_name: "WriteAttributeTo".to_string(),
            template_type_name: "HelperResult".to_string(),
            define_section_method_name: "DefineSection".to_string(),
            begin_context_method_name: "BeginContext".to_string(),
            end_context_method_name: "EndContext".to_string(),
            layout_property_name: "Layout".to_string(),
            tag_helper_context: GeneratedTagHelperContext::default(),
        }
    }
}

impl GeneratedClassContext {
    pub fn supports_instrumentation(&self) -> bool {
        !self.begin_context_method_name.is_empty() && !self.end_context_method_name.is_empty()
    }
}

/// Names used by the tag helper runtime glue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GeneratedTagHelperContext {
    pub create_tag_helper_method_name: String,
    pub run_method_name: String,
    pub scope_manager_begin_method_name: String,
    pub scope_manager_end_method_name: String,
    pub execution_context_add_method_name: String,
    pub execution_context_add_tag_helper_attribute_method_name: String,
    pub execution_context_add_html_attribute_method_name: String,
    pub execution_context_output_property_name: String,
    pub output_generate_start_tag_method_name: String,
    pub output_generate_content_method_name: String,
    pub output_generate_end_tag_method_name: String,
    pub start_writing_scope_method_name: String,
    pub end_writing_scope_method_name: String,
    pub execution_context_type_name: String,
    pub runner_type_name: String,
    pub scope_manager_type_name: String,
}

const TAG_HELPER_RUNTIME_NAMESPACE: &str = "Microsoft.AspNet.Razor.Runtime.TagHelpers";

impl Default for GeneratedTagHelperContext {
    fn default() -> Self {
        GeneratedTagHelperContext {
            create_tag_helper_method_name: "CreateTagHelper".to_string(),
            run_method_name: "RunAsync".to_string(),
            scope_manager_begin_method_name: "Begin".to_string(),
            scope_manager_end_method_name: "End".to_string(),
            execution_context_add_method_name: "Add".to_string(),
            execution_context_add_tag_helper_attribute_method_name: "AddTagHelperAttribute"
                .to_string(),
            execution_context_add_html_attribute_method_name: "AddHtmlAttribute".to_string(),
            execution_context_output_property_name: "Output".to_string(),
            output_generate_start_tag_method_name: "GenerateStartTag".to_string(),
            output_generate_content_method_name: "GenerateContent".to_string(),
            output_generate_end_tag_method_name: "GenerateEndTag".to_string(),
            start_writing_scope_method_name: "StartWritingScope".to_string(),
            end_writing_scope_method_name: "EndWritingScope".to_string(),
            execution_context_type_name: format!(
                "{}.TagHelperExecutionContext",
                TAG_HELPER_RUNTIME_NAMESPACE
            ),
            runner_type_name: format!("{}.TagHelperRunner", TAG_HELPER_RUNTIME_NAMESPACE),
            scope_manager_type_name: format!(
                "{}.TagHelperScopeManager",
                TAG_HELPER_RUNTIME_NAMESPACE
            ),
        }
    }
}

/// Everything the generator needs to know about the hosting environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RazorEngineHost {
    pub default_namespace: String,
    pub default_class_name: String,
    /// Used when the template has no `@inherits`.
    pub default_base_class: Option<String>,
    /// Imports emitted after the template's own usings unless already present.
    pub namespace_imports: Vec<String>,
    /// Attributes emitted above the class declaration, without brackets.
    pub class_attributes: Vec<String>,
    pub design_time_mode: bool,
    pub enable_instrumentation: bool,
    pub static_helpers: bool,
    pub indent_with_tabs: bool,
    pub tab_size: usize,
    pub new_line: String,
    pub generated_class_context: GeneratedClassContext,
}

impl Default for RazorEngineHost {
    fn default() -> Self {
        RazorEngineHost {
            default_namespace: "Razor".to_string(),
            default_class_name: "Template".to_string(),
            default_base_class: None,
            namespace_imports: vec!["System".to_string()],
            class_attributes: Vec::new(),
            design_time_mode: false,
            enable_instrumentation: false,
            static_helpers: false,
            indent_with_tabs: false,
            tab_size: 4,
            new_line: "\n".to_string(),
            generated_class_context: GeneratedClassContext::default(),
        }
    }
}

impl RazorEngineHost {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn flags(&self) -> GeneratorFlags {
        let mut flags = GeneratorFlags::empty();
        flags.set(GeneratorFlags::DESIGN_TIME, self.design_time_mode);
        flags.set(
            GeneratorFlags::INSTRUMENTATION,
            self.enable_instrumentation && !self.design_time_mode,
        );
        flags.set(GeneratorFlags::STATIC_HELPERS, self.static_helpers);
        flags.set(GeneratorFlags::INDENT_WITH_TABS, self.indent_with_tabs);
        flags
    }
}
