//! Code Visitor Tests
//!
//! Rendering of the execute method body at runtime and design time.

use razor_compiler::chunks::*;
use razor_compiler::codegen::{
    DefaultAttributeValueRenderer, LineMapping, MappingLocation, UNKNOWN_SOURCE_FILE,
};
use razor_compiler::parse_util::SourceSpan;

#[path = "util.rs"]
mod util;
use util::*;

fn section(name: &str, children: Vec<Chunk>) -> Chunk {
    Chunk::Section(SectionChunk {
        span: SourceSpan::default(),
        name: name.to_string(),
        children,
    })
}

fn expression_block(children: Vec<Chunk>) -> Chunk {
    Chunk::ExpressionBlock(ExpressionBlockChunk {
        span: SourceSpan::new(loc(0, 0, 0), 8),
        children,
    })
}

/// `class="btn @cls"` spanning columns 4..20.
fn class_attribute() -> Chunk {
    Chunk::CodeAttribute(CodeAttributeChunk {
        span: SourceSpan::new(loc(4, 0, 4), 17),
        attribute: "class".to_string(),
        prefix: tagged(" class=\"", loc(4, 0, 4)),
        suffix: tagged("\"", loc(20, 0, 20)),
        children: vec![
            Chunk::LiteralCodeAttribute(LiteralCodeAttributeChunk {
                span: SourceSpan::new(loc(12, 0, 12), 3),
                prefix: tagged("", loc(12, 0, 12)),
                value: Some(tagged("btn", loc(12, 0, 12))),
                value_location: loc(12, 0, 12),
                children: vec![],
            }),
            Chunk::DynamicCodeAttribute(DynamicCodeAttributeChunk {
                span: SourceSpan::new(loc(15, 0, 15), 5),
                prefix: tagged(" ", loc(15, 0, 15)),
                value_location: loc(16, 0, 16),
                children: vec![expression("cls", loc(17, 0, 17))],
            }),
        ],
    })
}

fn location(
    absolute_index: usize,
    line_index: usize,
    character_index: usize,
    content_length: usize,
) -> MappingLocation {
    MappingLocation::new(loc(absolute_index, line_index, character_index), content_length)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_write_literal_at_runtime() {
        let code = render_body_code(&[literal("<p>", loc(0, 0, 0))], runtime_host());
        assert_eq!(code, "WriteLiteral(\"<p>\");\n");
    }

    #[test]
    fn should_skip_literals_at_design_time() {
        let code = render_body_code(&[literal("<p>", loc(0, 0, 0))], design_time_host());
        assert_eq!(code, "");
    }

    #[test]
    fn should_skip_empty_literal() {
        let code = render_body_code(&[literal("", loc(0, 0, 0))], runtime_host());
        assert_eq!(code, "");
    }

    #[test]
    fn should_write_expression_at_template_column() {
        let (code, mappings) = render_body(&[expression("Model.Name", loc(5, 1, 10))], runtime_host());
        assert_eq!(
            code,
            format!("{}    Write(Model.Name);\n{}", line_directive(2), PRAGMA_END)
        );
        assert_eq!(
            mappings,
            vec![LineMapping {
                document_location: location(5, 1, 10, 10),
                generated_location: location(32, 1, 10, 10),
            }]
        );
    }

    #[test]
    fn should_not_pad_when_prefix_is_wider_than_column() {
        let code = render_body_code(&[expression("x", loc(0, 0, 2))], runtime_host());
        assert_eq!(code, format!("{}Write(x);\n{}", line_directive(1), PRAGMA_END));
    }

    #[test]
    fn should_pad_with_tabs_when_configured() {
        let mut host = runtime_host();
        host.indent_with_tabs = true;
        let code = render_body_code(&[expression("x", loc(0, 0, 15))], host);
        assert_eq!(code, format!("{}\t\t Write(x);\n{}", line_directive(1), PRAGMA_END));
    }

    #[test]
    fn should_assign_expression_at_design_time() {
        let (code, mappings) = render_body(&[expression("Model", loc(3, 0, 8))], design_time_host());
        assert_eq!(code, format!("{}  __o = Model;\n{}", line_directive(1), PRAGMA_END));
        assert_eq!(mappings[0].generated_location, location(30, 1, 8, 5));
    }

    #[test]
    fn should_map_statement_verbatim() {
        let (code, mappings) =
            render_body(&[statement("\n    var x = 1;\n", loc(2, 0, 2))], runtime_host());
        assert_eq!(
            code,
            format!("{}  \n    var x = 1;\n{}", line_directive(1), PRAGMA_END)
        );
        assert_eq!(mappings[0].document_location, location(2, 0, 2, 16));
        assert_eq!(mappings[0].generated_location, location(24, 1, 2, 16));
    }

    #[test]
    fn should_skip_empty_statement() {
        let (code, mappings) = render_body(&[statement("", loc(0, 0, 0))], runtime_host());
        assert_eq!(code, "");
        assert!(mappings.is_empty());
    }

    #[test]
    fn should_use_sentinel_without_source_file() {
        let (code, _) = try_render_body_with(
            &[expression("x", loc(0, 0, 0))],
            runtime_host(),
            None,
            &DefaultAttributeValueRenderer,
        )
        .unwrap();
        assert!(code.starts_with(&format!("#line 1 \"{}\"\n", UNKNOWN_SOURCE_FILE)));
    }

    #[test]
    fn should_wrap_instrumented_spans() {
        let mut host = runtime_host();
        host.enable_instrumentation = true;
        let chunks = vec![literal("<p>", loc(0, 0, 0)), expression("x", loc(3, 0, 3))];
        let code = render_body_code(&chunks, host);
        assert_eq!(
            code,
            format!(
                "BeginContext(0, 3, true);\nWriteLiteral(\"<p>\");\nEndContext();\n\
                 BeginContext(3, 1, false);\n{}Write(x);\n{}EndContext();\n",
                line_directive(1),
                PRAGMA_END
            )
        );
    }

    #[test]
    fn should_inject_expression_block_into_write_call() {
        let chunks = vec![expression_block(vec![expression("a + b", loc(2, 0, 2))])];
        let code = render_body_code(&chunks, runtime_host());
        assert_eq!(
            code,
            format!("Write(\n{}  a + b\n{});\n", line_directive(1), PRAGMA_END)
        );
    }

    #[test]
    fn should_assign_expression_block_at_design_time() {
        let chunks = vec![expression_block(vec![expression("a + b", loc(2, 0, 2))])];
        let code = render_body_code(&chunks, design_time_host());
        assert_eq!(
            code,
            format!("__o = \n{}  a + b\n{};\n", line_directive(1), PRAGMA_END)
        );
    }

    #[test]
    fn should_set_layout_at_runtime_only() {
        let layout = Chunk::SetLayout(SetLayoutChunk {
            span: SourceSpan::default(),
            layout_path: "~/_Layout.cshtml".to_string(),
        });
        let chunks = vec![layout];
        assert_eq!(
            render_body_code(&chunks, runtime_host()),
            "Layout = \"~/_Layout.cshtml\";\n"
        );
        assert_eq!(render_body_code(&chunks, design_time_host()), "");
    }

    #[test]
    fn should_define_section_with_its_own_writer() {
        let chunks = vec![
            section("Scripts", vec![literal("<b>", loc(0, 0, 0))]),
            literal("after", loc(3, 0, 3)),
        ];
        let code = render_body_code(&chunks, runtime_host());
        assert_eq!(
            code,
            "DefineSection(\"Scripts\", async(__razor_section_writer) => {\n    \
             WriteLiteralTo(__razor_section_writer, \"<b>\");\n}\n);\n\
             WriteLiteral(\"after\");\n"
        );
    }

    #[test]
    fn should_target_section_writer_for_expressions() {
        let chunks = vec![section("Scripts", vec![expression("foo", loc(40, 3, 12))])];
        let code = render_body_code(&chunks, runtime_host());
        assert_eq!(
            code,
            format!(
                "DefineSection(\"Scripts\", async(__razor_section_writer) => {{\n\
                 {}WriteTo(__razor_section_writer, foo);\n{}}}\n);\n",
                line_directive(4),
                PRAGMA_END
            )
        );
    }

    #[test]
    fn should_write_template_as_helper_result_lambda() {
        let template = Chunk::Template(TemplateChunk {
            span: SourceSpan::default(),
            children: vec![literal("<b>", loc(0, 0, 0))],
        });
        let code = render_body_code(&[template], runtime_host());
        assert_eq!(
            code,
            "item => new HelperResult(async(__razor_template_writer) => {\n    \
             WriteLiteralTo(__razor_template_writer, \"<b>\");\n}\n)\n"
        );
    }

    #[test]
    fn should_write_attribute_with_literal_and_dynamic_values() {
        let code = render_body_code(&[class_attribute()], runtime_host());
        let expected = format!(
            "{}\n{}\n{}{}cls\n{}, 16), false));\n",
            r#"WriteAttribute("class", Tuple.Create(" class=\"", 4), Tuple.Create("\"", 20), Tuple.Create(Tuple.Create("", 12), Tuple.Create("btn", 12), true), "#,
            r#"Tuple.Create(Tuple.Create(" ", 15), Tuple.Create<System.Object, System.Int32>("#,
            line_directive(1),
            " ".repeat(17),
            PRAGMA_END
        );
        assert_eq!(code, expected);
    }

    #[test]
    fn should_only_visit_attribute_values_at_design_time() {
        let (code, mappings) = render_body(&[class_attribute()], design_time_host());
        assert_eq!(
            code,
            format!("{}{}__o = cls;\n{}", line_directive(1), " ".repeat(11), PRAGMA_END)
        );
        assert_eq!(mappings.len(), 1);
        assert_eq!(mappings[0].document_location, location(17, 0, 17, 3));
    }

    #[test]
    fn should_buffer_markup_attribute_values() {
        let attribute = Chunk::CodeAttribute(CodeAttributeChunk {
            span: SourceSpan::default(),
            attribute: "title".to_string(),
            prefix: tagged(" title=\"", loc(0, 0, 0)),
            suffix: tagged("\"", loc(10, 0, 10)),
            children: vec![Chunk::LiteralCodeAttribute(LiteralCodeAttributeChunk {
                span: SourceSpan::default(),
                prefix: tagged("", loc(8, 0, 8)),
                value: None,
                value_location: loc(8, 0, 8),
                children: vec![literal("x", loc(8, 0, 8))],
            })],
        });
        let code = render_body_code(&[attribute], runtime_host());
        let expected = format!(
            "{}\n{}\n}}\n), 8), false));\n",
            r#"WriteAttribute("title", Tuple.Create(" title=\"", 0), Tuple.Create("\"", 10), Tuple.Create(Tuple.Create("", 8), Tuple.Create<System.Object, System.Int32>(new HelperResult(async(__razor_attribute_value_writer) => {"#,
            r#"    WriteLiteralTo(__razor_attribute_value_writer, "x");"#
        );
        assert_eq!(code, expected);
    }

    #[test]
    fn should_skip_dynamic_attribute_without_value() {
        let attribute = Chunk::CodeAttribute(CodeAttributeChunk {
            span: SourceSpan::default(),
            attribute: "id".to_string(),
            prefix: tagged(" id=\"", loc(0, 0, 0)),
            suffix: tagged("\"", loc(6, 0, 6)),
            children: vec![Chunk::DynamicCodeAttribute(DynamicCodeAttributeChunk {
                span: SourceSpan::default(),
                prefix: tagged("", loc(5, 0, 5)),
                value_location: loc(5, 0, 5),
                children: vec![],
            })],
        });
        let code = render_body_code(&[attribute], runtime_host());
        assert_eq!(
            code,
            "WriteAttribute(\"id\", Tuple.Create(\" id=\\\"\", 0), Tuple.Create(\"\\\"\", 6));\n"
        );
    }

    #[test]
    fn should_leave_helpers_to_member_pass() {
        let helper = Chunk::Helper(HelperChunk {
            span: SourceSpan::default(),
            signature: tagged("Bold(string s)", loc(8, 0, 8)),
            footer: tagged("", loc(30, 0, 30)),
            header_complete: true,
            children: vec![literal("<b>", loc(20, 0, 20))],
        });
        assert_eq!(render_body_code(&[helper], runtime_host()), "");
    }
}
