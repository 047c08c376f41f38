//! Line Mapping Tests
//!
//! Pragmas written around mapped code and the recorded mapping table.

use razor_compiler::codegen::{CSharpCodeWriter, LineMapping, LineMappingManager, MappingLocation};
use razor_compiler::parse_util::SourceLocation;

fn mapping_location(
    absolute_index: usize,
    line_index: usize,
    character_index: usize,
    content_length: usize,
) -> MappingLocation {
    MappingLocation::new(
        SourceLocation::new(absolute_index, line_index, character_index),
        content_length,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_fence_mapped_code_with_pragmas() {
        let mut writer = CSharpCodeWriter::default();
        writer.set_indent(8);
        writer.write_line("{");
        {
            let mut mapping =
                writer.build_line_mapping(SourceLocation::new(10, 2, 4), Some(5), "test.cshtml");
            mapping.write("  Write(");
            mapping.mark_line_mapping_start();
            mapping.write("Model");
            mapping.mark_line_mapping_end();
            mapping.write_line(");");
        }
        writer.write_line("}");

        let (code, mappings) = writer.finish();
        assert_eq!(
            code,
            "        {\n#line 3 \"test.cshtml\"\n  Write(Model);\n\n#line default\n#line hidden\n        }\n"
        );
        assert_eq!(
            mappings,
            vec![LineMapping {
                document_location: mapping_location(10, 2, 4, 5),
                generated_location: mapping_location(40, 2, 8, 5),
            }]
        );
    }

    #[test]
    fn should_break_line_before_directive() {
        let mut writer = CSharpCodeWriter::default();
        writer.write("public HelperResult ");
        {
            let mut mapping =
                writer.build_line_mapping(SourceLocation::new(0, 0, 8), Some(4), "f.cshtml");
            mapping.write("Bold");
        }
        assert_eq!(
            writer.code(),
            "public HelperResult \n#line 1 \"f.cshtml\"\nBold\n\n#line default\n#line hidden\n"
        );
    }

    #[test]
    fn should_measure_unmarked_mapping_without_pragmas() {
        let mut writer = CSharpCodeWriter::default();
        writer.write("x = ");
        {
            let mut mapping =
                writer.build_line_mapping_without_pragmas(SourceLocation::new(3, 0, 3), None);
            mapping.write("value");
        }
        writer.write(";");

        let (code, mappings) = writer.finish();
        assert_eq!(code, "x = value;");
        assert_eq!(mappings.len(), 1);
        assert_eq!(mappings[0].document_location, mapping_location(3, 0, 3, 5));
        assert_eq!(mappings[0].generated_location, mapping_location(4, 0, 4, 5));
    }

    #[test]
    fn should_suspend_and_restore_indent() {
        let mut writer = CSharpCodeWriter::default();
        writer.set_indent(12);
        {
            let mut mapping =
                writer.build_line_mapping_without_pragmas(SourceLocation::new(0, 0, 0), Some(1));
            assert_eq!(mapping.current_indent(), 0);
            mapping.write("a");
        }
        assert_eq!(writer.current_indent(), 12);
        assert_eq!(writer.code(), "a");
    }

    #[test]
    fn should_write_pragmas_without_recording_mapping() {
        let mut writer = CSharpCodeWriter::default();
        {
            let mut pragma = writer.build_line_pragma(SourceLocation::new(7, 1, 0), "a.cshtml");
            pragma.write_line("code();");
        }
        let (code, mappings) = writer.finish();
        assert_eq!(code, "#line 2 \"a.cshtml\"\ncode();\n\n#line default\n#line hidden\n");
        assert!(mappings.is_empty());
    }

    #[test]
    fn should_keep_mappings_in_recording_order() {
        let mut manager = LineMappingManager::new();
        manager.add_mapping(mapping_location(9, 1, 0, 1), mapping_location(30, 4, 0, 1));
        manager.add_mapping(mapping_location(2, 0, 2, 1), mapping_location(10, 2, 0, 1));
        assert_eq!(manager.len(), 2);
        assert_eq!(manager.mappings()[0].document_location.absolute_index, 9);
        assert_eq!(manager.mappings()[1].document_location.absolute_index, 2);
    }

    #[test]
    fn should_serialize_mappings_in_camel_case() {
        let mapping = LineMapping {
            document_location: mapping_location(1, 0, 1, 2),
            generated_location: mapping_location(5, 1, 0, 2),
        };
        let json = serde_json::to_value(mapping).unwrap();
        assert_eq!(json["documentLocation"]["characterIndex"], 1);
        assert_eq!(json["generatedLocation"]["contentLength"], 2);
    }
}
