//! Source Map Tests

use razor_compiler::codegen::{LineMapping, MappingLocation, RazorCodeGenerator};
use razor_compiler::output::source_map::SourceMapBuilder;
use razor_compiler::parse_util::{SourceLocation, SourceSpan};
use razor_compiler::chunks::{Chunk, ExpressionChunk, LiteralChunk, UsingChunk};
use razor_compiler::{CodeTree, GeneratorError, RazorEngineHost};

fn mapping(document: (usize, usize), generated: (usize, usize)) -> LineMapping {
    LineMapping {
        document_location: MappingLocation::new(SourceLocation::new(0, document.0, document.1), 1),
        generated_location: MappingLocation::new(SourceLocation::new(0, generated.0, generated.1), 1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_encode_mappings_in_generated_order() {
        let mut builder = SourceMapBuilder::new(Some("Index.cs"), "Index.cshtml", None);
        builder
            .add_line_mapping(&mapping((1, 5), (2, 6)))
            .add_line_mapping(&mapping((0, 1), (0, 0)));
        let map = builder.build().unwrap();

        assert_eq!(map.version, 3);
        assert_eq!(map.file.as_deref(), Some("Index.cs"));
        assert_eq!(map.sources, vec!["Index.cshtml".to_string()]);
        assert_eq!(map.mappings, "AAAC;;MACI");
    }

    #[test]
    fn should_separate_segments_on_one_line() {
        let mut builder = SourceMapBuilder::new(None, "a.cshtml", None);
        builder.add_line_mappings(&[mapping((0, 0), (0, 0)), mapping((0, 4), (0, 10))]);
        assert_eq!(builder.build().unwrap().mappings, "AAAA,UAAI");
    }

    #[test]
    fn should_keep_first_mapping_at_a_position() {
        let mut builder = SourceMapBuilder::new(None, "a.cshtml", None);
        builder.add_line_mappings(&[mapping((3, 0), (1, 0)), mapping((7, 0), (1, 0))]);
        assert_eq!(builder.build().unwrap().mappings, ";AAGA");
    }

    #[test]
    fn should_require_source_name() {
        let builder = SourceMapBuilder::new(None, "", None);
        assert!(matches!(builder.build(), Err(GeneratorError::SourceMap(_))));
    }

    #[test]
    fn should_serialize_camel_case_fields() {
        let mut builder = SourceMapBuilder::new(None, "a.cshtml", Some("<p>"));
        builder.add_line_mapping(&mapping((0, 0), (0, 0)));
        let json = builder.build().unwrap().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["sourceRoot"], "");
        assert_eq!(value["sourcesContent"][0], "<p>");
        assert!(value.get("file").is_none());
    }

    #[test]
    fn should_build_map_for_generated_results() {
        let tree = CodeTree::new(vec![
            Chunk::Using(UsingChunk {
                span: SourceSpan::new(SourceLocation::new(1, 0, 1), 12),
                namespace: "System".to_string(),
            }),
            Chunk::Literal(LiteralChunk {
                span: SourceSpan::new(SourceLocation::new(14, 1, 0), 4),
                text: "<h1>".to_string(),
            }),
            Chunk::Expression(ExpressionChunk {
                span: SourceSpan::new(SourceLocation::new(19, 1, 5), 5),
                code: "Title".to_string(),
            }),
        ]);
        let host = RazorEngineHost {
            default_base_class: Some("RazorPage".to_string()),
            namespace_imports: vec!["System".to_string(), "System.Linq".to_string()],
            ..RazorEngineHost::default()
        };
        let results = RazorCodeGenerator::new(host, "Index", "", Some("Index.cshtml"))
            .generate(&tree)
            .unwrap();
        let map = results.source_map(Some("Index.cs"), None).unwrap();

        let expected = format!(";;;AAAC{}MACI", ";".repeat(20));
        assert_eq!(map.mappings, expected);
        assert_eq!(map.sources, vec!["Index.cshtml".to_string()]);
    }

    #[test]
    fn should_name_unknown_source_with_sentinel() {
        let results = RazorCodeGenerator::new(RazorEngineHost::default(), "T", "", None)
            .generate(&CodeTree::default())
            .unwrap();
        let map = results.source_map(None, None).unwrap();
        assert_eq!(map.sources, vec!["--------------------".to_string()]);
        assert_eq!(map.mappings, "");
    }
}
