//! Writing Scope Tests
//!
//! Braced blocks, lambdas and warning pragmas opened and closed by guards.

use razor_compiler::codegen::CSharpCodeWriter;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_auto_space_and_indent_block() {
        let mut writer = CSharpCodeWriter::default();
        writer.write("class A");
        {
            let mut scope = writer.build_scope();
            scope.write_line("int x;");
        }
        assert_eq!(writer.code(), "class A {\n    int x;\n}\n");
        assert_eq!(writer.current_indent(), 0);
    }

    #[test]
    fn should_nest_namespace_and_class() {
        let mut writer = CSharpCodeWriter::default();
        {
            let mut namespace = writer.build_namespace("N");
            let mut class = namespace.build_class_declaration("public", "C", &["B".to_string()]);
            class.write_line("x();");
        }
        assert_eq!(
            writer.code(),
            "namespace N\n{\n    public class C : B\n    {\n        x();\n    }\n}\n"
        );
    }

    #[test]
    fn should_end_unfinished_line_before_closing() {
        let mut writer = CSharpCodeWriter::default();
        {
            let mut scope = writer.build_scope();
            scope.write("x");
        }
        assert_eq!(writer.code(), "{\n    x\n}\n");
    }

    #[test]
    fn should_leave_indent_alone_when_changed_inside_block() {
        let mut writer = CSharpCodeWriter::default();
        {
            let mut scope = writer.build_scope();
            scope.set_indent(10);
            scope.write_line("y");
        }
        assert_eq!(writer.code(), "{\n          y\n          }\n");
        assert_eq!(writer.current_indent(), 10);
    }

    #[test]
    fn should_terminate_lambda_statement() {
        let mut writer = CSharpCodeWriter::default();
        writer.write("Action<int> a = ");
        {
            let mut lambda = writer.build_lambda(true, &["x"]);
            lambda.write_line("Run(x);");
        }
        assert_eq!(writer.code(), "Action<int> a = (x) => {\n    Run(x);\n}\n;\n");
    }

    #[test]
    fn should_write_async_lambda_without_terminator() {
        let mut writer = CSharpCodeWriter::default();
        drop(writer.build_async_lambda(false, &["w"]));
        assert_eq!(writer.code(), "async(w) => {\n}\n");
    }

    #[test]
    fn should_declare_method_with_parameters() {
        let mut writer = CSharpCodeWriter::default();
        drop(writer.build_method_declaration("private", "void", "M", &[("int", "a"), ("string", "b")]));
        assert_eq!(writer.code(), "private void M(int a, string b)\n{\n}\n");
    }

    #[test]
    fn should_declare_constructor() {
        let mut writer = CSharpCodeWriter::default();
        drop(writer.build_constructor("public", "Index"));
        assert_eq!(writer.code(), "public Index()\n{\n}\n");
    }

    #[test]
    fn should_restore_disabled_warning() {
        let mut writer = CSharpCodeWriter::default();
        {
            let mut pragma = writer.build_disable_warning_scope(1998);
            pragma.write_line("x");
        }
        assert_eq!(
            writer.code(),
            "#pragma warning disable 1998\nx\n#pragma warning restore 1998\n"
        );
    }

    #[test]
    fn should_indent_with_configured_tab_size() {
        let mut writer = CSharpCodeWriter::new("\n", 2);
        {
            let mut scope = writer.build_scope();
            scope.write_line("z");
        }
        assert_eq!(writer.code(), "{\n  z\n}\n");
    }
}
