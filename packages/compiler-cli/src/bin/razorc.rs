//! razorc: compiles Razor chunk trees into C#.

use clap::{Arg, ArgAction, Command};
use std::path::PathBuf;
use std::process;

use razor_compiler_cli::perform_compile::{perform_compilation_simple, CommandLineOptions};
use razor_compiler_cli::tracing_config::init_tracing;

fn main() {
    init_tracing();

    let matches = Command::new("razorc")
        .version(razor_compiler_cli::version())
        .about("Razor template code generator")
        .arg(
            Arg::new("project")
                .short('p')
                .long("project")
                .value_name("PATH")
                .help("Path to razor.json or a directory containing it"),
        )
        .arg(
            Arg::new("out-dir")
                .short('o')
                .long("out-dir")
                .value_name("DIR")
                .help("Directory for generated files"),
        )
        .arg(
            Arg::new("root-namespace")
                .long("root-namespace")
                .value_name("NAMESPACE")
                .help("Namespace of the generated classes"),
        )
        .arg(
            Arg::new("design-time")
                .long("design-time")
                .action(ArgAction::SetTrue)
                .help("Generate editor-oriented code"),
        )
        .arg(
            Arg::new("source-map")
                .long("source-map")
                .action(ArgAction::SetTrue)
                .help("Write <name>.cs.map next to each generated file"),
        )
        .arg(
            Arg::new("emit-mappings")
                .long("emit-mappings")
                .action(ArgAction::SetTrue)
                .help("Write the line mapping table as <name>.mappings.json"),
        )
        .arg(
            Arg::new("files")
                .value_name("FILE")
                .num_args(0..)
                .help("Chunk tree files; defaults to the project's include globs"),
        )
        .get_matches();

    let options = CommandLineOptions {
        project: matches.get_one::<String>("project").map(PathBuf::from),
        files: matches
            .get_many::<String>("files")
            .map(|files| files.map(PathBuf::from).collect())
            .unwrap_or_default(),
        out_dir: matches.get_one::<String>("out-dir").map(PathBuf::from),
        root_namespace: matches.get_one::<String>("root-namespace").cloned(),
        design_time: matches.get_flag("design-time"),
        source_map: matches.get_flag("source-map"),
        emit_mappings: matches.get_flag("emit-mappings"),
    };

    let result = perform_compilation_simple(&options);
    for file in &result.emitted_files {
        println!("{}", file.display());
    }

    if result.has_errors() {
        for diag in &result.diagnostics {
            eprintln!("Error: {}", diag);
        }
        process::exit(1);
    }
}
