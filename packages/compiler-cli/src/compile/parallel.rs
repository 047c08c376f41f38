use std::path::PathBuf;
use std::time::Instant;

use rayon::prelude::*;

use super::{compile_template, CompiledTemplate};
use crate::config::ProjectConfig;

/// Compiles every file on the rayon pool. Results keep the order of `files`
/// and one failing file does not stop the others.
pub fn parallel_compile(
    files: &[PathBuf],
    config: &ProjectConfig,
) -> Vec<(PathBuf, anyhow::Result<CompiledTemplate>)> {
    let start = Instant::now();
    tracing::info!("compiling {} templates in parallel", files.len());

    let results: Vec<_> = files
        .par_iter()
        .map(|path| {
            let _span = tracing::debug_span!("template", path = %path.display()).entered();
            (path.clone(), compile_template(path, config))
        })
        .collect();

    tracing::info!("compilation finished in {:?}", start.elapsed());
    results
}
