//! Tracing setup for `razorc`.
//!
//! The subscriber is only installed when `RAZOR_LOG` or `RUST_LOG` is set.
//! `RAZOR_LOG` wins when both are present and uses the same directive
//! syntax, e.g. `RAZOR_LOG=razor_compiler::codegen=debug`.
//!
//! Output goes to stderr so generated code piped to stdout stays clean.

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter, Registry};

pub const LOG_ENV_VAR: &str = "RAZOR_LOG";

fn build_filter() -> Option<EnvFilter> {
    if let Ok(val) = std::env::var(LOG_ENV_VAR) {
        Some(EnvFilter::builder().parse_lossy(val))
    } else if std::env::var("RUST_LOG").is_ok() {
        Some(EnvFilter::from_default_env())
    } else {
        None
    }
}

/// Installs the global subscriber. Calling it twice is harmless.
pub fn init_tracing() {
    let Some(filter) = build_filter() else {
        return;
    };
    let subscriber = Registry::default().with(filter).with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true),
    );
    let _ = tracing::subscriber::set_global_default(subscriber);
}
