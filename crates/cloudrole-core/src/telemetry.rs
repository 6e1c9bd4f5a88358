//! Tracing initialisation for cloudrole binaries.
//!
//! Call [`init_tracing`] once at program start. Later calls are ignored
//! because the global subscriber can only be set once per process.

use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Filter override read before `RUST_LOG`.
pub const LOG_ENV: &str = "CLOUDROLE_LOG";

const CLOUDROLE_TARGETS: [&str; 3] = ["runtime_manifest", "cloudrole_core", "cloudrole"];

/// Initialise the global tracing subscriber.
///
/// * `json` - emit newline-delimited JSON log lines.
/// * `level` - verbosity for the cloudrole crates when neither
///   `CLOUDROLE_LOG` nor `RUST_LOG` is set. Other crates log at `warn`.
pub fn init_tracing(json: bool, level: Level) {
    let configured = std::env::var(LOG_ENV)
        .or_else(|_| std::env::var(EnvFilter::DEFAULT_ENV))
        .ok();
    let directives = filter_directives(configured.as_deref(), level);
    let env_filter = EnvFilter::try_new(&directives)
        .unwrap_or_else(|_| EnvFilter::new(filter_directives(None, level)));

    // Logs go to stderr so command output on stdout stays machine-readable.
    let layer = fmt::layer().with_target(false).with_writer(std::io::stderr);
    if json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(layer.json())
            .try_init()
            .ok();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(layer)
            .try_init()
            .ok();
    }
}

/// Filter directives: a non-blank configured value wins, otherwise `level`
/// applies to the cloudrole crates only.
fn filter_directives(configured: Option<&str>, level: Level) -> String {
    match configured.map(str::trim) {
        Some(value) if !value.is_empty() => value.to_string(),
        _ => {
            let level = level.as_str().to_ascii_lowercase();
            let mut directives = vec!["warn".to_string()];
            directives.extend(
                CLOUDROLE_TARGETS
                    .iter()
                    .map(|target| format!("{target}={level}")),
            );
            directives.join(",")
        }
    }
}
