//! Tracing subscriber setup.

use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "YULETIDE_LOG";

/// Install a stderr subscriber. `YULETIDE_LOG` wins over `default_level`.
pub fn init(default_level: &str) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| {
            eprintln!("Warning: invalid log level '{default_level}', falling back to warn");
            EnvFilter::new("warn")
        });

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_names(true)
        .try_init();
}
