//! Diagnostic tracing, controlled by `RUST_LOG` (default `warn`).
//!
//! The terminal UI owns stdout/stderr while it runs, so output goes to a log
//! file next to the stored list. Stderr is used only if that file can't be opened.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

pub fn init(log_file: &Path) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let file = log_file
        .parent()
        .map_or(Ok(()), std::fs::create_dir_all)
        .and_then(|_| OpenOptions::new().create(true).append(true).open(log_file));

    let result = match file {
        Ok(file) => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .try_init(),
        Err(_) => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .compact()
            .try_init(),
    };

    if let Err(e) = result {
        eprintln!("Logging already initialised, keeping the existing subscriber: {}", e);
    }
}
