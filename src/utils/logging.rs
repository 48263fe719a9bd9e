//! Log setup. The terminal is owned by the UI, so records go to a file.

use std::fs::OpenOptions;

use super::persistence;

pub const LOG_FILE: &str = "canton-run.log";

/// Route `log` output to ~/.canton-run/canton-run.log.
///
/// Level defaults to `info` and honours `RUST_LOG`. If the file cannot be
/// opened, logging stays off.
pub fn init() {
    let path = match persistence::save_path(LOG_FILE) {
        Ok(path) => path,
        Err(_) => return,
    };
    let file = match OpenOptions::new().create(true).append(true).open(&path) {
        Ok(file) => file,
        Err(_) => return,
    };

    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init();
}
