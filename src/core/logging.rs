//! Logging initialization

/// Initialize the logging system.
///
/// Logs go to stdout with a default filter level of `info`, overridable
/// through the `RUST_LOG` environment variable. Calling this more than once
/// is harmless; later calls keep the first logger.
pub fn init() {
    let mut log_builder = env_logger::Builder::new();
    log_builder
        .target(env_logger::Target::Stdout)
        .filter_level(log::LevelFilter::Info)
        .parse_env("RUST_LOG");

    if log_builder.try_init().is_err() {
        log::debug!("Logger already initialized");
    }
}
