//! Logging utilities and structured logging support

pub use log::{debug, error, info, trace, warn};

/// Initialize logging from the `RUST_LOG` environment variable
pub fn init() {
    env_logger::init();
}

/// Initialize logging with a fallback filter for quiet environments
///
/// `RUST_LOG` still takes precedence when set; the filter string only
/// applies when it is absent. Demo binaries call this with `"info"` so
/// their reports show up out of the box.
pub fn init_with_default(filter: &str) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter)).init();
}
