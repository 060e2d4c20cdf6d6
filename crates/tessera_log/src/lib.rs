//! Logging.

pub use log::{Level, LevelFilter, debug, error, info, log, log_enabled, trace, warn};
