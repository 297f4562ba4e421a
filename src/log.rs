//! Logging setup for the host
//!
//! The library only talks to the `log` facade; the binary installs a
//! log4rs console appender on stderr.

use log::LevelFilter;

#[cfg(not(target_arch = "wasm32"))]
use log4rs::{
    append::console::{ConsoleAppender, Target},
    config::{Appender, Config, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
};

/// Install the global logger. Calling twice returns an error from log4rs
/// rather than replacing the first logger.
#[cfg(not(target_arch = "wasm32"))]
pub fn init_log(level: LevelFilter) -> Result<(), String> {
    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new("{d(%H:%M:%S%.3f)} {h({l:<5})} {t} {m}{n}")))
        .build();

    let config = Config::builder()
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(level)))
                .build("stderr", Box::new(stderr)),
        )
        .build(Root::builder().appender("stderr").build(level))
        .map_err(|e| format!("invalid log config: {}", e))?;

    log4rs::init_config(config)
        .map(|_handle| ())
        .map_err(|e| format!("failed to install logger: {}", e))
}

/// Browsers have no stderr; logging stays disabled there
#[cfg(target_arch = "wasm32")]
pub fn init_log(_level: LevelFilter) -> Result<(), String> {
    Ok(())
}
