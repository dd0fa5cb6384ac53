//! Diagnostic logging setup for the binary.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Maps the `-v` count to a default level.
pub fn level_for(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// Installs a stderr subscriber.
///
/// `RUST_LOG` wins when set; otherwise the level comes from `verbose`.
/// Logs never go to stdout, which carries command output.
pub fn init(verbose: u8) {
    let filter = EnvFilter::builder()
        .with_default_directive(level_for(verbose).into())
        .from_env_lossy();

    // A second call (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
