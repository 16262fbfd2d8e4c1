//! Console logging for phase transitions.

use std::io::IsTerminal;

use tracing::{Level, Subscriber};

/// Transitions at `info` to stdout, without targets.
pub fn build_subscriber(use_ansi: bool) -> impl Subscriber + Send + Sync + 'static {
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .with_target(false)
        .with_ansi(use_ansi)
        .with_writer(std::io::stdout)
        .finish()
}

/// Installs the global subscriber, with colours only when stdout is a
/// terminal. Calling this more than once is harmless.
pub fn init_logging() {
    let use_ansi = std::io::stdout().is_terminal();
    let _ = tracing::subscriber::set_global_default(build_subscriber(use_ansi));
}
