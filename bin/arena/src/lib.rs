//! Arena CLI Library
//!
//! Command implementations and the HTTP server for the JumpArena site. The
//! binary entry point lives in `main.rs`.
//!
//! # Modules
//!
//! - [`cmd`] - Command implementations (serve, sitemap, check)
//! - [`server`] - Router, handlers and shared application state

pub mod cmd;
pub mod server;

pub use arena_core::Config;

/// Initialize tracing with the specified verbosity level.
///
/// `RUST_LOG` directives are honoured; `verbose` sets the floor
/// (0 = WARN, 1 = INFO, 2 = DEBUG, 3+ = TRACE).
pub fn init_tracing(verbose: u8) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();
}
