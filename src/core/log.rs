//! Logging setup. Diagnostics go to stderr so they never mix with converter output.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{
    EnvFilter, filter::Targets, fmt, prelude::__tracing_subscriber_SubscriberExt,
    util::SubscriberInitExt,
};

/// Installs the global subscriber.
///
/// Without `verbose` only warnings from this crate are shown, such as
/// currencies dropped from the rate table. `RUST_LOG` widens the filter for
/// dependencies.
pub fn init_logging(verbose: bool) {
    let (app_level, default_directive) = if verbose {
        (LevelFilter::DEBUG, "debug")
    } else {
        (LevelFilter::WARN, "warn")
    };
    let app_filter = Targets::new()
        .with_target(env!("CARGO_CRATE_NAME"), app_level)
        .with_default(LevelFilter::TRACE);
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .pretty()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(app_filter)
        .with(env_filter)
        .init();
}
