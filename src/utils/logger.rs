use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global tracing subscriber for the CLI. `RUST_LOG` wins when
/// set; otherwise `verbose` picks the default filter.
pub fn init(verbose: bool) {
    let default_filter = if verbose {
        "steam_stats=debug,info"
    } else {
        "steam_stats=info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false).compact())
        .init();
}
