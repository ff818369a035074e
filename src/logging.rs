use tracing_subscriber::{fmt, EnvFilter};
use tracing_subscriber::util::SubscriberInitExt;

const DEFAULT_FILTER: &str = "pinterest_proxy=info,tower_http=info";

/// Installs the global fmt subscriber. `RUST_LOG` overrides the default filter.
/// Calling this more than once is a no-op.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let _ = fmt().with_env_filter(filter).finish().try_init();
}
