use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[cfg(feature = "verbose_log")]
const DEFAULT_FILTER: &str = "debug,hyper=info";
#[cfg(not(feature = "verbose_log"))]
const DEFAULT_FILTER: &str = "info,tower_http=info";

pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();
}
