//! Tracing setup.

use tracing_subscriber::EnvFilter;

/// Install a stderr subscriber.
///
/// `RUST_LOG` wins when set. Otherwise verbose mode shows debug output of the
/// linkrow crates, and only errors are shown otherwise.
pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| fallback_filter(verbose));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// `linkrow` matches every target starting with it, library crates included.
fn fallback_filter(verbose: bool) -> EnvFilter {
    EnvFilter::new(if verbose { "linkrow=debug" } else { "error" })
}

#[cfg(test)]
mod tests {
    use tracing::Level;
    use tracing_subscriber::layer::SubscriberExt;

    use super::*;

    #[test]
    fn test_verbose_covers_library_crates() {
        let subscriber = tracing_subscriber::registry().with(fallback_filter(true));
        tracing::subscriber::with_default(subscriber, || {
            assert!(tracing::enabled!(target: "linkrow_client::client", Level::DEBUG));
            assert!(tracing::enabled!(target: "linkrow_resolve::resolver", Level::DEBUG));
            assert!(!tracing::enabled!(target: "reqwest::connect", Level::DEBUG));
        });
    }

    #[test]
    fn test_quiet_shows_errors_only() {
        let subscriber = tracing_subscriber::registry().with(fallback_filter(false));
        tracing::subscriber::with_default(subscriber, || {
            assert!(tracing::enabled!(target: "linkrow_client::pages", Level::ERROR));
            assert!(!tracing::enabled!(target: "linkrow_client::pages", Level::WARN));
        });
    }
}
