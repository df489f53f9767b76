//! Tracing for tests
//!
//! Output goes through the test writer, so it only shows for failing tests
//! or with `--nocapture`. `RUST_LOG` overrides the default filter.

use std::sync::Once;

use tracing_subscriber::{filter::filter_fn, fmt, prelude::*, EnvFilter};

/// Crate targets at trace, dependencies at warn.
pub const DEFAULT_TEST_FILTER: &str = "googlecl=trace,warn";

// line editor internals log every keystroke at debug
const NOISY_TARGETS: [&str; 1] = ["rustyline"];

static TEST_LOGGING: Once = Once::new();

/// Install the test subscriber; later calls are no-ops.
pub fn init_test_logging() {
    TEST_LOGGING.call_once(|| {
        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_TEST_FILTER));
        let quiet = filter_fn(|metadata| {
            !NOISY_TARGETS
                .iter()
                .any(|name| metadata.target().starts_with(name))
        });

        let subscriber = tracing_subscriber::registry().with(
            fmt::layer()
                .with_test_writer()
                .with_target(true)
                .with_filter(quiet)
                .with_filter(env_filter),
        );
        if subscriber.try_init().is_err() {
            tracing::debug!("tracing subscriber already installed");
        }
    });
}
