//! Logging setup on `tracing_subscriber`. Library `log` records are bridged in.
//! `RUST_LOG` overrides the default filter. The binary is named `glyphrle`, so
//! `glyphrle=...` covers both the CLI and the library.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const DEFAULT_DIRECTIVES: &str = "warn,glyphrle=info";

/// JSON lines when `json` is set, compact human output otherwise. Logs go to stderr.
pub fn setup_logging(json: bool) {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES));
  let registry = tracing_subscriber::registry().with(filter);

  let res = if json {
    registry
      .with(
        tracing_subscriber::fmt::layer()
          .json()
          .flatten_event(true)
          .with_target(false)
          .with_writer(std::io::stderr),
      )
      .try_init()
  } else {
    registry
      .with(tracing_subscriber::fmt::layer().compact().without_time().with_writer(std::io::stderr))
      .try_init()
  };
  // Already initialized (e.g. by a test harness) is fine.
  let _ = res;
}
