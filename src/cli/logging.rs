//! Log output setup

use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

/// Filter used when neither `-v` nor `RUST_LOG` asks for more
const DEFAULT_FILTER: &str = "desk_notify=warn";

/// Filter directives for a `-v` count
fn filter_for(verbose: u8) -> EnvFilter {
    match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)),
        1 => EnvFilter::new("desk_notify=debug,warn"),
        _ => EnvFilter::new("desk_notify=trace,debug"),
    }
}

/// Install the stderr subscriber. Stdout is reserved for outcomes.
pub fn init_logging(verbose: u8) {
    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(verbose > 1);

    // A second call (e.g. from tests) keeps the first subscriber
    let _ = tracing_subscriber::registry()
        .with(filter_for(verbose))
        .with(layer)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_raises_level() {
        assert!(filter_for(1).to_string().contains("desk_notify=debug"));
        assert!(filter_for(3).to_string().contains("desk_notify=trace"));
    }

    #[test]
    fn init_twice_is_harmless() {
        init_logging(0);
        init_logging(1);
    }
}
