//! Tracing setup. Everything goes to stderr so stdout stays machine-readable.

use tracing::Level;
use tracing_subscriber::{filter::Directive, fmt, prelude::*, EnvFilter};

/// Level for this crate's own events, from the number of `-v` flags.
fn cli_level(verbosity: u8) -> Level {
    match verbosity {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

fn cli_directive(verbosity: u8) -> Directive {
    let level = cli_level(verbosity);
    format!("behaviors_cli={level}")
        .parse()
        .unwrap_or_else(|_| Directive::from(level))
}

/// Install the global subscriber. `RUST_LOG` sets the base filter (default
/// `warn`); `-v` only raises `behaviors_cli` on top of it.
pub fn init(verbosity: u8, json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn"))
        .add_directive(cli_directive(verbosity));
    let registry = tracing_subscriber::registry().with(filter);

    if json {
        let layer = fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(false)
            .with_writer(std::io::stderr);
        registry.with(layer).init();
    } else {
        let layer = fmt::layer().with_target(false).with_writer(std::io::stderr);
        registry.with(layer).init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_level_follows_verbosity() {
        assert_eq!(cli_level(0), Level::INFO);
        assert_eq!(cli_level(1), Level::DEBUG);
        assert_eq!(cli_level(5), Level::TRACE);
    }
}
