//! Log setup for the `algotx` binary.
//!
//! Events go to stderr; stdout is reserved for the JSON report.

use clap::ValueEnum;
use tracing_subscriber::EnvFilter;

/// How log lines are rendered on stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Pretty,
    /// One JSON object per event.
    Json,
}

/// Install the global subscriber. Must be called at most once.
///
/// `RUST_LOG` wins over `default_filter` when set, e.g.
/// `RUST_LOG=algotx=trace` to see the encoded size behind every fee.
pub fn init_logging(default_filter: &str, format: LogFormat) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true);

    match format {
        LogFormat::Pretty => builder.with_file(true).with_line_number(true).init(),
        LogFormat::Json => builder.json().init(),
    }

    tracing::debug!(?format, "logging ready");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_names_parse_case_insensitively() {
        assert_eq!(LogFormat::from_str("json", true).unwrap(), LogFormat::Json);
        assert_eq!(LogFormat::from_str("Pretty", true).unwrap(), LogFormat::Pretty);
        assert!(LogFormat::from_str("xml", true).is_err());
    }
}
