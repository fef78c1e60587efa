use tracing::level_filters::LevelFilter;
use tracing_subscriber::{
    EnvFilter, filter::Targets, fmt, prelude::__tracing_subscriber_SubscriberExt,
    util::SubscriberInitExt,
};

/// Log level picked from how many times `-v` was given.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Off,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn from_verbosity(count: u8) -> Self {
        match count {
            0 => LogLevel::Off,
            1 => LogLevel::Debug,
            _ => LogLevel::Trace,
        }
    }

    fn filter(self) -> LevelFilter {
        match self {
            LogLevel::Off => LevelFilter::OFF,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Trace => LevelFilter::TRACE,
        }
    }

    /// Directive used when `RUST_LOG` is not set. Only the `tconv` target is
    /// raised so reqwest and hyper stay quiet.
    fn default_directive(self) -> String {
        match self {
            LogLevel::Off => "off",
            LogLevel::Debug => "tconv=debug",
            LogLevel::Trace => "tconv=trace",
        }
        .to_string()
    }
}

/// Installs the global subscriber, writing to stderr so command output on
/// stdout stays clean. A second call is a no-op.
pub fn init_logging(level: LogLevel) {
    let app_filter = Targets::new().with_target("tconv", level.filter());
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.default_directive()));

    let result = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .pretty()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(app_filter)
        .with(env_filter)
        .try_init();
    if let Err(e) = result {
        tracing::debug!(error = %e, "Logging already initialized");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_from_verbosity() {
        assert_eq!(LogLevel::from_verbosity(0), LogLevel::Off);
        assert_eq!(LogLevel::from_verbosity(1), LogLevel::Debug);
        assert_eq!(LogLevel::from_verbosity(2), LogLevel::Trace);
        assert_eq!(LogLevel::from_verbosity(7), LogLevel::Trace);
    }

    #[test]
    fn test_default_directive_targets_crate() {
        assert_eq!(LogLevel::Off.default_directive(), "off");
        assert_eq!(LogLevel::Debug.default_directive(), "tconv=debug");
        assert_eq!(LogLevel::Trace.default_directive(), "tconv=trace");
    }

    #[test]
    fn test_init_twice_does_not_panic() {
        init_logging(LogLevel::Off);
        init_logging(LogLevel::Debug);
    }
}
