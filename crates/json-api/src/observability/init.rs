//! Tracing subscriber setup.

use tracing_subscriber::{
    EnvFilter, Layer, Registry, filter::ParseError, layer::SubscriberExt as _,
    util::SubscriberInitExt as _,
};

use crate::config::{ServerConfig, observability::LogFormat};

use super::{ObservabilityError, settings};

// Transport crates are chatty at `info`; keep them to warnings unless asked.
const QUIET_DEPENDENCIES: &str = "h2=warn,hyper=warn,hyper_util=warn,reqwest=warn";

/// Marker that logging and request settings are installed.
#[derive(Debug)]
pub(crate) struct Observability;

impl Observability {
    /// Apply request settings and install the structured logging subscriber.
    pub(crate) fn init(config: &ServerConfig) -> Result<Self, ObservabilityError> {
        settings::apply_runtime_config(config);

        tracing_subscriber::registry()
            .with(fmt_layer(config.logging.log_format))
            .with(env_filter(&config.logging.log_level)?)
            .try_init()?;

        Ok(Self)
    }
}

fn fmt_layer(format: LogFormat) -> Box<dyn Layer<Registry> + Send + Sync> {
    match format {
        LogFormat::Compact => tracing_subscriber::fmt::layer()
            .compact()
            .with_file(true)
            .with_line_number(true)
            .boxed(),
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(true)
            .boxed(),
    }
}

/// `RUST_LOG` reaches us through clap, so the filter is built from the parsed level.
fn env_filter(directives: &str) -> Result<EnvFilter, ParseError> {
    EnvFilter::try_new(format!("{QUIET_DEPENDENCIES},{directives}"))
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn configured_directives_are_kept_alongside_quiet_dependencies() -> TestResult {
        let filter = env_filter("cartoffer_app=debug,info")?.to_string();

        assert!(filter.contains("cartoffer_app=debug"), "got {filter}");
        assert!(filter.contains("reqwest=warn"), "got {filter}");

        Ok(())
    }

    #[test]
    fn invalid_directives_are_rejected() {
        assert!(env_filter("cartoffer_app=loud").is_err());
    }
}
