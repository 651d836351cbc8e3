use crate::config::Environment;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global subscriber. Production emits flat JSON events for log
/// shipping; dev and staging get human-readable output.
pub fn init_logging(env: &Environment) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(env).into());
    let registry = tracing_subscriber::registry().with(filter);

    if env.is_prod() {
        registry
            .with(
                fmt::layer()
                    .json()
                    .flatten_event(true)
                    .with_current_span(true)
                    .with_span_list(false)
                    .with_target(false),
            )
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .pretty()
                    .with_target(true)
                    .with_file(env.is_dev())
                    .with_line_number(env.is_dev()),
            )
            .init();
    }

    tracing::info!(env = ?env, "Logging initialized");
}

fn default_filter(env: &Environment) -> &'static str {
    match env {
        Environment::Dev => "vertex_estimator=debug,info",
        Environment::Staging => "vertex_estimator=debug,warn",
        Environment::Prod => "vertex_estimator=info,warn",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_filters_parse() {
        for env in [Environment::Dev, Environment::Staging, Environment::Prod] {
            assert!(EnvFilter::try_new(default_filter(&env)).is_ok());
        }
    }

    #[test]
    fn crate_is_more_verbose_than_dependencies() {
        assert!(default_filter(&Environment::Dev).starts_with("vertex_estimator=debug"));
        assert!(default_filter(&Environment::Prod).starts_with("vertex_estimator=info"));
        assert!(default_filter(&Environment::Prod).ends_with(",warn"));
    }
}
