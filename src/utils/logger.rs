use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Directives used when `RUST_LOG` is unset. Covers the library and the
/// `toml-sorteo` binary, whose events carry the `toml_sorteo` target.
pub fn default_directives(verbose: bool) -> &'static str {
    if verbose {
        "amigo_secreto=debug,toml_sorteo=debug,info"
    } else {
        "amigo_secreto=info,toml_sorteo=info"
    }
}

fn default_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)))
}

pub fn init_cli_logger(verbose: bool) {
    tracing_subscriber::registry()
        .with(default_filter(verbose))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}

/// JSON lines on stdout, for piping a run into a log collector.
pub fn init_json_logger(verbose: bool) {
    tracing_subscriber::registry()
        .with(default_filter(verbose))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .json(),
        )
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use tracing::{Event, Subscriber};
    use tracing_subscriber::layer::{Context, Layer};

    #[derive(Clone, Default)]
    struct TargetRecorder {
        targets: Arc<Mutex<Vec<(String, tracing::Level)>>>,
    }

    impl<S: Subscriber> Layer<S> for TargetRecorder {
        fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
            let meta = event.metadata();
            self.targets
                .lock()
                .unwrap()
                .push((meta.target().to_string(), *meta.level()));
        }
    }

    fn recorded(verbose: bool) -> Vec<(String, tracing::Level)> {
        let recorder = TargetRecorder::default();
        let subscriber = tracing_subscriber::registry()
            .with(EnvFilter::new(default_directives(verbose)))
            .with(recorder.clone());

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!(target: "toml_sorteo", "config summary");
            tracing::debug!(target: "toml_sorteo", "config details");
            tracing::info!(target: "amigo_secreto::core::sorteo", "drawing done");
            tracing::info!(target: "hyper::client", "connection pooled");
        });

        let targets = recorder.targets.lock().unwrap().clone();
        targets
    }

    #[test]
    fn test_default_filter_shows_toml_binary_events() {
        let events = recorded(false);
        assert!(events.contains(&("toml_sorteo".to_string(), tracing::Level::INFO)));
        assert!(events.contains(&("amigo_secreto::core::sorteo".to_string(), tracing::Level::INFO)));
        assert!(!events.iter().any(|(t, _)| t == "hyper::client"));
        assert!(!events.iter().any(|(_, l)| *l == tracing::Level::DEBUG));
    }

    #[test]
    fn test_verbose_filter_shows_toml_binary_debug() {
        let events = recorded(true);
        assert!(events.contains(&("toml_sorteo".to_string(), tracing::Level::DEBUG)));
    }
}
