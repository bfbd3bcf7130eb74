//! Logging setup
//!
//! `RUST_LOG` wins over the configured level; the format is either `pretty`
//! or `json`. Log lines go to stderr so CLI output on stdout stays clean.

use tracing::Subscriber;
use tracing_subscriber::{
    fmt::MakeWriter, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry,
};

use crate::config::LoggingConfig;

/// Filter directive used when `RUST_LOG` is unset
pub fn default_directive(config: &LoggingConfig) -> String {
    format!("pandash={},tower_http=info", config.level)
}

/// Build the subscriber, writing formatted events to `writer`
pub fn build_subscriber<W>(config: &LoggingConfig, writer: W) -> impl Subscriber + Send + Sync
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(config)));

    let fmt_layer: Box<dyn Layer<Registry> + Send + Sync> =
        if config.format.eq_ignore_ascii_case("json") {
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(writer)
                .boxed()
        } else {
            tracing_subscriber::fmt::layer().with_writer(writer).boxed()
        };

    tracing_subscriber::registry().with(fmt_layer).with(filter)
}

/// Install the global tracing subscriber
pub fn init_logging(config: &LoggingConfig) {
    build_subscriber(config, std::io::stderr).init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_default_directive() {
        let config = LoggingConfig {
            level: "debug".to_string(),
            format: "json".to_string(),
        };
        assert_eq!(default_directive(&config), "pandash=debug,tower_http=info");
    }

    #[test]
    fn test_events_go_to_the_given_writer() {
        let config = LoggingConfig {
            level: "info".to_string(),
            format: "json".to_string(),
        };
        let buf = SharedBuf::default();
        let writer = buf.clone();

        let subscriber = build_subscriber(&config, move || writer.clone());
        tracing::subscriber::with_default(subscriber, || {
            tracing::warn!(rows = 3, "Case table loaded");
        });

        let output = String::from_utf8(buf.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("Case table loaded"));
        assert!(output.contains("\"rows\":3"));
    }
}
