//! crates/logging-sink/src/backend/bridge.rs
//! Backend forwarding records to `tracing` events.

use super::Backend;
use crate::record::Record;
use crate::severity::Severity;

/// Target attached to every event emitted by [`TracingBackend`].
pub const TRACING_TARGET: &str = "catlog";

/// Forwards accepted records to the `tracing` ecosystem.
///
/// Each record becomes an event with target [`TRACING_TARGET`], carrying the
/// category, source file and line as fields and the rendered message as the
/// event message. `critical` has no `tracing` equivalent and is emitted at
/// `ERROR` with `critical = true`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingBackend;

impl TracingBackend {
    /// Creates the bridge.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Backend for TracingBackend {
    fn write(&self, record: &Record<'_>) {
        let category = record.category();
        let location = record.location();
        let file = location.file();
        let line = location.line();
        let message = record.message();

        match record.severity() {
            Severity::Trace => {
                tracing::trace!(target: TRACING_TARGET, category, file, line, "{message}");
            }
            Severity::Debug => {
                tracing::debug!(target: TRACING_TARGET, category, file, line, "{message}");
            }
            Severity::Info => {
                tracing::info!(target: TRACING_TARGET, category, file, line, "{message}");
            }
            Severity::Warn => {
                tracing::warn!(target: TRACING_TARGET, category, file, line, "{message}");
            }
            Severity::Error => {
                tracing::error!(target: TRACING_TARGET, category, file, line, "{message}");
            }
            Severity::Critical => {
                tracing::error!(
                    target: TRACING_TARGET,
                    category,
                    file,
                    line,
                    critical = true,
                    "{message}"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::SourceLocation;
    use std::sync::{Arc, Mutex};
    use tracing::{Level, Subscriber};
    use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

    #[derive(Clone, Debug, Default)]
    struct Event {
        level: Option<Level>,
        target: String,
        message: Option<String>,
        category: Option<String>,
        critical: bool,
    }

    #[derive(Clone, Default)]
    struct CaptureLayer {
        events: Arc<Mutex<Vec<Event>>>,
    }

    #[derive(Default)]
    struct FieldVisitor(Event);

    impl tracing::field::Visit for FieldVisitor {
        fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
            if field.name() == "message" {
                self.0.message = Some(format!("{value:?}"));
            }
        }

        fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
            match field.name() {
                "message" => self.0.message = Some(value.to_owned()),
                "category" => self.0.category = Some(value.to_owned()),
                _ => {}
            }
        }

        fn record_bool(&mut self, field: &tracing::field::Field, value: bool) {
            if field.name() == "critical" {
                self.0.critical = value;
            }
        }
    }

    impl<S: Subscriber> Layer<S> for CaptureLayer {
        fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
            let mut visitor = FieldVisitor::default();
            event.record(&mut visitor);
            let mut captured = visitor.0;
            captured.level = Some(*event.metadata().level());
            captured.target = event.metadata().target().to_owned();
            self.events.lock().unwrap().push(captured);
        }
    }

    fn forward(severity: Severity) -> Event {
        let layer = CaptureLayer::default();
        let events = Arc::clone(&layer.events);
        let subscriber = tracing_subscriber::registry().with(layer);

        tracing::subscriber::with_default(subscriber, || {
            let location = SourceLocation::new("fabric.rs", 12, 1);
            TracingBackend::new().write(&Record::new(
                "Fabric",
                severity,
                location,
                "[Fabric] route installed",
            ));
        });

        let mut events = events.lock().unwrap();
        assert_eq!(events.len(), 1);
        events.pop().unwrap()
    }

    #[test]
    fn severities_map_onto_tracing_levels() {
        assert_eq!(forward(Severity::Trace).level, Some(Level::TRACE));
        assert_eq!(forward(Severity::Debug).level, Some(Level::DEBUG));
        assert_eq!(forward(Severity::Info).level, Some(Level::INFO));
        assert_eq!(forward(Severity::Warn).level, Some(Level::WARN));
        assert_eq!(forward(Severity::Error).level, Some(Level::ERROR));
    }

    #[test]
    fn critical_is_flagged_error() {
        let event = forward(Severity::Critical);
        assert_eq!(event.level, Some(Level::ERROR));
        assert!(event.critical);
    }

    #[test]
    fn event_carries_message_category_and_target() {
        let event = forward(Severity::Info);
        assert_eq!(event.target, TRACING_TARGET);
        assert_eq!(event.message.as_deref(), Some("[Fabric] route installed"));
        assert_eq!(event.category.as_deref(), Some("Fabric"));
        assert!(!event.critical);
    }
}
