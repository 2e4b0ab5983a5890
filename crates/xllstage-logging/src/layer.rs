//! Tracing layer that forwards to a diagnostic sink

use crate::LogLevel;
use crate::sink::DiagnosticSink;
use std::fmt::Write as _;
use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};
use tracing::field::{Field, Visit};
use tracing::subscriber::Interest;
use tracing::{Event, Level, Metadata, Subscriber};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::Layer;
use tracing_subscriber::layer::Context;
use tracing_subscriber::registry::LookupSpan;

/// Tracing layer that forwards log events to a [`DiagnosticSink`]
///
/// Each layer owns its sink and level, so separate staging runs can report
/// to separate hosts.
pub struct SinkLayer<S: DiagnosticSink> {
    sink: Arc<S>,
    level: AtomicU8,
}

impl<S: DiagnosticSink> SinkLayer<S> {
    /// Create a layer forwarding `Info` and above
    pub fn new(sink: Arc<S>) -> Self {
        Self::with_level(sink, LogLevel::Info)
    }

    /// Create a layer forwarding `level` and above
    pub fn with_level(sink: Arc<S>, level: LogLevel) -> Self {
        Self {
            sink,
            level: AtomicU8::new(level as u8),
        }
    }

    /// Change the minimum forwarded level
    pub fn set_level(&self, level: LogLevel) {
        self.level.store(level as u8, Ordering::SeqCst);
    }

    /// Current minimum forwarded level
    pub fn level(&self) -> LogLevel {
        LogLevel::from_u8(self.level.load(Ordering::SeqCst))
    }

    /// Check if a log level is forwarded
    pub fn is_enabled(&self, level: LogLevel) -> bool {
        level != LogLevel::Off && level >= self.level()
    }

    /// Convert tracing Level to our LogLevel
    fn convert_level(level: &Level) -> LogLevel {
        match *level {
            Level::TRACE => LogLevel::Trace,
            Level::DEBUG => LogLevel::Debug,
            Level::INFO => LogLevel::Info,
            Level::WARN => LogLevel::Warn,
            Level::ERROR => LogLevel::Error,
        }
    }
}

impl<S, Sub> Layer<Sub> for SinkLayer<S>
where
    S: DiagnosticSink + 'static,
    Sub: Subscriber + for<'a> LookupSpan<'a>,
{
    fn register_callsite(&self, _metadata: &'static Metadata<'static>) -> Interest {
        // The level can change at runtime, so never cache the decision
        Interest::sometimes()
    }

    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, Sub>) {
        let metadata = event.metadata();
        let level = Self::convert_level(metadata.level());

        if !self.is_enabled(level) {
            return;
        }

        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);

        self.sink.log(level, metadata.target(), &visitor.finish());
    }

    fn enabled(&self, metadata: &Metadata<'_>, _ctx: Context<'_, Sub>) -> bool {
        self.is_enabled(Self::convert_level(metadata.level()))
    }
}

/// Collects the message and appends other fields as `key=value`
#[derive(Default)]
struct MessageVisitor {
    message: String,
    fields: String,
}

impl MessageVisitor {
    fn finish(self) -> String {
        if self.fields.is_empty() {
            self.message
        } else if self.message.is_empty() {
            self.fields
        } else {
            format!("{} {}", self.message, self.fields)
        }
    }

    fn push_field(&mut self, name: &str, value: std::fmt::Arguments<'_>) {
        if !self.fields.is_empty() {
            self.fields.push(' ');
        }
        let _ = write!(self.fields, "{name}={value}");
    }
}

impl Visit for MessageVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{value:?}");
        } else {
            self.push_field(field.name(), format_args!("{value:?}"));
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            self.push_field(field.name(), format_args!("{value}"));
        }
    }
}

/// Initialize terminal logging
///
/// Installs a `fmt` subscriber writing to stderr. `RUST_LOG` takes
/// precedence over `level`. Calling this more than once has no effect.
pub fn init_logging(level: LogLevel) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_directive()));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
