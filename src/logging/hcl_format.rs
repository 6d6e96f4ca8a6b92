use crate::logging::fields::push_field;
use chrono::Local;
use chrono::SecondsFormat;
use std::fmt;
use tracing::Event;
use tracing::Subscriber;
use tracing::field::Field;
use tracing::field::Visit;
use tracing_subscriber::fmt::FmtContext;
use tracing_subscriber::fmt::format::FormatEvent;
use tracing_subscriber::fmt::format::FormatFields;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::registry::LookupSpan;

/// Field carrying the name of the logger that emitted an event.
pub const LOGGER_FIELD: &str = "logger";
/// Field carrying key/value pairs already rendered by the logger.
pub const RENDERED_FIELDS_FIELD: &str = "kv";
/// Field carrying the same pairs as a JSON object, for structured output.
pub const STRUCTURED_FIELDS_FIELD: &str = "kv_json";

/// Renders events as single human-readable lines:
///
/// `2022-02-25T09:40:12+01:00 [INFO]  web: request served: status=200`
///
/// The level label is padded so messages line up. The logger name and its
/// colon are left out when the name is empty.
#[derive(Debug, Clone, Copy)]
pub struct HclFormat {
    with_time: bool,
}

impl HclFormat {
    #[must_use]
    pub fn new(with_time: bool) -> Self {
        Self { with_time }
    }
}

impl Default for HclFormat {
    fn default() -> Self {
        Self::new(true)
    }
}

impl<S, N> FormatEvent<S, N> for HclFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let mut visitor = HclVisitor::default();
        event.record(&mut visitor);

        if self.with_time {
            write!(
                writer,
                "{} ",
                Local::now().to_rfc3339_opts(SecondsFormat::Secs, false)
            )?;
        }
        let label = format!("[{}]", event.metadata().level());
        write!(writer, "{label:<7} ")?;
        if !visitor.logger.is_empty() {
            write!(writer, "{}: ", visitor.logger)?;
        }
        write!(writer, "{}", visitor.message)?;
        if !visitor.fields.is_empty() {
            write!(writer, ": {}", visitor.fields)?;
        }
        writeln!(writer)
    }
}

#[derive(Debug, Default)]
struct HclVisitor {
    message: String,
    logger: String,
    fields: String,
}

impl Visit for HclVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "message" => value.clone_into(&mut self.message),
            LOGGER_FIELD => value.clone_into(&mut self.logger),
            RENDERED_FIELDS_FIELD => {
                if !value.is_empty() {
                    if !self.fields.is_empty() {
                        self.fields.push(' ');
                    }
                    self.fields.push_str(value);
                }
            }
            STRUCTURED_FIELDS_FIELD => {}
            name => push_field(&mut self.fields, name, &value),
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        let value = format!("{value:?}");
        self.record_str(field, &value);
    }
}

#[cfg(test)]
mod test {
    use super::HclFormat;
    use crate::test_support::TestBuffer;

    fn capture(with_time: bool, emit: impl FnOnce()) -> String {
        let buffer = TestBuffer::default();
        let writer = buffer.clone();
        let subscriber = tracing_subscriber::fmt()
            .event_format(HclFormat::new(with_time))
            .with_writer(move || writer.clone())
            .with_max_level(tracing::Level::TRACE)
            .finish();
        tracing::subscriber::with_default(subscriber, emit);
        buffer.take()
    }

    #[test]
    fn renders_logger_message_and_fields() {
        let line = capture(false, || {
            tracing::error!(logger = "base.web", kv = "status=500", "request failed");
        });
        assert_eq!(line, "[ERROR] base.web: request failed: status=500\n");
    }

    #[test]
    fn pads_short_level_labels() {
        let line = capture(false, || {
            tracing::info!(logger = "app", kv = "", "ready");
        });
        assert_eq!(line, "[INFO]  app: ready\n");
    }

    #[test]
    fn omits_empty_logger_name() {
        let line = capture(false, || {
            tracing::warn!(logger = "", kv = "", "nameless");
        });
        assert_eq!(line, "[WARN]  nameless\n");
    }

    #[test]
    fn structured_copy_of_fields_is_not_printed() {
        let line = capture(false, || {
            tracing::info!(logger = "app", kv = "port=80", kv_json = r#"{"port":"80"}"#, "up");
        });
        assert_eq!(line, "[INFO]  app: up: port=80\n");
    }

    #[test]
    fn plain_tracing_fields_render_as_pairs() {
        let line = capture(false, || {
            tracing::debug!(count = 3, note = "two words", "plain event");
        });
        assert_eq!(line, "[DEBUG] plain event: count=3 note=\"two words\"\n");
    }

    #[test]
    fn prefixes_rfc3339_timestamp() -> eyre::Result<()> {
        let line = capture(true, || {
            tracing::trace!(logger = "app", kv = "", "tick");
        });
        let (timestamp, rest) = line
            .split_once(' ')
            .ok_or_else(|| eyre::eyre!("missing timestamp in {line:?}"))?;
        chrono::DateTime::parse_from_rfc3339(timestamp)?;
        assert_eq!(rest, "[TRACE] app: tick\n");
        Ok(())
    }
}
