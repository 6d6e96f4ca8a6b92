use crate::logging::hcl_format::LOGGER_FIELD;
use crate::logging::hcl_format::RENDERED_FIELDS_FIELD;
use crate::logging::hcl_format::STRUCTURED_FIELDS_FIELD;
use chrono::Local;
use chrono::SecondsFormat;
use serde_json::Map;
use serde_json::Value;
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

/// Renders events as JSON lines for the log file:
///
/// `{"timestamp":"...","level":"WARN","logger":"web","message":"disk low","fields":{"free":"12 MB"}}`
///
/// Logger key/value pairs land in `fields` as individual keys, next to any
/// plain `tracing` fields of the event.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFormat;

impl<S, N> FormatEvent<S, N> for JsonFormat
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
        let mut visitor = JsonVisitor::default();
        event.record(&mut visitor);

        let mut line = Map::new();
        line.insert(
            "timestamp".to_owned(),
            Local::now()
                .to_rfc3339_opts(SecondsFormat::Millis, false)
                .into(),
        );
        line.insert(
            "level".to_owned(),
            event.metadata().level().as_str().into(),
        );
        if let Some(logger) = visitor.logger {
            line.insert(LOGGER_FIELD.to_owned(), logger.into());
        }
        line.insert("message".to_owned(), visitor.message.into());
        line.insert("fields".to_owned(), Value::Object(visitor.fields));
        writeln!(writer, "{}", Value::Object(line))
    }
}

#[derive(Debug, Default)]
struct JsonVisitor {
    message: String,
    logger: Option<String>,
    fields: Map<String, Value>,
}

impl JsonVisitor {
    fn insert(&mut self, field: &Field, value: Value) {
        self.fields.insert(field.name().to_owned(), value);
    }
}

impl Visit for JsonVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "message" => value.clone_into(&mut self.message),
            LOGGER_FIELD => self.logger = Some(value.to_owned()),
            RENDERED_FIELDS_FIELD => {}
            STRUCTURED_FIELDS_FIELD => {
                match serde_json::from_str::<Map<String, Value>>(value) {
                    Ok(pairs) => self.fields.extend(pairs),
                    Err(_) => self.insert(field, value.into()),
                }
            }
            _ => self.insert(field, value.into()),
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.insert(field, value.into());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.insert(field, value.into());
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.insert(field, value.into());
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        self.insert(field, value.into());
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        let value = format!("{value:?}");
        self.record_str(field, &value);
    }
}
