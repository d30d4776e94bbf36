//! Line formatter for bashio-style log output.
//!
//! Formats use printf-like placeholders:
//!
//! | Placeholder      | Replaced with                          |
//! |------------------|----------------------------------------|
//! | `%(asctime)s`    | local time rendered with the date format |
//! | `%(levelname)s`  | `DEBUG`, `INFO`, `WARNING`, `ERROR`, `CRITICAL` |
//! | `%(message)s`    | the log message                        |
//! | `%(name)s`       | the logger name (event target if unset) |
//! | `%%`             | a literal `%`                          |
//!
//! Unknown placeholders are written verbatim.

use std::fmt::{self, Write as _};

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local};
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

use crate::config::EnvSource;

/// Default line format.
pub const DEFAULT_FORMAT: &str = "[%(asctime)s] %(levelname)s: %(message)s";

/// Default strftime date format.
pub const DEFAULT_DATEFMT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    AscTime,
    LevelName,
    Message,
    Name,
}

/// Compiled line format plus date format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BashioFormat {
    segments: Vec<Segment>,
    datefmt: String,
}

impl Default for BashioFormat {
    fn default() -> Self {
        Self::new(DEFAULT_FORMAT, DEFAULT_DATEFMT)
    }
}

impl BashioFormat {
    /// Compiles a line format and date format.
    ///
    /// An invalid date format falls back to [`DEFAULT_DATEFMT`].
    #[must_use]
    pub fn new(format: &str, datefmt: &str) -> Self {
        let datefmt = if is_valid_datefmt(datefmt) {
            datefmt
        } else {
            DEFAULT_DATEFMT
        };

        Self {
            segments: compile(format),
            datefmt: datefmt.to_string(),
        }
    }

    /// Builds the format from `BASHIO_LOG_FORMAT` and `BASHIO_LOG_DATEFMT`.
    pub fn from_env(env: &impl EnvSource) -> Self {
        Self::new(
            &env.var_or("BASHIO_LOG_FORMAT", DEFAULT_FORMAT),
            &env.var_or("BASHIO_LOG_DATEFMT", DEFAULT_DATEFMT),
        )
    }

    /// Returns the effective date format.
    #[must_use]
    pub fn datefmt(&self) -> &str {
        &self.datefmt
    }

    /// Renders one log line (without trailing newline).
    #[must_use]
    pub fn render(&self, now: &DateTime<Local>, level: &str, name: &str, message: &str) -> String {
        let mut line = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => line.push_str(text),
                Segment::AscTime => {
                    // datefmt was validated in `new`
                    let _ = write!(line, "{}", now.format(&self.datefmt));
                }
                Segment::LevelName => line.push_str(level),
                Segment::Message => line.push_str(message),
                Segment::Name => line.push_str(name),
            }
        }
        line
    }
}

impl<S, N> FormatEvent<S, N> for BashioFormat
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
        let mut fields = EventFields::default();
        event.record(&mut fields);

        let metadata = event.metadata();
        let level = fields
            .levelname
            .unwrap_or_else(|| level_name(*metadata.level()).to_string());

        let target = metadata.target();
        let name = fields.logger.as_deref().unwrap_or(target);
        let line = self.render(&Local::now(), &level, name, &fields.message);
        writeln!(writer, "{line}")
    }
}

/// Maps tracing levels to logging level names.
const fn level_name(level: tracing::Level) -> &'static str {
    match level {
        tracing::Level::TRACE | tracing::Level::DEBUG => "DEBUG",
        tracing::Level::INFO => "INFO",
        tracing::Level::WARN => "WARNING",
        tracing::Level::ERROR => "ERROR",
    }
}

/// Collects the message plus optional `levelname` and `logger` overrides from an event.
#[derive(Default)]
struct EventFields {
    message: String,
    levelname: Option<String>,
    logger: Option<String>,
}

impl Visit for EventFields {
    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "message" => self.message = value.to_string(),
            "levelname" => self.levelname = Some(value.to_string()),
            "logger" => self.logger = Some(value.to_string()),
            _ => self.append(field, value),
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        match field.name() {
            "message" => self.message = format!("{value:?}"),
            "levelname" => self.levelname = Some(format!("{value:?}")),
            "logger" => self.logger = Some(format!("{value:?}")),
            _ => self.append(field, format_args!("{value:?}")),
        }
    }
}

impl EventFields {
    fn append(&mut self, field: &Field, value: impl fmt::Display) {
        let _ = write!(self.message, " {}={value}", field.name());
    }
}

fn is_valid_datefmt(datefmt: &str) -> bool {
    !StrftimeItems::new(datefmt).any(|item| matches!(item, Item::Error))
}

fn compile(format: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut literal = String::new();
    let mut rest = format;

    while let Some(pos) = rest.find('%') {
        literal.push_str(&rest[..pos]);
        rest = &rest[pos..];

        if let Some(tail) = rest.strip_prefix("%%") {
            literal.push('%');
            rest = tail;
            continue;
        }

        match placeholder(rest) {
            Some((segment, len)) => {
                if !literal.is_empty() {
                    segments.push(Segment::Literal(std::mem::take(&mut literal)));
                }
                segments.push(segment);
                rest = &rest[len..];
            }
            None => {
                literal.push('%');
                rest = &rest[1..];
            }
        }
    }

    literal.push_str(rest);
    if !literal.is_empty() {
        segments.push(Segment::Literal(literal));
    }
    segments
}

/// Recognizes `%(key)s` at the start of `input`, returning the segment and its length.
fn placeholder(input: &str) -> Option<(Segment, usize)> {
    let body = input.strip_prefix("%(")?;
    let end = body.find(")s")?;
    let segment = match &body[..end] {
        "asctime" => Segment::AscTime,
        "levelname" => Segment::LevelName,
        "message" => Segment::Message,
        "name" => Segment::Name,
        _ => return None,
    };
    Some((segment, 2 + end + 2))
}
