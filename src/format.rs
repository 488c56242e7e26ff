//! Text layout for prefixed records.
//!
//! A record renders as
//!
//! ```text
//! Mon, Jan  2, 2006 - 03:04:05.000 PM UTC-07:00 [db]  INFO connected
//! ```
//!
//! with the timestamp dimmed, the prefix bold white and the level colored by
//! severity when colors are enabled.

use std::fmt;

use time::macros::format_description;
use time::{OffsetDateTime, UtcOffset};
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

use crate::Severity;

/// Name of the field carrying the logger prefix.
pub const PREFIX_FIELD: &str = "prefix";
/// Name of the field carrying the severity label.
pub const SEVERITY_FIELD: &str = "severity";

/// Event formatter producing `<timestamp> [<prefix>] <LEVEL> <message>` lines.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrefixedFormatter {
    color: bool,
}

impl PrefixedFormatter {
    /// Create a formatter without colors.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable ANSI colors.
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    fn paint(&self, text: String, style: Style) -> String {
        if !self.color {
            return text;
        }
        style.apply(text)
    }
}

impl<S, N> FormatEvent<S, N> for PrefixedFormatter
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
        let mut fields = RecordFields::default();
        event.record(&mut fields);

        let severity = fields
            .severity
            .as_deref()
            .and_then(|label| label.parse::<Severity>().ok())
            .unwrap_or_else(|| Severity::from_tracing_level(event.metadata().level()));

        let timestamp = format_timestamp(now()).map_err(|_| fmt::Error)?;
        write!(writer, "{} ", self.paint(timestamp, Style::Timestamp))?;

        if let Some(prefix) = fields.prefix {
            write!(writer, "{} ", self.paint(format!("[{prefix}]"), Style::Prefix))?;
        }

        write!(
            writer,
            "{} {}",
            self.paint(format!("{severity:>5}"), Style::Level(severity)),
            fields.message.trim_end_matches('\n')
        )?;

        for (name, value) in &fields.extra {
            write!(writer, " {name}={value}")?;
        }

        writeln!(writer)
    }
}

enum Style {
    Timestamp,
    Prefix,
    Level(Severity),
}

impl Style {
    #[cfg(feature = "ansi")]
    fn apply(&self, text: String) -> String {
        use nu_ansi_term::Color;

        let style = match self {
            Style::Timestamp => Color::DarkGray.normal(),
            Style::Prefix => Color::White.bold(),
            Style::Level(severity) => match severity {
                Severity::Trace => return text,
                Severity::Debug => Color::Cyan.normal(),
                Severity::Info => Color::Green.normal(),
                Severity::Warn => Color::Rgb(255, 165, 0).normal(),
                Severity::Error => Color::Red.normal(),
                Severity::Fatal => Color::Purple.normal(),
                Severity::Panic => Color::White.normal(),
            },
        };
        style.paint(text).to_string()
    }

    #[cfg(not(feature = "ansi"))]
    fn apply(&self, text: String) -> String {
        text
    }
}

/// Fields of one event, split into the ones the layout places itself and the
/// rest.
#[derive(Default)]
struct RecordFields {
    prefix: Option<String>,
    severity: Option<String>,
    message: String,
    extra: Vec<(&'static str, String)>,
}

impl RecordFields {
    fn set(&mut self, name: &'static str, value: String) {
        match name {
            PREFIX_FIELD => self.prefix = Some(value),
            SEVERITY_FIELD => self.severity = Some(value),
            "message" => self.message = value,
            _ => self.extra.push((name, value)),
        }
    }
}

impl Visit for RecordFields {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.set(field.name(), value.to_string());
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.set(field.name(), format!("{value:?}"));
    }
}

fn now() -> OffsetDateTime {
    // Local offset lookup fails in multi-threaded processes on some unixes.
    OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
}

/// Render `at` as `Ddd, Mon D, YYYY - hh:mm:ss.mmm AM/PM TZ`.
pub fn format_timestamp(at: OffsetDateTime) -> Result<String, time::error::Format> {
    let layout = format_description!(
        "[weekday repr:short], [month repr:short] [day padding:space], [year] - [hour repr:12]:[minute]:[second].[subsecond digits:3] [period]"
    );
    let mut rendered = at.format(layout)?;
    rendered.push(' ');
    rendered.push_str(&zone_label(at.offset()));
    Ok(rendered)
}

fn zone_label(offset: UtcOffset) -> String {
    if offset.is_utc() {
        return "UTC".to_string();
    }
    let (hours, minutes, _) = offset.as_hms();
    let sign = if offset.is_negative() { '-' } else { '+' };
    format!(
        "UTC{sign}{:02}:{:02}",
        hours.unsigned_abs(),
        minutes.unsigned_abs()
    )
}
