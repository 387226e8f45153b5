use std::io::{self, Write};
use std::sync::{Mutex, MutexGuard};

use colored::*;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::FormatEvent;
use tracing_subscriber::fmt::format::{self, Writer};
use tracing_subscriber::registry::LookupSpan;

/// Log output collected while the grid owns the terminal.
static HELD: Mutex<Option<Vec<u8>>> = Mutex::new(None);

/// Installs the global subscriber. Output goes to stderr through
/// [`HeldWriter`]; `RUST_LOG` takes precedence over `verbosity`.
pub fn init(verbosity: u8) {
    let default_level: &str = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .event_format(PingridFormatter)
        .with_env_filter(filter)
        .with_writer(|| HeldWriter)
        .init();
}

fn held() -> MutexGuard<'static, Option<Vec<u8>>> {
    HELD.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Starts collecting log lines instead of writing them between grid frames.
pub fn hold() {
    held().get_or_insert_with(Vec::new);
}

/// Stops collecting and writes everything collected to stderr.
pub fn release() {
    if let Some(buf) = take_held() {
        let mut stderr = io::stderr().lock();
        let _ = stderr.write_all(&buf);
        let _ = stderr.flush();
    }
}

fn take_held() -> Option<Vec<u8>> {
    held().take()
}

/// Writes to stderr, or into the hold buffer while [`hold`] is active.
pub struct HeldWriter;

impl Write for HeldWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match held().as_mut() {
            Some(held) => {
                held.extend_from_slice(buf);
                Ok(buf.len())
            }
            None => io::stderr().write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stderr().flush()
    }
}

pub struct PingridFormatter;

impl<S, N> FormatEvent<S, N> for PingridFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> format::FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &tracing_subscriber::fmt::FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let meta = event.metadata();

        let (symbol, color_func): (&str, fn(ColoredString) -> ColoredString) = match *meta.level() {
            Level::TRACE => ("[ ]", |s| s.dimmed()),
            Level::DEBUG => ("[?]", |s| s.blue()),
            Level::INFO => ("[+]", |s| s.green().bold()),
            Level::WARN => ("[*]", |s| s.yellow().bold()),
            Level::ERROR => ("[-]", |s| s.red().bold()),
        };

        write!(writer, "{} ", color_func(symbol.into()))?;

        // Prefix with the probe span's fields, e.g. `index=2 host=ya.ru`.
        if let Some(scope) = ctx.event_scope() {
            for span in scope.from_root() {
                let ext = span.extensions();
                if let Some(fields) = ext.get::<tracing_subscriber::fmt::FormattedFields<N>>()
                    && !fields.is_empty()
                {
                    write!(writer, "{} ", format!("{{{fields}}}").dimmed())?;
                }
            }
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;

        writeln!(writer)
    }
}
