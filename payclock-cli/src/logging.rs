//! Logging setup for the `payclock` binary.
//!
//! Records go to stderr so stdout stays free for the ticker line. A log file
//! can be attached after startup with `--log-file`.

use std::fs::{File, OpenOptions};
use std::io::{self, IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};

use chrono::Local;
use thiserror::Error;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::fmt::format::{FormatEvent, FormatFields, Writer};
use tracing_subscriber::fmt::{FmtContext, MakeWriter};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry, reload};

const DEFAULT_FILTER: &str = "info";

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("logging has not been initialized")]
    NotInitialized,

    #[error("invalid log level '{level}': {reason}")]
    InvalidLevel { level: String, reason: String },

    #[error("cannot switch log level: {0}")]
    Reload(#[from] reload::Error),

    #[error("cannot open log file '{}': {source}", path.display())]
    OpenFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Handles kept after the subscriber is installed.
struct LogControl {
    filter: reload::Handle<EnvFilter, Registry>,
    file: SharedFile,
}

static CONTROL: OnceLock<LogControl> = OnceLock::new();

/// `HH:MM:SS.mmm LEVEL file:line message fields`
struct ClockFormat;

fn level_color(level: &Level) -> &'static str {
    match *level {
        Level::ERROR => "31",
        Level::WARN => "33",
        Level::INFO => "32",
        Level::DEBUG => "36",
        Level::TRACE => "35",
    }
}

impl<S, N> FormatEvent<S, N> for ClockFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let meta = event.metadata();
        let stamp = Local::now().format("%H:%M:%S%.3f");
        let level = meta.level();

        if writer.has_ansi_escapes() {
            write!(writer, "{stamp} \x1b[{}m{level:<5}\x1b[0m ", level_color(level))?;
        } else {
            write!(writer, "{stamp} {level:<5} ")?;
        }

        if let Some(file) = meta.file() {
            let name = Path::new(file)
                .file_name()
                .and_then(|name| name.to_str())
                .unwrap_or(file);
            write!(writer, "{name}:{} ", meta.line().unwrap_or_default())?;
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Log file that may be attached late; writes are dropped until then.
#[derive(Clone, Default)]
struct SharedFile(Arc<Mutex<Option<File>>>);

impl SharedFile {
    fn lock(&self) -> MutexGuard<'_, Option<File>> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

struct SharedFileWriter<'a>(MutexGuard<'a, Option<File>>);

impl Write for SharedFileWriter<'_> {
    fn write(
        &mut self,
        buf: &[u8],
    ) -> io::Result<usize> {
        self.0.as_mut().map_or(Ok(buf.len()), |file| file.write(buf))
    }

    fn flush(&mut self) -> io::Result<()> {
        self.0.as_mut().map_or(Ok(()), |file| file.flush())
    }
}

impl<'a> MakeWriter<'a> for SharedFile {
    type Writer = SharedFileWriter<'a>;

    fn make_writer(&'a self) -> Self::Writer {
        SharedFileWriter(self.lock())
    }
}

/// Installs the global subscriber. Only the first call has any effect.
///
/// The filter starts from `RUST_LOG`, falling back to `info`.
pub fn init_logging() {
    let initial = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let (filter, handle) = reload::Layer::new(initial);
    let file = SharedFile::default();

    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(ClockFormat)
                .with_ansi(io::stderr().is_terminal())
                .with_writer(io::stderr),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(ClockFormat)
                .with_ansi(false)
                .with_writer(file.clone()),
        )
        .try_init();

    if installed.is_ok() {
        let _ = CONTROL.set(LogControl {
            filter: handle,
            file,
        });
    }
}

/// Replaces the active filter. Takes a bare level such as `debug` or a full
/// `EnvFilter` directive such as `payclock_core=trace`.
pub fn set_log_level(level: &str) -> Result<(), LoggingError> {
    let control = CONTROL.get().ok_or(LoggingError::NotInitialized)?;
    let filter = EnvFilter::try_new(level).map_err(|e| LoggingError::InvalidLevel {
        level: level.to_string(),
        reason: e.to_string(),
    })?;
    control.filter.reload(filter)?;
    Ok(())
}

/// Appends records to `path` from now on, replacing any earlier file.
pub fn enable_file_logging(path: &Path) -> Result<(), LoggingError> {
    let control = CONTROL.get().ok_or(LoggingError::NotInitialized)?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| LoggingError::OpenFile {
            path: path.to_path_buf(),
            source,
        })?;
    *control.file.lock() = Some(file);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detached_file_swallows_writes() {
        let file = SharedFile::default();
        let mut writer = file.make_writer();

        assert_eq!(writer.write(b"dropped").unwrap(), 7);
        assert!(writer.flush().is_ok());
    }

    #[test]
    fn level_must_parse_as_a_filter() {
        init_logging();

        assert!(set_log_level("debug").is_ok());
        assert!(matches!(
            set_log_level("payclock=loud"),
            Err(LoggingError::InvalidLevel { .. })
        ));
    }
}
