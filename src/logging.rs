//! Process-wide logging sink.
//!
//! The sink is an explicit object rather than ambient global state: callers
//! construct it once at startup, install it, and keep it for the life of the
//! process. Lines are appended to the log file as
//! `YYYY-MM-DD HH:MM - LEVEL - target - line - message`.

use crate::config::Paths;
use crate::error::SetupError;
use chrono::Local;
use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{Dispatch, Event, Subscriber};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;

#[derive(Debug)]
pub struct LogSink {
    path: PathBuf,
    dispatch: Dispatch,
}

impl LogSink {
    /// Create the log directory if needed, open the log file in append mode,
    /// and build the subscriber. Nothing is installed globally yet.
    pub fn init(paths: &Paths, level: &str) -> Result<Self, SetupError> {
        fs::create_dir_all(paths.log_dir())?;
        let path = paths.log_file();
        let file = OpenOptions::new().append(true).create(true).open(&path)?;
        let writer = FileWriter(Arc::new(file));

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(level));
        let subscriber = tracing_subscriber::registry().with(filter).with(
            tracing_subscriber::fmt::layer()
                .event_format(LogLine)
                .with_ansi(false)
                .with_writer(move || writer.clone()),
        );

        Ok(Self {
            path,
            dispatch: Dispatch::new(subscriber),
        })
    }

    /// Install as the process-wide default dispatcher. The sink configured
    /// first wins; installing again later is a no-op, so repeated bootstrap
    /// runs within one process stay idempotent.
    pub fn install(&self) {
        let _ = tracing::dispatcher::set_global_default(self.dispatch.clone());
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn dispatch(&self) -> &Dispatch {
        &self.dispatch
    }
}

#[derive(Clone)]
struct FileWriter(Arc<File>);

impl io::Write for FileWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        (&*self.0).write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        (&*self.0).flush()
    }
}

/// `{timestamp} - {level} - {target} - {line} - {message}` with
/// minute-precision local timestamps.
struct LogLine;

impl<S, N> FormatEvent<S, N> for LogLine
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let meta = event.metadata();
        write!(
            writer,
            "{} - {} - {} - {} - ",
            Local::now().format("%Y-%m-%d %H:%M"),
            meta.level(),
            meta.target(),
            meta.line().unwrap_or(0),
        )?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}
