//! One-shot application bootstrap.
//!
//! Four ordered steps run once at process start: logging sink, database
//! file + schema, pending-imports directory, completed-imports directory.
//! The first failing step aborts the sequence and is reported as a
//! [`SetupFailure`]; nothing here blocks for user input.

use crate::config::Paths;
use crate::db;
use crate::error::SetupError;
use crate::logging::LogSink;
use std::fmt;
use std::fs;
use std::path::Path;
use tracing::{debug, error, info};

/// Which bootstrap step failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Logging,
    Database,
    PendingImports,
    CompletedImports,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Step::Logging => "logging",
            Step::Database => "database",
            Step::PendingImports => "pending imports directory",
            Step::CompletedImports => "completed imports directory",
        };
        f.write_str(name)
    }
}

#[derive(Debug)]
pub struct SetupFailure {
    pub step: Step,
    pub error: SetupError,
}

impl fmt::Display for SetupFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} initialization failed: {}", self.step, self.error)
    }
}

impl std::error::Error for SetupFailure {}

/// Whether a step found its target already in place or created it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Created,
    AlreadyPresent,
}

pub struct Bootstrapper {
    paths: Paths,
    log_level: String,
}

impl Bootstrapper {
    pub fn new(paths: Paths, log_level: impl Into<String>) -> Self {
        Self {
            paths,
            log_level: log_level.into(),
        }
    }

    /// Run all four steps, stopping at the first failure.
    ///
    /// On success the installed [`LogSink`] is returned; the caller owns the
    /// process-wide sink for the rest of the process lifetime. Presenting a
    /// failure to a human (console output, operator acknowledgment) is the
    /// caller's concern.
    pub async fn run(&self) -> Result<LogSink, SetupFailure> {
        let sink = LogSink::init(&self.paths, &self.log_level).map_err(|error| SetupFailure {
            step: Step::Logging,
            error,
        })?;
        sink.install();

        self.initialize_database()
            .await
            .map_err(|error| SetupFailure {
                step: Step::Database,
                error,
            })?;

        self.initialize_pending_imports()
            .map_err(|error| SetupFailure {
                step: Step::PendingImports,
                error,
            })?;

        self.initialize_completed_imports()
            .map_err(|error| SetupFailure {
                step: Step::CompletedImports,
                error,
            })?;

        Ok(sink)
    }

    /// Boolean form of [`run`](Self::run): `true` only if every step passed.
    pub async fn initialize(&self) -> bool {
        self.run().await.is_ok()
    }

    /// Create the database file and the `books` table unless the file is
    /// already there. An existing file is trusted as-is; its schema is not
    /// inspected.
    async fn initialize_database(&self) -> Result<Outcome, SetupError> {
        let db_file = self.paths.db_file();
        if db_file.exists() {
            debug!(path = %db_file.display(), "database file exists");
            return Ok(Outcome::AlreadyPresent);
        }

        fs::create_dir_all(self.paths.db_dir())?;
        info!("initializing database");
        match db::create_database(&db_file, db::SQLITE_INIT).await {
            Ok(()) => {
                info!(path = %db_file.display(), "sqlite database created");
                Ok(Outcome::Created)
            }
            Err(e) => {
                error!(path = %db_file.display(), error = %e, "failed to initialize database");
                Err(e)
            }
        }
    }

    fn initialize_pending_imports(&self) -> Result<Outcome, SetupError> {
        let dir = self.paths.pending_imports_dir();
        match ensure_dir(&dir) {
            Ok(Outcome::Created) => {
                info!(path = %dir.display(), "created directory for pending CSV imports");
                Ok(Outcome::Created)
            }
            Ok(outcome) => Ok(outcome),
            Err(e) => {
                error!(path = %dir.display(), error = %e, "failed to create imports directory");
                Err(e)
            }
        }
    }

    fn initialize_completed_imports(&self) -> Result<Outcome, SetupError> {
        let dir = self.paths.completed_imports_dir();
        match ensure_dir(&dir) {
            Ok(Outcome::Created) => {
                info!(path = %dir.display(), "created directory for completed CSV imports");
                Ok(Outcome::Created)
            }
            Ok(outcome) => Ok(outcome),
            Err(e) => {
                error!(path = %dir.display(), error = %e, "failed to create completed imports directory");
                Err(e)
            }
        }
    }
}

fn ensure_dir(dir: &Path) -> Result<Outcome, SetupError> {
    if dir.exists() {
        return Ok(Outcome::AlreadyPresent);
    }
    fs::create_dir_all(dir)?;
    Ok(Outcome::Created)
}
