//! Runtime settings and filesystem layout.
//!
//! `Settings` comes from defaults merged with `LIBRIS_`-prefixed environment
//! variables. `Paths` derives every location the bootstrap touches from the
//! single configured data directory.

use crate::error::SetupError;
use figment::Figment;
use figment::providers::{Env, Serialized};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Root directory for logs, database, and import folders.
    pub data_dir: PathBuf,
    /// Minimum severity written to the log file.
    pub log_level: String,
    /// Whether startup failures may block for operator acknowledgment.
    pub interactive: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("libris-data"),
            log_level: "debug".to_string(),
            interactive: true,
        }
    }
}

impl Settings {
    pub fn load() -> Result<Self, SetupError> {
        let settings = Figment::from(Serialized::defaults(Settings::default()))
            .merge(Env::prefixed("LIBRIS_"))
            .extract()?;
        Ok(settings)
    }

    pub fn paths(&self) -> Paths {
        Paths::new(&self.data_dir)
    }
}

/// Resolves the fixed filesystem locations used by the bootstrap steps.
#[derive(Debug, Clone)]
pub struct Paths {
    data_dir: PathBuf,
}

impl Paths {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            data_dir: data_dir.to_path_buf(),
        }
    }

    pub fn log_dir(&self) -> PathBuf {
        self.data_dir.join("logs")
    }

    pub fn log_file(&self) -> PathBuf {
        self.log_dir().join("libris.log")
    }

    pub fn db_dir(&self) -> PathBuf {
        self.data_dir.join("db")
    }

    pub fn db_file(&self) -> PathBuf {
        self.db_dir().join("libris.db")
    }

    pub fn pending_imports_dir(&self) -> PathBuf {
        self.data_dir.join("imports").join("pending")
    }

    pub fn completed_imports_dir(&self) -> PathBuf {
        self.data_dir.join("imports").join("completed")
    }
}
