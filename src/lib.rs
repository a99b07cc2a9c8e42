pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod setup;

pub use config::{Paths, Settings};
pub use error::SetupError;
pub use setup::{Bootstrapper, SetupFailure, Step};
