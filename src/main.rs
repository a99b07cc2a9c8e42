use libris::setup::{Bootstrapper, SetupFailure, Step};
use mimalloc::MiMalloc;
use std::io::{self, BufRead, IsTerminal};
use std::process::ExitCode;
use tracing::info;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let settings = match libris::config::Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("invalid configuration: {e}");
            return ExitCode::FAILURE;
        }
    };

    let bootstrapper = Bootstrapper::new(settings.paths(), settings.log_level.clone());
    match bootstrapper.run().await {
        Ok(_sink) => {
            info!(data_dir = %settings.data_dir.display(), "setup complete");
            ExitCode::SUCCESS
        }
        Err(failure) => {
            present_failure(&failure, settings.interactive);
            ExitCode::FAILURE
        }
    }
}

/// Console-facing failure report, kept out of the library so headless runs
/// never block. The acknowledgment gate only applies when the log sink
/// itself could not be set up: the operator must see the message before the
/// process exits, since nothing was written to a log file.
fn present_failure(failure: &SetupFailure, interactive: bool) {
    eprintln!("{failure}");
    if failure.step == Step::Logging && interactive && io::stdin().is_terminal() {
        eprintln!("press enter to exit");
        let mut ack = String::new();
        let _ = io::stdin().lock().read_line(&mut ack);
    }
}
