//! Splashtop Release Publisher - uploads the deployment DMG to GitHub.

use splashtop_release_publisher::cli;
use splashtop_release_publisher::cli::OutputManager;
use std::process;

#[tokio::main]
async fn main() {
    env_logger::init();

    match cli::run().await {
        Ok(exit_code) => {
            process::exit(exit_code);
        }
        Err(e) => {
            let output = OutputManager::new(false);
            output.error(&format!("Fatal error: {e}"));
            for suggestion in e.recovery_suggestions() {
                output.indent(&suggestion);
            }
            process::exit(e.exit_code());
        }
    }
}
