//! Publish command: runs the workflow and reports failures.

use crate::cli::{Args, OutputManager};
use crate::config::{EnvConfig, PublishConfig};
use crate::publish::Publisher;

/// Run a publish and return the process exit code
pub async fn execute_publish(args: &Args, env: &EnvConfig, output: &OutputManager) -> i32 {
    let config = PublishConfig::from(args);
    output.verbose(&format!(
        "Target: {}/{} release {} asset {}",
        config.owner, config.repo, config.tag, config.asset_name
    ));
    output.verbose(&format!("API: {}", config.api_base));

    match Publisher::new(&config, output).publish(env).await {
        Ok(_) => 0,
        Err(e) => {
            if e.is_preflight() {
                // Operator-fixable problems go to stdout alongside the fix.
                output.println(&format!("ERROR: {e}"));
                for suggestion in e.recovery_suggestions() {
                    output.indent_by(7, &suggestion);
                }
            } else {
                output.error(&e.to_string());
                let suggestions = e.recovery_suggestions();
                if !suggestions.is_empty() {
                    output.println("\n💡 Recovery suggestions:");
                    for suggestion in suggestions {
                        output.println(&format!("  • {}", suggestion));
                    }
                }
            }
            e.exit_code()
        }
    }
}
