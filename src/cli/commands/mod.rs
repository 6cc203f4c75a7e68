//! Command execution and error reporting.

mod publish;

use crate::cli::{Args, OutputManager};
use crate::config::EnvConfig;
use crate::error::{CliError, PublishError, Result};

pub use publish::execute_publish;

/// Execute the publish command for parsed arguments, returning the exit code
pub async fn execute_command(args: Args) -> Result<i32> {
    let output = OutputManager::new(args.verbose);

    if let Err(reason) = args.validate() {
        let error = PublishError::from(CliError::InvalidArguments { reason });
        output.error(&error.to_string());
        return Ok(error.exit_code());
    }

    let env = EnvConfig::from_process();
    Ok(execute_publish(&args, &env, &output).await)
}
