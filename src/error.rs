//! Error types for release publishing.
//!
//! Every failure is fatal. Each error carries a readable message and a list of
//! recovery suggestions that the CLI prints after it.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for publisher operations
pub type Result<T> = std::result::Result<T, PublishError>;

/// Main error type for all publisher operations
#[derive(Error, Debug)]
pub enum PublishError {
    /// Access token missing from the environment
    #[error(transparent)]
    Credential(#[from] CredentialError),

    /// Artifact discovery errors
    #[error(transparent)]
    Artifact(#[from] ArtifactError),

    /// GitHub API errors
    #[error("GitHub error: {0}")]
    GitHub(#[from] GitHubError),

    /// CLI argument errors
    #[error("CLI error: {0}")]
    Cli(#[from] CliError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Credential errors
#[derive(Error, Debug)]
pub enum CredentialError {
    /// Token variable unset or blank
    #[error("{variable} environment variable is not set.")]
    Missing {
        /// Environment variable that was checked
        variable: String,
    },
}

/// Artifact discovery errors
#[derive(Error, Debug)]
pub enum ArtifactError {
    /// No file matched the pattern
    #[error("No Splashtop deployment DMG found in {}", directory.display())]
    NotFound {
        /// Directory that was searched
        directory: PathBuf,
        /// File name pattern that was expected
        pattern: String,
    },

    /// Pattern could not be compiled
    #[error("Invalid artifact pattern '{pattern}': {source}")]
    InvalidPattern {
        /// Pattern as given
        pattern: String,
        /// Glob compile error
        #[source]
        source: glob::PatternError,
    },

    /// A matching entry could not be inspected
    #[error("Failed to read artifact candidate: {source}")]
    Unreadable {
        /// Glob iteration error
        #[source]
        source: glob::GlobError,
    },

    /// Downloads directory could not be determined
    #[error("Could not determine the downloads directory (no home directory)")]
    NoDownloadsDir,
}

/// GitHub API errors
#[derive(Error, Debug)]
pub enum GitHubError {
    /// Connection-level failure (DNS, TLS, reset, body stream)
    #[error("{operation} failed: {source}")]
    Transport {
        /// Operation being performed
        operation: &'static str,
        /// Underlying transport error
        #[source]
        source: reqwest::Error,
    },

    /// Server answered with a non-success status
    #[error("{operation} failed: HTTP {status} from {url}: {body}")]
    Status {
        /// Operation being performed
        operation: &'static str,
        /// Request URL
        url: String,
        /// Response status
        status: reqwest::StatusCode,
        /// Response body text
        body: String,
    },

    /// Response body was not the JSON we expected
    #[error("{operation} returned malformed JSON: {source}")]
    MalformedResponse {
        /// Operation being performed
        operation: &'static str,
        /// JSON decode error
        #[source]
        source: serde_json::Error,
    },

    /// A URL returned by or built for the API was invalid
    #[error("Invalid URL '{url}': {source}")]
    InvalidUrl {
        /// Offending URL text
        url: String,
        /// Parse error
        #[source]
        source: url::ParseError,
    },

    /// HTTP client could not be constructed
    #[error("Failed to build HTTP client: {0}")]
    ClientInit(#[source] reqwest::Error),
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid command line arguments
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// Reason for the error
        reason: String,
    },
}

impl PublishError {
    /// Get actionable recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<String> {
        match self {
            PublishError::Credential(CredentialError::Missing { variable }) => vec![format!(
                "Export it first:  export {}=ghp_yourtoken",
                variable
            )],
            PublishError::Artifact(ArtifactError::NotFound { pattern, .. }) => {
                vec![format!("Expected pattern: {}", pattern)]
            }
            PublishError::Artifact(ArtifactError::NoDownloadsDir) => {
                vec!["Pass the directory explicitly with --downloads-dir".to_string()]
            }
            PublishError::GitHub(GitHubError::Status { status, .. })
                if *status == reqwest::StatusCode::UNAUTHORIZED
                    || *status == reqwest::StatusCode::FORBIDDEN =>
            {
                vec!["Verify the token is valid and has write access to the repository".to_string()]
            }
            PublishError::GitHub(GitHubError::Status { status, .. })
                if *status == reqwest::StatusCode::NOT_FOUND =>
            {
                vec!["Check the --owner and --repo values".to_string()]
            }
            _ => Vec::new(),
        }
    }

    /// Errors raised before any network call, reported on stdout with remediation
    pub fn is_preflight(&self) -> bool {
        matches!(
            self,
            PublishError::Credential(_) | PublishError::Artifact(_)
        )
    }

    /// Process exit code for this error
    pub fn exit_code(&self) -> i32 {
        1
    }
}
