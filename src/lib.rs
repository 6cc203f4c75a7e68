//! # Splashtop Release Publisher
//!
//! Publishes the locally built Splashtop Streamer deployment DMG to a GitHub
//! release and prints the public download URL for the install script.
//!
//! ## Workflow
//!
//! 1. Read `GITHUB_TOKEN`, aborting if it is unset or blank
//! 2. Pick the newest `Splashtop_Streamer_Mac_DEPLOY_INSTALLER_*.dmg` in `~/Downloads`
//! 3. Find the `v1.0.0` release, or create it
//! 4. Delete any existing `SplashtopStreamer.dmg` asset
//! 5. Stream the DMG up as `SplashtopStreamer.dmg`
//! 6. Print the download URL
//!
//! ## Usage
//!
//! ```bash
//! GITHUB_TOKEN=ghp_xxx splashtop_release_publisher
//! GITHUB_TOKEN=ghp_xxx splashtop_release_publisher --dry-run
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod artifact;
pub mod cli;
pub mod config;
pub mod error;
pub mod github;
pub mod publish;

pub use artifact::{Artifact, ArtifactLocator};
pub use cli::Args;
pub use config::{EnvConfig, PublishConfig};
pub use error::{PublishError, Result};
pub use github::{GitHubClient, GitHubReleaseManager};
pub use publish::{PublishResult, Publisher};
