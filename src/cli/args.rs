//! Command line argument parsing and validation.
//!
//! Every argument has a default, so running with no arguments publishes the
//! Splashtop installer to the standard release.

use crate::config::{
    API_BASE, ARTIFACT_PATTERN, ASSET_NAME, GITHUB_OWNER, GITHUB_REPO, PublishConfig,
    RELEASE_BODY, RELEASE_NAME, RELEASE_TAG,
};
use clap::Parser;
use std::path::PathBuf;

/// Upload the Splashtop deployment DMG to a GitHub release
#[derive(Parser, Debug, Clone)]
#[command(
    name = "splashtop_release_publisher",
    version,
    about = "Upload the Splashtop deployment DMG to a GitHub release",
    long_about = "Find the newest Splashtop_Streamer_Mac_DEPLOY_INSTALLER_*.dmg in ~/Downloads,
create or reuse the release, replace the previous SplashtopStreamer.dmg asset,
upload the new one and print its public download URL.

Usage:
  GITHUB_TOKEN=ghp_xxx splashtop_release_publisher
  GITHUB_TOKEN=ghp_xxx splashtop_release_publisher --downloads-dir ./out --dry-run"
)]
pub struct Args {
    /// Repository owner
    #[arg(long, default_value = GITHUB_OWNER)]
    pub owner: String,

    /// Repository name
    #[arg(long, default_value = GITHUB_REPO)]
    pub repo: String,

    /// Release tag to find or create
    #[arg(long, default_value = RELEASE_TAG)]
    pub tag: String,

    /// Release name used when the release is created
    #[arg(long, default_value = RELEASE_NAME)]
    pub release_name: String,

    /// Name the DMG is uploaded under
    #[arg(long, default_value = ASSET_NAME)]
    pub asset_name: String,

    /// Directory to search (default: ~/Downloads)
    #[arg(long, value_name = "DIR")]
    pub downloads_dir: Option<PathBuf>,

    /// File name pattern of the installer
    #[arg(long, default_value = ARTIFACT_PATTERN)]
    pub pattern: String,

    /// GitHub API root URL
    #[arg(long, env = "GITHUB_API_URL", default_value = API_BASE)]
    pub api_base: String,

    /// Find the DMG and report what would be uploaded, without calling GitHub
    #[arg(long)]
    pub dry_run: bool,

    /// Show extra detail
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> Result<(), String> {
        for (flag, value) in [
            ("--owner", &self.owner),
            ("--repo", &self.repo),
            ("--tag", &self.tag),
            ("--asset-name", &self.asset_name),
            ("--pattern", &self.pattern),
        ] {
            if value.trim().is_empty() {
                return Err(format!("{flag} must not be empty"));
            }
        }

        if self.owner.contains('/') || self.repo.contains('/') {
            return Err("--owner and --repo take a single path segment each".to_string());
        }

        if self.asset_name.contains('/') || self.asset_name.contains('\\') {
            return Err(format!(
                "Invalid asset name '{}': must be a plain file name",
                self.asset_name
            ));
        }

        if self.pattern.contains('/') || self.pattern.contains('\\') {
            return Err(format!(
                "Invalid pattern '{}': use --downloads-dir for the directory",
                self.pattern
            ));
        }

        Ok(())
    }
}

impl From<&Args> for PublishConfig {
    fn from(args: &Args) -> Self {
        Self {
            owner: args.owner.clone(),
            repo: args.repo.clone(),
            tag: args.tag.clone(),
            release_name: args.release_name.clone(),
            release_body: RELEASE_BODY.to_string(),
            asset_name: args.asset_name.clone(),
            downloads_dir: args.downloads_dir.clone(),
            artifact_pattern: args.pattern.clone(),
            api_base: args.api_base.clone(),
            dry_run: args.dry_run,
        }
    }
}
