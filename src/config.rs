//! Publishing configuration and environment access.

use crate::error::{ArtifactError, CredentialError, Result};
use std::collections::HashMap;
use std::path::PathBuf;

/// Repository owner
pub const GITHUB_OWNER: &str = "TG-orlando";
/// Repository name
pub const GITHUB_REPO: &str = "splashtop-deployment";
/// Tag of the release that holds the installer
pub const RELEASE_TAG: &str = "v1.0.0";
/// Display name used when the release is created
pub const RELEASE_NAME: &str = "Splashtop Streamer Deployment";
/// Body text used when the release is created
pub const RELEASE_BODY: &str = "Splashtop Streamer deployment package for MDM distribution.";
/// Fixed asset name the install script expects
pub const ASSET_NAME: &str = "SplashtopStreamer.dmg";
/// File name pattern of the installer in the downloads directory
pub const ARTIFACT_PATTERN: &str = "Splashtop_Streamer_Mac_DEPLOY_INSTALLER_*.dmg";
/// GitHub REST API root
pub const API_BASE: &str = "https://api.github.com";
/// Public root for release download links
pub const DOWNLOAD_BASE: &str = "https://github.com";
/// Environment variable holding the access token
pub const TOKEN_VAR: &str = "GITHUB_TOKEN";

/// Configuration for a publish run
#[derive(Debug, Clone)]
pub struct PublishConfig {
    /// Repository owner
    pub owner: String,
    /// Repository name
    pub repo: String,
    /// Release tag to find or create
    pub tag: String,
    /// Release name used on creation
    pub release_name: String,
    /// Release body used on creation
    pub release_body: String,
    /// Name the artifact is uploaded under
    pub asset_name: String,
    /// Directory searched for the artifact; `None` means `$HOME/Downloads`
    pub downloads_dir: Option<PathBuf>,
    /// File name glob searched for in the downloads directory
    pub artifact_pattern: String,
    /// GitHub API root URL
    pub api_base: String,
    /// Stop after artifact discovery
    pub dry_run: bool,
}

impl Default for PublishConfig {
    fn default() -> Self {
        Self {
            owner: GITHUB_OWNER.to_string(),
            repo: GITHUB_REPO.to_string(),
            tag: RELEASE_TAG.to_string(),
            release_name: RELEASE_NAME.to_string(),
            release_body: RELEASE_BODY.to_string(),
            asset_name: ASSET_NAME.to_string(),
            downloads_dir: None,
            artifact_pattern: ARTIFACT_PATTERN.to_string(),
            api_base: API_BASE.to_string(),
            dry_run: false,
        }
    }
}

impl PublishConfig {
    /// Directory to search, falling back to `$HOME/Downloads`
    pub fn resolve_downloads_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.downloads_dir {
            return Ok(dir.clone());
        }
        dirs::home_dir()
            .map(|home| home.join("Downloads"))
            .ok_or_else(|| ArtifactError::NoDownloadsDir.into())
    }

    /// Public URL the uploaded asset is served from
    pub fn download_url(&self) -> String {
        format!(
            "{}/{}/{}/releases/download/{}/{}",
            DOWNLOAD_BASE, self.owner, self.repo, self.tag, self.asset_name
        )
    }
}

/// Snapshot of environment variables
#[derive(Debug, Clone, Default)]
pub struct EnvConfig {
    vars: HashMap<String, String>,
}

impl EnvConfig {
    /// Capture the current process environment
    pub fn from_process() -> Self {
        Self {
            vars: std::env::vars().collect(),
        }
    }

    /// Build from explicit pairs
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Trimmed value of `key`; blank counts as unset
    pub fn get(&self, key: &str) -> Option<String> {
        self.vars
            .get(key)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    }

    /// The GitHub access token
    pub fn github_token(&self) -> Result<String> {
        self.get(TOKEN_VAR).ok_or_else(|| {
            CredentialError::Missing {
                variable: TOKEN_VAR.to_string(),
            }
            .into()
        })
    }
}
