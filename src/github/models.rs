//! Wire types for the GitHub releases API.
//!
//! Only the fields the publisher reads are declared; serde ignores the rest.

use serde::{Deserialize, Serialize};

/// A GitHub release
#[derive(Debug, Clone, Deserialize)]
pub struct Release {
    /// Numeric release id
    pub id: u64,
    /// Git tag the release points at
    pub tag_name: String,
    /// API URL listing this release's assets
    pub assets_url: String,
    /// Upload URL template, e.g. `https://uploads.github.com/.../assets{?name,label}`
    pub upload_url: String,
}

/// A file attached to a release
#[derive(Debug, Clone, Deserialize)]
pub struct Asset {
    /// Numeric asset id
    pub id: u64,
    /// File name within the release
    pub name: String,
    /// Public download link
    #[serde(default)]
    pub browser_download_url: Option<String>,
}

/// Body of `POST /repos/{owner}/{repo}/releases`
#[derive(Debug, Clone, Serialize)]
pub struct CreateReleaseRequest<'a> {
    /// Tag to create the release for
    pub tag_name: &'a str,
    /// Display name
    pub name: &'a str,
    /// Release notes
    pub body: &'a str,
    /// Create as draft
    pub draft: bool,
    /// Create as pre-release
    pub prerelease: bool,
}
