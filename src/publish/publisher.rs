//! Linear publish workflow.
//!
//! Every step is awaited before the next one starts and any failure ends the
//! run. A release created by this run is left in place if a later step fails.

use crate::artifact::{Artifact, ArtifactLocator};
use crate::cli::OutputManager;
use crate::config::{EnvConfig, PublishConfig};
use crate::error::Result;
use crate::github::{GitHubClient, GitHubReleaseManager};

/// Placeholder shown when the upload response carries no download link
pub const MISSING_URL_PLACEHOLDER: &str = "(no URL in response)";

/// What a publish run did
#[derive(Debug, Clone)]
pub struct PublishResult {
    /// Artifact that was (or would be) uploaded
    pub artifact: Artifact,
    /// Id of the release the asset went to; `None` on dry runs
    pub release_id: Option<u64>,
    /// True when the release was created by this run
    pub release_created: bool,
    /// Number of same-named assets deleted before upload
    pub assets_deleted: usize,
    /// `browser_download_url` reported by the upload response
    pub uploaded_url: Option<String>,
    /// Stable public link for the configured owner/repo/tag/asset
    pub download_url: String,
}

/// Runs the publish workflow for one configuration
pub struct Publisher<'a> {
    config: &'a PublishConfig,
    output: &'a OutputManager,
}

impl<'a> Publisher<'a> {
    /// Create a publisher
    pub fn new(config: &'a PublishConfig, output: &'a OutputManager) -> Self {
        Self { config, output }
    }

    /// Execute the full workflow
    pub async fn publish(&self, env: &EnvConfig) -> Result<PublishResult> {
        // Token before anything touches disk or network.
        let token = env.github_token()?;

        let artifact = self.locate_artifact()?;
        let download_url = self.config.download_url();

        if self.config.dry_run {
            self.output.info(&format!(
                "Dry run: would upload {} as {} to {}/{} ({})",
                artifact.file_name(),
                self.config.asset_name,
                self.config.owner,
                self.config.repo,
                self.config.tag
            ));
            return Ok(PublishResult {
                artifact,
                release_id: None,
                release_created: false,
                assets_deleted: 0,
                uploaded_url: None,
                download_url,
            });
        }

        let client = GitHubClient::new(&self.config.api_base, token)?;
        let manager = GitHubReleaseManager::new(client, &self.config.owner, &self.config.repo);

        let mut assets_deleted = 0;
        let (release, release_created) = match manager.find_release(&self.config.tag).await? {
            Some(release) => {
                self.output.println(&format!(
                    "Found existing release: {} (id={})",
                    self.config.tag, release.id
                ));
                let deleted = manager
                    .replace_asset(&release, &self.config.asset_name, |asset| {
                        self.output
                            .indent_by(2, &format!("Deleting old asset: {}", asset.name));
                    })
                    .await?;
                assets_deleted = deleted.len();
                (release, false)
            }
            None => {
                self.output
                    .println(&format!("Creating new release: {}", self.config.tag));
                let release = manager
                    .create_release(
                        &self.config.tag,
                        &self.config.release_name,
                        &self.config.release_body,
                    )
                    .await?;
                self.output
                    .indent_by(2, &format!("Created release id={}", release.id));
                (release, true)
            }
        };

        self.output.println(&format!(
            "Uploading {} as {}...",
            artifact.file_name(),
            self.config.asset_name
        ));
        let asset = manager
            .upload_asset(&release, &artifact, &self.config.asset_name)
            .await?;
        self.output.indent_by(
            2,
            &format!(
                "Uploaded: {}",
                asset
                    .browser_download_url
                    .as_deref()
                    .unwrap_or(MISSING_URL_PLACEHOLDER)
            ),
        );

        self.output.println("");
        self.output
            .success("Done! Set this as DMG_URL in Install-SplashtopStreamer.sh:");
        self.output.indent_by(2, &download_url);

        Ok(PublishResult {
            artifact,
            release_id: Some(release.id),
            release_created,
            assets_deleted,
            uploaded_url: asset.browser_download_url,
            download_url,
        })
    }

    fn locate_artifact(&self) -> Result<Artifact> {
        let directory = self.config.resolve_downloads_dir()?;
        let locator = ArtifactLocator::new(directory, &self.config.artifact_pattern);

        let candidates = locator.candidates()?;
        if candidates.len() > 1 {
            self.output.warn(&format!(
                "{} matching DMGs in {}; using the last by file name",
                candidates.len(),
                locator.directory().display()
            ));
            for candidate in &candidates {
                self.output.verbose(&candidate.display().to_string());
            }
        }

        let artifact = locator.select(candidates)?;
        self.output.println(&format!(
            "Found DMG: {}  ({:.1} MB)",
            artifact.file_name(),
            artifact.size_mb()
        ));
        Ok(artifact)
    }
}
