//! Release-level operations: find or create a release, replace an asset, upload.

use super::client::GitHubClient;
use super::models::{Asset, CreateReleaseRequest, Release};
use super::upload::upload_endpoint;
use crate::artifact::Artifact;
use crate::error::Result;
use tokio_util::io::ReaderStream;

/// Release operations scoped to one repository
#[derive(Debug, Clone)]
pub struct GitHubReleaseManager {
    client: GitHubClient,
    owner: String,
    repo: String,
}

impl GitHubReleaseManager {
    /// Create a manager for `owner/repo`
    pub fn new(client: GitHubClient, owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            client,
            owner: owner.into(),
            repo: repo.into(),
        }
    }

    fn releases_url(&self) -> String {
        self.client
            .api_url(&format!("/repos/{}/{}/releases", self.owner, self.repo))
    }

    /// List releases (first page only)
    pub async fn list_releases(&self) -> Result<Vec<Release>> {
        self.client
            .get_json("list releases", &self.releases_url())
            .await
    }

    /// Release whose tag equals `tag`, if any
    pub async fn find_release(&self, tag: &str) -> Result<Option<Release>> {
        let releases = self.list_releases().await?;
        Ok(releases.into_iter().find(|r| r.tag_name == tag))
    }

    /// Create a published (non-draft, non-prerelease) release
    pub async fn create_release(&self, tag: &str, name: &str, body: &str) -> Result<Release> {
        let request = CreateReleaseRequest {
            tag_name: tag,
            name,
            body,
            draft: false,
            prerelease: false,
        };
        self.client
            .post_json("create release", &self.releases_url(), &request)
            .await
    }

    /// Assets attached to `release`
    pub async fn list_assets(&self, release: &Release) -> Result<Vec<Asset>> {
        self.client
            .get_json("list release assets", &release.assets_url)
            .await
    }

    /// Delete one asset by id
    pub async fn delete_asset(&self, asset_id: u64) -> Result<()> {
        let url = self.client.api_url(&format!(
            "/repos/{}/{}/releases/assets/{}",
            self.owner, self.repo, asset_id
        ));
        self.client.delete("delete release asset", &url).await
    }

    /// Delete every asset of `release` named `asset_name`.
    ///
    /// `before_delete` runs for each match ahead of its DELETE. Returns the
    /// deleted assets; an empty list means nothing matched.
    pub async fn replace_asset<F>(
        &self,
        release: &Release,
        asset_name: &str,
        mut before_delete: F,
    ) -> Result<Vec<Asset>>
    where
        F: FnMut(&Asset),
    {
        let mut deleted = Vec::new();
        for asset in self.list_assets(release).await? {
            if asset.name == asset_name {
                before_delete(&asset);
                self.delete_asset(asset.id).await?;
                deleted.push(asset);
            }
        }
        Ok(deleted)
    }

    /// Stream `artifact` to the release as `asset_name`
    pub async fn upload_asset(
        &self,
        release: &Release,
        artifact: &Artifact,
        asset_name: &str,
    ) -> Result<Asset> {
        let endpoint = upload_endpoint(&release.upload_url, asset_name)?;
        let file = tokio::fs::File::open(&artifact.path).await?;
        let body = reqwest::Body::wrap_stream(ReaderStream::new(file));

        self.client
            .post_binary("upload release asset", &endpoint, body, artifact.size)
            .await
    }
}
