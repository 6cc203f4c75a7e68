//! Upload endpoint construction.

use crate::error::{GitHubError, Result};
use url::Url;

/// Expand a release `upload_url` template into the endpoint for `asset_name`.
///
/// GitHub returns `.../assets{?name,label}`; everything from the first `{`
/// is dropped and `name` is appended as an encoded query parameter.
pub fn upload_endpoint(template: &str, asset_name: &str) -> Result<Url> {
    let base = template.split('{').next().unwrap_or(template);
    let mut url = Url::parse(base).map_err(|source| GitHubError::InvalidUrl {
        url: base.to_string(),
        source,
    })?;
    url.query_pairs_mut().append_pair("name", asset_name);
    Ok(url)
}
