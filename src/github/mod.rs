//! GitHub integration for release publishing

mod client;
mod models;
mod release_manager;
mod upload;

pub use client::GitHubClient;
pub use models::{Asset, CreateReleaseRequest, Release};
pub use release_manager::GitHubReleaseManager;
pub use upload::upload_endpoint;
