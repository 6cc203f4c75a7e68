//! The publish workflow: credential check, artifact discovery, release
//! resolution, asset replacement and upload.

mod publisher;

pub use publisher::{MISSING_URL_PLACEHOLDER, PublishResult, Publisher};
