//! Local installer artifact discovery.

mod locator;

pub use locator::{Artifact, ArtifactLocator};
