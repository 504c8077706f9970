use serde::{Deserialize, Serialize};

use super::Manifest;

/// Canonical production request published to RabbitMQ.
///
/// Published to the configured requests exchange under the configured
/// routing key, JSON-encoded. One request is published per successfully
/// parsed manifest file; nothing is retained after the publish.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductionRequest {
    /// Interview audio reference, copied from the manifest.
    pub interview_file: String,

    /// Introduction audio reference, copied from the manifest.
    pub introduction_file: String,

    /// Name of the manifest file that triggered this request.
    ///
    /// Always derived from the file event, never from manifest content, so
    /// a manifest body cannot spoof its own origin.
    pub filename: String,

    /// Timestamp copied from the manifest.
    pub timestamp: i64,

    /// Description copied from the manifest.
    pub description: String,
}

impl ProductionRequest {
    /// Build a request from a parsed manifest and the originating filename.
    pub fn from_manifest(manifest: Manifest, filename: impl Into<String>) -> Self {
        Self {
            interview_file: manifest.interview,
            introduction_file: manifest.introduction,
            filename: filename.into(),
            timestamp: manifest.timestamp,
            description: manifest.description,
        }
    }
}
