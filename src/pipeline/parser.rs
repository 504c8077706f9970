use crate::model::Manifest;

// ── Error ──────────────────────────────────────────────────────────────────────

/// A manifest file whose content could not be decoded.
///
/// Carries the originating filename so operators can find and fix (or
/// remove) the offending file — a bad manifest is re-read and re-fails on
/// every tick until someone does.
#[derive(Debug)]
pub struct ManifestParseError {
    pub filename: String,
    detail: String,
}

impl std::fmt::Display for ManifestParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "manifest '{}' failed to decode: {}", self.filename, self.detail)
    }
}

impl std::error::Error for ManifestParseError {}

// ── Parse ──────────────────────────────────────────────────────────────────────

/// Decode manifest file content.
///
/// Fails closed: invalid JSON or any missing required field yields a
/// [`ManifestParseError`] and nothing reaches the transformer. There is no
/// partially populated `Manifest`.
pub fn parse(filename: &str, content: &str) -> Result<Manifest, ManifestParseError> {
    serde_json::from_str(content).map_err(|e| ManifestParseError {
        filename: filename.to_string(),
        detail: e.to_string(),
    })
}

// ── Tests ──────────────────────────────────────────────────────────────────────
