use super::poller::FileEvent;

/// Extension (including the dot) a manifest file must carry, matched
/// case-insensitively.
pub const MANIFEST_EXTENSION: &str = ".podcast";

/// Decide whether a discovered file is a processable manifest.
///
/// Passes only regular, non-empty files whose name ends with
/// [`MANIFEST_EXTENSION`]. Everything else — directories, partial writes,
/// unrelated files — is rejected silently; rejection is expected noise, not
/// an error, and the entry is simply re-evaluated on the next tick if it is
/// still there.
pub fn accepts(event: &FileEvent) -> bool {
    event.metadata.is_file()
        && event.metadata.len() > 0
        && event.filename.to_lowercase().ends_with(MANIFEST_EXTENSION)
}

// ── Tests ──────────────────────────────────────────────────────────────────────
