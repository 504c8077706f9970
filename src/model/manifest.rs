use serde::Deserialize;

/// A podcast production manifest, as written into the watched directory.
///
/// Decoded from the JSON body of a `.podcast` file. Every field is required;
/// a manifest missing any of them fails decoding outright so no partially
/// populated value ever reaches the transformer.
///
/// Unknown keys are ignored. In particular a `filename` key embedded in the
/// body has no effect — the originating filename is taken from the file
/// event, never from manifest content.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Manifest {
    /// Reference to the interview audio (path or id, opaque to this service).
    pub interview: String,

    /// Reference to the introduction audio.
    pub introduction: String,

    /// Production timestamp supplied by whoever dropped the file.
    pub timestamp: i64,

    /// Free-text description of the episode.
    pub description: String,
}
