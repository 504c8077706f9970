use crate::headers::{self, Headers};
use crate::model::{Manifest, ProductionRequest};

/// Value of the `message_kind` header the transformer proposes.
const PRODUCTION_REQUEST_KIND: &str = "production_request";

/// Map a parsed manifest plus file metadata into the canonical message.
///
/// Pure: same inputs always yield the same request and header map.
///
/// `filename` must come from the file event, never from manifest content.
/// The returned headers are the union of the incoming headers and the
/// transformer's defaults, incoming values winning on collision
/// (copy-if-absent).
pub fn to_production_request(
    manifest: Manifest,
    filename: &str,
    headers: &Headers,
) -> (ProductionRequest, Headers) {
    let request = ProductionRequest::from_manifest(manifest, filename);

    let defaults = Headers::new().with(headers::MESSAGE_KIND, PRODUCTION_REQUEST_KIND);
    let headers = headers.merge_absent(&defaults);

    (request, headers)
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headers::{FILE_NAME, MESSAGE_KIND};

    fn manifest() -> Manifest {
        Manifest {
            interview: "i.mp3".into(),
            introduction: "intro.mp3".into(),
            timestamp: 1000,
            description: "d".into(),
        }
    }

    #[test]
    fn filename_comes_from_the_event_not_the_manifest() {
        let incoming = Headers::new().with(FILE_NAME, "show42.podcast");
        let (request, _) = to_production_request(manifest(), "show42.podcast", &incoming);

        assert_eq!(request.filename, "show42.podcast");
        assert_eq!(request.interview_file, "i.mp3");
        assert_eq!(request.introduction_file, "intro.mp3");
        assert_eq!(request.timestamp, 1000);
        assert_eq!(request.description, "d");
    }

    #[test]
    fn incoming_headers_win_over_transformer_defaults() {
        let incoming = Headers::new()
            .with(FILE_NAME, "show42.podcast")
            .with(MESSAGE_KIND, "override");

        let (_, headers) = to_production_request(manifest(), "show42.podcast", &incoming);

        assert_eq!(headers.get(MESSAGE_KIND), Some("override"));
        assert_eq!(headers.get(FILE_NAME), Some("show42.podcast"));
    }

    #[test]
    fn transformer_default_is_added_when_absent() {
        let incoming = Headers::new().with(FILE_NAME, "show42.podcast");
        let (_, headers) = to_production_request(manifest(), "show42.podcast", &incoming);

        assert_eq!(headers.get(MESSAGE_KIND), Some("production_request"));
    }

    #[test]
    fn mapping_is_deterministic() {
        let incoming = Headers::new().with(FILE_NAME, "show42.podcast");
        let a = to_production_request(manifest(), "show42.podcast", &incoming);
        let b = to_production_request(manifest(), "show42.podcast", &incoming);
        assert_eq!(a, b);
    }
}
