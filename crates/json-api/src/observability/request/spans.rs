//! HTTP route naming for spans and metrics.

use uuid::Uuid;

/// Replace uuid path segments with `{uuid}` so routes aggregate.
pub(super) fn normalise_route(path: &str) -> String {
    if path == "/" {
        return "/".to_owned();
    }

    let mut normalised = String::from("/");

    for (index, segment) in path.trim_start_matches('/').split('/').enumerate() {
        if index > 0 {
            normalised.push('/');
        }

        if Uuid::parse_str(segment).is_ok() {
            normalised.push_str("{uuid}");
        } else {
            normalised.push_str(segment);
        }
    }

    normalised
}
