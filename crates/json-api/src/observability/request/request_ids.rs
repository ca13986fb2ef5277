//! Request correlation ids.

use salvo::{http::header::HeaderValue, prelude::Response};
use tracing::warn;
use uuid::Uuid;

pub(super) const REQUEST_ID_HEADER: &str = "x-request-id";

const MAX_REQUEST_ID_LEN: usize = 128;

/// Reuse the caller's id when it is short printable ASCII, otherwise mint a
/// uuid v7.
pub(super) fn resolve_request_id(incoming: Option<String>) -> String {
    incoming
        .map(|value| value.trim().to_string())
        .filter(|value| is_acceptable(value))
        .unwrap_or_else(|| Uuid::now_v7().to_string())
}

fn is_acceptable(value: &str) -> bool {
    !value.is_empty()
        && value.len() <= MAX_REQUEST_ID_LEN
        && value.bytes().all(|byte| byte.is_ascii_graphic())
}

pub(super) fn set_request_id_header(res: &mut Response, request_id: &str) {
    match HeaderValue::from_str(request_id) {
        Ok(value) => {
            res.headers_mut().insert(REQUEST_ID_HEADER, value);
        }
        Err(source) => warn!(request_id, "request id is not a valid header value: {source}"),
    }
}
