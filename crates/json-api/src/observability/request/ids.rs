//! `x-request-id` propagation.

use salvo::{http::header::HeaderValue, prelude::Response};
use tracing::warn;
use uuid::Uuid;

pub(super) const REQUEST_ID_HEADER: &str = "x-request-id";

pub(super) const REQUEST_ID_DEPOT_KEY: &str = "request_id";

/// Keep the caller's id when it sent a non-blank one, otherwise mint a v7 UUID.
pub(super) fn resolve(header: Option<String>) -> String {
    header
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| Uuid::now_v7().to_string())
}

pub(super) fn echo(res: &mut Response, request_id: &str) {
    match HeaderValue::from_str(request_id) {
        Ok(value) => {
            res.headers_mut().insert(REQUEST_ID_HEADER, value);
        }
        Err(source) => warn!(request_id, "request id is not a valid header value: {source}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_header_is_replaced() {
        let id = resolve(Some("   ".to_string()));

        assert!(Uuid::parse_str(&id).is_ok(), "blank ids should be regenerated");
    }

    #[test]
    fn caller_id_is_kept() {
        assert_eq!(resolve(Some("abc".to_string())), "abc");
    }
}
