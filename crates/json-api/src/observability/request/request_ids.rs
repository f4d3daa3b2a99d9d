//! Request IDs.

use std::fmt;

use salvo::{http::header::HeaderValue, prelude::Response};
use uuid::Uuid;

pub(super) const REQUEST_ID_HEADER: &str = "x-request-id";

/// Longest caller-supplied id that is echoed back unchanged.
const MAX_REQUEST_ID_LEN: usize = 128;

/// Correlates a request's log lines, span and response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct RequestId(String);

impl RequestId {
    /// Reuse the caller's id when it is short printable ASCII, otherwise mint one.
    pub(super) fn from_header(value: Option<&str>) -> Self {
        value
            .map(str::trim)
            .filter(|value| is_acceptable(value))
            .map_or_else(Self::generate, |value| Self(value.to_owned()))
    }

    fn generate() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    pub(super) fn write_header(&self, res: &mut Response) {
        // Accepted and generated ids are both visible ASCII.
        if let Ok(value) = HeaderValue::from_str(&self.0) {
            res.headers_mut().insert(REQUEST_ID_HEADER, value);
        }
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn is_acceptable(value: &str) -> bool {
    !value.is_empty()
        && value.len() <= MAX_REQUEST_ID_LEN
        && value.bytes().all(|byte| byte.is_ascii_graphic())
}
