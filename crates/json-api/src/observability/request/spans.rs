//! HTTP span naming.

use uuid::Uuid;

/// Low-cardinality route and span name for a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct RouteName {
    /// Path with identifier segments replaced by `{uuid}`.
    pub(super) route: String,

    /// `"{METHOD} {route}"`
    pub(super) span_name: String,
}

pub(super) fn route_name(method: &str, path: &str) -> RouteName {
    let route = route_template(path);
    let span_name = format!("{method} {route}");

    RouteName { route, span_name }
}

fn route_template(path: &str) -> String {
    let segments: Vec<&str> = path
        .split('/')
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            if Uuid::try_parse(segment).is_ok() {
                "{uuid}"
            } else {
                segment
            }
        })
        .collect();

    format!("/{}", segments.join("/"))
}
