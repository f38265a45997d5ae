//! Low-cardinality route labels for spans and metrics.

use uuid::Uuid;

/// Replace numeric ids and UUIDs in a request path with placeholders, so
/// `/carriers/12` and `/carriers/13` share one series.
pub(super) fn normalise(path: &str) -> String {
    let segments = path
        .split('/')
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            if segment.bytes().all(|byte| byte.is_ascii_digit()) {
                "{id}"
            } else if Uuid::parse_str(segment).is_ok() {
                "{uuid}"
            } else {
                segment
            }
        })
        .collect::<Vec<_>>();

    format!("/{}", segments.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_and_uuid_segments_are_replaced() {
        assert_eq!(normalise("/shipments/42/history"), "/shipments/{id}/history");
        assert_eq!(
            normalise("/shipment-route/detail/0191f7a2-3c4e-7d1a-9b2f-1c2d3e4f5a6b"),
            "/shipment-route/detail/{uuid}"
        );
    }

    #[test]
    fn static_paths_are_unchanged() {
        assert_eq!(normalise("/"), "/");
        assert_eq!(normalise("/shipment-route/list"), "/shipment-route/list");
        assert_eq!(
            normalise("/shipment-route/status/in_progress"),
            "/shipment-route/status/in_progress"
        );
    }
}
