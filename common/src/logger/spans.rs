use tracing::{Level, Span};

use super::TraceId;

/// Create a root span for one run of a service / command
pub fn root_span(name: &'static str, trace_id: &TraceId) -> Span {
    tracing::span!(
        Level::INFO,
        "root",
        name = %name,
        trace_id = %trace_id.as_str()
    )
}

/// Create a child span (inherits trace_id from the enclosing root span)
pub fn child_span(name: &'static str) -> Span {
    tracing::span!(Level::INFO, "child", name = %name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    #[traced_test]
    #[test]
    fn events_carry_root_and_child_fields() {
        let trace_id = TraceId::default();
        let _root = root_span("leveling_run", &trace_id).entered();
        let _child = child_span("parse_input").entered();

        tracing::info!("stream loaded");

        assert!(logs_contain("stream loaded"));
        assert!(logs_contain("name=leveling_run"));
        assert!(logs_contain(&format!("trace_id={trace_id}")));
        assert!(logs_contain("name=parse_input"));
    }
}
