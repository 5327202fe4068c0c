use logcap::{mdc, registry, scope, CaptureBackend, Level, Matcher};
use serial_test::serial;

#[test]
#[serial]
fn records_flow_into_the_target_sink() {
    CaptureBackend::install();
    let _guard = scope::enter("backend-route");

    log::info!(target: "auth", "User {} logged in", "alice");
    log::warn!(target: "db", "connection lost");

    let auth = registry::sink("auth");
    auth.assert_any(&Matcher::new().level(Level::Info).message_contains("alice"));
    assert_eq!(auth.len(), 1);

    let db = registry::sink("db");
    db.assert_event(0, &Matcher::new().level(Level::Warn));
}

#[test]
#[serial]
fn backend_honors_sink_level_flags() {
    CaptureBackend::install();
    let _guard = scope::enter("backend-flags");

    let sink = registry::sink("quiet");
    sink.set_enabled(Level::Debug, false);

    log::debug!(target: "quiet", "dropped");
    log::info!(target: "quiet", "kept");

    assert_eq!(sink.len(), 1);
    assert_eq!(sink.event(0).unwrap().message, "kept");
}

#[test]
#[serial]
fn backend_respects_scope_isolation() {
    CaptureBackend::install();

    {
        let _guard = scope::enter("backend-iso-1");
        log::info!(target: "svc", "from case one");
    }
    {
        let _guard = scope::enter("backend-iso-2");
        log::info!(target: "svc", "from case two");
    }

    let _guard = scope::enter("backend-iso-1");
    let sink = registry::sink("svc");
    assert_eq!(sink.len(), 1);
    sink.assert_event(0, &Matcher::new().message_contains("case one"));
}

#[test]
#[serial]
fn backend_snapshots_the_diagnostic_context() {
    CaptureBackend::install();
    let _guard = scope::enter("backend-mdc");

    mdc::clear();
    mdc::put("request", "42");
    log::info!(target: "mdc", "handling");
    mdc::clear();

    let event = registry::sink("mdc").event(0).unwrap();
    assert_eq!(event.mdc.get("request").map(String::as_str), Some("42"));
}

#[test]
#[serial]
fn install_is_idempotent() {
    CaptureBackend::install();
    CaptureBackend::install();

    let _guard = scope::enter("backend-idem");
    log::info!(target: "idem", "still routed");
    assert_eq!(registry::sink("idem").len(), 1);
}
