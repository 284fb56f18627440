use std::fs;
use tempfile::tempdir;
use unitbench::logger::{METRICS_TARGET, configure_logging};

// One logger per process, so this binary holds a single test.
#[test]
fn configure_logging_splits_app_and_metrics() {
    let dir = tempdir().unwrap();
    let base = dir.path().join("logs");
    configure_logging(Some(&base), Some("debug"), Some(2)).unwrap();
    log::info!("hello app");
    log::info!(target: METRICS_TARGET, "kind=mult file=X.java replicate=1 solve_ms=5");
    log::logger().flush();

    let app = fs::read_to_string(base.join("app.log")).unwrap();
    let metrics = fs::read_to_string(base.join("metrics.log")).unwrap();
    assert!(app.contains("hello app"));
    assert!(!app.contains("solve_ms=5"));
    assert!(metrics.contains("solve_ms=5"));

    // a second install is refused rather than silently replacing the first
    assert!(configure_logging(Some(&base), None, None).is_err());
}
