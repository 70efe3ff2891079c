use std::fs;
use tempfile::tempdir;

#[test]
fn configure_logging_writes_app_and_audit_in_dir() {
    let dir = tempdir().unwrap();
    let base = dir.path().join("proc_logs");
    csvsig::logger::configure_logging(Some(base.as_path()), Some("debug"), Some(3)).unwrap();
    log::info!("hello app");
    log::info!(target: csvsig::logger::AUDIT_TARGET, "audit event");
    assert!(base.join("app.log").exists());
    assert!(base.join("audit.log").exists());
}

#[test]
fn init_path_rejects_missing_file() {
    let dir = tempdir().unwrap();
    fs::create_dir_all(dir.path()).unwrap();
    assert!(csvsig::logger::init_path(&dir.path().join("nope.yaml")).is_err());
}
