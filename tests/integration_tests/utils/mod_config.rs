use std::path::PathBuf;

use csvsig::config::Config;
use csvsig::errors::SignError;
use tempfile::tempdir;

use crate::integration_tests::_support::write;

fn no_env(_: &str) -> Option<String> {
    None
}

#[test]
fn explicit_file_beats_discovered_file_and_env() {
    let dir = tempdir().unwrap();
    let explicit = write(dir.path(), "explicit.toml", b"trusted_comment = \"from-explicit\"\n");
    let local = write(dir.path(), "csvsig.toml", b"trusted_comment = \"from-local\"\nchunk_size = 512\n");
    let env = |k: &str| match k {
        "CSVSIG_TRUSTED_COMMENT" => Some("from-env".to_string()),
        "CSVSIG_MINISIGN" => Some("/usr/local/bin/minisign".to_string()),
        _ => None,
    };
    let cfg = Config::load_from(Some(explicit.as_path()), &[explicit.clone(), local], env).unwrap();
    assert_eq!(cfg.trusted_comment, "from-explicit");
    assert_eq!(cfg.chunk_size, 512);
    assert_eq!(cfg.minisign, PathBuf::from("/usr/local/bin/minisign"));
}

#[test]
fn missing_explicit_file_is_an_error() {
    let dir = tempdir().unwrap();
    let p = dir.path().join("absent.toml");
    let err = Config::load_from(Some(p.as_path()), &[p.clone()], no_env).unwrap_err();
    assert!(matches!(err, SignError::Config(_)));
}

#[test]
fn broken_discovered_file_is_skipped() {
    let dir = tempdir().unwrap();
    let bad = write(dir.path(), "csvsig.toml", b"trusted_comment = [unterminated");
    let cfg = Config::load_from(None, &[bad], no_env).unwrap();
    assert_eq!(cfg, Config::default());
}

#[test]
fn key_paths_come_from_file() {
    let dir = tempdir().unwrap();
    let p = write(dir.path(), "c.toml", b"public_key = \"k.pub\"\nsecret_key = \"k.key\"\nlog_level = \"debug\"\n");
    let cfg = Config::load_from(Some(p.as_path()), &[p.clone()], no_env).unwrap();
    assert_eq!(cfg.public_key, Some(PathBuf::from("k.pub")));
    assert_eq!(cfg.secret_key, Some(PathBuf::from("k.key")));
    assert_eq!(cfg.log_level.as_deref(), Some("debug"));
}

#[test]
fn zero_chunk_size_fails_validation() {
    let dir = tempdir().unwrap();
    let p = write(dir.path(), "c.toml", b"chunk_size = 0\n");
    assert!(Config::load_from(Some(p.as_path()), &[p.clone()], no_env).is_err());
}
