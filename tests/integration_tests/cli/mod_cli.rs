use csvsig::cli::{Command, OutputMode, run, run_with_format};
use csvsig::config::Config;
use csvsig::errors::SignError;
use csvsig::signer::MemorySigner;
use tempfile::tempdir;

use crate::integration_tests::_support::{SAMPLE, write};

#[test]
fn init_sign_extract_flow_with_configured_keys() {
    let dir = tempdir().unwrap();
    let cfg = Config {
        public_key: Some(dir.path().join("cfg.pub")),
        secret_key: Some(dir.path().join("cfg.key")),
        ..Config::default()
    };
    let signer = MemorySigner::new();

    run(&signer, &cfg, Command::Init { public_key: None, secret_key: None, force: false }).unwrap();
    assert!(dir.path().join("cfg.pub").exists());

    let input = write(dir.path(), "in.csv", SAMPLE);
    let output = dir.path().join("out.csv");
    run_with_format(
        &signer,
        &cfg,
        Command::Sign { input: Some(input), output: Some(output.clone()), secret_key: None },
        OutputMode::Json,
    )
    .unwrap();

    let clean = dir.path().join("clean.csv");
    let sig = dir.path().join("clean.csv.minisig");
    run_with_format(
        &signer,
        &cfg,
        Command::Extract { input: Some(output), clean_out: Some(clean.clone()), sig_out: Some(sig.clone()) },
        OutputMode::Plain,
    )
    .unwrap();
    assert_eq!(std::fs::read(clean).unwrap(), SAMPLE.to_vec());
    assert!(sig.exists());
}

#[test]
fn missing_key_path_is_a_missing_argument() {
    let dir = tempdir().unwrap();
    let input = write(dir.path(), "in.csv", SAMPLE);
    let err = run(
        &MemorySigner::new(),
        &Config::default(),
        Command::Sign { input: Some(input), output: Some(dir.path().join("o.csv")), secret_key: None },
    )
    .unwrap_err();
    let e = err.downcast_ref::<SignError>().unwrap();
    assert!(matches!(e, SignError::MissingArgument(name) if name == "secret_key"));
    assert_eq!(e.exit_code(), 1);
}

#[test]
fn missing_input_is_a_missing_argument() {
    let err = run(&MemorySigner::new(), &Config::default(), Command::Verify { input: None, public_key: None })
        .unwrap_err();
    assert!(matches!(err.downcast_ref::<SignError>(), Some(SignError::MissingArgument(_))));
}
