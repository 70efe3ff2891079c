// These run only when a `minisign` binary is on PATH.
use csvsig::signer::{MinisignSigner, Signer, Verification};
use tempfile::tempdir;

use crate::integration_tests::_support::{SAMPLE, write};

fn available() -> Option<MinisignSigner> {
    let signer = MinisignSigner::new("minisign").passwordless(true);
    if signer.is_available() {
        Some(signer)
    } else {
        eprintln!("minisign not found on PATH; skipping");
        None
    }
}

#[test]
fn real_minisign_sign_and_verify() {
    let Some(signer) = available() else { return };
    let dir = tempdir().unwrap();
    let (pk, sk) = (dir.path().join("m.pub"), dir.path().join("m.key"));
    signer.generate_keypair(&pk, &sk, false).unwrap();

    let msg = write(dir.path(), "m.csv", SAMPLE);
    let pair = signer.sign(&msg, &sk, "X123").unwrap();
    let blob = write(
        dir.path(),
        "m.minisig",
        &csvsig::container::SignatureBlob::new(pair, "X123").to_bytes(),
    );
    assert_eq!(signer.verify(&msg, &blob, &pk).unwrap(), Verification::Valid);

    write(dir.path(), "m.csv", b"tampered\n");
    assert!(matches!(signer.verify(&msg, &blob, &pk), Ok(Verification::Invalid { .. }) | Err(_)));
}

#[test]
fn unknown_binary_reports_failures() {
    let dir = tempdir().unwrap();
    let signer = MinisignSigner::new(dir.path().join("no-such-minisign"));
    assert!(!signer.is_available());
    let err = signer
        .generate_keypair(&dir.path().join("p"), &dir.path().join("s"), false)
        .unwrap_err();
    assert!(matches!(err, csvsig::errors::SignError::SignerFailure(_)));
}
