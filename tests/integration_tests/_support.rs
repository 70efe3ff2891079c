use std::path::{Path, PathBuf};

use csvsig::signer::{MemorySigner, Signer};

pub const SAMPLE: &[u8] = b"a,b\n#note\n# rsid 1\nx,1\n";

pub fn write(dir: &Path, name: &str, bytes: &[u8]) -> PathBuf {
    let p = dir.join(name);
    std::fs::write(&p, bytes).unwrap();
    p
}

/// Fresh `MemorySigner` key pair in `dir`; returns (public, secret).
pub fn memory_keys(dir: &Path, stem: &str) -> (PathBuf, PathBuf) {
    let pk = dir.join(format!("{stem}.pub"));
    let sk = dir.join(format!("{stem}.key"));
    MemorySigner::new().generate_keypair(&pk, &sk, false).unwrap();
    (pk, sk)
}
