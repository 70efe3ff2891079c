use std::fs::File;
use std::io;
use std::path::Path;

use sha2::{Digest, Sha256};

use super::{Signer, Verification};
use crate::container::{SignatureBlob, SignaturePair};
use crate::errors::SignError;

const SECRET_TAG: &str = "csvsig-memory-secret:";
const PUBLIC_TAG: &str = "csvsig-memory-public:";

/// Deterministic stand-in for a real signer.
///
/// Keys are a random identifier written to both key files; the "signatures" are keyed
/// SHA-256 digests. Anyone holding the public file can forge signatures, so this is only
/// fit for exercising the container format.
#[derive(Debug, Clone, Default)]
pub struct MemorySigner;

impl MemorySigner {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn signature1(key_id: &str, message_digest: &[u8]) -> String {
        let mut h = Sha256::new();
        h.update(key_id.as_bytes());
        h.update(message_digest);
        format!("MS{}", hex::encode(h.finalize()))
    }

    fn signature2(key_id: &str, signature1: &[u8], trusted_comment: &str) -> String {
        let mut h = Sha256::new();
        h.update(key_id.as_bytes());
        h.update(signature1);
        h.update(trusted_comment.as_bytes());
        hex::encode(h.finalize())
    }
}

fn digest_file(path: &Path) -> io::Result<Vec<u8>> {
    let mut h = Sha256::new();
    io::copy(&mut File::open(path)?, &mut h)?;
    Ok(h.finalize().to_vec())
}

fn read_key(path: &Path, tag: &str) -> Result<String, String> {
    let raw = std::fs::read_to_string(path).map_err(|e| format!("{}: {e}", path.display()))?;
    raw.trim()
        .strip_prefix(tag)
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty())
        .ok_or_else(|| format!("{} is not a {} key file", path.display(), tag.trim_end_matches(':')))
}

impl Signer for MemorySigner {
    fn generate_keypair(&self, public_key: &Path, secret_key: &Path, overwrite: bool) -> Result<(), SignError> {
        if !overwrite && (public_key.exists() || secret_key.exists()) {
            return Err(SignError::SignerFailure("key file already exists; use overwrite".into()));
        }
        let key_id = hex::encode(rand::random::<[u8; 16]>());
        std::fs::write(secret_key, format!("{SECRET_TAG} {key_id}\n"))
            .map_err(|e| SignError::SignerFailure(format!("{}: {e}", secret_key.display())))?;
        std::fs::write(public_key, format!("{PUBLIC_TAG} {key_id}\n"))
            .map_err(|e| SignError::SignerFailure(format!("{}: {e}", public_key.display())))?;
        Ok(())
    }

    fn sign(&self, message: &Path, secret_key: &Path, trusted_comment: &str) -> Result<SignaturePair, SignError> {
        let key_id = read_key(secret_key, SECRET_TAG).map_err(SignError::SignerFailure)?;
        let digest = digest_file(message).map_err(|e| SignError::SignerFailure(e.to_string()))?;
        let s1 = Self::signature1(&key_id, &digest);
        let s2 = Self::signature2(&key_id, s1.as_bytes(), trusted_comment);
        SignaturePair::new(s1, s2)
    }

    fn verify(&self, message: &Path, signature: &Path, public_key: &Path) -> Result<Verification, SignError> {
        let key_id = read_key(public_key, PUBLIC_TAG).map_err(SignError::VerifierFailure)?;
        let raw = std::fs::read(signature).map_err(|e| SignError::VerifierFailure(e.to_string()))?;
        let blob = SignatureBlob::parse(&raw).map_err(|e| SignError::VerifierFailure(e.to_string()))?;
        let digest = digest_file(message).map_err(|e| SignError::VerifierFailure(e.to_string()))?;

        if Self::signature1(&key_id, &digest).as_bytes() != blob.signature.signature1() {
            return Ok(Verification::Invalid { reason: "signature does not match the message or key".into() });
        }
        let expected2 = Self::signature2(&key_id, blob.signature.signature1(), &blob.trusted_comment);
        if expected2.as_bytes() != blob.signature.signature2() {
            return Ok(Verification::Invalid { reason: "trusted comment signature mismatch".into() });
        }
        Ok(Verification::Valid)
    }
}
