//! External signing collaborator: keypair generation, signing and verification.
//!
//! `MinisignSigner` drives the `minisign` binary; `MemorySigner` is a deterministic fake
//! that exercises the container format without any external tool.

use std::path::Path;

use serde::Serialize;

use crate::container::SignaturePair;
use crate::errors::SignError;

pub mod memory;
pub mod minisign;

pub use memory::MemorySigner;
pub use minisign::MinisignSigner;

/// Verdict of a verification that ran to completion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "verdict", rename_all = "lowercase")]
pub enum Verification {
    Valid,
    Invalid { reason: String },
}

impl Verification {
    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, Verification::Valid)
    }
}

pub trait Signer {
    /// # Errors
    /// `SignerFailure` when the keypair could not be written.
    fn generate_keypair(&self, public_key: &Path, secret_key: &Path, overwrite: bool) -> Result<(), SignError>;

    /// Sign `message`, binding `trusted_comment` into the second signature line.
    ///
    /// # Errors
    /// `SignerFailure` when the signer does not produce both lines.
    fn sign(&self, message: &Path, secret_key: &Path, trusted_comment: &str) -> Result<SignaturePair, SignError>;

    /// Check the blob at `signature` against `message`.
    ///
    /// # Errors
    /// `VerifierFailure` when no verdict could be reached; a bad signature is `Ok(Invalid)`.
    fn verify(&self, message: &Path, signature: &Path, public_key: &Path) -> Result<Verification, SignError>;
}
