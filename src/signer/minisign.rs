use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use super::{Signer, Verification};
use crate::config::Config;
use crate::container::{SignatureBlob, SignaturePair};
use crate::errors::SignError;

/// Runs the `minisign` binary. Each call blocks until the process exits; a non-zero exit
/// status is reported as a failure rather than ignored.
#[derive(Debug, Clone)]
pub struct MinisignSigner {
    program: PathBuf,
    untrusted_comment: String,
    passwordless: bool,
}

impl MinisignSigner {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            untrusted_comment: crate::config::DEFAULT_UNTRUSTED_COMMENT.to_string(),
            passwordless: false,
        }
    }

    #[must_use]
    pub fn from_config(cfg: &Config) -> Self {
        Self::new(&cfg.minisign).with_untrusted_comment(&cfg.untrusted_comment)
    }

    #[must_use]
    pub fn with_untrusted_comment(mut self, comment: &str) -> Self {
        self.untrusted_comment = comment.to_string();
        self
    }

    /// Generate keys without a passphrase (`-W`).
    #[must_use]
    pub fn passwordless(mut self, yes: bool) -> Self {
        self.passwordless = yes;
        self
    }

    #[must_use]
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// True when the binary can be started (`minisign -v`).
    #[must_use]
    pub fn is_available(&self) -> bool {
        Command::new(&self.program)
            .arg("-v")
            .stdin(Stdio::null())
            .output()
            .is_ok_and(|o| o.status.success())
    }

    fn command(&self) -> Command {
        Command::new(&self.program)
    }

    fn run(cmd: &mut Command) -> std::io::Result<Output> {
        log::debug!("running {cmd:?}");
        // stdin stays attached so minisign can prompt for a passphrase.
        cmd.stdin(Stdio::inherit()).stdout(Stdio::piped()).stderr(Stdio::piped()).output()
    }
}

fn describe(out: &Output) -> String {
    let stderr = String::from_utf8_lossy(&out.stderr);
    let stdout = String::from_utf8_lossy(&out.stdout);
    let msg = if stderr.trim().is_empty() { stdout.trim() } else { stderr.trim() };
    format!("{} ({})", msg, out.status)
}

impl Signer for MinisignSigner {
    fn generate_keypair(&self, public_key: &Path, secret_key: &Path, overwrite: bool) -> Result<(), SignError> {
        let mut cmd = self.command();
        cmd.arg("-G").arg("-p").arg(public_key).arg("-s").arg(secret_key);
        if overwrite {
            cmd.arg("-f");
        }
        if self.passwordless {
            cmd.arg("-W");
        }
        log::debug!("running {cmd:?}");
        // Key generation is interactive; hand the terminal over completely.
        let status = cmd
            .status()
            .map_err(|e| SignError::SignerFailure(format!("unable to run {}: {e}", self.program.display())))?;
        if !status.success() {
            return Err(SignError::SignerFailure(format!("key generation failed ({status})")));
        }
        Ok(())
    }

    fn sign(&self, message: &Path, secret_key: &Path, trusted_comment: &str) -> Result<SignaturePair, SignError> {
        let sig_file = tempfile::Builder::new().prefix("csvsig-").suffix(".minisig").tempfile()?;
        let mut cmd = self.command();
        cmd.arg("-S")
            .arg("-H")
            .arg("-m")
            .arg(message)
            .arg("-t")
            .arg(trusted_comment)
            .arg("-c")
            .arg(&self.untrusted_comment)
            .arg("-x")
            .arg(sig_file.path())
            .arg("-s")
            .arg(secret_key);
        let out = Self::run(&mut cmd)
            .map_err(|e| SignError::SignerFailure(format!("unable to run {}: {e}", self.program.display())))?;
        if !out.status.success() {
            return Err(SignError::SignerFailure(describe(&out)));
        }
        let raw = std::fs::read(sig_file.path())?;
        let blob = SignatureBlob::parse(&raw).map_err(|e| SignError::SignerFailure(e.to_string()))?;
        Ok(blob.signature)
    }

    fn verify(&self, message: &Path, signature: &Path, public_key: &Path) -> Result<Verification, SignError> {
        let mut cmd = self.command();
        cmd.arg("-V").arg("-x").arg(signature).arg("-m").arg(message).arg("-p").arg(public_key);
        let out = Self::run(&mut cmd)
            .map_err(|e| SignError::VerifierFailure(format!("unable to run {}: {e}", self.program.display())))?;
        if out.status.success() {
            return Ok(Verification::Valid);
        }
        let detail = describe(&out);
        if detail.contains("verification failed") {
            Ok(Verification::Invalid { reason: detail })
        } else {
            Err(SignError::VerifierFailure(detail))
        }
    }
}
