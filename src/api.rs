//! End-to-end flows: generate keys, sign a file into a container, verify a container.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::config::Config;
use crate::container::{self, EmbedReport, SignaturePair};
use crate::errors::SignError;
use crate::fsutil;
use crate::logger::AUDIT_TARGET;
use crate::signer::{Signer, Verification};

#[derive(Debug, Clone, Serialize)]
pub struct SignReport {
    pub input: String,
    pub output: String,
    #[serde(flatten)]
    pub embed: EmbedReport,
}

pub fn init_keys(signer: &dyn Signer, public_key: &Path, secret_key: &Path, overwrite: bool) -> Result<(), SignError> {
    log::info!("init: public_key={}, secret_key={}", public_key.display(), secret_key.display());
    signer.generate_keypair(public_key, secret_key, overwrite)
}

/// Sign `input` and write the signed container to `output`.
///
/// The container is assembled in a temporary file next to `output` and moved into place
/// only once complete, so a failure never leaves a partial output behind. `output` may be
/// the same path as `input`.
pub fn sign_file(
    signer: &dyn Signer,
    config: &Config,
    input: &Path,
    output: &Path,
    secret_key: &Path,
) -> Result<SignReport, SignError> {
    config.validate()?;
    let signature = sign_as_extracted(signer, input, secret_key, &config.trusted_comment)?;

    let mut tmp = fsutil::temp_sibling(output)?;
    let reader = BufReader::new(File::open(input)?);
    let embed = container::embed_stream(reader, BufWriter::new(tmp.as_file_mut()), &signature, &config.container_options())?;
    fsutil::persist(tmp, output)?;

    log::info!(target: AUDIT_TARGET, "signed input={} output={}", input.display(), output.display());
    Ok(SignReport { input: input.display().to_string(), output: output.display().to_string(), embed })
}

/// Sign the bytes extraction will rebuild: `input` itself, or a staged copy with the
/// header terminator embedding appends.
fn sign_as_extracted(
    signer: &dyn Signer,
    input: &Path,
    secret_key: &Path,
    trusted_comment: &str,
) -> Result<SignaturePair, SignError> {
    let Some(eol) = container::header_terminator(BufReader::new(File::open(input)?))? else {
        return signer.sign(input, secret_key, trusted_comment);
    };
    log::debug!("sign: header of {} is unterminated, signing it with {eol:?} appended", input.display());
    let mut staged = tempfile::Builder::new().prefix("csvsig-stage-").tempfile()?;
    io::copy(&mut File::open(input)?, staged.as_file_mut())?;
    staged.write_all(eol.as_bytes())?;
    staged.flush()?;
    signer.sign(staged.path(), secret_key, trusted_comment)
}

/// Extract the clean file and signature from `input` and check them with `signer`.
pub fn verify_file(signer: &dyn Signer, config: &Config, input: &Path, public_key: &Path) -> Result<Verification, SignError> {
    config.validate()?;
    let extraction = match container::extract(input, &config.container_options()) {
        Ok(x) => x,
        Err(e) => {
            log::warn!(target: AUDIT_TARGET, "verify input={} error={e}", input.display());
            return Err(e);
        }
    };

    let mut blob_file = tempfile::Builder::new().prefix("csvsig-").suffix(".minisig").tempfile()?;
    extraction.blob(&config.trusted_comment).write_to(&mut blob_file)?;
    blob_file.flush()?;

    let verdict = signer.verify(extraction.clean.path(), blob_file.path(), public_key)?;
    match &verdict {
        Verification::Valid => log::info!(target: AUDIT_TARGET, "verify input={} result=valid", input.display()),
        Verification::Invalid { reason } => {
            log::warn!(target: AUDIT_TARGET, "verify input={} result=invalid reason={reason}", input.display());
        }
    }
    Ok(verdict)
}

/// Write the clean file and the signature blob of `input` to the given paths, for use with
/// an external verifier.
pub fn extract_to(config: &Config, input: &Path, clean_out: &Path, sig_out: &Path) -> Result<SignaturePair, SignError> {
    config.validate()?;
    let extraction = container::extract(input, &config.container_options())?;
    let blob = extraction.blob(&config.trusted_comment);
    std::fs::write(sig_out, blob.to_bytes())?;
    extraction.persist_clean(clean_out)
}
