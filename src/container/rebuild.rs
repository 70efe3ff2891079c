//! Extraction: split a signed container back into the clean file and its signature.

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use tempfile::NamedTempFile;

use super::ContainerOptions;
use super::harvest::SignatureHarvester;
use super::scan::HeaderScanner;
use super::signature::{SignatureBlob, SignaturePair};
use crate::errors::SignError;

/// Copies the boundary line and everything after it, unchanged.
pub struct PayloadRebuilder {
    chunk_size: usize,
}

impl PayloadRebuilder {
    #[must_use]
    pub fn new(chunk_size: usize) -> Self {
        Self { chunk_size }
    }

    /// Returns the number of bytes written, boundary line included.
    pub fn rebuild<R: BufRead, W: Write>(&self, scanner: &mut HeaderScanner<R>, out: &mut W) -> io::Result<u64> {
        let mut written = 0u64;
        if let Some(boundary) = scanner.take_boundary() {
            out.write_all(&boundary)?;
            written += boundary.len() as u64;
        }
        written += scanner.stream_payload(out, self.chunk_size)?;
        Ok(written)
    }
}

/// Read a container from `reader`, writing the clean file to `clean` and returning the
/// harvested signature.
///
/// # Errors
/// `NotSigned` when either signature line is missing or malformed; I/O errors from either
/// side. On error the writer holds a partial header and should be discarded.
pub fn extract_stream<R: BufRead, W: Write>(
    reader: R,
    mut clean: W,
    opts: &ContainerOptions,
) -> Result<SignaturePair, SignError> {
    let mut scanner = HeaderScanner::new(reader);
    let mut harvester = SignatureHarvester::default();

    // Line 1 is only a signature line when an empty file was signed.
    let first = scanner.first_line()?;
    if !harvester.offer(&first)? {
        clean.write_all(&first)?;
    }
    while let Some(line) = scanner.next_header()? {
        if !harvester.offer(&line)? {
            clean.write_all(&line)?;
        }
    }
    let signature = harvester.finish()?;

    let payload = PayloadRebuilder::new(opts.chunk_size).rebuild(&mut scanner, &mut clean)?;
    clean.flush()?;
    log::debug!("extracted signature: payload_bytes={payload}");
    Ok(signature)
}

/// Result of [`extract`]: the clean file in a temporary location plus the signature.
/// The temporary file is removed when this value is dropped.
#[derive(Debug)]
pub struct Extraction {
    pub clean: NamedTempFile,
    pub signature: SignaturePair,
}

impl Extraction {
    /// Detached blob for the verifier, bound to `trusted_comment`.
    #[must_use]
    pub fn blob(&self, trusted_comment: &str) -> SignatureBlob {
        SignatureBlob::new(self.signature.clone(), trusted_comment)
    }

    /// Move the clean file to `path`.
    ///
    /// # Errors
    /// Returns the I/O error when the temporary file cannot be persisted.
    pub fn persist_clean<P: AsRef<Path>>(self, path: P) -> Result<SignaturePair, SignError> {
        crate::fsutil::persist(self.clean, path.as_ref())?;
        Ok(self.signature)
    }
}

/// Extract the clean file and signature from the container at `input`.
///
/// # Errors
/// As [`extract_stream`], plus failures creating the temporary clean file.
pub fn extract<P: AsRef<Path>>(input: P, opts: &ContainerOptions) -> Result<Extraction, SignError> {
    let input = input.as_ref();
    log::info!("extract: input={}", input.display());
    let reader = BufReader::new(File::open(input)?);
    let mut clean = tempfile::Builder::new().prefix("csvsig-clean-").tempfile()?;
    let signature = {
        let mut writer = BufWriter::new(clean.as_file_mut());
        let signature = extract_stream(reader, &mut writer, opts)?;
        writer.into_inner().map_err(io::IntoInnerError::into_error)?;
        signature
    };
    Ok(Extraction { clean, signature })
}
