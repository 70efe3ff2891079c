//! Embedding: write a signed container from a plain input.

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use super::ContainerOptions;
use super::eol::LineEnding;
use super::scan::HeaderScanner;
use super::signature::{SIGNATURE1_PREFIX, SIGNATURE2_PREFIX, SignaturePair, is_signature_line};
use crate::errors::SignError;

/// Renders the two signature comment lines with the container's line ending.
pub struct SignatureInjector<'a> {
    signature: &'a SignaturePair,
    eol: LineEnding,
}

impl<'a> SignatureInjector<'a> {
    pub fn new(signature: &'a SignaturePair, eol: LineEnding) -> Self {
        Self { signature, eol }
    }

    pub fn write_to<W: Write>(&self, w: &mut W) -> io::Result<()> {
        w.write_all(SIGNATURE1_PREFIX)?;
        w.write_all(self.signature.signature1())?;
        w.write_all(self.eol.as_bytes())?;
        w.write_all(SIGNATURE2_PREFIX)?;
        w.write_all(self.signature.signature2())?;
        w.write_all(self.eol.as_bytes())?;
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct EmbedReport {
    pub line_ending: LineEnding,
    /// Header comment lines found after line 1.
    pub header_lines: usize,
    /// Bytes copied after the boundary line.
    pub payload_bytes: u64,
}

/// Embed `signature` into the container read from `reader`, writing the result to `writer`.
///
/// # Errors
/// `AlreadySigned` when line 1 or a header line already is a signature line; I/O errors
/// from either side. On error the writer holds a partial container and should be discarded.
pub fn embed_stream<R: BufRead, W: Write>(
    reader: R,
    mut writer: W,
    signature: &SignaturePair,
    opts: &ContainerOptions,
) -> Result<EmbedReport, SignError> {
    let mut scanner = HeaderScanner::new(reader);
    let first = scanner.first_line()?;
    if is_signature_line(&first) {
        return Err(SignError::AlreadySigned("line 1 is a signature line".into()));
    }
    writer.write_all(&first)?;
    let eol = scanner.line_ending();
    let mut terminated = first.is_empty() || first.ends_with(b"\n");

    let mut report = EmbedReport { line_ending: eol, ..EmbedReport::default() };
    while let Some(line) = scanner.next_header()? {
        if is_signature_line(&line) {
            return Err(SignError::AlreadySigned(format!("header line {} is a signature line", report.header_lines + 2)));
        }
        writer.write_all(&line)?;
        terminated = line.ends_with(b"\n");
        report.header_lines += 1;
    }
    if !terminated {
        writer.write_all(eol.as_bytes())?;
    }
    SignatureInjector::new(signature, eol).write_to(&mut writer)?;

    if let Some(boundary) = scanner.take_boundary() {
        writer.write_all(&boundary)?;
    }
    report.payload_bytes = scanner.stream_payload(&mut writer, opts.chunk_size)?;
    writer.flush()?;
    log::debug!(
        "embedded signature: eol={:?} header_lines={} payload_bytes={}",
        report.line_ending,
        report.header_lines,
        report.payload_bytes
    );
    Ok(report)
}

/// Embed `signature` into `input`, writing the signed container to `output`.
///
/// # Errors
/// Fails if the paths refer to the same file, on I/O errors, and as [`embed_stream`].
pub fn embed<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    output: Q,
    signature: &SignaturePair,
    opts: &ContainerOptions,
) -> Result<EmbedReport, SignError> {
    let (input, output) = (input.as_ref(), output.as_ref());
    if crate::fsutil::same_file(input, output) {
        return Err(SignError::Io(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("input and output are the same file: {}", input.display()),
        )));
    }
    let reader = BufReader::new(File::open(input)?);
    let writer = BufWriter::new(File::create(output)?);
    log::info!("embed: input={}, output={}", input.display(), output.display());
    embed_stream(reader, writer, signature, opts)
}

/// Line ending that embedding appends after the header, if any.
///
/// A header that runs to end of input without a final terminator gets the detected line
/// ending written before the signature lines, and extraction keeps it. Signers must sign
/// the input with that terminator added, or the rebuilt clean file will not verify.
///
/// # Errors
/// I/O errors from `reader`.
pub fn header_terminator<R: BufRead>(reader: R) -> io::Result<Option<LineEnding>> {
    let mut scanner = HeaderScanner::new(reader);
    let first = scanner.first_line()?;
    let mut terminated = first.is_empty() || first.ends_with(b"\n");
    while let Some(line) = scanner.next_header()? {
        terminated = line.ends_with(b"\n");
    }
    Ok((!terminated).then(|| scanner.line_ending()))
}
