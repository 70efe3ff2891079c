//! Header scan shared by embedding and extraction.
//!
//! Line 1 is always passed through. The scan then walks `#` comment lines until the
//! boundary: the first line that is not a comment, or the first `# rsid` marker line.
//! Everything from the boundary on is payload and is copied in raw chunks.
//!
//! `Init -> ScanningHeader -> AtBoundary -> StreamingPayload -> Done`; the scan never
//! re-enters `ScanningHeader`. Input that ends inside the header goes straight to `Done`.

use std::io::{self, BufRead, Write};

use super::eol::LineEnding;

pub const COMMENT_MARKER: u8 = b'#';
/// Reserved domain marker; a comment line starting with it is payload, never header.
pub const BOUNDARY_MARKER: &[u8] = b"# rsid";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    Init,
    ScanningHeader,
    AtBoundary,
    StreamingPayload,
    Done,
}

/// True for a comment line that belongs to the header block.
#[must_use]
pub fn is_header_line(line: &[u8]) -> bool {
    line.first() == Some(&COMMENT_MARKER) && !line.starts_with(BOUNDARY_MARKER)
}

pub struct HeaderScanner<R> {
    reader: R,
    state: ScanState,
    eol: LineEnding,
    boundary: Option<Vec<u8>>,
}

impl<R: BufRead> HeaderScanner<R> {
    pub fn new(reader: R) -> Self {
        Self { reader, state: ScanState::Init, eol: LineEnding::Lf, boundary: None }
    }

    #[must_use]
    pub fn state(&self) -> ScanState {
        self.state
    }

    /// Line ending detected from line 1; LF until `first_line` has run.
    #[must_use]
    pub fn line_ending(&self) -> LineEnding {
        self.eol
    }

    /// Read line 1 (with its terminator, if any) and detect the line ending from it.
    /// Returns an empty line for empty input.
    pub fn first_line(&mut self) -> io::Result<Vec<u8>> {
        debug_assert_eq!(self.state, ScanState::Init);
        let mut line = Vec::new();
        self.reader.read_until(b'\n', &mut line)?;
        self.eol = LineEnding::detect(&line);
        self.transition(ScanState::ScanningHeader);
        Ok(line)
    }

    /// Next header comment line, or `None` once the boundary or end of input is reached.
    pub fn next_header(&mut self) -> io::Result<Option<Vec<u8>>> {
        if self.state != ScanState::ScanningHeader {
            return Ok(None);
        }
        let mut line = Vec::new();
        if self.reader.read_until(b'\n', &mut line)? == 0 {
            self.transition(ScanState::Done);
            return Ok(None);
        }
        if is_header_line(&line) {
            return Ok(Some(line));
        }
        self.boundary = Some(line);
        self.transition(ScanState::AtBoundary);
        Ok(None)
    }

    /// Hand over the boundary line. The scan moves on to the payload even when
    /// the header ran to end of input and there is no boundary.
    pub fn take_boundary(&mut self) -> Option<Vec<u8>> {
        if self.state == ScanState::AtBoundary {
            self.transition(ScanState::StreamingPayload);
        }
        self.boundary.take()
    }

    /// Copy the rest of the input to `out` in `chunk_size` pieces; returns bytes copied.
    pub fn stream_payload<W: Write>(&mut self, out: &mut W, chunk_size: usize) -> io::Result<u64> {
        if self.state != ScanState::StreamingPayload {
            self.transition(ScanState::Done);
            return Ok(0);
        }
        let mut buf = vec![0u8; chunk_size.max(1)];
        let mut copied = 0u64;
        loop {
            let n = match self.reader.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            out.write_all(&buf[..n])?;
            copied += n as u64;
        }
        self.transition(ScanState::Done);
        Ok(copied)
    }

    fn transition(&mut self, next: ScanState) {
        log::trace!("header scan: {:?} -> {:?}", self.state, next);
        self.state = next;
    }
}
