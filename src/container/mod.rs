//! Signed-container format for delimited text files.
//!
//! A signed file keeps line 1 and the leading `#` comment block intact and carries two extra
//! comment lines, `##signature1=` and `##signature2=`, right before the boundary line where
//! the payload starts. Extraction removes exactly those two lines, so the clean file is
//! byte-identical to what was signed.

pub mod eol;
pub mod harvest;
pub mod inject;
pub mod rebuild;
pub mod scan;
pub mod signature;

pub use eol::LineEnding;
pub use harvest::SignatureHarvester;
pub use inject::{EmbedReport, SignatureInjector, embed, embed_stream, header_terminator};
pub use rebuild::{Extraction, PayloadRebuilder, extract, extract_stream};
pub use scan::{BOUNDARY_MARKER, HeaderScanner, ScanState, is_header_line};
pub use signature::{SIGNATURE1_PREFIX, SIGNATURE2_PREFIX, SignatureBlob, SignaturePair, is_signature_line};

/// Read size used when streaming the payload.
pub const DEFAULT_CHUNK_SIZE: usize = 8192;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContainerOptions {
    /// Payload copy size; affects performance only.
    pub chunk_size: usize,
}

impl Default for ContainerOptions {
    fn default() -> Self {
        Self { chunk_size: DEFAULT_CHUNK_SIZE }
    }
}
