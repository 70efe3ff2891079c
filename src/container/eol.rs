use serde::Serialize;

/// Terminator used for every line the container injects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LineEnding {
    #[default]
    Lf,
    CrLf,
}

impl LineEnding {
    /// Infer the terminator from the trailing bytes of the first line.
    ///
    /// `\r\n` selects CRLF, as does a bare trailing `\r` (classic Mac files). Anything else,
    /// including an unterminated line or an empty input, falls back to LF.
    #[must_use]
    pub fn detect(first_line: &[u8]) -> Self {
        if first_line.ends_with(b"\r\n") || first_line.ends_with(b"\r") {
            LineEnding::CrLf
        } else {
            LineEnding::Lf
        }
    }

    #[must_use]
    pub fn as_bytes(self) -> &'static [u8] {
        match self {
            LineEnding::Lf => b"\n",
            LineEnding::CrLf => b"\r\n",
        }
    }
}
