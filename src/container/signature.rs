//! Signature pair carried by a signed container and the detached blob form handed to a verifier.

use std::io::{self, Write};

use crate::errors::SignError;

/// Prefix of the injected comment line holding the untrusted signature line.
pub const SIGNATURE1_PREFIX: &[u8] = b"##signature1=";
/// Prefix of the injected comment line holding the trusted (tag-bound) signature line.
pub const SIGNATURE2_PREFIX: &[u8] = b"##signature2=";

const UNTRUSTED_LABEL: &str = "untrusted comment:";
const TRUSTED_LABEL: &str = "trusted comment:";

/// True when `line` is one of the two injected signature comment lines.
#[must_use]
pub fn is_signature_line(line: &[u8]) -> bool {
    line.starts_with(SIGNATURE1_PREFIX) || line.starts_with(SIGNATURE2_PREFIX)
}

/// The two opaque lines produced by the external signer.
///
/// Both values are always present; construction rejects anything that could not
/// survive being written as a single comment line and trimmed on the way back.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignaturePair {
    signature1: Vec<u8>,
    signature2: Vec<u8>,
}

impl SignaturePair {
    /// Build a pair from the untrusted (`signature1`) and trusted (`signature2`) lines.
    ///
    /// # Errors
    /// Returns `MalformedSignature` if either value is empty, spans more than one line,
    /// or carries leading/trailing whitespace.
    pub fn new(signature1: impl Into<Vec<u8>>, signature2: impl Into<Vec<u8>>) -> Result<Self, SignError> {
        let signature1 = signature1.into();
        let signature2 = signature2.into();
        check_line("signature1", &signature1)?;
        check_line("signature2", &signature2)?;
        Ok(Self { signature1, signature2 })
    }

    #[must_use]
    pub fn signature1(&self) -> &[u8] {
        &self.signature1
    }

    #[must_use]
    pub fn signature2(&self) -> &[u8] {
        &self.signature2
    }
}

fn check_line(name: &str, value: &[u8]) -> Result<(), SignError> {
    if value.is_empty() {
        return Err(SignError::MalformedSignature(format!("{name} is empty")));
    }
    if value.iter().any(|b| *b == b'\n' || *b == b'\r') {
        return Err(SignError::MalformedSignature(format!("{name} contains a line break")));
    }
    if value.trim_ascii().len() != value.len() {
        return Err(SignError::MalformedSignature(format!("{name} has surrounding whitespace")));
    }
    Ok(())
}

/// Detached signature in the four-line minisign layout:
///
/// ```text
/// untrusted comment: <untrusted>
/// <signature1>
/// trusted comment: <trusted>
/// <signature2>
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignatureBlob {
    pub untrusted_comment: String,
    pub signature: SignaturePair,
    pub trusted_comment: String,
}

impl SignatureBlob {
    /// Blob with an empty untrusted comment, as synthesized on extraction.
    #[must_use]
    pub fn new(signature: SignaturePair, trusted_comment: &str) -> Self {
        Self { untrusted_comment: String::new(), signature, trusted_comment: trusted_comment.to_string() }
    }

    pub fn write_to<W: Write>(&self, mut w: W) -> io::Result<()> {
        writeln!(w, "{UNTRUSTED_LABEL} {}", self.untrusted_comment)?;
        w.write_all(self.signature.signature1())?;
        writeln!(w)?;
        writeln!(w, "{TRUSTED_LABEL} {}", self.trusted_comment)?;
        w.write_all(self.signature.signature2())?;
        writeln!(w)?;
        Ok(())
    }

    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::new();
        // Writing into a Vec cannot fail.
        let _ = self.write_to(&mut out);
        out
    }

    /// Parse a blob, tolerating `\r\n` line endings and trailing blank lines.
    ///
    /// # Errors
    /// Returns `MalformedSignature` when the four-line layout is not present.
    pub fn parse(bytes: &[u8]) -> Result<Self, SignError> {
        let mut lines = bytes
            .split(|b| *b == b'\n')
            .map(|l| l.strip_suffix(b"\r").unwrap_or(l))
            .filter(|l| !l.is_empty());
        let mut next = |what: &str| {
            lines
                .next()
                .ok_or_else(|| SignError::MalformedSignature(format!("signature blob is missing the {what} line")))
        };
        let untrusted = comment_value(next("untrusted comment")?, UNTRUSTED_LABEL)?;
        let signature1 = next("first signature")?.trim_ascii().to_vec();
        let trusted = comment_value(next("trusted comment")?, TRUSTED_LABEL)?;
        let signature2 = next("second signature")?.trim_ascii().to_vec();
        Ok(Self {
            untrusted_comment: untrusted,
            signature: SignaturePair::new(signature1, signature2)?,
            trusted_comment: trusted,
        })
    }
}

fn comment_value(line: &[u8], label: &str) -> Result<String, SignError> {
    let rest = line
        .strip_prefix(label.as_bytes())
        .ok_or_else(|| SignError::MalformedSignature(format!("expected a line starting with '{label}'")))?;
    let rest = rest.strip_prefix(b" ").unwrap_or(rest);
    Ok(String::from_utf8_lossy(rest).into_owned())
}
