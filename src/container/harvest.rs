use super::signature::{SIGNATURE1_PREFIX, SIGNATURE2_PREFIX, SignaturePair};
use crate::errors::SignError;

/// Collects the two signature lines from a container header.
#[derive(Debug, Default)]
pub struct SignatureHarvester {
    signature1: Option<Vec<u8>>,
    signature2: Option<Vec<u8>>,
}

impl SignatureHarvester {
    /// Take `line` if it is a signature line. Returns `false` for any other line, which
    /// the caller copies into the clean output.
    ///
    /// # Errors
    /// `NotSigned` when the same signature line appears twice.
    pub fn offer(&mut self, line: &[u8]) -> Result<bool, SignError> {
        let (slot, name, value) = if let Some(v) = line.strip_prefix(SIGNATURE1_PREFIX) {
            (&mut self.signature1, "signature1", v)
        } else if let Some(v) = line.strip_prefix(SIGNATURE2_PREFIX) {
            (&mut self.signature2, "signature2", v)
        } else {
            return Ok(false);
        };
        if slot.is_some() {
            return Err(SignError::NotSigned(format!("duplicate ##{name} line")));
        }
        *slot = Some(value.trim_ascii().to_vec());
        Ok(true)
    }

    /// # Errors
    /// `NotSigned` unless both lines were seen with non-empty values.
    pub fn finish(self) -> Result<SignaturePair, SignError> {
        match (self.signature1, self.signature2) {
            (Some(s1), Some(s2)) => SignaturePair::new(s1, s2).map_err(|e| SignError::NotSigned(e.to_string())),
            (None, None) => Err(SignError::NotSigned("no signature lines found".into())),
            (None, Some(_)) => Err(SignError::NotSigned("missing ##signature1 line".into())),
            (Some(_), None) => Err(SignError::NotSigned("missing ##signature2 line".into())),
        }
    }
}
