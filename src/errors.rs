use thiserror::Error;

#[derive(Debug, Error)]
pub enum SignError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Missing argument: {0}")]
    MissingArgument(String),

    #[error("Does not look like a signed file: {0}")]
    NotSigned(String),

    #[error("File is already signed: {0}")]
    AlreadySigned(String),

    #[error("Malformed signature: {0}")]
    MalformedSignature(String),

    #[error("Signer failure: {0}")]
    SignerFailure(String),

    #[error("Signature verification failed: {0}")]
    InvalidSignature(String),

    #[error("Verifier failure: {0}")]
    VerifierFailure(String),

    #[error("Config error: {0}")]
    Config(String),
}

impl SignError {
    /// Process exit code used by the CLI for this error.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            SignError::NotSigned(_) => 2,
            SignError::InvalidSignature(_) => 3,
            _ => 1,
        }
    }
}
