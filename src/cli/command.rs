use std::path::PathBuf;

/// Subcommands understood by [`super::run_with_format`]. Unset key paths fall back to the
/// configured `public_key` / `secret_key`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Init {
        public_key: Option<PathBuf>,
        secret_key: Option<PathBuf>,
        force: bool,
    },
    Sign {
        input: Option<PathBuf>,
        output: Option<PathBuf>,
        secret_key: Option<PathBuf>,
    },
    Verify {
        input: Option<PathBuf>,
        public_key: Option<PathBuf>,
    },
    // Writes the clean file and detached signature for an external verifier.
    Extract {
        input: Option<PathBuf>,
        clean_out: Option<PathBuf>,
        sig_out: Option<PathBuf>,
    },
}
