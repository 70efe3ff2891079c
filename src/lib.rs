//! Embed a detached minisign signature inside the comment header of a CSV-like text file,
//! and take it back out again for verification.

pub mod api;
pub mod cli;
pub mod config;
pub mod container;
pub mod errors;
pub mod fsutil;
pub mod logger;
pub mod signer;

pub use config::Config;
pub use container::{ContainerOptions, SignatureBlob, SignaturePair};
pub use errors::SignError;
pub use signer::{MemorySigner, MinisignSigner, Signer, Verification};
