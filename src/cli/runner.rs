use serde::Serialize;

use super::command::Command;
use super::util::require_path;
use crate::api;
use crate::config::Config;
use crate::errors::SignError;
use crate::signer::{Signer, Verification};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum OutputMode {
    Human,
    Plain,
    Json,
}

#[derive(Serialize)]
struct VerifyReport<'a> {
    input: String,
    #[serde(flatten)]
    verdict: &'a Verification,
}

pub fn run(signer: &dyn Signer, config: &Config, cmd: Command) -> Result<(), Box<dyn std::error::Error>> {
    run_with_format(signer, config, cmd, OutputMode::Human)
}

/// Execute `cmd`, printing the outcome in `mode`.
///
/// An `Invalid` verdict is returned as [`SignError::InvalidSignature`] after it has been
/// printed, so callers can map it to a distinct exit status.
pub fn run_with_format(
    signer: &dyn Signer,
    config: &Config,
    cmd: Command,
    mode: OutputMode,
) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        Command::Init { public_key, secret_key, force } => {
            let pk = require_path(public_key, config.public_key.as_deref(), "public_key")?;
            let sk = require_path(secret_key, config.secret_key.as_deref(), "secret_key")?;
            api::init_keys(signer, &pk, &sk, force)?;
            match mode {
                OutputMode::Json => {
                    let json = serde_json::json!({"action":"init","public_key": pk.display().to_string(),"secret_key": sk.display().to_string()});
                    println!("{json}");
                }
                OutputMode::Plain => println!("{} {}", pk.display(), sk.display()),
                OutputMode::Human => println!("keys written public_key={} secret_key={}", pk.display(), sk.display()),
            }
            Ok(())
        }
        Command::Sign { input, output, secret_key } => {
            let input = require_path(input, None, "input")?;
            let output = require_path(output, None, "output")?;
            let sk = require_path(secret_key, config.secret_key.as_deref(), "secret_key")?;
            let report = api::sign_file(signer, config, &input, &output, &sk)?;
            match mode {
                OutputMode::Json => println!("{}", serde_json::to_string(&report)?),
                OutputMode::Plain => println!("signed {}", report.output),
                OutputMode::Human => println!(
                    "signed {} -> {} header_lines={} payload_bytes={}",
                    report.input, report.output, report.embed.header_lines, report.embed.payload_bytes
                ),
            }
            Ok(())
        }
        Command::Verify { input, public_key } => {
            let input = require_path(input, None, "input")?;
            let pk = require_path(public_key, config.public_key.as_deref(), "public_key")?;
            let verdict = api::verify_file(signer, config, &input, &pk)?;
            match mode {
                OutputMode::Json => {
                    let report = VerifyReport { input: input.display().to_string(), verdict: &verdict };
                    println!("{}", serde_json::to_string(&report)?);
                }
                OutputMode::Plain => println!("{}", if verdict.is_valid() { "valid" } else { "invalid" }),
                OutputMode::Human => match &verdict {
                    Verification::Valid => println!("signature valid: {}", input.display()),
                    Verification::Invalid { reason } => println!("signature INVALID: {} ({reason})", input.display()),
                },
            }
            match verdict {
                Verification::Valid => Ok(()),
                Verification::Invalid { reason } => Err(SignError::InvalidSignature(reason).into()),
            }
        }
        Command::Extract { input, clean_out, sig_out } => {
            let input = require_path(input, None, "input")?;
            let clean_out = require_path(clean_out, None, "clean_out")?;
            let sig_out = require_path(sig_out, None, "sig_out")?;
            api::extract_to(config, &input, &clean_out, &sig_out)?;
            match mode {
                OutputMode::Json => {
                    let json = serde_json::json!({"action":"extract","clean": clean_out.display().to_string(),"signature": sig_out.display().to_string()});
                    println!("{json}");
                }
                OutputMode::Plain => println!("{} {}", clean_out.display(), sig_out.display()),
                OutputMode::Human => println!("extracted clean={} signature={}", clean_out.display(), sig_out.display()),
            }
            Ok(())
        }
    }
}
