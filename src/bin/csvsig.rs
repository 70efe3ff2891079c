use std::path::PathBuf;

use clap::{Parser, Subcommand};
use csvsig::cli as prog_cli;
use csvsig::config::Config;
use csvsig::errors::SignError;
use csvsig::logger;
use csvsig::signer::MinisignSigner;

#[derive(Parser, Debug)]
#[command(name = "csvsig", version, about = "Embed and verify minisign signatures inside comment-headed CSV files", long_about = None)]
struct Cli {
    #[arg(long, global = true, help = "Path to a config file (TOML). If omitted, csvsig.toml is looked up.")]
    config: Option<PathBuf>,
    #[arg(long, global = true, help = "Output format: human|plain|json")]
    format: Option<String>,
    #[arg(long, global = true, help = "minisign executable to run")]
    minisign: Option<PathBuf>,
    #[arg(long, global = true, help = "Trusted comment bound into the signature; must match on sign and verify")]
    trusted_comment: Option<String>,
    #[arg(long, global = true, help = "Write app.log and audit.log to this directory")]
    log_dir: Option<PathBuf>,
    #[arg(long, global = true, help = "Log level: off|error|warn|info|debug|trace")]
    log_level: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(about = "Generate a minisign key pair")]
    Init {
        #[arg(long, help = "Public key file to write")]
        public_key: Option<PathBuf>,
        #[arg(long, help = "Secret key file to write")]
        secret_key: Option<PathBuf>,
        #[arg(long, help = "Overwrite existing key files")]
        force: bool,
        #[arg(long, help = "Do not protect the secret key with a password")]
        no_password: bool,
    },
    #[command(about = "Sign INPUT and write the signed file to OUTPUT (may be the same path)")]
    Sign {
        #[arg(long, help = "Secret key file")]
        secret_key: Option<PathBuf>,
        input: Option<PathBuf>,
        output: Option<PathBuf>,
    },
    #[command(about = "Verify the signature embedded in INPUT")]
    Verify {
        #[arg(long, help = "Public key file")]
        public_key: Option<PathBuf>,
        input: Option<PathBuf>,
    },
    #[command(about = "Split a signed file into the clean file and a detached .minisig")]
    Extract {
        input: Option<PathBuf>,
        clean_out: Option<PathBuf>,
        sig_out: Option<PathBuf>,
    },
}

fn apply_overrides(cfg: &mut Config, cli: &Cli) {
    if let Some(m) = &cli.minisign { cfg.minisign = m.clone(); }
    if let Some(t) = &cli.trusted_comment { cfg.trusted_comment = t.clone(); }
    if let Some(d) = &cli.log_dir { cfg.log_dir = Some(d.clone()); }
    if let Some(l) = &cli.log_level { cfg.log_level = Some(l.clone()); }
}

fn init_logging(cfg: &Config) {
    let res = if let Some(path) = &cfg.log_config {
        logger::init_path(path)
    } else if let Some(dir) = &cfg.log_dir {
        logger::configure_logging(Some(dir.as_path()), cfg.log_level.as_deref(), None)
    } else {
        logger::configure_from_env().map(|_| ())
    };
    if let Err(e) = res {
        eprintln!("warning: logging disabled: {e}");
    }
}

fn exit_code(err: &(dyn std::error::Error + 'static)) -> i32 {
    err.downcast_ref::<SignError>().map_or(1, SignError::exit_code)
}

fn main() {
    let cli = Cli::parse();
    let mut cfg = match Config::load(cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(e.exit_code());
        }
    };
    apply_overrides(&mut cfg, &cli);
    init_logging(&cfg);

    let mode = prog_cli::parse_output_mode(cli.format.as_deref());
    let mut passwordless = false;
    let cmd = match cli.command {
        Commands::Init { public_key, secret_key, force, no_password } => {
            passwordless = no_password;
            prog_cli::Command::Init { public_key, secret_key, force }
        }
        Commands::Sign { secret_key, input, output } => prog_cli::Command::Sign { input, output, secret_key },
        Commands::Verify { public_key, input } => prog_cli::Command::Verify { input, public_key },
        Commands::Extract { input, clean_out, sig_out } => prog_cli::Command::Extract { input, clean_out, sig_out },
    };
    let signer = MinisignSigner::from_config(&cfg).passwordless(passwordless);

    if let Err(e) = prog_cli::run_with_format(&signer, &cfg, cmd, mode) {
        eprintln!("error: {e}");
        std::process::exit(exit_code(e.as_ref()));
    }
}
