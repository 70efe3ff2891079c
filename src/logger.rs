//! Logging setup on top of `log4rs`.
//!
//! Two rolling files are written to the chosen directory: `app.log` for everything and
//! `audit.log` for the sign/verify trail emitted on [`AUDIT_TARGET`].

use std::path::{Path, PathBuf};

use log::LevelFilter;
use log4rs::append::rolling_file::RollingFileAppender;
use log4rs::append::rolling_file::policy::compound::{
    CompoundPolicy, roll::fixed_window::FixedWindowRoller, trigger::size::SizeTrigger,
};
use log4rs::config::{Appender, Config, Logger, Root};
use log4rs::encode::pattern::PatternEncoder;

/// Target for sign/verify outcome records.
pub const AUDIT_TARGET: &str = "csvsig::audit";

const PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S%.3f)} [{l}] {t} - {m}{n}";
const ROLL_SIZE: u64 = 10 * 1024 * 1024;

/// Initializes logging from a specific log4rs config file.
///
/// # Errors
/// Returns an error if the file cannot be read or a logger is already installed.
pub fn init_path(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    log4rs::init_file(path, log4rs::config::Deserializers::default())?;
    Ok(())
}

#[must_use]
pub fn parse_level(level: &str) -> LevelFilter {
    match level.to_ascii_lowercase().as_str() {
        "off" => LevelFilter::Off,
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => LevelFilter::Info,
    }
}

fn rolling(base: &Path, name: &str, keep: u32) -> Result<RollingFileAppender, Box<dyn std::error::Error>> {
    let roller = FixedWindowRoller::builder().build(&format!("{}", base.join(format!("{name}.{{}}.log")).display()), keep)?;
    let policy = CompoundPolicy::new(Box::new(SizeTrigger::new(ROLL_SIZE)), Box::new(roller));
    let appender = RollingFileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(PATTERN)))
        .build(base.join(format!("{name}.log")), Box::new(policy))?;
    Ok(appender)
}

/// Configure process-wide logging.
/// - dir: base directory for logs; if None, current directory.
/// - level: off|error|warn|info|debug|trace
/// - retention: number of rolled files to keep (default 7)
///
/// The first successful configuration in a process wins; later calls still create the
/// files but leave the installed logger alone.
///
/// # Errors
/// Returns an error if the directory or the log files cannot be created.
pub fn configure_logging(
    dir: Option<&Path>,
    level: Option<&str>,
    retention: Option<usize>,
) -> Result<(), Box<dyn std::error::Error>> {
    let base = dir
        .map(PathBuf::from)
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));
    std::fs::create_dir_all(&base)?;
    let keep = u32::try_from(retention.unwrap_or(7)).unwrap_or(u32::MAX);
    let lvl = parse_level(level.unwrap_or("info"));

    let config = Config::builder()
        .appender(Appender::builder().build("app", Box::new(rolling(&base, "app", keep)?)))
        .appender(Appender::builder().build("audit", Box::new(rolling(&base, "audit", keep)?)))
        .logger(Logger::builder().appender("audit").additive(true).build(AUDIT_TARGET, lvl))
        .build(Root::builder().appender("app").build(lvl))?;
    let _ = log4rs::init_config(config);
    Ok(())
}

/// Configure logging from environment variables if `CSVSIG_LOG_DIR` is set:
/// - CSVSIG_LOG_DIR
/// - CSVSIG_LOG_LEVEL
/// - CSVSIG_LOG_RETENTION
///
/// Returns whether logging was configured.
///
/// # Errors
/// As [`configure_logging`].
pub fn configure_from_env() -> Result<bool, Box<dyn std::error::Error>> {
    let Some(dir) = std::env::var("CSVSIG_LOG_DIR").ok().map(PathBuf::from) else {
        return Ok(false);
    };
    let level = std::env::var("CSVSIG_LOG_LEVEL").ok();
    let retention = std::env::var("CSVSIG_LOG_RETENTION").ok().and_then(|s| s.parse::<usize>().ok());
    configure_logging(Some(&dir), level.as_deref(), retention)?;
    Ok(true)
}
