// Ambient pieces: errors, logger, config, fsutil.
#[path = "mod_errors.rs"]
mod errors_tests;
#[path = "mod_logger.rs"]
mod logger_tests;
#[path = "mod_config.rs"]
mod config_tests;
