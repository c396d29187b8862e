use std::path::Path;

use anyhow::{Context, Result};
use flexi_logger::{Duplicate, FileSpec, Logger, LoggerHandle, WriteMode};
use log::error;

pub fn init(logs_dir: &Path) -> Result<LoggerHandle> {
    let logger = Logger::try_with_str("warn,lightbot=debug,lightbot_responses=debug")
        .context("log config text")?
        .log_to_file(FileSpec::default().directory(logs_dir))
        .write_mode(WriteMode::BufferAndFlush)
        .duplicate_to_stderr(Duplicate::Warn) // stdout belongs to the conversation
        .start()
        .context("log init")?;

    let orig_hook = std::panic::take_hook();
    let logger_for_panic = logger.clone();
    std::panic::set_hook(Box::new(move |panic_info| {
        error!("Panic: {panic_info}");
        logger_for_panic.flush();
        orig_hook(panic_info);
        std::process::exit(1);
    }));
    Ok(logger)
}
