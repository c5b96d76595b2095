use std::panic;

use anyhow::{Context, Result};
use log::LevelFilter;
use log4rs::append::file::FileAppender;
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;

const LOG_FILE: &str = "/tmp/fruit-snake.log";

/// Logs go to a file: stdout belongs to the game and the terminal is in raw
/// mode while it runs.
pub fn setup(debug: bool) -> Result<()> {
    panic::set_hook(Box::new(|info| {
        log::error!("{}", info);
    }));

    let appender = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new("{d(%H:%M:%S)} {l} {m}{n}")))
        .build(LOG_FILE)
        .context("opening log file")?;

    let level = if debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let config = Config::builder()
        .appender(Appender::builder().build("file", Box::new(appender)))
        .build(Root::builder().appender("file").build(level))
        .context("building log config")?;

    log4rs::init_config(config).context("installing logger")?;
    Ok(())
}
