use crate::commands::{CmdMessage, CmdResult, StockPaths};
use crate::config::StockroomConfig;
use crate::error::Result;
use std::fs;

/// Create the data directory layout. Existing data and config are left alone.
pub fn run(paths: &StockPaths) -> Result<CmdResult> {
    fs::create_dir_all(paths.uploads_dir())?;
    let config = StockroomConfig::load(paths.data_dir())?;
    config.save(paths.data_dir())?;

    let mut result = CmdResult::default().with_config(config);
    result.add_message(CmdMessage::success(format!(
        "Initialized stockroom at {}",
        paths.data_dir().display()
    )));
    Ok(result)
}
