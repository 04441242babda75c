use crate::commands::{CmdMessage, CmdResult, StockPaths};
use crate::config::StockroomConfig;
use crate::error::Result;

#[derive(Debug, Clone)]
pub enum ConfigAction {
    ShowAll,
    ShowKey(String),
    Set(String, String),
}

pub fn run(paths: &StockPaths, action: ConfigAction) -> Result<CmdResult> {
    let dir = paths.data_dir();
    match action {
        ConfigAction::ShowAll => {
            let config = StockroomConfig::load(dir)?;
            Ok(CmdResult::default().with_config(config))
        }
        ConfigAction::ShowKey(key) => {
            let config = StockroomConfig::load(dir)?;
            let mut result = CmdResult::default();
            match config.get(&key) {
                Some(val) => result.add_message(CmdMessage::info(val)),
                None => {
                    result.add_message(CmdMessage::error(format!("Unknown config key: {key}")))
                }
            }
            Ok(result)
        }
        ConfigAction::Set(key, value) => {
            let mut config = StockroomConfig::load(dir)?;
            if let Err(e) = config.set(&key, &value) {
                let mut result = CmdResult::default();
                result.add_message(CmdMessage::error(e.to_string()));
                return Ok(result);
            }
            config.save(dir)?;
            let display_val = config.get(&key).unwrap_or(value);
            let mut result = CmdResult::default().with_config(config);
            result.add_message(CmdMessage::success(format!("{key} set to {display_val}")));
            Ok(result)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_persists_and_show_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let paths = StockPaths::new(dir.path());

        let set = run(
            &paths,
            ConfigAction::Set("fallback-category".into(), "misc".into()),
        )
        .unwrap();
        assert!(!set.has_errors());

        let shown = run(&paths, ConfigAction::ShowKey("fallback-category".into())).unwrap();
        assert_eq!(shown.messages[0].content, "misc");

        let all = run(&paths, ConfigAction::ShowAll).unwrap();
        assert_eq!(all.config.unwrap().fallback_category, "misc");
    }

    #[test]
    fn unknown_key_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let paths = StockPaths::new(dir.path());

        assert!(run(&paths, ConfigAction::ShowKey("nope".into()))
            .unwrap()
            .has_errors());
        assert!(run(&paths, ConfigAction::Set("nope".into(), "1".into()))
            .unwrap()
            .has_errors());
    }
}
