use crate::commands::{CmdMessage, CmdResult};
use crate::config::{ConfigKey, SalesdeskConfig};
use crate::error::Result;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigAction {
    ShowAll,
    ShowKey(ConfigKey),
    Set(ConfigKey, String),
}

pub fn run(data_dir: &Path, action: ConfigAction) -> Result<CmdResult> {
    let mut config = SalesdeskConfig::load(data_dir)?;
    let mut result = CmdResult::default();

    match action {
        ConfigAction::ShowAll => {
            return Ok(result.with_config(config));
        }
        ConfigAction::ShowKey(key) => {
            result.add_message(CmdMessage::info(format!(
                "{} = {}",
                key.name(),
                display_value(&config, key)
            )));
        }
        ConfigAction::Set(key, value) => {
            config.set(key, &value)?;
            config.save(data_dir)?;
            result.add_message(CmdMessage::success(format!(
                "{} set to {}",
                key.name(),
                display_value(&config, key)
            )));
        }
    }

    Ok(result.with_config(config))
}

/// Config value as it may be shown on screen; the password is masked.
pub fn display_value(config: &SalesdeskConfig, key: ConfigKey) -> String {
    match key {
        ConfigKey::Password => "*".repeat(config.password.chars().count()),
        other => config.get(other).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn set_persists_value() {
        let dir = TempDir::new().unwrap();
        run(dir.path(), ConfigAction::Set(ConfigKey::Currency, "$".into())).unwrap();

        let result = run(dir.path(), ConfigAction::ShowKey(ConfigKey::Currency)).unwrap();
        assert_eq!(result.messages[0].content, "currency = $");
    }

    #[test]
    fn password_is_masked() {
        let dir = TempDir::new().unwrap();
        let result = run(dir.path(), ConfigAction::Set(ConfigKey::Password, "hunter2".into())).unwrap();
        assert_eq!(result.messages[0].content, "password set to *******");
        assert_eq!(result.config.unwrap().password, "hunter2");
    }

    #[test]
    fn show_all_returns_config() {
        let dir = TempDir::new().unwrap();
        let result = run(dir.path(), ConfigAction::ShowAll).unwrap();
        assert_eq!(result.config, Some(SalesdeskConfig::default()));
    }
}
