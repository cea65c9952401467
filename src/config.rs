// src/config.rs

//! Configuration loading utilities.
//!
//! Credentials come from the environment; everything else comes from an
//! optional TOML file whose path may itself be set in the environment.

use std::env;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{AppError, Result};
use crate::models::Config;
use crate::services::notifier::parse_recipient;

pub const PRACTICUM_TOKEN: &str = "PRACTICUM_TOKEN";
pub const TELEGRAM_TOKEN: &str = "TELEGRAM_TOKEN";
pub const TELEGRAM_CHAT_ID: &str = "TELEGRAM_CHAT_ID";
pub const CONFIG_PATH_VAR: &str = "HOMEWORK_BOT_CONFIG";

const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Secrets required before polling may start.
#[derive(Clone)]
pub struct Credentials {
    pub practicum_token: String,
    pub telegram_token: String,
    pub telegram_chat_id: String,
}

impl Credentials {
    /// Read credentials through `lookup`; absent and blank values both count as missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut missing = Vec::new();
        let mut fetch = |name: &'static str| match lookup(name) {
            Some(value) if !value.trim().is_empty() => value.trim().to_string(),
            _ => {
                missing.push(name);
                String::new()
            }
        };

        let credentials = Self {
            practicum_token: fetch(PRACTICUM_TOKEN),
            telegram_token: fetch(TELEGRAM_TOKEN),
            telegram_chat_id: fetch(TELEGRAM_CHAT_ID),
        };

        if missing.is_empty() {
            Ok(credentials)
        } else {
            Err(AppError::MissingCredentials(missing))
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("practicum_token", &"<redacted>")
            .field("telegram_token", &"<redacted>")
            .field("telegram_chat_id", &self.telegram_chat_id)
            .finish()
    }
}

/// Path of the TOML config file.
pub fn config_path() -> PathBuf {
    env::var(CONFIG_PATH_VAR)
        .ok()
        .filter(|p| !p.trim().is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}

/// Everything that must hold before the first poll.
///
/// Loads and validates the config at `path` (defaults when the file is
/// absent), reads credentials through `lookup` and checks that the chat id
/// names a reachable recipient. Any error here means the bot must not start.
pub fn startup<F>(path: &Path, lookup: F) -> Result<(Config, Credentials)>
where
    F: Fn(&str) -> Option<String>,
{
    let config = Config::load_or_default(path)
        .map_err(|e| AppError::config(format!("Cannot load {}: {e}", path.display())))?;
    config
        .validate()
        .map_err(|e| AppError::config(format!("Invalid configuration: {e}")))?;

    let credentials = Credentials::from_lookup(lookup)?;
    parse_recipient(&credentials.telegram_chat_id)?;

    Ok((config, credentials))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::io::Write;

    use tempfile::{NamedTempFile, TempDir};

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn all_credentials_present() {
        let creds = Credentials::from_lookup(lookup_from(&[
            (PRACTICUM_TOKEN, "y0_practicum"),
            (TELEGRAM_TOKEN, "123:abc"),
            (TELEGRAM_CHAT_ID, " 42 "),
        ]))
        .unwrap();

        assert_eq!(creds.practicum_token, "y0_practicum");
        assert_eq!(creds.telegram_chat_id, "42");
    }

    #[test]
    fn missing_chat_id_is_fatal() {
        let err = Credentials::from_lookup(lookup_from(&[
            (PRACTICUM_TOKEN, "y0_practicum"),
            (TELEGRAM_TOKEN, "123:abc"),
        ]))
        .unwrap_err();

        match err {
            AppError::MissingCredentials(names) => assert_eq!(names, vec![TELEGRAM_CHAT_ID]),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn blank_values_count_as_missing() {
        let err = Credentials::from_lookup(lookup_from(&[
            (PRACTICUM_TOKEN, ""),
            (TELEGRAM_TOKEN, "   "),
            (TELEGRAM_CHAT_ID, "42"),
        ]))
        .unwrap_err();

        match err {
            AppError::MissingCredentials(names) => {
                assert_eq!(names, vec![PRACTICUM_TOKEN, TELEGRAM_TOKEN])
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn debug_output_hides_tokens() {
        let creds = Credentials {
            practicum_token: "secret-a".into(),
            telegram_token: "secret-b".into(),
            telegram_chat_id: "42".into(),
        };
        let rendered = format!("{creds:?}");
        assert!(!rendered.contains("secret"));
        assert!(rendered.contains("42"));
    }

    fn full_env() -> Vec<(&'static str, &'static str)> {
        vec![
            (PRACTICUM_TOKEN, "y0_practicum"),
            (TELEGRAM_TOKEN, "123:abc"),
            (TELEGRAM_CHAT_ID, "42"),
        ]
    }

    #[test]
    fn startup_without_config_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let (config, creds) =
            startup(&dir.path().join("config.toml"), lookup_from(&full_env())).unwrap();

        assert_eq!(
            config.polling.retry_period_secs,
            Config::default().polling.retry_period_secs
        );
        assert_eq!(creds.telegram_chat_id, "42");
    }

    #[test]
    fn startup_stops_on_missing_chat_id() {
        let dir = TempDir::new().unwrap();
        let err = startup(
            &dir.path().join("config.toml"),
            lookup_from(&[(PRACTICUM_TOKEN, "y0_practicum"), (TELEGRAM_TOKEN, "123:abc")]),
        )
        .unwrap_err();

        match err {
            AppError::MissingCredentials(names) => assert_eq!(names, vec![TELEGRAM_CHAT_ID]),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn startup_stops_on_malformed_chat_id() {
        let dir = TempDir::new().unwrap();
        let mut env = full_env();
        env[2] = (TELEGRAM_CHAT_ID, "someone");

        let err = startup(&dir.path().join("config.toml"), lookup_from(&env)).unwrap_err();
        assert!(matches!(err, AppError::Config(_)), "{err}");
    }

    #[test]
    fn startup_stops_on_broken_config_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[polling\nretry_period_secs = ").unwrap();

        let err = startup(file.path(), lookup_from(&full_env())).unwrap_err();
        assert!(matches!(err, AppError::Config(_)), "{err}");
    }

    #[test]
    fn startup_stops_on_invalid_config_values() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[api]\nendpoint = \"ftp://example.com/\"").unwrap();

        let err = startup(file.path(), lookup_from(&full_env())).unwrap_err();
        assert!(err.to_string().contains("Invalid configuration"), "{err}");
    }
}
