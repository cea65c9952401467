//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{AppError, FailureKind, Result};
use crate::models::VerdictTable;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Review API client settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Loop timing and cursor behavior
    #[serde(default)]
    pub polling: PollingConfig,

    /// Log output settings
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Chat message templates
    #[serde(default)]
    pub messages: Messages,

    /// Human-readable verdict texts
    #[serde(default)]
    pub verdicts: VerdictTable,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration, or defaults when the file does not exist.
    ///
    /// A file that exists but cannot be read or parsed is an error.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            log::info!("No config file at {}. Using defaults.", path.display());
            return Ok(Self::default());
        }
        Self::load(path)
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        let endpoint = Url::parse(&self.api.endpoint)?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(AppError::validation(format!(
                "api.endpoint must be http(s), got '{}'",
                endpoint.scheme()
            )));
        }
        if self.api.timeout_secs == 0 {
            return Err(AppError::validation("api.timeout_secs must be > 0"));
        }
        if self.api.user_agent.trim().is_empty() {
            return Err(AppError::validation("api.user_agent is empty"));
        }
        if self.polling.retry_period_secs == 0 {
            return Err(AppError::validation(
                "polling.retry_period_secs must be > 0",
            ));
        }
        if self.polling.lookback_secs < 0 {
            return Err(AppError::validation("polling.lookback_secs must be >= 0"));
        }
        for placeholder in ["{name}", "{verdict}"] {
            if !self.messages.status_changed.contains(placeholder) {
                return Err(AppError::validation(format!(
                    "messages.status_changed must contain {placeholder}"
                )));
            }
        }
        self.verdicts.validate()
    }
}

/// Review API client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Homework status endpoint
    #[serde(default = "defaults::endpoint")]
    pub endpoint: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: defaults::endpoint(),
            timeout_secs: defaults::timeout(),
            user_agent: defaults::user_agent(),
        }
    }
}

/// How the `from_date` cursor moves between polls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CursorPolicy {
    /// `now - lookback` on every poll
    #[default]
    Rolling,
    /// `start - lookback`, never moved
    Fixed,
    /// Follows the `current_date` returned by the API
    Incremental,
}

/// Loop timing and cursor settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollingConfig {
    /// Sleep between iterations in seconds
    #[serde(default = "defaults::retry_period")]
    pub retry_period_secs: u64,

    /// Width of the window each poll re-covers, in seconds
    #[serde(default = "defaults::lookback")]
    pub lookback_secs: i64,

    #[serde(default)]
    pub cursor: CursorPolicy,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            retry_period_secs: defaults::retry_period(),
            lookback_secs: defaults::lookback(),
            cursor: CursorPolicy::default(),
        }
    }
}

/// Log output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Minimum level: debug, info, warn or error
    #[serde(default = "defaults::log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::log_level(),
        }
    }
}

/// Chat message strings.
///
/// `status_changed` supports the `{name}` and `{verdict}` placeholders.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Messages {
    #[serde(default = "defaults::msg_status_changed")]
    pub status_changed: String,
    #[serde(default = "defaults::msg_server_connection")]
    pub server_connection: String,
    #[serde(default = "defaults::msg_transport")]
    pub transport: String,
    #[serde(default = "defaults::msg_malformed_response")]
    pub malformed_response: String,
    #[serde(default = "defaults::msg_parse_status")]
    pub parse_status: String,
    #[serde(default = "defaults::msg_unexpected")]
    pub unexpected: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            status_changed: defaults::msg_status_changed(),
            server_connection: defaults::msg_server_connection(),
            transport: defaults::msg_transport(),
            malformed_response: defaults::msg_malformed_response(),
            parse_status: defaults::msg_parse_status(),
            unexpected: defaults::msg_unexpected(),
        }
    }
}

impl Messages {
    /// Render the status-change notification.
    ///
    /// Placeholders are expanded in a single pass over the template, so a
    /// substituted value is never expanded again.
    pub fn format_status(&self, name: &str, verdict: &str) -> String {
        let mut out =
            String::with_capacity(self.status_changed.len() + name.len() + verdict.len());
        let mut rest = self.status_changed.as_str();

        while let Some(start) = rest.find('{') {
            out.push_str(&rest[..start]);
            let tail = &rest[start..];
            if let Some(after) = tail.strip_prefix("{name}") {
                out.push_str(name);
                rest = after;
            } else if let Some(after) = tail.strip_prefix("{verdict}") {
                out.push_str(verdict);
                rest = after;
            } else {
                out.push('{');
                rest = &tail[1..];
            }
        }
        out.push_str(rest);
        out
    }

    /// Text reported to the chat when an iteration fails.
    pub fn for_failure(&self, kind: FailureKind) -> &str {
        match kind {
            FailureKind::ServerConnection => &self.server_connection,
            FailureKind::Transport => &self.transport,
            FailureKind::MalformedResponse => &self.malformed_response,
            FailureKind::ParseStatus => &self.parse_status,
            FailureKind::Unexpected => &self.unexpected,
        }
    }
}

mod defaults {
    // API defaults
    pub fn endpoint() -> String {
        "https://practicum.yandex.ru/api/user_api/homework_statuses/".into()
    }
    pub fn timeout() -> u64 {
        30
    }
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; homework-notifier/0.1)".into()
    }

    // Polling defaults
    pub fn retry_period() -> u64 {
        600
    }
    pub fn lookback() -> i64 {
        9 * 24 * 60 * 60
    }

    pub fn log_level() -> String {
        "info".into()
    }

    // Message defaults
    pub fn msg_status_changed() -> String {
        "Review status changed for \"{name}\"\n{verdict}".into()
    }
    pub fn msg_server_connection() -> String {
        "Connection error: the review API did not answer successfully.".into()
    }
    pub fn msg_transport() -> String {
        "Request error: the review API could not be reached.".into()
    }
    pub fn msg_malformed_response() -> String {
        "The review API returned an unexpected response.".into()
    }
    pub fn msg_parse_status() -> String {
        "Sorry, a homework status could not be decoded.".into()
    }
    pub fn msg_unexpected() -> String {
        "Sorry, something went wrong while checking homework statuses.".into()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn validate_default_config_ok() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_bad_endpoint() {
        let mut config = Config::default();
        config.api.endpoint = "not a url".to_string();
        assert!(config.validate().is_err());

        config.api.endpoint = "ftp://example.com/".to_string();
        assert!(matches!(config.validate(), Err(AppError::Validation(_))));
    }

    #[test]
    fn validate_rejects_zero_timeouts() {
        let mut config = Config::default();
        config.api.timeout_secs = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.polling.retry_period_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_template_without_placeholders() {
        let mut config = Config::default();
        config.messages.status_changed = "Something changed".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn format_status_fills_placeholders() {
        let messages = Messages::default();
        let text = messages.format_status("hw1", "Approved!");
        assert_eq!(text, "Review status changed for \"hw1\"\nApproved!");
    }

    #[test]
    fn failure_messages_are_distinct() {
        let messages = Messages::default();
        assert!(messages.for_failure(FailureKind::ServerConnection).contains("Connection error"));
        assert_ne!(
            messages.for_failure(FailureKind::Transport),
            messages.for_failure(FailureKind::ParseStatus)
        );
    }

    #[test]
    fn load_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[polling]
retry_period_secs = 60
cursor = "incremental"

[verdicts]
approved = "Accepted"
"#
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.polling.retry_period_secs, 60);
        assert_eq!(config.polling.cursor, CursorPolicy::Incremental);
        assert_eq!(config.polling.lookback_secs, 9 * 24 * 60 * 60);
        assert_eq!(config.verdicts.approved, "Accepted");
        assert_eq!(config.api.timeout_secs, 30);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn load_or_default_on_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_default(dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.polling.retry_period_secs, 600);
        assert_eq!(config.polling.cursor, CursorPolicy::Rolling);
    }

    #[test]
    fn load_or_default_rejects_broken_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[polling\nretry_period_secs = ").unwrap();

        assert!(matches!(
            Config::load_or_default(file.path()),
            Err(AppError::Toml(_))
        ));
    }

    #[test]
    fn format_status_does_not_expand_substituted_values() {
        let messages = Messages::default();

        let text = messages.format_status("hw{verdict}.zip", "Approved");
        assert_eq!(text, "Review status changed for \"hw{verdict}.zip\"\nApproved");

        let text = messages.format_status("hw1", "{name} says hi");
        assert_eq!(text, "Review status changed for \"hw1\"\n{name} says hi");
    }

    #[test]
    fn format_status_keeps_unknown_braces() {
        let messages = Messages {
            status_changed: "{ {name} } {other} {verdict}{".into(),
            ..Messages::default()
        };
        assert_eq!(messages.format_status("hw1", "ok"), "{ hw1 } {other} ok{");
    }
}
