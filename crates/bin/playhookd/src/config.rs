//! Configuration loading: TOML file with environment variable overrides.
//!
//! Looks for `playhook.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values.

use std::path::PathBuf;
use std::time::Duration;

use playhook_app::executors::ShellConfig;
use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Where the document lives.
    pub storage: StorageConfig,
    /// Periodic backups of the document.
    pub backup: BackupConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
    /// How scripts and system commands are started.
    pub shell: ShellSection,
}

/// HTTP listener configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to (e.g. `127.0.0.1`).
    pub host: String,
    /// TCP port.
    pub port: u16,
}

/// JSON document location.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub data_file: PathBuf,
}

/// Backup schedule and retention.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct BackupConfig {
    pub enabled: bool,
    pub directory: PathBuf,
    /// Seconds between two backups.
    pub interval_secs: u64,
    /// Number of backup files kept.
    pub retention: usize,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

/// Overrides for the platform's shell defaults. Unset fields keep them.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ShellSection {
    pub shell: Option<String>,
    pub shell_args: Option<Vec<String>>,
    pub script_interpreter: Option<String>,
    pub script_file_args: Option<Vec<String>>,
    pub script_inline_args: Option<Vec<String>>,
    pub script_extension: Option<String>,
}

impl ShellSection {
    /// The platform defaults with this section's overrides applied.
    #[must_use]
    pub fn to_shell_config(&self) -> ShellConfig {
        let mut shell = ShellConfig::default();
        if let Some(value) = &self.shell {
            shell.shell.clone_from(value);
        }
        if let Some(value) = &self.shell_args {
            shell.shell_args.clone_from(value);
        }
        if let Some(value) = &self.script_interpreter {
            shell.script_interpreter.clone_from(value);
        }
        if let Some(value) = &self.script_file_args {
            shell.script_file_args.clone_from(value);
        }
        if let Some(value) = &self.script_inline_args {
            shell.script_inline_args.clone_from(value);
        }
        if let Some(value) = &self.script_extension {
            shell.script_extension = value.trim_start_matches('.').to_string();
        }
        shell
    }
}

impl Config {
    /// Load configuration from `playhook.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("playhook.toml")?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(val) = var("PLAYHOOK_HOST") {
            self.server.host = val;
        }
        if let Some(port) = var("PLAYHOOK_PORT").and_then(|val| val.parse().ok()) {
            self.server.port = port;
        }
        if let Some(val) = var("PLAYHOOK_BIND")
            && let Some((host, port)) = val.rsplit_once(':')
        {
            self.server.host = host.to_string();
            if let Ok(port) = port.parse() {
                self.server.port = port;
            }
        }
        if let Some(val) = var("PLAYHOOK_DATA_FILE") {
            self.storage.data_file = PathBuf::from(val);
        }
        if let Some(val) = var("PLAYHOOK_BACKUP_DIR") {
            self.backup.directory = PathBuf::from(val);
        }
        if let Some(val) = var("PLAYHOOK_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("port must be non-zero".to_string()));
        }
        if self.storage.data_file.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "storage data_file must not be empty".to_string(),
            ));
        }
        if self.backup.enabled && self.backup.interval_secs == 0 {
            return Err(ConfigError::Validation(
                "backup interval_secs must be non-zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Return the `host:port` bind address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    #[must_use]
    pub fn backup_interval(&self) -> Duration {
        Duration::from_secs(self.backup.interval_secs)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 7878,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from("playhook.json"),
        }
    }
}

impl Default for BackupConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            directory: PathBuf::from("backups"),
            interval_secs: 24 * 60 * 60,
            retention: 7,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "playhookd=info,playhook=info,tower_http=debug".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn should_produce_sensible_defaults() {
        let config = Config::default();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 7878);
        assert_eq!(config.storage.data_file, PathBuf::from("playhook.json"));
        assert!(config.backup.enabled);
        assert_eq!(config.backup.retention, 7);
        assert_eq!(config.shell.to_shell_config(), ShellConfig::default());
    }

    #[test]
    fn should_parse_full_toml() {
        let toml = "
            [server]
            host = '0.0.0.0'
            port = 9090

            [storage]
            data_file = '/var/lib/playhook/data.json'

            [backup]
            enabled = false
            directory = '/var/backups/playhook'
            interval_secs = 3600
            retention = 3

            [logging]
            filter = 'debug'

            [shell]
            shell = 'bash'
            shell_args = ['-lc']
            script_extension = '.bash'
        ";
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.bind_addr(), "0.0.0.0:9090");
        assert_eq!(
            config.storage.data_file,
            PathBuf::from("/var/lib/playhook/data.json")
        );
        assert!(!config.backup.enabled);
        assert_eq!(config.backup_interval(), Duration::from_secs(3600));
        assert_eq!(config.backup.retention, 3);
        assert_eq!(config.logging.filter, "debug");

        let shell = config.shell.to_shell_config();
        assert_eq!(shell.shell, "bash");
        assert_eq!(shell.shell_args, vec!["-lc"]);
        assert_eq!(shell.script_extension, "bash");
        assert_eq!(
            shell.script_interpreter,
            ShellConfig::default().script_interpreter
        );
    }

    #[test]
    fn should_parse_partial_toml_with_defaults() {
        let toml = "
            [server]
            port = 8080
        ";
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.backup.interval_secs, 86_400);
    }

    #[test]
    fn should_return_default_when_file_not_found() {
        let config = Config::from_file("nonexistent.toml").unwrap();
        assert_eq!(config.server.port, 7878);
    }

    #[test]
    fn should_report_parse_error_for_invalid_toml() {
        let result: Result<Config, _> = toml::from_str("invalid {{{");
        assert!(result.is_err());
    }

    #[test]
    fn should_apply_env_overrides_in_order() {
        let mut config = Config::default();
        config.apply_overrides(env(&[
            ("PLAYHOOK_PORT", "9000"),
            ("PLAYHOOK_BIND", "0.0.0.0:9100"),
            ("PLAYHOOK_DATA_FILE", "/tmp/playhook.json"),
            ("PLAYHOOK_BACKUP_DIR", "/tmp/backups"),
            ("PLAYHOOK_LOG", "warn"),
            ("RUST_LOG", "trace"),
        ]));
        assert_eq!(config.bind_addr(), "0.0.0.0:9100");
        assert_eq!(config.storage.data_file, PathBuf::from("/tmp/playhook.json"));
        assert_eq!(config.backup.directory, PathBuf::from("/tmp/backups"));
        assert_eq!(config.logging.filter, "trace");
    }

    #[test]
    fn should_ignore_unparsable_port_override() {
        let mut config = Config::default();
        config.apply_overrides(env(&[("PLAYHOOK_PORT", "not-a-port")]));
        assert_eq!(config.server.port, 7878);
    }

    #[test]
    fn should_reject_zero_port() {
        let mut config = Config::default();
        config.server.port = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_reject_empty_data_file() {
        let mut config = Config::default();
        config.storage.data_file = PathBuf::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_reject_zero_backup_interval_when_enabled() {
        let mut config = Config::default();
        config.backup.interval_secs = 0;
        assert!(config.validate().is_err());
        config.backup.enabled = false;
        assert!(config.validate().is_ok());
    }
}
