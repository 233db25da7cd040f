use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub seed: SeedConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_db_path")]
    pub db_path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedConfig {
    #[serde(default = "default_seed_students")]
    pub students: usize,
    #[serde(default = "default_seed_courses")]
    pub courses: usize,
    #[serde(default = "default_seed_enrollments")]
    pub enrollments: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub db_path: Option<PathBuf>,
    pub host: Option<String>,
    pub port: Option<u16>,
}

impl Config {
    pub fn default_path() -> PathBuf {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        home.join(".config/enrollment-records/config.toml")
    }

    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = path
            .map(|p| p.to_path_buf())
            .unwrap_or_else(Self::default_path);
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = fs::read_to_string(&path)
            .with_context(|| format!("failed reading config: {}", path.display()))?;
        let parsed: Self = toml::from_str(&data)
            .with_context(|| format!("failed parsing TOML config: {}", path.display()))?;
        Ok(parsed)
    }

    pub fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(db_path) = overrides.db_path {
            self.storage.db_path = db_path.display().to_string();
        }
        if let Some(host) = overrides.host {
            self.server.host = host;
        }
        if let Some(port) = overrides.port {
            self.server.port = port;
        }
    }

    pub fn write_template(path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("failed creating config directory: {}", parent.display())
            })?;
        }
        fs::write(path, Self::default_template())
            .with_context(|| format!("failed writing config template: {}", path.display()))
    }

    pub fn resolved_db_path(&self) -> PathBuf {
        expand_tilde(&self.storage.db_path)
    }

    pub fn bind_addr(&self) -> Result<SocketAddr> {
        let bind = format!("{}:{}", self.server.host, self.server.port);
        bind.parse()
            .map_err(|e| anyhow!("invalid bind address {bind}: {e}"))
    }

    pub fn default_template() -> String {
        let template = r#"[server]
host = "127.0.0.1"
port = 8000

[storage]
db_path = "~/.local/share/enrollment-records/records.db"

[seed]
students = 30
courses = 70
enrollments = 700

[logging]
level = "info"
"#;
        template.to_string()
    }
}

pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
        }
    }
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            students: default_seed_students(),
            courses: default_seed_courses(),
            enrollments: default_seed_enrollments(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_db_path() -> String {
    "~/.local/share/enrollment-records/records.db".to_string()
}

fn default_seed_students() -> usize {
    30
}

fn default_seed_courses() -> usize {
    70
}

fn default_seed_enrollments() -> usize {
    700
}

fn default_log_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn template_parses_to_defaults() {
        let parsed: Config = toml::from_str(&Config::default_template()).expect("template");
        let defaults = Config::default();
        assert_eq!(parsed.server.port, defaults.server.port);
        assert_eq!(parsed.storage.db_path, defaults.storage.db_path);
        assert_eq!(parsed.seed.enrollments, defaults.seed.enrollments);
        assert_eq!(parsed.logging.level, "info");
    }

    #[test]
    fn partial_file_fills_missing_sections() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        fs::write(&path, "[server]\nport = 9100\n").expect("write");
        let config = Config::load(Some(&path)).expect("load");
        assert_eq!(config.server.port, 9100);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.seed.students, 30);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempdir().expect("tempdir");
        let config = Config::load(Some(&dir.path().join("absent.toml"))).expect("load");
        assert_eq!(config.server.port, 8000);
    }

    #[test]
    fn overrides_win_over_file_values() {
        let mut config = Config::default();
        config.apply_overrides(ConfigOverrides {
            db_path: Some(PathBuf::from("/tmp/records.db")),
            host: Some("0.0.0.0".to_string()),
            port: Some(8080),
        });
        assert_eq!(config.resolved_db_path(), PathBuf::from("/tmp/records.db"));
        assert_eq!(config.bind_addr().expect("addr").to_string(), "0.0.0.0:8080");
    }

    #[test]
    fn write_template_creates_parent_directories() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("a").join("b").join("config.toml");
        Config::write_template(&path).expect("write");
        assert!(Config::load(Some(&path)).is_ok());
    }
}
