//! Database connection settings

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

/// Socket used by Debian and Ubuntu MariaDB packages
pub const DEFAULT_SOCKET: &str = "/var/run/mysqld/mysqld.sock";

/// Default MariaDB port
pub const DEFAULT_PORT: u16 = 3306;

/// Contents written for a fresh line-based `db.cfg`
pub const LEGACY_TEMPLATE: &str = "username\npassword\ndatabase\nhostname\nport\n";

/// Credentials and address of the target database
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub username: String,
    pub password: String,
    pub database: String,
    pub hostname: String,
    pub port: u16,
    /// Unix socket path; overrides hostname and port when set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub socket: Option<PathBuf>,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            username: String::new(),
            password: String::new(),
            database: String::new(),
            hostname: "localhost".to_string(),
            port: DEFAULT_PORT,
            socket: None,
        }
    }
}

impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("username", &self.username)
            .field("password", &"***")
            .field("database", &self.database)
            .field("hostname", &self.hostname)
            .field("port", &self.port)
            .field("socket", &self.socket)
            .finish()
    }
}

impl DatabaseConfig {
    /// Read a line-based `db.cfg`
    ///
    /// The file holds username, password, database, hostname and port, one
    /// per line in that order. Missing lines are left empty; an empty port
    /// means the default port.
    pub fn from_legacy_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        let content = fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;
        Self::parse_legacy(&content).map_err(|message| ConfigError::Parse {
            path: path.to_path_buf(),
            message,
        })
    }

    /// Parse the contents of a line-based `db.cfg`
    pub fn parse_legacy(content: &str) -> Result<Self, String> {
        let mut lines = content.lines().map(|l| l.trim_end_matches('\r').to_string());
        let mut next = || lines.next().unwrap_or_default();

        let username = next();
        let password = next();
        let database = next();
        let hostname = next();
        let port = next();

        let port = if port.trim().is_empty() {
            DEFAULT_PORT
        } else {
            port.trim()
                .parse()
                .map_err(|_| format!("Invalid port '{}'", port.trim()))?
        };

        Ok(Self {
            username,
            password,
            database,
            hostname,
            port,
            socket: None,
        })
    }

    /// Check that enough is set to open a connection
    pub fn validate(&self) -> Result<(), String> {
        if self.username.trim().is_empty() {
            return Err("username is empty".to_string());
        }
        if self.database.trim().is_empty() {
            return Err("database is empty".to_string());
        }
        if self.socket.is_none() && self.hostname.trim().is_empty() {
            return Err("hostname is empty".to_string());
        }
        Ok(())
    }

    /// Whether the configured host is this machine
    pub fn is_local(&self) -> bool {
        matches!(self.hostname.trim(), "" | "localhost" | "127.0.0.1" | "::1")
    }

    /// Socket to connect through, if any
    ///
    /// An explicit socket always wins. Otherwise, on Linux, the default
    /// MariaDB socket is used for local hosts when it exists.
    pub fn effective_socket(&self) -> Option<PathBuf> {
        if let Some(socket) = &self.socket {
            return Some(socket.clone());
        }
        if cfg!(target_os = "linux") && self.is_local() {
            let default = Path::new(DEFAULT_SOCKET);
            if default.exists() {
                return Some(default.to_path_buf());
            }
        }
        None
    }

    /// Human-readable target for logs; never includes the password
    pub fn describe(&self) -> String {
        match &self.socket {
            Some(socket) => format!("{}@{} via {}", self.username, self.database, socket.display()),
            None => format!(
                "{}@{}:{}/{}",
                self.username, self.hostname, self.port, self.database
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_legacy() {
        let config = DatabaseConfig::parse_legacy("root\nsecret\nsales\ndb.local\n3307\n").unwrap();
        assert_eq!(config.username, "root");
        assert_eq!(config.password, "secret");
        assert_eq!(config.database, "sales");
        assert_eq!(config.hostname, "db.local");
        assert_eq!(config.port, 3307);
    }

    #[test]
    fn test_parse_legacy_missing_lines() {
        let config = DatabaseConfig::parse_legacy("root\r\n\r\nsales").unwrap();
        assert_eq!(config.password, "");
        assert_eq!(config.hostname, "");
        assert_eq!(config.port, DEFAULT_PORT);
    }

    #[test]
    fn test_untouched_template_has_invalid_port() {
        let err = DatabaseConfig::parse_legacy(LEGACY_TEMPLATE).unwrap_err();
        assert!(err.contains("port"));
    }

    #[test]
    fn test_from_legacy_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("db.cfg");
        fs::write(&path, "u\np\nd\nh\n3306\n").unwrap();
        assert_eq!(DatabaseConfig::from_legacy_file(&path).unwrap().database, "d");

        let missing = DatabaseConfig::from_legacy_file(&dir.path().join("none.cfg"));
        assert!(matches!(missing, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_validate() {
        let mut config = DatabaseConfig::default();
        assert!(config.validate().is_err());
        config.username = "root".to_string();
        config.database = "sales".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_explicit_socket_wins() {
        let config = DatabaseConfig {
            socket: Some(PathBuf::from("/tmp/my.sock")),
            hostname: "remote.example".to_string(),
            ..Default::default()
        };
        assert_eq!(config.effective_socket(), Some(PathBuf::from("/tmp/my.sock")));
    }

    #[test]
    fn test_remote_host_never_uses_default_socket() {
        let config = DatabaseConfig {
            hostname: "remote.example".to_string(),
            ..Default::default()
        };
        assert!(!config.is_local());
        assert_eq!(config.effective_socket(), None);
    }

    #[test]
    fn test_debug_hides_password() {
        let config = DatabaseConfig {
            password: "hunter2".to_string(),
            ..Default::default()
        };
        assert!(!format!("{:?}", config).contains("hunter2"));
        assert!(!config.describe().contains("hunter2"));
    }
}
