use std::path::PathBuf;

use axum::http::HeaderValue;

/// Output format for log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} must be {expected}, got '{value}'")]
    Invalid {
        var: &'static str,
        value: String,
        expected: &'static str,
    },

    #[error("Could not determine the home directory; set MAILSTUB_DB_PATH")]
    NoHomeDir,
}

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for running on a developer machine.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `127.0.0.1`).
    pub host: String,
    /// Bind port (default: `8000`).
    pub port: u16,
    /// SQLite database file (default: `~/.mailstub/mailstub.db`).
    pub database_path: PathBuf,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<HeaderValue>,
    /// Directory holding a built frontend to serve on non-API paths.
    pub static_dir: Option<PathBuf>,
    pub log_format: LogFormat,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var               | Default                    |
    /// |-----------------------|----------------------------|
    /// | `HOST`                | `127.0.0.1`                |
    /// | `PORT`                | `8000`                     |
    /// | `MAILSTUB_DB_PATH`    | `~/.mailstub/mailstub.db`  |
    /// | `CORS_ORIGINS`        | `http://localhost:5173`    |
    /// | `MAILSTUB_STATIC_DIR` | unset                      |
    /// | `LOG_FORMAT`          | `text` (`json` also valid) |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) but reading variables through
    /// `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(|| "127.0.0.1".into());

        let port = match lookup("PORT") {
            Some(raw) => parse_port(&raw)?,
            None => 8000,
        };

        let database_path = match lookup("MAILSTUB_DB_PATH").filter(|p| !p.trim().is_empty()) {
            Some(path) => PathBuf::from(path),
            None => default_database_path()?,
        };

        let cors_origins = lookup("CORS_ORIGINS")
            .unwrap_or_else(|| "http://localhost:5173".into())
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(parse_origin)
            .collect::<Result<Vec<_>, _>>()?;

        let static_dir = lookup("MAILSTUB_STATIC_DIR")
            .filter(|d| !d.trim().is_empty())
            .map(PathBuf::from);

        let log_format = match lookup("LOG_FORMAT").as_deref() {
            None | Some("text") => LogFormat::Text,
            Some("json") => LogFormat::Json,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    var: "LOG_FORMAT",
                    value: other.to_string(),
                    expected: "'text' or 'json'",
                })
            }
        };

        Ok(Self {
            host,
            port,
            database_path,
            cors_origins,
            static_dir,
            log_format,
        })
    }
}

/// `~/.mailstub/mailstub.db`.
pub fn default_database_path() -> Result<PathBuf, ConfigError> {
    dirs::home_dir()
        .map(|home| home.join(".mailstub").join("mailstub.db"))
        .ok_or(ConfigError::NoHomeDir)
}

/// A single `http(s)://host[:port]` origin. No wildcards, since the CORS
/// layer allows credentials.
fn parse_origin(origin: &str) -> Result<HeaderValue, ConfigError> {
    let invalid = || ConfigError::Invalid {
        var: "CORS_ORIGINS",
        value: origin.to_string(),
        expected: "a comma-separated list of http(s)://host[:port] origins",
    };

    let authority = origin
        .strip_prefix("http://")
        .or_else(|| origin.strip_prefix("https://"))
        .ok_or_else(invalid)?;
    if authority.is_empty()
        || authority.contains(['/', '*', '?', '#'])
        || authority.contains(char::is_whitespace)
    {
        return Err(invalid());
    }

    HeaderValue::from_str(origin).map_err(|_| invalid())
}

fn parse_port(raw: &str) -> Result<u16, ConfigError> {
    match raw.trim().parse::<u16>() {
        Ok(port) if port > 0 => Ok(port),
        _ => Err(ConfigError::Invalid {
            var: "PORT",
            value: raw.to_string(),
            expected: "a number between 1 and 65535",
        }),
    }
}
