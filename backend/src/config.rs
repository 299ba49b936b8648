use std::path::PathBuf;
use std::str::FromStr;

use log::warn;

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for running the registration desk on a
/// single machine.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `127.0.0.1`).
    pub host: String,
    /// Bind port (default: `8080`).
    pub port: u16,
    /// SQLite file holding accepted registrations.
    pub database_path: PathBuf,
    /// Directory uploaded photos are written to and served from.
    pub upload_dir: PathBuf,
    /// Open the default browser on start.
    pub open_browser: bool,
    /// Largest accepted photo, in bytes.
    pub max_upload_bytes: usize,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var            | Default                |
    /// |--------------------|------------------------|
    /// | `HOST`             | `127.0.0.1`            |
    /// | `PORT`             | `8080`                 |
    /// | `DATABASE_PATH`    | `registrations.sqlite` |
    /// | `UPLOAD_DIR`       | `uploads`              |
    /// | `OPEN_BROWSER`     | `true`                 |
    /// | `MAX_UPLOAD_BYTES` | `5242880` (5 MiB)      |
    pub fn from_env() -> Self {
        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".into()),
            port: parse_env("PORT", 8080),
            database_path: std::env::var("DATABASE_PATH")
                .unwrap_or_else(|_| "registrations.sqlite".into())
                .into(),
            upload_dir: std::env::var("UPLOAD_DIR")
                .unwrap_or_else(|_| "uploads".into())
                .into(),
            open_browser: parse_env("OPEN_BROWSER", true),
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", 5 * 1024 * 1024),
        }
    }

    pub fn url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

fn parse_env<T: FromStr>(key: &str, default: T) -> T {
    match std::env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("ignoring invalid {}={:?}, using the default", key, raw);
            default
        }),
        Err(_) => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_values_fall_back_to_default() {
        std::env::set_var("REGISTRATION_TEST_PORT", "not-a-port");
        assert_eq!(parse_env("REGISTRATION_TEST_PORT", 8080u16), 8080);
        std::env::set_var("REGISTRATION_TEST_PORT", " 9000 ");
        assert_eq!(parse_env("REGISTRATION_TEST_PORT", 8080u16), 9000);
        assert!(parse_env("REGISTRATION_TEST_UNSET_FLAG", true));
    }
}
