use std::fmt;
use std::path::Path;

use eyre::{bail, Result, WrapErr};
use serde::Deserialize;

/// Overrides the `Username` from the config file.
pub const USERNAME_ENV: &str = "GRPPC_USERNAME";
/// Overrides the `Password` from the config file, but only when
/// [`USERNAME_ENV`] is also set.
pub const PASSWORD_ENV: &str = "GRPPC_PASSWORD";

/// Node connection settings, read from a JSON file such as:
///
/// ```json
/// {"Testnet": true, "Username": "rpcuser", "Password": "rpcpass", "Host": "127.0.0.1", "Port": 9904}
/// ```
#[derive(Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Config {
    #[serde(default, alias = "testnet")]
    pub testnet: bool,
    #[serde(default, alias = "username")]
    pub username: String,
    #[serde(default, alias = "password")]
    pub password: String,
    #[serde(default, alias = "host")]
    pub host: String,
    #[serde(default, alias = "port")]
    pub port: u16,
}

impl Config {
    /// Load `path`, then apply credential overrides from the process
    /// environment.
    pub fn load(path: &Path) -> Result<Self> {
        Self::load_with_env(path, |key| std::env::var(key).ok())
    }

    pub fn load_with_env(path: &Path, env: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("read config file {}", path.display()))?;
        let mut config: Config = serde_json::from_str(&content)
            .wrap_err_with(|| format!("parse config file {}", path.display()))?;
        tracing::info!(path = %path.display(), "loaded config");

        config.apply_env_overrides(env);
        config.validate()?;
        tracing::debug!(config = ?config, "effective config");
        Ok(config)
    }

    fn apply_env_overrides(&mut self, env: impl Fn(&str) -> Option<String>) {
        let Some(username) = env(USERNAME_ENV).filter(|v| !v.is_empty()) else {
            tracing::info!("{USERNAME_ENV} not set; using username from config file");
            return;
        };
        self.username = username;

        let Some(password) = env(PASSWORD_ENV).filter(|v| !v.is_empty()) else {
            tracing::info!("{PASSWORD_ENV} not set; using password from config file");
            return;
        };
        self.password = password;
    }

    fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            bail!("host not found in config");
        }
        if self.port == 0 {
            bail!("port not found in config");
        }
        if self.username.is_empty() {
            bail!("username not found in config or {USERNAME_ENV}");
        }
        if self.password.is_empty() {
            bail!("password not found in config or {PASSWORD_ENV}");
        }
        Ok(())
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("testnet", &self.testnet)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("host", &self.host)
            .field("port", &self.port)
            .finish()
    }
}
