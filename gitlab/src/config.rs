use crate::error::{ErrorKind, Result};
use reqwest::Url;
use std::{env, fmt};

/// Environment variable holding the base API url, e.g. `https://gitlab.com/api/v4`.
pub const GITLAB_API_ENDPOINT: &str = "GITLAB_API_ENDPOINT";
/// Environment variable holding the personal access token.
pub const GITLAB_PERSONAL_TOKEN: &str = "GITLAB_PERSONAL_TOKEN";

const DEFAULT_BASE_URL: &str = "https://gitlab.com/api/v4";

/// Client configuration. Built once at startup and only read afterwards.
#[derive(Clone)]
pub struct Config {
    pub base_url: Url,
    /// Sent as the `Private-Token` header on every request when set.
    pub private_token: Option<String>,
    pub user_agent: String,
}

impl Config {
    pub fn new(endpoint: &str) -> Result<Self> {
        let base_url = Url::parse(endpoint).map_err(|e| {
            ErrorKind::Config(format!("invalid api endpoint '{}': {}", endpoint, e))
        })?;

        if base_url.cannot_be_a_base() {
            return Err(ErrorKind::Config(format!(
                "api endpoint '{}' cannot be used as a base url",
                endpoint
            ))
            .into());
        }

        Ok(Config {
            base_url,
            ..Config::default()
        })
    }

    pub fn new_authenticated(endpoint: &str, token: &str) -> Result<Self> {
        Ok(Config {
            private_token: Some(token.to_string()),
            ..Config::new(endpoint)?
        })
    }

    /// Reads `GITLAB_API_ENDPOINT` and `GITLAB_PERSONAL_TOKEN`.
    pub fn from_env() -> Result<Self> {
        Config::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`Config::from_env`] with a custom variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let endpoint = lookup(GITLAB_API_ENDPOINT)
            .filter(|e| !e.is_empty())
            .ok_or_else(|| {
                ErrorKind::Config(format!("missing env variable {}", GITLAB_API_ENDPOINT))
            })?;

        let mut cfg = Config::new(&endpoint)?;
        cfg.private_token = lookup(GITLAB_PERSONAL_TOKEN).filter(|t| !t.is_empty());
        Ok(cfg)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base url is valid"),
            private_token: None,
            user_agent: format!("gitlab-rs/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

// The token never ends up in logs.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Config")
            .field("base_url", &self.base_url.as_str())
            .field("private_token", &self.private_token.as_ref().map(|_| "<redacted>"))
            .field("user_agent", &self.user_agent)
            .finish()
    }
}
