//! Runtime configuration shared by the RPC client and the controllers.

use secrecy::SecretString;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_CUSTOMERS_MODULE: &str = "demo.www.customers1.customers1";
pub const DEFAULT_FEED_MODULE: &str = "social_media.www.social.social";
pub const DEFAULT_ATTACH_DOCTYPE: &str = "CostomerX";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid base URL {0:?}: {1}")]
    InvalidBaseUrl(String, String),
    #[error("--api-key and --api-secret must be given together")]
    IncompleteToken,
    #[error("--api-key/--api-secret and --sid are mutually exclusive")]
    ConflictingAuth,
}

/// How requests authenticate against the backend.
#[derive(Clone)]
pub enum Auth {
    Guest,
    /// `Authorization: token key:secret`
    Token { api_key: String, api_secret: SecretString },
    /// Browser session cookie.
    Session { sid: SecretString },
}

impl std::fmt::Debug for Auth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Auth::Guest => f.write_str("Guest"),
            Auth::Token { api_key, .. } => f
                .debug_struct("Token")
                .field("api_key", api_key)
                .field("api_secret", &"[REDACTED]")
                .finish(),
            Auth::Session { .. } => f
                .debug_struct("Session")
                .field("sid", &"[REDACTED]")
                .finish(),
        }
    }
}

#[derive(Clone)]
pub struct DeskConfig {
    pub base_url: reqwest::Url,
    pub auth: Auth,
    pub csrf_token: Option<SecretString>,
    pub timeout: Duration,
    pub user_agent: String,
    pub customers_module: String,
    pub feed_module: String,
    pub attach_doctype: String,
    pub log_file: Option<PathBuf>,
}

impl std::fmt::Debug for DeskConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeskConfig")
            .field("base_url", &self.base_url.as_str())
            .field("auth", &self.auth)
            .field("csrf_token", &self.csrf_token.as_ref().map(|_| "[REDACTED]"))
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .field("customers_module", &self.customers_module)
            .field("feed_module", &self.feed_module)
            .field("attach_doctype", &self.attach_doctype)
            .field("log_file", &self.log_file)
            .finish()
    }
}

impl DeskConfig {
    /// Resolve the authentication mode from the optional credential pieces.
    pub fn resolve_auth(
        api_key: Option<String>,
        api_secret: Option<String>,
        sid: Option<String>,
    ) -> Result<Auth, ConfigError> {
        match (api_key, api_secret, sid) {
            (Some(_), Some(_), Some(_)) => Err(ConfigError::ConflictingAuth),
            (Some(api_key), Some(api_secret), None) => Ok(Auth::Token {
                api_key,
                api_secret: SecretString::from(api_secret),
            }),
            (Some(_), None, _) | (None, Some(_), _) => Err(ConfigError::IncompleteToken),
            (None, None, Some(sid)) => Ok(Auth::Session {
                sid: SecretString::from(sid),
            }),
            (None, None, None) => Ok(Auth::Guest),
        }
    }

    /// Parse the base URL, making sure it ends with `/` so joins keep any path prefix.
    pub fn parse_base_url(raw: &str) -> Result<reqwest::Url, ConfigError> {
        let mut s = raw.trim().to_string();
        if !s.ends_with('/') {
            s.push('/');
        }
        let url = reqwest::Url::parse(&s)
            .map_err(|e| ConfigError::InvalidBaseUrl(raw.to_string(), e.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidBaseUrl(
                raw.to_string(),
                "scheme must be http or https".into(),
            ));
        }
        Ok(url)
    }
}
