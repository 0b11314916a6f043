use crate::error::{NotifyError, Result};
use std::fmt;
use url::Url;

pub const DEFAULT_SMTP_HOST: &str = "smtp.gmail.com";
pub const DEFAULT_SMTP_PORT: u16 = 587;
pub const DEFAULT_FROM_NAME: &str = "AI News Digest";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TlsMode {
    /// Plain connection upgraded with STARTTLS (port 587).
    StartTls,
    /// TLS from the first byte (port 465).
    Wrapper,
    /// Unencrypted. Local test servers only.
    None,
}

impl TlsMode {
    fn parse(value: &str) -> Result<Self> {
        match value.to_ascii_lowercase().as_str() {
            "starttls" | "true" => Ok(Self::StartTls),
            "wrapper" | "tls" | "smtps" => Ok(Self::Wrapper),
            "none" | "false" => Ok(Self::None),
            other => Err(NotifyError::Config(format!("unknown tls mode '{}'", other))),
        }
    }
}

#[derive(Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub tls: TlsMode,
    pub from_name: String,
}

impl SmtpConfig {
    /// Parse `smtp://username@host:port?tls=starttls`. The username is also
    /// the sender address.
    pub fn from_uri(uri: &str, password: &str) -> Result<Self> {
        let parsed_uri = Url::parse(uri)?;

        if parsed_uri.scheme() != "smtp" {
            return Err(NotifyError::Config(format!(
                "URI must use 'smtp://' scheme, got: {}",
                parsed_uri.scheme()
            )));
        }

        let host = parsed_uri
            .host_str()
            .ok_or_else(|| NotifyError::Config(format!("No server specified in URI: {}", uri)))?
            .to_string();

        // user@domain arrives percent-encoded as user%40domain.
        let username = match parsed_uri.username() {
            "" => return Err(NotifyError::Config(format!("No username in URI: {}", uri))),
            user => user.replace("%40", "@"),
        };

        let tls = match parsed_uri.query_pairs().find(|(key, _)| key == "tls") {
            Some((_, value)) => TlsMode::parse(&value)?,
            None => TlsMode::StartTls,
        };

        let port = parsed_uri.port().unwrap_or(match tls {
            TlsMode::Wrapper => 465,
            _ => DEFAULT_SMTP_PORT,
        });

        Ok(Self {
            host,
            port,
            username,
            password: password.to_string(),
            tls,
            from_name: DEFAULT_FROM_NAME.to_string(),
        })
    }

    /// Read `SMTP_*` variables, falling back to `GMAIL_USER`/`GMAIL_PASS`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |primary: &str, fallback: &str| {
            let present = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
            present(primary).or_else(|| present(fallback))
        };

        let username = var("SMTP_USERNAME", "GMAIL_USER")
            .ok_or_else(|| NotifyError::Config("SMTP_USERNAME is not set".to_string()))?;
        let password = var("SMTP_PASSWORD", "GMAIL_PASS")
            .ok_or_else(|| NotifyError::Config("SMTP_PASSWORD is not set".to_string()))?;

        let host = lookup("SMTP_HOST").unwrap_or_else(|| DEFAULT_SMTP_HOST.to_string());
        let port = match lookup("SMTP_PORT") {
            Some(port) => port
                .trim()
                .parse()
                .map_err(|_| NotifyError::Config(format!("SMTP_PORT is not a port: {}", port)))?,
            None => DEFAULT_SMTP_PORT,
        };
        let tls = match lookup("SMTP_TLS") {
            Some(mode) => TlsMode::parse(mode.trim())?,
            None => TlsMode::StartTls,
        };
        let from_name = lookup("SMTP_FROM_NAME").unwrap_or_else(|| DEFAULT_FROM_NAME.to_string());

        Ok(Self {
            host,
            port,
            username: username.trim().to_string(),
            password,
            tls,
            from_name,
        })
    }
}

impl fmt::Debug for SmtpConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmtpConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"***")
            .field("tls", &self.tls)
            .field("from_name", &self.from_name)
            .finish()
    }
}
