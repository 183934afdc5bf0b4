use actix_web::cookie::Key;
use thiserror::Error;

const DEFAULT_STRIPE_API_BASE: &str = "https://api.stripe.com";
const MIN_SESSION_KEY_LEN: usize = 64;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("Invalid {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// Back-office account created at startup when it does not exist yet.
#[derive(Debug, Clone)]
pub struct AdminAccount {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    /// Publishable key, safe to hand to browsers.
    pub stripe_key: String,
    pub stripe_secret: String,
    pub stripe_api_base: String,
    pub admin: Option<AdminAccount>,
    session_key: Option<Vec<u8>>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads settings through `lookup`, which returns `None` for unset names.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| {
            lookup(name)
                .filter(|v| !v.is_empty())
                .ok_or(ConfigError::Missing(name))
        };

        let port = match lookup("PORT") {
            Some(raw) => raw.parse().map_err(|e: std::num::ParseIntError| {
                ConfigError::Invalid {
                    name: "PORT",
                    reason: e.to_string(),
                }
            })?,
            None => 8080,
        };

        let session_key = lookup("SESSION_KEY").map(String::into_bytes);
        if let Some(key) = &session_key {
            if key.len() < MIN_SESSION_KEY_LEN {
                return Err(ConfigError::Invalid {
                    name: "SESSION_KEY",
                    reason: format!("must be at least {MIN_SESSION_KEY_LEN} bytes"),
                });
            }
        }

        let admin = match (lookup("ADMIN_EMAIL"), lookup("ADMIN_PASSWORD")) {
            (Some(email), Some(password)) if !email.is_empty() && !password.is_empty() => {
                Some(AdminAccount { email, password })
            }
            (None, None) => None,
            _ => {
                return Err(ConfigError::Invalid {
                    name: "ADMIN_EMAIL",
                    reason: "ADMIN_EMAIL and ADMIN_PASSWORD must be set together".to_string(),
                })
            }
        };

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port,
            stripe_key: lookup("STRIPE_KEY").unwrap_or_default(),
            stripe_secret: required("STRIPE_SECRET")?,
            stripe_api_base: lookup("STRIPE_API_BASE")
                .unwrap_or_else(|| DEFAULT_STRIPE_API_BASE.to_string()),
            admin,
            session_key,
        })
    }

    /// Key signing and encrypting the session cookie.
    ///
    /// Without `SESSION_KEY` a random key is generated, so sessions do not
    /// survive a restart.
    pub fn session_key(&self) -> Key {
        match &self.session_key {
            Some(bytes) => Key::from(bytes.as_slice()),
            None => {
                log::warn!("SESSION_KEY not set, generating a random session key");
                Key::generate()
            }
        }
    }
}
