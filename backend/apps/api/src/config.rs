//! Process Configuration
//!
//! Read once at startup from the environment (after `.env` is loaded).

use std::env;
use std::time::Duration;

use anyhow::{Context, bail};
use auth::AuthConfig;
use base64::Engine;
use base64::engine::general_purpose;

const DEFAULT_PORT: u16 = 5001;
const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:3000,http://127.0.0.1:3000";

/// Everything the server needs before it can accept connections
#[derive(Debug)]
pub struct ServerConfig {
    pub database_url: String,
    pub port: u16,
    pub frontend_origins: Vec<String>,
    pub auth: AuthConfig,
}

impl ServerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url =
            env::var("DATABASE_URL").context("DATABASE_URL must be set in environment")?;

        let port = match env::var("PORT") {
            Ok(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("PORT is not a valid port number: {raw:?}"))?,
            Err(_) => DEFAULT_PORT,
        };

        let frontend_origins = parse_origins(
            &env::var("FRONTEND_ORIGINS").unwrap_or_else(|_| DEFAULT_FRONTEND_ORIGINS.to_string()),
        );

        Ok(Self {
            database_url,
            port,
            frontend_origins,
            auth: auth_config_from_env()?,
        })
    }
}

fn auth_config_from_env() -> anyhow::Result<AuthConfig> {
    let mut config = match env::var("AUTH_TOKEN_SECRET") {
        Ok(secret_b64) => AuthConfig {
            token_secret: decode_secret(&secret_b64)?,
            ..AuthConfig::default()
        },
        Err(_) if cfg!(debug_assertions) => {
            tracing::warn!("AUTH_TOKEN_SECRET not set, using a random secret for this process");
            AuthConfig::with_random_secret()
        }
        Err(_) => bail!("AUTH_TOKEN_SECRET must be set in production"),
    };

    if let Ok(raw) = env::var("AUTH_TOKEN_TTL_SECS") {
        config.token_ttl = parse_ttl(&raw)?;
    }

    if let Ok(pepper) = env::var("AUTH_PASSWORD_PEPPER") {
        if !pepper.is_empty() {
            config.password_pepper = Some(pepper.into_bytes());
        }
    }

    Ok(config)
}

/// Base64 (standard alphabet) of exactly 32 bytes
fn decode_secret(secret_b64: &str) -> anyhow::Result<[u8; 32]> {
    let bytes = general_purpose::STANDARD
        .decode(secret_b64.trim())
        .context("AUTH_TOKEN_SECRET is not valid base64")?;

    <[u8; 32]>::try_from(bytes.as_slice()).map_err(|_| {
        anyhow::anyhow!(
            "AUTH_TOKEN_SECRET must decode to 32 bytes (got {})",
            bytes.len()
        )
    })
}

fn parse_ttl(raw: &str) -> anyhow::Result<Duration> {
    let secs: u64 = raw
        .trim()
        .parse()
        .with_context(|| format!("AUTH_TOKEN_TTL_SECS is not a number: {raw:?}"))?;
    if secs == 0 {
        bail!("AUTH_TOKEN_TTL_SECS must be positive");
    }
    Ok(Duration::from_secs(secs))
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_secret() {
        let encoded = general_purpose::STANDARD.encode([9u8; 32]);
        assert_eq!(decode_secret(&encoded).unwrap(), [9u8; 32]);

        let short = general_purpose::STANDARD.encode([9u8; 16]);
        assert!(decode_secret(&short).is_err());
        assert!(decode_secret("not base64!").is_err());
    }

    #[test]
    fn test_parse_ttl() {
        assert_eq!(parse_ttl(" 900 ").unwrap(), Duration::from_secs(900));
        assert!(parse_ttl("0").is_err());
        assert!(parse_ttl("15m").is_err());
    }

    #[test]
    fn test_parse_origins() {
        assert_eq!(
            parse_origins(DEFAULT_FRONTEND_ORIGINS),
            ["http://localhost:3000", "http://127.0.0.1:3000"]
        );
        assert_eq!(parse_origins(" https://a.example , ,"), ["https://a.example"]);
    }
}
