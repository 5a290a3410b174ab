use std::time::Duration;

use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret have defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// JWT validation settings.
    pub jwt: JwtConfig,
    /// Text-generation service settings.
    pub generation: GenerationConfig,
    /// How long generated trend insights stay fresh (default: `3600`).
    pub trend_cache_ttl_secs: u64,
}

/// Settings for the external text-generation service.
#[derive(Debug, Clone)]
pub struct GenerationConfig {
    pub api_url: String,
    /// `None` disables every AI-backed endpoint (they fail with 500).
    pub api_key: Option<String>,
    pub model: String,
    pub max_tokens: u32,
}

/// Upper bound for `TREND_CACHE_TTL_SECS` (30 days).
pub const MAX_TREND_CACHE_TTL_SECS: u64 = 30 * 24 * 60 * 60;

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.into())
}

impl GenerationConfig {
    /// | Env Var                 | Default                     |
    /// |-------------------------|-----------------------------|
    /// | `GENERATION_API_URL`    | `https://api.openai.com/v1` |
    /// | `GENERATION_API_KEY`    | unset                       |
    /// | `GENERATION_MODEL`      | `gpt-4o-mini`               |
    /// | `GENERATION_MAX_TOKENS` | `2000`                      |
    pub fn from_env() -> Self {
        let api_key = std::env::var("GENERATION_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty());

        let max_tokens: u32 = env_or("GENERATION_MAX_TOKENS", "2000")
            .parse()
            .expect("GENERATION_MAX_TOKENS must be a valid u32");

        Self {
            api_url: env_or("GENERATION_API_URL", "https://api.openai.com/v1"),
            api_key,
            model: env_or("GENERATION_MODEL", "gpt-4o-mini"),
            max_tokens,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `TREND_CACHE_TTL_SECS` | `3600`                     |
    ///
    /// See [`JwtConfig::from_env`] and [`GenerationConfig::from_env`] for the rest.
    pub fn from_env() -> Self {
        let host = env_or("HOST", "0.0.0.0");

        let port: u16 = env_or("PORT", "3000")
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = env_or("CORS_ORIGINS", "http://localhost:5173")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = env_or("REQUEST_TIMEOUT_SECS", "30")
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let trend_cache_ttl_secs = parse_trend_cache_ttl(&env_or("TREND_CACHE_TTL_SECS", "3600"))
            .unwrap_or_else(|e| panic!("{e}"));

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            jwt: JwtConfig::from_env(),
            generation: GenerationConfig::from_env(),
            trend_cache_ttl_secs,
        }
    }

    pub fn trend_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.trend_cache_ttl_secs)
    }
}

/// Parse `TREND_CACHE_TTL_SECS`, bounded by [`MAX_TREND_CACHE_TTL_SECS`].
pub fn parse_trend_cache_ttl(raw: &str) -> Result<u64, String> {
    let secs: u64 = raw
        .trim()
        .parse()
        .map_err(|e| format!("TREND_CACHE_TTL_SECS must be a valid u64: {e}"))?;
    if secs > MAX_TREND_CACHE_TTL_SECS {
        return Err(format!(
            "TREND_CACHE_TTL_SECS must be at most {MAX_TREND_CACHE_TTL_SECS}, got {secs}"
        ));
    }
    Ok(secs)
}
