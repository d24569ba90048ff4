use anyhow::Context;
use axum::http::HeaderValue;

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub key: String,
}

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub ttl_minutes: i64,
}

/// Allowed CORS origin: `*` or a single exact origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsOrigin {
    Any,
    Exact(HeaderValue),
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    pub cors_origin: CorsOrigin,
    pub host: String,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    pub fn from_vars<F>(var: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            var(key)
                .filter(|v| !v.trim().is_empty())
                .with_context(|| format!("{key} must be set"))
        };

        let database = DatabaseConfig {
            url: required("DATABASE_URL")?,
            key: required("DATABASE_KEY")?,
        };
        let jwt = JwtConfig {
            secret: required("JWT_SECRET")?,
            issuer: var("JWT_ISSUER").unwrap_or_else(|| "userdesk".into()),
            audience: var("JWT_AUDIENCE").unwrap_or_else(|| "userdesk-users".into()),
            ttl_minutes: match var("JWT_TTL_MINUTES") {
                Some(v) => v
                    .parse::<i64>()
                    .ok()
                    .filter(|m| *m > 0)
                    .with_context(|| format!("invalid JWT_TTL_MINUTES {v:?}"))?,
                None => 60,
            },
        };

        let cors_origin = match var("CORS_ORIGIN").as_deref().map(str::trim) {
            None | Some("") | Some("*") => CorsOrigin::Any,
            Some(origin) => CorsOrigin::Exact(
                HeaderValue::from_str(origin)
                    .with_context(|| format!("invalid CORS_ORIGIN {origin:?}"))?,
            ),
        };

        let port = match var("APP_PORT") {
            Some(p) => p.parse::<u16>().with_context(|| format!("invalid APP_PORT {p:?}"))?,
            None => 8080,
        };

        Ok(Self {
            database,
            jwt,
            cors_origin,
            host: var("APP_HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port,
        })
    }
}
