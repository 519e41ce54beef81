use anyhow::{bail, Context};

/// Upper bound for `JWT_TTL_MINUTES`: one year.
pub const MAX_TTL_MINUTES: i64 = 60 * 24 * 365;

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub ttl_minutes: i64,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub host: String,
    pub port: u16,
    pub jwt: JwtConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup. `from_env` passes the
    /// process environment; tests pass a map.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").context("DATABASE_URL must be set")?;

        let secret = lookup("JWT_SECRET").context("JWT_SECRET must be set")?;
        if secret.trim().is_empty() {
            bail!("JWT_SECRET must not be empty");
        }

        let ttl_minutes = parse_or(&lookup, "JWT_TTL_MINUTES", 60 * 24 * 7)?;
        if !(1..=MAX_TTL_MINUTES).contains(&ttl_minutes) {
            bail!("JWT_TTL_MINUTES must be between 1 and {MAX_TTL_MINUTES}, got {ttl_minutes}");
        }

        let jwt = JwtConfig {
            secret,
            issuer: lookup("JWT_ISSUER").unwrap_or_else(|| "taskdesk".into()),
            audience: lookup("JWT_AUDIENCE").unwrap_or_else(|| "taskdesk-users".into()),
            ttl_minutes,
        };

        Ok(Self {
            database_url,
            max_connections: parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", 10)?,
            host: lookup("APP_HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port: parse_or(&lookup, "APP_PORT", 8080)?,
            jwt,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> anyhow::Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} has an invalid value: {raw:?}")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_fill_optional_values() {
        let cfg = AppConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/taskdesk"),
            ("JWT_SECRET", "s3cret"),
        ]))
        .expect("config should load");

        assert_eq!(cfg.max_connections, 10);
        assert_eq!(cfg.bind_addr(), "0.0.0.0:8080");
        assert_eq!(cfg.jwt.issuer, "taskdesk");
        assert_eq!(cfg.jwt.audience, "taskdesk-users");
        assert_eq!(cfg.jwt.ttl_minutes, 60 * 24 * 7);
    }

    #[test]
    fn missing_secret_is_fatal() {
        let err = AppConfig::from_lookup(lookup_from(&[(
            "DATABASE_URL",
            "postgres://localhost/taskdesk",
        )]))
        .unwrap_err();
        assert!(err.to_string().contains("JWT_SECRET"));
    }

    #[test]
    fn blank_secret_is_fatal() {
        let err = AppConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/taskdesk"),
            ("JWT_SECRET", "   "),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("JWT_SECRET"));
    }

    #[test]
    fn rejects_unparsable_port() {
        let err = AppConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/taskdesk"),
            ("JWT_SECRET", "s3cret"),
            ("APP_PORT", "eighty"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("APP_PORT"));
    }

    #[test]
    fn ttl_outside_bounds_is_rejected() {
        for ttl in ["0", "-5", "525601", "10000000000", "9223372036854775807"] {
            let err = AppConfig::from_lookup(lookup_from(&[
                ("DATABASE_URL", "postgres://localhost/taskdesk"),
                ("JWT_SECRET", "s3cret"),
                ("JWT_TTL_MINUTES", ttl),
            ]))
            .unwrap_err();
            assert!(err.to_string().contains("JWT_TTL_MINUTES"), "ttl {ttl}: {err}");
        }
    }

    #[test]
    fn ttl_upper_bound_is_accepted() {
        let cfg = AppConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/taskdesk"),
            ("JWT_SECRET", "s3cret"),
            ("JWT_TTL_MINUTES", "525600"),
        ]))
        .expect("config should load");
        assert_eq!(cfg.jwt.ttl_minutes, MAX_TTL_MINUTES);
    }

    #[test]
    fn overrides_are_applied() {
        let cfg = AppConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/taskdesk"),
            ("JWT_SECRET", "s3cret"),
            ("APP_HOST", "127.0.0.1"),
            ("APP_PORT", "5000"),
            ("JWT_TTL_MINUTES", "15"),
        ]))
        .expect("config should load");

        assert_eq!(cfg.bind_addr(), "127.0.0.1:5000");
        assert_eq!(cfg.jwt.ttl_minutes, 15);
    }
}
