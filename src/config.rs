use std::time::Duration;

use crate::errors::AppError;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: Option<String>,
    pub in_memory: bool,
    pub port: u16,
    pub allowed_origins: Vec<String>,
    pub rate_limit_per_minute: u32,
    pub max_connections: u32,
    pub seed_database: bool,
    pub request_timeout: Duration,
}

impl Config {
    pub fn from_env(default_port: u16) -> Result<Self, AppError> {
        Self::from_lookup(default_port, |key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(default_port: u16, lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let in_memory = parse_flag(&lookup, "IN_MEMORY")?;
        let database_url = lookup("DATABASE_URL").filter(|url| !url.trim().is_empty());

        if database_url.is_none() && !in_memory {
            return Err(AppError::EnvError(
                "DATABASE_URL must be set unless IN_MEMORY=true".into(),
            ));
        }

        let allowed_origins = lookup("ALLOWED_ORIGINS")
            .unwrap_or_else(|| "http://localhost:3000".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let rate_limit_per_minute = parse_number(&lookup, "RATE_LIMIT_PER_MINUTE", 1000)?;
        if rate_limit_per_minute == 0 {
            return Err(AppError::EnvError(
                "RATE_LIMIT_PER_MINUTE must be greater than zero".into(),
            ));
        }

        let max_connections = parse_number(&lookup, "DATABASE_MAX_CONNECTIONS", 5)?;
        if max_connections == 0 {
            return Err(AppError::EnvError(
                "DATABASE_MAX_CONNECTIONS must be greater than zero".into(),
            ));
        }

        let request_timeout_secs = parse_number(&lookup, "REQUEST_TIMEOUT_SECS", 10)?;
        if request_timeout_secs == 0 {
            return Err(AppError::EnvError(
                "REQUEST_TIMEOUT_SECS must be greater than zero".into(),
            ));
        }

        Ok(Config {
            database_url,
            in_memory,
            port: parse_number(&lookup, "PORT", default_port)?,
            allowed_origins,
            rate_limit_per_minute,
            max_connections,
            seed_database: parse_flag(&lookup, "SEED_DATABASE")?,
            request_timeout: Duration::from_secs(request_timeout_secs),
        })
    }
}

fn parse_number<F, T>(lookup: &F, key: &str, default: T) -> Result<T, AppError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| AppError::EnvError(format!("{} must be a number, got '{}'", key, raw))),
        None => Ok(default),
    }
}

fn parse_flag<F>(lookup: &F, key: &str) -> Result<bool, AppError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key).map(|v| v.trim().to_lowercase()) {
        None => Ok(false),
        Some(v) if v.is_empty() || v == "false" || v == "0" || v == "no" => Ok(false),
        Some(v) if v == "true" || v == "1" || v == "yes" => Ok(true),
        Some(v) => Err(AppError::EnvError(format!(
            "{} must be true or false, got '{}'",
            key, v
        ))),
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
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config =
            Config::from_lookup(3002, lookup_from(&[("DATABASE_URL", "postgres://x")])).unwrap();

        assert_eq!(config.port, 3002);
        assert_eq!(config.database_url.as_deref(), Some("postgres://x"));
        assert_eq!(config.allowed_origins, vec!["http://localhost:3000"]);
        assert_eq!(config.rate_limit_per_minute, 1000);
        assert_eq!(config.max_connections, 5);
        assert_eq!(config.request_timeout, Duration::from_secs(10));
        assert!(!config.in_memory);
        assert!(!config.seed_database);
    }

    #[test]
    fn test_database_url_required_unless_in_memory() {
        assert!(matches!(
            Config::from_lookup(3001, lookup_from(&[])),
            Err(AppError::EnvError(_))
        ));

        let config = Config::from_lookup(3001, lookup_from(&[("IN_MEMORY", "true")])).unwrap();
        assert!(config.in_memory);
        assert!(config.database_url.is_none());
    }

    #[test]
    fn test_overrides_and_origins() {
        let config = Config::from_lookup(
            3001,
            lookup_from(&[
                ("DATABASE_URL", "postgres://x"),
                ("PORT", "8080"),
                ("ALLOWED_ORIGINS", "http://a.test, http://b.test,"),
                ("SEED_DATABASE", "1"),
                ("REQUEST_TIMEOUT_SECS", "3"),
            ]),
        )
        .unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.allowed_origins, vec!["http://a.test", "http://b.test"]);
        assert!(config.seed_database);
        assert_eq!(config.request_timeout, Duration::from_secs(3));
    }

    #[test]
    fn test_malformed_values() {
        let bad_port = Config::from_lookup(
            3001,
            lookup_from(&[("DATABASE_URL", "postgres://x"), ("PORT", "eighty")]),
        );
        assert!(matches!(bad_port, Err(AppError::EnvError(msg)) if msg.contains("PORT")));

        let zero_quota = Config::from_lookup(
            3001,
            lookup_from(&[
                ("DATABASE_URL", "postgres://x"),
                ("RATE_LIMIT_PER_MINUTE", "0"),
            ]),
        );
        assert!(matches!(zero_quota, Err(AppError::EnvError(_))));

        let bad_flag = Config::from_lookup(3001, lookup_from(&[("IN_MEMORY", "maybe")]));
        assert!(matches!(bad_flag, Err(AppError::EnvError(_))));
    }

    #[test]
    fn test_zero_timeout_and_pool_rejected() {
        let zero_timeout = Config::from_lookup(
            3001,
            lookup_from(&[("IN_MEMORY", "true"), ("REQUEST_TIMEOUT_SECS", "0")]),
        );
        assert!(
            matches!(zero_timeout, Err(AppError::EnvError(msg)) if msg.contains("REQUEST_TIMEOUT_SECS"))
        );

        let zero_pool = Config::from_lookup(
            3001,
            lookup_from(&[
                ("DATABASE_URL", "postgres://x"),
                ("DATABASE_MAX_CONNECTIONS", "0"),
            ]),
        );
        assert!(
            matches!(zero_pool, Err(AppError::EnvError(msg)) if msg.contains("DATABASE_MAX_CONNECTIONS"))
        );
    }
}
