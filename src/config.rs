use std::env;
use std::fmt::Display;
use std::ops::RangeInclusive;

use crate::auth::OwnershipPolicy;
use crate::error::AppError;

/// Session tokens live between one hour and one year.
const TOKEN_TTL_HOURS: RangeInclusive<i64> = 1..=24 * 366;
/// bcrypt refuses any cost outside this range.
const BCRYPT_COST: RangeInclusive<u32> = 4..=31;

pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub jwt_secret: String,
    pub token_ttl_hours: i64,
    pub bcrypt_cost: u32,
    pub ownership_policy: OwnershipPolicy,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from any key/value source; `lookup` returns `None` for unset keys.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let jwt_secret = lookup("JWT_SECRET")
            .filter(|secret| !secret.is_empty())
            .ok_or_else(|| AppError::InternalServerError("JWT_SECRET must be set".into()))?;

        Ok(Self {
            server_host: lookup("SERVER_HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            server_port: parse_or(&lookup, "SERVER_PORT", 8080)?,
            jwt_secret,
            token_ttl_hours: in_range(
                "TOKEN_TTL_HOURS",
                parse_or(&lookup, "TOKEN_TTL_HOURS", 24)?,
                TOKEN_TTL_HOURS,
            )?,
            bcrypt_cost: in_range(
                "BCRYPT_COST",
                parse_or(&lookup, "BCRYPT_COST", bcrypt::DEFAULT_COST)?,
                BCRYPT_COST,
            )?,
            ownership_policy: match lookup("OWNERSHIP_POLICY") {
                Some(value) => value.parse()?,
                None => OwnershipPolicy::default(),
            },
        })
    }

    pub fn server_url(&self) -> String {
        format!("http://{}:{}", self.server_host, self.server_port)
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, AppError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| AppError::InternalServerError(format!("{} must be a number, got '{}'", key, raw))),
        None => Ok(default),
    }
}

fn in_range<T>(key: &str, value: T, range: RangeInclusive<T>) -> Result<T, AppError>
where
    T: PartialOrd + Display,
{
    if range.contains(&value) {
        Ok(value)
    } else {
        Err(AppError::InternalServerError(format!(
            "{} must be between {} and {}, got {}",
            key,
            range.start(),
            range.end(),
            value
        )))
    }
}
