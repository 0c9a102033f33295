// src/config.rs

use std::{env, str::FromStr};

use anyhow::{bail, Context};

use crate::planning::PlanningDefaults;

/// Process configuration, read from the environment (and `.env`).
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub max_connections: u32,
    pub run_migrations: bool,
    pub planning: PlanningDefaults,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .filter(|s| !s.trim().is_empty())
            .context("DATABASE_URL must be set in the environment or .env")?;

        let defaults = PlanningDefaults::default();
        let planning = PlanningDefaults {
            shrinkage_percent: parse_or(&lookup, "DEFAULT_SHRINKAGE_PERCENT", defaults.shrinkage_percent)?,
            fault_rate_percent: parse_or(&lookup, "DEFAULT_FAULT_RATE_PERCENT", defaults.fault_rate_percent)?,
            mechanic_capacity: parse_or(&lookup, "DEFAULT_MECHANIC_CAPACITY", defaults.mechanic_capacity)?,
        };
        if !(0.0..100.0).contains(&planning.shrinkage_percent) {
            bail!("DEFAULT_SHRINKAGE_PERCENT must be in [0, 100), got {}", planning.shrinkage_percent);
        }
        if planning.mechanic_capacity <= 0.0 {
            bail!("DEFAULT_MECHANIC_CAPACITY must be positive, got {}", planning.mechanic_capacity);
        }

        Ok(Self {
            database_url,
            port: parse_or(&lookup, "PORT", 8080)?,
            max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", 10)?,
            run_migrations: parse_or(&lookup, "RUN_MIGRATIONS", true)?,
            planning,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> anyhow::Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map_err(|e| anyhow::anyhow!("invalid {key}='{raw}': {e}")),
        _ => Ok(default),
    }
}
