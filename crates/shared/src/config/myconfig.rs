use anyhow::{Context, Result, anyhow};
use chrono::FixedOffset;

/// Zone the send and receive stamps are written in.
pub const DEFAULT_UTC_OFFSET: &str = "+05:30";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    Sheet,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub store_backend: StoreBackend,
    pub database_url: Option<String>,
    pub run_migrations: bool,
    pub port: u16,
    pub utc_offset: FixedOffset,
    pub log_format: LogFormat,
}

impl Config {
    pub fn init() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let store_backend = match lookup("STORE_BACKEND").as_deref() {
            None | Some("postgres") => StoreBackend::Postgres,
            Some("sheet") => StoreBackend::Sheet,
            Some(other) => {
                return Err(anyhow!(
                    "STORE_BACKEND must be 'postgres' or 'sheet', got '{}'",
                    other
                ));
            }
        };

        let database_url = lookup("DATABASE_URL");
        if store_backend == StoreBackend::Postgres && database_url.is_none() {
            return Err(anyhow!("Missing environment variable: DATABASE_URL"));
        }

        let run_migrations = match lookup("RUN_MIGRATIONS").as_deref() {
            None | Some("false") => false,
            Some("true") => true,
            Some(other) => {
                return Err(anyhow!(
                    "RUN_MIGRATIONS must be 'true' or 'false', got '{}'",
                    other
                ));
            }
        };

        let port = lookup("PORT")
            .context("Missing environment variable: PORT")?
            .parse::<u16>()
            .context("PORT must be a valid u16 integer")?;

        let offset_str =
            lookup("TRANSFER_UTC_OFFSET").unwrap_or_else(|| DEFAULT_UTC_OFFSET.to_string());
        let utc_offset = offset_str
            .parse::<FixedOffset>()
            .with_context(|| format!("TRANSFER_UTC_OFFSET is not a valid offset: '{offset_str}'"))?;

        let log_format = match lookup("LOG_FORMAT").as_deref() {
            None | Some("pretty") => LogFormat::Pretty,
            Some("json") => LogFormat::Json,
            Some(other) => {
                return Err(anyhow!(
                    "LOG_FORMAT must be 'pretty' or 'json', got '{}'",
                    other
                ));
            }
        };

        Ok(Self {
            store_backend,
            database_url,
            run_migrations,
            port,
            utc_offset,
            log_format,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn sheet_backend_does_not_need_a_database() {
        let config = config_from(&[("STORE_BACKEND", "sheet"), ("PORT", "5000")]).unwrap();

        assert_eq!(config.store_backend, StoreBackend::Sheet);
        assert_eq!(config.port, 5000);
        assert_eq!(config.utc_offset.local_minus_utc(), 19_800);
        assert!(!config.run_migrations);
    }

    #[test]
    fn postgres_backend_requires_database_url() {
        let err = config_from(&[("PORT", "5000")]).unwrap_err();
        assert!(err.to_string().contains("DATABASE_URL"));
    }

    #[test]
    fn rejects_unknown_backend() {
        assert!(config_from(&[("STORE_BACKEND", "excel"), ("PORT", "1")]).is_err());
    }

    fn offset_from(value: &str) -> Result<FixedOffset> {
        config_from(&[
            ("STORE_BACKEND", "sheet"),
            ("PORT", "5000"),
            ("TRANSFER_UTC_OFFSET", value),
        ])
        .map(|config| config.utc_offset)
    }

    #[test]
    fn parses_negative_offsets() {
        assert_eq!(offset_from("-03:00").unwrap().local_minus_utc(), -10_800);
        assert_eq!(offset_from("+05:30").unwrap().local_minus_utc(), 19_800);
        assert!(offset_from("05:30").is_err());
        assert!(offset_from("+05:75").is_err());
    }

    #[test]
    fn rejects_offsets_with_two_signs() {
        for value in ["--05:30", "+-05:30", "-+05:30", "++05:30"] {
            let err = offset_from(value).unwrap_err();
            assert!(err.to_string().contains("TRANSFER_UTC_OFFSET"), "{value}");
        }
    }
}
