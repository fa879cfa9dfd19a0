//! Server configuration from environment variables.
//!
//! | Variable | Default |
//! |---|---|
//! | `HOST` | `127.0.0.1` |
//! | `PORT` | `8000` |
//! | `TODO_DESCRIPTION_REQUIRED` | `false` |
//! | `TODO_TITLE_MAX_LENGTH` | `120` (`0` disables) |
//! | `CORS_ALLOWED_ORIGINS` | unset or `*`, any origin allowed |

use anyhow::{bail, Context, Result};
use todo_serializer::{DescriptionPolicy, TodoSchema};

/// Which origins browsers may call the API from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CorsConfig {
    #[default]
    AllowAll,
    AllowOrigins(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub schema: TodoSchema,
    pub cors: CorsConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
            schema: TodoSchema::default(),
            cors: CorsConfig::default(),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup, so tests need not touch the
    /// process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(host) = lookup("HOST") {
            config.host = host;
        }
        if let Some(port) = lookup("PORT") {
            config.port = port
                .trim()
                .parse()
                .with_context(|| format!("invalid PORT {port:?}"))?;
        }
        if let Some(flag) = lookup("TODO_DESCRIPTION_REQUIRED") {
            if parse_flag(&flag)? {
                config.schema.description = DescriptionPolicy::Required;
            }
        }
        if let Some(max) = lookup("TODO_TITLE_MAX_LENGTH") {
            let max: usize = max
                .trim()
                .parse()
                .with_context(|| format!("invalid TODO_TITLE_MAX_LENGTH {max:?}"))?;
            config.schema.title_max_length = (max > 0).then_some(max);
        }
        if let Some(origins) = lookup("CORS_ALLOWED_ORIGINS") {
            let origins: Vec<String> = origins
                .split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(str::to_string)
                .collect();
            if origins.iter().any(|o| o == "*") {
                config.cors = CorsConfig::AllowAll;
            } else if !origins.is_empty() {
                config.cors = CorsConfig::AllowOrigins(origins);
            }
        }

        Ok(config)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_flag(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => bail!("invalid boolean flag {other:?}"),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(pairs: &[(&str, &str)]) -> Result<ServerConfig> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn defaults_when_env_is_empty() {
        let config = load(&[]).unwrap();
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.bind_addr(), "127.0.0.1:8000");
    }

    #[test]
    fn reads_host_and_port() {
        let config = load(&[("HOST", "0.0.0.0"), ("PORT", "3000")]).unwrap();
        assert_eq!(config.bind_addr(), "0.0.0.0:3000");
    }

    #[test]
    fn invalid_port_is_an_error() {
        let err = load(&[("PORT", "eighty")]).unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }

    #[test]
    fn description_required_flag() {
        let config = load(&[("TODO_DESCRIPTION_REQUIRED", "yes")]).unwrap();
        assert_eq!(config.schema.description, DescriptionPolicy::Required);

        let config = load(&[("TODO_DESCRIPTION_REQUIRED", "0")]).unwrap();
        assert_eq!(config.schema.description, DescriptionPolicy::default());

        assert!(load(&[("TODO_DESCRIPTION_REQUIRED", "maybe")]).is_err());
    }

    #[test]
    fn zero_title_length_disables_limit() {
        let config = load(&[("TODO_TITLE_MAX_LENGTH", "0")]).unwrap();
        assert_eq!(config.schema.title_max_length, None);
        let config = load(&[("TODO_TITLE_MAX_LENGTH", "64")]).unwrap();
        assert_eq!(config.schema.title_max_length, Some(64));
    }

    #[test]
    fn cors_origins_are_split_and_trimmed() {
        let config = load(&[(
            "CORS_ALLOWED_ORIGINS",
            "http://localhost:3000, http://localhost:5173,",
        )])
        .unwrap();
        assert_eq!(
            config.cors,
            CorsConfig::AllowOrigins(vec![
                "http://localhost:3000".to_string(),
                "http://localhost:5173".to_string(),
            ])
        );
    }

    #[test]
    fn wildcard_cors_origin_allows_all() {
        let config = load(&[("CORS_ALLOWED_ORIGINS", "*")]).unwrap();
        assert_eq!(config.cors, CorsConfig::AllowAll);
        let config = load(&[("CORS_ALLOWED_ORIGINS", "http://localhost:3000, *")]).unwrap();
        assert_eq!(config.cors, CorsConfig::AllowAll);
    }
}
