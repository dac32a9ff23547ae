mod types;

pub use types::*;

use crate::Result;
use std::{env, io::ErrorKind};
use tracing::debug;

/// Loads `CONFIG_PATH` (default `config.yaml`) and the secrets from the
/// environment. A missing file means all defaults.
pub async fn load() -> Result<Config> {
    let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.yaml".to_string());

    let mut config = load_from_path(&config_path).await?;
    config.secrets = Secrets::from_env();

    Ok(config)
}

pub async fn load_from_path(config_path: &str) -> Result<Config> {
    debug!("Loading configuration from: {}", config_path);

    let config = match tokio::fs::read_to_string(config_path).await {
        Ok(config_str) => parse(&config_str)?,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("No configuration file at {}, using defaults", config_path);
            Config::default()
        }
        Err(e) => return Err(e.into()),
    };

    Ok(config)
}

pub fn parse(config_str: &str) -> Result<Config> {
    // An empty document deserializes to unit, not to a mapping.
    if config_str.trim().is_empty() {
        return Ok(Config::default());
    }
    Ok(serde_yaml::from_str(config_str)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults_match_upstream_contract() {
        let config = Config::default();

        assert_eq!(config.upstream.model, "Qwen/Qwen2-VL-72B-Instruct");
        assert_eq!(config.upstream.base_url, "https://api.siliconflow.cn/v1");
        assert_eq!(config.upstream.temperature, 0.7);
        assert_eq!(config.upstream.max_tokens, 256);
        assert_eq!(config.upstream.timeout_secs, 30);
        assert!(config.upstream.prompt.is_none());
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.logs.level, "info");
    }

    #[test]
    fn test_parse_partial_yaml() {
        let config = parse(
            r#"
server:
  port: 9090
upstream:
  model: "Qwen/Qwen2.5-VL-7B-Instruct"
  timeout_secs: 5
"#,
        )
        .unwrap();

        assert_eq!(config.server.port, 9090);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.upstream.model, "Qwen/Qwen2.5-VL-7B-Instruct");
        assert_eq!(config.upstream.timeout_secs, 5);
        assert_eq!(config.upstream.max_tokens, 256);
    }

    #[test]
    fn test_parse_empty_document() {
        let config = parse("\n").unwrap();
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn test_parse_rejects_bad_types() {
        let result = parse("server:\n  port: not-a-port\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_secrets_treat_empty_as_unset() {
        let secrets = Secrets::from_lookup(|name| match name {
            ACCESS_CODE_ENV => Some(String::new()),
            API_KEY_ENV => Some("sk-test".to_string()),
            _ => None,
        });

        assert!(secrets.access_code.is_none());
        assert_eq!(secrets.api_key.as_deref(), Some("sk-test"));
    }

    #[test]
    fn test_secrets_debug_is_redacted() {
        let secrets = Secrets::new(Some("hunter2".to_string()), None);
        let debug = format!("{:?}", secrets);

        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("<set>"));
        assert!(debug.contains("<unset>"));
    }
}
