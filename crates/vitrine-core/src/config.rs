use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    // Present-but-blank values count as unset.
    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        or_default(var, default)
            .parse::<SocketAddr>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        or_default(var, default)
            .parse::<usize>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let env = parse_environment(&or_default("VITRINE_ENV", "development"))?;
    let bind_addr = parse_addr("VITRINE_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("VITRINE_LOG_LEVEL", "info");

    let remote_ai_url = optional("VITRINE_REMOTE_AI_URL")
        .map(|url| url.trim_end_matches('/').to_string());
    if let Some(url) = &remote_ai_url {
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(invalid(
                "VITRINE_REMOTE_AI_URL",
                format!("'{url}' must start with http:// or https://"),
            ));
        }
    }
    let remote_ai_api_key = optional("VITRINE_REMOTE_AI_API_KEY");
    let remote_ai_timeout_secs = parse_u64("VITRINE_REMOTE_AI_TIMEOUT_SECS", "10")?;
    if remote_ai_timeout_secs == 0 {
        return Err(invalid(
            "VITRINE_REMOTE_AI_TIMEOUT_SECS",
            "must be greater than zero".to_string(),
        ));
    }

    let catalog_path = optional("VITRINE_CATALOG_PATH").map(PathBuf::from);

    let rate_limit_max_requests = parse_usize("VITRINE_RATE_LIMIT_MAX_REQUESTS", "120")?;
    if rate_limit_max_requests == 0 {
        return Err(invalid(
            "VITRINE_RATE_LIMIT_MAX_REQUESTS",
            "must be greater than zero".to_string(),
        ));
    }
    let rate_limit_window_secs = parse_u64("VITRINE_RATE_LIMIT_WINDOW_SECS", "60")?;
    if rate_limit_window_secs == 0 {
        return Err(invalid(
            "VITRINE_RATE_LIMIT_WINDOW_SECS",
            "must be greater than zero".to_string(),
        ));
    }

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        remote_ai_url,
        remote_ai_api_key,
        remote_ai_timeout_secs,
        catalog_path,
        rate_limit_max_requests,
        rate_limit_window_secs,
    })
}

fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "VITRINE_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::env::VarError;

    use super::*;

    fn lookup_from_map<'a>(
        map: &'a HashMap<&'a str, &'a str>,
    ) -> impl Fn(&str) -> Result<String, VarError> + 'a {
        move |key| {
            map.get(key)
                .map(|v| (*v).to_string())
                .ok_or(VarError::NotPresent)
        }
    }

    #[test]
    fn parse_environment_known_values() {
        assert_eq!(
            parse_environment("development").unwrap(),
            Environment::Development
        );
        assert_eq!(parse_environment("test").unwrap(), Environment::Test);
        assert_eq!(
            parse_environment("production").unwrap(),
            Environment::Production
        );
    }

    #[test]
    fn parse_environment_rejects_unknown() {
        let err = parse_environment("staging").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "VITRINE_ENV"));
    }

    #[test]
    fn build_app_config_defaults_with_empty_env() {
        let map: HashMap<&str, &str> = HashMap::new();
        let cfg = build_app_config(lookup_from_map(&map)).expect("defaults should load");
        assert_eq!(cfg.env, Environment::Development);
        assert!(cfg.is_development());
        assert_eq!(cfg.bind_addr.to_string(), "0.0.0.0:3000");
        assert_eq!(cfg.log_level, "info");
        assert!(cfg.remote_ai_url.is_none());
        assert!(cfg.remote_ai_api_key.is_none());
        assert_eq!(cfg.remote_ai_timeout_secs, 10);
        assert!(cfg.catalog_path.is_none());
        assert_eq!(cfg.rate_limit_max_requests, 120);
        assert_eq!(cfg.rate_limit_window_secs, 60);
    }

    #[test]
    fn build_app_config_fails_with_invalid_bind_addr() {
        let mut map = HashMap::new();
        map.insert("VITRINE_BIND_ADDR", "not-a-socket-addr");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "VITRINE_BIND_ADDR"),
            "expected InvalidEnvVar(VITRINE_BIND_ADDR), got: {result:?}"
        );
    }

    #[test]
    fn remote_ai_url_trailing_slash_is_trimmed() {
        let mut map = HashMap::new();
        map.insert("VITRINE_REMOTE_AI_URL", "https://ai.example.com/v1/");
        map.insert("VITRINE_REMOTE_AI_API_KEY", "secret");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(
            cfg.remote_ai_url.as_deref(),
            Some("https://ai.example.com/v1")
        );
        assert_eq!(cfg.remote_ai_api_key.as_deref(), Some("secret"));
    }

    #[test]
    fn remote_ai_url_blank_is_treated_as_unset() {
        let mut map = HashMap::new();
        map.insert("VITRINE_REMOTE_AI_URL", "   ");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert!(cfg.remote_ai_url.is_none());
    }

    #[test]
    fn remote_ai_url_without_scheme_is_rejected() {
        let mut map = HashMap::new();
        map.insert("VITRINE_REMOTE_AI_URL", "ai.example.com");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "VITRINE_REMOTE_AI_URL"),
            "got: {result:?}"
        );
    }

    #[test]
    fn remote_ai_timeout_zero_is_rejected() {
        let mut map = HashMap::new();
        map.insert("VITRINE_REMOTE_AI_TIMEOUT_SECS", "0");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "VITRINE_REMOTE_AI_TIMEOUT_SECS"),
            "got: {result:?}"
        );
    }

    #[test]
    fn rate_limit_overrides_are_parsed() {
        let mut map = HashMap::new();
        map.insert("VITRINE_RATE_LIMIT_MAX_REQUESTS", "5");
        map.insert("VITRINE_RATE_LIMIT_WINDOW_SECS", "1");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.rate_limit_max_requests, 5);
        assert_eq!(cfg.rate_limit_window_secs, 1);
    }

    #[test]
    fn rate_limit_invalid_value_is_rejected() {
        let mut map = HashMap::new();
        map.insert("VITRINE_RATE_LIMIT_MAX_REQUESTS", "lots");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "VITRINE_RATE_LIMIT_MAX_REQUESTS"),
            "got: {result:?}"
        );
    }

    #[test]
    fn rate_limit_max_requests_zero_is_rejected() {
        let mut map = HashMap::new();
        map.insert("VITRINE_RATE_LIMIT_MAX_REQUESTS", "0");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "VITRINE_RATE_LIMIT_MAX_REQUESTS"),
            "got: {result:?}"
        );
    }

    #[test]
    fn rate_limit_window_zero_is_rejected() {
        let mut map = HashMap::new();
        map.insert("VITRINE_RATE_LIMIT_WINDOW_SECS", "0");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "VITRINE_RATE_LIMIT_WINDOW_SECS"),
            "got: {result:?}"
        );
    }

    #[test]
    fn catalog_path_is_read() {
        let mut map = HashMap::new();
        map.insert("VITRINE_CATALOG_PATH", "./config/catalog.yaml");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(
            cfg.catalog_path.as_deref(),
            Some(std::path::Path::new("./config/catalog.yaml"))
        );
    }

    #[test]
    fn debug_output_redacts_api_key() {
        let mut map = HashMap::new();
        map.insert("VITRINE_REMOTE_AI_URL", "https://ai.example.com");
        map.insert("VITRINE_REMOTE_AI_API_KEY", "super-secret-key");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        let debug = format!("{cfg:?}");
        assert!(!debug.contains("super-secret-key"));
        assert!(debug.contains("[redacted]"));
    }
}
