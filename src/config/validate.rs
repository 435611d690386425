use anyhow::{Result, bail};

use super::AppConfig;

const MIN_HASH_MEMORY_KIB: u32 = 8;

pub fn validate(cfg: &AppConfig) -> Result<()> {
    let mut errors: Vec<String> = Vec::new();

    if cfg.general.host.trim().is_empty() {
        errors.push("general.host must not be empty".to_string());
    }

    if let Some(database) = cfg.database.as_ref() {
        if database.url.trim().is_empty() {
            errors.push("database.url must not be empty".to_string());
        }

        if database.max_connections == 0 {
            errors.push("database.max_connections must be > 0".to_string());
        }

        if database.min_idle > database.max_connections {
            errors.push(format!(
                "database.min_idle ({}) must be <= database.max_connections ({})",
                database.min_idle, database.max_connections
            ));
        }
    }

    if let Some(auth) = cfg.auth.as_ref() {
        if auth.jwt_secret.trim().is_empty() {
            errors.push("auth.jwt_secret must not be empty".to_string());
        }

        if auth.token_ttl_secs == 0 {
            errors.push("auth.token_ttl_secs must be > 0".to_string());
        }

        if auth.password_hash_memory_kib < MIN_HASH_MEMORY_KIB {
            errors.push(format!(
                "auth.password_hash_memory_kib must be >= {MIN_HASH_MEMORY_KIB}"
            ));
        }

        if auth.password_hash_iterations == 0 {
            errors.push("auth.password_hash_iterations must be > 0".to_string());
        }
    }

    if errors.is_empty() {
        return Ok(());
    }

    bail!("invalid app config:\n- {}", errors.join("\n- "))
}

#[cfg(test)]
mod tests {
    use super::validate;
    use crate::config::{AppConfig, AuthConfig, DatabaseConfig};

    #[test]
    fn default_config_is_valid() {
        validate(&AppConfig::default()).expect("defaults should validate");
    }

    #[test]
    fn reports_every_problem_at_once() {
        let mut cfg = AppConfig::default();
        cfg.general.host = "  ".to_string();
        cfg.database = Some(DatabaseConfig {
            url: String::new(),
            max_connections: 2,
            min_idle: 5,
        });
        let mut auth = AuthConfig::with_secret("");
        auth.token_ttl_secs = 0;
        cfg.auth = Some(auth);

        let message = validate(&cfg).expect_err("config should be rejected").to_string();

        assert!(message.contains("general.host must not be empty"));
        assert!(message.contains("database.url must not be empty"));
        assert!(message.contains("database.min_idle (5) must be <= database.max_connections (2)"));
        assert!(message.contains("auth.jwt_secret must not be empty"));
        assert!(message.contains("auth.token_ttl_secs must be > 0"));
    }
}
