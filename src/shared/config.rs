use crate::domain::value_objects::SameEntityPolicy;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub mutation: MutationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    #[serde(default)]
    pub bearer_token: Option<String>,
    /// Sent as `X-User-Role` when present.
    #[serde(default)]
    pub role: Option<String>,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MutationConfig {
    #[serde(default)]
    pub same_entity_policy: SameEntityPolicy,
    pub toast_capacity: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                base_url: "http://localhost:3000".to_string(),
                bearer_token: None,
                role: None,
                timeout_secs: 30,
            },
            mutation: MutationConfig {
                same_entity_policy: SameEntityPolicy::default(),
                toast_capacity: 32,
            },
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let mut cfg = Self::default();

        if let Ok(v) = std::env::var("TALLY_API_BASE_URL") {
            let trimmed = v.trim();
            if !trimmed.is_empty() {
                cfg.api.base_url = trimmed.trim_end_matches('/').to_string();
            }
        }
        if let Ok(v) = std::env::var("TALLY_API_TOKEN") {
            cfg.api.bearer_token = non_empty(&v);
        }
        if let Ok(v) = std::env::var("TALLY_API_ROLE") {
            cfg.api.role = non_empty(&v);
        }
        if let Ok(v) = std::env::var("TALLY_API_TIMEOUT_SECS")
            && let Some(value) = parse_u64(&v)
        {
            cfg.api.timeout_secs = value.max(1);
        }
        if let Ok(v) = std::env::var("TALLY_SAME_ENTITY_POLICY")
            && let Some(policy) = SameEntityPolicy::parse(&v)
        {
            cfg.mutation.same_entity_policy = policy;
        }
        if let Ok(v) = std::env::var("TALLY_TOAST_CAPACITY")
            && let Some(value) = parse_u64(&v)
        {
            cfg.mutation.toast_capacity = value as usize;
        }

        cfg
    }

    pub fn validate(&self) -> Result<(), String> {
        let base = self.api.base_url.trim();
        if base.is_empty() {
            return Err("API base_url must not be empty".to_string());
        }
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(format!("API base_url must be an http(s) URL: {base}"));
        }
        if self.api.timeout_secs == 0 {
            return Err("API timeout_secs must be greater than 0".to_string());
        }
        if self.mutation.toast_capacity == 0 {
            return Err("Mutation toast_capacity must be greater than 0".to_string());
        }
        Ok(())
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn parse_u64(value: &str) -> Option<u64> {
    value.trim().parse::<u64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Mutex, OnceLock};

    fn env_lock() -> std::sync::MutexGuard<'static, ()> {
        static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
        LOCK.get_or_init(|| Mutex::new(()))
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn set_env_var(key: &str, value: &str) {
        // SAFETY: tests serialize env access via a global mutex.
        unsafe { std::env::set_var(key, value) };
    }

    fn remove_env_var(key: &str) {
        // SAFETY: tests serialize env access via a global mutex.
        unsafe { std::env::remove_var(key) };
    }

    const KEYS: [&str; 6] = [
        "TALLY_API_BASE_URL",
        "TALLY_API_TOKEN",
        "TALLY_API_ROLE",
        "TALLY_API_TIMEOUT_SECS",
        "TALLY_SAME_ENTITY_POLICY",
        "TALLY_TOAST_CAPACITY",
    ];

    #[test]
    fn default_config_is_valid() {
        let cfg = AppConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.mutation.same_entity_policy, SameEntityPolicy::Reject);
    }

    #[test]
    fn from_env_applies_overrides() {
        let _guard = env_lock();
        set_env_var("TALLY_API_BASE_URL", "https://api.example.test/");
        set_env_var("TALLY_API_TOKEN", "secret");
        set_env_var("TALLY_API_ROLE", " admin ");
        set_env_var("TALLY_API_TIMEOUT_SECS", "0");
        set_env_var("TALLY_SAME_ENTITY_POLICY", "unguarded");
        set_env_var("TALLY_TOAST_CAPACITY", "5");

        let cfg = AppConfig::from_env();

        assert_eq!(cfg.api.base_url, "https://api.example.test");
        assert_eq!(cfg.api.bearer_token.as_deref(), Some("secret"));
        assert_eq!(cfg.api.role.as_deref(), Some("admin"));
        assert_eq!(cfg.api.timeout_secs, 1);
        assert_eq!(
            cfg.mutation.same_entity_policy,
            SameEntityPolicy::Unguarded
        );
        assert_eq!(cfg.mutation.toast_capacity, 5);

        for key in KEYS {
            remove_env_var(key);
        }
    }

    #[test]
    fn from_env_ignores_unparseable_values() {
        let _guard = env_lock();
        set_env_var("TALLY_API_TOKEN", "   ");
        set_env_var("TALLY_API_TIMEOUT_SECS", "soon");
        set_env_var("TALLY_SAME_ENTITY_POLICY", "sometimes");

        let cfg = AppConfig::from_env();

        assert!(cfg.api.bearer_token.is_none());
        assert_eq!(cfg.api.timeout_secs, 30);
        assert_eq!(cfg.mutation.same_entity_policy, SameEntityPolicy::Reject);

        for key in KEYS {
            remove_env_var(key);
        }
    }

    #[test]
    fn validate_rejects_non_http_base_url() {
        let mut cfg = AppConfig::default();
        cfg.api.base_url = "ftp://files".into();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_toast_capacity() {
        let mut cfg = AppConfig::default();
        cfg.mutation.toast_capacity = 0;
        assert!(cfg.validate().is_err());
    }
}
