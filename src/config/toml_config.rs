use crate::utils::error::{AuditError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Optional TOML profile, merged under CLI flags.
///
/// ```toml
/// [service]
/// model = "gemini-3-pro-preview"
/// api_key = "${GEMINI_API_KEY}"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub service: ServiceConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub model: Option<String>,
    pub base_url: Option<String>,
    pub api_key: Option<String>,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(AuditError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| AuditError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replace `${VAR_NAME}` references with the environment value; unknown
    /// variables are left as-is.
    fn substitute_env_vars(content: &str) -> String {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").unwrap();

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_toml_str() {
        let config = TomlConfig::from_toml_str(
            r#"
[service]
model = "gemini-3-pro-preview"
base_url = "https://proxy.internal"
"#,
        )
        .unwrap();

        assert_eq!(config.service.model.as_deref(), Some("gemini-3-pro-preview"));
        assert_eq!(config.service.base_url.as_deref(), Some("https://proxy.internal"));
        assert!(config.service.api_key.is_none());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("VISUAL_AUDIT_TEST_KEY", "secret-from-env");

        let config = TomlConfig::from_toml_str(
            r#"
[service]
api_key = "${VISUAL_AUDIT_TEST_KEY}"
"#,
        )
        .unwrap();

        assert_eq!(config.service.api_key.as_deref(), Some("secret-from-env"));
    }

    #[test]
    fn test_unknown_env_var_left_untouched() {
        let config = TomlConfig::from_toml_str(
            r#"
[service]
api_key = "${VISUAL_AUDIT_NO_SUCH_VAR}"
"#,
        )
        .unwrap();

        assert_eq!(
            config.service.api_key.as_deref(),
            Some("${VISUAL_AUDIT_NO_SUCH_VAR}")
        );
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = TomlConfig::from_toml_str("service = ").unwrap_err();
        assert!(matches!(err, AuditError::ConfigError { .. }));
    }
}
