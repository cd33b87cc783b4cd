use crate::adapters::sheet::{DEFAULT_EMAIL_COLUMN, DEFAULT_NAME_COLUMN, DEFAULT_PHONE_COLUMN};
use crate::adapters::sms_chef::{DEFAULT_GATEWAY_URL, DEFAULT_MODE, DEFAULT_SIM};
use crate::core::derangement::DrawStrategy;
use crate::core::message::DEFAULT_COUNTRY_CODE;
use crate::core::ConfigProvider;
use crate::utils::error::{Result, SorteoError};
use crate::utils::validation::Validate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub sorteo: SorteoSection,
    pub source: SourceConfig,
    pub sms: Option<SmsConfig>,
    pub message: Option<MessageConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SorteoSection {
    pub name: String,
    pub strategy: Option<DrawStrategy>,
    pub dry_run: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub location: String,
    pub name_column: Option<String>,
    pub phone_column: Option<String>,
    pub email_column: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmsConfig {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub mode: Option<String>,
    pub sim: Option<u8>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageConfig {
    pub template: Option<String>,
    pub country_code: Option<String>,
}

fn env_var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("static regex"))
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// `${VAR}` references are replaced with the environment value before
    /// parsing; unknown variables are left as written.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed = Self::substitute_env_vars(content);

        toml::from_str(&processed).map_err(|e| SorteoError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    fn substitute_env_vars(content: &str) -> String {
        env_var_pattern()
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn name(&self) -> &str {
        &self.sorteo.name
    }

    pub fn set_dry_run(&mut self, dry_run: bool) {
        self.sorteo.dry_run = Some(dry_run);
    }
}

impl ConfigProvider for TomlConfig {
    fn source(&self) -> &str {
        &self.source.location
    }

    fn name_column(&self) -> &str {
        self.source.name_column.as_deref().unwrap_or(DEFAULT_NAME_COLUMN)
    }

    fn phone_column(&self) -> &str {
        self.source.phone_column.as_deref().unwrap_or(DEFAULT_PHONE_COLUMN)
    }

    fn email_column(&self) -> &str {
        self.source.email_column.as_deref().unwrap_or(DEFAULT_EMAIL_COLUMN)
    }

    fn api_key(&self) -> Option<&str> {
        self.sms
            .as_ref()
            .and_then(|s| s.api_key.as_deref())
            // An unresolved ${VAR} is as good as no key.
            .filter(|key| !key.starts_with("${"))
    }

    fn gateway_url(&self) -> &str {
        self.sms
            .as_ref()
            .and_then(|s| s.base_url.as_deref())
            .unwrap_or(DEFAULT_GATEWAY_URL)
    }

    fn sms_mode(&self) -> &str {
        self.sms
            .as_ref()
            .and_then(|s| s.mode.as_deref())
            .unwrap_or(DEFAULT_MODE)
    }

    fn sim(&self) -> u8 {
        self.sms.as_ref().and_then(|s| s.sim).unwrap_or(DEFAULT_SIM)
    }

    fn timeout(&self) -> Duration {
        Duration::from_secs(self.source.timeout_seconds.unwrap_or(10))
    }

    fn country_code(&self) -> &str {
        self.message
            .as_ref()
            .and_then(|m| m.country_code.as_deref())
            .unwrap_or(DEFAULT_COUNTRY_CODE)
    }

    fn template(&self) -> Option<&str> {
        self.message.as_ref().and_then(|m| m.template.as_deref())
    }

    fn strategy(&self) -> DrawStrategy {
        self.sorteo.strategy.unwrap_or_default()
    }

    fn dry_run(&self) -> bool {
        self.sorteo.dry_run.unwrap_or(false)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        crate::utils::validation::validate_non_empty_string("sorteo.name", &self.sorteo.name)?;
        super::validate_provider(self)
    }
}
