pub mod toml_config;

use crate::adapters::sheet::{DEFAULT_EMAIL_COLUMN, DEFAULT_NAME_COLUMN, DEFAULT_PHONE_COLUMN};
use crate::adapters::sms_chef::{DEFAULT_GATEWAY_URL, DEFAULT_MODE};
use crate::core::derangement::DrawStrategy;
use crate::core::message::{MessageTemplate, DEFAULT_COUNTRY_CODE};
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use std::time::Duration;

#[cfg(feature = "cli")]
use clap::Parser;

#[derive(Debug, Clone)]
#[cfg_attr(feature = "cli", derive(Parser))]
#[cfg_attr(feature = "cli", command(name = "amigo-secreto"))]
#[cfg_attr(
    feature = "cli",
    command(about = "Draw Secret Santa pairs from a spreadsheet and text everyone their match")
)]
pub struct CliConfig {
    /// CSV export URL of the participant sheet, or a local CSV file
    #[cfg_attr(feature = "cli", arg(long, env = "SORTEO_SOURCE"))]
    pub source: String,

    /// SMS Chef API secret
    #[cfg_attr(feature = "cli", arg(long, env = "SMS_CHEF_API_KEY", hide_env_values = true))]
    pub api_key: Option<String>,

    #[cfg_attr(feature = "cli", arg(long, default_value = DEFAULT_GATEWAY_URL))]
    pub gateway_url: String,

    #[cfg_attr(feature = "cli", arg(long, default_value = DEFAULT_MODE))]
    pub mode: String,

    #[cfg_attr(feature = "cli", arg(long, default_value = "1"))]
    pub sim: u8,

    /// Calling code prepended to local phone numbers
    #[cfg_attr(feature = "cli", arg(long, default_value = DEFAULT_COUNTRY_CODE))]
    pub country_code: String,

    #[cfg_attr(feature = "cli", arg(long, default_value = "10"))]
    pub timeout_seconds: u64,

    /// Message text; {giver} and {recipient} are replaced per participant
    #[cfg_attr(feature = "cli", arg(long))]
    pub template: Option<String>,

    #[cfg_attr(feature = "cli", arg(long, default_value = DEFAULT_NAME_COLUMN))]
    pub name_column: String,

    #[cfg_attr(feature = "cli", arg(long, default_value = DEFAULT_PHONE_COLUMN))]
    pub phone_column: String,

    #[cfg_attr(feature = "cli", arg(long, default_value = DEFAULT_EMAIL_COLUMN))]
    pub email_column: String,

    #[cfg_attr(feature = "cli", arg(long, value_enum, default_value_t = DrawStrategy::Uniform))]
    pub strategy: DrawStrategy,

    /// Draw and log who would be texted, without sending anything
    #[cfg_attr(feature = "cli", arg(long))]
    pub dry_run: bool,

    #[cfg_attr(feature = "cli", arg(long, help = "Enable verbose output"))]
    pub verbose: bool,

    #[cfg_attr(feature = "cli", arg(long, help = "Emit logs as JSON lines"))]
    pub log_json: bool,
}

impl ConfigProvider for CliConfig {
    fn source(&self) -> &str {
        &self.source
    }

    fn name_column(&self) -> &str {
        &self.name_column
    }

    fn phone_column(&self) -> &str {
        &self.phone_column
    }

    fn email_column(&self) -> &str {
        &self.email_column
    }

    fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    fn gateway_url(&self) -> &str {
        &self.gateway_url
    }

    fn sms_mode(&self) -> &str {
        &self.mode
    }

    fn sim(&self) -> u8 {
        self.sim
    }

    fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    fn country_code(&self) -> &str {
        &self.country_code
    }

    fn template(&self) -> Option<&str> {
        self.template.as_deref()
    }

    fn strategy(&self) -> DrawStrategy {
        self.strategy
    }

    fn dry_run(&self) -> bool {
        self.dry_run
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_provider(self)
    }
}

/// Checks shared by every configuration front end.
pub fn validate_provider<C: ConfigProvider + ?Sized>(config: &C) -> Result<()> {
    validation::validate_source("source", config.source())?;
    validation::validate_non_empty_string("name_column", config.name_column())?;
    validation::validate_non_empty_string("phone_column", config.phone_column())?;
    validation::validate_digits("country_code", config.country_code())?;
    validation::validate_range("timeout_seconds", config.timeout().as_secs(), 1, 300)?;

    if let Some(template) = config.template() {
        MessageTemplate::new(template)?;
    }

    if config.dry_run() {
        return Ok(());
    }

    let api_key = config.api_key();
    let api_key = validation::validate_required_field("api_key", &api_key)?;
    validation::validate_non_empty_string("api_key", api_key)?;
    validation::validate_url("gateway_url", config.gateway_url())?;
    validation::validate_non_empty_string("mode", config.sms_mode())?;
    validation::validate_range("sim", config.sim(), 1, 2)?;

    Ok(())
}
