use amigo_secreto::core::ConfigProvider;
use amigo_secreto::utils::{logger, validation::Validate};
use amigo_secreto::{build_engine, DeliveryStatus, TomlConfig};
use anyhow::Context;
use clap::Parser;

#[derive(Parser)]
#[command(name = "toml-sorteo")]
#[command(about = "Secret Santa drawing driven by a TOML configuration file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "sorteo.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Force a dry run regardless of the config file
    #[arg(long)]
    dry_run: bool,

    /// Print the final report as JSON
    #[arg(long)]
    json: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    log_json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    if args.log_json {
        logger::init_json_logger(args.verbose);
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::info!("🚀 Starting TOML-based sorteo");
    tracing::info!("📁 Loading configuration from: {}", args.config);

    let mut config = TomlConfig::from_file(&args.config)
        .with_context(|| format!("failed to load config file '{}'", args.config))?;

    if args.dry_run {
        config.set_dry_run(true);
        tracing::info!("🔧 Dry run forced from the command line");
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    display_config_summary(&config);

    let engine = build_engine(&config).context("failed to set up the sorteo")?;
    let report = engine.run().await.context("sorteo failed")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!(
            "🎁 {}: {} participants, {} sent, {} failed, {} skipped",
            config.name(),
            report.participants,
            report.sent(),
            report.failed(),
            report.skipped()
        );
    }

    let failed: Vec<_> = report
        .deliveries
        .iter()
        .filter(|d| matches!(d.status, DeliveryStatus::Failed(_)))
        .map(|d| d.giver.as_str())
        .collect();
    if !failed.is_empty() {
        anyhow::bail!("could not notify: {}", failed.join(", "));
    }

    Ok(())
}

fn display_config_summary(config: &TomlConfig) {
    tracing::info!("📋 Configuration Summary:");
    tracing::info!("  Sorteo: {}", config.name());
    tracing::info!("  Source: {}", config.source());
    tracing::info!(
        "  Columns: {} / {} / {}",
        config.name_column(),
        config.phone_column(),
        config.email_column()
    );
    tracing::info!("  Gateway: {} (mode {}, sim {})", config.gateway_url(), config.sms_mode(), config.sim());
    tracing::info!("  Country code: {}", config.country_code());
    tracing::info!("  Strategy: {:?}", config.strategy());
    tracing::info!("  Dry run: {}", config.dry_run());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_log_flags() {
        let args = Args::try_parse_from(["toml-sorteo", "--log-json", "-v"]).unwrap();
        assert!(args.log_json);
        assert!(args.verbose);
        assert_eq!(args.config, "sorteo.toml");

        let args = Args::try_parse_from(["toml-sorteo", "-c", "navidad.toml"]).unwrap();
        assert!(!args.log_json);
        assert_eq!(args.config, "navidad.toml");
    }
}
