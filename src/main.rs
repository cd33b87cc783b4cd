use amigo_secreto::utils::error::ErrorSeverity;
use amigo_secreto::utils::{logger, validation::Validate};
use amigo_secreto::{build_engine, CliConfig};
use clap::Parser;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // A missing .env is fine; the variables may come from the shell.
    dotenvy::dotenv().ok();

    let config = CliConfig::parse();

    if config.log_json {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting amigo-secreto");
    tracing::debug!(
        "Source: {}, strategy: {:?}, dry run: {}",
        config.source,
        config.strategy,
        config.dry_run
    );

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let engine = build_engine(&config)?;

    match engine.run().await {
        Ok(report) => {
            println!(
                "🎁 Sorteo completed: {} participants, {} sent, {} failed, {} skipped",
                report.participants,
                report.sent(),
                report.failed(),
                report.skipped()
            );
            if report.failed() > 0 {
                for delivery in &report.deliveries {
                    if let amigo_secreto::DeliveryStatus::Failed(reason) = &delivery.status {
                        eprintln!("❌ {} ({}): {}", delivery.giver, delivery.phone, reason);
                    }
                }
                std::process::exit(2);
            }
        }
        Err(e) => {
            tracing::error!(
                "❌ Sorteo failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}
