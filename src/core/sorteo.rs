use crate::core::derangement::{draw_with_rng, DrawStrategy};
use crate::core::message::{format_phone, MessageTemplate, DEFAULT_COUNTRY_CODE};
use crate::domain::model::{Delivery, DeliveryStatus, Participant, SorteoReport};
use crate::domain::ports::{MessageSender, ParticipantSource};
use crate::utils::error::Result;

pub struct SorteoEngine<S: ParticipantSource, M: MessageSender> {
    source: S,
    sender: M,
    template: MessageTemplate,
    country_code: String,
    strategy: DrawStrategy,
    dry_run: bool,
}

impl<S: ParticipantSource, M: MessageSender> SorteoEngine<S, M> {
    pub fn new(source: S, sender: M) -> Self {
        Self {
            source,
            sender,
            template: MessageTemplate::default(),
            country_code: DEFAULT_COUNTRY_CODE.to_string(),
            strategy: DrawStrategy::default(),
            dry_run: false,
        }
    }

    pub fn with_template(mut self, template: MessageTemplate) -> Self {
        self.template = template;
        self
    }

    pub fn with_country_code(mut self, country_code: impl Into<String>) -> Self {
        self.country_code = country_code.into();
        self
    }

    pub fn with_strategy(mut self, strategy: DrawStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub async fn run(&self) -> Result<SorteoReport> {
        tracing::info!("Starting sorteo...");

        let participants = self.source.fetch().await?;
        tracing::info!("📋 {} participants loaded", participants.len());
        for p in &participants {
            tracing::info!("  • {} ({})", p.name, p.phone);
        }

        let names: Vec<String> = participants.iter().map(|p| p.name.clone()).collect();
        let draw = draw_with_rng(&names, self.strategy, &mut rand::rng())?;
        tracing::info!(
            "🎲 Drawing done with {:?} strategy in {} attempt(s)",
            self.strategy,
            draw.attempts
        );

        let mut deliveries = Vec::with_capacity(participants.len());
        for participant in &participants {
            // Every name is a key: the assignment was drawn from exactly these names.
            let Some(recipient) = draw.assignment.get(&participant.name) else {
                continue;
            };
            deliveries.push(self.notify(participant, recipient).await);
        }

        let report = SorteoReport {
            drawn_at: chrono::Utc::now(),
            participants: participants.len(),
            attempts: draw.attempts,
            deliveries,
        };

        tracing::info!(
            "📨 Sorteo finished: {} sent, {} failed, {} skipped",
            report.sent(),
            report.failed(),
            report.skipped()
        );

        Ok(report)
    }

    async fn notify(&self, participant: &Participant, recipient: &str) -> Delivery {
        let mut delivery = Delivery {
            giver: participant.name.clone(),
            phone: participant.phone.clone(),
            status: DeliveryStatus::Skipped,
        };

        let destination = match format_phone(&self.country_code, &participant.phone) {
            Ok(destination) => destination,
            Err(e) => {
                tracing::warn!("⚠️ Not notifying {}: {}", participant.name, e);
                delivery.status = DeliveryStatus::Failed(e.to_string());
                return delivery;
            }
        };
        delivery.phone = destination.clone();

        if self.dry_run {
            tracing::info!("🔍 [dry run] would text {} at {}", participant.name, destination);
            return delivery;
        }

        let text = self.template.render(&participant.name, recipient);
        match self.sender.send_message(&destination, &text).await {
            Ok(receipt) => {
                tracing::info!("✅ Sent to {} (HTTP {})", participant.name, receipt.status);
                delivery.status = DeliveryStatus::Sent;
            }
            Err(e) => {
                tracing::error!("❌ Could not notify {}: {}", participant.name, e);
                delivery.status = DeliveryStatus::Failed(e.to_string());
            }
        }

        delivery
    }
}
