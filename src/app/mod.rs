// Application layer: wires a configuration front end to the concrete adapters.

use crate::adapters::{SheetColumns, SheetSource, SmsChefSender, SmsGatewayConfig};
use crate::core::message::MessageTemplate;
use crate::core::sorteo::SorteoEngine;
use crate::core::ConfigProvider;
use crate::utils::error::Result;

pub type SheetSorteo = SorteoEngine<SheetSource, SmsChefSender>;

pub fn build_engine<C: ConfigProvider + ?Sized>(config: &C) -> Result<SheetSorteo> {
    let columns = SheetColumns {
        name: config.name_column().to_string(),
        phone: config.phone_column().to_string(),
        email: config.email_column().to_string(),
    };
    let source = SheetSource::new(config.source(), columns, config.timeout())?;

    let gateway = SmsGatewayConfig {
        base_url: config.gateway_url().to_string(),
        // Dry runs never reach the gateway, so they may go without a key.
        secret: config.api_key().unwrap_or_default().to_string(),
        mode: config.sms_mode().to_string(),
        sim: config.sim(),
        timeout: config.timeout(),
    };
    let sender = SmsChefSender::new(gateway)?;

    let template = match config.template() {
        Some(text) => MessageTemplate::new(text)?,
        None => MessageTemplate::default(),
    };

    Ok(SorteoEngine::new(source, sender)
        .with_template(template)
        .with_country_code(config.country_code())
        .with_strategy(config.strategy())
        .with_dry_run(config.dry_run()))
}
