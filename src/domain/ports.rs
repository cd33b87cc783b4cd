use crate::core::derangement::DrawStrategy;
use crate::domain::model::{Participant, SendReceipt};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Where the participant list comes from.
#[async_trait]
pub trait ParticipantSource: Send + Sync {
    async fn fetch(&self) -> Result<Vec<Participant>>;
}

/// Delivers one text message. Implementations only read what they are given.
#[async_trait]
pub trait MessageSender: Send + Sync {
    async fn send_message(&self, destination: &str, text: &str) -> Result<SendReceipt>;
}

pub trait ConfigProvider: Send + Sync {
    fn source(&self) -> &str;
    fn name_column(&self) -> &str;
    fn phone_column(&self) -> &str;
    fn email_column(&self) -> &str;
    fn api_key(&self) -> Option<&str>;
    fn gateway_url(&self) -> &str;
    fn sms_mode(&self) -> &str;
    fn sim(&self) -> u8;
    fn timeout(&self) -> Duration;
    fn country_code(&self) -> &str;
    fn template(&self) -> Option<&str>;
    fn strategy(&self) -> DrawStrategy;
    fn dry_run(&self) -> bool;
}
