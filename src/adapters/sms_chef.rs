use crate::domain::model::SendReceipt;
use crate::domain::ports::MessageSender;
use crate::utils::error::{Result, SorteoError};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

pub const DEFAULT_GATEWAY_URL: &str = "https://www.cloud.smschef.com";
pub const SEND_SMS_PATH: &str = "/api/send/sms";
pub const DEFAULT_MODE: &str = "devices";
pub const DEFAULT_SIM: u8 = 1;

/// Everything needed to talk to SMS Chef, built once at startup.
#[derive(Debug, Clone)]
pub struct SmsGatewayConfig {
    pub base_url: String,
    pub secret: String,
    pub mode: String,
    pub sim: u8,
    pub timeout: Duration,
}

impl SmsGatewayConfig {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_GATEWAY_URL.to_string(),
            secret: secret.into(),
            mode: DEFAULT_MODE.to_string(),
            sim: DEFAULT_SIM,
            timeout: Duration::from_secs(10),
        }
    }

    pub fn endpoint(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), SEND_SMS_PATH)
    }
}

#[derive(Serialize)]
struct SendSmsForm<'a> {
    secret: &'a str,
    mode: &'a str,
    phone: &'a str,
    message: &'a str,
    sim: u8,
}

pub struct SmsChefSender {
    config: SmsGatewayConfig,
    client: Client,
}

impl SmsChefSender {
    pub fn new(config: SmsGatewayConfig) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()?;

        Ok(Self { config, client })
    }
}

#[async_trait]
impl MessageSender for SmsChefSender {
    async fn send_message(&self, destination: &str, text: &str) -> Result<SendReceipt> {
        let form = SendSmsForm {
            secret: &self.config.secret,
            mode: &self.config.mode,
            phone: destination,
            message: text,
            sim: self.config.sim,
        };

        tracing::info!("Sending SMS to {}", destination);
        tracing::debug!("SMS body: {}", text);

        let response = self
            .client
            .post(self.config.endpoint())
            .form(&form)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        tracing::debug!("SMS Chef response: {} {}", status, body);

        if status.as_u16() != 200 {
            return Err(SorteoError::SmsGatewayError {
                status: status.as_u16(),
                body,
            });
        }

        // The gateway answers JSON; keep the raw text if it ever doesn't.
        let data = serde_json::from_str(&body).unwrap_or(serde_json::Value::String(body));

        Ok(SendReceipt {
            status: status.as_u16(),
            data,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn sender(server: &MockServer) -> SmsChefSender {
        let mut config = SmsGatewayConfig::new("test-secret");
        config.base_url = server.base_url();
        config.timeout = Duration::from_secs(2);
        SmsChefSender::new(config).unwrap()
    }

    #[test]
    fn test_endpoint_joins_cleanly() {
        let mut config = SmsGatewayConfig::new("s");
        assert_eq!(config.endpoint(), "https://www.cloud.smschef.com/api/send/sms");
        config.base_url = "http://localhost:9000/".to_string();
        assert_eq!(config.endpoint(), "http://localhost:9000/api/send/sms");
    }

    #[tokio::test]
    async fn test_send_message_posts_form() {
        let server = MockServer::start();
        let sms_mock = server.mock(|when, then| {
            when.method(POST)
                .path("/api/send/sms")
                .header("Content-Type", "application/x-www-form-urlencoded")
                .x_www_form_urlencoded_tuple("secret", "test-secret")
                .x_www_form_urlencoded_tuple("mode", "devices")
                .x_www_form_urlencoded_tuple("phone", "573005997373")
                .x_www_form_urlencoded_tuple("message", "Hola Laura, tu Amigo secreto es Andrés.")
                .x_www_form_urlencoded_tuple("sim", "1");
            then.status(200)
                .json_body(serde_json::json!({"status": 200, "message": "Message has been queued"}));
        });

        let receipt = sender(&server)
            .send_message("573005997373", "Hola Laura, tu Amigo secreto es Andrés.")
            .await
            .unwrap();

        sms_mock.assert();
        assert_eq!(receipt.status, 200);
        assert_eq!(receipt.data["message"], "Message has been queued");
    }

    #[tokio::test]
    async fn test_send_message_gateway_error() {
        let server = MockServer::start();
        let sms_mock = server.mock(|when, then| {
            when.method(POST).path("/api/send/sms");
            then.status(403)
                .json_body(serde_json::json!({"status": 403, "message": "Invalid API secret"}));
        });

        let err = sender(&server)
            .send_message("573005997373", "hola")
            .await
            .unwrap_err();

        sms_mock.assert();
        match err {
            SorteoError::SmsGatewayError { status, body } => {
                assert_eq!(status, 403);
                assert!(body.contains("Invalid API secret"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_send_message_non_json_success() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/api/send/sms");
            then.status(200).body("queued");
        });

        let receipt = sender(&server).send_message("573005997373", "hola").await.unwrap();

        assert_eq!(receipt.data, serde_json::Value::String("queued".to_string()));
    }
}
