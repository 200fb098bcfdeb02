use crate::config::TelegramConfig;
use crate::error::Result;
use crate::sources::{http_client, read_json, Notifier};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{info, warn};

const TELEGRAM_API_URL: &str = "https://api.telegram.org";

#[derive(Debug, Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
}

/// Sends messages through the Telegram Bot API.
pub struct TelegramNotifier {
    client: Client,
    bot_token: String,
    chat_id: String,
}

impl TelegramNotifier {
    /// Returns None, with a warning, unless both token and chat id are set.
    pub fn from_config(config: &TelegramConfig, timeout: Duration) -> Option<Self> {
        if !config.is_configured() {
            warn!("Telegram bot token or chat ID not provided, notifications disabled");
            return None;
        }

        Some(Self {
            client: http_client(timeout),
            bot_token: config.bot_token.clone().unwrap_or_default(),
            chat_id: config.chat_id.clone().unwrap_or_default(),
        })
    }

    fn send_message_url(&self) -> String {
        format!("{}/bot{}/sendMessage", TELEGRAM_API_URL, self.bot_token)
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn notify(&self, message: &str) -> Result<()> {
        let payload = SendMessage {
            chat_id: &self.chat_id,
            text: message,
        };

        let response = self
            .client
            .post(self.send_message_url())
            .json(&payload)
            .send()
            .await?;

        let _: Value = read_json("Telegram", response).await?;
        info!("Message sent to Telegram");
        Ok(())
    }
}
