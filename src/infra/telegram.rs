//! Telegram Bot API transport for lead notifications.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use crate::application::leads::{LeadTransport, TransportError};

#[derive(Debug, Deserialize)]
struct UpdatesResponse {
    ok: bool,
    #[serde(default)]
    result: Vec<Update>,
}

#[derive(Debug, Deserialize)]
struct Update {
    message: Option<IncomingMessage>,
}

#[derive(Debug, Deserialize)]
struct IncomingMessage {
    chat: Option<Chat>,
}

#[derive(Debug, Deserialize)]
struct Chat {
    id: i64,
}

#[derive(Debug, Deserialize)]
struct SendMessageResponse {
    ok: bool,
}

pub struct TelegramApi {
    client: reqwest::Client,
    base_url: String,
    bot_token: String,
}

impl TelegramApi {
    /// `base_url` is `https://api.telegram.org` in production; tests point
    /// it at a local stub.
    pub fn new(base_url: impl Into<String>, bot_token: impl Into<String>) -> TelegramApi {
        TelegramApi {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_owned(),
            bot_token: bot_token.into(),
        }
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{method}", self.base_url, self.bot_token)
    }
}

#[async_trait]
impl LeadTransport for TelegramApi {
    /// Chat id of the most recent update carrying a message, if any. Used
    /// only when no chat id is configured.
    async fn latest_chat_id(&self) -> Result<Option<String>, TransportError> {
        let response = self
            .client
            .get(self.method_url("getUpdates"))
            .send()
            .await
            .map_err(|err| TransportError::Http(err.to_string()))?;
        let updates: UpdatesResponse = response
            .json()
            .await
            .map_err(|err| TransportError::Payload(err.to_string()))?;

        if !updates.ok {
            return Ok(None);
        }
        Ok(updates
            .result
            .last()
            .and_then(|update| update.message.as_ref())
            .and_then(|message| message.chat.as_ref())
            .map(|chat| chat.id.to_string()))
    }

    async fn send_notification(&self, chat_id: &str, text: &str) -> Result<bool, TransportError> {
        let response = self
            .client
            .post(self.method_url("sendMessage"))
            .json(&json!({
                "chat_id": chat_id,
                "text": text,
                "parse_mode": "HTML",
            }))
            .send()
            .await
            .map_err(|err| TransportError::Http(err.to_string()))?;
        let body: SendMessageResponse = response
            .json()
            .await
            .map_err(|err| TransportError::Payload(err.to_string()))?;
        Ok(body.ok)
    }
}
