//! Lead relay: validation, notification formatting, and delivery to the
//! studio's Telegram chat.
//!
//! The notification is sent with `parse_mode: "HTML"`, so every
//! user-supplied field is entity-escaped before it reaches the transport.
//! Delivery is a single attempt; upstream failure detail is logged, never
//! surfaced to the caller.

use std::sync::Arc;

use async_trait::async_trait;
use metrics::counter;
use thiserror::Error;
use tracing::warn;

use lustro_api_types::LeadRequest;

use crate::domain::contact::{LeadDraft, Platform};

pub const LEADS_DELIVERED_TOTAL: &str = "lustro_leads_delivered_total";
pub const LEADS_REJECTED_TOTAL: &str = "lustro_leads_rejected_total";

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("telegram api request failed: {0}")]
    Http(String),
    #[error("telegram api returned a malformed payload: {0}")]
    Payload(String),
}

/// Outbound messaging boundary. The production implementation is
/// `infra::telegram::TelegramApi`; tests substitute a capturing fake.
#[async_trait]
pub trait LeadTransport: Send + Sync {
    /// Chat id of the most recent message the bot has received, if any.
    async fn latest_chat_id(&self) -> Result<Option<String>, TransportError>;
    /// Send an HTML-formatted notification. `Ok(false)` means the API
    /// answered but reported failure.
    async fn send_notification(&self, chat_id: &str, text: &str) -> Result<bool, TransportError>;
}

#[derive(Debug, Error)]
pub enum LeadError {
    /// Request failed validation; the message is safe for the caller.
    #[error("{0}")]
    Invalid(String),
    /// The relay is not configured to deliver anywhere; the message is
    /// operator guidance, safe for the caller.
    #[error("{0}")]
    Unconfigured(&'static str),
    /// Delivery failed upstream. `detail` is for the log only.
    #[error("failed to deliver lead notification")]
    Delivery { detail: String },
}

pub struct LeadService {
    transport: Option<Arc<dyn LeadTransport>>,
    configured_chat_id: Option<String>,
}

impl LeadService {
    pub fn new(
        transport: Option<Arc<dyn LeadTransport>>,
        configured_chat_id: Option<String>,
    ) -> LeadService {
        LeadService {
            transport,
            configured_chat_id,
        }
    }

    /// Server-side validation of the wire request: the three required
    /// fields must be non-empty and the platform must be a known value.
    /// Format rules (handle shape, message length) are the form's concern.
    pub fn validate(request: &LeadRequest) -> Result<LeadDraft, LeadError> {
        let mut missing = Vec::new();
        if request.name.trim().is_empty() {
            missing.push("name");
        }
        if request.platform.trim().is_empty() {
            missing.push("platform");
        }
        if request.contact.trim().is_empty() {
            missing.push("contact");
        }
        if !missing.is_empty() {
            return Err(LeadError::Invalid(format!(
                "Missing required fields: {}",
                missing.join(", ")
            )));
        }
        let platform = Platform::from_str(request.platform.trim())
            .ok_or_else(|| LeadError::Invalid("Invalid platform".to_owned()))?;
        Ok(LeadDraft {
            name: request.name.trim().to_owned(),
            platform,
            contact: request.contact.trim().to_owned(),
            message: request.message.trim().to_owned(),
        })
    }

    /// Validate, resolve the destination chat, format, and deliver.
    pub async fn submit(&self, request: &LeadRequest) -> Result<(), LeadError> {
        let transport = self.transport.as_ref().ok_or_else(|| {
            counter!(LEADS_REJECTED_TOTAL).increment(1);
            LeadError::Unconfigured(
                "Telegram bot token is not configured; set telegram.bot_token",
            )
        })?;

        let draft = Self::validate(request).inspect_err(|_| {
            counter!(LEADS_REJECTED_TOTAL).increment(1);
        })?;

        let chat_id = match &self.configured_chat_id {
            Some(id) => id.clone(),
            None => {
                // Development convenience: without a configured chat id,
                // fall back to whoever messaged the bot last.
                warn!("telegram.chat_id not configured, scanning bot updates for a destination");
                let resolved = transport
                    .latest_chat_id()
                    .await
                    .map_err(|err| LeadError::Delivery {
                        detail: err.to_string(),
                    })?;
                resolved.ok_or(LeadError::Unconfigured(
                    "No chat id available; set telegram.chat_id or send the bot a message first",
                ))?
            }
        };

        let text = format_notification(&draft);
        match transport.send_notification(&chat_id, &text).await {
            Ok(true) => {
                counter!(LEADS_DELIVERED_TOTAL).increment(1);
                Ok(())
            }
            Ok(false) => Err(LeadError::Delivery {
                detail: "telegram api reported a delivery failure".to_owned(),
            }),
            Err(err) => Err(LeadError::Delivery {
                detail: err.to_string(),
            }),
        }
    }
}

/// Escape the five HTML-significant characters. `&` first so entities are
/// not double-escaped.
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#039;")
}

/// Render the notification body sent to the studio chat.
pub fn format_notification(draft: &LeadDraft) -> String {
    let (indicator, platform_name) = match draft.platform {
        Platform::Instagram => ("📷", "Instagram"),
        Platform::Telegram => ("💬", "Telegram"),
    };
    let mut text = format!(
        "🎯 <b>New lead</b>\n\n👤 <b>Name:</b> {name}\n{indicator} <b>Platform:</b> {platform_name}\n📞 <b>Contact:</b> <code>{contact}</code>\n",
        name = escape_html(&draft.name),
        contact = escape_html(&draft.contact),
    );
    if !draft.message.is_empty() {
        text.push_str(&format!(
            "\n💬 <b>Message:</b>\n{}\n",
            escape_html(&draft.message)
        ));
    }
    text.push_str("\n━━━━━━━━━━━━━━━");
    text
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    #[derive(Default)]
    struct CapturingTransport {
        latest: Option<String>,
        accept: bool,
        sent: Mutex<Vec<(String, String)>>,
    }

    #[async_trait]
    impl LeadTransport for CapturingTransport {
        async fn latest_chat_id(&self) -> Result<Option<String>, TransportError> {
            Ok(self.latest.clone())
        }

        async fn send_notification(
            &self,
            chat_id: &str,
            text: &str,
        ) -> Result<bool, TransportError> {
            self.sent
                .lock()
                .unwrap()
                .push((chat_id.to_owned(), text.to_owned()));
            Ok(self.accept)
        }
    }

    fn request(name: &str, platform: &str, contact: &str, message: &str) -> LeadRequest {
        LeadRequest {
            name: name.into(),
            platform: platform.into(),
            contact: contact.into(),
            message: message.into(),
        }
    }

    #[test]
    fn validation_names_every_missing_field() {
        let err = LeadService::validate(&request("", "telegram", "", "")).unwrap_err();
        match err {
            LeadError::Invalid(message) => {
                assert_eq!(message, "Missing required fields: name, contact");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn validation_rejects_unknown_platforms() {
        let err = LeadService::validate(&request("Anna", "whatsapp", "@anna", "")).unwrap_err();
        assert!(matches!(err, LeadError::Invalid(m) if m == "Invalid platform"));
    }

    #[test]
    fn script_tags_reach_the_transport_escaped() {
        let draft = LeadDraft {
            name: "Anna".into(),
            platform: Platform::Telegram,
            contact: "@anna".into(),
            message: "<script>x</script>".into(),
        };
        let text = format_notification(&draft);
        assert!(text.contains("&lt;script&gt;x&lt;/script&gt;"));
        assert!(!text.contains("<script>"));
    }

    #[test]
    fn ampersands_are_not_double_escaped() {
        assert_eq!(escape_html("R&B \"mix\" <ok>"), "R&amp;B &quot;mix&quot; &lt;ok&gt;");
        assert_eq!(escape_html("it's"), "it&#039;s");
    }

    #[test]
    fn notification_format_is_stable() {
        let draft = LeadDraft {
            name: "Anna".into(),
            platform: Platform::Instagram,
            contact: "@anna.retouch".into(),
            message: "Ten photos from a studio shoot".into(),
        };
        insta::assert_snapshot!(format_notification(&draft), @r"
        🎯 <b>New lead</b>

        👤 <b>Name:</b> Anna
        📷 <b>Platform:</b> Instagram
        📞 <b>Contact:</b> <code>@anna.retouch</code>

        💬 <b>Message:</b>
        Ten photos from a studio shoot

        ━━━━━━━━━━━━━━━
        ");
    }

    #[test]
    fn empty_message_section_is_omitted() {
        let draft = LeadDraft {
            name: "Anna".into(),
            platform: Platform::Telegram,
            contact: "380501234567".into(),
            message: String::new(),
        };
        let text = format_notification(&draft);
        assert!(!text.contains("Message:"));
        assert!(text.contains("💬 <b>Platform:</b> Telegram"));
    }

    #[tokio::test]
    async fn configured_chat_id_wins_over_updates_scan() {
        let transport = Arc::new(CapturingTransport {
            latest: Some("999".into()),
            accept: true,
            sent: Mutex::new(vec![]),
        });
        let service = LeadService::new(Some(transport.clone()), Some("42".into()));
        service
            .submit(&request("Anna", "telegram", "@anna", ""))
            .await
            .unwrap();
        let sent = transport.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, "42");
    }

    #[tokio::test]
    async fn falls_back_to_latest_chat_then_fails_without_one() {
        let transport = Arc::new(CapturingTransport {
            latest: Some("999".into()),
            accept: true,
            sent: Mutex::new(vec![]),
        });
        let service = LeadService::new(Some(transport.clone()), None);
        service
            .submit(&request("Anna", "telegram", "@anna", ""))
            .await
            .unwrap();
        assert_eq!(transport.sent.lock().unwrap()[0].0, "999");

        let silent = Arc::new(CapturingTransport::default());
        let service = LeadService::new(Some(silent), None);
        let err = service
            .submit(&request("Anna", "telegram", "@anna", ""))
            .await
            .unwrap_err();
        assert!(matches!(err, LeadError::Unconfigured(_)));
    }

    #[tokio::test]
    async fn upstream_rejection_is_a_delivery_error() {
        let transport = Arc::new(CapturingTransport {
            latest: None,
            accept: false,
            sent: Mutex::new(vec![]),
        });
        let service = LeadService::new(Some(transport), Some("42".into()));
        let err = service
            .submit(&request("Anna", "telegram", "@anna", ""))
            .await
            .unwrap_err();
        assert!(matches!(err, LeadError::Delivery { .. }));
    }

    #[tokio::test]
    async fn missing_transport_is_an_unconfigured_error() {
        let service = LeadService::new(None, Some("42".into()));
        let err = service
            .submit(&request("Anna", "telegram", "@anna", ""))
            .await
            .unwrap_err();
        assert!(matches!(err, LeadError::Unconfigured(_)));
    }
}
