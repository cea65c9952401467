// src/services/notifier.rs

//! Chat notification delivery.
//!
//! [`deliver`] is the only way the poller sends messages: it never returns an
//! error, it reports a [`DeliveryOutcome`] instead.

use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::{ChatId, Recipient};

use crate::error::{AppError, Result};

/// A sink for plain-text chat messages.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Send `text` to the configured chat.
    async fn send(&self, text: &str) -> Result<()>;
}

/// What happened to a single notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryOutcome {
    Delivered,
    /// The message was lost; it is not retried.
    Dropped { reason: String },
}

impl DeliveryOutcome {
    pub fn is_delivered(&self) -> bool {
        matches!(self, DeliveryOutcome::Delivered)
    }
}

/// Send a message and swallow any failure.
pub async fn deliver(notifier: &dyn Notifier, text: &str) -> DeliveryOutcome {
    match notifier.send(text).await {
        Ok(()) => {
            log::debug!("Message sent ({} chars)", text.chars().count());
            DeliveryOutcome::Delivered
        }
        Err(e) => {
            log::error!("Failed to send message: {}", e);
            DeliveryOutcome::Dropped {
                reason: e.to_string(),
            }
        }
    }
}

/// Telegram Bot API notifier.
pub struct TelegramNotifier {
    bot: Bot,
    recipient: Recipient,
}

impl TelegramNotifier {
    /// Create a notifier for `chat_id`: a numeric id or an `@channel` name.
    pub fn new(token: &str, chat_id: &str) -> Result<Self> {
        if token.is_empty() {
            return Err(AppError::config("Telegram bot token cannot be empty"));
        }
        Ok(Self {
            bot: Bot::new(token),
            recipient: parse_recipient(chat_id)?,
        })
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn send(&self, text: &str) -> Result<()> {
        self.bot
            .send_message(self.recipient.clone(), text)
            .await
            .map(|_| ())
            .map_err(AppError::delivery)
    }
}

/// Interpret the chat identifier from the environment.
pub fn parse_recipient(chat_id: &str) -> Result<Recipient> {
    let chat_id = chat_id.trim();
    if let Ok(id) = chat_id.parse::<i64>() {
        return Ok(Recipient::Id(ChatId(id)));
    }
    if chat_id.len() > 1 && chat_id.starts_with('@') {
        return Ok(Recipient::ChannelUsername(chat_id.to_string()));
    }
    Err(AppError::config(format!(
        "TELEGRAM_CHAT_ID must be a numeric id or @channel, got '{chat_id}'"
    )))
}
