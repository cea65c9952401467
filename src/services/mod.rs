// src/services/mod.rs

//! External collaborators: the review API and the chat bot.

pub mod homework;
pub mod notifier;

pub use homework::HomeworkClient;
pub use notifier::{DeliveryOutcome, Notifier, TelegramNotifier, deliver};
