use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{
    error::AppResult,
    models::{ListingId, Rating},
};

/// A message to deliver to the user after a feedback submission
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NotificationEvent {
    pub recipient: String,
    pub message: String,
    pub sent_at: DateTime<Utc>,
}

impl NotificationEvent {
    /// Confirmation for a recorded rating
    pub fn feedback_recorded(recipient: &str, listing_id: ListingId, rating: Rating) -> Self {
        Self {
            recipient: recipient.to_string(),
            message: format!(
                "You rated listing {} with {} stars.",
                listing_id,
                rating.value()
            ),
            sent_at: Utc::now(),
        }
    }
}

/// Delivery channel for notifications
///
/// Real delivery (email, push) lives outside this service; implementations
/// only need to hand the event off.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, event: &NotificationEvent) -> AppResult<()>;
}

/// Notifier that writes events to the log
#[derive(Debug, Default, Clone)]
pub struct LogNotifier;

#[async_trait::async_trait]
impl Notifier for LogNotifier {
    async fn notify(&self, event: &NotificationEvent) -> AppResult<()> {
        tracing::info!(
            recipient = %event.recipient,
            message = %event.message,
            "Notification sent"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feedback_message() {
        let event = NotificationEvent::feedback_recorded(
            "user@email.com",
            ListingId(3),
            Rating::new(4.5).unwrap(),
        );
        assert_eq!(event.recipient, "user@email.com");
        assert_eq!(event.message, "You rated listing 3 with 4.5 stars.");
    }

    #[tokio::test]
    async fn test_log_notifier_accepts_event() {
        let event = NotificationEvent::feedback_recorded(
            "user@email.com",
            ListingId(1),
            Rating::new(5.0).unwrap(),
        );
        assert!(LogNotifier.notify(&event).await.is_ok());
    }
}
