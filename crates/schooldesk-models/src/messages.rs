//! Direct messages between users.
//!
//! A message row is shared by its sender and its recipient. Whether it reads
//! as "sent" or "received" depends on who is looking, so the API never
//! returns the raw row; it returns a [`MessageView`] built for the caller.

use crate::ids::{MessageId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Message {
    pub id: MessageId,
    pub sender_id: UserId,
    pub recipient_id: UserId,
    pub subject: String,
    pub body: String,
    /// Flips to `true` once, the first time the recipient opens the message.
    pub is_read: bool,
    pub read_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// Whether `user_id` may see this message at all.
    pub fn is_visible_to(&self, user_id: UserId) -> bool {
        self.sender_id == user_id || self.recipient_id == user_id
    }

    /// Whether `user_id` is looking at the message as its sender. A message
    /// a user sent to themselves counts as sent.
    pub fn is_sent_by(&self, user_id: UserId) -> bool {
        self.sender_id == user_id
    }
}

/// A message from one caller's perspective.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MessageView {
    pub id: MessageId,
    pub sender_id: UserId,
    pub recipient_id: UserId,
    pub subject: String,
    pub body: String,
    pub is_read: bool,
    pub read_at: Option<DateTime<Utc>>,
    /// `true` when the caller is the sender.
    pub is_sent: bool,
    pub created_at: DateTime<Utc>,
}

impl MessageView {
    pub fn for_caller(message: Message, caller: UserId) -> Self {
        let is_sent = message.is_sent_by(caller);
        Self {
            id: message.id,
            sender_id: message.sender_id,
            recipient_id: message.recipient_id,
            subject: message.subject,
            body: message.body,
            is_read: message.is_read,
            read_at: message.read_at,
            is_sent,
            created_at: message.created_at,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct SendMessageDto {
    pub recipient_id: UserId,
    #[validate(length(min = 1, max = 200, message = "subject must be 1-200 characters"))]
    pub subject: String,
    #[validate(length(min = 1, max = 5000, message = "body must be 1-5000 characters"))]
    pub body: String,
}

/// A validated message ready to persist.
#[derive(Debug, Clone)]
pub struct NewMessage {
    pub sender_id: UserId,
    pub recipient_id: UserId,
    pub subject: String,
    pub body: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UnreadCountResponse {
    pub count: i64,
}
