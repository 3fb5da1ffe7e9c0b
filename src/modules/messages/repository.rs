//! Message persistence.
//!
//! Every read is scoped to a participant: lookups filter on
//! `sender_id = caller OR recipient_id = caller`, and the read flag can only be
//! flipped by the recipient.

use anyhow::Context;
use async_trait::async_trait;
use schooldesk_core::AppError;
use schooldesk_models::{Message, MessageId, NewMessage, UserId};
use sqlx::PgPool;
use std::fmt;
use tracing::instrument;

const MESSAGE_COLUMNS: &str =
    "id, sender_id, recipient_id, subject, body, is_read, read_at, created_at";

#[async_trait]
pub trait MessageRepository: Send + Sync + fmt::Debug {
    /// The message, if `caller` is its sender or recipient.
    async fn find_visible(&self, id: MessageId, caller: UserId) -> Result<Option<Message>, AppError>;

    /// Flips an unread message addressed to `recipient` to read. Returns the
    /// updated row, or `None` when nothing matched (already read, or not the
    /// recipient).
    async fn mark_as_read(&self, id: MessageId, recipient: UserId) -> Result<Option<Message>, AppError>;

    /// Newest first, with the total count.
    async fn list_inbox(&self, recipient: UserId, limit: i64, offset: i64) -> Result<(Vec<Message>, i64), AppError>;

    async fn list_sent(&self, sender: UserId, limit: i64, offset: i64) -> Result<(Vec<Message>, i64), AppError>;

    async fn unread_count(&self, recipient: UserId) -> Result<i64, AppError>;

    async fn insert(&self, message: NewMessage) -> Result<Message, AppError>;
}

#[derive(Clone, Debug)]
pub struct PgMessageRepository {
    db: PgPool,
}

impl PgMessageRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    async fn list_by(
        &self,
        column: &'static str,
        user: UserId,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<Message>, i64), AppError> {
        let total: i64 = sqlx::query_scalar(&format!(
            "SELECT COUNT(*) FROM messages WHERE {column} = $1"
        ))
        .bind(user)
        .fetch_one(&self.db)
        .await
        .context("Failed to count messages")?;

        let messages = sqlx::query_as::<_, Message>(&format!(
            r#"
            SELECT {MESSAGE_COLUMNS}
            FROM messages
            WHERE {column} = $1
            ORDER BY created_at DESC, id
            LIMIT $2 OFFSET $3
            "#
        ))
        .bind(user)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.db)
        .await
        .context("Failed to fetch messages")?;

        Ok((messages, total))
    }
}

#[async_trait]
impl MessageRepository for PgMessageRepository {
    #[instrument(skip(self))]
    async fn find_visible(&self, id: MessageId, caller: UserId) -> Result<Option<Message>, AppError> {
        let message = sqlx::query_as::<_, Message>(&format!(
            r#"
            SELECT {MESSAGE_COLUMNS}
            FROM messages
            WHERE id = $1 AND (sender_id = $2 OR recipient_id = $2)
            "#
        ))
        .bind(id)
        .bind(caller)
        .fetch_optional(&self.db)
        .await
        .context("Failed to fetch message")?;

        Ok(message)
    }

    #[instrument(skip(self))]
    async fn mark_as_read(&self, id: MessageId, recipient: UserId) -> Result<Option<Message>, AppError> {
        let message = sqlx::query_as::<_, Message>(&format!(
            r#"
            UPDATE messages
            SET is_read = TRUE, read_at = NOW()
            WHERE id = $1 AND recipient_id = $2 AND is_read = FALSE
            RETURNING {MESSAGE_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(recipient)
        .fetch_optional(&self.db)
        .await
        .context("Failed to mark message as read")?;

        Ok(message)
    }

    #[instrument(skip(self))]
    async fn list_inbox(&self, recipient: UserId, limit: i64, offset: i64) -> Result<(Vec<Message>, i64), AppError> {
        self.list_by("recipient_id", recipient, limit, offset).await
    }

    #[instrument(skip(self))]
    async fn list_sent(&self, sender: UserId, limit: i64, offset: i64) -> Result<(Vec<Message>, i64), AppError> {
        self.list_by("sender_id", sender, limit, offset).await
    }

    #[instrument(skip(self))]
    async fn unread_count(&self, recipient: UserId) -> Result<i64, AppError> {
        let count = sqlx::query_scalar(
            "SELECT COUNT(*) FROM messages WHERE recipient_id = $1 AND is_read = FALSE",
        )
        .bind(recipient)
        .fetch_one(&self.db)
        .await
        .context("Failed to count unread messages")?;

        Ok(count)
    }

    #[instrument(skip(self, message), fields(sender_id = %message.sender_id, recipient_id = %message.recipient_id))]
    async fn insert(&self, message: NewMessage) -> Result<Message, AppError> {
        let message = sqlx::query_as::<_, Message>(&format!(
            r#"
            INSERT INTO messages (sender_id, recipient_id, subject, body)
            VALUES ($1, $2, $3, $4)
            RETURNING {MESSAGE_COLUMNS}
            "#
        ))
        .bind(message.sender_id)
        .bind(message.recipient_id)
        .bind(&message.subject)
        .bind(&message.body)
        .fetch_one(&self.db)
        .await
        .context("Failed to insert message")?;

        Ok(message)
    }
}

#[cfg(any(test, feature = "test-utils"))]
pub use memory::MemoryMessageRepository;

#[cfg(any(test, feature = "test-utils"))]
mod memory {
    use super::*;
    use chrono::Utc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::RwLock;

    /// Keeps messages in insertion order and counts successful read
    /// transitions so tests can observe side effects.
    #[derive(Debug, Default)]
    pub struct MemoryMessageRepository {
        messages: RwLock<Vec<Message>>,
        read_transitions: AtomicUsize,
    }

    impl MemoryMessageRepository {
        pub fn new() -> Self {
            Self::default()
        }

        /// Stores a message as-is, bypassing send-time validation.
        pub async fn put(&self, message: Message) {
            self.messages.write().await.push(message);
        }

        pub async fn get(&self, id: MessageId) -> Option<Message> {
            self.messages.read().await.iter().find(|m| m.id == id).cloned()
        }

        pub fn read_transitions(&self) -> usize {
            self.read_transitions.load(Ordering::SeqCst)
        }

        async fn page(
            &self,
            limit: i64,
            offset: i64,
            filter: impl Fn(&Message) -> bool,
        ) -> (Vec<Message>, i64) {
            let messages = self.messages.read().await;
            let mut matching: Vec<_> = messages.iter().filter(|m| filter(m)).cloned().collect();
            matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            let total = matching.len() as i64;
            let page = matching
                .into_iter()
                .skip(offset.max(0) as usize)
                .take(limit.max(0) as usize)
                .collect();
            (page, total)
        }
    }

    #[async_trait]
    impl MessageRepository for MemoryMessageRepository {
        async fn find_visible(&self, id: MessageId, caller: UserId) -> Result<Option<Message>, AppError> {
            Ok(self
                .messages
                .read()
                .await
                .iter()
                .find(|m| m.id == id && m.is_visible_to(caller))
                .cloned())
        }

        async fn mark_as_read(&self, id: MessageId, recipient: UserId) -> Result<Option<Message>, AppError> {
            let mut messages = self.messages.write().await;
            let Some(message) = messages
                .iter_mut()
                .find(|m| m.id == id && m.recipient_id == recipient && !m.is_read)
            else {
                return Ok(None);
            };

            message.is_read = true;
            message.read_at = Some(Utc::now());
            self.read_transitions.fetch_add(1, Ordering::SeqCst);
            Ok(Some(message.clone()))
        }

        async fn list_inbox(&self, recipient: UserId, limit: i64, offset: i64) -> Result<(Vec<Message>, i64), AppError> {
            Ok(self.page(limit, offset, |m| m.recipient_id == recipient).await)
        }

        async fn list_sent(&self, sender: UserId, limit: i64, offset: i64) -> Result<(Vec<Message>, i64), AppError> {
            Ok(self.page(limit, offset, |m| m.sender_id == sender).await)
        }

        async fn unread_count(&self, recipient: UserId) -> Result<i64, AppError> {
            Ok(self
                .messages
                .read()
                .await
                .iter()
                .filter(|m| m.recipient_id == recipient && !m.is_read)
                .count() as i64)
        }

        async fn insert(&self, message: NewMessage) -> Result<Message, AppError> {
            let message = Message {
                id: MessageId::new(),
                sender_id: message.sender_id,
                recipient_id: message.recipient_id,
                subject: message.subject,
                body: message.body,
                is_read: false,
                read_at: None,
                created_at: Utc::now(),
            };
            self.put(message.clone()).await;
            Ok(message)
        }
    }
}
