use anyhow::anyhow;
use schooldesk_core::{AppError, Paginated, PaginationParams};
use schooldesk_models::{MessageId, MessageView, NewMessage, SendMessageDto, UserId};
use tracing::{debug, instrument};

use super::repository::MessageRepository;
use crate::metrics::{track_message_read, track_message_sent};
use crate::modules::users::repository::UserRepository;

pub struct MessageService;

impl MessageService {
    /// Returns the message as seen by `caller`.
    ///
    /// Callers who are neither sender nor recipient get `NotFound`, exactly as
    /// if the message did not exist. When the recipient opens an unread
    /// message it is marked read; later views see it already read and write
    /// nothing.
    #[instrument(skip(messages))]
    pub async fn get_message_by_id(
        messages: &dyn MessageRepository,
        id: MessageId,
        caller: UserId,
    ) -> Result<MessageView, AppError> {
        let message = messages
            .find_visible(id, caller)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!("Message not found")))?;

        // A self-addressed message reads as sent, so it never transitions.
        let opened_by_recipient = !message.is_sent_by(caller) && message.recipient_id == caller;

        let message = if opened_by_recipient && !message.is_read {
            match messages.mark_as_read(id, caller).await? {
                Some(updated) => {
                    track_message_read();
                    updated
                }
                // Another request marked it first.
                None => messages.find_visible(id, caller).await?.unwrap_or(message),
            }
        } else {
            message
        };

        Ok(MessageView::for_caller(message, caller))
    }

    #[instrument(skip(messages))]
    pub async fn list_inbox(
        messages: &dyn MessageRepository,
        caller: UserId,
        params: &PaginationParams,
    ) -> Result<Paginated<MessageView>, AppError> {
        let (rows, total) = messages
            .list_inbox(caller, params.limit(), params.offset())
            .await?;
        let views = rows
            .into_iter()
            .map(|m| MessageView::for_caller(m, caller))
            .collect();
        Ok(Paginated::new(views, total, params))
    }

    #[instrument(skip(messages))]
    pub async fn list_sent(
        messages: &dyn MessageRepository,
        caller: UserId,
        params: &PaginationParams,
    ) -> Result<Paginated<MessageView>, AppError> {
        let (rows, total) = messages
            .list_sent(caller, params.limit(), params.offset())
            .await?;
        let views = rows
            .into_iter()
            .map(|m| MessageView::for_caller(m, caller))
            .collect();
        Ok(Paginated::new(views, total, params))
    }

    pub async fn unread_count(messages: &dyn MessageRepository, caller: UserId) -> Result<i64, AppError> {
        messages.unread_count(caller).await
    }

    /// Sends a message from `caller`. The DTO's field lengths are checked by
    /// the extractor; this rejects whitespace-only text and checks the
    /// recipient.
    #[instrument(skip(messages, users, dto), fields(recipient_id = %dto.recipient_id))]
    pub async fn send_message(
        messages: &dyn MessageRepository,
        users: &dyn UserRepository,
        caller: UserId,
        dto: SendMessageDto,
    ) -> Result<MessageView, AppError> {
        if dto.recipient_id == caller {
            return Err(AppError::bad_request(anyhow!(
                "Cannot send a message to yourself"
            )));
        }

        let subject = dto.subject.trim().to_string();
        if subject.is_empty() {
            return Err(AppError::unprocessable(anyhow!(
                "subject must be 1-200 characters"
            )));
        }
        if dto.body.trim().is_empty() {
            return Err(AppError::unprocessable(anyhow!(
                "body must be 1-5000 characters"
            )));
        }

        if users.find_by_id(dto.recipient_id).await?.is_none() {
            return Err(AppError::not_found(anyhow!("Recipient not found")));
        }

        let message = messages
            .insert(NewMessage {
                sender_id: caller,
                recipient_id: dto.recipient_id,
                subject,
                body: dto.body,
            })
            .await?;

        track_message_sent();
        debug!(message_id = %message.id, "Message sent");

        Ok(MessageView::for_caller(message, caller))
    }
}
