use std::path::{Path, PathBuf};
use std::time::Duration;

use teloxide::prelude::*;
use teloxide::types::{ChatAction, InputFile, InputMedia, InputMediaPhoto, ParseMode};
use teloxide::{ApiError, RequestError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DeliveryError {
    /// Malformed-request class: the destination rejected what we sent
    /// (album too large, oversized payload, bad file reference). The only
    /// class the dispatcher retries.
    #[error("destination rejected the request: {0}")]
    Rejected(String),
    #[error("delivery transport failed: {0}")]
    Transport(String),
    #[error("delivery timed out after {0:?}")]
    Timeout(Duration),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Typing,
    UploadingPhoto,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextMode {
    Plain,
    Markdown,
}

pub trait ChannelApi {
    async fn send_presence(&self, presence: Presence) -> Result<(), DeliveryError>;
    async fn send_text(&self, text: &str, mode: TextMode) -> Result<(), DeliveryError>;
    async fn send_photo(&self, path: &Path) -> Result<(), DeliveryError>;
    async fn send_album(&self, paths: &[PathBuf]) -> Result<(), DeliveryError>;
}

pub struct TelegramChannel {
    bot: Bot,
    chat_id: ChatId,
}

impl TelegramChannel {
    pub fn new(token: &str, chat_id: ChatId) -> Self {
        Self {
            bot: Bot::new(token),
            chat_id,
        }
    }
}

impl ChannelApi for TelegramChannel {
    async fn send_presence(&self, presence: Presence) -> Result<(), DeliveryError> {
        let action = match presence {
            Presence::Typing => ChatAction::Typing,
            Presence::UploadingPhoto => ChatAction::UploadPhoto,
        };
        self.bot
            .send_chat_action(self.chat_id, action)
            .await
            .map(drop)
            .map_err(classify)
    }

    async fn send_text(&self, text: &str, mode: TextMode) -> Result<(), DeliveryError> {
        let request = self.bot.send_message(self.chat_id, text);
        let request = match mode {
            TextMode::Markdown => request.parse_mode(ParseMode::Markdown),
            TextMode::Plain => request,
        };
        request.await.map(drop).map_err(classify)
    }

    async fn send_photo(&self, path: &Path) -> Result<(), DeliveryError> {
        self.bot
            .send_photo(self.chat_id, InputFile::file(path))
            .await
            .map(drop)
            .map_err(classify)
    }

    // InputFile::file defers opening to request execution, so every attempt
    // opens and closes its own handles.
    async fn send_album(&self, paths: &[PathBuf]) -> Result<(), DeliveryError> {
        let media: Vec<InputMedia> = paths
            .iter()
            .map(|path| InputMedia::Photo(InputMediaPhoto::new(InputFile::file(path.clone()))))
            .collect();
        self.bot
            .send_media_group(self.chat_id, media)
            .await
            .map(drop)
            .map_err(classify)
    }
}

fn classify(error: RequestError) -> DeliveryError {
    match error {
        RequestError::Api(api) if is_bad_request(&api) => DeliveryError::Rejected(api.to_string()),
        other => DeliveryError::Transport(other.to_string()),
    }
}

fn is_bad_request(error: &ApiError) -> bool {
    matches!(
        error,
        ApiError::TooMuchMessages | ApiError::WrongFileIdOrUrl | ApiError::FailedToGetUrlContent
    ) || matches!(error, ApiError::Unknown(text) if text.contains("Bad Request"))
}
