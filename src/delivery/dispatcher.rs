use std::path::PathBuf;
use std::time::Duration;

use super::channel::{ChannelApi, DeliveryError, Presence, TextMode};

pub struct Dispatcher<C> {
    channel: C,
}

impl<C: ChannelApi> Dispatcher<C> {
    pub fn new(channel: C) -> Self {
        Self { channel }
    }

    /// Signals a composing indicator, then delivers the announcement as a
    /// single message. Never retried: a failure here is fatal to the run.
    pub async fn announce(&self, text: &str, mode: TextMode) -> Result<(), DeliveryError> {
        self.channel.send_presence(Presence::Typing).await?;
        self.channel.send_text(text, mode).await?;
        log::info!("announcement_sent chars={}", text.chars().count());
        Ok(())
    }

    /// Delivers one batch of images, retrying a rejected (malformed-request
    /// class) batch exactly once with the same timeout. An empty batch makes
    /// no network calls at all.
    pub async fn send_images(
        &self,
        paths: &[PathBuf],
        timeout: Duration,
    ) -> Result<(), DeliveryError> {
        if paths.is_empty() {
            log::info!("image_batch_skipped reason=empty_batch");
            return Ok(());
        }

        match self.attempt_batch(paths, timeout).await {
            Err(DeliveryError::Rejected(detail)) => {
                log::error!(
                    "image_batch_rejected images={} error={} retrying_once",
                    paths.len(),
                    detail
                );
                self.attempt_batch(paths, timeout).await
            }
            other => other,
        }
    }

    async fn attempt_batch(
        &self,
        paths: &[PathBuf],
        timeout: Duration,
    ) -> Result<(), DeliveryError> {
        self.channel.send_presence(Presence::UploadingPhoto).await?;

        // Telegram albums require at least two items; a one-image batch goes
        // out as a plain photo message instead.
        let send = async {
            if let [single] = paths {
                self.channel.send_photo(single).await
            } else {
                self.channel.send_album(paths).await
            }
        };

        match tokio::time::timeout(timeout, send).await {
            Ok(result) => {
                if result.is_ok() {
                    log::info!("image_batch_sent images={}", paths.len());
                }
                result
            }
            Err(_) => Err(DeliveryError::Timeout(timeout)),
        }
    }
}

/// Splits the full image set into the two delivery batches: the first takes
/// the integer-floor half, the second the remainder.
pub fn split_batches(paths: &[PathBuf]) -> (&[PathBuf], &[PathBuf]) {
    paths.split_at(paths.len() / 2)
}
