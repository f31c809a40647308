mod channel;
mod dispatcher;

pub use channel::{ChannelApi, DeliveryError, Presence, TelegramChannel, TextMode};
pub use dispatcher::{split_batches, Dispatcher};
