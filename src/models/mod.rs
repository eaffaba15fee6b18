pub mod message;
pub mod user;

pub use message::{Message, MessageDetail, ReceivedMessageView, SentMessageView};
pub use user::{User, UserDetail, UserSummary};
