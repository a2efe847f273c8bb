mod mail_message;
mod message_parser;

pub use mail_message::MailMessage;
pub use message_parser::{MessageParser, DEFAULT_LIST_TAG};
