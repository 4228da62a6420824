pub(crate) use message::Message;
pub(crate) use messages_queue::MessagesQueue;
pub(crate) use registration::Registration;

mod message;
mod messages_queue;
mod registration;
