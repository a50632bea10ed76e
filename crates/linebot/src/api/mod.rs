//! API endpoint groups.

mod chats;
mod messages;
mod profiles;

pub use chats::ChatsApi;
pub use messages::MessagesApi;
pub use profiles::ProfilesApi;
