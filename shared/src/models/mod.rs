pub mod chat;
pub mod message;
pub mod user;

/// Collections the documents live in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionName {
    Users,
    Chats,
}

impl CollectionName {
    pub fn as_str(&self) -> &'static str {
        match self {
            CollectionName::Users => "Users",
            CollectionName::Chats => "Chats",
        }
    }
}
