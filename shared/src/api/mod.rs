pub mod chat;
pub mod message;
pub mod user;

/// Outcome category of a core operation, mapped to an HTTP status by the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ok,
    Created,
    Conflict,
    NotFound,
}

/// Result of a core operation that did not fail on storage.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply<T> {
    pub status: Status,
    pub message: String,
    pub payload: Option<T>,
}

impl<T> Reply<T> {
    pub fn ok(message: impl Into<String>, payload: T) -> Self {
        Reply {
            status: Status::Ok,
            message: message.into(),
            payload: Some(payload),
        }
    }

    pub fn created(message: impl Into<String>, payload: T) -> Self {
        Reply {
            status: Status::Created,
            message: message.into(),
            payload: Some(payload),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Reply {
            status: Status::Conflict,
            message: message.into(),
            payload: None,
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Reply {
            status: Status::NotFound,
            message: message.into(),
            payload: None,
        }
    }
}
