use serde::{Deserialize, Serialize};

use crate::constant::{MSG_DELETED, MSG_FIELDS_REQUIRED, MSG_NOT_FOUND};

/// Body of a create or update request. Missing fields read as empty.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq, Eq)]
pub struct PostPayload {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
}

impl PostPayload {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }
}

/// Body of every response that carries no post: confirmations and errors.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn deleted() -> Self {
        Self::new(MSG_DELETED)
    }

    pub fn not_found() -> Self {
        Self::new(MSG_NOT_FOUND)
    }

    pub fn fields_required() -> Self {
        Self::new(MSG_FIELDS_REQUIRED)
    }
}
