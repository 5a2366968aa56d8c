use thiserror::Error;

pub type BlogResult<T> = Result<T, BlogError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BlogError {
    /// An empty title was provided for the post.
    #[error("Title cannot be empty")]
    EmptyTitle,
    /// An empty content was provided for the post.
    #[error("Content cannot be empty")]
    EmptyContent,
    /// The requested/specified ID does not exist.
    #[error("Post does not exist with the given ID({id})")]
    PostNotFound { id: u64 },
    #[error("Config error: {msg}")]
    ConfigError { msg: String },
}

impl BlogError {
    pub fn config_error(msg: String) -> Self {
        Self::ConfigError { msg }
    }

    /// Whether the error comes from a missing title or content.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::EmptyTitle | Self::EmptyContent)
    }
}
