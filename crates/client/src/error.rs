use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// A draft field was empty; nothing was sent.
    #[error("title and content required")]
    Validation,

    /// The server answered with a non-success status.
    #[error("server answered {status}: {message}")]
    Rejected { status: u16, message: String },

    /// The request did not complete or the answer could not be decoded.
    #[error("request failed: {msg}")]
    Transport { msg: String },
}

impl ClientError {
    pub fn transport(msg: String) -> Self {
        Self::Transport { msg }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        Self::transport(err.to_string())
    }
}
