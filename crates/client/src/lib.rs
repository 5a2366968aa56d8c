//! Terminal client of the blog. `view` holds the client state and its
//! transitions, `api` talks to the server, `render` draws the state and
//! `input` reads the user's commands.
mod error;
pub mod api;
pub mod input;
pub mod render;
pub mod view;

pub use error::ClientError;
