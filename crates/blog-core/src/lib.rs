//! Core types of the blog: the `Post` entity, the in-memory `PostStore`
//! that owns every post, and the command protocol the server uses to reach
//! the store from its request handlers.
mod error;
pub mod config;
pub mod post;
pub mod state;
pub mod store;

pub use error::{BlogError, BlogResult};

pub mod constant {
    pub const DEFAULT_PORT: u16 = 3000;
    pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";
    pub const DEFAULT_LOG_LEVEL: &str = "info";
    pub const CHANNEL_CAPACITY: usize = 32;
    pub const CONFIG_DIR: &str = ".blog";
    pub const CONFIG_FILE: &str = "blog.toml";
    pub const CONFIG_ENV: &str = "BLOGCONF";
    pub const MSG_FIELDS_REQUIRED: &str = "title and content required";
    pub const MSG_NOT_FOUND: &str = "post not found";
    pub const MSG_DELETED: &str = "post deleted";
    pub const MSG_STORE_UNAVAILABLE: &str = "post store unavailable";
}

/// Used to send the store's reply back to the request handler.
pub type Responder<T> = tokio::sync::oneshot::Sender<T>;

/// A request for the task that owns the `PostStore`. Every variant carries
/// the responder on which the outcome is sent back.
#[derive(Debug)]
pub enum StoreCommand {
    List {
        resp: Responder<Vec<post::Post>>,
    },
    Get {
        id: u64,
        resp: Responder<Option<post::Post>>,
    },
    Create {
        title: String,
        content: String,
        resp: Responder<BlogResult<post::Post>>,
    },
    Update {
        id: u64,
        title: String,
        content: String,
        resp: Responder<BlogResult<post::Post>>,
    },
    Delete {
        id: u64,
        resp: Responder<BlogResult<post::Post>>,
    },
}

impl StoreCommand {
    /// Apply the command to `store` and answer on its responder.
    ///
    /// Sending on a oneshot returns the value back as the error when the
    /// receiver is gone, so there is nothing left to do with it.
    pub fn apply(self, store: &mut store::PostStore) {
        match self {
            StoreCommand::List { resp } => {
                let _ = resp.send(store.list().to_vec());
            }
            StoreCommand::Get { id, resp } => {
                let _ = resp.send(store.get(id).cloned());
            }
            StoreCommand::Create {
                title,
                content,
                resp,
            } => {
                let _ = resp.send(store.create(title, content));
            }
            StoreCommand::Update {
                id,
                title,
                content,
                resp,
            } => {
                let _ = resp.send(store.update(id, title, content));
            }
            StoreCommand::Delete { id, resp } => {
                let _ = resp.send(store.delete(id));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::oneshot;

    #[test]
    fn apply_answers_on_the_responder() {
        let mut store = store::PostStore::default();

        let (resp, rx) = oneshot::channel();
        StoreCommand::Create {
            title: "Hi".into(),
            content: "World".into(),
            resp,
        }
        .apply(&mut store);
        let created = rx.blocking_recv().unwrap().unwrap();

        let (resp, rx) = oneshot::channel();
        StoreCommand::List { resp }.apply(&mut store);
        assert_eq!(rx.blocking_recv().unwrap(), vec![created.clone()]);

        let (resp, rx) = oneshot::channel();
        StoreCommand::Get {
            id: created.id(),
            resp,
        }
        .apply(&mut store);
        assert_eq!(rx.blocking_recv().unwrap(), Some(created.clone()));

        let (resp, rx) = oneshot::channel();
        StoreCommand::Get {
            id: created.id() + 1,
            resp,
        }
        .apply(&mut store);
        assert_eq!(rx.blocking_recv().unwrap(), None);

        let (resp, rx) = oneshot::channel();
        StoreCommand::Delete {
            id: created.id(),
            resp,
        }
        .apply(&mut store);
        assert_eq!(rx.blocking_recv().unwrap().unwrap(), created);
        assert!(store.is_empty());
    }

    #[test]
    fn apply_survives_a_dropped_receiver() {
        let mut store = store::PostStore::default();
        let (resp, rx) = oneshot::channel();
        drop(rx);
        StoreCommand::Create {
            title: "Hi".into(),
            content: "World".into(),
            resp,
        }
        .apply(&mut store);
        assert_eq!(store.len(), 1);
    }
}
