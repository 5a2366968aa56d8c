//! Client state and its transitions.
//!
//! `BlogView` never talks to the network: it builds the `Request` for an
//! action and folds the server's `Response` back in. `Session` pairs it with
//! a `Transport` and logs failures, leaving the view as it was.

use blog_core::{post::Post, state::PostPayload};
use tracing::error;

use crate::{
    api::{Request, Response, Transport},
    ClientError,
};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BlogView {
    pub draft_title: String,
    pub draft_content: String,
    posts: Vec<Post>,
    editing_id: Option<u64>,
}

impl BlogView {
    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    /// The post whose update is being drafted, if any.
    pub fn editing_id(&self) -> Option<u64> {
        self.editing_id
    }

    pub fn is_editing(&self) -> bool {
        self.editing_id.is_some()
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.draft_title = title.into();
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.draft_content = content.into();
    }

    /// Copy a loaded post into the drafts and mark it as being edited.
    /// Returns false, changing nothing, when no loaded post has that id.
    pub fn begin_edit(&mut self, id: u64) -> bool {
        let Some(post) = self.posts.iter().find(|post| post.id() == id) else {
            return false;
        };
        self.draft_title = post.title.clone();
        self.draft_content = post.content.clone();
        self.editing_id = Some(id);
        true
    }

    /// Drop the editing marker and both drafts.
    pub fn cancel_edit(&mut self) {
        self.clear_drafts();
        self.editing_id = None;
    }

    pub fn mount_request(&self) -> Request {
        Request::List
    }

    /// Update the post being edited, or create a new one. Both drafts are
    /// required.
    pub fn submit_request(&self) -> Result<Request, ClientError> {
        if self.draft_title.is_empty() || self.draft_content.is_empty() {
            return Err(ClientError::Validation);
        }
        let payload = PostPayload::new(self.draft_title.clone(), self.draft_content.clone());
        Ok(match self.editing_id {
            Some(id) => Request::Update { id, payload },
            None => Request::Create(payload),
        })
    }

    pub fn delete_request(&self, id: u64) -> Request {
        Request::Delete { id }
    }

    /// Fold a successful server answer into the view.
    pub fn apply(&mut self, response: Response) {
        match response {
            Response::Listed(posts) => self.posts = posts,
            Response::Created(post) => {
                self.posts.push(post);
                self.clear_drafts();
            }
            Response::Updated(post) => {
                if let Some(slot) = self.posts.iter_mut().find(|p| p.id() == post.id()) {
                    *slot = post;
                }
                self.clear_drafts();
                self.editing_id = None;
            }
            Response::Deleted { id } => {
                self.posts.retain(|post| post.id() != id);
                // The drafts stay; submitting them now creates a new post.
                if self.editing_id == Some(id) {
                    self.editing_id = None;
                }
            }
        }
    }

    fn clear_drafts(&mut self) {
        self.draft_title.clear();
        self.draft_content.clear();
    }
}

/// Drives a `BlogView` against the server, one request at a time.
pub struct Session<T> {
    pub view: BlogView,
    transport: T,
}

impl<T: Transport> Session<T> {
    pub fn new(transport: T) -> Self {
        Self {
            view: BlogView::default(),
            transport,
        }
    }

    /// Load the full post list. On failure the list stays empty.
    pub async fn mount(&mut self) -> Result<(), ClientError> {
        let request = self.view.mount_request();
        self.dispatch(request, "Error fetching posts").await
    }

    pub async fn submit(&mut self) -> Result<(), ClientError> {
        let (request, context) = match self.view.submit_request() {
            Ok(request @ Request::Update { .. }) => (request, "Error updating post"),
            Ok(request) => (request, "Error creating post"),
            Err(err) => {
                error!("Not submitting: {err}");
                return Err(err);
            }
        };
        self.dispatch(request, context).await
    }

    /// The post leaves the view only once the server confirmed the delete.
    pub async fn delete(&mut self, id: u64) -> Result<(), ClientError> {
        let request = self.view.delete_request(id);
        self.dispatch(request, "Error deleting post").await
    }

    async fn dispatch(&mut self, request: Request, context: &str) -> Result<(), ClientError> {
        match self.transport.send(request).await {
            Ok(response) => {
                self.view.apply(response);
                Ok(())
            }
            Err(err) => {
                error!("{context}: {err}");
                Err(err)
            }
        }
    }
}
