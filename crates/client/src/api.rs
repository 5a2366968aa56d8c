use blog_core::{
    post::Post,
    state::{MessageResponse, PostPayload},
};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::ClientError;

/// Everything the client can ask of the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    List,
    Create(PostPayload),
    Update { id: u64, payload: PostPayload },
    Delete { id: u64 },
}

/// A successful answer to a `Request`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    Listed(Vec<Post>),
    Created(Post),
    Updated(Post),
    Deleted { id: u64 },
}

/// Carries one request to the server and waits for the answer.
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn send(&self, request: Request) -> Result<Response, ClientError>;
}

/// Talks JSON over HTTP to the blog server.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Transport for HttpTransport {
    async fn send(&self, request: Request) -> Result<Response, ClientError> {
        debug!("Sending {:?}", request);
        match request {
            Request::List => {
                let resp = self.client.get(self.url("/posts")).send().await?;
                Ok(Response::Listed(decode(resp).await?))
            }
            Request::Create(payload) => {
                let resp = self
                    .client
                    .post(self.url("/newpost"))
                    .json(&payload)
                    .send()
                    .await?;
                Ok(Response::Created(decode(resp).await?))
            }
            Request::Update { id, payload } => {
                let resp = self
                    .client
                    .put(self.url(&format!("/updatepost/{id}")))
                    .json(&payload)
                    .send()
                    .await?;
                Ok(Response::Updated(decode(resp).await?))
            }
            Request::Delete { id } => {
                let resp = self
                    .client
                    .delete(self.url(&format!("/deletepost/{id}")))
                    .send()
                    .await?;
                check_status(resp).await?;
                Ok(Response::Deleted { id })
            }
        }
    }
}

/// Turn a non-success status into `ClientError::Rejected`, keeping the
/// server's message when the body carries one.
async fn check_status(resp: reqwest::Response) -> Result<reqwest::Response, ClientError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let message = resp
        .json::<MessageResponse>()
        .await
        .map(|body| body.message)
        .unwrap_or_else(|_| status.canonical_reason().unwrap_or_default().to_string());
    Err(ClientError::Rejected {
        status: status.as_u16(),
        message,
    })
}

async fn decode<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, ClientError> {
    Ok(check_status(resp).await?.json().await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_loses_trailing_slash() {
        let transport = HttpTransport::new("http://localhost:3000/");
        assert_eq!(transport.base_url(), "http://localhost:3000");
        assert_eq!(transport.url("/posts"), "http://localhost:3000/posts");
    }

    #[tokio::test]
    async fn unreachable_server_is_a_transport_error() {
        // Grab a free port, then close it again.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let transport = HttpTransport::new(format!("http://{addr}"));
        let err = transport.send(Request::List).await.unwrap_err();
        assert!(matches!(err, ClientError::Transport { .. }), "{err:?}");
    }
}
