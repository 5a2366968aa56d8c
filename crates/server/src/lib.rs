mod error;
pub mod handlers;

pub use error::ServerError;

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use blog_core::{post::Post, store::PostStore, StoreCommand};
use tokio::{
    net::TcpListener,
    sync::{mpsc, oneshot},
    task::JoinHandle,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{debug, info};

/// Cloneable handle on the store task. Request handlers only ever see this;
/// the `PostStore` itself lives inside the task.
#[derive(Clone, Debug)]
pub struct StoreHandle {
    tx: mpsc::Sender<StoreCommand>,
}

impl StoreHandle {
    pub async fn list(&self) -> Result<Vec<Post>, ServerError> {
        let (resp, rx) = oneshot::channel();
        self.tx.send(StoreCommand::List { resp }).await?;
        Ok(rx.await?)
    }

    pub async fn get(&self, id: u64) -> Result<Option<Post>, ServerError> {
        let (resp, rx) = oneshot::channel();
        self.tx.send(StoreCommand::Get { id, resp }).await?;
        Ok(rx.await?)
    }

    pub async fn create(&self, title: String, content: String) -> Result<Post, ServerError> {
        let (resp, rx) = oneshot::channel();
        self.tx
            .send(StoreCommand::Create {
                title,
                content,
                resp,
            })
            .await?;
        Ok(rx.await??)
    }

    pub async fn update(
        &self,
        id: u64,
        title: String,
        content: String,
    ) -> Result<Post, ServerError> {
        let (resp, rx) = oneshot::channel();
        self.tx
            .send(StoreCommand::Update {
                id,
                title,
                content,
                resp,
            })
            .await?;
        Ok(rx.await??)
    }

    pub async fn delete(&self, id: u64) -> Result<Post, ServerError> {
        let (resp, rx) = oneshot::channel();
        self.tx.send(StoreCommand::Delete { id, resp }).await?;
        Ok(rx.await??)
    }
}

/// Move `store` into its own task. Commands are applied one at a time, in
/// arrival order. The task ends once every handle has been dropped.
pub fn spawn_store(mut store: PostStore, capacity: usize) -> (StoreHandle, JoinHandle<()>) {
    let (tx, mut rx) = mpsc::channel::<StoreCommand>(capacity);

    let task = tokio::spawn(async move {
        debug!("Store task running...");
        while let Some(cmd) = rx.recv().await {
            debug!("{:?}", cmd);
            cmd.apply(&mut store);
        }
        info!("Store task stopped with {} posts", store.len());
    });

    (StoreHandle { tx }, task)
}

/// All routes of the blog API. Any origin may call them.
pub fn router(store: StoreHandle) -> Router {
    Router::new()
        .route("/posts", get(handlers::list_posts))
        .route("/newpost", post(handlers::create_post))
        .route("/updatepost/{id}", put(handlers::update_post))
        .route("/deletepost/{id}", delete(handlers::delete_post))
        .with_state(store)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Serve `router` on `listener` until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, router: Router, shutdown: F) -> anyhow::Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    info!("Server running on {}", listener.local_addr()?);
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await?;
    Ok(())
}
