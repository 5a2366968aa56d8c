use blog_core::store::PostStore;
use client::{
    api::{HttpTransport, Request, Transport},
    view::Session,
    ClientError,
};
use tokio::{net::TcpListener, sync::oneshot};

/// Start a server on an ephemeral port; it stops when the sender drops.
async fn start_server() -> (String, oneshot::Sender<()>) {
    let (store, _) = server::spawn_store(PostStore::default(), 8);
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    let (stop, stopped) = oneshot::channel::<()>();
    tokio::spawn(server::serve(listener, server::router(store), async move {
        let _ = stopped.await;
    }));
    (base, stop)
}

#[tokio::test]
async fn full_session_against_live_server() {
    let (base, _stop) = start_server().await;
    let mut session = Session::new(HttpTransport::new(base.as_str()));

    session.mount().await.unwrap();
    assert!(session.view.posts().is_empty());

    session.view.set_title("Hi");
    session.view.set_content("World");
    session.submit().await.unwrap();
    session.view.set_title("Second");
    session.view.set_content("Post");
    session.submit().await.unwrap();
    assert_eq!(session.view.posts().len(), 2);
    let first = session.view.posts()[0].id();
    let second = session.view.posts()[1].id();

    assert!(session.view.begin_edit(first));
    session.view.set_content("there");
    session.submit().await.unwrap();
    assert_eq!(session.view.posts()[0].content, "there");
    assert!(!session.view.is_editing());

    session.delete(second).await.unwrap();

    // A second client sees exactly what the first one left behind.
    let mut other = Session::new(HttpTransport::new(base.as_str()));
    other.mount().await.unwrap();
    assert_eq!(other.view.posts(), session.view.posts());
    assert_eq!(other.view.posts().len(), 1);
    assert_eq!(other.view.posts()[0].title, "Hi");
}

#[tokio::test]
async fn stale_view_keeps_state_on_rejection() {
    let (base, _stop) = start_server().await;
    let mut alice = Session::new(HttpTransport::new(base.as_str()));
    let mut bob = Session::new(HttpTransport::new(base.as_str()));

    alice.view.set_title("Hi");
    alice.view.set_content("World");
    alice.submit().await.unwrap();
    let id = alice.view.posts()[0].id();

    bob.mount().await.unwrap();
    bob.delete(id).await.unwrap();

    // Alice's copy is stale: the update is rejected and her drafts survive.
    alice.view.begin_edit(id);
    alice.view.set_title("Edited");
    let before = alice.view.clone();
    let err = alice.submit().await.unwrap_err();
    assert_eq!(
        err,
        ClientError::Rejected {
            status: 404,
            message: "post not found".into()
        }
    );
    assert_eq!(alice.view, before);

    let err = alice.delete(id).await.unwrap_err();
    assert!(matches!(err, ClientError::Rejected { status: 404, .. }));
    assert_eq!(alice.view.posts().len(), 1);
}

#[tokio::test]
async fn transport_reports_server_validation() {
    let (base, _stop) = start_server().await;
    let transport = HttpTransport::new(base);
    let err = transport
        .send(Request::Create(Default::default()))
        .await
        .unwrap_err();
    assert_eq!(
        err,
        ClientError::Rejected {
            status: 400,
            message: "title and content required".into()
        }
    );
}
