use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;

use herdbook::http_utils::{ClientError, HerdbookClient};
use herdbook::{
    InMemoryLivestockStore, LivestockCandidate, LivestockFields, LivestockStore,
    create_livestock_router,
};

/// Serves the API from an in-memory store on an ephemeral local port.
///
/// Returns the store handle (so tests can move server state without going
/// through the client) and a client pointed at the server.
async fn spawn_server() -> (Arc<InMemoryLivestockStore>, HerdbookClient) {
    let store = Arc::new(InMemoryLivestockStore::new());
    let app = create_livestock_router(store.clone());
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    let client = HerdbookClient::new(format!("http://{}", addr));
    (store, client)
}

fn candidate(kind: &str, age: f64) -> LivestockCandidate {
    LivestockCandidate {
        kind: Some(kind.to_string()),
        breed: Some("test-breed".to_string()),
        age: Some(age),
        health_status: Some("good".to_string()),
    }
}

fn fields(kind: &str, age: f64) -> LivestockFields {
    LivestockFields {
        kind: kind.to_string(),
        breed: "test-breed".to_string(),
        age,
        health_status: "good".to_string(),
    }
}

#[tokio::test]
async fn list_serves_from_cache_until_a_mutation_invalidates_it() {
    let (store, client) = spawn_server().await;
    store.create(fields("cow", 3.0)).await.unwrap();

    // First read populates the cache.
    let first = client.list_livestock().await.unwrap();
    assert_eq!(first.len(), 1);

    // Server state moves on behind the client's back; the cached copy is
    // served as-is.
    store.create(fields("sheep", 2.0)).await.unwrap();
    let second = client.list_livestock().await.unwrap();
    assert_eq!(second.len(), 1);

    // A successful mutation invalidates, so the next read re-fetches.
    client.create_livestock(&candidate("goat", 1.0)).await.unwrap();
    let third = client.list_livestock().await.unwrap();
    assert_eq!(third.len(), 3);
}

#[tokio::test]
async fn update_invalidates_the_cache() {
    let (_store, client) = spawn_server().await;
    let created = client.create_livestock(&candidate("cow", 3.0)).await.unwrap();

    let before = client.list_livestock().await.unwrap();
    assert_eq!(before[0].age, 3.0);

    let patch = LivestockCandidate {
        age: Some(5.0),
        ..LivestockCandidate::default()
    };
    let updated = client.update_livestock(created.id, &patch).await.unwrap();
    assert_eq!(updated.age, 5.0);
    assert_eq!(updated.breed, "test-breed");

    let after = client.list_livestock().await.unwrap();
    assert_eq!(after, vec![updated]);
}

#[tokio::test]
async fn failed_update_leaves_the_cache_untouched() {
    let (store, client) = spawn_server().await;
    client.create_livestock(&candidate("cow", 3.0)).await.unwrap();

    let cached = client.list_livestock().await.unwrap();
    assert_eq!(cached.len(), 1);

    // Move server state so a re-fetch would be observable.
    store.create(fields("sheep", 2.0)).await.unwrap();

    let patch = LivestockCandidate {
        age: Some(5.0),
        ..LivestockCandidate::default()
    };
    let err = client.update_livestock(9999, &patch).await.unwrap_err();
    assert!(matches!(err, ClientError::NotFound));

    // Still the last-known-good collection.
    let after = client.list_livestock().await.unwrap();
    assert_eq!(after.len(), 1);
}

#[tokio::test]
async fn delete_invalidates_only_after_the_response_is_observed() {
    let (store, client) = spawn_server().await;
    let first = client.create_livestock(&candidate("cow", 3.0)).await.unwrap();
    client.create_livestock(&candidate("sheep", 2.0)).await.unwrap();

    let cached = client.list_livestock().await.unwrap();
    assert_eq!(cached.len(), 2);

    client.delete_livestock(first.id).await.unwrap();
    let after_delete = client.list_livestock().await.unwrap();
    assert_eq!(after_delete.len(), 1);
    assert!(after_delete.iter().all(|record| record.id != first.id));

    // A failed delete must not invalidate: move server state, fail, and
    // confirm the cached copy is still served.
    store.create(fields("goat", 1.0)).await.unwrap();
    let err = client.delete_livestock(first.id).await.unwrap_err();
    assert!(matches!(err, ClientError::NotFound));
    let after_failed = client.list_livestock().await.unwrap();
    assert_eq!(after_failed.len(), 1);
}

#[tokio::test]
async fn invalid_create_is_rejected_before_the_network() {
    let (store, client) = spawn_server().await;

    let mut bad = candidate("cow", 3.0);
    bad.breed = None;
    let err = client.create_livestock(&bad).await.unwrap_err();

    match err {
        ClientError::Validation(violations) => {
            assert_eq!(violations.len(), 1);
            assert_eq!(violations[0].field, "breed");
        }
        other => panic!("expected a validation error, got {:?}", other),
    }
    assert!(store.find().await.unwrap().is_empty());
}

#[tokio::test]
async fn invalid_present_fields_block_an_update_locally() {
    let (store, client) = spawn_server().await;
    let created = client.create_livestock(&candidate("cow", 3.0)).await.unwrap();

    let patch = LivestockCandidate {
        age: Some(-1.0),
        ..LivestockCandidate::default()
    };
    let err = client.update_livestock(created.id, &patch).await.unwrap_err();
    assert!(matches!(err, ClientError::Validation(_)));

    let stored = store.find_one(created.id).await.unwrap().unwrap();
    assert_eq!(stored.age, 3.0);
}

#[tokio::test]
async fn delete_of_unknown_id_maps_to_not_found() {
    let (_store, client) = spawn_server().await;
    let err = client.delete_livestock(42).await.unwrap_err();
    assert!(matches!(err, ClientError::NotFound));
}
