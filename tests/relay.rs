mod common;

use std::sync::atomic::Ordering;
use std::time::Duration;

use common::{event, presence, wait_until, FakeRelay, Script, USER_ID};
use profilecard::gateway::reconnect::{ExponentialBackoff, FixedDelay};
use profilecard::gateway::RelayClient;
use tokio::sync::mpsc;

const RECV_TIMEOUT: Duration = Duration::from_secs(5);

#[tokio::test]
async fn test_subscribes_with_user_id_on_open() {
    let relay = FakeRelay::new(Script::default());
    let (ws_url, _) = relay.spawn().await;
    let (tx, _rx) = mpsc::channel(8);
    let client = RelayClient::new(ws_url, USER_ID, FixedDelay(Duration::from_millis(50)));
    let task = tokio::spawn(client.run(tx));

    assert!(wait_until(RECV_TIMEOUT, || !relay.received().is_empty()).await);
    assert_eq!(
        relay.received()[0],
        serde_json::json!({ "op": 2, "d": { "subscribe_to_id": USER_ID } })
    );
    task.abort();
}

#[tokio::test]
async fn test_forwards_presence_events_in_order() {
    let relay = FakeRelay::new(Script {
        frames: vec![
            event("INIT_STATE", presence("online")),
            event("SOMETHING_ELSE", presence("idle")),
            serde_json::json!({ "op": 0, "t": "PRESENCE_UPDATE", "d": { "activities": "nope" } }),
            event("PRESENCE_UPDATE", presence("dnd")),
        ],
        ..Default::default()
    });
    let (ws_url, _) = relay.spawn().await;
    let (tx, mut rx) = mpsc::channel(8);
    let task = tokio::spawn(RelayClient::new(ws_url, USER_ID, FixedDelay::default()).run(tx));

    let first = tokio::time::timeout(RECV_TIMEOUT, rx.recv()).await.unwrap().unwrap();
    let second = tokio::time::timeout(RECV_TIMEOUT, rx.recv()).await.unwrap().unwrap();
    assert_eq!(first.discord_status, "online");
    assert_eq!(second.discord_status, "dnd");
    assert_eq!(second.discord_user.username.as_deref(), Some("dscbmr"));
    assert!(
        tokio::time::timeout(Duration::from_millis(200), rx.recv()).await.is_err(),
        "ignored frames must not be forwarded"
    );
    task.abort();
}

#[tokio::test]
async fn test_reconnects_after_close_with_fixed_delay() {
    let delay = Duration::from_millis(200);
    let relay = FakeRelay::new(Script {
        frames: vec![event("INIT_STATE", presence("online"))],
        hold: Duration::ZERO,
        ..Default::default()
    });
    let (ws_url, _) = relay.spawn().await;
    let (tx, mut rx) = mpsc::channel(64);
    let task = tokio::spawn(RelayClient::new(ws_url, USER_ID, FixedDelay(delay)).run(tx));

    assert!(wait_until(RECV_TIMEOUT, || relay.connection_count() >= 3).await);
    task.abort();

    let stamps = relay.connected_at.lock().unwrap().clone();
    for pair in stamps.windows(2) {
        assert!(
            pair[1] - pair[0] >= delay,
            "reconnected after {:?}, expected at least {:?}",
            pair[1] - pair[0],
            delay
        );
    }
    assert_eq!(relay.max_open.load(Ordering::SeqCst), 1);
    // every session delivered its INIT_STATE
    assert!(rx.try_recv().is_ok());
}

#[tokio::test]
async fn test_no_new_attempt_while_socket_open() {
    let relay = FakeRelay::new(Script {
        hold: Duration::from_millis(800),
        ..Default::default()
    });
    let (ws_url, _) = relay.spawn().await;
    let (tx, _rx) = mpsc::channel(8);
    let task = tokio::spawn(
        RelayClient::new(ws_url, USER_ID, FixedDelay(Duration::from_millis(20))).run(tx),
    );

    assert!(wait_until(RECV_TIMEOUT, || relay.connection_count() == 1).await);
    tokio::time::sleep(Duration::from_millis(400)).await;
    assert_eq!(relay.connection_count(), 1);

    assert!(wait_until(RECV_TIMEOUT, || relay.connection_count() >= 2).await);
    assert_eq!(relay.max_open.load(Ordering::SeqCst), 1);
    task.abort();
}

#[tokio::test]
async fn test_answers_hello_with_heartbeats() {
    let relay = FakeRelay::new(Script {
        hello_interval_ms: Some(1000),
        ..Default::default()
    });
    let (ws_url, _) = relay.spawn().await;
    let (tx, _rx) = mpsc::channel(8);
    let task = tokio::spawn(RelayClient::new(ws_url, USER_ID, FixedDelay::default()).run(tx));

    let heartbeat = serde_json::json!({ "op": 3 });
    assert!(
        wait_until(Duration::from_secs(3), || relay.received().contains(&heartbeat)).await,
        "expected a heartbeat, got {:?}",
        relay.received()
    );
    task.abort();
}

#[tokio::test]
async fn test_heartbeat_can_be_disabled() {
    let relay = FakeRelay::new(Script {
        hello_interval_ms: Some(1000),
        ..Default::default()
    });
    let (ws_url, _) = relay.spawn().await;
    let (tx, _rx) = mpsc::channel(8);
    let client = RelayClient::new(ws_url, USER_ID, FixedDelay::default()).with_heartbeat(false);
    let task = tokio::spawn(client.run(tx));

    tokio::time::sleep(Duration::from_millis(1500)).await;
    assert_eq!(relay.received().len(), 1, "only the subscribe frame");
    task.abort();
}

#[tokio::test]
async fn test_stops_when_presence_receiver_dropped() {
    let relay = FakeRelay::new(Script {
        frames: vec![event("INIT_STATE", presence("online"))],
        ..Default::default()
    });
    let (ws_url, _) = relay.spawn().await;
    let (tx, rx) = mpsc::channel(8);
    drop(rx);
    let task = tokio::spawn(RelayClient::new(ws_url, USER_ID, FixedDelay::default()).run(tx));

    tokio::time::timeout(RECV_TIMEOUT, task)
        .await
        .expect("client should stop once nobody listens")
        .unwrap();
}

#[tokio::test]
async fn test_policy_can_give_up_on_unreachable_relay() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let policy = ExponentialBackoff {
        base: Duration::from_millis(10),
        max: Duration::from_millis(50),
        max_attempts: Some(3),
    };
    let (tx, _rx) = mpsc::channel(8);
    let client = RelayClient::new(format!("ws://127.0.0.1:{port}/socket"), USER_ID, policy);

    tokio::time::timeout(RECV_TIMEOUT, client.run(tx))
        .await
        .expect("client should give up after three failed connects");
}
