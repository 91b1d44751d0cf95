// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Integration tests against an in-process scripted WebSocket hub.

use futures_util::{SinkExt, StreamExt};
use tokio::net::{TcpListener, TcpStream};
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{WebSocketStream, accept_async};

use calor_lib::{Client, ItemState, Percent, SessionState, WsTransport};

type Hub = WebSocketStream<TcpStream>;

/// Opt-in log output: `RUST_LOG=calor_lib=debug cargo test`.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Starts a scripted hub on an ephemeral port and returns its URL.
async fn spawn_hub<F, Fut>(script: F) -> String
where
    F: FnOnce(Hub) -> Fut + Send + 'static,
    Fut: Future<Output = ()> + Send,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let hub = accept_async(stream).await.unwrap();
        script(hub).await;
    });
    format!("ws://{addr}/api")
}

async fn connect(url: &str) -> Client<WsTransport> {
    Client::new(WsTransport::open_url(url).await.unwrap())
}

/// Reads the next text frame, skipping pings.
async fn next_text(hub: &mut Hub) -> String {
    loop {
        match hub.next().await {
            Some(Ok(Message::Text(text))) => return text.as_str().to_owned(),
            Some(Ok(_)) => {}
            other => panic!("hub connection ended unexpectedly: {other:?}"),
        }
    }
}

async fn reply(hub: &mut Hub, frame: &str) {
    hub.send(Message::text(frame)).await.unwrap();
}

const TOPOLOGY: &str = r#"{
    "msg": "get_home",
    "data": {
        "home": [
            {
                "name": "Kitchen",
                "type": "kitchen",
                "items": [
                    {"id": "output_7", "type": "OutputLightDimmer", "name": "Spots", "state": "50"},
                    {"id": "input_3", "type": "InputSwitch", "name": "Wall switch", "state": "false"}
                ]
            }
        ]
    }
}"#;

// ============================================================================
// Full Session Lifecycle
// ============================================================================

#[tokio::test]
async fn full_session_lifecycle() {
    init_tracing();
    let url = spawn_hub(|mut hub| async move {
        let login = next_text(&mut hub).await;
        assert!(login.contains(r#""cn_user":"user""#), "bad login: {login}");
        reply(&mut hub, r#"{"msg":"login","data":{"success":"true"}}"#).await;

        let get_home = next_text(&mut hub).await;
        assert_eq!(get_home, r#"{"msg":"get_home"}"#);
        reply(&mut hub, TOPOLOGY).await;
        reply(
            &mut hub,
            r#"{"msg":"event","data":{"data":{"id":"input_3","state":"true"}}}"#,
        )
        .await;

        let command = next_text(&mut hub).await;
        assert_eq!(
            command,
            r#"{"msg":"set_state","data":{"id":"output_7","value":"set 80"}}"#
        );
        reply(&mut hub, r#"{"msg":"set_state","data":{"success":"true"}}"#).await;

        hub.close(None).await.unwrap();
    })
    .await;

    let mut client = connect(&url).await;
    assert_eq!(client.session(), SessionState::Connected);
    assert!(client.login("user", "secret").await.unwrap());

    client.reload_home().await.unwrap();
    assert!(client.dispatch_next().await.unwrap().is_none());
    assert_eq!(client.session(), SessionState::Streaming);
    assert_eq!(client.home().item_count(), 2);

    let event = client.dispatch_next().await.unwrap().unwrap();
    assert_eq!(event.id, "input_3");
    assert_eq!(event.state, ItemState::Bool(true));

    let dimmer = client.item_mut("output_7").unwrap();
    dimmer.set_brightness(80).await.unwrap();
    assert_eq!(dimmer.state(), &ItemState::Percent(Percent::clamped(80)));

    // acknowledgement, then close
    assert!(client.dispatch_next().await.unwrap().is_none());
    assert!(client.dispatch_next().await.is_err());
    assert_eq!(client.session(), SessionState::Closed);
}

// ============================================================================
// Authentication
// ============================================================================

#[tokio::test]
async fn rejected_login_reports_false() {
    init_tracing();
    let url = spawn_hub(|mut hub| async move {
        let _ = next_text(&mut hub).await;
        reply(&mut hub, r#"{"msg":"login","data":{"success":"false"}}"#).await;
    })
    .await;

    let mut client = connect(&url).await;
    assert!(!client.login("user", "wrong").await.unwrap());
    assert_eq!(client.session(), SessionState::Connected);
}

// ============================================================================
// Concurrent Command Sink
// ============================================================================

#[tokio::test]
async fn sink_sends_while_dispatch_loop_is_blocked() {
    init_tracing();
    let url = spawn_hub(|mut hub| async move {
        let _ = next_text(&mut hub).await;
        reply(&mut hub, r#"{"msg":"login","data":{"success":"true"}}"#).await;
        let _ = next_text(&mut hub).await;
        reply(&mut hub, TOPOLOGY).await;

        // The client is now blocked reading; the sink must still get through.
        let command = next_text(&mut hub).await;
        assert_eq!(
            command,
            r#"{"msg":"set_state","data":{"id":"output_7","value":"toggle"}}"#
        );
        reply(&mut hub, r#"{"msg":"set_state","data":{"success":"true"}}"#).await;
        hub.close(None).await.unwrap();
    })
    .await;

    let mut client = connect(&url).await;
    assert!(client.login("user", "secret").await.unwrap());
    client.reload_home().await.unwrap();
    assert!(client.dispatch_next().await.unwrap().is_none());

    let sink = client.sink();
    let issue = tokio::spawn(async move { sink.set_state("output_7", "toggle").await });

    // drains the acknowledgement while the sink task runs
    assert!(client.dispatch_next().await.unwrap().is_none());
    issue.await.unwrap().unwrap();
}
