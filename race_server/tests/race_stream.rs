mod support;

use futures::StreamExt;
use serde_json::Value;
use std::time::Duration;
use tokio_tungstenite::connect_async;

#[tokio::test]
async fn when_viewer_connects_then_first_message_is_race_snapshot() {
    let (mut stream, _) = connect_async(support::server().ws_url.as_str())
        .await
        .expect("websocket should connect");

    let message = tokio::time::timeout(Duration::from_secs(5), stream.next())
        .await
        .expect("snapshot should arrive")
        .expect("stream should stay open")
        .expect("message should be valid");
    let text = message.into_text().expect("snapshot should be text");
    let payload: Value = serde_json::from_str(&text).expect("snapshot should be json");

    assert_eq!(payload["type"], "RaceUpdate");
    assert_eq!(payload["data"]["status"], "empty");
    assert_eq!(payload["data"]["tick"], 0);
}

#[tokio::test]
async fn unknown_route_returns_404() {
    let base_url = &support::server().http_url;

    let res = reqwest::get(format!("{base_url}/does-not-exist"))
        .await
        .expect("request should succeed");

    assert_eq!(res.status(), reqwest::StatusCode::NOT_FOUND);
}
