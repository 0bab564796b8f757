// End-to-end test of the WebSocket endpoint using warp's test harness:
// two clients connect, get paired, exchange board state, and the
// survivor is notified when its opponent leaves.

use std::time::Duration;

use warp::Filter;

use quickpair::core::lobby::{create_lobby, SharedLobby};
use quickpair::core::message::{ServerMessage, Side};
use quickpair::core::queue::TimeBudget;
use quickpair::handlers::websocket::handle_ws_client;

fn ws_route(
    lobby: SharedLobby,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    warp::path("ws")
        .and(warp::ws())
        .and(warp::any().map(move || lobby.clone()))
        .map(|ws: warp::ws::Ws, lobby: SharedLobby| {
            ws.on_upgrade(move |socket| handle_ws_client(socket, lobby))
        })
}

// Receive frames until one parses as a ServerMessage matching the predicate
async fn recv_until<F>(client: &mut warp::test::WsClient, mut predicate: F) -> ServerMessage
where
    F: FnMut(&ServerMessage) -> bool,
{
    loop {
        let msg = client.recv().await.expect("connection closed while waiting");
        if let Ok(text) = msg.to_str() {
            if let Ok(parsed) = serde_json::from_str::<ServerMessage>(text) {
                if predicate(&parsed) {
                    return parsed;
                }
            }
        }
    }
}

#[tokio::test]
async fn test_clients_are_paired_and_relayed_over_websocket() {
    let lobby = create_lobby(Duration::ZERO);
    let route = ws_route(lobby);

    let mut client_a = warp::test::ws()
        .path("/ws")
        .handshake(route.clone())
        .await
        .expect("handshake A");

    // Greeting and initial presence broadcast
    let version = recv_until(&mut client_a, |msg| {
        matches!(msg, ServerMessage::ServerVersion { .. })
    })
    .await;
    assert_eq!(
        version,
        ServerMessage::ServerVersion {
            version: env!("CARGO_PKG_VERSION").to_string()
        }
    );

    let mut client_b = warp::test::ws()
        .path("/ws")
        .handshake(route.clone())
        .await
        .expect("handshake B");

    // Both observe the presence count reaching 2
    recv_until(&mut client_a, |msg| {
        matches!(msg, ServerMessage::TotalPlayersCountChange { count: 2 })
    })
    .await;
    recv_until(&mut client_b, |msg| {
        matches!(msg, ServerMessage::TotalPlayersCountChange { count: 2 })
    })
    .await;

    // A asks first and waits; give the server time to process before B asks
    client_a
        .send_text(r#"{"type":"want_to_play","time_budget":15}"#)
        .await;
    tokio::time::sleep(Duration::from_millis(250)).await;
    client_b
        .send_text(r#"{"type":"want_to_play","time_budget":15}"#)
        .await;

    let made_a = recv_until(&mut client_a, |msg| {
        matches!(msg, ServerMessage::MatchMade { .. })
    })
    .await;
    let made_b = recv_until(&mut client_b, |msg| {
        matches!(msg, ServerMessage::MatchMade { .. })
    })
    .await;
    assert_eq!(
        made_a,
        ServerMessage::MatchMade {
            side: Side::White,
            time_budget: TimeBudget::FifteenMinutes
        }
    );
    assert_eq!(
        made_b,
        ServerMessage::MatchMade {
            side: Side::Black,
            time_budget: TimeBudget::FifteenMinutes
        }
    );

    // Board state flows from B to A unchanged
    client_b
        .send_text(r#"{"type":"sync_state","fen":"some-fen","turn":"w"}"#)
        .await;
    let sync = recv_until(&mut client_a, |msg| {
        matches!(msg, ServerMessage::SyncStateFromServer { .. })
    })
    .await;
    assert_eq!(
        sync,
        ServerMessage::SyncStateFromServer {
            fen: "some-fen".to_string(),
            turn: "w".to_string()
        }
    );

    // B leaves; A is declared winner by disconnect
    drop(client_b);
    let over = recv_until(&mut client_a, |msg| {
        matches!(msg, ServerMessage::GameOverFromServer { .. })
    })
    .await;
    match over {
        ServerMessage::GameOverFromServer { outcome } => {
            assert_eq!(outcome.reason, "disconnect");
            assert_eq!(outcome.winner.as_deref(), Some("White"));
        }
        other => panic!("unexpected message: {:?}", other),
    }
}

#[tokio::test]
async fn test_game_over_with_full_color_name_is_relayed() {
    let lobby = create_lobby(Duration::ZERO);
    let route = ws_route(lobby);

    let mut client_a = warp::test::ws()
        .path("/ws")
        .handshake(route.clone())
        .await
        .expect("handshake A");
    let mut client_b = warp::test::ws()
        .path("/ws")
        .handshake(route.clone())
        .await
        .expect("handshake B");

    client_a
        .send_text(r#"{"type":"want_to_play","time_budget":1}"#)
        .await;
    tokio::time::sleep(Duration::from_millis(250)).await;
    client_b
        .send_text(r#"{"type":"want_to_play","time_budget":1}"#)
        .await;
    recv_until(&mut client_a, |msg| {
        matches!(msg, ServerMessage::MatchMade { .. })
    })
    .await;
    recv_until(&mut client_b, |msg| {
        matches!(msg, ServerMessage::MatchMade { .. })
    })
    .await;

    // The board UI reports outcomes with full color names; the payload
    // must reach the opponent unchanged
    client_b
        .send_text(
            r#"{"type":"game_over","outcome":{"reason":"checkmate","winner":"White","message":"White won by checkmate!"}}"#,
        )
        .await;
    let over = recv_until(&mut client_a, |msg| {
        matches!(msg, ServerMessage::GameOverFromServer { .. })
    })
    .await;
    match over {
        ServerMessage::GameOverFromServer { outcome } => {
            assert_eq!(outcome.reason, "checkmate");
            assert_eq!(outcome.winner.as_deref(), Some("White"));
            assert_eq!(outcome.message, "White won by checkmate!");
        }
        other => panic!("unexpected message: {:?}", other),
    }
}

#[tokio::test]
async fn test_malformed_frames_are_ignored() {
    let lobby = create_lobby(Duration::ZERO);
    let route = ws_route(lobby.clone());

    let mut client = warp::test::ws()
        .path("/ws")
        .handshake(route)
        .await
        .expect("handshake");

    // Consume the connect-time messages so the next count we see is the
    // unicast reply
    recv_until(&mut client, |msg| {
        matches!(msg, ServerMessage::ServerVersion { .. })
    })
    .await;

    client.send_text("not json at all").await;
    client
        .send_text(r#"{"type":"want_to_play","time_budget":99}"#)
        .await;

    // The connection stays up and the server still answers requests
    client.send_text(r#"{"type":"get_player_count"}"#).await;
    recv_until(&mut client, |msg| {
        matches!(msg, ServerMessage::TotalPlayersCountChange { count: 1 })
    })
    .await;
}

#[tokio::test]
async fn test_health_route_replies_ok() {
    let health_route = warp::path("health").map(|| "OK");
    let response = warp::test::request()
        .path("/health")
        .reply(&health_route)
        .await;
    assert_eq!(response.status(), 200);
    assert_eq!(response.body(), "OK");
}
