// Integration test over a real TCP socket: the server is bound to an
// ephemeral port and exercised with a plain tokio-tungstenite client.

use std::net::SocketAddr;
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use tokio_tungstenite::tungstenite::protocol::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use warp::Filter;

use quickpair::core::lobby::{create_lobby, SharedLobby};
use quickpair::core::message::{ServerMessage, Side};
use quickpair::core::queue::TimeBudget;
use quickpair::handlers::websocket::handle_ws_client;

type WsStream = WebSocketStream<MaybeTlsStream<tokio::net::TcpStream>>;

// Bind the server to an ephemeral local port and return its address
fn start_server() -> SocketAddr {
    let lobby = create_lobby(Duration::ZERO);
    let routes = warp::path("ws")
        .and(warp::ws())
        .and(warp::any().map(move || lobby.clone()))
        .map(|ws: warp::ws::Ws, lobby: SharedLobby| {
            ws.on_upgrade(move |socket| handle_ws_client(socket, lobby))
        });
    let (addr, server) = warp::serve(routes).bind_ephemeral(([127, 0, 0, 1], 0));
    tokio::spawn(server);
    addr
}

async fn connect_client(addr: SocketAddr) -> WsStream {
    let (ws, _) = connect_async(format!("ws://{}/ws", addr))
        .await
        .expect("client handshake");
    ws
}

async fn recv_until<F>(ws: &mut WsStream, mut predicate: F) -> ServerMessage
where
    F: FnMut(&ServerMessage) -> bool,
{
    while let Some(Ok(msg)) = ws.next().await {
        if let Message::Text(text) = msg {
            if let Ok(parsed) = serde_json::from_str::<ServerMessage>(&text) {
                if predicate(&parsed) {
                    return parsed;
                }
            }
        }
    }
    panic!("connection closed while waiting for a message");
}

#[tokio::test]
async fn test_connect_greets_and_counts_over_tcp() {
    let addr = start_server();
    let mut client = connect_client(addr).await;

    // The presence broadcast is queued at registration, before the greeting
    recv_until(&mut client, |msg| {
        matches!(msg, ServerMessage::TotalPlayersCountChange { count: 1 })
    })
    .await;
    recv_until(&mut client, |msg| {
        matches!(msg, ServerMessage::ServerVersion { .. })
    })
    .await;

    client.close(None).await.expect("clean close");
}

#[tokio::test]
async fn test_two_tcp_clients_get_matched() {
    let addr = start_server();
    let mut client_a = connect_client(addr).await;
    let mut client_b = connect_client(addr).await;

    client_a
        .send(Message::Text(
            r#"{"type":"want_to_play","time_budget":1}"#.to_string(),
        ))
        .await
        .expect("send A");
    tokio::time::sleep(Duration::from_millis(250)).await;
    client_b
        .send(Message::Text(
            r#"{"type":"want_to_play","time_budget":1}"#.to_string(),
        ))
        .await
        .expect("send B");

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
            time_budget: TimeBudget::OneMinute
        }
    );
    assert_eq!(
        made_b,
        ServerMessage::MatchMade {
            side: Side::Black,
            time_budget: TimeBudget::OneMinute
        }
    );
}
