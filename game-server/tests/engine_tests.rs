use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use game_core::GameSession;
use game_server::engine::{Command, run_engine};
use game_server::websocket::{ConnectionId, RoomHub};
use game_types::ServerEvent;

fn start_engine() -> (Arc<RoomHub>, UnboundedSender<Command>) {
    let hub = Arc::new(RoomHub::new());
    let (tx, rx) = mpsc::unbounded_channel();
    tokio::spawn(run_engine(
        GameSession::default(),
        hub.clone(),
        tx.clone(),
        rx,
    ));
    (hub, tx)
}

/// Receive events until `pred` matches, with a hard cap so a broken
/// engine fails the test instead of hanging it.
async fn recv_until<F>(rx: &mut UnboundedReceiver<ServerEvent>, mut pred: F) -> Vec<ServerEvent>
where
    F: FnMut(&ServerEvent) -> bool,
{
    let mut seen = Vec::new();
    for _ in 0..500 {
        let event = tokio::time::timeout(Duration::from_secs(120), rx.recv())
            .await
            .expect("timed out waiting for event")
            .expect("engine hub channel closed");
        let done = pred(&event);
        seen.push(event);
        if done {
            return seen;
        }
    }
    panic!("event never arrived; saw {} events", seen.len());
}

#[tokio::test(start_paused = true)]
async fn join_flow_sends_confirmation_and_snapshots() {
    let (hub, tx) = start_engine();
    let ada = ConnectionId::new();
    let mut ada_rx = hub.register(ada).await;

    tx.send(Command::Join {
        conn: ada,
        username: "Ada".to_string(),
        joined_at: 100,
    })
    .unwrap();

    let seen = recv_until(&mut ada_rx, |e| matches!(e, ServerEvent::GameUpdate { .. })).await;

    assert!(matches!(
        seen[0],
        ServerEvent::PlayerAdded { ref player } if player.username == "Ada"
    ));
    assert!(seen.iter().any(|e| matches!(
        e,
        ServerEvent::NewChatMessage { message } if message.text == "Ada has joined the chat!"
    )));
    assert!(seen.iter().any(|e| matches!(
        e,
        ServerEvent::AllPlayers { players } if players.len() == 1
    )));
    assert!(seen.iter().any(|e| matches!(e, ServerEvent::AllLines { .. })));
}

#[tokio::test(start_paused = true)]
async fn duplicate_username_is_rejected_privately() {
    let (hub, tx) = start_engine();
    let ada = ConnectionId::new();
    let impostor = ConnectionId::new();
    let mut ada_rx = hub.register(ada).await;
    let mut impostor_rx = hub.register(impostor).await;

    tx.send(Command::Join {
        conn: ada,
        username: "Ada".to_string(),
        joined_at: 100,
    })
    .unwrap();
    tx.send(Command::Join {
        conn: impostor,
        username: "Ada".to_string(),
        joined_at: 200,
    })
    .unwrap();

    let seen = recv_until(&mut impostor_rx, |e| {
        matches!(e, ServerEvent::InvalidUsername)
    })
    .await;
    // The impostor only saw Ada's broadcasts plus the private rejection.
    assert!(!seen
        .iter()
        .any(|e| matches!(e, ServerEvent::PlayerAdded { .. })));

    // Ada never hears about the rejection.
    let ada_seen = recv_until(&mut ada_rx, |e| matches!(e, ServerEvent::GameUpdate { .. })).await;
    assert!(!ada_seen
        .iter()
        .any(|e| matches!(e, ServerEvent::InvalidUsername)));
}

#[tokio::test(start_paused = true)]
async fn second_join_starts_countdown_to_turn_during() {
    let (hub, tx) = start_engine();
    let ada = ConnectionId::new();
    let ben = ConnectionId::new();
    let mut ada_rx = hub.register(ada).await;
    let mut ben_rx = hub.register(ben).await;

    tx.send(Command::Join {
        conn: ada,
        username: "Ada".to_string(),
        joined_at: 100,
    })
    .unwrap();
    tx.send(Command::Join {
        conn: ben,
        username: "Ben".to_string(),
        joined_at: 200,
    })
    .unwrap();

    // Round starts immediately on the second join.
    recv_until(&mut ben_rx, |e| matches!(e, ServerEvent::TurnStart)).await;

    // Paused-time auto-advance drives the 15 turn-start ticks.
    let seen = recv_until(&mut ben_rx, |e| matches!(e, ServerEvent::TurnDuring)).await;
    let ticks = seen
        .iter()
        .filter(|e| matches!(e, ServerEvent::CountdownTick { .. }))
        .count();
    assert_eq!(ticks, 15);

    // Nobody picked a word, so the drawer (Ada, earliest join) is told
    // the auto-chosen easy word; Ben is not.
    let ada_seen = recv_until(&mut ada_rx, |e| {
        matches!(e, ServerEvent::AutoChosenWord { .. })
    })
    .await;
    assert!(ada_seen
        .iter()
        .any(|e| matches!(e, ServerEvent::AutoChosenWord { word } if !word.is_empty())));
}

#[tokio::test(start_paused = true)]
async fn disconnect_below_minimum_silences_the_countdown() {
    let (hub, tx) = start_engine();
    let ada = ConnectionId::new();
    let ben = ConnectionId::new();
    let mut ada_rx = hub.register(ada).await;
    let ben_rx = hub.register(ben).await;

    tx.send(Command::Join {
        conn: ada,
        username: "Ada".to_string(),
        joined_at: 100,
    })
    .unwrap();
    tx.send(Command::Join {
        conn: ben,
        username: "Ben".to_string(),
        joined_at: 200,
    })
    .unwrap();
    recv_until(&mut ada_rx, |e| matches!(e, ServerEvent::TurnStart)).await;

    drop(ben_rx);
    hub.unregister(ben).await;
    tx.send(Command::Disconnect { conn: ben }).unwrap();

    let seen = recv_until(&mut ada_rx, |e| matches!(e, ServerEvent::GameWaiting)).await;
    assert!(seen.iter().any(|e| matches!(
        e,
        ServerEvent::NewChatMessage { message } if message.text == "Ben has left the chat"
    )));

    // The roster broadcast is the last thing the disconnect produces.
    // After it, the timer is gone: five quiet seconds, no further ticks.
    recv_until(&mut ada_rx, |e| matches!(e, ServerEvent::AllPlayers { .. })).await;
    tokio::time::sleep(Duration::from_secs(5)).await;
    assert!(ada_rx.try_recv().is_err());
}
