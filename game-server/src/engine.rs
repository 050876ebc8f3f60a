use std::sync::Arc;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};
use tracing::{info, warn};

use game_core::{GameSession, SessionEvent, phase_duration_ms};
use game_types::{GamePhase, Line, MessageKind, PlayerId, ServerEvent};

use crate::scheduler::PhaseTimer;
use crate::websocket::connection::{ConnectionId, RoomHub};

/// Inbound work for the dispatch loop: one variant per client event plus
/// the scheduler's phase-tagged ticks.
#[derive(Debug)]
pub enum Command {
    Join {
        conn: ConnectionId,
        username: String,
        joined_at: i64,
    },
    Disconnect {
        conn: ConnectionId,
    },
    Chat {
        conn: ConnectionId,
        text: String,
    },
    Line {
        conn: ConnectionId,
        line: Line,
    },
    Word {
        conn: ConnectionId,
        word: String,
    },
    WordChoices {
        conn: ConnectionId,
    },
    Tick {
        phase: GamePhase,
    },
}

/// Single-threaded run-to-completion dispatch: commands are processed
/// strictly in arrival order, so no two session mutations can ever
/// interleave. Owns the session and the phase timer for its lifetime.
pub async fn run_engine(
    mut session: GameSession,
    hub: Arc<RoomHub>,
    tx: UnboundedSender<Command>,
    mut rx: UnboundedReceiver<Command>,
) {
    info!("game engine started");
    let mut timer = PhaseTimer::new();
    while let Some(command) = rx.recv().await {
        let events = dispatch(&mut session, command);
        apply(&session, &hub, &mut timer, &tx, events).await;
    }
    timer.cancel();
    info!("game engine stopped");
}

fn dispatch(session: &mut GameSession, command: Command) -> Vec<SessionEvent> {
    match command {
        Command::Join {
            conn,
            username,
            joined_at,
        } => session.join(conn.player_id(), username, joined_at),
        Command::Disconnect { conn } => session.disconnect(conn.player_id()),
        Command::Chat { conn, text } => session.chat(conn.player_id(), text),
        Command::Line { line, .. } => session.add_line(line),
        Command::Word { conn, word } => session.choose_word(conn.player_id(), word),
        Command::WordChoices { conn } => session.request_word_choices(conn.player_id()),
        Command::Tick { phase } => session.tick(phase),
    }
}

/// Push a batch of session effects out through the hub and keep the
/// phase timer in sync with the current phase.
async fn apply(
    session: &GameSession,
    hub: &RoomHub,
    timer: &mut PhaseTimer,
    tx: &UnboundedSender<Command>,
    events: Vec<SessionEvent>,
) {
    for event in events {
        match event {
            SessionEvent::JoinRejected { to } => {
                unicast(hub, to, ServerEvent::InvalidUsername).await;
            }
            SessionEvent::PlayerAdded { to, player } => {
                unicast(hub, to, ServerEvent::PlayerAdded { player }).await;
            }
            SessionEvent::Chat { origin, message } => {
                // Close guesses are private feedback to the guesser;
                // everything else goes to the whole room.
                if message.kind == MessageKind::CloseGuess {
                    unicast(hub, origin, ServerEvent::NewChatMessage { message }).await;
                } else {
                    hub.broadcast(ServerEvent::NewChatMessage { message }).await;
                }
            }
            SessionEvent::RosterChanged => {
                hub.broadcast(ServerEvent::AllPlayers {
                    players: session.players(),
                })
                .await;
            }
            SessionEvent::LinesChanged => {
                hub.broadcast(ServerEvent::AllLines {
                    lines: session.lines(),
                })
                .await;
            }
            SessionEvent::PhaseStarted(phase) => {
                timer.cancel();
                hub.broadcast(phase_announcement(phase)).await;
                hub.broadcast(ServerEvent::GameUpdate {
                    game: session.snapshot(),
                })
                .await;
                if phase_duration_ms(phase).is_some() {
                    timer.arm(phase, tx.clone());
                }
            }
            SessionEvent::Countdown { remaining_ms } => {
                hub.broadcast(ServerEvent::CountdownTick { remaining_ms }).await;
            }
            SessionEvent::AutoWordChosen { drawer, word } => {
                unicast(hub, drawer, ServerEvent::AutoChosenWord { word }).await;
            }
            SessionEvent::SnapshotFor { to } => {
                unicast(
                    hub,
                    to,
                    ServerEvent::AllLines {
                        lines: session.lines(),
                    },
                )
                .await;
                unicast(
                    hub,
                    to,
                    ServerEvent::GameUpdate {
                        game: session.snapshot(),
                    },
                )
                .await;
            }
            SessionEvent::WordChoicesFor { to, choices } => {
                unicast(hub, to, ServerEvent::ChooseWord { choices }).await;
            }
        }
    }
}

fn phase_announcement(phase: GamePhase) -> ServerEvent {
    match phase {
        GamePhase::Waiting => ServerEvent::GameWaiting,
        GamePhase::TurnStart => ServerEvent::TurnStart,
        GamePhase::TurnDuring => ServerEvent::TurnDuring,
        GamePhase::TurnEnd => ServerEvent::TurnEnd,
        GamePhase::GameOver => ServerEvent::GameOver,
    }
}

async fn unicast(hub: &RoomHub, to: PlayerId, event: ServerEvent) {
    if let Err(e) = hub.send_to(ConnectionId::from(to), event).await {
        warn!(%to, "failed to deliver event: {}", e);
    }
}
