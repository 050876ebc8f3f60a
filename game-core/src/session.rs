use game_types::{
    ChatMessage, GamePhase, GameSnapshot, Line, MessageKind, Player, PlayerId, Role, WordChoices,
};
use tracing::{debug, error, info};

use crate::drawer::select_next_drawer;
use crate::events::SessionEvent;
use crate::guess::{GuessEvaluator, GuessOutcome};
use crate::lines::LineStore;
use crate::registry::{JoinError, PlayerRegistry};
use crate::words::WordBank;

pub const TURN_START_MS: u64 = 15_000;
pub const TURN_DURING_MS: u64 = 90_000;
pub const TURN_END_MS: u64 = 8_000;
pub const GAME_OVER_MS: u64 = 10_000;
pub const TICK_MS: u64 = 1_000;
pub const MIN_PLAYERS: usize = 2;

/// Fixed duration of a phase; `None` for the unbounded waiting phase.
pub fn phase_duration_ms(phase: GamePhase) -> Option<u64> {
    match phase {
        GamePhase::Waiting => None,
        GamePhase::TurnStart => Some(TURN_START_MS),
        GamePhase::TurnDuring => Some(TURN_DURING_MS),
        GamePhase::TurnEnd => Some(TURN_END_MS),
        GamePhase::GameOver => Some(GAME_OVER_MS),
    }
}

/// The authoritative game state: roster, phase, secret word, canvas and
/// scores. All mutating operations run on the single-threaded dispatch
/// loop and return the effects to push out, so the session needs no
/// internal locking.
pub struct GameSession {
    phase: GamePhase,
    remaining_ms: Option<u64>,
    round: u32,
    word: String,
    word_choices: WordChoices,
    drawer: Option<PlayerId>,
    registry: PlayerRegistry,
    lines: LineStore,
    evaluator: GuessEvaluator,
    words: WordBank,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(WordBank::default())
    }
}

impl GameSession {
    pub fn new(words: WordBank) -> Self {
        Self {
            phase: GamePhase::Waiting,
            remaining_ms: None,
            round: 1,
            word: String::new(),
            word_choices: WordChoices::default(),
            drawer: None,
            registry: PlayerRegistry::new(),
            lines: LineStore::new(),
            evaluator: GuessEvaluator::default(),
            words,
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn remaining_ms(&self) -> Option<u64> {
        self.remaining_ms
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn secret_word(&self) -> &str {
        &self.word
    }

    pub fn drawer(&self) -> Option<PlayerId> {
        self.drawer
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.registry.get(id)
    }

    pub fn players(&self) -> Vec<Player> {
        self.registry.roster()
    }

    pub fn player_count(&self) -> usize {
        self.registry.len()
    }

    pub fn lines(&self) -> Vec<Line> {
        self.lines.snapshot()
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            phase: self.phase,
            remaining_ms: self.remaining_ms,
            round: self.round,
        }
    }

    /// A new connection asks to join under `username`.
    pub fn join(&mut self, id: PlayerId, username: String, joined_at: i64) -> Vec<SessionEvent> {
        let player = match self.registry.join(id, username, joined_at) {
            Ok(player) => player.clone(),
            Err(JoinError::DuplicateUsername(username)) => {
                info!(%id, username, "join rejected: duplicate username");
                return vec![SessionEvent::JoinRejected { to: id }];
            }
        };

        info!(%id, username = player.username, "player joined");
        let mut events = vec![
            SessionEvent::PlayerAdded {
                to: id,
                player: player.clone(),
            },
            SessionEvent::Chat {
                origin: id,
                message: ChatMessage {
                    username: player.username.clone(),
                    text: format!("{} has joined the chat!", player.username),
                    kind: MessageKind::Join,
                },
            },
            SessionEvent::RosterChanged,
            SessionEvent::SnapshotFor { to: id },
        ];

        if self.phase == GamePhase::Waiting && self.registry.len() >= MIN_PLAYERS {
            events.extend(self.prepare_round_start());
        }
        events
    }

    /// A connection dropped. Removing the last-but-one player forces the
    /// session back to waiting; the engine cancels the timer on seeing
    /// the phase change.
    pub fn disconnect(&mut self, id: PlayerId) -> Vec<SessionEvent> {
        let Some(player) = self.registry.remove(id) else {
            return Vec::new();
        };

        info!(%id, username = player.username, "player left");
        if self.drawer == Some(id) {
            // Drawer-less but valid until the next turn start re-selects.
            self.drawer = None;
        }

        let mut events = vec![SessionEvent::Chat {
            origin: id,
            message: ChatMessage {
                username: player.username.clone(),
                text: format!("{} has left the chat", player.username),
                kind: MessageKind::Leave,
            },
        }];

        if self.registry.len() < MIN_PLAYERS && self.phase != GamePhase::Waiting {
            self.phase = GamePhase::Waiting;
            self.remaining_ms = None;
            events.push(SessionEvent::PhaseStarted(GamePhase::Waiting));
        }
        events.push(SessionEvent::RosterChanged);
        events
    }

    /// Classify an incoming chat message against the secret word. Correct
    /// guesses mark the sender as a turn winner; the score is committed at
    /// the next turn start.
    pub fn chat(&mut self, id: PlayerId, text: String) -> Vec<SessionEvent> {
        let Some(player) = self.registry.get(id) else {
            return Vec::new();
        };
        let username = player.username.clone();

        // No secret word outside the drawing window; everything is plain
        // chat then (an empty secret would otherwise match any guess).
        let outcome = if self.word.is_empty() {
            GuessOutcome::Regular
        } else {
            self.evaluator.classify(&text, &self.word)
        };

        let (kind, rendered) = match outcome {
            GuessOutcome::Correct => {
                if let Some(player) = self.registry.get_mut(id) {
                    player.won_turn = true;
                }
                (
                    MessageKind::CorrectGuess,
                    format!("{username} guessed the word!"),
                )
            }
            GuessOutcome::Close => (MessageKind::CloseGuess, format!("{username} close guess!")),
            GuessOutcome::Regular => (MessageKind::Regular, text),
        };

        vec![SessionEvent::Chat {
            origin: id,
            message: ChatMessage {
                username,
                text: rendered,
                kind,
            },
        }]
    }

    pub fn add_line(&mut self, line: Line) -> Vec<SessionEvent> {
        self.lines.append(line);
        vec![SessionEvent::LinesChanged]
    }

    /// The drawer picked a word early: zero the turn-start timer and
    /// advance to the drawing phase right away.
    pub fn choose_word(&mut self, id: PlayerId, word: String) -> Vec<SessionEvent> {
        if self.phase != GamePhase::TurnStart || self.drawer != Some(id) {
            debug!(%id, "ignoring word choice outside turn start or from non-drawer");
            return Vec::new();
        }

        self.word = word;
        self.remaining_ms = Some(0);
        self.finish_turn_start()
    }

    /// Produce a fresh word triple for the requesting connection.
    pub fn request_word_choices(&mut self, id: PlayerId) -> Vec<SessionEvent> {
        self.word_choices = self.words.choices();
        vec![SessionEvent::WordChoicesFor {
            to: id,
            choices: self.word_choices.clone(),
        }]
    }

    /// One scheduler tick for `phase`. Ticks carry the phase they were
    /// armed for so a tick that outlives its phase is discarded without
    /// touching any state.
    pub fn tick(&mut self, phase: GamePhase) -> Vec<SessionEvent> {
        if phase != self.phase {
            debug!(?phase, current = ?self.phase, "ignoring stale tick");
            return Vec::new();
        }
        let Some(remaining) = self.remaining_ms else {
            return Vec::new();
        };

        let remaining = remaining.saturating_sub(TICK_MS);
        self.remaining_ms = Some(remaining);
        let mut events = vec![SessionEvent::Countdown {
            remaining_ms: remaining,
        }];
        if remaining > 0 {
            return events;
        }

        match phase {
            GamePhase::TurnStart => events.extend(self.finish_turn_start()),
            GamePhase::TurnDuring => {
                self.word.clear();
                self.phase = GamePhase::TurnEnd;
                self.remaining_ms = Some(TURN_END_MS);
                events.push(SessionEvent::PhaseStarted(GamePhase::TurnEnd));
            }
            GamePhase::TurnEnd => {
                let all_drawn = self.registry.iter_ordered().all(|p| p.has_drawn);
                if all_drawn {
                    self.phase = GamePhase::GameOver;
                    self.remaining_ms = Some(GAME_OVER_MS);
                    events.push(SessionEvent::PhaseStarted(GamePhase::GameOver));
                } else {
                    events.extend(self.prepare_turn_start());
                }
            }
            GamePhase::GameOver => {
                self.round += 1;
                events.extend(self.prepare_round_start());
            }
            GamePhase::Waiting => {}
        }
        events
    }

    /// Full round reset: everyone back to undrawn, unwon and zero points,
    /// then the first turn of the round.
    fn prepare_round_start(&mut self) -> Vec<SessionEvent> {
        for player in self.registry.iter_mut() {
            player.has_drawn = false;
            player.won_turn = false;
            player.score = 0;
        }
        self.prepare_turn_start()
    }

    /// Commit the finished turn's wins, rotate the drawer, clear the
    /// canvas and arm the turn-start phase.
    fn prepare_turn_start(&mut self) -> Vec<SessionEvent> {
        for player in self.registry.iter_mut() {
            if player.won_turn {
                player.score += 1;
            }
            player.won_turn = false;
            player.role = Role::Guesser;
        }

        self.word.clear();
        self.lines.clear();
        // Pre-supplied choices so the auto-word fallback always has an
        // easy word even if the drawer never asks.
        self.word_choices = self.words.choices();

        let Some(drawer_id) = select_next_drawer(self.registry.iter_ordered()) else {
            error!("no eligible drawer candidate at turn start");
            return Vec::new();
        };
        if let Some(drawer) = self.registry.get_mut(drawer_id) {
            drawer.role = Role::Drawer;
            drawer.has_drawn = true;
        }
        self.drawer = Some(drawer_id);

        self.phase = GamePhase::TurnStart;
        self.remaining_ms = Some(TURN_START_MS);
        vec![
            SessionEvent::PhaseStarted(GamePhase::TurnStart),
            SessionEvent::RosterChanged,
            SessionEvent::LinesChanged,
        ]
    }

    /// Turn-start exit: fall back to the easy word if none was chosen,
    /// then move to the drawing phase.
    fn finish_turn_start(&mut self) -> Vec<SessionEvent> {
        let mut events = Vec::new();
        if self.word.is_empty() {
            self.word = self.word_choices.easy.clone();
            if let Some(drawer) = self.drawer {
                events.push(SessionEvent::AutoWordChosen {
                    drawer,
                    word: self.word.clone(),
                });
            }
        }
        self.phase = GamePhase::TurnDuring;
        self.remaining_ms = Some(TURN_DURING_MS);
        events.push(SessionEvent::PhaseStarted(GamePhase::TurnDuring));
        events
    }
}
