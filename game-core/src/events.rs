use game_types::{ChatMessage, GamePhase, Player, PlayerId, WordChoices};

/// Effects emitted by [`crate::GameSession`] operations. The transport
/// layer turns these into unicast or broadcast pushes; the session itself
/// never talks to a socket.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// Duplicate username; reported to the requester only.
    JoinRejected { to: PlayerId },
    /// Confirmation carrying the freshly created player, requester only.
    PlayerAdded { to: PlayerId, player: Player },
    /// Chat traffic. Close guesses are delivered to the origin only,
    /// everything else is broadcast.
    Chat { origin: PlayerId, message: ChatMessage },
    /// Roster changed; broadcast the full player list.
    RosterChanged,
    /// Line store changed; broadcast the full line sequence.
    LinesChanged,
    /// A phase was entered; announce it, push a fresh game snapshot, and
    /// re-arm (or cancel, for waiting) the countdown timer.
    PhaseStarted(GamePhase),
    /// One second elapsed in the current phase.
    Countdown { remaining_ms: u64 },
    /// The turn-start timer ran out with no word chosen; the easy choice
    /// was picked automatically and only the drawer is told.
    AutoWordChosen { drawer: PlayerId, word: String },
    /// Full-state catch-up (lines + game snapshot) for one connection.
    SnapshotFor { to: PlayerId },
    /// Word choices for the requesting connection only.
    WordChoicesFor { to: PlayerId, choices: WordChoices },
}
