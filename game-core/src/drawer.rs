use game_types::{Player, PlayerId};

/// Pick the next drawer: the oldest-joined player who has not drawn this
/// round. Equal timestamps fall back to join order because `min_by_key`
/// keeps the first of equal elements.
///
/// `None` means no eligible candidate, which callers treat as an invariant
/// violation: round start resets every `has_drawn` flag before selection
/// ever runs.
pub fn select_next_drawer<'a, I>(players: I) -> Option<PlayerId>
where
    I: IntoIterator<Item = &'a Player>,
{
    players
        .into_iter()
        .filter(|p| !p.has_drawn)
        .min_by_key(|p| p.joined_at)
        .map(|p| p.id)
}
