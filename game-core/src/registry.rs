use game_types::{Player, PlayerId};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JoinError {
    #[error("username '{0}' is already taken")]
    DuplicateUsername(String),
}

/// The set of connected players, keyed by connection id.
///
/// Insertion order is preserved so drawer selection can break joined-at
/// ties deterministically. Display names are unique (case-sensitive)
/// among active players.
#[derive(Debug, Default)]
pub struct PlayerRegistry {
    players: HashMap<PlayerId, Player>,
    order: Vec<PlayerId>,
}

impl PlayerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn join(
        &mut self,
        id: PlayerId,
        username: String,
        joined_at: i64,
    ) -> Result<&Player, JoinError> {
        if self.players.values().any(|p| p.username == username) {
            return Err(JoinError::DuplicateUsername(username));
        }

        self.players.insert(id, Player::new(id, username, joined_at));
        self.order.push(id);
        Ok(&self.players[&id])
    }

    pub fn remove(&mut self, id: PlayerId) -> Option<Player> {
        let removed = self.players.remove(&id);
        if removed.is_some() {
            self.order.retain(|&other| other != id);
        }
        removed
    }

    pub fn get(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(&id)
    }

    pub fn get_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.get_mut(&id)
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Players in join order.
    pub fn iter_ordered(&self) -> impl Iterator<Item = &Player> {
        self.order.iter().filter_map(|id| self.players.get(id))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Player> {
        self.players.values_mut()
    }

    pub fn roster(&self) -> Vec<Player> {
        self.iter_ordered().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_types::Role;
    use uuid::Uuid;

    #[test]
    fn new_player_defaults() {
        let mut registry = PlayerRegistry::new();
        let id = Uuid::new_v4();
        let player = registry.join(id, "Alice".to_string(), 100).unwrap();

        assert_eq!(player.score, 0);
        assert_eq!(player.role, Role::Guesser);
        assert!(!player.has_drawn);
        assert!(!player.won_turn);
        assert_eq!(player.joined_at, 100);
    }

    #[test]
    fn duplicate_username_is_rejected_without_mutation() {
        let mut registry = PlayerRegistry::new();
        registry.join(Uuid::new_v4(), "Alice".to_string(), 1).unwrap();

        let second = registry.join(Uuid::new_v4(), "Alice".to_string(), 2);
        assert_eq!(
            second.unwrap_err(),
            JoinError::DuplicateUsername("Alice".to_string())
        );
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn username_match_is_case_sensitive() {
        let mut registry = PlayerRegistry::new();
        registry.join(Uuid::new_v4(), "Alice".to_string(), 1).unwrap();
        assert!(registry.join(Uuid::new_v4(), "alice".to_string(), 2).is_ok());
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn removal_preserves_join_order() {
        let mut registry = PlayerRegistry::new();
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let c = Uuid::new_v4();
        registry.join(a, "a".to_string(), 1).unwrap();
        registry.join(b, "b".to_string(), 2).unwrap();
        registry.join(c, "c".to_string(), 3).unwrap();

        registry.remove(b);
        let names: Vec<_> = registry.iter_ordered().map(|p| p.username.as_str()).collect();
        assert_eq!(names, vec!["a", "c"]);
    }

    #[test]
    fn removing_unknown_player_is_a_noop() {
        let mut registry = PlayerRegistry::new();
        registry.join(Uuid::new_v4(), "a".to_string(), 1).unwrap();
        assert!(registry.remove(Uuid::new_v4()).is_none());
        assert_eq!(registry.len(), 1);
    }
}
