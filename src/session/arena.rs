//! Caller-owned collection of live sessions

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::Session;

/// Opaque handle to a session in a [`SessionArena`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SessionId(u64);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "session-{}", self.0)
    }
}

/// Sessions keyed by id. Ids are never reused within one arena.
#[derive(Debug, Default)]
pub struct SessionArena {
    sessions: HashMap<SessionId, Session>,
    next_id: u64,
}

impl SessionArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a fresh session and return its id.
    pub fn create(&mut self) -> SessionId {
        self.insert(Session::new())
    }

    /// Take ownership of an existing session.
    pub fn insert(&mut self, session: Session) -> SessionId {
        let id = SessionId(self.next_id);
        self.next_id += 1;
        self.sessions.insert(id, session);
        debug!(%id, live = self.sessions.len(), "session added");
        id
    }

    pub fn get(&self, id: SessionId) -> Option<&Session> {
        self.sessions.get(&id)
    }

    pub fn get_mut(&mut self, id: SessionId) -> Option<&mut Session> {
        self.sessions.get_mut(&id)
    }

    pub fn remove(&mut self, id: SessionId) -> Option<Session> {
        let removed = self.sessions.remove(&id);
        if removed.is_some() {
            debug!(%id, live = self.sessions.len(), "session removed");
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Live ids in creation order
    pub fn ids(&self) -> Vec<SessionId> {
        let mut ids: Vec<_> = self.sessions.keys().copied().collect();
        ids.sort_unstable();
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_and_lookup() {
        let mut arena = SessionArena::new();
        assert!(arena.is_empty());
        let a = arena.create();
        let b = arena.insert(Session::with_seed(1));
        assert_ne!(a, b);
        assert_eq!(arena.len(), 2);
        assert_eq!(arena.ids(), vec![a, b]);

        assert!(arena.get_mut(b).unwrap().add_player("alice"));
        assert_eq!(arena.get(b).unwrap().player_name(crate::board::Stone::Black), Some("alice"));
        assert!(arena.get(a).unwrap().player_name(crate::board::Stone::Black).is_none());
    }

    #[test]
    fn test_sessions_are_independent() {
        let mut arena = SessionArena::new();
        let a = arena.insert(Session::with_seed(2));
        let b = arena.insert(Session::with_seed(3));
        for id in [a, b] {
            let s = arena.get_mut(id).unwrap();
            s.set_ai_mode(true, "human");
            s.add_player("human");
            s.add_player("engine");
        }
        assert!(arena.get_mut(a).unwrap().process_move("human", 7, 7));
        assert_eq!(arena.get(a).unwrap().board().move_count(), 1);
        assert_eq!(arena.get(b).unwrap().board().move_count(), 0);
    }

    #[test]
    fn test_remove_does_not_reuse_ids() {
        let mut arena = SessionArena::new();
        let a = arena.create();
        assert!(arena.remove(a).is_some());
        assert!(arena.remove(a).is_none());
        assert!(arena.get(a).is_none());
        let b = arena.create();
        assert_ne!(a, b);
        assert_eq!(b.to_string(), "session-1");
    }
}
