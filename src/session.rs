//! Connection registry that assigns player slots
//!
//! Owned by whatever manages connections and passed by reference to
//! `GameState::from_sessions`. Slots are reused lowest-first after a
//! disconnect.

use serde::{Deserialize, Serialize};

use crate::SimError;

/// Default registry size (one slot per player)
pub const MAX_SESSIONS: usize = 2;

/// Connection lifecycle notification from the transport
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionEvent {
    Connected { id: String },
    Disconnected { id: String },
}

/// A connected client bound to a player slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    /// Player id this connection controls
    pub slot: usize,
}

#[derive(Debug, Clone)]
pub struct SessionRegistry {
    slots: Vec<Option<Session>>,
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new(MAX_SESSIONS)
    }
}

impl SessionRegistry {
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![None; capacity],
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Apply a transport event; returns the affected slot
    ///
    /// Reconnecting with a known id keeps its slot. Disconnecting an unknown
    /// id is a no-op.
    pub fn handle(&mut self, event: SessionEvent) -> Result<Option<usize>, SimError> {
        match event {
            SessionEvent::Connected { id } => self.connect(id).map(Some),
            SessionEvent::Disconnected { id } => Ok(self.disconnect(&id)),
        }
    }

    fn connect(&mut self, id: String) -> Result<usize, SimError> {
        if let Some(session) = self.get(&id) {
            return Ok(session.slot);
        }

        let slot = self
            .slots
            .iter()
            .position(Option::is_none)
            .ok_or(SimError::SessionsFull {
                capacity: self.capacity(),
            })?;
        log::info!("Session {} connected as player {}", id, slot);
        self.slots[slot] = Some(Session { id, slot });
        Ok(slot)
    }

    fn disconnect(&mut self, id: &str) -> Option<usize> {
        let slot = self.get(id)?.slot;
        self.slots[slot] = None;
        log::info!("Session {} disconnected, freed player {}", id, slot);
        Some(slot)
    }

    pub fn get(&self, id: &str) -> Option<&Session> {
        self.connected().find(|s| s.id == id)
    }

    /// Connected sessions in slot order
    pub fn connected(&self) -> impl Iterator<Item = &Session> {
        self.slots.iter().flatten()
    }

    pub fn len(&self) -> usize {
        self.connected().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
