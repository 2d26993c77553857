//! Keyboard bindings mapped to per-player logical actions
//!
//! Keys are identified by their DOM-style names (`"a"`, `"ArrowLeft"`,
//! `"Control"`). Keys without a binding are ignored.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::sim::{ActionState, TickInput};

/// Logical player action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    MoveLeft,
    MoveRight,
    Jump,
    ThrowBomb,
}

/// One player's key assignment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyBindings {
    pub left: String,
    pub right: String,
    pub jump: String,
    /// Players without a bomb key cannot throw
    #[serde(default)]
    pub bomb: Option<String>,
}

impl KeyBindings {
    /// `a` / `d` / `w` / `e`
    pub fn player_one() -> Self {
        Self {
            left: "a".into(),
            right: "d".into(),
            jump: "w".into(),
            bomb: Some("e".into()),
        }
    }

    /// Arrow keys, Control to throw
    pub fn player_two() -> Self {
        Self {
            left: "ArrowLeft".into(),
            right: "ArrowRight".into(),
            jump: "ArrowUp".into(),
            bomb: Some("Control".into()),
        }
    }

    /// Default bindings for both players, in slot order
    pub fn defaults() -> Vec<Self> {
        vec![Self::player_one(), Self::player_two()]
    }

    pub fn action_for(&self, key: &str) -> Option<Action> {
        if key == self.left {
            Some(Action::MoveLeft)
        } else if key == self.right {
            Some(Action::MoveRight)
        } else if key == self.jump {
            Some(Action::Jump)
        } else if self.bomb.as_deref() == Some(key) {
            Some(Action::ThrowBomb)
        } else {
            None
        }
    }

    /// Held actions for this player given the currently held keys
    pub fn resolve(&self, keys: &KeyState) -> ActionState {
        ActionState {
            move_left: keys.is_held(&self.left),
            move_right: keys.is_held(&self.right),
            jump: keys.is_held(&self.jump),
            throw_bomb: self.bomb.as_deref().is_some_and(|k| keys.is_held(k)),
        }
    }
}

/// Set of currently held keys, fed by key-down / key-up events
#[derive(Debug, Clone, Default)]
pub struct KeyState {
    held: HashSet<String>,
}

impl KeyState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: &str) {
        self.held.insert(key.to_owned());
    }

    pub fn release(&mut self, key: &str) {
        self.held.remove(key);
    }

    pub fn is_held(&self, key: &str) -> bool {
        self.held.contains(key)
    }

    pub fn clear(&mut self) {
        self.held.clear();
    }
}

/// Build one tick's input from all players' bindings (index = player id)
pub fn tick_input(bindings: &[KeyBindings], keys: &KeyState) -> TickInput {
    TickInput::new(bindings.iter().map(|b| b.resolve(keys)).collect())
}
