//! Input management system
//!
//! The host feeds key events in; scripts only ever ask whether a key is
//! currently held.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Read-only keyboard state
pub trait KeyState {
    /// Whether the key is currently held down
    fn is_key_pressed(&self, key: KeyCode) -> bool;
}

/// Input manager
#[derive(Debug, Default, Clone)]
pub struct InputManager {
    pressed: HashSet<KeyCode>,
}

impl InputManager {
    /// Create a new input manager with no keys held
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle key input
    pub fn handle_key_input(&mut self, key: KeyCode, pressed: bool) {
        if pressed {
            if self.pressed.insert(key) {
                log::trace!("Key pressed: {:?}", key);
            }
        } else if self.pressed.remove(&key) {
            log::trace!("Key released: {:?}", key);
        }
    }

    /// Mark a key as held
    pub fn press(&mut self, key: KeyCode) {
        self.handle_key_input(key, true);
    }

    /// Mark a key as released
    pub fn release(&mut self, key: KeyCode) {
        self.handle_key_input(key, false);
    }

    /// Release every key, e.g. when the window loses focus
    pub fn clear(&mut self) {
        self.pressed.clear();
    }

    /// Keys currently held
    pub fn pressed_keys(&self) -> impl Iterator<Item = KeyCode> + '_ {
        self.pressed.iter().copied()
    }
}

impl KeyState for InputManager {
    fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.pressed.contains(&key)
    }
}

/// Key codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyCode {
    /// A key
    A,
    /// B key
    B,
    /// C key
    C,
    /// D key
    D,
    /// E key
    E,
    /// F key
    F,
    /// G key
    G,
    /// H key
    H,
    /// I key
    I,
    /// J key
    J,
    /// K key
    K,
    /// L key
    L,
    /// M key
    M,
    /// N key
    N,
    /// O key
    O,
    /// P key
    P,
    /// Q key
    Q,
    /// R key
    R,
    /// S key
    S,
    /// T key
    T,
    /// U key
    U,
    /// V key
    V,
    /// W key
    W,
    /// X key
    X,
    /// Y key
    Y,
    /// Z key
    Z,
    /// Space key
    Space,
    /// Enter key
    Enter,
    /// Escape key
    Escape,
    /// Left shift
    LeftShift,
    /// Up arrow
    Up,
    /// Down arrow
    Down,
    /// Left arrow
    Left,
    /// Right arrow
    Right,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_and_release() {
        let mut input = InputManager::new();
        assert!(!input.is_key_pressed(KeyCode::D));

        input.press(KeyCode::D);
        input.press(KeyCode::D);
        assert!(input.is_key_pressed(KeyCode::D));
        assert_eq!(input.pressed_keys().count(), 1);

        input.release(KeyCode::D);
        assert!(!input.is_key_pressed(KeyCode::D));
    }

    #[test]
    fn test_clear() {
        let mut input = InputManager::new();
        input.handle_key_input(KeyCode::A, true);
        input.handle_key_input(KeyCode::Space, true);
        input.clear();

        assert!(!input.is_key_pressed(KeyCode::A));
        assert!(!input.is_key_pressed(KeyCode::Space));
    }
}
