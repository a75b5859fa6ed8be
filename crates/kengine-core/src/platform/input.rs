// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Backend-agnostic input event representation.
//!
//! Windowing backends translate their native events into these types before
//! anything else in the engine sees them.

/// Engine-internal representation of an input event.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// A keyboard key was pressed.
    KeyPressed {
        /// Stable name of the key (e.g. `"KeyW"`, `"ArrowLeft"`, `"F5"`).
        key_code: String,
    },
    /// A keyboard key was released.
    KeyReleased {
        /// Stable name of the key.
        key_code: String,
    },
    /// A mouse button was pressed.
    MouseButtonPressed {
        /// The button that was pressed.
        button: MouseButton,
    },
    /// A mouse button was released.
    MouseButtonReleased {
        /// The button that was released.
        button: MouseButton,
    },
    /// The mouse cursor moved inside the window.
    MouseMoved {
        /// New cursor x position in physical pixels.
        x: f64,
        /// New cursor y position in physical pixels.
        y: f64,
    },
    /// The mouse wheel was scrolled.
    MouseWheelScrolled {
        /// Horizontal scroll amount.
        delta_x: f32,
        /// Vertical scroll amount.
        delta_y: f32,
    },
}

/// Identifies a mouse button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// The left mouse button.
    Left,
    /// The right mouse button.
    Right,
    /// The middle mouse button (wheel click).
    Middle,
    /// The back navigation button.
    Back,
    /// The forward navigation button.
    Forward,
    /// Any other button, identified by its native index.
    Other(u16),
}

/// Returns `true` if `key_code` names a non-character key.
///
/// Non-character keys are the arrows, the function keys, the modifier keys
/// and the navigation cluster. Applications that care about the distinction
/// receive these through a separate callback, mirroring how classic GL
/// toolkits split printable keys from special keys. Keys that produce a
/// character (letters, digits, space, enter, escape) are not special.
pub fn is_special_key(key_code: &str) -> bool {
    if key_code.starts_with("Arrow") {
        return true;
    }
    // Function keys: "F" followed by a number (F1..F35).
    if let Some(rest) = key_code.strip_prefix('F') {
        if !rest.is_empty() && rest.chars().all(|c| c.is_ascii_digit()) {
            return true;
        }
    }
    // Modifiers carry a Left/Right suffix in their key code.
    if key_code.starts_with("Shift")
        || key_code.starts_with("Control")
        || key_code.starts_with("Alt")
        || key_code.starts_with("Super")
    {
        return true;
    }
    matches!(
        key_code,
        "Home"
            | "End"
            | "PageUp"
            | "PageDown"
            | "Insert"
            | "Delete"
            | "CapsLock"
            | "NumLock"
            | "ScrollLock"
            | "PrintScreen"
            | "Pause"
            | "ContextMenu"
            | "Fn"
            | "FnLock"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Arrows, function keys, modifiers and the navigation cluster are
    /// special.
    #[test]
    fn special_keys_are_classified_as_special() {
        for key in [
            "ArrowUp",
            "ArrowDown",
            "ArrowLeft",
            "ArrowRight",
            "F1",
            "F5",
            "F12",
            "F35",
            "ShiftLeft",
            "ShiftRight",
            "ControlLeft",
            "AltRight",
            "SuperLeft",
            "Home",
            "End",
            "PageUp",
            "PageDown",
            "Insert",
            "Delete",
            "CapsLock",
        ] {
            assert!(is_special_key(key), "{key} should be special");
        }
    }

    /// Character-producing keys are not special, including the control
    /// characters escape, enter and space.
    #[test]
    fn character_keys_are_not_special() {
        for key in [
            "KeyW", "KeyA", "Digit0", "Digit9", "Space", "Enter", "Escape", "Tab", "Backspace",
            "Minus", "Equal", "Comma",
        ] {
            assert!(!is_special_key(key), "{key} should not be special");
        }
    }

    /// "F" followed by non-digits must not be mistaken for a function key.
    #[test]
    fn f_prefix_without_number_is_not_a_function_key() {
        assert!(!is_special_key("Foo"));
        // Fn and FnLock are modifiers, listed explicitly.
        assert!(is_special_key("Fn"));
        assert!(is_special_key("FnLock"));
    }
}
