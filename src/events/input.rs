//! Input event types and key bindings.

use crate::error::{Error, Result};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::str::FromStr;

/// Simplified key representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Escape,
    Backspace,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    F(u8),
}

impl Key {
    fn from_code(code: KeyCode) -> Option<Self> {
        Some(match code {
            KeyCode::Char(c) => Key::Char(c),
            KeyCode::Enter => Key::Enter,
            KeyCode::Esc => Key::Escape,
            KeyCode::Backspace => Key::Backspace,
            KeyCode::Up => Key::Up,
            KeyCode::Down => Key::Down,
            KeyCode::Left => Key::Left,
            KeyCode::Right => Key::Right,
            KeyCode::Home => Key::Home,
            KeyCode::End => Key::End,
            KeyCode::PageUp => Key::PageUp,
            KeyCode::PageDown => Key::PageDown,
            KeyCode::F(n) => Key::F(n),
            _ => return None,
        })
    }

    fn parse_name(name: &str) -> Option<Self> {
        let lower = name.to_lowercase();
        Some(match lower.as_str() {
            "enter" => Key::Enter,
            "esc" | "escape" => Key::Escape,
            "backspace" => Key::Backspace,
            "up" => Key::Up,
            "down" => Key::Down,
            "left" => Key::Left,
            "right" => Key::Right,
            "home" => Key::Home,
            "end" => Key::End,
            "pageup" => Key::PageUp,
            "pagedown" => Key::PageDown,
            "space" => Key::Char(' '),
            s if s.len() > 1 && s.starts_with('f') => Key::F(s[1..].parse().ok()?),
            _ => {
                let mut chars = name.chars();
                let c = chars.next()?;
                if chars.next().is_some() {
                    return None;
                }
                Key::Char(c)
            }
        })
    }
}

/// Key modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
}

impl From<KeyModifiers> for Modifiers {
    fn from(mods: KeyModifiers) -> Self {
        Self {
            ctrl: mods.contains(KeyModifiers::CONTROL),
            alt: mods.contains(KeyModifiers::ALT),
            shift: mods.contains(KeyModifiers::SHIFT),
        }
    }
}

/// A processed key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputEvent {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl InputEvent {
    /// Convert a terminal key event; keys the app never binds yield `None`.
    pub fn from_key_event(event: KeyEvent) -> Option<Self> {
        Some(Self {
            key: Key::from_code(event.code)?,
            modifiers: Modifiers::from(event.modifiers),
        })
    }
}

/// A parsed binding such as `"q"`, `"Ctrl+r"`, `"Enter"` or `"F5"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyBinding {
    key: Key,
    modifiers: Modifiers,
}

impl KeyBinding {
    pub fn new(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::default(),
        }
    }

    pub fn matches(&self, input: &InputEvent) -> bool {
        if self.modifiers.ctrl != input.modifiers.ctrl || self.modifiers.alt != input.modifiers.alt
        {
            return false;
        }

        match (self.key, input.key) {
            // Shift is already folded into the character.
            (Key::Char(expected), Key::Char(actual)) => {
                expected == actual
                    || (expected.is_ascii_alphabetic()
                        && !self.modifiers.shift
                        && expected.eq_ignore_ascii_case(&actual))
            }
            (expected, actual) => {
                expected == actual && self.modifiers.shift == input.modifiers.shift
            }
        }
    }
}

impl FromStr for KeyBinding {
    type Err = Error;

    fn from_str(binding: &str) -> Result<Self> {
        let binding = binding.trim();
        let mut modifiers = Modifiers::default();

        // "+" alone, or a trailing "+" as in "Ctrl++", names the plus key.
        let (prefix, key_name) = match binding.strip_suffix("++") {
            Some(prefix) => (Some(prefix), "+"),
            None if binding == "+" => (None, "+"),
            None => match binding.rsplit_once('+') {
                Some((prefix, key)) => (Some(prefix), key),
                None => (None, binding),
            },
        };

        for part in prefix.into_iter().flat_map(|p| p.split('+')) {
            match part.trim().to_lowercase().as_str() {
                "ctrl" | "control" => modifiers.ctrl = true,
                "alt" => modifiers.alt = true,
                "shift" => modifiers.shift = true,
                other => {
                    return Err(Error::invalid_input(format!(
                        "unknown modifier '{other}' in key binding '{binding}'"
                    )));
                }
            }
        }

        let key = Key::parse_name(key_name.trim())
            .ok_or_else(|| Error::invalid_input(format!("unknown key binding '{binding}'")))?;

        Ok(Self { key, modifiers })
    }
}
