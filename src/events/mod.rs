//! Event handling for Oddsdesk.
//!
//! Terminal input is mapped to actions by [`EventHandler`]; the visible
//! view is refreshed by a [`PollTimer`] owned by the session.

mod handler;
mod input;
mod poll;

pub use handler::{EventHandler, KeyMap};
pub use input::{InputEvent, Key, KeyBinding, Modifiers};
pub use poll::PollTimer;
