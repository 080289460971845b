//! Event handler for turning terminal input into actions.

use super::input::{InputEvent, Key, KeyBinding};
use crate::config::KeyBindings;
use crate::error::Result;
use crate::state::{Action, View};
use crossterm::event::{Event as CrosstermEvent, EventStream, KeyEventKind, MouseEventKind};
use futures::StreamExt;

/// Parsed key bindings.
#[derive(Debug, Clone)]
pub struct KeyMap {
    quit: KeyBinding,
    help: KeyBinding,
    up: KeyBinding,
    down: KeyBinding,
    select: KeyBinding,
    back: KeyBinding,
    refresh: KeyBinding,
    matches: KeyBinding,
    top_ev: KeyBinding,
    arbs: KeyBinding,
    next_league: KeyBinding,
    prev_league: KeyBinding,
    next_page: KeyBinding,
    prev_page: KeyBinding,
}

impl KeyMap {
    pub fn new(bindings: &KeyBindings) -> Result<Self> {
        Ok(Self {
            quit: bindings.quit.parse()?,
            help: bindings.help.parse()?,
            up: bindings.up.parse()?,
            down: bindings.down.parse()?,
            select: bindings.select.parse()?,
            back: bindings.back.parse()?,
            refresh: bindings.refresh.parse()?,
            matches: bindings.matches.parse()?,
            top_ev: bindings.top_ev.parse()?,
            arbs: bindings.arbs.parse()?,
            next_league: bindings.next_league.parse()?,
            prev_league: bindings.prev_league.parse()?,
            next_page: bindings.next_page.parse()?,
            prev_page: bindings.prev_page.parse()?,
        })
    }

    /// Map a key press to an action for the given view.
    pub fn map(&self, input: &InputEvent, view: View) -> Option<Action> {
        if input.modifiers.ctrl && input.key == Key::Char('c') {
            return Some(Action::Quit);
        }

        // Global shortcuts
        if self.quit.matches(input) {
            return Some(Action::Quit);
        }
        if self.help.matches(input) {
            return Some(Action::ToggleHelp);
        }
        if self.refresh.matches(input) || input.key == Key::F(5) {
            return Some(Action::Refresh);
        }
        if self.back.matches(input) || input.key == Key::Backspace {
            return Some(Action::Back);
        }

        // View switching
        if self.matches.matches(input) {
            return Some(Action::SetView(View::Matches));
        }
        if self.top_ev.matches(input) {
            return Some(Action::SetView(View::TopEv));
        }
        if self.arbs.matches(input) {
            return Some(Action::SetView(View::Arbs));
        }

        // Navigation
        if self.up.matches(input) || input.key == Key::Up {
            return Some(Action::ScrollUp);
        }
        if self.down.matches(input) || input.key == Key::Down {
            return Some(Action::ScrollDown);
        }
        match input.key {
            Key::PageUp => return Some(Action::PageUp),
            Key::PageDown => return Some(Action::PageDown),
            Key::Home => return Some(Action::GoToTop),
            Key::End => return Some(Action::GoToBottom),
            _ => {}
        }

        // View-specific actions
        match view {
            View::Matches => {
                if self.select.matches(input) {
                    Some(Action::OpenSelectedMatch)
                } else if self.next_league.matches(input) || input.key == Key::Right {
                    Some(Action::NextLeague)
                } else if self.prev_league.matches(input) || input.key == Key::Left {
                    Some(Action::PrevLeague)
                } else {
                    None
                }
            }
            View::TopEv | View::Arbs => {
                if self.next_page.matches(input) || input.key == Key::Right {
                    Some(Action::NextPage)
                } else if self.prev_page.matches(input) || input.key == Key::Left {
                    Some(Action::PrevPage)
                } else {
                    None
                }
            }
            View::MatchDetail => None,
        }
    }
}

/// Reads terminal events and produces actions.
pub struct EventHandler {
    keymap: KeyMap,
    mouse: bool,
    events: EventStream,
}

impl EventHandler {
    pub fn new(bindings: &KeyBindings, mouse: bool) -> Result<Self> {
        Ok(Self {
            keymap: KeyMap::new(bindings)?,
            mouse,
            events: EventStream::new(),
        })
    }

    /// Wait for the next terminal event. Returns `Ok(None)` for events that
    /// map to no action; the caller redraws either way.
    pub async fn next(&mut self, view: View) -> Result<Option<Action>> {
        let Some(event) = self.events.next().await else {
            return Ok(Some(Action::Quit));
        };

        Ok(match event? {
            CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => {
                InputEvent::from_key_event(key).and_then(|input| self.keymap.map(&input, view))
            }
            CrosstermEvent::Mouse(mouse) if self.mouse => match mouse.kind {
                MouseEventKind::ScrollUp => Some(Action::ScrollUp),
                MouseEventKind::ScrollDown => Some(Action::ScrollDown),
                _ => None,
            },
            // Resize is picked up by the next draw.
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn keymap() -> KeyMap {
        KeyMap::new(&KeyBindings::default()).unwrap()
    }

    fn key(code: KeyCode) -> InputEvent {
        InputEvent::from_key_event(KeyEvent::new(code, KeyModifiers::NONE)).unwrap()
    }

    fn map(code: KeyCode, view: View) -> Option<Action> {
        keymap().map(&key(code), view)
    }

    #[test]
    fn test_ctrl_c_always_quits() {
        let input =
            InputEvent::from_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL))
                .unwrap();
        for view in [View::Matches, View::MatchDetail, View::TopEv, View::Arbs] {
            assert!(matches!(keymap().map(&input, view), Some(Action::Quit)));
        }
    }

    #[test]
    fn test_view_switching() {
        assert!(matches!(
            map(KeyCode::Char('2'), View::Matches),
            Some(Action::SetView(View::TopEv))
        ));
        assert!(matches!(
            map(KeyCode::Char('3'), View::TopEv),
            Some(Action::SetView(View::Arbs))
        ));
        assert!(matches!(
            map(KeyCode::Char('1'), View::MatchDetail),
            Some(Action::SetView(View::Matches))
        ));
    }

    #[test]
    fn test_select_only_on_match_list() {
        assert!(matches!(
            map(KeyCode::Enter, View::Matches),
            Some(Action::OpenSelectedMatch)
        ));
        assert!(map(KeyCode::Enter, View::TopEv).is_none());
    }

    #[test]
    fn test_league_and_page_keys_depend_on_view() {
        assert!(matches!(
            map(KeyCode::Char(']'), View::Matches),
            Some(Action::NextLeague)
        ));
        assert!(matches!(
            map(KeyCode::Left, View::Matches),
            Some(Action::PrevLeague)
        ));
        assert!(matches!(
            map(KeyCode::Char('n'), View::Arbs),
            Some(Action::NextPage)
        ));
        assert!(matches!(
            map(KeyCode::Char('p'), View::TopEv),
            Some(Action::PrevPage)
        ));
        assert!(map(KeyCode::Char('n'), View::Matches).is_none());
    }

    #[test]
    fn test_back_and_scroll() {
        assert!(matches!(
            map(KeyCode::Esc, View::MatchDetail),
            Some(Action::Back)
        ));
        assert!(matches!(
            map(KeyCode::Backspace, View::MatchDetail),
            Some(Action::Back)
        ));
        assert!(matches!(
            map(KeyCode::Char('j'), View::MatchDetail),
            Some(Action::ScrollDown)
        ));
        assert!(matches!(
            map(KeyCode::Up, View::Arbs),
            Some(Action::ScrollUp)
        ));
        assert!(matches!(
            map(KeyCode::End, View::Matches),
            Some(Action::GoToBottom)
        ));
    }

    #[test]
    fn test_refresh() {
        assert!(matches!(
            map(KeyCode::Char('r'), View::TopEv),
            Some(Action::Refresh)
        ));
        assert!(matches!(map(KeyCode::F(5), View::Arbs), Some(Action::Refresh)));
    }

    #[test]
    fn test_invalid_binding_rejected() {
        let bindings = KeyBindings {
            quit: "Super+q".into(),
            ..KeyBindings::default()
        };
        assert!(KeyMap::new(&bindings).is_err());
    }
}
