//! Keyboard events and input routing.
//!
//! Raw key events arrive already decoded (name, modifiers, optional raw
//! byte sequence) from the embedding input loop; a `From` impl adapts
//! crossterm's event type at the boundary. Routing has two subscriber
//! classes:
//!
//! - **priority** subscribers see every key first and may consume it by
//!   returning `true`, suppressing normal dispatch (global shortcuts,
//!   modal overlays like jump navigation);
//! - **focused** subscribers are keyed by focus id and only run while
//!   their owning node holds focus.

use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyEvent as CrosstermKeyEvent, KeyEventKind, KeyModifiers};
use tracing::trace;

// =============================================================================
// Events
// =============================================================================

/// Modifier key state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    pub meta: bool,
}

impl Modifiers {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn ctrl() -> Self {
        Self {
            ctrl: true,
            ..Self::default()
        }
    }

    pub fn shift() -> Self {
        Self {
            shift: true,
            ..Self::default()
        }
    }

    pub fn alt() -> Self {
        Self {
            alt: true,
            ..Self::default()
        }
    }
}

/// Press, repeat or release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyState {
    #[default]
    Press,
    Repeat,
    Release,
}

/// One decoded key event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    /// Key name: a single character, or "Enter", "Tab", "Escape",
    /// "ArrowUp", "F1", ...
    pub name: String,
    pub modifiers: Modifiers,
    pub state: KeyState,
    /// Raw byte sequence as received from the terminal, when known.
    pub raw: Option<String>,
}

impl KeyEvent {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            modifiers: Modifiers::default(),
            state: KeyState::Press,
            raw: None,
        }
    }

    pub fn with_modifiers(name: impl Into<String>, modifiers: Modifiers) -> Self {
        Self {
            modifiers,
            ..Self::new(name)
        }
    }

    pub fn is_press(&self) -> bool {
        self.state == KeyState::Press
    }

    /// True when the event is a plain printable character with no
    /// control-ish modifiers.
    pub fn char(&self) -> Option<char> {
        let mut chars = self.name.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if !self.modifiers.ctrl && !self.modifiers.alt && !self.modifiers.meta => {
                Some(c)
            }
            _ => None,
        }
    }
}

impl From<CrosstermKeyEvent> for KeyEvent {
    fn from(event: CrosstermKeyEvent) -> Self {
        let name = match event.code {
            KeyCode::Char(c) => c.to_string(),
            KeyCode::Enter => "Enter".to_string(),
            KeyCode::Tab | KeyCode::BackTab => "Tab".to_string(),
            KeyCode::Backspace => "Backspace".to_string(),
            KeyCode::Delete => "Delete".to_string(),
            KeyCode::Esc => "Escape".to_string(),
            KeyCode::Up => "ArrowUp".to_string(),
            KeyCode::Down => "ArrowDown".to_string(),
            KeyCode::Left => "ArrowLeft".to_string(),
            KeyCode::Right => "ArrowRight".to_string(),
            KeyCode::Home => "Home".to_string(),
            KeyCode::End => "End".to_string(),
            KeyCode::PageUp => "PageUp".to_string(),
            KeyCode::PageDown => "PageDown".to_string(),
            KeyCode::Insert => "Insert".to_string(),
            KeyCode::F(n) => format!("F{n}"),
            _ => String::new(),
        };

        let shift = event.modifiers.contains(KeyModifiers::SHIFT)
            || matches!(event.code, KeyCode::BackTab);

        Self {
            name,
            modifiers: Modifiers {
                ctrl: event.modifiers.contains(KeyModifiers::CONTROL),
                alt: event.modifiers.contains(KeyModifiers::ALT),
                shift,
                meta: false,
            },
            state: match event.kind {
                KeyEventKind::Press => KeyState::Press,
                KeyEventKind::Repeat => KeyState::Repeat,
                KeyEventKind::Release => KeyState::Release,
            },
            raw: None,
        }
    }
}

// =============================================================================
// Routing
// =============================================================================

/// Handler returning `true` to consume the event.
pub type KeyHandler = Box<dyn FnMut(&KeyEvent) -> bool>;

/// Token for removing a subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Dispatches key events: priority subscribers first, then whatever
/// subscriber owns the currently focused node.
#[derive(Default)]
pub struct InputRouter {
    priority: Vec<(SubscriptionId, KeyHandler)>,
    focused: HashMap<String, Vec<(SubscriptionId, KeyHandler)>>,
    next_id: u64,
}

impl InputRouter {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&mut self) -> SubscriptionId {
        self.next_id += 1;
        SubscriptionId(self.next_id)
    }

    /// Subscribe to every key, ahead of focused dispatch. Registration
    /// order is dispatch order.
    pub fn subscribe_priority(
        &mut self,
        handler: impl FnMut(&KeyEvent) -> bool + 'static,
    ) -> SubscriptionId {
        let id = self.next_id();
        self.priority.push((id, Box::new(handler)));
        id
    }

    /// Subscribe to keys delivered while `focus_id` holds focus.
    pub fn subscribe_focused(
        &mut self,
        focus_id: impl Into<String>,
        handler: impl FnMut(&KeyEvent) -> bool + 'static,
    ) -> SubscriptionId {
        let id = self.next_id();
        self.focused
            .entry(focus_id.into())
            .or_default()
            .push((id, Box::new(handler)));
        id
    }

    /// Remove a subscription. Returns whether it existed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.priority.len();
        self.priority.retain(|(sub, _)| *sub != id);
        if self.priority.len() != before {
            return true;
        }
        for handlers in self.focused.values_mut() {
            let before = handlers.len();
            handlers.retain(|(sub, _)| *sub != id);
            if handlers.len() != before {
                return true;
            }
        }
        false
    }

    /// Route one event. `focused` is the focus id that currently holds
    /// focus, if any. Returns whether some handler consumed the event.
    ///
    /// Only presses dispatch; repeats and releases update nobody.
    pub fn dispatch(&mut self, event: &KeyEvent, focused: Option<&str>) -> bool {
        if !event.is_press() {
            return false;
        }

        for (_, handler) in &mut self.priority {
            if handler(event) {
                trace!(key = %event.name, "key consumed by priority subscriber");
                return true;
            }
        }

        if let Some(focus_id) = focused {
            if let Some(handlers) = self.focused.get_mut(focus_id) {
                for (_, handler) in handlers {
                    if handler(event) {
                        trace!(key = %event.name, focus_id, "key consumed by focused subscriber");
                        return true;
                    }
                }
            }
        }
        false
    }
}
