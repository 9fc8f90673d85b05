//! Jump navigation: hint-based direct focus.
//!
//! On activation every registered focusable with a non-zero resolved area
//! gets a short hint from a fixed alphabet, overlaid at its top-left
//! corner. Typing accumulates a prefix buffer: an exact hint match focuses
//! that node and deactivates, a valid strict prefix keeps accumulating,
//! anything else just resets the buffer. Escape cancels, Backspace clears.
//! While active, every key is consumed, so the mode must be dispatched
//! through a priority subscription.

use tracing::debug;

use crate::renderer::FrameBuffer;
use crate::state::focus::FocusRegistry;
use crate::state::keyboard::KeyEvent;
use crate::tree::NodeTree;
use crate::types::{Attr, Color, NamedColor};

/// Home-row-first hint alphabet.
pub const DEFAULT_HINT_ALPHABET: &str = "asdfghjklqwertyuiopzxcvbnm";

/// Generate `count` unique hint labels over `alphabet`.
///
/// Single characters while they last; beyond the alphabet size, two-char
/// labels counted in base-N with the alphabet as digits.
pub fn generate_hints(count: usize, alphabet: &str) -> Vec<String> {
    let chars: Vec<char> = alphabet.chars().collect();
    let mut hints = Vec::with_capacity(count);
    if chars.is_empty() {
        return hints;
    }

    if count <= chars.len() {
        hints.extend(chars.iter().take(count).map(|c| c.to_string()));
    } else {
        'fill: for &first in &chars {
            for &second in &chars {
                if hints.len() >= count {
                    break 'fill;
                }
                hints.push(format!("{first}{second}"));
            }
        }
    }
    hints
}

/// One active hint: its label and the hinted node's screen corner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hint {
    pub label: String,
    pub focus_id: String,
    pub x: i32,
    pub y: i32,
}

/// Outcome of feeding a key to the jump mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JumpOutcome {
    /// Mode inactive; the key was not handled.
    Inactive,
    /// Key consumed, mode still active (or just cancelled).
    Consumed,
    /// A hint matched: focus this id. The mode has deactivated.
    Jump(String),
}

/// The jump-navigation state machine.
#[derive(Default)]
pub struct JumpNav {
    alphabet: String,
    active: bool,
    buffer: String,
    hints: Vec<Hint>,
}

impl JumpNav {
    pub fn new() -> Self {
        Self::with_alphabet(DEFAULT_HINT_ALPHABET)
    }

    pub fn with_alphabet(alphabet: impl Into<String>) -> Self {
        Self {
            alphabet: alphabet.into(),
            ..Self::default()
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn hints(&self) -> &[Hint] {
        &self.hints
    }

    /// Enter hint mode: snapshot all registered focusables whose resolved
    /// layout has a non-zero area and assign them hints.
    ///
    /// The snapshot is taken once; nodes that move or vanish afterwards
    /// keep their stale hint until the mode ends, which is fine for the
    /// lifetime of a few keystrokes.
    pub fn activate(&mut self, registry: &FocusRegistry, tree: &NodeTree) {
        let visible: Vec<(&str, i32, i32)> = registry
            .entries()
            .filter_map(|(id, node)| {
                let rect = tree.get(node)?.layout;
                (rect.width > 0 && rect.height > 0).then_some((id, rect.x, rect.y))
            })
            .collect();

        let labels = generate_hints(visible.len(), &self.alphabet);
        self.hints = visible
            .into_iter()
            .zip(labels)
            .map(|((focus_id, x, y), label)| Hint {
                label,
                focus_id: focus_id.to_string(),
                x,
                y,
            })
            .collect();
        self.buffer.clear();
        self.active = true;
        debug!(hints = self.hints.len(), "jump navigation activated");
    }

    /// Leave hint mode, clearing all state.
    pub fn deactivate(&mut self) {
        self.active = false;
        self.buffer.clear();
        self.hints.clear();
    }

    /// Feed one key event. While active every key is consumed; malformed
    /// input only ever resets the prefix buffer.
    pub fn handle_key(&mut self, event: &KeyEvent) -> JumpOutcome {
        if !self.active {
            return JumpOutcome::Inactive;
        }
        if !event.is_press() {
            return JumpOutcome::Consumed;
        }

        match event.name.as_str() {
            "Escape" => {
                self.deactivate();
                return JumpOutcome::Consumed;
            }
            "Backspace" => {
                self.buffer.clear();
                return JumpOutcome::Consumed;
            }
            _ => {}
        }

        let Some(c) = event.char().filter(|c| c.is_ascii_alphabetic()) else {
            return JumpOutcome::Consumed;
        };

        let mut candidate = self.buffer.clone();
        candidate.push(c.to_ascii_lowercase());

        if let Some(hint) = self.hints.iter().find(|hint| hint.label == candidate) {
            let target = hint.focus_id.clone();
            self.deactivate();
            debug!(id = %target, "jump hint matched");
            return JumpOutcome::Jump(target);
        }

        if self.hints.iter().any(|hint| hint.label.starts_with(&candidate)) {
            self.buffer = candidate;
        } else {
            self.buffer.clear();
        }
        JumpOutcome::Consumed
    }

    /// Overlay the hints and a one-line status bar onto a painted frame.
    ///
    /// Hints sit at their node's top-left corner; a hint whose label
    /// matches the pending buffer highlights differently.
    pub fn paint(&self, fb: &mut FrameBuffer) {
        if !self.active {
            return;
        }

        for hint in &self.hints {
            let matching = !self.buffer.is_empty() && hint.label.starts_with(&self.buffer);
            let bg = if matching {
                Color::Named(NamedColor::Cyan)
            } else {
                Color::Named(NamedColor::Yellow)
            };
            let label = format!(" {} ", hint.label);
            fb.draw_text(
                hint.x,
                hint.y,
                &label,
                Some(Color::BLACK),
                Some(bg),
                Attr::BOLD,
                None,
            );
        }

        // Status line on the bottom row.
        let row = fb.height() as i32 - 1;
        if row >= 0 {
            let status = if self.buffer.is_empty() {
                "Press a key to jump • ESC to cancel".to_string()
            } else {
                format!("Jump: {}_", self.buffer)
            };
            let bg = Color::Named(NamedColor::BlackBright);
            fb.fill_rect(0, row, fb.width() as i32, 1, bg, None);
            fb.draw_text(1, row, &status, Some(Color::WHITE), Some(bg), Attr::empty(), None);
        }
    }
}
