//! Focus, input routing, jump navigation, keybinds, and timers.

pub mod focus;
pub mod jump;
pub mod keybinds;
pub mod keyboard;
pub mod timers;

pub use focus::FocusRegistry;
pub use jump::{generate_hints, Hint, JumpNav, JumpOutcome, DEFAULT_HINT_ALPHABET};
pub use keybinds::{filter_sections, HelpOptions, HelpSection, Keybind, KeybindRegistry, GLOBAL_SCOPE};
pub use keyboard::{InputRouter, KeyEvent, KeyHandler, KeyState, Modifiers, SubscriptionId};
pub use timers::{TimerId, TimerRegistry};
