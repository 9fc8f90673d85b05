//! Declarative scoped keybindings.
//!
//! Bindings are grouped by scope ("global" plus one scope per surface of
//! the application). Lookup checks the active scope first and falls back
//! to global. Help overlays pull grouped sections out with
//! [`KeybindRegistry::help_sections`]: active scope first, then related
//! scopes, then global, each titled and filterable.

use std::collections::HashMap;

/// The scope consulted as a fallback for every lookup.
pub const GLOBAL_SCOPE: &str = "global";

/// One binding: the key it triggers on, how it displays, what it does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keybind {
    /// Key name as dispatched (e.g. `"j"`, `"Enter"`, `"?"`).
    pub key: String,
    /// Display form for help (e.g. `"j / ↓"`).
    pub display: String,
    pub description: String,
    /// Action identifier handed back to the embedder.
    pub action: String,
}

impl Keybind {
    pub fn new(
        key: impl Into<String>,
        display: impl Into<String>,
        description: impl Into<String>,
        action: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            display: display.into(),
            description: description.into(),
            action: action.into(),
        }
    }
}

/// A titled group of bindings for a help surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelpSection {
    pub title: String,
    pub keybinds: Vec<Keybind>,
}

/// Presentation knobs for [`KeybindRegistry::help_sections`].
#[derive(Debug, Clone, Default)]
pub struct HelpOptions {
    /// Human titles per scope; a scope without one shows its raw name.
    pub scope_titles: HashMap<String, String>,
    /// Extra scopes to list after the active one (before global).
    pub related_scopes: Vec<String>,
}

/// Scope-keyed keybind registry. Scope insertion order is stable.
#[derive(Debug, Default)]
pub struct KeybindRegistry {
    scopes: Vec<(String, Vec<Keybind>)>,
}

impl KeybindRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn scope_mut(&mut self, scope: &str) -> &mut Vec<Keybind> {
        let position = match self.scopes.iter().position(|(name, _)| name == scope) {
            Some(position) => position,
            None => {
                self.scopes.push((scope.to_string(), Vec::new()));
                self.scopes.len() - 1
            }
        };
        &mut self.scopes[position].1
    }

    /// Add one binding to a scope.
    pub fn add(&mut self, scope: &str, keybind: Keybind) {
        self.scope_mut(scope).push(keybind);
    }

    /// Replace a scope's bindings wholesale.
    pub fn register_scope(&mut self, scope: &str, keybinds: Vec<Keybind>) {
        *self.scope_mut(scope) = keybinds;
    }

    /// Bindings of one scope, if it exists.
    pub fn scope(&self, scope: &str) -> Option<&[Keybind]> {
        self.scopes
            .iter()
            .find(|(name, _)| name == scope)
            .map(|(_, keybinds)| keybinds.as_slice())
    }

    /// Find the binding for `key`: active scope first, then global.
    pub fn lookup(&self, scope: &str, key: &str) -> Option<&Keybind> {
        self.scope(scope)
            .and_then(|keybinds| keybinds.iter().find(|kb| kb.key == key))
            .or_else(|| {
                if scope == GLOBAL_SCOPE {
                    return None;
                }
                self.scope(GLOBAL_SCOPE)
                    .and_then(|keybinds| keybinds.iter().find(|kb| kb.key == key))
            })
    }

    /// Sections for a help overlay: the active scope, then related scopes,
    /// then global, skipping duplicates and empty scopes.
    pub fn help_sections(&self, context: &str, options: &HelpOptions) -> Vec<HelpSection> {
        let mut order: Vec<&str> = vec![context];
        for scope in &options.related_scopes {
            if !order.contains(&scope.as_str()) {
                order.push(scope);
            }
        }
        if !order.contains(&GLOBAL_SCOPE) {
            order.push(GLOBAL_SCOPE);
        }

        order
            .into_iter()
            .filter_map(|scope| {
                let keybinds = self.scope(scope)?;
                if keybinds.is_empty() {
                    return None;
                }
                let title = options
                    .scope_titles
                    .get(scope)
                    .cloned()
                    .unwrap_or_else(|| scope.to_string());
                Some(HelpSection {
                    title,
                    keybinds: keybinds.to_vec(),
                })
            })
            .collect()
    }
}

/// Filter help sections by a case-insensitive query over display text and
/// descriptions, dropping sections that end up empty.
pub fn filter_sections(sections: &[HelpSection], query: &str) -> Vec<HelpSection> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return sections.to_vec();
    }
    sections
        .iter()
        .filter_map(|section| {
            let keybinds: Vec<Keybind> = section
                .keybinds
                .iter()
                .filter(|kb| {
                    kb.display.to_lowercase().contains(&query)
                        || kb.description.to_lowercase().contains(&query)
                })
                .cloned()
                .collect();
            if keybinds.is_empty() {
                return None;
            }
            Some(HelpSection {
                title: section.title.clone(),
                keybinds,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> KeybindRegistry {
        let mut registry = KeybindRegistry::new();
        registry.register_scope(
            GLOBAL_SCOPE,
            vec![
                Keybind::new("?", "?", "Show help", "help"),
                Keybind::new("q", "q", "Quit", "quit"),
            ],
        );
        registry.register_scope(
            "list",
            vec![
                Keybind::new("j", "j / ↓", "Next item", "next"),
                Keybind::new("k", "k / ↑", "Previous item", "prev"),
            ],
        );
        registry.register_scope("editor", vec![Keybind::new("s", "Ctrl+S", "Save", "save")]);
        registry
    }

    #[test]
    fn lookup_prefers_scope_then_global() {
        let registry = registry();
        assert_eq!(registry.lookup("list", "j").unwrap().action, "next");
        assert_eq!(registry.lookup("list", "q").unwrap().action, "quit");
        assert!(registry.lookup("list", "s").is_none());
    }

    #[test]
    fn help_orders_active_related_global() {
        let registry = registry();
        let options = HelpOptions {
            scope_titles: [
                ("list".to_string(), "List".to_string()),
                (GLOBAL_SCOPE.to_string(), "Global".to_string()),
            ]
            .into(),
            related_scopes: vec!["editor".to_string()],
        };
        let sections = registry.help_sections("list", &options);
        let titles: Vec<&str> = sections.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["List", "editor", "Global"]);
    }

    #[test]
    fn help_skips_unknown_and_duplicate_scopes() {
        let registry = registry();
        let options = HelpOptions {
            related_scopes: vec!["missing".to_string(), "list".to_string()],
            ..Default::default()
        };
        let sections = registry.help_sections("list", &options);
        let titles: Vec<&str> = sections.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["list", GLOBAL_SCOPE]);
    }

    #[test]
    fn filter_matches_display_and_description() {
        let registry = registry();
        let sections = registry.help_sections("list", &HelpOptions::default());

        let hits = filter_sections(&sections, "next");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].keybinds.len(), 1);
        assert_eq!(hits[0].keybinds[0].action, "next");

        let hits = filter_sections(&sections, "QUIT");
        assert_eq!(hits[0].keybinds[0].action, "quit");

        assert!(filter_sections(&sections, "nonesuch").is_empty());
        assert_eq!(filter_sections(&sections, "  ").len(), sections.len());
    }
}
