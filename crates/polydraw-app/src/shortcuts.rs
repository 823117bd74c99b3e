//! Keyboard shortcut registry and lookup.

use polydraw_core::input::Command;
use winit::keyboard::{Key, NamedKey};

/// A keyboard shortcut definition.
#[derive(Debug, Clone)]
pub struct Shortcut {
    pub key: &'static str,
    pub ctrl: bool,
    pub shift: bool,
    pub command: Command,
    pub description: &'static str,
}

impl Shortcut {
    pub const fn new(
        key: &'static str,
        ctrl: bool,
        shift: bool,
        command: Command,
        description: &'static str,
    ) -> Self {
        Self {
            key,
            ctrl,
            shift,
            command,
            description,
        }
    }

    /// Format the shortcut for display (e.g., "Ctrl+S").
    pub fn format(&self) -> String {
        let mut parts = Vec::new();
        if self.ctrl {
            parts.push("Ctrl");
        }
        if self.shift {
            parts.push("Shift");
        }
        parts.push(self.key);
        parts.join("+")
    }

    fn matches(&self, key: &str, ctrl: bool, shift: bool) -> bool {
        self.key.eq_ignore_ascii_case(key) && self.ctrl == ctrl && self.shift == shift
    }
}

/// Registry of all keyboard shortcuts.
pub struct ShortcutRegistry;

impl ShortcutRegistry {
    /// Get all registered shortcuts.
    pub fn all() -> Vec<Shortcut> {
        vec![
            Shortcut::new("Enter", false, false, Command::Complete, "Complete polygon"),
            Shortcut::new("C", false, false, Command::Copy, "Copy last polygon"),
            Shortcut::new("Escape", false, false, Command::Reset, "Reset scene"),
        ]
    }

    /// Look up the command bound to a key name and modifier combination.
    pub fn command_for(key: &str, ctrl: bool, shift: bool) -> Option<Command> {
        Self::all()
            .into_iter()
            .find(|shortcut| shortcut.matches(key, ctrl, shift))
            .map(|shortcut| shortcut.command)
    }

    /// Look up the command for a winit logical key.
    pub fn command_for_key(key: &Key, ctrl: bool, shift: bool) -> Option<Command> {
        let name = key_name(key)?;
        Self::command_for(&name, ctrl, shift)
    }

    /// Log all shortcuts at startup.
    pub fn log_all() {
        for shortcut in Self::all() {
            log::info!("  {:10} {}", shortcut.format(), shortcut.description);
        }
    }
}

/// Display name of a logical key, as used in the registry.
fn key_name(key: &Key) -> Option<String> {
    match key {
        Key::Named(NamedKey::Enter) => Some("Enter".to_string()),
        Key::Named(NamedKey::Escape) => Some("Escape".to_string()),
        Key::Character(c) => Some(c.to_uppercase()),
        _ => None,
    }
}
