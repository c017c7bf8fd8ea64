//! Keyboard shortcut registry and documentation.

/// What a shortcut does in the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    AddPoint,
    Finish,
    RemovePoint,
    Abandon,
    Undo,
    Redo,
}

/// A keyboard shortcut definition.
#[derive(Debug, Clone)]
pub struct Shortcut {
    pub key: &'static str,
    pub ctrl: bool,
    pub shift: bool,
    pub action: ShortcutAction,
    pub description: &'static str,
}

impl Shortcut {
    pub const fn new(
        key: &'static str,
        ctrl: bool,
        shift: bool,
        action: ShortcutAction,
        description: &'static str,
    ) -> Self {
        Self {
            key,
            ctrl,
            shift,
            action,
            description,
        }
    }

    /// Format the shortcut for display (e.g., "Ctrl+Z").
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
}

/// Registry of all keyboard shortcuts.
pub struct ShortcutRegistry;

impl ShortcutRegistry {
    /// Get all registered shortcuts.
    pub fn all() -> Vec<Shortcut> {
        use ShortcutAction::*;
        vec![
            Shortcut::new("Click", false, false, AddPoint, "Start a polyline / add a point"),
            Shortcut::new("Enter", false, false, Finish, "Finish the polyline"),
            Shortcut::new("Backspace", false, false, RemovePoint, "Remove the last point"),
            Shortcut::new("Escape", false, false, Abandon, "Abandon the polyline"),
            Shortcut::new("Z", true, false, Undo, "Undo"),
            Shortcut::new("Z", true, true, Redo, "Redo"),
            Shortcut::new("Y", true, false, Redo, "Redo"),
        ]
    }

    /// Find the shortcut written as `chord` (e.g. "ctrl+shift+z"), ignoring case.
    pub fn lookup(chord: &str) -> Option<Shortcut> {
        Self::all()
            .into_iter()
            .find(|shortcut| shortcut.format().eq_ignore_ascii_case(chord))
    }

    /// Render the shortcut table as text.
    pub fn table() -> String {
        let mut out = String::from("=== Keyboard Shortcuts ===\n");
        for shortcut in Self::all() {
            out.push_str(&format!("  {:20} {}\n", shortcut.format(), shortcut.description));
        }
        out
    }

    /// Print all shortcuts to console.
    pub fn print_all() {
        println!("\n{}", Self::table());
    }
}
