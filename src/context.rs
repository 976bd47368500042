use crate::mockfs::MockFileSystem;
use chrono::{DateTime, Local};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
    System,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
            Theme::System => "system",
        }
    }

    pub fn parse(s: &str) -> Option<Theme> {
        match s {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            "system" => Some(Theme::System),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TodoItem {
    pub id: u32,
    pub text: String,
    pub completed: bool,
}

/// Side effects a command wants the host to perform. Handlers only push
/// these; the wasm host schedules the delayed ones as cancellable timer
/// tasks, and tests assert on the drained list directly.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    DelayedLines { delay_ms: u32, lines: Vec<String> },
    OpenUrl { delay_ms: u32, url: String },
    HttpFetch { url: String, kind: crate::commands::network::FetchKind },
    ClearScreen,
    Navigate(String),
    SetTheme(Theme),
    MatrixToggled(bool),
    MusicToggled(bool),
    ResetSession { delay_ms: u32 },
}

/// Per-session state bag threaded as `&mut` into every command. One of
/// these per terminal instance, so tests never interfere with each other.
pub struct TerminalContext {
    pub fs: MockFileSystem,
    pub history: Vec<String>, // most recent first
    pub todos: Vec<TodoItem>,
    next_todo_id: u32,
    pub password_mode: bool,
    pub matrix_enabled: bool,
    pub theme: Theme,
    pub music_playing: bool,
    pub sudo_unlocked: bool,
    pub started: DateTime<Local>,
    pub effects: Vec<Effect>,
    registry: Option<Arc<crate::command::CommandRegistry>>,
}

impl TerminalContext {
    pub fn new() -> Self {
        Self {
            fs: MockFileSystem::new(),
            history: Vec::new(),
            todos: Vec::new(),
            next_todo_id: 1,
            password_mode: false,
            matrix_enabled: false,
            theme: Theme::System,
            music_playing: false,
            sudo_unlocked: false,
            started: Local::now(),
            effects: Vec::new(),
            registry: None,
        }
    }

    pub fn emit(&mut self, effect: Effect) {
        self.effects.push(effect);
    }

    pub fn say_later(&mut self, delay_ms: u32, lines: Vec<String>) {
        self.effects.push(Effect::DelayedLines { delay_ms, lines });
    }

    pub fn take_effects(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.effects)
    }

    pub fn add_todo(&mut self, text: &str) -> u32 {
        let id = self.next_todo_id;
        self.next_todo_id += 1;
        self.todos.push(TodoItem {
            id,
            text: text.to_string(),
            completed: false,
        });
        id
    }

    pub fn toggle_todo(&mut self, id: u32) -> bool {
        match self.todos.iter_mut().find(|t| t.id == id) {
            Some(item) => {
                item.completed = !item.completed;
                true
            }
            None => false,
        }
    }

    pub fn remove_todo(&mut self, id: u32) -> bool {
        let before = self.todos.len();
        self.todos.retain(|t| t.id != id);
        self.todos.len() != before
    }

    pub fn clear_todos(&mut self) {
        self.todos.clear();
    }

    pub fn get_command_registry(&self) -> Option<&Arc<crate::command::CommandRegistry>> {
        self.registry.as_ref()
    }

    pub fn set_command_registry(&mut self, registry: Arc<crate::command::CommandRegistry>) {
        self.registry = Some(registry);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_todo_lifecycle() {
        let mut ctx = TerminalContext::new();
        let a = ctx.add_todo("write tests");
        let b = ctx.add_todo("touch grass");
        assert_eq!(ctx.todos.len(), 2);
        assert_ne!(a, b);

        assert!(ctx.toggle_todo(a));
        assert!(ctx.todos[0].completed);
        assert!(ctx.toggle_todo(a));
        assert!(!ctx.todos[0].completed);

        assert!(ctx.remove_todo(a));
        assert!(!ctx.remove_todo(a));
        assert_eq!(ctx.todos.len(), 1);

        ctx.clear_todos();
        assert!(ctx.todos.is_empty());
    }

    #[test]
    fn test_take_effects_drains() {
        let mut ctx = TerminalContext::new();
        ctx.emit(Effect::ClearScreen);
        ctx.say_later(500, vec!["later".to_string()]);
        let effects = ctx.take_effects();
        assert_eq!(effects.len(), 2);
        assert!(ctx.effects.is_empty());
    }
}
