use crate::command::{run_pipeline, CommandRegistry};
use crate::context::{Effect, TerminalContext};
use crate::editor::{self, Completion};
use std::sync::Arc;

/// Passwords accepted by the breach-protocol gate (`hack`). Checked against
/// the trimmed, lowercased next line of input.
const UNLOCK_TOKENS: [&str; 3] = ["redpill", "thematrix", "followthewhiterabbit"];

/// Everything the host needs to render one submitted line.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitOutcome {
    /// the prompt line to append to the scrollback, already masked if needed
    pub echo: Option<String>,
    pub output: String,
    pub ok: bool,
    /// the scrollback should be wiped before printing `output`
    pub cleared: bool,
    pub effects: Vec<Effect>,
}

/// One interactive terminal session: context, registry, and the cursor the
/// arrow keys move through history.
pub struct Session {
    pub ctx: TerminalContext,
    registry: Arc<CommandRegistry>,
    history_index: i32,
}

impl Session {
    pub fn new() -> Self {
        let registry = Arc::new(CommandRegistry::default_commands());
        let mut ctx = TerminalContext::new();
        ctx.set_command_registry(registry.clone());
        Self {
            ctx,
            registry,
            history_index: -1,
        }
    }

    pub fn submit(&mut self, raw: &str) -> SubmitOutcome {
        if self.ctx.password_mode {
            return self.submit_password(raw);
        }

        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return SubmitOutcome {
                echo: Some("$ ".to_string()),
                output: String::new(),
                ok: true,
                cleared: false,
                effects: Vec::new(),
            };
        }

        self.ctx.history.insert(0, trimmed.to_string());
        self.history_index = -1;

        let result = run_pipeline(trimmed, &mut self.ctx, &self.registry);
        let effects = self.ctx.take_effects();
        let cleared = effects.iter().any(|e| matches!(e, Effect::ClearScreen));
        let (output, ok) = match result {
            Ok(out) => (out, true),
            Err(err) => (err, false),
        };
        SubmitOutcome {
            echo: Some(format!("$ {}", trimmed)),
            output,
            ok,
            cleared,
            effects,
        }
    }

    /// Password lines are never echoed back, never stored in history, and
    /// never parsed as commands. One attempt per `hack`, hit or miss.
    fn submit_password(&mut self, raw: &str) -> SubmitOutcome {
        self.ctx.password_mode = false;
        let attempt = raw.trim().to_lowercase();
        let accepted = UNLOCK_TOKENS.contains(&attempt.as_str());
        let output = if accepted {
            self.ctx.matrix_enabled = true;
            self.ctx.emit(Effect::MatrixToggled(true));
            self.ctx.say_later(
                1000,
                vec![
                    "Access Granted.".to_string(),
                    "Welcome to the other side.".to_string(),
                ],
            );
            "password accepted. stand by.".to_string()
        } else {
            "Access Denied.".to_string()
        };
        SubmitOutcome {
            echo: Some("$ ********".to_string()),
            output,
            ok: accepted,
            cleared: false,
            effects: self.ctx.take_effects(),
        }
    }

    pub fn history_up(&mut self) -> Option<String> {
        editor::history_up(&self.ctx.history, &mut self.history_index).map(|s| s.to_string())
    }

    pub fn history_down(&mut self) -> Option<String> {
        editor::history_down(&self.ctx.history, &mut self.history_index).map(|s| s.to_string())
    }

    pub fn tab_complete(&self, input: &str) -> Completion {
        editor::complete(input, &self.registry, &self.ctx.fs)
    }

    /// Wipe the session back to a fresh boot. Used after the fake `rm -rf /`
    /// kernel panic.
    pub fn reset(&mut self) {
        let registry = self.registry.clone();
        self.ctx = TerminalContext::new();
        self.ctx.set_command_registry(registry);
        self.history_index = -1;
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
