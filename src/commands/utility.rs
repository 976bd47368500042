use crate::command::{Command, CommandCategory, CommandResult};
use crate::context::{Effect, TerminalContext, Theme};

pub fn commands() -> Vec<Box<dyn Command + Send + Sync>> {
    vec![
        Box::new(HelpCommand),
        Box::new(ManCommand),
        Box::new(TodoCommand),
        Box::new(ThemeCommand),
        Box::new(MusicCommand),
        Box::new(WhichCommand),
    ]
}

/// help - every registered command, grouped by category. Reads the registry
/// back out of the context because a command cannot borrow the registry that
/// is currently dispatching it.
pub struct HelpCommand;

impl Command for HelpCommand {
    fn name(&self) -> &'static str {
        "help"
    }
    fn description(&self) -> &'static str {
        "list available commands"
    }
    fn category(&self) -> CommandCategory {
        CommandCategory::Utility
    }
    fn usage(&self) -> &'static str {
        "help"
    }
    fn execute(
        &self,
        _args: &[String],
        ctx: &mut TerminalContext,
        _stdin: Option<&str>,
    ) -> CommandResult {
        let registry = match ctx.get_command_registry() {
            Some(r) => r.clone(),
            None => return Err("help: registry unavailable".to_string()),
        };
        let mut lines = vec![
            "Available commands (pipe with |, tab to complete):".to_string(),
        ];
        for cat in registry.categories() {
            lines.push(String::new());
            lines.push(format!("[{}]", cat.as_str()));
            for cmd in registry.by_category(cat) {
                lines.push(format!("  {:<10} {}", cmd.name(), cmd.description()));
            }
        }
        Ok(lines.join("\n"))
    }
}

/// man <command> - a manual page stitched from the command's own metadata
pub struct ManCommand;

impl Command for ManCommand {
    fn name(&self) -> &'static str {
        "man"
    }
    fn description(&self) -> &'static str {
        "show a command's manual page"
    }
    fn category(&self) -> CommandCategory {
        CommandCategory::Utility
    }
    fn usage(&self) -> &'static str {
        "man <command>"
    }
    fn execute(
        &self,
        args: &[String],
        ctx: &mut TerminalContext,
        _stdin: Option<&str>,
    ) -> CommandResult {
        let name = match args.first() {
            Some(n) => n,
            None => return Err("What manual page do you want?".to_string()),
        };
        let registry = match ctx.get_command_registry() {
            Some(r) => r.clone(),
            None => return Err("man: registry unavailable".to_string()),
        };
        match registry.get(name) {
            Some(cmd) => Ok([
                "NAME".to_string(),
                format!("       {} - {}", cmd.name(), cmd.description()),
                String::new(),
                "SYNOPSIS".to_string(),
                format!("       {}", cmd.usage()),
                String::new(),
                "DESCRIPTION".to_string(),
                format!(
                    "       Part of the {} command group. See `help` for the full list.",
                    cmd.category().as_str()
                ),
            ]
            .join("\n")),
            None => Err(format!("No manual entry for {}", name)),
        }
    }
}

/// todo [ls|add <text>|done <id>|rm <id>|clear] - the one mutable corner
/// of the session, and it lives in memory only.
pub struct TodoCommand;

impl Command for TodoCommand {
    fn name(&self) -> &'static str {
        "todo"
    }
    fn description(&self) -> &'static str {
        "manage a scratch todo list"
    }
    fn category(&self) -> CommandCategory {
        CommandCategory::Utility
    }
    fn usage(&self) -> &'static str {
        "todo [ls|add <text>|done <id>|rm <id>|clear]"
    }
    fn execute(
        &self,
        args: &[String],
        ctx: &mut TerminalContext,
        _stdin: Option<&str>,
    ) -> CommandResult {
        let render = |ctx: &TerminalContext| -> String {
            if ctx.todos.is_empty() {
                "nothing to do. enjoy it.".to_string()
            } else {
                ctx.todos
                    .iter()
                    .map(|t| {
                        format!("[{}] #{} {}", if t.completed { "x" } else { " " }, t.id, t.text)
                    })
                    .collect::<Vec<_>>()
                    .join("\n")
            }
        };
        match args.first().map(|s| s.as_str()) {
            None | Some("ls") => Ok(render(ctx)),
            Some("add") => {
                let text = args[1..].join(" ");
                if text.is_empty() {
                    return Err(format!("usage: {}", self.usage()));
                }
                let id = ctx.add_todo(&text);
                Ok(format!("added #{}", id))
            }
            Some("done") => {
                let id = parse_id(args.get(1), self.usage())?;
                if ctx.toggle_todo(id) {
                    Ok(render(ctx))
                } else {
                    Err(format!("todo: no item #{}", id))
                }
            }
            Some("rm") => {
                let id = parse_id(args.get(1), self.usage())?;
                if ctx.remove_todo(id) {
                    Ok(format!("removed #{}", id))
                } else {
                    Err(format!("todo: no item #{}", id))
                }
            }
            Some("clear") => {
                ctx.clear_todos();
                Ok("todo list cleared".to_string())
            }
            Some(_) => Err(format!("usage: {}", self.usage())),
        }
    }
}

fn parse_id(arg: Option<&String>, usage: &str) -> Result<u32, String> {
    arg.and_then(|s| s.parse().ok())
        .ok_or_else(|| format!("usage: {}", usage))
}

/// theme [light|dark|system]
pub struct ThemeCommand;

impl Command for ThemeCommand {
    fn name(&self) -> &'static str {
        "theme"
    }
    fn description(&self) -> &'static str {
        "show or set the color theme"
    }
    fn category(&self) -> CommandCategory {
        CommandCategory::Utility
    }
    fn usage(&self) -> &'static str {
        "theme [light|dark|system]"
    }
    fn execute(
        &self,
        args: &[String],
        ctx: &mut TerminalContext,
        _stdin: Option<&str>,
    ) -> CommandResult {
        match args.first() {
            None => Ok(format!("current theme: {}", ctx.theme.as_str())),
            Some(arg) => match Theme::parse(&arg.to_lowercase()) {
                Some(theme) => {
                    ctx.theme = theme;
                    ctx.emit(Effect::SetTheme(theme));
                    Ok(format!("theme set to {}", theme.as_str()))
                }
                None => Err(format!("usage: {}", self.usage())),
            },
        }
    }
}

/// music [play|pause|toggle] - the host owns the actual audio element
pub struct MusicCommand;

impl Command for MusicCommand {
    fn name(&self) -> &'static str {
        "music"
    }
    fn description(&self) -> &'static str {
        "control the background track"
    }
    fn category(&self) -> CommandCategory {
        CommandCategory::Utility
    }
    fn usage(&self) -> &'static str {
        "music [play|pause|toggle]"
    }
    fn execute(
        &self,
        args: &[String],
        ctx: &mut TerminalContext,
        _stdin: Option<&str>,
    ) -> CommandResult {
        let want = match args.first().map(|s| s.as_str()) {
            None | Some("toggle") => !ctx.music_playing,
            Some("play") => true,
            Some("pause") | Some("stop") => false,
            Some(_) => return Err(format!("usage: {}", self.usage())),
        };
        if want != ctx.music_playing {
            ctx.music_playing = want;
            ctx.emit(Effect::MusicToggled(want));
        }
        Ok(if want {
            "now playing: lo-fi beats to segfault to".to_string()
        } else {
            "music stopped".to_string()
        })
    }
}

pub struct WhichCommand;

impl Command for WhichCommand {
    fn name(&self) -> &'static str {
        "which"
    }
    fn description(&self) -> &'static str {
        "locate a command"
    }
    fn category(&self) -> CommandCategory {
        CommandCategory::Utility
    }
    fn usage(&self) -> &'static str {
        "which <command>"
    }
    fn execute(
        &self,
        args: &[String],
        ctx: &mut TerminalContext,
        _stdin: Option<&str>,
    ) -> CommandResult {
        let name = match args.first() {
            Some(n) => n,
            None => return Err(format!("usage: {}", self.usage())),
        };
        let known = ctx
            .get_command_registry()
            .map(|r| r.contains(name))
            .unwrap_or(false);
        if known {
            Ok(format!("/usr/bin/{}", name.to_lowercase()))
        } else {
            Err(format!("which: no {} in (/usr/bin)", name))
        }
    }
}
