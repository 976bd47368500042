use crate::command::{Command, CommandCategory, CommandResult};
use crate::context::{Effect, TerminalContext};
use crate::profile;
use chrono::Local;

pub fn commands() -> Vec<Box<dyn Command + Send + Sync>> {
    vec![
        Box::new(NeofetchCommand),
        Box::new(CowsayCommand),
        Box::new(FortuneCommand),
        Box::new(MatrixCommand),
        Box::new(SlCommand),
        Box::new(HackCommand),
    ]
}

const LOGO: &[&str] = &[
    "      ______      ",
    "     /\\  ___\\     ",
    "     \\ \\ \\__/     ",
    "      \\ \\ \\       ",
    "       \\ \\ \\____  ",
    "        \\ \\_____\\ ",
    "         \\/_____/ ",
];

pub struct NeofetchCommand;

impl Command for NeofetchCommand {
    fn name(&self) -> &'static str {
        "neofetch"
    }
    fn description(&self) -> &'static str {
        "system info, the aesthetic way"
    }
    fn category(&self) -> CommandCategory {
        CommandCategory::Fun
    }
    fn usage(&self) -> &'static str {
        "neofetch"
    }
    fn execute(
        &self,
        _args: &[String],
        ctx: &mut TerminalContext,
        _stdin: Option<&str>,
    ) -> CommandResult {
        let elapsed = Local::now().signed_duration_since(ctx.started);
        let info = vec![
            format!("guest@{}", profile::HOST),
            "-----------".to_string(),
            format!("OS:       termfolio {}", profile::SITE_VERSION),
            "Kernel:   wasm32-unknown-unknown".to_string(),
            format!("Uptime:   {} min", elapsed.num_minutes()),
            "Shell:    termfolio-sh".to_string(),
            format!("Theme:    {}", ctx.theme.as_str()),
            format!(
                "Matrix:   {}",
                if ctx.matrix_enabled { "raining" } else { "dry" }
            ),
            format!("Music:    {}", if ctx.music_playing { "playing" } else { "stopped" }),
        ];
        let lines: Vec<String> = LOGO
            .iter()
            .enumerate()
            .map(|(i, art)| {
                let right = info.get(i).map(|s| s.as_str()).unwrap_or("");
                format!("{}  {}", art, right)
            })
            .chain(info.iter().skip(LOGO.len()).map(|s| format!("{:18}  {}", "", s)))
            .collect();
        Ok(lines.join("\n"))
    }
}

/// cowsay [text] - also eats stdin, so `fortune | cowsay` works
pub struct CowsayCommand;

impl Command for CowsayCommand {
    fn name(&self) -> &'static str {
        "cowsay"
    }
    fn description(&self) -> &'static str {
        "a cow says things"
    }
    fn category(&self) -> CommandCategory {
        CommandCategory::Fun
    }
    fn usage(&self) -> &'static str {
        "cowsay <text>"
    }
    fn execute(
        &self,
        args: &[String],
        _ctx: &mut TerminalContext,
        stdin: Option<&str>,
    ) -> CommandResult {
        let text = if args.is_empty() {
            match stdin {
                Some(t) if !t.trim().is_empty() => t.trim().replace('\n', " "),
                _ => return Err(format!("usage: {}", self.usage())),
            }
        } else {
            args.join(" ")
        };
        let width = text.chars().count();
        Ok([
            format!(" {}", "_".repeat(width + 2)),
            format!("< {} >", text),
            format!(" {}", "-".repeat(width + 2)),
            "        \\   ^__^".to_string(),
            "         \\  (oo)\\_______".to_string(),
            "            (__)\\       )\\/\\".to_string(),
            "                ||----w |".to_string(),
            "                ||     ||".to_string(),
        ]
        .join("\n"))
    }
}

/// fortune - picked off the wall clock, which is random enough here
pub struct FortuneCommand;

impl Command for FortuneCommand {
    fn name(&self) -> &'static str {
        "fortune"
    }
    fn description(&self) -> &'static str {
        "print a fortune"
    }
    fn category(&self) -> CommandCategory {
        CommandCategory::Fun
    }
    fn usage(&self) -> &'static str {
        "fortune"
    }
    fn execute(
        &self,
        _args: &[String],
        _ctx: &mut TerminalContext,
        _stdin: Option<&str>,
    ) -> CommandResult {
        let idx = Local::now().timestamp_millis() as usize % profile::FORTUNES.len();
        Ok(profile::FORTUNES[idx].to_string())
    }
}

pub struct MatrixCommand;

impl Command for MatrixCommand {
    fn name(&self) -> &'static str {
        "matrix"
    }
    fn description(&self) -> &'static str {
        "toggle the matrix rain"
    }
    fn category(&self) -> CommandCategory {
        CommandCategory::Fun
    }
    fn usage(&self) -> &'static str {
        "matrix"
    }
    fn execute(
        &self,
        _args: &[String],
        ctx: &mut TerminalContext,
        _stdin: Option<&str>,
    ) -> CommandResult {
        ctx.matrix_enabled = !ctx.matrix_enabled;
        ctx.emit(Effect::MatrixToggled(ctx.matrix_enabled));
        Ok(if ctx.matrix_enabled {
            "wake up, neo...".to_string()
        } else {
            "back to the desert of the real.".to_string()
        })
    }
}

pub struct SlCommand;

impl Command for SlCommand {
    fn name(&self) -> &'static str {
        "sl"
    }
    fn description(&self) -> &'static str {
        "you meant ls. too late."
    }
    fn category(&self) -> CommandCategory {
        CommandCategory::Fun
    }
    fn usage(&self) -> &'static str {
        "sl"
    }
    fn execute(
        &self,
        _args: &[String],
        _ctx: &mut TerminalContext,
        _stdin: Option<&str>,
    ) -> CommandResult {
        Ok([
            "      ====        ________ ",
            "  _D _|  |_______/        \\__I_I_____===__|_________|",
            "   |(_)---  |   H\\________/ |   |        =|___ ___|  ",
            "   /     |  |   H  |  |     |   |         ||_| |_||  ",
            "  |      |  |   H  |__--------------------| [___] |  ",
            "  | ________|___H__/__|_____/[][]~\\_______|       |  ",
            "  |/ |   |-----------I_____I [][] []  D   |=======|__",
            "",
            "choo choo. next time type ls.",
        ]
        .join("\n"))
    }
}

/// hack - arms the password gate; the next submitted line is checked against
/// the unlock tokens instead of being parsed as a command.
pub struct HackCommand;

impl Command for HackCommand {
    fn name(&self) -> &'static str {
        "hack"
    }
    fn description(&self) -> &'static str {
        "initiate the breach protocol"
    }
    fn category(&self) -> CommandCategory {
        CommandCategory::Fun
    }
    fn usage(&self) -> &'static str {
        "hack"
    }
    fn execute(
        &self,
        _args: &[String],
        ctx: &mut TerminalContext,
        _stdin: Option<&str>,
    ) -> CommandResult {
        ctx.password_mode = true;
        Ok([
            "INITIATING BREACH PROTOCOL...",
            "bypassing firewall... done",
            "spoofing MAC address... done",
            "one lock remains.",
            "",
            "enter override password:",
        ]
        .join("\n"))
    }
}
