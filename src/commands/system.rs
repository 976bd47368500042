use crate::command::{Command, CommandCategory, CommandResult};
use crate::context::{Effect, TerminalContext};
use crate::profile;
use chrono::{Datelike, Local, NaiveDate};

pub fn commands() -> Vec<Box<dyn Command + Send + Sync>> {
    vec![
        Box::new(WhoamiCommand),
        Box::new(UnameCommand),
        Box::new(HostnameCommand),
        Box::new(IdCommand),
        Box::new(DateCommand),
        Box::new(CalCommand),
        Box::new(UptimeCommand),
        Box::new(HistoryCommand),
        Box::new(ClearCommand),
        Box::new(ClsCommand),
        Box::new(ExitCommand),
    ]
}

pub struct WhoamiCommand;

impl Command for WhoamiCommand {
    fn name(&self) -> &'static str {
        "whoami"
    }
    fn description(&self) -> &'static str {
        "who is this site about, anyway"
    }
    fn category(&self) -> CommandCategory {
        CommandCategory::System
    }
    fn usage(&self) -> &'static str {
        "whoami"
    }
    fn execute(
        &self,
        _args: &[String],
        _ctx: &mut TerminalContext,
        _stdin: Option<&str>,
    ) -> CommandResult {
        Ok([
            format!("{} ({})", profile::NAME, profile::HANDLE),
            profile::ROLE.to_string(),
            profile::LOCATION.to_string(),
            String::new(),
            format!("github:  {}", profile::GITHUB_URL),
            format!("email:   {}", profile::EMAIL),
            String::new(),
            "(you, on the other hand, are guest)".to_string(),
        ]
        .join("\n"))
    }
}

pub struct UnameCommand;

impl Command for UnameCommand {
    fn name(&self) -> &'static str {
        "uname"
    }
    fn description(&self) -> &'static str {
        "print system information"
    }
    fn category(&self) -> CommandCategory {
        CommandCategory::System
    }
    fn usage(&self) -> &'static str {
        "uname [-a]"
    }
    fn execute(
        &self,
        args: &[String],
        _ctx: &mut TerminalContext,
        _stdin: Option<&str>,
    ) -> CommandResult {
        if args.iter().any(|a| a == "-a") {
            Ok(format!(
                "termfolio {} {} wasm32 WebAssembly browser/1.0",
                profile::SITE_VERSION,
                profile::HOST
            ))
        } else {
            Ok("termfolio".to_string())
        }
    }
}

pub struct HostnameCommand;

impl Command for HostnameCommand {
    fn name(&self) -> &'static str {
        "hostname"
    }
    fn description(&self) -> &'static str {
        "print the host name"
    }
    fn category(&self) -> CommandCategory {
        CommandCategory::System
    }
    fn usage(&self) -> &'static str {
        "hostname"
    }
    fn execute(
        &self,
        _args: &[String],
        _ctx: &mut TerminalContext,
        _stdin: Option<&str>,
    ) -> CommandResult {
        Ok(profile::HOST.to_string())
    }
}

pub struct IdCommand;

impl Command for IdCommand {
    fn name(&self) -> &'static str {
        "id"
    }
    fn description(&self) -> &'static str {
        "print user identity"
    }
    fn category(&self) -> CommandCategory {
        CommandCategory::System
    }
    fn usage(&self) -> &'static str {
        "id"
    }
    fn execute(
        &self,
        _args: &[String],
        ctx: &mut TerminalContext,
        _stdin: Option<&str>,
    ) -> CommandResult {
        let groups = if ctx.sudo_unlocked {
            "1000(guest),0(root)"
        } else {
            "1000(guest)"
        };
        Ok(format!("uid=1000(guest) gid=1000(guest) groups={}", groups))
    }
}

pub struct DateCommand;

impl Command for DateCommand {
    fn name(&self) -> &'static str {
        "date"
    }
    fn description(&self) -> &'static str {
        "print the current date and time"
    }
    fn category(&self) -> CommandCategory {
        CommandCategory::System
    }
    fn usage(&self) -> &'static str {
        "date"
    }
    fn execute(
        &self,
        _args: &[String],
        _ctx: &mut TerminalContext,
        _stdin: Option<&str>,
    ) -> CommandResult {
        Ok(Local::now().format("%a %b %e %H:%M:%S %Y").to_string())
    }
}

/// cal - the current month, today unmarked because rendering a highlight
/// through plain text lines isn't worth it
pub struct CalCommand;

impl Command for CalCommand {
    fn name(&self) -> &'static str {
        "cal"
    }
    fn description(&self) -> &'static str {
        "show this month's calendar"
    }
    fn category(&self) -> CommandCategory {
        CommandCategory::System
    }
    fn usage(&self) -> &'static str {
        "cal"
    }
    fn execute(
        &self,
        _args: &[String],
        _ctx: &mut TerminalContext,
        _stdin: Option<&str>,
    ) -> CommandResult {
        let now = Local::now();
        Ok(render_month(now.year(), now.month()))
    }
}

pub fn render_month(year: i32, month: u32) -> String {
    let first = NaiveDate::from_ymd_opt(year, month, 1).expect("valid month start");
    let days = days_in_month(year, month);
    let lead = first.weekday().num_days_from_sunday() as usize;

    let mut lines = Vec::new();
    lines.push(format!("{:^20}", first.format("%B %Y")));
    lines.push("Su Mo Tu We Th Fr Sa".to_string());

    let mut week = vec!["  ".to_string(); lead];
    for day in 1..=days {
        week.push(format!("{:2}", day));
        if week.len() == 7 {
            lines.push(week.join(" "));
            week.clear();
        }
    }
    if !week.is_empty() {
        lines.push(week.join(" "));
    }
    lines.join("\n")
}

fn days_in_month(year: i32, month: u32) -> u32 {
    let (ny, nm) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(ny, nm, 1)
        .expect("valid next month")
        .pred_opt()
        .expect("valid last day")
        .day()
}

pub struct UptimeCommand;

impl Command for UptimeCommand {
    fn name(&self) -> &'static str {
        "uptime"
    }
    fn description(&self) -> &'static str {
        "time since this session started"
    }
    fn category(&self) -> CommandCategory {
        CommandCategory::System
    }
    fn usage(&self) -> &'static str {
        "uptime"
    }
    fn execute(
        &self,
        _args: &[String],
        ctx: &mut TerminalContext,
        _stdin: Option<&str>,
    ) -> CommandResult {
        let elapsed = Local::now().signed_duration_since(ctx.started);
        let mins = elapsed.num_minutes();
        let secs = elapsed.num_seconds() % 60;
        Ok(format!(
            "{} up {} min {} sec, 1 user, load average: 0.00, 0.01, 0.05",
            Local::now().format("%H:%M:%S"),
            mins,
            secs
        ))
    }
}

/// history - stored most-recent-first, displayed oldest-first
pub struct HistoryCommand;

impl Command for HistoryCommand {
    fn name(&self) -> &'static str {
        "history"
    }
    fn description(&self) -> &'static str {
        "show command history"
    }
    fn category(&self) -> CommandCategory {
        CommandCategory::System
    }
    fn usage(&self) -> &'static str {
        "history"
    }
    fn execute(
        &self,
        _args: &[String],
        ctx: &mut TerminalContext,
        _stdin: Option<&str>,
    ) -> CommandResult {
        Ok(ctx
            .history
            .iter()
            .rev()
            .enumerate()
            .map(|(i, cmd)| format!("{:4}  {}", i + 1, cmd))
            .collect::<Vec<_>>()
            .join("\n"))
    }
}

pub struct ClearCommand;

impl Command for ClearCommand {
    fn name(&self) -> &'static str {
        "clear"
    }
    fn description(&self) -> &'static str {
        "clear the screen"
    }
    fn category(&self) -> CommandCategory {
        CommandCategory::System
    }
    fn usage(&self) -> &'static str {
        "clear"
    }
    fn execute(
        &self,
        _args: &[String],
        ctx: &mut TerminalContext,
        _stdin: Option<&str>,
    ) -> CommandResult {
        ctx.emit(Effect::ClearScreen);
        Ok(String::new())
    }
}

/// cls - registered as its own entry, so it shows up in completion
pub struct ClsCommand;

impl Command for ClsCommand {
    fn name(&self) -> &'static str {
        "cls"
    }
    fn description(&self) -> &'static str {
        "clear the screen (alias)"
    }
    fn category(&self) -> CommandCategory {
        CommandCategory::System
    }
    fn usage(&self) -> &'static str {
        "cls"
    }
    fn execute(
        &self,
        _args: &[String],
        ctx: &mut TerminalContext,
        _stdin: Option<&str>,
    ) -> CommandResult {
        ctx.emit(Effect::ClearScreen);
        Ok(String::new())
    }
}

pub struct ExitCommand;

impl Command for ExitCommand {
    fn name(&self) -> &'static str {
        "exit"
    }
    fn description(&self) -> &'static str {
        "try to leave"
    }
    fn category(&self) -> CommandCategory {
        CommandCategory::System
    }
    fn usage(&self) -> &'static str {
        "exit"
    }
    fn execute(
        &self,
        _args: &[String],
        _ctx: &mut TerminalContext,
        _stdin: Option<&str>,
    ) -> CommandResult {
        Ok("logout\njust kidding. this tab is your home now.".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::TerminalContext;

    #[test]
    fn test_whoami_prints_profile() {
        let mut ctx = TerminalContext::new();
        let out = WhoamiCommand.execute(&[], &mut ctx, None).unwrap();
        assert!(out.contains(profile::NAME));
        assert!(out.contains(profile::GITHUB_URL));
    }

    #[test]
    fn test_id_reflects_sudo_state() {
        let mut ctx = TerminalContext::new();
        let out = IdCommand.execute(&[], &mut ctx, None).unwrap();
        assert!(!out.contains("root"));
        ctx.sudo_unlocked = true;
        let out = IdCommand.execute(&[], &mut ctx, None).unwrap();
        assert!(out.contains("0(root)"));
    }

    #[test]
    fn test_render_month_shape() {
        // June 2024 starts on a Saturday and has 30 days
        let out = render_month(2024, 6);
        let lines: Vec<&str> = out.lines().collect();
        assert!(lines[0].contains("June 2024"));
        assert_eq!(lines[1], "Su Mo Tu We Th Fr Sa");
        assert!(lines[2].ends_with(" 1"));
        assert!(out.contains("30"));
        // December rolls the year over without panicking
        assert!(render_month(2024, 12).contains("31"));
    }

    #[test]
    fn test_history_displays_oldest_first() {
        let mut ctx = TerminalContext::new();
        ctx.history = vec!["whoami".to_string(), "ls".to_string()]; // recent first
        let out = HistoryCommand.execute(&[], &mut ctx, None).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert!(lines[0].contains("ls"));
        assert!(lines[1].contains("whoami"));
    }

    #[test]
    fn test_clear_emits_effect() {
        let mut ctx = TerminalContext::new();
        ClearCommand.execute(&[], &mut ctx, None).unwrap();
        ClsCommand.execute(&[], &mut ctx, None).unwrap();
        assert_eq!(ctx.effects, vec![Effect::ClearScreen, Effect::ClearScreen]);
    }
}
