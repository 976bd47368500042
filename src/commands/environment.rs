use crate::command::{Command, CommandCategory, CommandResult};
use crate::context::TerminalContext;
use crate::profile;

pub fn commands() -> Vec<Box<dyn Command + Send + Sync>> {
    vec![Box::new(EnvCommand), Box::new(ExportCommand)]
}

/// env - a fixed environment, except the few vars that mirror session state
pub struct EnvCommand;

impl Command for EnvCommand {
    fn name(&self) -> &'static str {
        "env"
    }
    fn description(&self) -> &'static str {
        "print environment variables"
    }
    fn category(&self) -> CommandCategory {
        CommandCategory::Environment
    }
    fn usage(&self) -> &'static str {
        "env"
    }
    fn execute(
        &self,
        _args: &[String],
        ctx: &mut TerminalContext,
        _stdin: Option<&str>,
    ) -> CommandResult {
        Ok([
            "USER=guest".to_string(),
            "HOME=/home/guest".to_string(),
            "SHELL=/usr/bin/termfolio-sh".to_string(),
            format!("HOSTNAME={}", profile::HOST),
            "PATH=/usr/bin".to_string(),
            "LANG=en_US.UTF-8".to_string(),
            "TZ=Asia/Tokyo".to_string(),
            format!("THEME={}", ctx.theme.as_str()),
            format!("MATRIX={}", if ctx.matrix_enabled { "on" } else { "off" }),
            format!("TERMFOLIO_VERSION={}", profile::SITE_VERSION),
        ]
        .join("\n"))
    }
}

pub struct ExportCommand;

impl Command for ExportCommand {
    fn name(&self) -> &'static str {
        "export"
    }
    fn description(&self) -> &'static str {
        "set environment variables (you wish)"
    }
    fn category(&self) -> CommandCategory {
        CommandCategory::Environment
    }
    fn usage(&self) -> &'static str {
        "export <name>=<value>"
    }
    fn execute(
        &self,
        args: &[String],
        _ctx: &mut TerminalContext,
        _stdin: Option<&str>,
    ) -> CommandResult {
        if args.is_empty() {
            return Err(format!("usage: {}", self.usage()));
        }
        Err("export: environment is read-only here. change `theme` instead, that one works.".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{TerminalContext, Theme};

    #[test]
    fn test_env_mirrors_session_state() {
        let mut ctx = TerminalContext::new();
        ctx.theme = Theme::Dark;
        ctx.matrix_enabled = true;
        let out = EnvCommand.execute(&[], &mut ctx, None).unwrap();
        assert!(out.contains("USER=guest"));
        assert!(out.contains("THEME=dark"));
        assert!(out.contains("MATRIX=on"));
    }

    #[test]
    fn test_export_is_denied() {
        let mut ctx = TerminalContext::new();
        let err = ExportCommand
            .execute(&["X=1".to_string()], &mut ctx, None)
            .unwrap_err();
        assert!(err.contains("read-only"));
        assert!(ExportCommand.execute(&[], &mut ctx, None).is_err());
    }
}
