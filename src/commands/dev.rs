use crate::command::{Command, CommandCategory, CommandResult};
use crate::context::TerminalContext;
use crate::profile;

pub fn commands() -> Vec<Box<dyn Command + Send + Sync>> {
    vec![
        Box::new(GitCommand),
        Box::new(VimCommand),
        Box::new(SkillsCommand),
        Box::new(ProjectsCommand),
    ]
}

/// git <status|log> - a repo that is always clean and never yours
pub struct GitCommand;

impl Command for GitCommand {
    fn name(&self) -> &'static str {
        "git"
    }
    fn description(&self) -> &'static str {
        "inspect this site's repository"
    }
    fn category(&self) -> CommandCategory {
        CommandCategory::Dev
    }
    fn usage(&self) -> &'static str {
        "git <status|log>"
    }
    fn execute(
        &self,
        args: &[String],
        _ctx: &mut TerminalContext,
        _stdin: Option<&str>,
    ) -> CommandResult {
        match args.first().map(|s| s.as_str()) {
            Some("status") => Ok([
                "On branch main",
                "Your branch is up to date with 'origin/main'.",
                "",
                "nothing to commit, working tree clean (it's read-only, after all)",
            ]
            .join("\n")),
            Some("log") => Ok([
                "a3f91c2 feat: teach the terminal to lie about kernel panics",
                "1b07e44 fix: tab completion ate the last character",
                "9d2c801 feat: music player, because why not",
                "5e11aa0 chore: hide a flag where nobody will look",
                "c000001 initial commit",
            ]
            .join("\n")),
            Some("push") => Err("error: permission to ariaokabe/termfolio denied to guest".to_string()),
            _ => Err(format!("usage: {}", self.usage())),
        }
    }
}

pub struct VimCommand;

impl Command for VimCommand {
    fn name(&self) -> &'static str {
        "vim"
    }
    fn description(&self) -> &'static str {
        "open the editor (don't)"
    }
    fn category(&self) -> CommandCategory {
        CommandCategory::Dev
    }
    fn usage(&self) -> &'static str {
        "vim [file]"
    }
    fn execute(
        &self,
        _args: &[String],
        _ctx: &mut TerminalContext,
        _stdin: Option<&str>,
    ) -> CommandResult {
        Ok([
            "vim: the filesystem is read-only, so there is nothing to edit.",
            "also, you would never have gotten out.",
        ]
        .join("\n"))
    }
}

/// skills - proficiency bars rendered from the static profile table
pub struct SkillsCommand;

impl Command for SkillsCommand {
    fn name(&self) -> &'static str {
        "skills"
    }
    fn description(&self) -> &'static str {
        "show skill levels"
    }
    fn category(&self) -> CommandCategory {
        CommandCategory::Dev
    }
    fn usage(&self) -> &'static str {
        "skills"
    }
    fn execute(
        &self,
        _args: &[String],
        _ctx: &mut TerminalContext,
        _stdin: Option<&str>,
    ) -> CommandResult {
        let width = 20usize;
        let lines: Vec<String> = profile::SKILLS
            .iter()
            .map(|(name, pct)| {
                let filled = (*pct as usize * width) / 100;
                format!(
                    "{:<12} [{}{}] {:>3}%",
                    name,
                    "#".repeat(filled),
                    "-".repeat(width - filled),
                    pct
                )
            })
            .collect();
        Ok(lines.join("\n"))
    }
}

pub struct ProjectsCommand;

impl Command for ProjectsCommand {
    fn name(&self) -> &'static str {
        "projects"
    }
    fn description(&self) -> &'static str {
        "list projects"
    }
    fn category(&self) -> CommandCategory {
        CommandCategory::Dev
    }
    fn usage(&self) -> &'static str {
        "projects"
    }
    fn execute(
        &self,
        _args: &[String],
        _ctx: &mut TerminalContext,
        _stdin: Option<&str>,
    ) -> CommandResult {
        let lines: Vec<String> = profile::PROJECTS
            .iter()
            .map(|(name, stack, desc)| format!("{:<14} {}\n{:14} ({})", name, desc, "", stack))
            .collect();
        Ok(lines.join("\n"))
    }
}
