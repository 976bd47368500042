use crate::context::TerminalContext;
use std::collections::HashMap;

pub type CommandResult = Result<String, String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandCategory {
    Navigation,
    System,
    File,
    Text,
    Network,
    Dev,
    Fun,
    Utility,
    Environment,
    Math,
}

impl CommandCategory {
    pub const ALL: [CommandCategory; 10] = [
        CommandCategory::Navigation,
        CommandCategory::File,
        CommandCategory::Text,
        CommandCategory::System,
        CommandCategory::Network,
        CommandCategory::Dev,
        CommandCategory::Fun,
        CommandCategory::Utility,
        CommandCategory::Environment,
        CommandCategory::Math,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CommandCategory::Navigation => "navigation",
            CommandCategory::System => "system",
            CommandCategory::File => "file",
            CommandCategory::Text => "text",
            CommandCategory::Network => "network",
            CommandCategory::Dev => "dev",
            CommandCategory::Fun => "fun",
            CommandCategory::Utility => "utility",
            CommandCategory::Environment => "environment",
            CommandCategory::Math => "math",
        }
    }
}

/// One invocable terminal command. `stdin` carries the captured output of the
/// previous pipeline stage, if any.
pub trait Command {
    fn name(&self) -> &'static str;
    fn description(&self) -> &'static str;
    fn category(&self) -> CommandCategory;
    fn usage(&self) -> &'static str;
    fn execute(
        &self,
        args: &[String],
        ctx: &mut TerminalContext,
        stdin: Option<&str>,
    ) -> CommandResult;
}

pub struct CommandRegistry {
    commands: HashMap<String, Box<dyn Command + Send + Sync>>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self {
            commands: HashMap::new(),
        }
    }

    pub fn register_command(&mut self, cmd: Box<dyn Command + Send + Sync>) {
        let key = cmd.name().to_lowercase();
        // two category modules claiming the same name is a bug, not a merge
        debug_assert!(
            !self.commands.contains_key(&key),
            "duplicate command registered: {}",
            key
        );
        self.commands.insert(key, cmd);
    }

    pub fn get(&self, name: &str) -> Option<&(dyn Command + Send + Sync)> {
        self.commands.get(&name.to_lowercase()).map(|b| b.as_ref())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(&name.to_lowercase())
    }

    pub fn command_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.commands.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn by_category(&self, category: CommandCategory) -> Vec<&(dyn Command + Send + Sync)> {
        let mut cmds: Vec<_> = self
            .commands
            .values()
            .map(|b| b.as_ref())
            .filter(|c| c.category() == category)
            .collect();
        cmds.sort_by_key(|c| c.name());
        cmds
    }

    pub fn categories(&self) -> Vec<CommandCategory> {
        CommandCategory::ALL
            .iter()
            .copied()
            .filter(|cat| self.commands.values().any(|c| c.category() == *cat))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn default_commands() -> Self {
        let mut reg = Self::new();
        for group in crate::commands::all_groups() {
            for cmd in group {
                reg.register_command(cmd);
            }
        }
        reg
    }
}

/// Run one submitted line as a `|` pipeline. Every stage except the last has
/// its output captured and handed to the next stage as stdin; only the final
/// stage's output reaches the caller. An unknown name or an `Err` from any
/// stage aborts the rest.
pub fn run_pipeline(
    input: &str,
    ctx: &mut TerminalContext,
    registry: &CommandRegistry,
) -> CommandResult {
    let stages: Vec<&str> = input
        .split('|')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();
    if stages.is_empty() {
        return Ok(String::new());
    }

    let mut piped: Option<String> = None;
    let last = stages.len() - 1;
    for (i, stage) in stages.iter().enumerate() {
        let mut parts = stage.split_whitespace();
        let name = match parts.next() {
            Some(c) => c.to_lowercase(),
            None => continue,
        };
        let args: Vec<String> = parts.map(|s| s.to_string()).collect();

        let cmd = registry
            .get(&name)
            .ok_or_else(|| format!("{}: command not found", name))?;
        let output = cmd.execute(&args, ctx, piped.as_deref())?;

        if i == last {
            return Ok(output);
        }
        piped = Some(output);
    }
    Ok(String::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (TerminalContext, CommandRegistry) {
        (TerminalContext::new(), CommandRegistry::default_commands())
    }

    #[test]
    fn test_registry_lookup_case_insensitive() {
        let (_, reg) = setup();
        for name in reg.command_names() {
            let upper = name.to_uppercase();
            assert!(reg.contains(&upper), "missing {}", upper);
            let a = reg.get(&name).unwrap();
            let b = reg.get(&upper).unwrap();
            assert_eq!(a.name(), b.name());
            assert_eq!(reg.contains(&name), reg.get(&name).is_some());
        }
        assert!(!reg.contains("nosuchcmd"));
    }

    #[test]
    fn test_no_duplicate_names_across_groups() {
        // last-write-wins merging would silently shadow a command; catch it
        let mut seen = std::collections::HashSet::new();
        let mut total = 0;
        for group in crate::commands::all_groups() {
            for cmd in &group {
                assert!(
                    seen.insert(cmd.name().to_lowercase()),
                    "duplicate command: {}",
                    cmd.name()
                );
                total += 1;
            }
        }
        assert_eq!(total, CommandRegistry::default_commands().len());
    }

    #[test]
    fn test_every_category_is_populated() {
        let (_, reg) = setup();
        assert_eq!(reg.categories().len(), CommandCategory::ALL.len());
        for cat in CommandCategory::ALL {
            assert!(!reg.by_category(cat).is_empty(), "{} empty", cat.as_str());
        }
    }

    #[test]
    fn test_pipeline_last_stage_wins() {
        let (mut ctx, reg) = setup();
        let out = run_pipeline("echo A | echo B", &mut ctx, &reg).unwrap();
        assert_eq!(out, "B");
    }

    #[test]
    fn test_pipeline_unknown_command_aborts() {
        let (mut ctx, reg) = setup();
        let err = run_pipeline("nosuchcmd | echo hi", &mut ctx, &reg).unwrap_err();
        assert_eq!(err, "nosuchcmd: command not found");
        // and a later unknown stage still reports its own name
        let err = run_pipeline("echo hi | zzz", &mut ctx, &reg).unwrap_err();
        assert_eq!(err, "zzz: command not found");
    }

    #[test]
    fn test_pipeline_threads_stdin() {
        let (mut ctx, reg) = setup();
        let out = run_pipeline("echo hi | rev", &mut ctx, &reg).unwrap();
        assert_eq!(out, "ih");
        let out = run_pipeline("cat about.md | grep Osaka", &mut ctx, &reg).unwrap();
        assert!(out.contains("Osaka"));
    }

    #[test]
    fn test_pipeline_blank_input_is_noop() {
        let (mut ctx, reg) = setup();
        assert_eq!(run_pipeline("", &mut ctx, &reg).unwrap(), "");
        assert_eq!(run_pipeline(" | | ", &mut ctx, &reg).unwrap(), "");
    }

    #[test]
    fn test_pipeline_name_is_case_folded() {
        let (mut ctx, reg) = setup();
        let out = run_pipeline("ECHO hi", &mut ctx, &reg).unwrap();
        assert_eq!(out, "hi");
    }
}
